use chrono::Duration;
use marketplace_auction::domain::{
    bid_field, default_min_increase, item_status, min_bid_label, parse_bid_field, validate_bid,
    with_bids, AuthUser, BidRejection,
};
use marketplace_auction::money::{format_money, is_monetary, Amount, AmountValue, Currency, MoneyError};
use serde_json::json;
use std::str::FromStr;
#[path="utils/mod.rs"] mod utils;
use utils::*;

fn reason(item_bid: &str, user: &AuthUser, now: chrono::DateTime<chrono::Utc>) -> BidRejection {
    validate_bid(&sample_item(), item_bid, user, now, default_min_increase()).unwrap_err()
}

#[test]
fn test_accepts_first_bid_above_starting_price() {
    let placed = validate_bid(&sample_item(), "11", &buyer_1(), sample_bid_time(), default_min_increase()).unwrap();

    assert_eq!(placed.item_id, sample_item_id());
    assert_eq!(placed.index, 1);
    assert_eq!(placed.bid, bid(units(11), "Buyer_1"));
    assert_eq!(placed.field(), "item00001_bid00001");
}

#[test]
fn test_accepts_fractional_amounts() {
    let placed = validate_bid(&sample_item(), "11.5", &buyer_1(), sample_bid_time(), default_min_increase()).unwrap();
    assert_eq!(placed.bid.amount, Amount::from_minor(1150));

    let placed = validate_bid(&sample_item(), "11.05", &buyer_1(), sample_bid_time(), default_min_increase()).unwrap();
    assert_eq!(placed.bid.amount, Amount::from_minor(1105));
}

#[test]
fn test_rejects_malformed_amounts() {
    let malformed = [
        "", "abc", "12.", ".5", "12.345", "-5", "1e3", " 12", "12 ", "12,50", "+12", "0x10",
        "12\n", "99999999999999999999", "11.\u{0665}", "\u{0663}", "\u{FF11}\u{FF12}",
    ];
    for text in malformed {
        assert_eq!(
            reason(text, &buyer_1(), sample_bid_time()),
            BidRejection::InvalidAmount(text.to_string()),
            "text {:?}",
            text
        );
    }
    assert_eq!(
        BidRejection::InvalidAmount("abc".to_string()).to_string(),
        "Please enter a valid monetary amount!"
    );
}

#[test]
fn test_rejects_bids_below_minimum_increase() {
    for text in ["0", "10", "10.99"] {
        assert_eq!(
            reason(text, &buyer_1(), sample_bid_time()),
            BidRejection::BidTooLow { minimum: units(11) },
            "text {:?}",
            text
        );
    }
    assert_eq!(
        BidRejection::BidTooLow { minimum: units(11) }.to_string(),
        "You did not bid enough!"
    );
}

#[test]
fn test_minimum_follows_highest_bid() {
    let item = item_with_bids(vec![bid(units(12), "Buyer_1"), bid(units(15), "Buyer_2")]);

    let rejected = validate_bid(&item, "15.99", &buyer_1(), sample_bid_time(), default_min_increase());
    assert_eq!(rejected, Err(BidRejection::BidTooLow { minimum: units(16) }));

    let placed = validate_bid(&item, "16", &buyer_1(), sample_bid_time(), default_min_increase()).unwrap();
    assert_eq!(placed.index, 3);
    assert_eq!(placed.field(), "item00001_bid00003");
}

#[test]
fn test_custom_minimum_increase() {
    let half = Amount::from_minor(50);
    let placed = validate_bid(&sample_item(), "10.5", &buyer_1(), sample_bid_time(), half);
    assert!(placed.is_ok());

    let rejected = validate_bid(&sample_item(), "10.49", &buyer_1(), sample_bid_time(), half);
    assert_eq!(rejected, Err(BidRejection::BidTooLow { minimum: Amount::from_minor(1050) }));
}

#[test]
fn test_rejects_any_bid_once_item_has_ended() {
    let at_end = sample_ends_at();
    let after_end = sample_ends_at() + Duration::days(30);

    for now in [at_end, after_end] {
        for text in ["11", "1000000", "abc", ""] {
            assert_eq!(reason(text, &buyer_1(), now), BidRejection::ItemEnded(sample_item_id()));
        }
    }
    assert_eq!(
        BidRejection::ItemEnded(sample_item_id()).to_string(),
        "Sorry, this item has ended!"
    );
}

#[test]
fn test_accepts_bid_just_before_end() {
    let now = sample_ends_at() - Duration::seconds(1);
    assert!(validate_bid(&sample_item(), "11", &buyer_1(), now, default_min_increase()).is_ok());
}

#[test]
fn test_requires_username_before_amount_checks() {
    // Ended wins over a missing username
    assert_eq!(
        reason("abc", &nameless_buyer(), sample_ends_at()),
        BidRejection::ItemEnded(sample_item_id())
    );
    // A missing username wins over a malformed amount
    assert_eq!(reason("abc", &nameless_buyer(), sample_bid_time()), BidRejection::UsernameRequired);

    let blank = AuthUser {
        display_name: Some(String::new()),
        ..buyer_1()
    };
    assert_eq!(reason("11", &blank, sample_bid_time()), BidRejection::UsernameRequired);
    assert_eq!(
        BidRejection::UsernameRequired.to_string(),
        "You must provide a username before bidding!"
    );
}

#[test]
fn test_item_status() {
    let status = item_status(&sample_item());
    assert_eq!(status.amount, units(10));
    assert_eq!(status.bids, 0);
    assert_eq!(status.winner, None);

    let item = item_with_bids(vec![bid(units(12), "Buyer_1"), bid(units(15), "Buyer_2")]);
    let status = item_status(&item);
    assert_eq!(status.amount, units(15));
    assert_eq!(status.bids, 2);
    assert_eq!(status.winner, Some("Buyer_2".to_string()));
}

#[test]
fn test_item_status_tie_goes_to_earliest_bid() {
    let item = item_with_bids(vec![bid(units(12), "Buyer_1"), bid(units(12), "Buyer_2")]);
    assert_eq!(item_status(&item).winner, Some("Buyer_1".to_string()));
}

#[test]
fn test_min_bid_label() {
    assert_eq!(min_bid_label(&sample_item(), default_min_increase()), "£11.00");
    assert_eq!(min_bid_label(&second_item(), default_min_increase()), "$26.00");
}

#[test]
fn test_bid_fields() {
    assert_eq!(bid_field(12, 3), "item00012_bid00003");
    assert_eq!(parse_bid_field("item00012_bid00003"), Some((12, 3)));
    assert_eq!(parse_bid_field("title"), None);
    assert_eq!(parse_bid_field("item00012_bidx"), None);
}

#[test]
fn test_bids_rebuilt_from_document() {
    let document = json!({
        "item00001_bid00002": { "amount": 15.0, "uid": "Buyer_2" },
        "item00001_bid00001": { "amount": 12.5, "uid": "Buyer_1" },
        "item00002_bid00001": { "amount": 30.0, "uid": "Buyer_1" },
        "item00001_bid00003": { "amount": "lots", "uid": "Buyer_3" },
        "note": "not a bid"
    });
    let document = document.as_object().unwrap();

    let item = with_bids(&sample_item(), document);
    assert_eq!(
        item.bids,
        vec![bid(Amount::from_minor(1250), "Buyer_1"), bid(units(15), "Buyer_2")]
    );
}

#[test]
fn test_amount_parsing_and_display() {
    assert_eq!(Amount::from_str("12").unwrap(), units(12));
    assert_eq!(Amount::from_str("12.5").unwrap().minor(), 1250);
    assert_eq!(Amount::from_str("12.05").unwrap().minor(), 1205);
    assert_eq!(
        Amount::from_str("12.345"),
        Err(MoneyError::InvalidAmount("12.345".to_string()))
    );
    assert_eq!(
        Amount::from_str("11.\u{0665}"),
        Err(MoneyError::InvalidAmount("11.\u{0665}".to_string()))
    );
    assert!(!is_monetary("\u{0663}"));
    assert_eq!(Amount::from_units(AmountValue::MAX).minor(), AmountValue::MAX);
    assert_eq!(Amount::from_units(-3).minor(), -300);
    assert_eq!(Amount::from_minor(1250).to_string(), "12.50");
    assert_eq!(Amount::from_minor(-5).to_string(), "-0.05");
    assert_eq!(format_money(Currency::USD, Amount::from_minor(1999)), "$19.99");
    assert_eq!(Currency::from_str("GBP"), Ok(Currency::GBP));
    assert!(Currency::from_str("XYZ").is_err());
}
