// src/ui/forms.rs
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::{AuthUser, BidRejection, CommandSuccess, InvalidFields, ItemId};
use crate::marketplace::{Marketplace, SignUpError, SubmitBidError};
use super::modals::{ModalKind, Modals};

/// How long feedback stays on screen before the item modal moves on.
pub const DISMISS_DELAY: Duration = Duration::from_secs(1);

/// Validation marker carried by an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

impl Validity {
    pub fn as_class(&self) -> &'static str {
        match self {
            Validity::Unchecked => "",
            Validity::Valid => "is-valid",
            Validity::Invalid => "is-invalid",
        }
    }

    /// Marker for a field that is either flagged or left unmarked.
    pub fn flagged(invalid: bool) -> Self {
        if invalid {
            Validity::Invalid
        } else {
            Validity::Unchecked
        }
    }
}

impl Serialize for Validity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        serializer.serialize_str(self.as_class())
    }
}

/// How the bid form reacts to a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidFeedback {
    pub message: String,
    pub validity: Validity,
    /// Modal to show once the delay has passed.
    #[serde(rename = "openModal", skip_serializing_if = "Option::is_none")]
    pub open_modal: Option<ModalKind>,
    /// Whether the item modal closes once the delay has passed.
    pub dismiss: bool,
}

impl From<&SubmitBidError> for BidFeedback {
    fn from(error: &SubmitBidError) -> Self {
        let (open_modal, dismiss) = match error {
            SubmitBidError::Rejected(BidRejection::ItemEnded(_)) => (None, true),
            SubmitBidError::Rejected(BidRejection::UsernameRequired) => (Some(ModalKind::SignUp), false),
            _ => (None, false),
        };
        BidFeedback {
            message: error.to_string(),
            validity: Validity::Invalid,
            open_modal,
            dismiss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidFormState {
    pub bid: String,
    pub validity: Validity,
    pub feedback: String,
    pub is_submitting: bool,
    pub min_bid: String,
}

impl Default for BidFormState {
    fn default() -> Self {
        BidFormState {
            bid: String::new(),
            validity: Validity::Unchecked,
            feedback: String::new(),
            is_submitting: false,
            min_bid: "-.--".to_string(),
        }
    }
}

fn lock(form: &Mutex<BidFormState>) -> MutexGuard<'_, BidFormState> {
    form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The bid form shown inside the item modal.
pub struct ItemModal {
    marketplace: Arc<Marketplace>,
    modals: Modals,
    form: Arc<Mutex<BidFormState>>,
    delay: Duration,
}

impl ItemModal {
    pub fn new(marketplace: Arc<Marketplace>, modals: Modals, delay: Duration) -> Self {
        ItemModal {
            marketplace,
            modals,
            form: Arc::new(Mutex::new(BidFormState::default())),
            delay,
        }
    }

    pub fn state(&self) -> BidFormState {
        lock(&self.form).clone()
    }

    /// Opens the modal for the item with its latest bids.
    pub async fn show(&self, item_id: ItemId) -> Result<(), SubmitBidError> {
        let item = self
            .marketplace
            .item(item_id)
            .await?
            .ok_or(BidRejection::UnknownItem(item_id))?;
        lock(&self.form).min_bid = self.marketplace.min_bid_label(&item);
        self.modals.open_item(item);
        Ok(())
    }

    pub fn change(&self, text: &str) {
        let mut form = lock(&self.form);
        form.bid = text.to_string();
        form.is_submitting = false;
        form.validity = Validity::Unchecked;
    }

    /// Enter submits unless a submission is already in flight.
    pub async fn key_down(
        &self,
        key: &str,
        user: &AuthUser,
        now: DateTime<Utc>,
    ) -> Option<Result<CommandSuccess, SubmitBidError>> {
        if key != "Enter" || lock(&self.form).is_submitting {
            return None;
        }
        Some(self.submit(user, now).await)
    }

    pub async fn submit(&self, user: &AuthUser, now: DateTime<Utc>) -> Result<CommandSuccess, SubmitBidError> {
        let bid = {
            let mut form = lock(&self.form);
            form.is_submitting = true;
            form.bid.clone()
        };

        let result = match self.modals.active_item() {
            Some(item) => self.marketplace.submit_bid(item.id, &bid, user, now).await,
            None => Err(BidRejection::NoActiveItem.into()),
        };

        match &result {
            Ok(_) => {
                lock(&self.form).validity = Validity::Valid;
                self.close_later();
            }
            Err(error) => {
                let feedback = BidFeedback::from(error);
                let mut form = lock(&self.form);
                form.feedback = feedback.message;
                form.validity = feedback.validity;
                match feedback.open_modal {
                    // Stays disabled until the sign-up modal replaces this one
                    Some(kind) => {
                        drop(form);
                        self.open_later(kind);
                    }
                    None => {
                        form.is_submitting = false;
                        drop(form);
                        if feedback.dismiss {
                            self.close_later();
                        }
                    }
                }
            }
        }

        result
    }

    fn close_later(&self) {
        let form = Arc::clone(&self.form);
        let modals = self.modals.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            sleep(delay).await;
            modals.close();
            let mut form = lock(&form);
            form.feedback.clear();
            form.validity = Validity::Unchecked;
        });
    }

    fn open_later(&self, kind: ModalKind) {
        let form = Arc::clone(&self.form);
        let modals = self.modals.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            sleep(delay).await;
            modals.open(kind);
            let mut form = lock(&form);
            form.is_submitting = false;
            form.validity = Validity::Unchecked;
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpFormState {
    pub email: String,
    pub password: String,
    pub username: String,
    pub valid_email: Validity,
    pub valid_password: Validity,
    pub valid_username: Validity,
}

impl SignUpFormState {
    fn flag(&mut self, invalid: &InvalidFields) {
        self.valid_email = Validity::flagged(invalid.email);
        self.valid_password = Validity::flagged(invalid.password);
        self.valid_username = Validity::flagged(invalid.username);
    }
}

/// The sign-up form.
pub struct SignUpModal {
    marketplace: Arc<Marketplace>,
    modals: Modals,
    pub form: SignUpFormState,
}

impl SignUpModal {
    pub fn new(marketplace: Arc<Marketplace>, modals: Modals) -> Self {
        SignUpModal {
            marketplace,
            modals,
            form: SignUpFormState::default(),
        }
    }

    pub fn cancel(&self) {
        self.modals.close();
    }

    /// Flags invalid fields, or signs up and closes the modal.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> Result<CommandSuccess, SignUpError> {
        let result = self
            .marketplace
            .sign_up(&self.form.email, &self.form.password, &self.form.username, now)
            .await;

        match &result {
            Ok(_) => self.modals.close(),
            Err(SignUpError::InvalidFields(invalid)) => self.form.flag(invalid),
            // Already logged by the marketplace
            Err(SignUpError::Backend(_)) => {}
        }
        result
    }
}
