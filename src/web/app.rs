use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use log::{error, info};
use serde_json::Value;

use crate::backend::BackendError;
use crate::config::Config;
use crate::domain::{AuthUser, BidRejection, ItemId};
use crate::marketplace::{SignUpError, SubmitBidError};
use crate::ui::BidFeedback;
use super::types::{
    ApiError, AppState, BidRequest, ItemDetail, ItemSummary, SignInRequest, SignUpRejected,
    SignUpRequest,
};

// Read x-jwt-payload header and extract the account id
fn get_auth_uid(req: &HttpRequest) -> Option<String> {
    let auth_header = req.headers().get("x-jwt-payload")?;
    let auth_str = auth_header.to_str().ok()?;

    // Decode base64
    let decoded = general_purpose::STANDARD.decode(auth_str).ok()?;
    let json_str = String::from_utf8(decoded).ok()?;

    // Parse JSON
    let json: Value = serde_json::from_str(&json_str).ok()?;

    json.get("sub")?.as_str().map(str::to_string)
}

async fn get_auth_user(req: &HttpRequest, data: &AppState) -> Result<Option<AuthUser>, BackendError> {
    match get_auth_uid(req) {
        Some(uid) => data.current_user(&uid).await,
        None => Ok(None),
    }
}

fn api_error(message: impl Into<String>) -> ApiError {
    ApiError {
        message: message.into(),
    }
}

fn backend_unavailable(err: &BackendError) -> HttpResponse {
    error!("Backend call failed: {}", err);
    HttpResponse::BadGateway().json(api_error(err.to_string()))
}

// Get all items
async fn get_items(data: web::Data<AppState>) -> Result<HttpResponse> {
    match data.items().await {
        Ok(items) => {
            let summaries: Vec<ItemSummary> = items
                .iter()
                .map(|item| ItemSummary::new(item, data.min_bid_label(item)))
                .collect();
            Ok(HttpResponse::Ok().json(summaries))
        }
        Err(err) => Ok(backend_unavailable(&err)),
    }
}

// Get item by ID
async fn get_item(path: web::Path<ItemId>, data: web::Data<AppState>) -> Result<HttpResponse> {
    let item_id = path.into_inner();

    match data.item(item_id).await {
        Ok(Some(item)) => {
            let detail = ItemDetail {
                summary: ItemSummary::new(&item, data.min_bid_label(&item)),
                bids: item.bids.clone(),
            };
            Ok(HttpResponse::Ok().json(detail))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(api_error("Item not found"))),
        Err(err) => Ok(backend_unavailable(&err)),
    }
}

// Place a bid on an item
async fn place_bid(
    req: HttpRequest,
    path: web::Path<ItemId>,
    bid_req: web::Json<BidRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let item_id = path.into_inner();
    // Taken before anything else so the end-time check sees the submit time
    let now = Utc::now();

    let user = match get_auth_user(&req, &data).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(HttpResponse::Unauthorized().body("Unauthorized")),
        Err(err) => return Ok(backend_unavailable(&err)),
    };

    match data.submit_bid(item_id, &bid_req.bid, &user, now).await {
        Ok(success) => Ok(HttpResponse::Ok().json(success)),
        Err(err @ SubmitBidError::Rejected(BidRejection::UnknownItem(_))) => {
            Ok(HttpResponse::NotFound().json(api_error(err.to_string())))
        }
        Err(err @ SubmitBidError::Rejected(_)) => {
            Ok(HttpResponse::BadRequest().json(BidFeedback::from(&err)))
        }
        Err(err @ SubmitBidError::Backend(_)) => {
            Ok(HttpResponse::BadGateway().json(BidFeedback::from(&err)))
        }
    }
}

// Register a new account
async fn sign_up(
    sign_up_req: web::Json<SignUpRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    let now = Utc::now();

    match data
        .sign_up(&sign_up_req.email, &sign_up_req.password, &sign_up_req.username, now)
        .await
    {
        Ok(success) => Ok(HttpResponse::Ok().json(success)),
        Err(SignUpError::InvalidFields(invalid)) => {
            Ok(HttpResponse::BadRequest().json(SignUpRejected::from(&invalid)))
        }
        Err(err @ SignUpError::Backend(_)) => {
            Ok(HttpResponse::BadGateway().json(api_error(err.to_string())))
        }
    }
}

// Sign in with email and password
async fn sign_in(
    sign_in_req: web::Json<SignInRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse> {
    match data.sign_in(&sign_in_req.email, &sign_in_req.password).await {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(err) => Ok(HttpResponse::Unauthorized().json(api_error(err.to_string()))),
    }
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/items", web::get().to(get_items))
            .route("/items/{id}", web::get().to(get_item))
            .route("/items/{id}/bids", web::post().to(place_bid))
            .route("/users", web::post().to(sign_up))
            .route("/sessions", web::post().to(sign_in)),
    );
}

// Main application
pub async fn run_app(config: &Config, app_state: AppState) -> std::io::Result<()> {
    info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
