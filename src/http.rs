use crate::backend::ScheduleBackend;
use crate::configuration::Configuration;
use crate::coordinator::BookingCoordinator;
use crate::error::{ApiError, BookError};
use crate::notifier::Notifier;
use crate::types::{NewBooking, NewMessage};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;
use validator::Validate;

// Absent fields deserialize to their defaults and fail validation, which
// mirrors rejecting missing and empty fields alike.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct BookMeetingRequest {
    #[validate(range(min = 1))]
    slot_id: i32,
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    topic: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct ContactRequest {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddSlotRequest {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    date: Option<NaiveDate>,
}

pub fn create_app<B, N, C>(backend: B, notifier: N, configuration: C) -> Router
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        coordinator: BookingCoordinator::new(backend.clone(), notifier),
        backend,
        configuration,
    };

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/slots", get(get_available_slots::<B, N, C>))
        .route("/api/bookings", post(book_meeting::<B, N, C>))
        .route("/api/contact", post(submit_message::<B, N, C>));

    let admin = Router::new()
        .route("/api/slots", post(add_slot::<B, N, C>))
        .route("/api/bookings", get(get_bookings::<B, N, C>))
        .route("/api/messages", get(get_messages::<B, N, C>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B, N, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<B, N, C>(
    State(state): State<AppState<B, N, C>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == state.configuration.admin_password() => {
            Ok(next.run(request).await)
        }
        Some(_) => Err(ApiError::Unauthorized),
        None => Err(ApiError::MissingCredentials),
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_available_slots<B, N, C>(
    State(state): State<AppState<B, N, C>>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    let slots = state.backend.available_slots(query.date).map_err(|err| {
        error!(?err, "Failed to load available slots");
        ApiError::Internal("Failed to fetch slots".into())
    })?;
    Ok(Json(slots))
}

async fn book_meeting<B, N, C>(
    State(state): State<AppState<B, N, C>>,
    Json(request): Json<BookMeetingRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    request.validate().map_err(|_| ApiError::MissingFields)?;
    let BookMeetingRequest {
        slot_id,
        name,
        email,
        topic,
    } = request;

    let booking = state
        .coordinator
        .reserve(slot_id, NewBooking { name, email, topic })
        .map_err(|err| match err {
            BookError::SlotUnavailable => ApiError::SlotUnavailable,
            BookError::Storage(err) => {
                error!(?err, "Booking transaction failed for slot {slot_id}");
                ApiError::Internal("Failed to book meeting".into())
            }
        })?;

    Ok((StatusCode::CREATED, Json(booking)))
}

async fn add_slot<B, N, C>(
    State(state): State<AppState<B, N, C>>,
    Json(request): Json<AddSlotRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    if request.start_time >= request.end_time {
        return Err(ApiError::InvalidRequest(
            "startTime must be before endTime".into(),
        ));
    }

    let slot = state
        .backend
        .add_slot(request.start_time, request.end_time)
        .map_err(|err| {
            error!(?err, "Failed to store slot");
            ApiError::Internal("Failed to create slot".into())
        })?;

    Ok((StatusCode::CREATED, Json(slot)))
}

async fn get_bookings<B, N, C>(
    State(state): State<AppState<B, N, C>>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    let bookings = state.backend.bookings().map_err(|err| {
        error!(?err, "Failed to load bookings");
        ApiError::Internal("Failed to fetch bookings".into())
    })?;
    Ok(Json(bookings))
}

async fn submit_message<B, N, C>(
    State(state): State<AppState<B, N, C>>,
    Json(request): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    request.validate().map_err(|_| ApiError::MissingFields)?;
    let ContactRequest {
        name,
        email,
        message,
    } = request;

    let stored = state
        .backend
        .add_message(NewMessage {
            name,
            email,
            message,
        })
        .map_err(|err| {
            error!(?err, "Failed to store contact message");
            ApiError::Internal("Failed to submit message".into())
        })?;

    Ok((StatusCode::CREATED, Json(stored)))
}

async fn get_messages<B, N, C>(
    State(state): State<AppState<B, N, C>>,
) -> Result<impl IntoResponse, ApiError>
where
    B: ScheduleBackend,
    N: Notifier,
    C: Configuration,
{
    let messages = state.backend.messages().map_err(|err| {
        error!(?err, "Failed to load contact messages");
        ApiError::Internal("Failed to fetch messages".into())
    })?;
    Ok(Json(messages))
}
