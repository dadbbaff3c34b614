use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::{
    models::{Booking, BookingRequest},
    services::reservations::ReservationError,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route("/reservations", get(get_reservations))
}

/* ---------- helpers ---------- */

#[derive(Serialize)]
struct ApiError {
    success: bool,
    message: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn to_api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            success: false,
            message: message.to_string(),
        }),
    )
}

// Переводим таксономию ошибок в HTTP-статусы; детали sqlx наружу не отдаём
fn reservation_error_response(err: ReservationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ReservationError::Validation(e) => to_api_error(StatusCode::BAD_REQUEST, &e.to_string()),
        ReservationError::ShowNotFound => to_api_error(StatusCode::NOT_FOUND, "Show not found"),
        ReservationError::InsufficientSeats => {
            to_api_error(StatusCode::CONFLICT, "Not enough seats available")
        }
        ReservationError::Transaction(e) => {
            tracing::error!("reservation transaction failed: {:?}", e);
            to_api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Booking could not be processed",
            )
        }
    }
}

/* ---------- RESERVATIONS ---------- */

// POST /reservations
async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> ApiResult<impl IntoResponse> {
    // Валидация до любого обращения к БД
    req.check()
        .map_err(|e| to_api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let booking = state
        .reservations
        .reserve(&req)
        .await
        .map_err(reservation_error_response)?;

    // Письмо уходит вне транзакции: его сбой не отменяет бронь
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        mailer.send_confirmation(&booking).await;
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Booking successful" })),
    ))
}

// GET /reservations?email=
#[derive(Debug, Deserialize)]
struct ReservationsQuery {
    email: String,
}

async fn get_reservations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReservationsQuery>,
) -> ApiResult<impl IntoResponse> {
    if params.email.is_empty() {
        return Err(to_api_error(StatusCode::BAD_REQUEST, "email is required"));
    }

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT id, movie_title, customer_name, email, seats, showtime, booking_date
         FROM bookings
         WHERE email = $1
         ORDER BY booking_date DESC, id DESC",
    )
    .bind(&params.email)
    .fetch_all(&state.db.pool)
    .await
    .map_err(|e| {
        tracing::error!("get_reservations sql error: {:?}", e);
        to_api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load bookings")
    })?;

    Ok((StatusCode::OK, Json(bookings)))
}
