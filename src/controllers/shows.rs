use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{models::Show, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/shows", get(get_shows))
}

// GET /shows?movieTitle=
#[derive(Debug, Deserialize)]
struct ShowsQuery {
    #[serde(rename = "movieTitle")]
    movie_title: Option<String>,
}

async fn get_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShowsQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let result = match params.movie_title {
        Some(title) => {
            sqlx::query_as::<_, Show>(
                "SELECT id, movie_title, showtime, available_seats
                 FROM shows
                 WHERE movie_title = $1
                 ORDER BY showtime",
            )
            .bind(title)
            .fetch_all(&state.db.pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Show>(
                "SELECT id, movie_title, showtime, available_seats
                 FROM shows
                 ORDER BY movie_title, showtime",
            )
            .fetch_all(&state.db.pool)
            .await
        }
    };

    let shows = result.map_err(|e| {
        tracing::error!("get_shows sql error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load shows".to_string(),
        )
    })?;

    Ok((StatusCode::OK, Json(shows)))
}
