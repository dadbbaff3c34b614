use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    #[serde(rename = "movieTitle")]
    pub movie_title: String,
    pub showtime: String,
    #[serde(rename = "availableSeats")]
    pub available_seats: i32,
}
