//! reservations.rs
//!
//! Сервисный слой бронирования - единственная точка, которая изменяет
//! счётчик свободных мест и создаёт записи бронирований.
//!
//! Критичный участок (проверка доступности + списание мест) выполняется в
//! одной транзакции PostgreSQL. Само списание - условный UPDATE с предикатом
//! `available_seats >= $1`: блокировка строки сериализует конкурирующие
//! бронирования, а `rows_affected == 0` означает проигранную гонку, которую
//! мы превращаем в чистый отказ вместо овербукинга. Обычное
//! "прочитали - сравнили - записали" здесь недопустимо.

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Booking, BookingRequest, ValidationError};

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Show not found")]
    ShowNotFound,
    #[error("Not enough seats available")]
    InsufficientSeats,
    #[error("database error")]
    Transaction(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct ReservationService {
    pool: sqlx::PgPool,
}

impl ReservationService {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Атомарно бронирует места: вставка записи бронирования и списание
    /// счётчика в одной транзакции. Возвращает созданное бронирование.
    pub async fn reserve(&self, req: &BookingRequest) -> Result<Booking, ReservationError> {
        // Контроллер уже валидировал запрос, но сервис перепроверяет
        // количество мест до обращения к БД
        if req.seats <= 0 {
            return Err(ValidationError::InvalidSeatCount.into());
        }

        let mut tx = self.pool.begin().await?;

        // Доступность читаем в той же транзакции, что и списание
        let available: Option<i32> = sqlx::query_scalar(
            "SELECT available_seats FROM shows WHERE movie_title = $1 AND showtime = $2",
        )
        .bind(&req.movie_title)
        .bind(&req.showtime)
        .fetch_optional(&mut *tx)
        .await?;

        let available = available.ok_or(ReservationError::ShowNotFound)?;
        if available < req.seats {
            return Err(ReservationError::InsufficientSeats);
        }

        let booking: Booking = sqlx::query_as(
            "INSERT INTO bookings (movie_title, customer_name, email, seats, showtime)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, movie_title, customer_name, email, seats, showtime, booking_date",
        )
        .bind(&req.movie_title)
        .bind(&req.name)
        .bind(&req.email)
        .bind(req.seats)
        .bind(&req.showtime)
        .fetch_one(&mut *tx)
        .await?;

        // Условное списание: предикат ловит конкурента, успевшего списать
        // места после нашего SELECT выше
        let updated = sqlx::query(
            "UPDATE shows SET available_seats = available_seats - $1
             WHERE movie_title = $2 AND showtime = $3 AND available_seats >= $1",
        )
        .bind(req.seats)
        .bind(&req.movie_title)
        .bind(&req.showtime)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            // Гонка проиграна: откатываем вставку бронирования целиком
            tx.rollback().await?;
            warn!(
                "reservation race lost for {} @ {}: {} seats requested",
                req.movie_title, req.showtime, req.seats
            );
            return Err(ReservationError::InsufficientSeats);
        }

        tx.commit().await?;

        info!(
            "booking {} committed: {} seats for {} @ {}",
            booking.id, booking.seats, booking.movie_title, booking.showtime
        );

        Ok(booking)
    }
}
