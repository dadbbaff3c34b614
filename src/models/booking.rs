use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use validator::Validate;

// Подтверждённое бронирование - неизменяемая запись в БД
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(rename = "movieTitle")]
    pub movie_title: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub email: String,
    pub seats: i32,
    pub showtime: String,
    #[serde(rename = "bookingDate")]
    pub booking_date: NaiveDateTime,
}

// Ошибки валидации входного запроса
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Number of seats must be a positive integer")]
    InvalidSeatCount,
}

// Входной запрос формы бронирования. Все поля с default: отсутствующее
// поле превращается в типизированную ошибку валидации, а не в отказ serde.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    #[serde(rename = "movieTitle", default)]
    #[validate(length(min = 1))]
    pub movie_title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1), email)]
    pub email: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub seats: i32,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub showtime: String,
}

impl BookingRequest {
    /// Приводит ошибки `validator` к таксономии API. Первое упавшее поле
    /// выигрывает, порядок полей - как в исходной форме.
    pub fn check(&self) -> Result<(), ValidationError> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let field_errors = errors.field_errors();

        for (field, label) in [
            ("movie_title", "movieTitle"),
            ("name", "name"),
            ("email", "email"),
            ("seats", "seats"),
            ("showtime", "showtime"),
        ] {
            let Some(errs) = field_errors.get(field) else {
                continue;
            };
            if errs.is_empty() {
                continue;
            }
            return Err(match field {
                "seats" => ValidationError::InvalidSeatCount,
                // Пустой email считаем отсутствующим полем, непустой
                // невалидный - отдельной ошибкой формата
                "email" if errs.iter().all(|e| e.code == "email") => {
                    ValidationError::InvalidEmail
                }
                _ => ValidationError::MissingField(label),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use proptest::prelude::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            movie_title: "Inception".to_string(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            seats: 2,
            showtime: "18:00".to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_request() {
        assert_eq!(valid_request().check(), Ok(()));
    }

    #[test]
    fn blank_movie_title_is_reported_first() {
        let req = BookingRequest {
            movie_title: String::new(),
            name: String::new(),
            ..valid_request()
        };
        assert_eq!(req.check(), Err(ValidationError::MissingField("movieTitle")));
    }

    #[test]
    fn blank_name_is_rejected() {
        let req = BookingRequest {
            name: String::new(),
            ..valid_request()
        };
        assert_eq!(req.check(), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn blank_showtime_is_rejected() {
        let req = BookingRequest {
            showtime: String::new(),
            ..valid_request()
        };
        assert_eq!(req.check(), Err(ValidationError::MissingField("showtime")));
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let req = BookingRequest {
            email: String::new(),
            ..valid_request()
        };
        assert_eq!(req.check(), Err(ValidationError::MissingField("email")));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let req = BookingRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        assert_eq!(req.check(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn zero_and_negative_seat_counts_are_rejected() {
        for seats in [0, -1, -42] {
            let req = BookingRequest {
                seats,
                ..valid_request()
            };
            assert_eq!(req.check(), Err(ValidationError::InvalidSeatCount));
        }
    }

    #[test]
    fn absent_fields_fail_validation_not_deserialization() {
        // Поля, которых нет в JSON, принимают default и падают в check()
        let req: BookingRequest =
            serde_json::from_str(r#"{"movieTitle": "Inception"}"#).expect("partial JSON must parse");
        assert_eq!(req.check(), Err(ValidationError::MissingField("name")));
    }

    proptest! {
        #[test]
        fn seat_count_bound_is_exact(seats in -1000i32..=1000) {
            let req = BookingRequest { seats, ..valid_request() };
            if seats >= 1 {
                prop_assert_eq!(req.check(), Ok(()));
            } else {
                prop_assert_eq!(req.check(), Err(ValidationError::InvalidSeatCount));
            }
        }
    }
}
