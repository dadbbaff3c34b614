pub mod booking;
pub mod show;

pub use booking::{Booking, BookingRequest, ValidationError};
pub use show::Show;
