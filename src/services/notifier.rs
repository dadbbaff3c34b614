//! notifier.rs
//!
//! Отправка писем-подтверждений. Письмо уходит уже после коммита транзакции
//! бронирования: сбой SMTP логируется и никогда не влияет на её результат.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SmtpConfig;
use crate::models::Booking;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("email task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct ConfirmationMailer {
    config: SmtpConfig,
    enabled: bool,
}

impl ConfirmationMailer {
    pub fn from_config(config: &SmtpConfig, enabled: bool) -> Self {
        Self {
            config: config.clone(),
            enabled,
        }
    }

    // Текст письма - как в оригинальной форме Star Cinema
    fn render_body(booking: &Booking) -> String {
        format!(
            "Dear {},\n\n\
             Your booking has been confirmed!\n\n\
             Movie: {}\n\
             Show Time: {}\n\
             Number of Seats: {}\n\n\
             Thank you for choosing Star Cinema!\n\
             Please arrive 15 minutes before the show time.",
            booking.customer_name, booking.movie_title, booking.showtime, booking.seats
        )
    }

    /// Отправляет подтверждение. Вызывается из отдельной задачи:
    /// результат бронирования от исхода отправки не зависит.
    pub async fn send_confirmation(&self, booking: &Booking) {
        if !self.enabled {
            info!(
                "email disabled, skipping confirmation for booking {}",
                booking.id
            );
            return;
        }

        match self.try_send(booking).await {
            Ok(()) => info!("confirmation sent for booking {} to {}", booking.id, booking.email),
            Err(e) => warn!("failed to send confirmation for booking {}: {}", booking.id, e),
        }
    }

    async fn try_send(&self, booking: &Booking) -> Result<(), MailerError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(booking.email.parse()?)
            .subject("Booking Confirmation - Star Cinema")
            .header(ContentType::TEXT_PLAIN)
            .body(Self::render_body(booking))?;

        let mailer = self.build_transport()?;

        // SmtpTransport синхронный - уводим отправку в blocking-пул
        tokio::task::spawn_blocking(move || mailer.send(&email)).await??;

        Ok(())
    }

    fn build_transport(&self) -> Result<SmtpTransport, MailerError> {
        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        Ok(SmtpTransport::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(credentials)
            .build())
    }
}
