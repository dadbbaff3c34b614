pub mod config;
pub mod controllers;
pub mod database;
pub mod models;
pub mod services;

use services::notifier::ConfirmationMailer;
use services::reservations::ReservationService;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub reservations: ReservationService,
    pub mailer: ConfirmationMailer,
    pub config: config::Config,
}

impl AppState {
    pub fn new(db: database::Database, config: config::Config) -> Self {
        let reservations = ReservationService::new(db.pool.clone());
        let mailer = ConfirmationMailer::from_config(&config.smtp, config.features.enable_email);
        Self {
            db,
            reservations,
            mailer,
            config,
        }
    }
}
