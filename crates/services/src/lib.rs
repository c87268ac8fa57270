#![forbid(unsafe_code)]

pub mod app_services;
pub mod entity_client;
pub mod error;
pub mod quiz_loop;

pub use quiz_core::Clock;

pub use app_services::{AppServices, Backend};
pub use entity_client::{EntityApiConfig, EntityApiRepository};
pub use error::{AppServicesError, QuizServiceError};
pub use quiz_loop::{DEFAULT_FETCH_LIMIT, QuizLoopService, SaveOutcome};
