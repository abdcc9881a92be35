pub mod appresult;
pub mod db;
pub mod messages;

use axum::extract::FromRef;

pub use appresult::{AppError, AppResult};
pub use messages::MessageStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: MessageStore,
}
