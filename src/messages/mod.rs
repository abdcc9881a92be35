mod form;
mod list;
mod new;
mod store;

use axum::{routing::get, Router};

pub use form::{validate_and_create, MessageForm, ValidationErrors, Violation};
pub use store::{Message, MessageStore};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::list_messages).post(new::new_message))
}
