use axum::{debug_handler, extract::State, Json};

use crate::AppResult;

use super::store::{Message, MessageStore};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_messages(
    State(store): State<MessageStore>,
) -> AppResult<Json<Vec<Message>>> {
    Ok(Json(store.list_all_by_recency().await?))
}
