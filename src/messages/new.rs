use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::AppResult;

use super::form::{validate_and_create, MessageForm};
use super::store::MessageStore;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_message(
    State(store): State<MessageStore>,
    body: String,
) -> AppResult<Response> {
    // A body that isn't JSON (or isn't an object) folds into absent fields,
    // which the validator reports as `Required` errors.
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let form = MessageForm::from_json(&body);

    match validate_and_create(&store, form).await? {
        Ok(msg) => Ok((StatusCode::CREATED, Json(msg)).into_response()),
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "ok": false, "errors": errors })),
        )
            .into_response()),
    }
}
