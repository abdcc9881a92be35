use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::AppResult;

use super::store::{Message, MessageStore};

const NAME_LEN: (usize, usize) = (1, 10);
const TEXT_LEN: (usize, usize) = (10, 1000);

/// One failed validation rule on one field. Serialized as its rendered
/// message, so an error map comes out as `{"name": ["name is required"]}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("name is already taken")]
    DuplicateName,
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}

/// Field name to the rules it violated, in evaluation order. Only fields
/// with at least one violation appear as keys.
pub type ValidationErrors = BTreeMap<&'static str, Vec<Violation>>;

/// Raw two-field submission. Absent, null, or non-string values are `None`
/// and fail the `Required` rule rather than erroring at the boundary.
#[derive(Debug, Default)]
pub struct MessageForm {
    pub name: Option<String>,
    pub text: Option<String>,
}

impl MessageForm {
    pub fn from_json(body: &Value) -> Self {
        Self {
            name: str_field(body, "name"),
            text: str_field(body, "text"),
        }
    }
}

fn str_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_owned)
}

/// Check the submission against every rule and create the message if none
/// failed. Rules are evaluated independently per field, so a field can
/// accumulate several violations and the caller gets all of them at once.
pub async fn validate_and_create(
    store: &MessageStore,
    form: MessageForm,
) -> AppResult<Result<Message, ValidationErrors>> {
    let mut errors = ValidationErrors::new();

    let name = form.name.as_deref().unwrap_or("");
    let text = form.text.as_deref().unwrap_or("");

    check_required(&mut errors, "name", name);
    check_length(&mut errors, "name", name, NAME_LEN);
    if !name.is_empty() && store.find_by_name(name).await?.is_some() {
        errors.entry("name").or_default().push(Violation::DuplicateName);
    }

    check_required(&mut errors, "text", text);
    check_length(&mut errors, "text", text, TEXT_LEN);

    if !errors.is_empty() {
        return Ok(Err(errors));
    }

    Ok(Ok(store.create(name, text).await?))
}

fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.entry(field).or_default().push(Violation::Required { field });
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) {
    let len = value.chars().count();
    if len < min || len > max {
        errors
            .entry(field)
            .or_default()
            .push(Violation::LengthOutOfRange { field, min, max });
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;
