use serde::{Serialize, Serializer};
use sqlx::SqlitePool;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::AppResult;

// UTC, second precision, no fractional seconds. Lexicographic order matches
// chronological order, so the column can be sorted as text.
const TIMESTAMP_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(skip_serializing)]
    pub id: i64,
    pub name: String,
    pub text: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: OffsetDateTime,
}

fn serialize_timestamp<S: Serializer>(ts: &OffsetDateTime, ser: S) -> Result<S::Ok, S::Error> {
    let formatted = ts.format(TIMESTAMP_FORMAT).map_err(serde::ser::Error::custom)?;
    ser.serialize_str(&formatted)
}

fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    Ok(PrimitiveDateTime::parse(raw, TIMESTAMP_FORMAT)?.assume_utc())
}

/// Append-only storage for messages. There is no update or delete; rows are
/// created through [`MessageStore::create`] and only ever read back.
#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message stamped with the current UTC instant and return it
    /// with its store-assigned id.
    pub async fn create(&self, name: &str, text: &str) -> AppResult<Message> {
        let created_at = OffsetDateTime::now_utc().replace_nanosecond(0)?;

        let result = sqlx::query("INSERT INTO messages (name,text,created_at) VALUES (?,?,?)")
            .bind(name)
            .bind(text)
            .bind(created_at.format(TIMESTAMP_FORMAT)?)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::info!(id, name, "message created");

        Ok(Message {
            id,
            name: name.to_owned(),
            text: text.to_owned(),
            created_at,
        })
    }

    /// All messages, most recent first. Rows sharing a `created_at` second
    /// come back in whatever order the database yields them.
    pub async fn list_all_by_recency(&self) -> AppResult<Vec<Message>> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id,name,text,created_at FROM messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for (id, name, text, created_at) in rows {
            messages.push(Message {
                id,
                name,
                text,
                created_at: parse_timestamp(&created_at)?,
            });
        }

        Ok(messages)
    }

    /// First message with exactly this name, if any.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Message>> {
        let row: Option<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id,name,text,created_at FROM messages WHERE name=? LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, name, text, created_at)) => Ok(Some(Message {
                id,
                name,
                text,
                created_at: parse_timestamp(&created_at)?,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
