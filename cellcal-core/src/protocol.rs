//! Provider protocol types.
//!
//! Defines the JSON protocol spoken between cellcal and calendar provider
//! binaries over stdin/stdout. Any executable that speaks it can serve as
//! the calendar backend.

use serde::{Deserialize, Serialize};

use crate::calendar::EventDraft;

/// Commands that providers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CreateEvent,
    DeleteEvent,
    AddReminder,
}

/// Request sent to the provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error { error: msg.to_string() }).unwrap()
    }
}

/// Params for [`Command::CreateEvent`].
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventParams {
    pub draft: EventDraft,
}

/// Result of [`Command::CreateEvent`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResult {
    pub event_id: String,
}

/// Params for [`Command::DeleteEvent`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventParams {
    pub event_id: String,
}

/// Params for [`Command::AddReminder`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReminderParams {
    pub event_id: String,
    pub minutes_before: i64,
}
