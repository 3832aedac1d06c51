//! Calendar access via external provider binaries.
//!
//! Real calendar operations are delegated to a `cellcal-provider-<name>`
//! executable speaking the JSON protocol from [`crate::protocol`] over
//! stdin/stdout. Providers manage their own credentials; this module only
//! passes drafts and event ids through.
//!
//! Every call is wrapped in a timeout so a wedged provider surfaces as
//! `CalendarUnavailable` instead of blocking the caller forever.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as ProcessCommand;
use tokio::time::timeout;

use crate::calendar::{CalendarService, EventDraft};
use crate::error::{CellCalError, CellCalResult};
use crate::protocol::{
    AddReminderParams, Command, CreateEventParams, CreateEventResult, DeleteEventParams, Request,
    Response,
};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// A calendar backed by an external provider binary.
#[derive(Clone)]
pub struct ProviderCalendar {
    name: String,
}

impl ProviderCalendar {
    pub fn from_name(name: &str) -> Self {
        ProviderCalendar { name: name.to_string() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> CellCalResult<std::path::PathBuf> {
        let binary_name = format!("cellcal-provider-{}", self.name);
        which::which(&binary_name).map_err(|_| {
            CellCalError::CalendarUnavailable(format!(
                "Provider '{}' not found. Install it with:\n  cargo install {}",
                self.name, binary_name
            ))
        })
    }

    async fn call_with_timeout<R: DeserializeOwned>(
        &self,
        command: Command,
        params: serde_json::Value,
    ) -> CellCalResult<R> {
        timeout(PROVIDER_TIMEOUT, self.call(command, params))
            .await
            .map_err(|_| {
                CellCalError::CalendarUnavailable(format!(
                    "Provider '{}' timed out after {}s",
                    self.name,
                    PROVIDER_TIMEOUT.as_secs()
                ))
            })?
    }

    async fn call<R: DeserializeOwned>(
        &self,
        command: Command,
        params: serde_json::Value,
    ) -> CellCalResult<R> {
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| CellCalError::CalendarUnavailable(e.to_string()))?;

        let binary_path = self.binary_path()?;

        let mut child = ProcessCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                CellCalError::CalendarUnavailable(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(format!("{request_json}\n").as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(provider_error(
                command,
                format!("Provider exited with status: {}", output.status.code().unwrap_or(-1)),
            ));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(provider_error(command, "Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str).map_err(|e| {
            provider_error(command, format!("Failed to parse response: {}", e))
        })?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(provider_error(command, error)),
        }
    }
}

/// Map a provider-reported failure to the error kind of the command it broke.
fn provider_error(command: Command, msg: String) -> CellCalError {
    match command {
        Command::CreateEvent => CellCalError::CalendarCreateFailed(msg),
        Command::DeleteEvent => CellCalError::CalendarDeleteFailed(msg),
        Command::AddReminder => CellCalError::CalendarCreateFailed(format!("reminder: {msg}")),
    }
}

impl CalendarService for ProviderCalendar {
    async fn create_event(&self, draft: &EventDraft) -> CellCalResult<String> {
        let params = CreateEventParams { draft: draft.clone() };
        let params = serde_json::to_value(params)
            .map_err(|e| CellCalError::CalendarCreateFailed(e.to_string()))?;
        let result: CreateEventResult =
            self.call_with_timeout(Command::CreateEvent, params).await?;
        Ok(result.event_id)
    }

    async fn delete_event(&self, event_id: &str) -> CellCalResult<()> {
        let params = DeleteEventParams { event_id: event_id.to_string() };
        let params = serde_json::to_value(params)
            .map_err(|e| CellCalError::CalendarDeleteFailed(e.to_string()))?;
        self.call_with_timeout(Command::DeleteEvent, params).await
    }

    async fn add_popup_reminder(&self, event_id: &str, minutes_before: i64) -> CellCalResult<()> {
        let params = AddReminderParams { event_id: event_id.to_string(), minutes_before };
        let params = serde_json::to_value(params)
            .map_err(|e| CellCalError::CalendarCreateFailed(e.to_string()))?;
        self.call_with_timeout(Command::AddReminder, params).await
    }
}
