// Copyright (C) 2025 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The host scheduler's record contract.
//!
//! The scheduler hands a task its parameters as a flat key-value record and
//! takes a record back on failure. `RecordData` is the in-repo stand-in for
//! that record type; `TaskInput` and `TaskOutcome` are its typed views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use transfer_bridge::TransferHandle;
use transfer_utils::error;

use crate::error::TaskError;

/// Input record key for the source URL.
pub const KEY_URL: &str = "url";
/// Input record key for the destination path.
pub const KEY_FILE_PATH: &str = "file_path";
/// Input record key for the serialized header object.
pub const KEY_HEADERS: &str = "headers";
/// Input record key for the progress handle.
pub const KEY_PROGRESS_HANDLE: &str = "progress_handle_id";
/// Output record key for an engine result code.
pub const KEY_ERROR_CODE: &str = "error_code";
/// Output record key for a converted failure message.
pub const KEY_ERROR: &str = "error";

/// Sentinel for an absent progress handle.
pub const NO_PROGRESS_HANDLE: i64 = -1;

/// Flat key-value record exchanged with the host scheduler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordData {
    entries: BTreeMap<String, Value>,
}

impl RecordData {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a string value.
    pub fn put_string(mut self, key: &str, value: &str) -> Self {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Adds a 64-bit integer value.
    pub fn put_long(mut self, key: &str, value: i64) -> Self {
        self.entries.insert(key.to_string(), Value::from(value));
        self
    }

    /// Adds a 32-bit integer value.
    pub fn put_int(mut self, key: &str, value: i32) -> Self {
        self.entries.insert(key.to_string(), Value::from(value));
        self
    }

    /// Returns the string stored under the key, if any.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Returns the integer stored under the key, or the default.
    pub fn long(&self, key: &str, default: i64) -> i64 {
        self.entries
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Returns the 32-bit integer stored under the key, or the default.
    pub fn int(&self, key: &str, default: i32) -> i32 {
        self.entries
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|value| i32::try_from(value).ok())
            .unwrap_or(default)
    }

    /// Whether the record carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Validated transfer parameters read from an input record.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskInput {
    /// Source URL.
    pub url: String,
    /// Destination path on local storage.
    pub file_path: String,
    /// Serialized JSON header object, `"{}"` when absent.
    pub headers: String,
    /// Handle for progress delivery, when anybody is listening.
    pub progress_handle: Option<TransferHandle>,
}

impl TaskInput {
    /// Reads and validates the transfer parameters.
    ///
    /// A missing `url` or `file_path` fails with
    /// [`TaskError::InvalidInput`] before anything else happens. The header
    /// string travels to the engine verbatim; a malformed one is logged
    /// here because the engine can only reject it much later.
    pub fn from_record(record: &RecordData) -> Result<Self, TaskError> {
        let url = record
            .string(KEY_URL)
            .ok_or(TaskError::InvalidInput(KEY_URL))?
            .to_string();
        let file_path = record
            .string(KEY_FILE_PATH)
            .ok_or(TaskError::InvalidInput(KEY_FILE_PATH))?
            .to_string();
        let headers = record.string(KEY_HEADERS).unwrap_or("{}").to_string();
        if serde_json::from_str::<serde_json::Map<String, Value>>(&headers).is_err() {
            error!("headers value is not a JSON object, passing through verbatim");
        }
        let raw = record.long(KEY_PROGRESS_HANDLE, NO_PROGRESS_HANDLE);
        let progress_handle = (raw >= 0).then(|| TransferHandle::from_raw(raw as u64));
        Ok(Self {
            url,
            file_path,
            headers,
            progress_handle,
        })
    }
}

/// Failure payload of a task outcome.
///
/// Carries the engine result code when the failure came from a non-zero
/// code, or a message when it came from a converted internal failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureInfo {
    error_code: Option<i32>,
    error_message: Option<String>,
}

impl FailureInfo {
    /// Failure caused by a non-zero engine result code.
    pub fn code(code: i32) -> Self {
        Self {
            error_code: Some(code),
            error_message: None,
        }
    }

    /// Failure caused by a converted internal failure.
    pub fn message(message: &str) -> Self {
        Self {
            error_code: None,
            error_message: Some(message.to_string()),
        }
    }

    /// The engine result code, if that is what failed the task.
    pub fn error_code(&self) -> Option<i32> {
        self.error_code
    }

    /// The converted failure message, if that is what failed the task.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Terminal outcome of one task execution.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskOutcome {
    /// The transfer completed; the output record is empty.
    Success,
    /// The transfer failed; the output record carries the payload.
    Failure(FailureInfo),
}

impl TaskOutcome {
    /// Whether the task succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }

    /// Builds the output record handed back to the scheduler.
    pub fn output(&self) -> RecordData {
        match self {
            TaskOutcome::Success => RecordData::new(),
            TaskOutcome::Failure(info) => match (info.error_code, &info.error_message) {
                (Some(code), _) => RecordData::new().put_int(KEY_ERROR_CODE, code),
                (None, Some(message)) => RecordData::new().put_string(KEY_ERROR, message),
                (None, None) => RecordData::new(),
            },
        }
    }
}
