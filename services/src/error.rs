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

//! Task error taxonomy.

use core::fmt;

use crate::data::FailureInfo;

/// Reason a transfer task failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskError {
    /// A required input field was absent; the engine was never called.
    InvalidInput(&'static str),
    /// The engine returned a non-zero result code, surfaced verbatim.
    Engine(i32),
    /// Cancellation was observed before the engine call.
    Canceled,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::InvalidInput(field) => {
                write!(f, "missing required input field: {}", field)
            }
            TaskError::Engine(code) => write!(f, "engine returned result code {}", code),
            TaskError::Canceled => write!(f, "task canceled before the engine call"),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<TaskError> for FailureInfo {
    fn from(value: TaskError) -> Self {
        match value {
            TaskError::Engine(code) => FailureInfo::code(code),
            other => FailureInfo::message(&other.to_string()),
        }
    }
}

/// Failure to produce a task instance from the constructor registry.
///
/// The caller must treat this as a fatal inability to run the task; the
/// registry never retries internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    message: String,
}

impl LoadError {
    /// Creates a load error carrying the given description.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoadError {}
