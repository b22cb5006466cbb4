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

//! Boundary error types.
//!
//! Errors raised on threads this layer does not own are logged and absorbed
//! at the boundary; the types here exist so call sites inside the process
//! can still observe what happened.

use core::fmt;

use crate::callback::CallbackPhase;
use crate::handle::TransferHandle;

/// Failure raised by the bridge layer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A callback phase arrived out of order or after a terminal phase.
    /// The offending notification is dropped, never forwarded.
    Protocol {
        /// Handle the violating notification arrived for.
        handle: TransferHandle,
        /// Phase the handle was in when the notification arrived.
        phase: CallbackPhase,
        /// Name of the rejected notification.
        event: &'static str,
    },
    /// The handle was never issued, was retired, or belongs to an earlier
    /// generation of its slot.
    StaleHandle(TransferHandle),
    /// The dispatcher queue was full; the notification was dropped rather
    /// than blocking the engine-owned calling thread.
    QueueFull(TransferHandle),
    /// The dispatcher has shut down.
    Disconnected(TransferHandle),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Protocol {
                handle,
                phase,
                event,
            } => write!(
                f,
                "{} rejected for handle {} in phase {:?}",
                event, handle, phase
            ),
            BridgeError::StaleHandle(handle) => {
                write!(f, "stale or unknown handle {}", handle)
            }
            BridgeError::QueueFull(handle) => {
                write!(f, "dispatch queue full, dropped event for handle {}", handle)
            }
            BridgeError::Disconnected(handle) => {
                write!(f, "dispatcher gone, dropped event for handle {}", handle)
            }
        }
    }
}

impl std::error::Error for BridgeError {}

/// Error information as handed over by the host networking stack when a
/// request fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    code: i32,
    message: String,
}

impl ErrorInfo {
    /// Creates error information with the given code and message.
    pub fn new(code: i32, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }

    /// Host stack error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Failure reported through an upload sink's error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    message: String,
}

impl SinkError {
    /// Creates a sink error carrying the given description.
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

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SinkError {}
