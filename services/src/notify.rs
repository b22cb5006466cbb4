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

//! Foreground promotion surface.
//!
//! Promotion elevates a long-running task's execution priority and surfaces
//! it to the user. It is presentation only: a failed promotion is logged
//! and the transfer proceeds regardless.

use core::fmt;

use transfer_utils::info;

/// Presentation state for a promoted task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForegroundInfo {
    channel_id: String,
    title: String,
    text: String,
}

impl ForegroundInfo {
    /// Creates promotion state with the given channel and texts.
    pub fn new(channel_id: &str, title: &str, text: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    /// Default presentation for a background download.
    pub fn download_default() -> Self {
        Self::new("download_channel", "Background Download", "Downloading file...")
    }

    /// Notification channel identifier.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Notification title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Notification body text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Failure to promote a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyError {
    message: String,
}

impl NotifyError {
    /// Creates a promotion error carrying the given description.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NotifyError {}

/// The host's foreground promotion call.
pub trait ForegroundNotifier: Send + Sync {
    /// Requests elevated execution priority and visibility for the calling
    /// task. Best effort; callers log a failure and continue.
    fn promote(&self, info: &ForegroundInfo) -> Result<(), NotifyError>;
}

/// Promotion stub that only records the request in the log.
pub struct LogNotifier;

impl ForegroundNotifier for LogNotifier {
    fn promote(&self, state: &ForegroundInfo) -> Result<(), NotifyError> {
        info!(
            "foreground promotion requested, channel {}, title {}, text {}",
            state.channel_id(),
            state.title(),
            state.text()
        );
        Ok(())
    }
}
