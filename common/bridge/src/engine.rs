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

//! The consumed transfer engine contract.
//!
//! The engine is an externally supplied black box. It receives numeric
//! handles, never host-side objects, and everything it exposes to this
//! layer is collected in one trait so tests can substitute a recording or
//! mocked implementation.

use crate::error::ErrorInfo;
use crate::handle::TransferHandle;
use crate::response::ResponseInfo;

/// Result code returned by [`TransferEngine::submit`] on success. Any other
/// value is engine-defined and opaque to this layer.
pub const RESULT_OK: i32 = 0;

/// Interface of the externally supplied transfer engine.
///
/// `submit` blocks the calling thread for the full duration of the
/// transfer. The remaining methods are the engine's handle-keyed sinks: the
/// bridge and the upload provider forward phase notifications and upload
/// progress through them, always from threads the engine or the host stack
/// owns, so implementations must be safe for concurrent use across
/// different handles.
pub trait TransferEngine: Send + Sync {
    /// Runs one download to completion and returns the engine result code.
    ///
    /// `headers_json` is a serialized JSON object; parsing it is the
    /// engine's business. `progress` carries the handle progress reports
    /// are delivered through, or `None` when nobody is listening.
    fn submit(
        &self,
        url: &str,
        destination: &str,
        headers_json: &str,
        progress: Option<TransferHandle>,
    ) -> i32;

    /// Best-effort cancellation hint for a running operation.
    fn cancel(&self, handle: TransferHandle);

    /// A redirect arrived for the request identified by the handle.
    fn redirect_received(&self, handle: TransferHandle, new_location: &str);

    /// Response headers arrived for the request identified by the handle.
    fn response_started(&self, handle: TransferHandle, info: &ResponseInfo);

    /// One chunk of body data arrived for the request.
    fn read_completed(&self, handle: TransferHandle, data: &[u8]);

    /// The request finished successfully. Terminal.
    fn succeeded(&self, handle: TransferHandle, info: &ResponseInfo);

    /// The request failed. Terminal.
    fn failed(&self, handle: TransferHandle, error: &ErrorInfo);

    /// Upload progress report: `transferred` of `total` body bytes have
    /// been handed to the host stack.
    fn on_progress(&self, handle: TransferHandle, transferred: u64, total: u64);
}
