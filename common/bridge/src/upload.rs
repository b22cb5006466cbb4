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

//! Chunked, rewindable upload body supplier.
//!
//! The host networking stack pulls request body bytes on demand from one of
//! its own threads and may rewind the cursor to retry after a redirect or
//! an authentication challenge. Every internal failure is converted into
//! the sink's error channel; nothing unwinds into the host stack.

use std::sync::{Arc, Mutex};

use crate::engine::TransferEngine;
use crate::error::SinkError;
use crate::handle::{HandleCallback, TransferHandle};

/// Acknowledgment channel of the host stack's upload machinery.
///
/// The acknowledgment calls themselves may be rejected by the host stack;
/// such a rejection is routed back through the matching error method.
pub trait UploadDataSink: Send + Sync {
    /// Acknowledges a completed read. `finished` stays false for bodies
    /// whose length is known up front; the host stack tracks completion
    /// against [`UploadProvider::length`] on its own.
    fn on_read_succeeded(&self, finished: bool) -> Result<(), SinkError>;

    /// Reports a failed read.
    fn on_read_error(&self, error: SinkError);

    /// Acknowledges a completed rewind.
    fn on_rewind_succeeded(&self) -> Result<(), SinkError>;

    /// Reports a failed rewind.
    fn on_rewind_error(&self, error: SinkError);
}

/// Supplies an immutable request body in bounded chunks.
///
/// Each read advances the cursor by `min(remaining, capacity)` bytes and,
/// when a progress handle was attached at construction, reports the new
/// position to the engine. Progress positions are monotonically
/// non-decreasing; a rewind resets the cursor without emitting progress.
pub struct UploadProvider {
    body: Box<[u8]>,
    position: Mutex<usize>,
    progress: Option<TransferHandle>,
    engine: Arc<dyn TransferEngine>,
}

impl UploadProvider {
    /// Creates a provider over the given body.
    ///
    /// `progress` is the handle upload progress is reported through, or
    /// `None` when nobody is listening.
    pub fn new(
        body: Vec<u8>,
        engine: Arc<dyn TransferEngine>,
        progress: Option<TransferHandle>,
    ) -> Self {
        Self {
            body: body.into_boxed_slice(),
            position: Mutex::new(0),
            progress,
            engine,
        }
    }

    /// Total body length in bytes. Constant for the provider's lifetime.
    pub fn length(&self) -> u64 {
        self.body.len() as u64
    }

    /// Current cursor position in bytes.
    pub fn position(&self) -> u64 {
        *self.position.lock().unwrap() as u64
    }

    /// Copies the next chunk into `dest` and acknowledges through the sink.
    ///
    /// Returns the number of bytes written, which is zero once the body is
    /// exhausted or when the read failed and was reported through
    /// [`UploadDataSink::on_read_error`] instead.
    pub fn read(&self, sink: &dyn UploadDataSink, dest: &mut [u8]) -> usize {
        let written = match self.fill(dest) {
            Ok(written) => written,
            Err(error) => {
                sink.on_read_error(error);
                return 0;
            }
        };
        if let Err(error) = sink.on_read_succeeded(false) {
            sink.on_read_error(error);
        }
        written
    }

    /// Resets the cursor to the start of the body and acknowledges through
    /// the sink.
    ///
    /// Idempotent, and never emits a progress report.
    pub fn rewind(&self, sink: &dyn UploadDataSink) {
        match self.position.lock() {
            Ok(mut position) => {
                *position = 0;
                if let Err(error) = sink.on_rewind_succeeded() {
                    sink.on_rewind_error(error);
                }
            }
            Err(_) => {
                sink.on_rewind_error(SinkError::new("upload cursor poisoned"));
            }
        }
    }

    fn fill(&self, dest: &mut [u8]) -> Result<usize, SinkError> {
        let mut position = self
            .position
            .lock()
            .map_err(|_| SinkError::new("upload cursor poisoned"))?;
        let remaining = self.body.len() - *position;
        let count = remaining.min(dest.len());
        if count > 0 {
            dest[..count].copy_from_slice(&self.body[*position..*position + count]);
            *position += count;
            if let Some(handle) = self.progress {
                self.engine
                    .on_progress(handle, *position as u64, self.body.len() as u64);
            }
        }
        Ok(count)
    }
}

impl HandleCallback for UploadProvider {}
