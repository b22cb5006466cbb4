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

//! The background transfer task.
//!
//! One worker executes one transfer synchronously on the scheduler's
//! thread: validate the input record, ask for foreground promotion, bind
//! the progress forwarder when a progress handle travels in the input, and
//! block on the engine's entry point until it returns a result code. No
//! failure of any kind escapes the task body.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use transfer_bridge::{
    HandleCallback, HandleRegistry, TransferEngine, TransferHandle, RESULT_OK,
};
use transfer_utils::{debug, error, info};

use crate::data::{FailureInfo, RecordData, TaskInput, TaskOutcome};
use crate::error::TaskError;
use crate::loader::ScheduledTask;
use crate::notify::{ForegroundInfo, ForegroundNotifier};

/// Receives download progress delivered through the worker's handle.
///
/// Registered for the handle carried in the input record; whoever holds
/// that handle observes progress through it while the scheduler itself
/// sees nothing until the terminal outcome.
pub struct ProgressForwarder {
    transferred: AtomicU64,
    total: AtomicU64,
}

impl ProgressForwarder {
    /// Creates a forwarder with no progress observed yet.
    pub fn new() -> Self {
        Self {
            transferred: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }

    /// Last observed progress as `(transferred, total)`.
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.transferred.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }
}

impl HandleCallback for ProgressForwarder {
    fn on_progress(&self, transferred: u64, total: u64) {
        self.transferred.store(transferred, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        debug!("transfer progress {} of {}", transferred, total);
    }
}

/// Executes one transfer as a scheduler-visible unit of work.
///
/// The engine call is blocking: the scheduler thread is occupied for the
/// full transfer duration, and cancellation is not preemptible once the
/// call has started (see [`CancelHandle`]).
pub struct TransferWorker {
    input: RecordData,
    engine: Arc<dyn TransferEngine>,
    registry: Arc<HandleRegistry>,
    notifier: Arc<dyn ForegroundNotifier>,
    canceled: Arc<AtomicBool>,
    active: Arc<Mutex<Option<TransferHandle>>>,
}

impl TransferWorker {
    /// Creates a worker over the given input record and collaborators.
    pub fn new(
        input: RecordData,
        engine: Arc<dyn TransferEngine>,
        registry: Arc<HandleRegistry>,
        notifier: Arc<dyn ForegroundNotifier>,
    ) -> Self {
        Self {
            input,
            engine,
            registry,
            notifier,
            canceled: Arc::new(AtomicBool::new(false)),
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns a handle for requesting cooperative cancellation.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            canceled: self.canceled.clone(),
            engine: self.engine.clone(),
            active: self.active.clone(),
        }
    }

    fn execute(&self) -> Result<(), TaskError> {
        let input = TaskInput::from_record(&self.input)?;
        if self.canceled.load(Ordering::SeqCst) {
            return Err(TaskError::Canceled);
        }

        // Presentation only; a refused promotion never aborts the transfer.
        if let Err(cause) = self.notifier.promote(&ForegroundInfo::download_default()) {
            info!("foreground promotion failed: {}", cause);
        }

        let progress = input.progress_handle.and_then(|handle| {
            match self
                .registry
                .bind(handle, Arc::new(ProgressForwarder::new()))
            {
                Ok(()) => Some(handle),
                Err(cause) => {
                    error!("progress handle unusable: {}", cause);
                    None
                }
            }
        });
        *self.active.lock().unwrap() = progress;

        info!("starting transfer of {} to {}", input.url, input.file_path);
        let code = self
            .engine
            .submit(&input.url, &input.file_path, &input.headers, progress);

        *self.active.lock().unwrap() = None;
        if let Some(handle) = progress {
            self.registry.retire(handle);
        }
        if code == RESULT_OK {
            Ok(())
        } else {
            Err(TaskError::Engine(code))
        }
    }
}

impl ScheduledTask for TransferWorker {
    fn run(&mut self) -> TaskOutcome {
        match catch_unwind(AssertUnwindSafe(|| self.execute())) {
            Ok(Ok(())) => {
                info!("transfer task completed");
                TaskOutcome::Success
            }
            Ok(Err(cause)) => {
                error!("transfer task failed: {}", cause);
                TaskOutcome::Failure(cause.into())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("transfer task panicked at the engine boundary: {}", message);
                TaskOutcome::Failure(FailureInfo::message(&message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "engine call panicked".to_string()
    }
}

/// Requests cooperative cancellation of one worker.
///
/// A cancellation observed before the engine call prevents the call and the
/// task fails with a cancellation reason. Once the blocking call has
/// started, the hint is forwarded to the engine through the progress handle
/// when one exists, but the task thread stays occupied until the engine
/// itself returns.
pub struct CancelHandle {
    canceled: Arc<AtomicBool>,
    engine: Arc<dyn TransferEngine>,
    active: Arc<Mutex<Option<TransferHandle>>>,
}

impl CancelHandle {
    /// Flags the worker as canceled and forwards a best-effort hint.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
        if let Some(handle) = *self.active.lock().unwrap() {
            self.engine.cancel(handle);
        }
    }
}

/// Runs the transfer pipeline directly, without a scheduler.
///
/// For callers that manage their own threads. Returns the engine result
/// code verbatim; [`RESULT_OK`] means success.
pub fn perform_download(
    engine: &Arc<dyn TransferEngine>,
    url: &str,
    file_path: &str,
    headers_json: &str,
    progress: Option<TransferHandle>,
) -> i32 {
    info!("direct download of {} to {}", url, file_path);
    engine.submit(url, file_path, headers_json, progress)
}
