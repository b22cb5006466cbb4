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

//! Background transfer worker.
//!
//! Executes one transfer to completion as a unit of work visible to the
//! host task scheduler: read the input record, promote to elevated
//! execution priority for the duration, invoke the transfer engine's
//! blocking entry point, and translate the result code into a structured
//! outcome. Task instances are produced through a constructor registry
//! populated at process start.

#![allow(clippy::new_without_default)]

/// Scheduler record contract and task input/outcome types.
pub mod data;

/// Task error taxonomy.
pub mod error;

/// Task constructor registry.
pub mod loader;

/// Foreground promotion surface.
pub mod notify;

/// The transfer task itself.
pub mod worker;

pub use data::{FailureInfo, RecordData, TaskInput, TaskOutcome};
pub use error::{LoadError, TaskError};
pub use loader::{ScheduledTask, TaskRegistry};
pub use notify::{ForegroundInfo, ForegroundNotifier, LogNotifier, NotifyError};
pub use worker::{perform_download, CancelHandle, ProgressForwarder, TransferWorker};
