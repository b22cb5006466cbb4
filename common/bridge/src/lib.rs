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

//! Boundary layer between the host networking stack and the transfer engine.
//!
//! The engine is reachable only through opaque numeric handles. This crate
//! owns the handle registry that ties a handle to exactly one host-side
//! callback object, the request callback bridge that forwards the host
//! stack's phase notifications to the engine, the dispatcher that serializes
//! those notifications onto a single thread, and the upload provider that
//! feeds request bodies to the host stack in bounded chunks.

#![allow(clippy::new_without_default)]

/// Request callback phases and the per-handle bridge.
pub mod callback;

/// Single-threaded phase forwarding toward the engine.
pub mod dispatch;

/// The consumed transfer engine contract.
pub mod engine;

/// Boundary error types.
pub mod error;

/// Handle allocation, lookup and retirement.
pub mod handle;

/// Host stack response metadata stub.
pub mod response;

/// Chunked, rewindable upload body supplier.
pub mod upload;

pub use callback::{CallbackPhase, RequestCallbackBridge};
pub use dispatch::{PhaseDispatcher, PhaseSender};
pub use engine::{TransferEngine, RESULT_OK};
pub use error::{BridgeError, ErrorInfo, SinkError};
pub use handle::{HandleCallback, HandleRegistry, TransferHandle};
pub use response::ResponseInfo;
pub use upload::{UploadDataSink, UploadProvider};
