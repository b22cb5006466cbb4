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

//! Single-threaded phase forwarding toward the engine.
//!
//! Bridges validate notifications on the host stack's threads, then enqueue
//! them as tagged messages onto a bounded channel. One dispatcher thread
//! consumes the channel and forwards to the engine's handle-keyed sinks, so
//! the engine observes every handle's phases in delivery order and handle
//! retirement happens exactly once, after the terminal phase went out.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use transfer_utils::error;

use crate::engine::TransferEngine;
use crate::error::{BridgeError, ErrorInfo};
use crate::handle::{HandleRegistry, TransferHandle};
use crate::response::ResponseInfo;

/// Default bound of the dispatch queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// One validated phase notification on its way to the engine.
pub(crate) enum PhaseEvent {
    RedirectReceived {
        handle: TransferHandle,
        location: String,
    },
    ResponseStarted {
        handle: TransferHandle,
        info: ResponseInfo,
    },
    ReadCompleted {
        handle: TransferHandle,
        data: Vec<u8>,
    },
    Succeeded {
        handle: TransferHandle,
        info: ResponseInfo,
    },
    Failed {
        handle: TransferHandle,
        error: ErrorInfo,
    },
}

impl PhaseEvent {
    fn handle(&self) -> TransferHandle {
        match self {
            PhaseEvent::RedirectReceived { handle, .. }
            | PhaseEvent::ResponseStarted { handle, .. }
            | PhaseEvent::ReadCompleted { handle, .. }
            | PhaseEvent::Succeeded { handle, .. }
            | PhaseEvent::Failed { handle, .. } => *handle,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            PhaseEvent::Succeeded { .. } | PhaseEvent::Failed { .. }
        )
    }
}

enum DispatchMessage {
    Event(PhaseEvent),
    Shutdown,
}

/// Cloneable producer side of the dispatch queue, held by every bridge.
#[derive(Clone)]
pub struct PhaseSender {
    tx: SyncSender<DispatchMessage>,
}

impl PhaseSender {
    /// Enqueues a validated event without blocking the calling thread.
    ///
    /// A full queue or a gone dispatcher drops the event; both are logged
    /// here and surfaced to in-process callers as an error.
    pub(crate) fn send(&self, event: PhaseEvent) -> Result<(), BridgeError> {
        let handle = event.handle();
        match self.tx.try_send(DispatchMessage::Event(event)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                error!("dispatch queue full, dropped event for handle {}", handle);
                Err(BridgeError::QueueFull(handle))
            }
            Err(TrySendError::Disconnected(_)) => {
                error!("dispatcher gone, dropped event for handle {}", handle);
                Err(BridgeError::Disconnected(handle))
            }
        }
    }
}

/// Owns the dispatch queue and the forwarding thread.
pub struct PhaseDispatcher {
    tx: SyncSender<DispatchMessage>,
    forwarder: JoinHandle<()>,
}

impl PhaseDispatcher {
    /// Creates a dispatcher with the default queue bound.
    pub fn new(engine: Arc<dyn TransferEngine>, registry: Arc<HandleRegistry>) -> Self {
        Self::with_capacity(engine, registry, DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a dispatcher with an explicit queue bound.
    pub fn with_capacity(
        engine: Arc<dyn TransferEngine>,
        registry: Arc<HandleRegistry>,
        capacity: usize,
    ) -> Self {
        let (tx, rx) = sync_channel(capacity);
        let forwarder = thread::spawn(move || Self::forward_loop(rx, engine, registry));
        Self { tx, forwarder }
    }

    /// Returns a producer handle for constructing bridges.
    pub fn sender(&self) -> PhaseSender {
        PhaseSender {
            tx: self.tx.clone(),
        }
    }

    /// Drains the queue and stops the forwarding thread.
    ///
    /// Events enqueued before the call are still forwarded; senders held by
    /// outstanding bridges turn into no-ops afterwards.
    pub fn shutdown(self) {
        let PhaseDispatcher { tx, forwarder } = self;
        // A blocking send is fine here, this is the owning thread.
        let _ = tx.send(DispatchMessage::Shutdown);
        drop(tx);
        if forwarder.join().is_err() {
            error!("phase dispatcher thread exited by panic");
        }
    }

    fn forward_loop(
        rx: Receiver<DispatchMessage>,
        engine: Arc<dyn TransferEngine>,
        registry: Arc<HandleRegistry>,
    ) {
        while let Ok(message) = rx.recv() {
            let event = match message {
                DispatchMessage::Event(event) => event,
                DispatchMessage::Shutdown => break,
            };
            let handle = event.handle();
            let terminal = event.is_terminal();
            match event {
                PhaseEvent::RedirectReceived { handle, location } => {
                    engine.redirect_received(handle, &location);
                }
                PhaseEvent::ResponseStarted { handle, info } => {
                    engine.response_started(handle, &info);
                }
                PhaseEvent::ReadCompleted { handle, data } => {
                    engine.read_completed(handle, &data);
                }
                PhaseEvent::Succeeded { handle, info } => {
                    engine.succeeded(handle, &info);
                }
                PhaseEvent::Failed { handle, error } => {
                    engine.failed(handle, &error);
                }
            }
            if terminal {
                registry.retire(handle);
            }
        }
    }
}
