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

//! The per-handle request callback bridge.
//!
//! The host networking stack delivers five kinds of phase notification for
//! a request. Each bridge instance is bound to a single handle, checks the
//! phase state machine with an atomic check-and-transition, and hands valid
//! notifications to the dispatcher for in-order forwarding to the engine.
//! Invalid notifications are dropped and logged; nothing ever propagates
//! back into the host stack's calling thread as a panic.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use transfer_utils::error;

use crate::dispatch::{PhaseEvent, PhaseSender};
use crate::error::{BridgeError, ErrorInfo};
use crate::handle::{HandleCallback, HandleRegistry, TransferHandle};
use crate::response::ResponseInfo;

/// Lifecycle phase of one request callback stream.
///
/// `Succeeded` and `Failed` are terminal and mutually exclusive: over a
/// handle's whole lifetime at most one of them is delivered, and nothing is
/// delivered after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CallbackPhase {
    /// Initial phase, no notification delivered yet.
    Created = 0,
    /// One or more redirects received, response not started.
    RedirectReceived = 1,
    /// Response metadata received.
    ResponseStarted = 2,
    /// At least one body chunk received.
    Reading = 3,
    /// Terminal, the request completed.
    Succeeded = 4,
    /// Terminal, the request failed.
    Failed = 5,
}

impl CallbackPhase {
    /// Whether the phase ends the callback stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CallbackPhase::Succeeded | CallbackPhase::Failed)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => CallbackPhase::Created,
            1 => CallbackPhase::RedirectReceived,
            2 => CallbackPhase::ResponseStarted,
            3 => CallbackPhase::Reading,
            4 => CallbackPhase::Succeeded,
            _ => CallbackPhase::Failed,
        }
    }

    fn accepts(self, next: CallbackPhase) -> bool {
        match next {
            CallbackPhase::RedirectReceived | CallbackPhase::ResponseStarted => matches!(
                self,
                CallbackPhase::Created | CallbackPhase::RedirectReceived
            ),
            CallbackPhase::Reading => matches!(
                self,
                CallbackPhase::ResponseStarted | CallbackPhase::Reading
            ),
            CallbackPhase::Succeeded | CallbackPhase::Failed => !self.is_terminal(),
            CallbackPhase::Created => false,
        }
    }
}

/// Forwards one request's phase notifications to the engine.
///
/// Constructed bound to a freshly registered handle. The host stack invokes
/// the `on_*` methods from threads it owns; calls for the same handle are
/// serialized by the host contract in practice, but the state machine is
/// enforced atomically so even a racing duplicate terminal loses cleanly.
pub struct RequestCallbackBridge {
    handle: TransferHandle,
    phase: AtomicU8,
    events: PhaseSender,
}

impl RequestCallbackBridge {
    /// Registers a new bridge in the registry and binds it to the returned
    /// handle.
    pub fn register(registry: &HandleRegistry, events: PhaseSender) -> Arc<Self> {
        let handle = registry.reserve();
        let bridge = Arc::new(Self {
            handle,
            phase: AtomicU8::new(CallbackPhase::Created as u8),
            events,
        });
        // A freshly reserved handle always accepts its first bind.
        let _ = registry.bind(handle, bridge.clone());
        bridge
    }

    /// The handle this bridge is bound to.
    pub fn handle(&self) -> TransferHandle {
        self.handle
    }

    /// The current phase of the callback stream.
    pub fn phase(&self) -> CallbackPhase {
        CallbackPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// The request was redirected. Valid before the response starts; may
    /// repeat.
    pub fn on_redirect_received(&self, new_location: &str) -> Result<(), BridgeError> {
        self.advance(CallbackPhase::RedirectReceived, "on_redirect_received")?;
        self.events.send(PhaseEvent::RedirectReceived {
            handle: self.handle,
            location: new_location.to_string(),
        })
    }

    /// Response metadata arrived. Valid once, before any body data.
    pub fn on_response_started(&self, info: ResponseInfo) -> Result<(), BridgeError> {
        self.advance(CallbackPhase::ResponseStarted, "on_response_started")?;
        self.events.send(PhaseEvent::ResponseStarted {
            handle: self.handle,
            info,
        })
    }

    /// One chunk of body data arrived. Valid after the response started;
    /// may repeat.
    pub fn on_read_completed(&self, chunk: &[u8]) -> Result<(), BridgeError> {
        self.advance(CallbackPhase::Reading, "on_read_completed")?;
        self.events.send(PhaseEvent::ReadCompleted {
            handle: self.handle,
            data: chunk.to_vec(),
        })
    }

    /// The request completed. Terminal; valid in any non-terminal phase.
    pub fn on_succeeded(&self, info: ResponseInfo) -> Result<(), BridgeError> {
        self.advance(CallbackPhase::Succeeded, "on_succeeded")?;
        self.events.send(PhaseEvent::Succeeded {
            handle: self.handle,
            info,
        })
    }

    /// The request failed. Terminal; valid in any non-terminal phase.
    pub fn on_failed(&self, error: ErrorInfo) -> Result<(), BridgeError> {
        self.advance(CallbackPhase::Failed, "on_failed")?;
        self.events.send(PhaseEvent::Failed {
            handle: self.handle,
            error,
        })
    }

    /// Atomic check-and-transition over the phase state machine.
    ///
    /// When two notifications race, the compare-exchange decides a single
    /// winner; the loser re-reads the phase and is rejected against it.
    fn advance(&self, next: CallbackPhase, event: &'static str) -> Result<(), BridgeError> {
        loop {
            let current = CallbackPhase::from_u8(self.phase.load(Ordering::SeqCst));
            if !current.accepts(next) {
                error!(
                    "{} dropped for handle {}, current phase {:?}",
                    event, self.handle, current
                );
                return Err(BridgeError::Protocol {
                    handle: self.handle,
                    phase: current,
                    event,
                });
            }
            if self
                .phase
                .compare_exchange(
                    current as u8,
                    next as u8,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
            {
                return Ok(());
            }
        }
    }
}

impl HandleCallback for RequestCallbackBridge {}
