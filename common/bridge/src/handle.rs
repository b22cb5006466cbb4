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

//! Handle allocation and routing.
//!
//! A handle is the only identity that crosses the engine boundary. The
//! registry hands them out from a slot table with per-slot generation
//! counters, so a handle that outlives its registration misses on lookup
//! instead of aliasing whatever moved into the slot afterwards.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use transfer_utils::{debug, error, info};

/// Opaque identity for one logical transfer operation.
///
/// The raw value packs a 32-bit slot index in the low half and the slot's
/// generation in the high half. Only the registry interprets the layout;
/// everything else, the engine included, treats the value as opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TransferHandle(u64);

impl TransferHandle {
    /// Reconstructs a handle from a raw value carried through a record.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value for carrying through a record.
    pub fn raw(&self) -> u64 {
        self.0
    }

    fn from_parts(generation: u32, index: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    fn generation(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn index(&self) -> u32 {
        self.0 as u32
    }
}

impl Display for TransferHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-side callback object reachable through a registered handle.
///
/// Every method has a default no-op implementation. Components that only
/// need handle identity (the request callback bridge, the upload provider)
/// register without overriding anything; progress observers override
/// [`HandleCallback::on_progress`].
#[allow(unused_variables)]
pub trait HandleCallback: Send + Sync {
    /// Called when the engine reports transfer progress for this handle.
    fn on_progress(&self, transferred: u64, total: u64) {}
}

struct Slot {
    generation: u32,
    occupied: bool,
    callback: Option<Arc<dyn HandleCallback>>,
}

struct Slots {
    table: Vec<Slot>,
    free: Vec<u32>,
}

/// Thread-safe mapping from handles to host-side callback objects.
///
/// Retirement is idempotent and bumps the slot generation, making further
/// use of the retired handle detectable. A handle value is never reissued
/// while its registration is live.
pub struct HandleRegistry {
    inner: Mutex<Slots>,
}

impl HandleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Slots {
                table: Vec::new(),
                free: Vec::new(),
            }),
        }
    }

    /// Allocates a fresh handle without a callback bound to it yet.
    ///
    /// The caller is expected to either [`bind`](Self::bind) a callback or
    /// [`retire`](Self::retire) the handle; a reserved handle already counts
    /// as live and its value is not reissued.
    pub fn reserve(&self) -> TransferHandle {
        let mut slots = self.inner.lock().unwrap();
        let index = Self::take_slot(&mut slots);
        let generation = slots.table[index as usize].generation;
        TransferHandle::from_parts(generation, index)
    }

    /// Allocates a fresh handle and associates the callback with it.
    pub fn register(&self, callback: Arc<dyn HandleCallback>) -> TransferHandle {
        let mut slots = self.inner.lock().unwrap();
        let index = Self::take_slot(&mut slots);
        let slot = &mut slots.table[index as usize];
        slot.callback = Some(callback);
        TransferHandle::from_parts(slot.generation, index)
    }

    /// Associates a callback with a previously reserved handle.
    ///
    /// Fails with [`crate::BridgeError::StaleHandle`] when the handle was
    /// never issued, has been retired, or belongs to an earlier generation
    /// of its slot.
    pub fn bind(
        &self,
        handle: TransferHandle,
        callback: Arc<dyn HandleCallback>,
    ) -> Result<(), crate::BridgeError> {
        let mut slots = self.inner.lock().unwrap();
        match Self::live_slot(&mut slots, handle) {
            Some(slot) => {
                slot.callback = Some(callback);
                Ok(())
            }
            None => {
                error!("bind rejected, stale or unknown handle {}", handle);
                Err(crate::BridgeError::StaleHandle(handle))
            }
        }
    }

    /// Returns the callback registered for the handle, if it is still live.
    pub fn lookup(&self, handle: TransferHandle) -> Option<Arc<dyn HandleCallback>> {
        let mut slots = self.inner.lock().unwrap();
        Self::live_slot(&mut slots, handle).and_then(|slot| slot.callback.clone())
    }

    /// Removes the handle's registration.
    ///
    /// Retiring an unknown or already retired handle is a no-op. The slot
    /// generation is bumped so the retired value can never resolve again.
    pub fn retire(&self, handle: TransferHandle) {
        let mut slots = self.inner.lock().unwrap();
        match Self::live_slot(&mut slots, handle) {
            Some(slot) => {
                slot.callback = None;
                slot.occupied = false;
                slot.generation = slot.generation.wrapping_add(1);
                slots.free.push(handle.index());
            }
            None => {
                debug!("retire ignored, stale or unknown handle {}", handle);
            }
        }
    }

    /// Number of currently live handles.
    pub fn live(&self) -> usize {
        let slots = self.inner.lock().unwrap();
        slots.table.iter().filter(|slot| slot.occupied).count()
    }

    /// Routes a progress report from an engine-owned thread to the callback
    /// registered for the handle.
    ///
    /// Reports for stale or unknown handles are logged and absorbed; the
    /// calling thread never observes an error. Returns whether a callback
    /// received the report.
    pub fn notify_progress(&self, handle: TransferHandle, transferred: u64, total: u64) -> bool {
        match self.lookup(handle) {
            Some(callback) => {
                callback.on_progress(transferred, total);
                true
            }
            None => {
                info!("progress dropped, stale or unknown handle {}", handle);
                false
            }
        }
    }

    fn take_slot(slots: &mut Slots) -> u32 {
        match slots.free.pop() {
            Some(index) => {
                slots.table[index as usize].occupied = true;
                index
            }
            None => {
                slots.table.push(Slot {
                    generation: 0,
                    occupied: true,
                    callback: None,
                });
                (slots.table.len() - 1) as u32
            }
        }
    }

    fn live_slot(slots: &mut Slots, handle: TransferHandle) -> Option<&mut Slot> {
        let index = handle.index() as usize;
        if index >= slots.table.len() {
            return None;
        }
        let slot = &mut slots.table[index];
        if slot.occupied && slot.generation == handle.generation() {
            Some(slot)
        } else {
            None
        }
    }
}

transfer_utils::cfg_test! {
    impl HandleRegistry {
        /// Test-only view of the generation counter backing a handle's slot.
        pub(crate) fn slot_generation(&self, handle: TransferHandle) -> u32 {
            let slots = self.inner.lock().unwrap();
            slots.table[handle.index() as usize].generation
        }
    }
}
