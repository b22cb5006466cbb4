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

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::*;
use crate::BridgeError;

struct Probe {
    transferred: AtomicU64,
    total: AtomicU64,
}

impl Probe {
    fn new() -> Self {
        Self {
            transferred: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }
}

impl HandleCallback for Probe {
    fn on_progress(&self, transferred: u64, total: u64) {
        self.transferred.store(transferred, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
    }
}

// @tc.name: ut_handle_register_lookup_retire
// @tc.desc: Test the basic registration lifecycle
// @tc.precon: NA
// @tc.step: 1. Register a callback and look it up
//           2. Retire the handle and look it up again
// @tc.expect: Lookup resolves before retirement and misses afterwards
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_register_lookup_retire() {
    let registry = HandleRegistry::new();
    let handle = registry.register(Arc::new(Probe::new()));
    assert!(registry.lookup(handle).is_some());
    assert_eq!(registry.live(), 1);
    registry.retire(handle);
    assert!(registry.lookup(handle).is_none());
    assert_eq!(registry.live(), 0);
}

// @tc.name: ut_handle_retire_idempotent
// @tc.desc: Test that retiring twice and retiring unknown handles is a no-op
// @tc.precon: NA
// @tc.step: 1. Register and retire a handle twice
//           2. Retire a handle that was never issued
// @tc.expect: No panic, registry stays empty
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_retire_idempotent() {
    let registry = HandleRegistry::new();
    let handle = registry.register(Arc::new(Probe::new()));
    registry.retire(handle);
    registry.retire(handle);
    registry.retire(TransferHandle::from_raw(0xDEAD_BEEF_0000_0001));
    assert_eq!(registry.live(), 0);
}

// @tc.name: ut_handle_stale_generation
// @tc.desc: Test that a retired handle cannot alias a later registration
// @tc.precon: NA
// @tc.step: 1. Register a callback and retire its handle
//           2. Register another callback, which reuses the slot
//           3. Look up the stale handle
// @tc.expect: The stale handle misses, the new handle resolves, the raw
//             values differ
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_stale_generation() {
    let registry = HandleRegistry::new();
    let first = registry.register(Arc::new(Probe::new()));
    registry.retire(first);
    let second = registry.register(Arc::new(Probe::new()));
    assert_ne!(first.raw(), second.raw());
    assert_eq!(registry.slot_generation(second), 1);
    assert!(registry.lookup(first).is_none());
    assert!(registry.lookup(second).is_some());
}

// @tc.name: ut_handle_unique_while_live
// @tc.desc: Test that live handles never share a raw value
// @tc.precon: NA
// @tc.step: 1. Register 100 callbacks
//           2. Collect the raw handle values
// @tc.expect: All raw values are distinct
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_unique_while_live() {
    let registry = HandleRegistry::new();
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let handle = registry.register(Arc::new(Probe::new()));
        assert!(seen.insert(handle.raw()));
    }
    assert_eq!(registry.live(), 100);
}

// @tc.name: ut_handle_reserve_bind
// @tc.desc: Test the reserve/bind split and stale bind rejection
// @tc.precon: NA
// @tc.step: 1. Reserve a handle, verify lookup misses while unbound
//           2. Bind a callback and verify lookup resolves
//           3. Retire and bind again
// @tc.expect: Bind succeeds on the reserved handle and fails with
//             StaleHandle after retirement
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_reserve_bind() {
    let registry = HandleRegistry::new();
    let handle = registry.reserve();
    assert!(registry.lookup(handle).is_none());
    assert_eq!(registry.live(), 1);
    assert!(registry.bind(handle, Arc::new(Probe::new())).is_ok());
    assert!(registry.lookup(handle).is_some());
    registry.retire(handle);
    assert_eq!(
        registry.bind(handle, Arc::new(Probe::new())),
        Err(BridgeError::StaleHandle(handle))
    );
}

// @tc.name: ut_handle_notify_progress
// @tc.desc: Test progress routing through the registry
// @tc.precon: NA
// @tc.step: 1. Register a probe and deliver a progress report
//           2. Retire the handle and deliver again
// @tc.expect: The probe sees the first report, the second is absorbed
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_handle_notify_progress() {
    let registry = HandleRegistry::new();
    let probe = Arc::new(Probe::new());
    let handle = registry.register(probe.clone());
    assert!(registry.notify_progress(handle, 512, 2048));
    assert_eq!(probe.transferred.load(Ordering::SeqCst), 512);
    assert_eq!(probe.total.load(Ordering::SeqCst), 2048);
    registry.retire(handle);
    assert!(!registry.notify_progress(handle, 1024, 2048));
    assert_eq!(probe.transferred.load(Ordering::SeqCst), 512);
}

// @tc.name: ut_handle_concurrent_register_retire
// @tc.desc: Test registry consistency under concurrent use
// @tc.precon: NA
// @tc.step: 1. Spawn 8 threads, each registering 50 handles and retiring
//              half of them
//           2. Join and count live registrations
// @tc.expect: Exactly 8 * 25 handles remain live and all raw values issued
//             were unique at their time of use
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level2
#[test]
fn ut_handle_concurrent_register_retire() {
    let registry = Arc::new(HandleRegistry::new());
    let mut workers = Vec::new();
    for _ in 0..8 {
        let registry = registry.clone();
        workers.push(std::thread::spawn(move || {
            for round in 0..50 {
                let handle = registry.register(Arc::new(Probe::new()));
                assert!(registry.lookup(handle).is_some());
                if round % 2 == 0 {
                    registry.retire(handle);
                    assert!(registry.lookup(handle).is_none());
                }
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(registry.live(), 8 * 25);
}
