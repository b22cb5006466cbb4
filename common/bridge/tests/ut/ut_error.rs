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

use super::*;
use crate::callback::CallbackPhase;

// @tc.name: ut_error_display
// @tc.desc: Test the display formatting of boundary errors
// @tc.precon: NA
// @tc.step: 1. Format each BridgeError variant
// @tc.expect: Messages carry the handle value and the rejected event
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_error_display() {
    let handle = TransferHandle::from_raw(42);
    let protocol = BridgeError::Protocol {
        handle,
        phase: CallbackPhase::Succeeded,
        event: "on_failed",
    };
    assert_eq!(
        protocol.to_string(),
        "on_failed rejected for handle 42 in phase Succeeded"
    );
    assert_eq!(
        BridgeError::StaleHandle(handle).to_string(),
        "stale or unknown handle 42"
    );
    assert_eq!(
        BridgeError::QueueFull(handle).to_string(),
        "dispatch queue full, dropped event for handle 42"
    );
    assert_eq!(
        BridgeError::Disconnected(handle).to_string(),
        "dispatcher gone, dropped event for handle 42"
    );
}

// @tc.name: ut_error_info_accessors
// @tc.desc: Test ErrorInfo and SinkError accessors
// @tc.precon: NA
// @tc.step: 1. Construct an ErrorInfo and a SinkError
//           2. Read back their fields and display forms
// @tc.expect: Accessors return the constructor arguments
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_error_info_accessors() {
    let info = ErrorInfo::new(-7, "connection reset");
    assert_eq!(info.code(), -7);
    assert_eq!(info.message(), "connection reset");
    assert_eq!(info.to_string(), "connection reset (-7)");

    let sink = SinkError::new("buffer rejected");
    assert_eq!(sink.message(), "buffer rejected");
    assert_eq!(sink.to_string(), "buffer rejected");
}
