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

// @tc.name: ut_error_display
// @tc.desc: Test display formatting of task errors
// @tc.precon: NA
// @tc.step: 1. Format each TaskError variant and a LoadError
// @tc.expect: Messages name the failed field, code or cause
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_error_display() {
    assert_eq!(
        TaskError::InvalidInput("url").to_string(),
        "missing required input field: url"
    );
    assert_eq!(
        TaskError::Engine(7).to_string(),
        "engine returned result code 7"
    );
    assert_eq!(
        TaskError::Canceled.to_string(),
        "task canceled before the engine call"
    );
    assert_eq!(
        LoadError::new("constructor refused").to_string(),
        "constructor refused"
    );
}

// @tc.name: ut_error_failure_conversion
// @tc.desc: Test conversion of task errors into the failure payload
// @tc.precon: NA
// @tc.step: 1. Convert an engine error and an input error
// @tc.expect: The engine error carries its code, everything else carries a
//             message
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_error_failure_conversion() {
    let engine: FailureInfo = TaskError::Engine(23).into();
    assert_eq!(engine.error_code(), Some(23));
    assert_eq!(engine.error_message(), None);

    let input: FailureInfo = TaskError::InvalidInput("file_path").into();
    assert_eq!(input.error_code(), None);
    assert_eq!(
        input.error_message(),
        Some("missing required input field: file_path")
    );
}
