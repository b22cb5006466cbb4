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

// @tc.name: ut_log_init_idempotent
// @tc.desc: Test that the test logger can be initialized repeatedly
// @tc.precon: NA
// @tc.step: 1. Call log_init twice from the same test
//           2. Emit a log line through the facade
// @tc.expect: No panic on the second initialization
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_log_init_idempotent() {
    log_init();
    log_init();
    crate::info!("logger initialized twice without panicking");
}
