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

struct StubTask;

impl ScheduledTask for StubTask {
    fn run(&mut self) -> TaskOutcome {
        TaskOutcome::Success
    }
}

// @tc.name: ut_loader_construct
// @tc.desc: Test construction of a registered task type
// @tc.precon: NA
// @tc.step: 1. Register a constructor and construct an instance
//           2. Run the instance
// @tc.expect: An instance is produced and runs to Success
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_loader_construct() {
    let registry = TaskRegistry::new();
    registry.register("stub", |_input| Ok(Box::new(StubTask) as Box<dyn ScheduledTask>));
    assert!(registry.contains("stub"));

    let mut task = registry.construct("stub", RecordData::new()).unwrap();
    assert_eq!(task.run(), TaskOutcome::Success);
}

// @tc.name: ut_loader_unknown_name
// @tc.desc: Test construction of a name with no registered constructor
// @tc.precon: NA
// @tc.step: 1. Construct an unregistered task type
// @tc.expect: No instance is produced and nothing panics
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_loader_unknown_name() {
    let registry = TaskRegistry::new();
    assert!(!registry.contains("absent"));
    assert!(registry.construct("absent", RecordData::new()).is_none());
}

// @tc.name: ut_loader_failing_constructor
// @tc.desc: Test a constructor that refuses to produce an instance
// @tc.precon: NA
// @tc.step: 1. Register a constructor returning a LoadError and construct
// @tc.expect: No instance is produced and nothing panics
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level1
#[test]
fn ut_loader_failing_constructor() {
    let registry = TaskRegistry::new();
    registry.register("refusing", |_input| Err(LoadError::new("no such worker")));
    assert!(registry.construct("refusing", RecordData::new()).is_none());
}

// @tc.name: ut_loader_panicking_constructor
// @tc.desc: Test that a panicking constructor stays inside the loader
// @tc.precon: NA
// @tc.step: 1. Register a constructor that panics and construct
// @tc.expect: No instance is produced and the panic does not escape
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level2
#[test]
fn ut_loader_panicking_constructor() {
    let registry = TaskRegistry::new();
    registry.register("exploding", |_input| -> Result<Box<dyn ScheduledTask>, LoadError> {
        panic!("constructor exploded");
    });
    assert!(registry.construct("exploding", RecordData::new()).is_none());
}

// @tc.name: ut_loader_replacement
// @tc.desc: Test that re-registering a name replaces the constructor
// @tc.precon: NA
// @tc.step: 1. Register a refusing constructor, then a working one under
//              the same name
//           2. Construct an instance
// @tc.expect: The replacement constructor produces the instance
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level2
#[test]
fn ut_loader_replacement() {
    let registry = TaskRegistry::new();
    registry.register("worker", |_input| Err(LoadError::new("old")));
    registry.register("worker", |_input| Ok(Box::new(StubTask) as Box<dyn ScheduledTask>));
    assert!(registry.construct("worker", RecordData::new()).is_some());
}

// @tc.name: ut_loader_global_instance
// @tc.desc: Test the process-wide registry instance
// @tc.precon: NA
// @tc.step: 1. Register a uniquely named constructor on the global registry
//           2. Construct it through a second get_instance call
// @tc.expect: Both calls observe the same registry
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: level2
#[test]
fn ut_loader_global_instance() {
    TaskRegistry::get_instance().register("ut_loader_global_stub", |_input| {
        Ok(Box::new(StubTask) as Box<dyn ScheduledTask>)
    });
    assert!(TaskRegistry::get_instance().contains("ut_loader_global_stub"));
    assert!(TaskRegistry::get_instance()
        .construct("ut_loader_global_stub", RecordData::new())
        .is_some());
}
