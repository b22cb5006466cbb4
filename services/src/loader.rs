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

//! Task constructor registry.
//!
//! The scheduler refers to tasks by type name. Instead of resolving names
//! through runtime type lookup, constructors are registered once at process
//! start and resolved from a plain map, which decouples task packaging from
//! the rest of the process. A name with no constructor, a constructor that
//! fails, and a constructor that panics all yield "no instance", logged and
//! never propagated past the loader boundary.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{LazyLock, Mutex};

use transfer_utils::{error, info};

use crate::data::{RecordData, TaskOutcome};
use crate::error::LoadError;

/// One unit of work executed on a scheduler thread.
pub trait ScheduledTask: Send {
    /// Runs the task to its terminal outcome. Blocks the calling thread.
    fn run(&mut self) -> TaskOutcome;
}

type Constructor = Box<dyn Fn(RecordData) -> Result<Box<dyn ScheduledTask>, LoadError> + Send + Sync>;

/// Maps task type names to constructor functions.
pub struct TaskRegistry {
    constructors: Mutex<HashMap<String, Constructor>>,
}

impl TaskRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry instance.
    pub fn get_instance() -> &'static Self {
        static INSTANCE: LazyLock<TaskRegistry> = LazyLock::new(TaskRegistry::new);
        &INSTANCE
    }

    /// Registers the constructor for a task type name.
    ///
    /// Registering the same name again replaces the previous constructor.
    pub fn register<F>(&self, name: &str, constructor: F)
    where
        F: Fn(RecordData) -> Result<Box<dyn ScheduledTask>, LoadError> + Send + Sync + 'static,
    {
        let mut constructors = self.constructors.lock().unwrap();
        if constructors
            .insert(name.to_string(), Box::new(constructor))
            .is_some()
        {
            info!("task constructor for {} replaced", name);
        }
    }

    /// Whether a constructor is registered for the name.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.lock().unwrap().contains_key(name)
    }

    /// Produces a ready-to-run task instance for the name, or no instance.
    pub fn construct(&self, name: &str, input: RecordData) -> Option<Box<dyn ScheduledTask>> {
        let constructors = self.constructors.lock().unwrap();
        let Some(constructor) = constructors.get(name) else {
            error!("no task constructor registered for {}", name);
            return None;
        };
        match catch_unwind(AssertUnwindSafe(|| constructor(input))) {
            Ok(Ok(task)) => Some(task),
            Ok(Err(cause)) => {
                error!("task construction for {} failed: {}", name, cause);
                None
            }
            Err(_) => {
                error!("task constructor for {} panicked", name);
                None
            }
        }
    }
}
