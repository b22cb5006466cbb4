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

//! Common utilities for the transfer bridge workspace.
//!
//! This crate provides the shared logging surface and the conditional
//! compilation macros used by the bridge and worker crates.

#![allow(clippy::new_without_default)]

/// Internal macros module.
#[macro_use]
mod macros;

/// Re-exported logging macros from the `log` facade.
pub use log::{debug, error, info};
