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

//! Response metadata as handed over by the host networking stack.

use std::collections::HashMap;

/// Snapshot of the host stack's response metadata for one request.
///
/// Header names are stored lowercase for consistent access.
#[derive(Clone, Debug, Default)]
pub struct ResponseInfo {
    status: u32,
    url: String,
    headers: HashMap<String, String>,
}

impl ResponseInfo {
    /// Creates response metadata with the given status code and final URL.
    pub fn new(status: u32, url: &str) -> Self {
        Self {
            status,
            url: url.to_string(),
            headers: HashMap::new(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u32 {
        self.status
    }

    /// The URL the response was ultimately served from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Adds a header, lowercasing its name.
    pub fn insert_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// All headers, keyed by lowercase name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}
