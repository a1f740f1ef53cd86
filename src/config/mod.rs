// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
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


//! Emitter configuration.
//!
//! `EmitterConfig` tunes the bookkeeping of one `WidgetEvents` instance:
//!
//! - **Leak warnings**: a warning is logged once per subscription key when
//!   its listener count exceeds `max_listeners`
//! - **Teardown**: whether dropping the emitter detaches the native
//!   listeners it still holds
//!
//! # Example
//!
//! ```
//! use widget_events::config::EmitterConfig;
//!
//! let config = EmitterConfig::default().with_max_listeners(32);
//! assert_eq!(config.max_listeners, 32);
//! assert!(config.release_on_drop);
//! ```

use serde::{Deserialize, Serialize};

/// Default leak-warning threshold per subscription key
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Settings for one emitter instance.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Listener count per key above which a leak warning is logged.
    /// `0` disables the warning.
    pub max_listeners: usize,

    /// Detach every remaining native listener when the emitter is dropped.
    pub release_on_drop: bool,
}

impl EmitterConfig {
    pub fn with_max_listeners(mut self, max_listeners: usize) -> Self {
        self.max_listeners = max_listeners;
        self
    }

    pub fn with_release_on_drop(mut self, release_on_drop: bool) -> Self {
        self.release_on_drop = release_on_drop;
        self
    }

    /// Whether `count` listeners on one key exceed the threshold
    pub fn exceeds_max_listeners(&self, count: usize) -> bool {
        self.max_listeners > 0 && count > self.max_listeners
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            release_on_drop: true,
        }
    }
}
