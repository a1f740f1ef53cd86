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


//! src/core/error.rs
//!
//! Error taxonomy for the event layer.
//!
//! Every variant describes a contract violation by the caller. Errors are
//! returned synchronously from the call that broke the contract and are
//! never retried.

use thiserror::Error;

/// Errors raised by selector compilation, listener bookkeeping and dispatch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// Selector is empty, malformed, or has no key/button token
    #[error("Invalid event selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Wrapped node is not an element, or is no longer connected
    #[error("Invalid event target: {0}")]
    InvalidTarget(String),

    /// Operation intentionally not offered by this layer
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Release for a native listener that was never acquired
    #[error("No native listener registered for '{0}'")]
    NotRegistered(String),
}

impl EventError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        EventError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EventError>;
