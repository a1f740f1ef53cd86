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


//! src/core/mod.rs
//!
//! Selector language and namespace
//!
//! This module contains everything needed to turn a semantic selector
//! string into a structured descriptor:
//! - Type definitions for modifier sets and compiled selectors
//! - The modifier selector grammar (parse, format, normalise)
//! - The static category/action -> native event table
//! - The event selector compiler
//!
//! Nothing here touches a DOM node, so it is unit-testable in isolation.

pub mod compiler;
pub mod error;
pub mod namespace;
pub mod selector;
pub mod types;

pub use compiler::compile;
pub use error::{EventError, Result};
pub use namespace::{list_actions, list_categories, logical_names_for, resolve_native_event_name};
pub use selector::{format_modifiers, normalize_selector, parse_modifiers};
pub use types::*;

#[cfg(test)]
mod tests;
