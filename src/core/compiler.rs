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


//! src/core/compiler.rs
//!
//! Event selector compiler
//!
//! Turns a full logical selector `category:action[:modifiers]` into an
//! `EventSelector`. The modifier part is normalised through the selector
//! grammar and the native event is looked up in the namespace table.
//! Selectors outside the table compile to logical events and keep their
//! raw form as subscription key.

use tracing::trace;

use crate::core::error::{EventError, Result};
use crate::core::namespace::resolve_native_event_name;
use crate::core::selector::normalize_selector;
use crate::core::types::{EventSelector, EventSource, CAPTURE_SUFFIX};

/// Compile an event selector string
///
/// A trailing `-capture` on the action is stripped before lookup. Capture
/// is always passed explicitly to the subscribe and emit calls.
///
/// # Example
/// ```
/// use widget_events::core::compile;
///
/// let selector = compile("mouse:click:Button1+Ctrl")?;
/// assert_eq!(selector.native_event(), Some("click"));
/// assert_eq!(selector.to_key(false), "mouse:click:ctrl+button1");
///
/// let logical = compile("hello:world")?;
/// assert_eq!(logical.native_event(), None);
/// # Ok::<(), widget_events::EventError>(())
/// ```
pub fn compile(selector: &str) -> Result<EventSelector> {
    if selector.trim().is_empty() {
        return Err(EventError::invalid_selector(selector, "selector is empty"));
    }

    let mut parts = selector.splitn(3, ':');
    let category = parts.next().unwrap_or_default();
    let action = parts
        .next()
        .map(|action| action.strip_suffix(CAPTURE_SUFFIX).unwrap_or(action));
    let modifier_selector = parts.next().map(normalize_selector).transpose()?;

    let source = action
        .and_then(|action| resolve_native_event_name(category, action))
        .map_or(EventSource::Logical, EventSource::Native);

    trace!(selector, ?source, "compiled event selector");

    Ok(EventSelector::new(
        selector,
        category,
        action,
        modifier_selector,
        source,
    ))
}
