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


//! src/core/types.rs
//!
//! Core type definitions for event selectors
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifier`: Modifier keys recognised in selectors (ALT, CTRL, SHIFT, META)
//! - `ModifierSet`: The modifier flags plus the key/button token of a selector
//! - `EventSource`: Whether a selector is backed by a native DOM event
//! - `EventSelector`: A compiled `category:action[:selector]` descriptor
//!
//! Selectors are compared in their normalised form, so `Ctrl+Space` and
//! `space+ctrl` identify the same subscription.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::EventError;

/// Suffix marking the capture-phase variant of a subscription key
pub const CAPTURE_SUFFIX: &str = "-capture";

/// Keyboard modifier keys
///
/// Declaration order is the canonical order used when formatting selectors.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Modifier {
    /// Alt/Option key
    Alt,
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Meta/Command/Windows key
    Meta,
}

impl Modifier {
    /// All modifiers in canonical order
    pub const ALL: [Modifier; 4] = [Modifier::Alt, Modifier::Ctrl, Modifier::Shift, Modifier::Meta];

    /// Lower-case selector token for this modifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Meta => "meta",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier flags plus the discriminating key or button token
///
/// `which` holds a lower-cased key code (`space`, `keyd`) or a mouse
/// button identifier (`button1`). A set without `which` cannot be
/// formatted into a selector.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ModifierSet {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
    pub which: Option<String>,
}

impl ModifierSet {
    /// Create a set with no modifiers and no key
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set for a bare key or button token
    pub fn for_which(which: &str) -> Self {
        Self::new().with_which(which)
    }

    /// Replace the key/button token (stored lower-case)
    pub fn with_which(mut self, which: &str) -> Self {
        self.which = Some(which.to_lowercase());
        self
    }

    /// Set a modifier flag
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    pub fn with_alt(self, on: bool) -> Self {
        self.with_flag(Modifier::Alt, on)
    }

    pub fn with_ctrl(self, on: bool) -> Self {
        self.with_flag(Modifier::Ctrl, on)
    }

    pub fn with_shift(self, on: bool) -> Self {
        self.with_flag(Modifier::Shift, on)
    }

    pub fn with_meta(self, on: bool) -> Self {
        self.with_flag(Modifier::Meta, on)
    }

    fn with_flag(mut self, modifier: Modifier, on: bool) -> Self {
        self.set(modifier, on);
        self
    }

    /// Set or clear a modifier flag in place
    pub fn set(&mut self, modifier: Modifier, on: bool) {
        match modifier {
            Modifier::Alt => self.alt = on,
            Modifier::Ctrl => self.ctrl = on,
            Modifier::Shift => self.shift = on,
            Modifier::Meta => self.meta = on,
        }
    }

    /// Check whether a modifier flag is set
    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    /// Active modifiers in canonical order
    pub fn modifiers(&self) -> Vec<Modifier> {
        Modifier::ALL.into_iter().filter(|m| self.has(*m)).collect()
    }
}

/// Renders the canonical selector form. A set without `which` renders only
/// its modifiers; use `selector::format_modifiers` when a key is required.
impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = self.modifiers().iter().map(|m| m.as_str()).collect();
        if let Some(which) = &self.which {
            parts.push(which);
        }
        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for ModifierSet {
    type Err = EventError;

    /// Parses like `selector::parse_modifiers` but rejects selectors
    /// without a key or button token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let set = crate::core::selector::parse_modifiers(s);
        if set.which.is_none() {
            return Err(EventError::invalid_selector(s, "selector has no key or button"));
        }
        Ok(set)
    }
}

/// Whether a compiled selector is backed by a native DOM event
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum EventSource {
    /// Library-level event with no DOM counterpart
    Logical,
    /// Backed by the named native event (e.g. `keypress`)
    Native(&'static str),
}

/// A compiled event selector
///
/// Produced by `compiler::compile` for every subscribe, unsubscribe and
/// emit call; never cached. Immutable once built.
///
/// # Example
/// ```
/// use widget_events::core::{compile, EventSource};
///
/// let selector = compile("key:press:Space+Ctrl")?;
/// assert_eq!(selector.category(), "key");
/// assert_eq!(selector.action(), Some("press"));
/// assert_eq!(selector.modifier_selector(), Some("ctrl+space"));
/// assert_eq!(selector.source(), EventSource::Native("keypress"));
/// assert_eq!(selector.to_key(true), "key:press-capture:ctrl+space");
/// # Ok::<(), widget_events::EventError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EventSelector {
    raw: String,
    category: String,
    action: Option<String>,
    modifier_selector: Option<String>,
    source: EventSource,
}

impl EventSelector {
    pub(crate) fn new(
        raw: &str,
        category: &str,
        action: Option<&str>,
        modifier_selector: Option<String>,
        source: EventSource,
    ) -> Self {
        Self {
            raw: raw.to_string(),
            category: category.to_string(),
            action: action.map(str::to_string),
            modifier_selector,
            source,
        }
    }

    /// The selector string exactly as supplied
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Event category, e.g. `mouse` or `key`
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Event action, e.g. `click` or `press`
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Normalised modifier selector, e.g. `ctrl+space`
    pub fn modifier_selector(&self) -> Option<&str> {
        self.modifier_selector.as_deref()
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    /// Native event name when DOM-backed
    pub fn native_event(&self) -> Option<&'static str> {
        match self.source {
            EventSource::Native(name) => Some(name),
            EventSource::Logical => None,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.source, EventSource::Native(_))
    }

    /// The same event without a modifier selector
    pub fn generic(&self) -> Self {
        Self {
            modifier_selector: None,
            ..self.clone()
        }
    }

    /// The same event qualified by an already-normalised modifier selector
    pub fn qualified(&self, modifier_selector: &str) -> Self {
        Self {
            modifier_selector: Some(modifier_selector.to_string()),
            ..self.clone()
        }
    }

    /// Subscription key shared by the subscribe and emit paths
    ///
    /// Native-backed selectors render `category:action[-capture][:selector]`.
    /// Logical selectors are keyed by the raw string so they round-trip
    /// unchanged; capture has no meaning for them.
    pub fn to_key(&self, capture: bool) -> String {
        if !self.is_native() {
            return self.raw.clone();
        }

        let mut key = self.category.clone();
        if let Some(action) = &self.action {
            key.push(':');
            key.push_str(action);
        }
        if capture {
            key.push_str(CAPTURE_SUFFIX);
        }
        if let Some(selector) = &self.modifier_selector {
            key.push(':');
            key.push_str(selector);
        }
        key
    }
}

impl fmt::Display for EventSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_key(false))
    }
}
