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


//! src/emitter/router.rs
//!
//! Emission router
//!
//! When a native event fires, the router works out which logical names to
//! emit: the generic `category:action` name for catch-all listeners, then
//! the name qualified by the event's modifier selector, e.g.
//! `key:press:ctrl+space`.
//!
//! The qualifying selector is extracted by event family adapters. Each
//! adapter knows one family's event shape (keyboard, mouse, ...). New
//! families are added with `register_family` without touching the router.

use std::fmt;

use crate::core::namespace::logical_names_for;
use crate::core::selector::format_modifiers;
use crate::core::types::{EventSelector, EventSource, ModifierSet};
use crate::dom::{KeyboardEvent, MouseEvent, NativeEvent};

/// Extracts modifier state from one family of native events
pub trait EventFamily {
    /// Family name, used in logs
    fn name(&self) -> &'static str;

    /// Modifier flags and key/button token of `event`, or `None` when the
    /// event does not belong to this family
    fn extract(&self, event: &dyn NativeEvent) -> Option<ModifierSet>;
}

/// Keyboard events: `which` is the physical key code (`space`, `keyd`)
///
/// Falls back to the `key` value when the platform leaves `code` empty.
pub struct KeyboardFamily;

impl EventFamily for KeyboardFamily {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn extract(&self, event: &dyn NativeEvent) -> Option<ModifierSet> {
        let event = event.as_any().downcast_ref::<KeyboardEvent>()?;
        let which = if event.code.is_empty() { &event.key } else { &event.code };
        if which.is_empty() {
            return None;
        }

        Some(
            ModifierSet::for_which(which)
                .with_alt(event.alt_key)
                .with_ctrl(event.ctrl_key)
                .with_shift(event.shift_key)
                .with_meta(event.meta_key),
        )
    }
}

/// Pointer events: `which` is `button{index}`
pub struct MouseFamily;

impl EventFamily for MouseFamily {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn extract(&self, event: &dyn NativeEvent) -> Option<ModifierSet> {
        let event = event.as_any().downcast_ref::<MouseEvent>()?;

        Some(
            ModifierSet::for_which(&format!("button{}", event.button))
                .with_alt(event.alt_key)
                .with_ctrl(event.ctrl_key)
                .with_shift(event.shift_key)
                .with_meta(event.meta_key),
        )
    }
}

/// Computes the logical names a native event is re-emitted under
pub struct EmissionRouter {
    families: Vec<Box<dyn EventFamily>>,
}

impl EmissionRouter {
    /// Router with the keyboard and mouse families
    pub fn new() -> Self {
        let mut router = Self::empty();
        router.register_family(KeyboardFamily);
        router.register_family(MouseFamily);
        router
    }

    /// Router without any family; only generic names are emitted
    pub fn empty() -> Self {
        Self {
            families: Vec::new(),
        }
    }

    /// Add an adapter. Adapters are tried in registration order.
    pub fn register_family(&mut self, family: impl EventFamily + 'static) {
        self.families.push(Box::new(family));
    }

    pub fn family_names(&self) -> Vec<&'static str> {
        self.families.iter().map(|f| f.name()).collect()
    }

    /// Normalised modifier selector of `event`, if any family recognises it
    pub fn qualifying_selector(&self, event: &dyn NativeEvent) -> Option<String> {
        self.families
            .iter()
            .find_map(|family| family.extract(event))
            .and_then(|set| format_modifiers(&set).ok())
    }

    /// Subscription keys to emit for `selector`, in emission order
    ///
    /// The generic key always comes first. Logical selectors are not routed
    /// and yield their own key only.
    pub fn route(&self, selector: &EventSelector, capture: bool, event: &dyn NativeEvent) -> Vec<String> {
        if selector.source() == EventSource::Logical {
            return vec![selector.to_key(capture)];
        }

        let generic = selector.generic();
        let mut keys = vec![generic.to_key(capture)];
        if let Some(qualifier) = self.qualifying_selector(event) {
            keys.push(generic.qualified(&qualifier).to_key(capture));
        }
        keys
    }

    /// Subscription keys for a native firing on a `(native, capture)` pair
    ///
    /// Covers every logical name the namespace maps onto `native`.
    pub fn route_native(&self, native: &'static str, capture: bool, event: &dyn NativeEvent) -> Vec<String> {
        logical_names_for(native)
            .into_iter()
            .flat_map(|(category, action)| {
                let selector = EventSelector::new(
                    &format!("{}:{}", category, action),
                    category,
                    Some(action),
                    None,
                    EventSource::Native(native),
                );
                self.route(&selector, capture, event)
            })
            .collect()
    }
}

impl Default for EmissionRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmissionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionRouter")
            .field("families", &self.family_names())
            .finish()
    }
}
