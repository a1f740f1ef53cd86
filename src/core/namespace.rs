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


//! src/core/namespace.rs
//!
//! Static mapping from semantic event names to native DOM events
//!
//! Events are grouped into categories (`mouse`, `key`, `form`, `drag`,
//! `view`, `media`), each holding actions that map to one native event
//! name, e.g. `key:press` -> `keypress`. The table is a process-wide
//! constant: it is never mutated and needs no synchronisation.
//!
//! Declaration order is part of the contract: `list_categories` and
//! `list_actions` return entries in the order they appear here.

/// Category -> (action -> native event name), in declaration order
const EVENT_NAMESPACE: &[(&str, &[(&str, &str)])] = &[
    (
        "mouse",
        &[
            ("click", "click"),
            ("dblclick", "dblclick"),
            ("down", "mousedown"),
            ("up", "mouseup"),
            ("enter", "mouseenter"),
            ("leave", "mouseleave"),
            ("move", "mousemove"),
            ("out", "mouseout"),
            ("over", "mouseover"),
            ("wheel", "wheel"),
            ("contextmenu", "contextmenu"),
        ],
    ),
    (
        "key",
        &[
            ("press", "keypress"),
            ("down", "keydown"),
            ("up", "keyup"),
        ],
    ),
    (
        "form",
        &[
            ("blur", "blur"),
            ("focus", "focus"),
            ("focusin", "focusin"),
            ("focusout", "focusout"),
            ("input", "input"),
            ("search", "search"),
            ("select", "select"),
        ],
    ),
    (
        "drag",
        &[
            ("drag", "drag"),
            ("start", "dragstart"),
            ("enter", "dragenter"),
            ("over", "dragover"),
            ("leave", "dragleave"),
            ("end", "dragend"),
            ("drop", "drop"),
        ],
    ),
    ("view", &[("scroll", "scroll")]),
    (
        "media",
        &[
            ("abort", "abort"),
            ("canplay", "canplay"),
            ("canplaythrough", "canplaythrough"),
            ("duration", "durationchange"),
            ("empty", "emptied"),
            ("end", "ended"),
            ("error", "error"),
            ("load", "loadeddata"),
            ("metadata", "loadedmetadata"),
            ("loading", "loadstart"),
            ("pause", "pause"),
            ("play", "play"),
            ("playing", "playing"),
            ("progress", "progress"),
            ("ratechange", "ratechange"),
            ("seek", "seeked"),
            ("seeking", "seeking"),
            ("stalled", "stalled"),
            ("suspend", "suspend"),
            ("time", "timeupdate"),
            ("volume", "volumechange"),
            ("waiting", "waiting"),
        ],
    ),
];

fn actions_of(category: &str) -> Option<&'static [(&'static str, &'static str)]> {
    EVENT_NAMESPACE
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, actions)| *actions)
}

/// List all event categories
pub fn list_categories() -> Vec<&'static str> {
    EVENT_NAMESPACE.iter().map(|(name, _)| *name).collect()
}

/// List the `category:action` names of one category
///
/// Returns an empty list for unknown categories.
pub fn list_actions(category: &str) -> Vec<String> {
    actions_of(category)
        .map(|actions| {
            actions
                .iter()
                .map(|(action, _)| format!("{}:{}", category, action))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve the native DOM event behind `category:action`
pub fn resolve_native_event_name(category: &str, action: &str) -> Option<&'static str> {
    actions_of(category)?
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, native)| *native)
}

/// Every `(category, action)` pair fed by a native event
///
/// Used by the emission router to turn one native firing into logical
/// event names. Pairs come back in declaration order.
pub fn logical_names_for(native: &str) -> Vec<(&'static str, &'static str)> {
    EVENT_NAMESPACE
        .iter()
        .flat_map(|(category, actions)| {
            actions
                .iter()
                .filter(move |(_, name)| *name == native)
                .map(move |(action, _)| (*category, *action))
        })
        .collect()
}

/// Check whether a category belongs to the DOM namespace
pub fn is_dom_category(category: &str) -> bool {
    actions_of(category).is_some()
}
