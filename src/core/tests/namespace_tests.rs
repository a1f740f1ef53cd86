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


//! Namespace table tests
//!
//! Listing order is significant, so these tests compare whole sequences.

use crate::core::namespace::*;

#[test]
fn test_list_categories() {
    let expected = vec!["mouse", "key", "form", "drag", "view", "media"];
    assert_eq!(list_categories(), expected);
}

#[test]
fn test_list_actions_in_declaration_order() {
    let expected = vec!["key:press", "key:down", "key:up"];
    assert_eq!(list_actions("key"), expected);
}

#[test]
fn test_list_actions_mouse() {
    let actions = list_actions("mouse");
    assert_eq!(actions.len(), 11);
    assert_eq!(actions.first().map(String::as_str), Some("mouse:click"));
    assert_eq!(actions.last().map(String::as_str), Some("mouse:contextmenu"));
}

#[test]
fn test_list_actions_unknown_category() {
    assert!(list_actions("hello").is_empty());
}

#[test]
fn test_resolve_native_event_name() {
    assert_eq!(resolve_native_event_name("key", "press"), Some("keypress"));
    assert_eq!(resolve_native_event_name("mouse", "down"), Some("mousedown"));
    assert_eq!(resolve_native_event_name("media", "time"), Some("timeupdate"));
    assert_eq!(resolve_native_event_name("drag", "end"), Some("dragend"));
    assert_eq!(resolve_native_event_name("media", "end"), Some("ended"));
}

#[test]
fn test_resolve_unknown_returns_none() {
    assert_eq!(resolve_native_event_name("hello", "world"), None);
    assert_eq!(resolve_native_event_name("key", "hello"), None);
}

#[test]
fn test_logical_names_for_native() {
    assert_eq!(logical_names_for("keypress"), vec![("key", "press")]);
    assert_eq!(logical_names_for("mouseenter"), vec![("mouse", "enter")]);
    assert!(logical_names_for("unknown").is_empty());
}

#[test]
fn test_every_action_resolves_and_reverses() {
    for category in list_categories() {
        for name in list_actions(category) {
            let action = name.split(':').nth(1).unwrap();
            let native = resolve_native_event_name(category, action).unwrap();
            assert!(logical_names_for(native).contains(&(category, action)));
        }
    }
}

#[test]
fn test_is_dom_category() {
    assert!(is_dom_category("media"));
    assert!(!is_dom_category("hello"));
}
