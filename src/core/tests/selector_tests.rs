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


//! Selector grammar tests
//!
//! Tests for parsing and normalising modifier selectors:
//! - Modifier token recognition
//! - Case and whitespace handling
//! - Canonical ordering and duplicate removal
//! - Last-wins handling of repeated key tokens

use crate::core::{
    selector::*,
    types::{Modifier, ModifierSet},
    EventError,
};

/// Assert every field of a parsed set
fn assert_parts(set: &ModifierSet, which: &str, alt: bool, ctrl: bool, shift: bool, meta: bool) {
    assert_eq!(set.which.as_deref(), Some(which));
    assert_eq!(set.alt, alt);
    assert_eq!(set.ctrl, ctrl);
    assert_eq!(set.shift, shift);
    assert_eq!(set.meta, meta);
}

#[test]
fn test_parse_modifier_token() {
    assert!(matches!(parse_modifier_token("alt"), Ok((_, Modifier::Alt))));
    assert!(matches!(parse_modifier_token("ctrl"), Ok((_, Modifier::Ctrl))));
    assert!(matches!(parse_modifier_token("shift"), Ok((_, Modifier::Shift))));
    assert!(matches!(parse_modifier_token("meta"), Ok((_, Modifier::Meta))));
}

#[test]
fn test_parse_modifier_token_rejects_partial_match() {
    assert!(parse_modifier_token("ctrlx").is_err());
    assert!(parse_modifier_token("space").is_err());
    assert!(parse_modifier_token("").is_err());
}

#[test]
fn test_parse_selector_tokens() {
    let (rest, tokens) = parse_selector_tokens("Ctrl + Space").unwrap();
    assert_eq!(rest, "");
    assert_eq!(tokens, vec!["Ctrl ", " Space"]);

    let (_, tokens) = parse_selector_tokens("ctrl++space+").unwrap();
    assert_eq!(tokens, vec!["ctrl", "", "space", ""]);

    let (_, tokens) = parse_selector_tokens("").unwrap();
    assert_eq!(tokens, vec![""]);
}

#[test]
fn test_parse_skips_empty_tokens() {
    assert_parts(&parse_modifiers("space+"), "space", false, false, false, false);
    assert_parts(&parse_modifiers("+ctrl++space"), "space", false, true, false, false);
    assert_eq!(parse_modifiers("+").which, None);
}

#[test]
fn test_parse_selector_parts() {
    assert_parts(&parse_modifiers("Space"), "space", false, false, false, false);
    assert_parts(&parse_modifiers("Ctrl+Space"), "space", false, true, false, false);
    assert_parts(&parse_modifiers("Alt+Ctrl+Space"), "space", true, true, false, false);
    assert_parts(&parse_modifiers("Space+Alt+Shift+Ctrl"), "space", true, true, true, false);
    assert_parts(&parse_modifiers("Space+Shift"), "space", false, false, true, false);
    assert_parts(&parse_modifiers("Shift+KeyD+Ctrl"), "keyd", false, true, true, false);
    assert_parts(&parse_modifiers("Shift+Alt+enter+Ctrl+Meta"), "enter", true, true, true, true);
}

#[test]
fn test_parse_ignores_whitespace() {
    let set = parse_modifiers(" Shift + Alt + enter + Ctrl + Meta  ");
    assert_parts(&set, "enter", true, true, true, true);
}

#[test]
fn test_parse_last_which_wins() {
    let set = parse_modifiers("Space+KeyD+Enter");
    assert_parts(&set, "enter", false, false, false, false);
}

#[test]
fn test_parse_modifiers_only() {
    let set = parse_modifiers("Ctrl+Shift");
    assert!(set.ctrl && set.shift);
    assert_eq!(set.which, None);
}

#[test]
fn test_normalize_without_modifiers() {
    assert_eq!(normalize_selector("Space").unwrap(), "space");
    assert_eq!(normalize_selector("KeyD").unwrap(), "keyd");
    assert_eq!(normalize_selector(" enter ").unwrap(), "enter");
}

#[test]
fn test_normalize_with_modifiers() {
    assert_eq!(normalize_selector("Alt+Space").unwrap(), "alt+space");
    assert_eq!(normalize_selector("Shift + Space").unwrap(), "shift+space");
}

#[test]
fn test_normalize_order() {
    assert_eq!(normalize_selector("Space+Ctrl").unwrap(), "ctrl+space");
    assert_eq!(normalize_selector("Meta+Space+Shift").unwrap(), "shift+meta+space");
    assert_eq!(
        normalize_selector("Alt+Space+Meta+Ctrl+Shift").unwrap(),
        "alt+ctrl+shift+meta+space"
    );
}

#[test]
fn test_normalize_removes_duplicates() {
    assert_eq!(normalize_selector("Space+Space+Ctrl+Ctrl").unwrap(), "ctrl+space");
}

#[test]
fn test_normalize_takes_last_which() {
    assert_eq!(normalize_selector("Space+Enter").unwrap(), "enter");
}

#[test]
fn test_normalize_order_and_case_independent() {
    let a = normalize_selector("Shift+Alt+Ctrl+Meta+Enter").unwrap();
    let b = normalize_selector(" Shift + Alt + enter + Ctrl + Meta ").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, "alt+ctrl+shift+meta+enter");
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize_selector("Meta+KeyZ+Ctrl").unwrap();
    assert_eq!(normalize_selector(&once).unwrap(), once);
}

#[test]
fn test_normalize_requires_which() {
    assert!(matches!(
        normalize_selector("Ctrl+Shift"),
        Err(EventError::InvalidSelector { .. })
    ));
    assert!(normalize_selector("").is_err());
    assert!(normalize_selector(" + ").is_err());
}

#[test]
fn test_format_modifiers() {
    let set = ModifierSet::for_which("Button1").with_ctrl(true).with_alt(true);
    assert_eq!(format_modifiers(&set).unwrap(), "alt+ctrl+button1");
}

#[test]
fn test_format_modifiers_without_which_fails() {
    let set = ModifierSet::new().with_meta(true);
    assert!(format_modifiers(&set).is_err());

    let empty_which = ModifierSet {
        which: Some(String::new()),
        ..ModifierSet::default()
    };
    assert!(format_modifiers(&empty_which).is_err());
}

#[test]
fn test_modifier_set_from_str() {
    let set: ModifierSet = "Shift+Tab".parse().unwrap();
    assert!(set.shift);
    assert_eq!(set.which.as_deref(), Some("tab"));

    assert!("Shift".parse::<ModifierSet>().is_err());
}
