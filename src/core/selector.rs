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


//! src/core/selector.rs
//!
//! Modifier selector grammar
//!
//! A selector is a `+`-joined list of modifier names and one key or button
//! token, e.g. `Ctrl+Space` or `shift+button1`. Parsing is case-insensitive
//! and ignores surrounding whitespace. Formatting always emits the canonical
//! form: active modifiers in ALT, CTRL, SHIFT, META order followed by the key,
//! all lower-case.
//!
//! When several non-modifier tokens appear, the last one wins
//! (`Space+Enter` parses to `enter`).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::char,
    combinator::{all_consuming, value},
    multi::separated_list1,
    IResult, Parser,
};

use crate::core::error::{EventError, Result};
use crate::core::types::{Modifier, ModifierSet};

/// Recognise a single, already lower-cased modifier token
///
/// The whole input must be a modifier name; `ctrlx` is not a modifier.
pub fn parse_modifier_token(input: &str) -> IResult<&str, Modifier> {
    all_consuming(alt((
        value(Modifier::Alt, tag("alt")),
        value(Modifier::Ctrl, tag("ctrl")),
        value(Modifier::Shift, tag("shift")),
        value(Modifier::Meta, tag("meta")),
    )))
    .parse(input)
}

/// Split a selector into its raw `+`-separated tokens
///
/// Tokens are returned untrimmed and may be empty (`ctrl++space`).
pub fn parse_selector_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('+'), take_while(|c: char| c != '+'))).parse(input)
}

/// Parse a selector string into its modifier flags and key token
///
/// Empty tokens are skipped, so `space+` parses like `space`.
///
/// # Example
/// ```
/// use widget_events::core::selector::parse_modifiers;
///
/// let set = parse_modifiers(" Shift + KeyD + Ctrl ");
/// assert!(set.shift && set.ctrl);
/// assert_eq!(set.which.as_deref(), Some("keyd"));
/// ```
pub fn parse_modifiers(input: &str) -> ModifierSet {
    let mut set = ModifierSet::new();
    let tokens = match parse_selector_tokens(input) {
        Ok((_, tokens)) => tokens,
        Err(_) => vec![input],
    };

    for part in tokens {
        let token = part.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }

        let modifier = parse_modifier_token(&token).ok().map(|(_, m)| m);
        match modifier {
            Some(modifier) => set.set(modifier, true),
            None => set.which = Some(token),
        }
    }

    set
}

/// Format a modifier set into its canonical selector string
///
/// Fails when the set has no key or button token.
pub fn format_modifiers(set: &ModifierSet) -> Result<String> {
    match set.which.as_deref() {
        Some(which) if !which.is_empty() => Ok(set.to_string()),
        _ => Err(EventError::invalid_selector(
            &set.to_string(),
            "selector has no key or button",
        )),
    }
}

/// Normalise a selector so that order and case no longer matter
///
/// ```
/// use widget_events::core::selector::normalize_selector;
///
/// assert_eq!(normalize_selector("Meta+Space+Shift")?, "shift+meta+space");
/// # Ok::<(), widget_events::EventError>(())
/// ```
pub fn normalize_selector(input: &str) -> Result<String> {
    let set = parse_modifiers(input);
    if set.which.is_none() {
        return Err(EventError::invalid_selector(input, "selector has no key or button"));
    }
    format_modifiers(&set)
}
