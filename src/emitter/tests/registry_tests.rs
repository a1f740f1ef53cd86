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


//! Native listener registry tests
//!
//! The registry must call the platform add/remove primitives exactly once
//! per (native event, capture) pair, however many references are taken.

use std::rc::Rc;

use crate::core::EventError;
use crate::dom::{Dispatcher, EventTarget, MemoryTarget, NativeEvent};
use crate::emitter::registry::*;

/// Helper to build a registry over a fresh element
fn setup() -> (Rc<MemoryTarget>, NativeListenerRegistry) {
    let target = Rc::new(MemoryTarget::new());
    let registry = NativeListenerRegistry::new(target.clone());
    (target, registry)
}

fn noop_dispatcher() -> Dispatcher {
    Rc::new(|_event: Rc<dyn NativeEvent>| {})
}

#[test]
fn test_registration_key() {
    assert_eq!(registration_key("click", false), "click");
    assert_eq!(registration_key("click", true), "click-capture");
}

#[test]
fn test_first_acquire_attaches() {
    let (target, mut registry) = setup();

    registry.acquire("click", false, noop_dispatcher).unwrap();

    assert_eq!(target.add_calls(), 1);
    assert!(target.is_attached("click", false));
    assert_eq!(registry.reference_count("click", false), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_acquire_reuses_dispatcher() {
    let (target, mut registry) = setup();

    let first = registry.acquire("click", false, noop_dispatcher).unwrap();
    let second = registry
        .acquire("click", false, || panic!("dispatcher must not be rebuilt"))
        .unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(target.add_calls(), 1);
    assert_eq!(registry.reference_count("click", false), 2);
}

#[test]
fn test_idempotent_native_registration() {
    for n in 1..=100 {
        let (target, mut registry) = setup();

        for _ in 0..n {
            registry.acquire("click", false, noop_dispatcher).unwrap();
        }
        for _ in 0..n {
            registry.release("click", false).unwrap();
        }

        assert_eq!(target.add_calls(), 1, "n = {}", n);
        assert_eq!(target.remove_calls(), 1, "n = {}", n);
        assert!(registry.is_empty());
        assert_eq!(target.attached_count(), 0);
    }
}

#[test]
fn test_release_keeps_listener_until_zero() {
    let (target, mut registry) = setup();

    registry.acquire("keydown", false, noop_dispatcher).unwrap();
    registry.acquire("keydown", false, noop_dispatcher).unwrap();
    registry.release("keydown", false).unwrap();

    assert!(target.is_attached("keydown", false));
    assert_eq!(target.remove_calls(), 0);

    registry.release("keydown", false).unwrap();
    assert!(!target.is_attached("keydown", false));
    assert_eq!(target.remove_calls(), 1);
}

#[test]
fn test_capture_flag_isolation() {
    let (target, mut registry) = setup();

    registry.acquire("click", false, noop_dispatcher).unwrap();
    registry.acquire("click", true, noop_dispatcher).unwrap();
    assert_eq!(target.add_calls(), 2);
    assert_eq!(registry.len(), 2);

    registry.release("click", true).unwrap();
    assert!(target.is_attached("click", false));
    assert!(!target.is_attached("click", true));
    assert_eq!(registry.reference_count("click", false), 1);
}

#[test]
fn test_release_unregistered_fails() {
    let (target, mut registry) = setup();

    assert_eq!(
        registry.release("click", false),
        Err(EventError::NotRegistered("click".to_string()))
    );

    registry.acquire("click", false, noop_dispatcher).unwrap();
    registry.release("click", false).unwrap();
    assert!(registry.release("click", false).is_err());
    assert_eq!(target.remove_calls(), 1);
}

#[test]
fn test_release_all_for_one_event() {
    let (target, mut registry) = setup();

    registry.acquire("click", false, noop_dispatcher).unwrap();
    registry.acquire("click", false, noop_dispatcher).unwrap();
    registry.acquire("click", true, noop_dispatcher).unwrap();
    registry.acquire("keyup", false, noop_dispatcher).unwrap();

    registry.release_all(Some("click")).unwrap();

    assert_eq!(target.remove_calls(), 2);
    assert!(!registry.is_registered("click", false));
    assert!(!registry.is_registered("click", true));
    assert!(registry.is_registered("keyup", false));
}

#[test]
fn test_release_all() {
    let (target, mut registry) = setup();

    registry.acquire("click", false, noop_dispatcher).unwrap();
    registry.acquire("click", true, noop_dispatcher).unwrap();
    registry.acquire("keyup", false, noop_dispatcher).unwrap();

    registry.release_all(None).unwrap();

    assert!(registry.is_empty());
    assert_eq!(target.remove_calls(), target.add_calls());
    assert_eq!(target.attached_count(), 0);
}

#[test]
fn test_disconnected_target_fails_loudly() {
    let (target, mut registry) = setup();
    registry.acquire("click", false, noop_dispatcher).unwrap();

    target.disconnect();

    assert!(matches!(
        registry.acquire("click", false, noop_dispatcher),
        Err(EventError::InvalidTarget(_))
    ));
    assert!(matches!(
        registry.release("click", false),
        Err(EventError::InvalidTarget(_))
    ));
    assert!(registry.release_all(None).is_err());
    assert_eq!(registry.reference_count("click", false), 1);
}

#[test]
fn test_check_target_follows_connection() {
    let (target, registry) = setup();
    assert!(registry.check_target().is_ok());

    target.disconnect();
    assert!(matches!(registry.check_target(), Err(EventError::InvalidTarget(_))));

    target.reconnect();
    assert!(registry.check_target().is_ok());
}

#[test]
fn test_malformed_event_name_fails() {
    let (target, mut registry) = setup();

    for name in ["", "key press", "mouse:click"] {
        assert!(matches!(
            registry.acquire(name, false, noop_dispatcher),
            Err(EventError::InvalidSelector { .. })
        ));
    }
    assert!(registry.release("", false).is_err());
    assert_eq!(target.add_calls(), 0);
}

#[test]
fn test_registrations_snapshot() {
    let (target, mut registry) = setup();

    registry.acquire("scroll", false, noop_dispatcher).unwrap();
    registry.acquire("click", true, noop_dispatcher).unwrap();
    registry.acquire("click", true, noop_dispatcher).unwrap();

    let registrations = registry.registrations();
    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[0].native_event, "click");
    assert!(registrations[0].capture);
    assert_eq!(registrations[0].reference_count, 2);
    assert_eq!(registrations[1].native_event, "scroll");
    assert!(target.is_connected());
}
