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


//! src/emitter/registry.rs
//!
//! Reference-counted native listener registry
//!
//! One registry exists per wrapped node. For every (native event, capture)
//! pair it keeps a single `ListenerRegistration`: the number of logical
//! subscriptions sharing it and the dispatcher attached to the node.
//!
//! # Invariant
//! For a given node, at most one native listener exists per
//! (native event, capture) pair, however many logical subscribers share it.
//! The platform add primitive runs on the 0 -> 1 transition only and the
//! remove primitive on the 1 -> 0 transition only.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::error::{EventError, Result};
use crate::core::types::CAPTURE_SUFFIX;
use crate::dom::{Dispatcher, EventTarget};

/// Bookkeeping for one attached native listener
#[derive(Clone)]
pub struct ListenerRegistration {
    pub native_event: String,
    pub capture: bool,
    pub reference_count: usize,
    pub dispatcher: Dispatcher,
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("native_event", &self.native_event)
            .field("capture", &self.capture)
            .field("reference_count", &self.reference_count)
            .finish_non_exhaustive()
    }
}

/// Lookup key for a (native event, capture) pair, e.g. `click-capture`
pub fn registration_key(native_event: &str, capture: bool) -> String {
    if capture {
        format!("{}{}", native_event, CAPTURE_SUFFIX)
    } else {
        native_event.to_string()
    }
}

/// Native event names are single DOM identifiers
fn validate_event_name(native_event: &str) -> Result<()> {
    if native_event.is_empty()
        || native_event.contains(|c: char| c.is_whitespace() || c == ':')
    {
        return Err(EventError::invalid_selector(
            native_event,
            "not a valid native event name",
        ));
    }
    Ok(())
}

fn detach(target: &dyn EventTarget, registration: &ListenerRegistration) {
    target.remove_event_listener(
        &registration.native_event,
        &registration.dispatcher,
        registration.capture,
    );
    debug!(
        event = %registration.native_event,
        capture = registration.capture,
        "detached native listener"
    );
}

/// Per-node table of attached native listeners
pub struct NativeListenerRegistry {
    target: Rc<dyn EventTarget>,
    registrations: HashMap<String, ListenerRegistration>,
}

impl NativeListenerRegistry {
    pub fn new(target: Rc<dyn EventTarget>) -> Self {
        Self {
            target,
            registrations: HashMap::new(),
        }
    }

    /// Fail with `InvalidTarget` when the node is no longer connected
    ///
    /// Callers that change their own bookkeeping before releasing check
    /// this first so a failed release leaves nothing half-done.
    pub fn check_target(&self) -> Result<()> {
        if self.target.is_connected() {
            Ok(())
        } else {
            Err(EventError::InvalidTarget(
                "node is no longer connected".to_string(),
            ))
        }
    }

    /// Take a reference on the native listener for `(native_event, capture)`
    ///
    /// On the first reference `bind` creates the dispatcher and the
    /// platform add primitive is called exactly once. Later calls only bump
    /// the reference count and return the existing dispatcher.
    pub fn acquire<F>(&mut self, native_event: &str, capture: bool, bind: F) -> Result<Dispatcher>
    where
        F: FnOnce() -> Dispatcher,
    {
        validate_event_name(native_event)?;
        self.check_target()?;

        let key = registration_key(native_event, capture);
        if let Some(registration) = self.registrations.get_mut(&key) {
            registration.reference_count += 1;
            trace!(%key, count = registration.reference_count, "native listener reused");
            return Ok(Rc::clone(&registration.dispatcher));
        }

        let dispatcher = bind();
        self.target.add_event_listener(native_event, &dispatcher, capture);
        debug!(event = native_event, capture, "attached native listener");

        self.registrations.insert(
            key,
            ListenerRegistration {
                native_event: native_event.to_string(),
                capture,
                reference_count: 1,
                dispatcher: Rc::clone(&dispatcher),
            },
        );
        Ok(dispatcher)
    }

    /// Drop one reference; detach the native listener when none remain
    ///
    /// Releasing a pair that holds no registration is an accounting error
    /// and is reported as `NotRegistered`.
    pub fn release(&mut self, native_event: &str, capture: bool) -> Result<()> {
        validate_event_name(native_event)?;
        self.check_target()?;

        let key = registration_key(native_event, capture);
        let Some(registration) = self.registrations.get_mut(&key) else {
            return Err(EventError::NotRegistered(key));
        };

        registration.reference_count = registration.reference_count.saturating_sub(1);
        trace!(%key, count = registration.reference_count, "native listener released");

        if registration.reference_count == 0 {
            if let Some(registration) = self.registrations.remove(&key) {
                detach(self.target.as_ref(), &registration);
            }
        }
        Ok(())
    }

    /// Detach native listeners regardless of reference counts
    ///
    /// With a name, both capture variants of that event are removed;
    /// without one, every registration of the node is removed.
    pub fn release_all(&mut self, native_event: Option<&str>) -> Result<()> {
        self.check_target()?;

        match native_event {
            Some(native_event) => {
                validate_event_name(native_event)?;
                for capture in [false, true] {
                    let key = registration_key(native_event, capture);
                    if let Some(registration) = self.registrations.remove(&key) {
                        detach(self.target.as_ref(), &registration);
                    }
                }
            }
            None => {
                let registrations = std::mem::take(&mut self.registrations);
                for registration in registrations.values() {
                    detach(self.target.as_ref(), registration);
                }
            }
        }
        Ok(())
    }

    /// Current reference count of a pair (0 when unregistered)
    pub fn reference_count(&self, native_event: &str, capture: bool) -> usize {
        self.registrations
            .get(&registration_key(native_event, capture))
            .map(|r| r.reference_count)
            .unwrap_or(0)
    }

    pub fn is_registered(&self, native_event: &str, capture: bool) -> bool {
        self.registrations
            .contains_key(&registration_key(native_event, capture))
    }

    /// Number of attached native listeners
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Snapshot of all registrations, sorted by key
    pub fn registrations(&self) -> Vec<ListenerRegistration> {
        let mut keys: Vec<&String> = self.registrations.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| self.registrations.get(key).cloned())
            .collect()
    }

    pub fn target(&self) -> &Rc<dyn EventTarget> {
        &self.target
    }
}
