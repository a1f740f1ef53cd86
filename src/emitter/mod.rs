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


//! src/emitter/mod.rs
//!
//! Semantic event emitter for one DOM node
//!
//! `WidgetEvents` is the surface the element layer uses: subscribe to
//! `mouse:click` or `key:press:ctrl+space`, unsubscribe, emit. Underneath:
//! - `registry`: one reference-counted native listener per (event, capture)
//! - `router`: re-emits each native firing under generic and qualified names
//! - `listeners`: logical listeners bucketed by subscription key
//!
//! All calls run synchronously on the calling thread. Emission works on a
//! snapshot of the listener list, so handlers may subscribe or unsubscribe
//! while running; the change applies to later emissions.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use widget_events::dom::{KeyboardEvent, MemoryTarget};
//! use widget_events::{Listener, WidgetEvents};
//!
//! let target = Rc::new(MemoryTarget::new());
//! let events = WidgetEvents::new(target.clone())?;
//!
//! let on_save = Listener::new(|args| println!("save: {:?}", args[0]));
//! events.subscribe("key:down:ctrl+keys", &on_save, false)?;
//! events.subscribe("key:down", &Listener::new(|_| {}), false)?;
//! assert_eq!(target.add_calls(), 1);
//!
//! target.dispatch(KeyboardEvent::new("keydown", "KeyS").with_ctrl(true));
//! # Ok::<(), widget_events::EventError>(())
//! ```

pub mod listeners;
pub mod registry;
pub mod router;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, error, trace, warn};

use crate::config::EmitterConfig;
use crate::core::compiler::compile;
use crate::core::error::{EventError, Result};
use crate::core::namespace;
use crate::dom::{Dispatcher, EventArg, EventTarget, NativeEvent};

pub use listeners::Listener;
pub use registry::{registration_key, ListenerRegistration, NativeListenerRegistry};
pub use router::{EmissionRouter, EventFamily, KeyboardFamily, MouseFamily};

use listeners::{ListenerEntry, ListenerStore};

/// State shared between the emitter handle and its native dispatchers
struct Inner {
    target: Rc<dyn EventTarget>,
    config: EmitterConfig,
    registry: RefCell<NativeListenerRegistry>,
    listeners: RefCell<ListenerStore>,
    router: RefCell<EmissionRouter>,
    warned: RefCell<HashSet<String>>,
}

impl Inner {
    /// Run every listener of one subscription key
    fn emit_key(&self, key: &str, args: &[EventArg]) -> Result<bool> {
        let (snapshot, expired) = self.listeners.borrow_mut().take_snapshot(key);

        trace!(key, listeners = snapshot.len(), "emit");
        for listener in &snapshot {
            listener.call(args);
        }

        // Expired `once` entries have run; a failed release leaves their
        // native reference for `release_all` to clear
        self.release_entries(&expired)?;
        Ok(!snapshot.is_empty())
    }

    /// Drop the native references held by removed entries
    fn release_entries(&self, entries: &[ListenerEntry]) -> Result<()> {
        for entry in entries {
            if let Some((native, capture)) = entry.native {
                self.registry.borrow_mut().release(native, capture)?;
            }
        }
        Ok(())
    }

    /// Entry point of every native dispatcher
    fn dispatch_native(&self, native: &'static str, capture: bool, event: Rc<dyn NativeEvent>) {
        let keys = self.router.borrow().route_native(native, capture, &*event);
        debug!(event = native, capture, ?keys, "native event fired");

        let args = [EventArg::Native(event)];
        for key in keys {
            // Nobody upstream of a native dispatch can receive the error
            if let Err(err) = self.emit_key(&key, &args) {
                error!(%key, %err, "native dispatch failed");
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if !self.config.release_on_drop {
            return;
        }
        let registry = self.registry.get_mut();
        if registry.is_empty() {
            return;
        }
        if let Err(err) = registry.release_all(None) {
            warn!(%err, "native listeners left attached on drop");
        }
    }
}

/// Dispatcher closure for one (native event, capture) pair
///
/// Holds a weak reference so a dropped emitter never runs handlers.
fn bind_dispatcher(inner: Weak<Inner>, native: &'static str, capture: bool) -> Dispatcher {
    Rc::new(move |event: Rc<dyn NativeEvent>| {
        if let Some(inner) = inner.upgrade() {
            inner.dispatch_native(native, capture, event);
        }
    })
}

/// Semantic event emitter bound to one element
pub struct WidgetEvents {
    inner: Rc<Inner>,
}

impl WidgetEvents {
    /// Wrap an element with the default configuration
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidTarget` unless the target is an element.
    pub fn new(target: Rc<dyn EventTarget>) -> Result<Self> {
        Self::with_config(target, EmitterConfig::default())
    }

    pub fn with_config(target: Rc<dyn EventTarget>, config: EmitterConfig) -> Result<Self> {
        let node_type = target.node_type();
        if !node_type.is_element() {
            return Err(EventError::InvalidTarget(format!(
                "expected an element node, got {:?}",
                node_type
            )));
        }

        Ok(Self {
            inner: Rc::new(Inner {
                registry: RefCell::new(NativeListenerRegistry::new(Rc::clone(&target))),
                target,
                config,
                listeners: RefCell::new(ListenerStore::new()),
                router: RefCell::new(EmissionRouter::new()),
                warned: RefCell::new(HashSet::new()),
            }),
        })
    }

    /// Subscribe `listener` to a semantic event
    ///
    /// DOM-backed selectors take a reference on the node's native listener
    /// for `(native event, capture)`, attaching it on first use.
    pub fn subscribe(&self, selector: &str, listener: &Listener, capture: bool) -> Result<()> {
        self.add_listener(selector, listener, capture, false)
    }

    /// Like `subscribe`, but the listener is removed after its first call
    pub fn once(&self, selector: &str, listener: &Listener, capture: bool) -> Result<()> {
        self.add_listener(selector, listener, capture, true)
    }

    /// Listener priority is not offered; subscription order is dispatch order
    pub fn prepend_listener(&self, _selector: &str, _listener: &Listener, _capture: bool) -> Result<()> {
        Err(EventError::UnsupportedOperation(
            "prepend_listener: listeners always run in subscription order".to_string(),
        ))
    }

    fn add_listener(&self, selector: &str, listener: &Listener, capture: bool, once: bool) -> Result<()> {
        let compiled = compile(selector)?;
        let key = compiled.to_key(capture);
        let native = compiled.native_event();

        if let Some(native) = native {
            let weak = Rc::downgrade(&self.inner);
            self.inner
                .registry
                .borrow_mut()
                .acquire(native, capture, || bind_dispatcher(weak, native, capture))?;
        }

        let count = self.inner.listeners.borrow_mut().push(
            key.clone(),
            ListenerEntry {
                listener: listener.clone(),
                once,
                native: native.map(|native| (native, capture)),
            },
        );
        debug!(%key, once, "subscribed");
        self.check_listener_leak(&key, count);
        Ok(())
    }

    fn check_listener_leak(&self, key: &str, count: usize) {
        let config = &self.inner.config;
        if config.exceeds_max_listeners(count) && self.inner.warned.borrow_mut().insert(key.to_string()) {
            warn!(
                key,
                count,
                max_listeners = config.max_listeners,
                "possible listener leak: too many listeners on one event"
            );
        }
    }

    /// Remove one subscription of `listener`
    ///
    /// Passing `None` is a no-op; bulk removal goes through
    /// `unsubscribe_all`. When the listener was subscribed several times,
    /// the most recent subscription is removed. On a disconnected node a
    /// DOM-backed selector fails with `InvalidTarget` and nothing changes.
    pub fn unsubscribe(&self, selector: &str, listener: Option<&Listener>, capture: bool) -> Result<()> {
        let Some(listener) = listener else {
            trace!(selector, "unsubscribe without listener ignored");
            return Ok(());
        };

        let compiled = compile(selector)?;
        if compiled.is_native() {
            self.inner.registry.borrow().check_target()?;
        }

        let key = compiled.to_key(capture);
        let removed = self.inner.listeners.borrow_mut().remove_last(&key, listener);
        if let Some(entry) = removed {
            debug!(%key, "unsubscribed");
            self.inner.release_entries(std::slice::from_ref(&entry))?;
        }
        Ok(())
    }

    /// Remove listeners in bulk
    ///
    /// With a selector, every listener on that exact event is removed, in
    /// both capture variants. Without one, every listener is removed and
    /// every native listener is detached. Fails without removing anything
    /// when native listeners are involved and the node is disconnected.
    pub fn unsubscribe_all(&self, selector: Option<&str>) -> Result<()> {
        let Some(selector) = selector else {
            let mut registry = self.inner.registry.borrow_mut();
            if !registry.is_empty() {
                registry.check_target()?;
            }

            let removed = self.inner.listeners.borrow_mut().drain_all();
            debug!(listeners = removed.len(), "unsubscribed all");
            if registry.is_empty() {
                return Ok(());
            }
            return registry.release_all(None);
        };

        let compiled = compile(selector)?;
        if compiled.is_native() {
            self.inner.registry.borrow().check_target()?;
        }

        let mut removed = self.inner.listeners.borrow_mut().remove_key(&compiled.to_key(false));
        if compiled.is_native() {
            removed.extend(self.inner.listeners.borrow_mut().remove_key(&compiled.to_key(true)));
        }
        debug!(selector, listeners = removed.len(), "unsubscribed event");
        self.inner.release_entries(&removed)
    }

    /// Emit a semantic event in the bubbling phase
    ///
    /// Returns whether any listener ran. See `emit_with_capture`.
    pub fn emit(&self, name: &str, args: &[EventArg]) -> Result<bool> {
        self.emit_with_capture(name, false, args)
    }

    /// Emit a semantic event
    ///
    /// Logical names go straight to the listeners keyed by the exact name.
    /// A DOM-backed name without a modifier selector whose first argument
    /// is a native event is routed: generic listeners run first, then those
    /// matching the event's modifier selector.
    pub fn emit_with_capture(&self, name: &str, capture: bool, args: &[EventArg]) -> Result<bool> {
        let compiled = compile(name)?;
        if !compiled.is_native() {
            return self.inner.emit_key(name, args);
        }

        if compiled.modifier_selector().is_none() {
            if let Some(EventArg::Native(event)) = args.first() {
                let keys = self.inner.router.borrow().route(&compiled, capture, &**event);
                let mut delivered = false;
                for key in keys {
                    delivered |= self.inner.emit_key(&key, args)?;
                }
                return Ok(delivered);
            }
        }

        self.inner.emit_key(&compiled.to_key(capture), args)
    }

    /// Add a native event family adapter to this emitter's router
    pub fn register_family(&self, family: impl EventFamily + 'static) {
        self.inner.router.borrow_mut().register_family(family);
    }

    /// Number of listeners on one subscription
    pub fn listener_count(&self, selector: &str, capture: bool) -> Result<usize> {
        let key = compile(selector)?.to_key(capture);
        Ok(self.inner.listeners.borrow().count(&key))
    }

    /// Subscription keys that currently have listeners, sorted
    pub fn event_names(&self) -> Vec<String> {
        self.inner.listeners.borrow().keys()
    }

    /// Number of native listeners attached to the node
    pub fn native_listener_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Reference count of one (native event, capture) pair
    pub fn native_reference_count(&self, native_event: &str, capture: bool) -> usize {
        self.inner.registry.borrow().reference_count(native_event, capture)
    }

    pub fn native_registrations(&self) -> Vec<ListenerRegistration> {
        self.inner.registry.borrow().registrations()
    }

    pub fn target(&self) -> Rc<dyn EventTarget> {
        Rc::clone(&self.inner.target)
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.inner.config
    }

    /// See `core::namespace::list_categories`
    pub fn list_categories() -> Vec<&'static str> {
        namespace::list_categories()
    }

    /// See `core::namespace::list_actions`
    pub fn list_actions(category: &str) -> Vec<String> {
        namespace::list_actions(category)
    }

    /// See `core::namespace::resolve_native_event_name`
    pub fn resolve_native_event_name(category: &str, action: &str) -> Option<&'static str> {
        namespace::resolve_native_event_name(category, action)
    }
}

impl fmt::Debug for WidgetEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetEvents")
            .field("events", &self.event_names())
            .field("native_listeners", &self.native_listener_count())
            .field("config", &self.inner.config)
            .finish()
    }
}
