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


//! src/dom/memory.rs
//!
//! In-process event target
//!
//! `MemoryTarget` stands in for a DOM element: it stores attached native
//! listeners, counts add/remove calls, and can fire synthetic events at
//! them. Capture listeners run before bubble listeners, as in the target
//! phase of DOM dispatch.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{Dispatcher, EventTarget, NativeEvent, NodeType};

#[derive(Clone)]
struct AttachedListener {
    capture: bool,
    dispatcher: Dispatcher,
}

/// Element stand-in that records every listener primitive call
pub struct MemoryTarget {
    node_type: NodeType,
    connected: Cell<bool>,
    listeners: RefCell<HashMap<String, Vec<AttachedListener>>>,
    add_calls: Cell<usize>,
    remove_calls: Cell<usize>,
}

impl MemoryTarget {
    /// Create a connected element node
    pub fn new() -> Self {
        Self::with_node_type(NodeType::Element)
    }

    /// Create a connected node of any kind
    pub fn with_node_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            connected: Cell::new(true),
            listeners: RefCell::new(HashMap::new()),
            add_calls: Cell::new(0),
            remove_calls: Cell::new(0),
        }
    }

    /// Simulate removal of the node from the document
    pub fn disconnect(&self) {
        self.connected.set(false);
    }

    /// Re-insert the node; attached listeners are kept
    pub fn reconnect(&self) {
        self.connected.set(true);
    }

    /// Number of `add_event_listener` calls so far
    pub fn add_calls(&self) -> usize {
        self.add_calls.get()
    }

    /// Number of `remove_event_listener` calls that removed a listener
    pub fn remove_calls(&self) -> usize {
        self.remove_calls.get()
    }

    /// Number of currently attached native listeners
    pub fn attached_count(&self) -> usize {
        self.listeners.borrow().values().map(Vec::len).sum()
    }

    pub fn is_attached(&self, event: &str, capture: bool) -> bool {
        self.listeners
            .borrow()
            .get(event)
            .map(|attached| attached.iter().any(|l| l.capture == capture))
            .unwrap_or(false)
    }

    /// Fire a native event at this node
    ///
    /// Returns the number of native listeners invoked. The listener list is
    /// copied first, so listeners may add or remove listeners while running.
    pub fn dispatch(&self, event: impl NativeEvent) -> usize {
        self.dispatch_rc(Rc::new(event))
    }

    pub fn dispatch_rc(&self, event: Rc<dyn NativeEvent>) -> usize {
        let mut snapshot: Vec<AttachedListener> = self
            .listeners
            .borrow()
            .get(event.event_type())
            .cloned()
            .unwrap_or_default();
        // Capture listeners first; sort is stable so registration order holds
        snapshot.sort_by_key(|l| !l.capture);

        for listener in &snapshot {
            (listener.dispatcher)(Rc::clone(&event));
        }
        snapshot.len()
    }
}

impl Default for MemoryTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTarget for MemoryTarget {
    fn node_type(&self) -> NodeType {
        self.node_type
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn add_event_listener(&self, event: &str, listener: &Dispatcher, capture: bool) {
        self.add_calls.set(self.add_calls.get() + 1);
        let mut listeners = self.listeners.borrow_mut();
        let attached = listeners.entry(event.to_string()).or_default();

        // The DOM ignores exact duplicates
        if attached
            .iter()
            .any(|l| l.capture == capture && Rc::ptr_eq(&l.dispatcher, listener))
        {
            return;
        }
        attached.push(AttachedListener {
            capture,
            dispatcher: Rc::clone(listener),
        });
    }

    fn remove_event_listener(&self, event: &str, listener: &Dispatcher, capture: bool) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(attached) = listeners.get_mut(event) else {
            return;
        };

        if let Some(pos) = attached
            .iter()
            .position(|l| l.capture == capture && Rc::ptr_eq(&l.dispatcher, listener))
        {
            attached.remove(pos);
            self.remove_calls.set(self.remove_calls.get() + 1);
            if attached.is_empty() {
                listeners.remove(event);
            }
        }
    }
}
