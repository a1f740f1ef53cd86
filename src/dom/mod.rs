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


//! src/dom/mod.rs
//!
//! Platform boundary
//!
//! The event layer never talks to a browser directly. The wrapping element
//! layer hands it an `EventTarget`, which supplies the add/remove listener
//! primitives, and native events arrive as `NativeEvent` trait objects.
//!
//! - `EventTarget`: node handle with add/remove listener primitives
//! - `NativeEvent`: a platform-delivered event (`KeyboardEvent`, `MouseEvent`, ...)
//! - `EventArg`: one element of a logical event payload
//! - `MemoryTarget`: in-process target used by tests and the CLI

pub mod memory;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

pub use memory::MemoryTarget;

/// Native listener bound to one (event name, capture) pair of a node
pub type Dispatcher = Rc<dyn Fn(Rc<dyn NativeEvent>)>;

/// DOM node kinds, numbered like `Node.nodeType`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

impl NodeType {
    pub fn is_element(&self) -> bool {
        matches!(self, NodeType::Element)
    }
}

/// Node handle supplied by the element layer
///
/// Implementations forward to the platform's listener primitives. The event
/// layer guarantees it never adds the same (event, capture) pair twice
/// without removing it first.
pub trait EventTarget {
    /// Kind of node behind this handle
    fn node_type(&self) -> NodeType;

    /// Whether the node still exists
    fn is_connected(&self) -> bool;

    fn add_event_listener(&self, event: &str, listener: &Dispatcher, capture: bool);

    fn remove_event_listener(&self, event: &str, listener: &Dispatcher, capture: bool);
}

/// A platform-delivered event
pub trait NativeEvent: Any + fmt::Debug {
    /// Native event name, e.g. `keypress`
    fn event_type(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Keyboard event shape (`keydown`, `keyup`, `keypress`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub event_type: String,
    /// Physical key code, e.g. `Space` or `KeyD`
    pub code: String,
    /// Produced character or key name, e.g. `d` or `Enter`
    pub key: String,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
}

impl KeyboardEvent {
    pub fn new(event_type: &str, code: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            code: code.to_string(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn with_alt(mut self, on: bool) -> Self {
        self.alt_key = on;
        self
    }

    pub fn with_ctrl(mut self, on: bool) -> Self {
        self.ctrl_key = on;
        self
    }

    pub fn with_shift(mut self, on: bool) -> Self {
        self.shift_key = on;
        self
    }

    pub fn with_meta(mut self, on: bool) -> Self {
        self.meta_key = on;
        self
    }
}

impl NativeEvent for KeyboardEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Pointer event shape (`click`, `mousedown`, `wheel`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MouseEvent {
    pub event_type: String,
    /// Button index as reported by the platform
    pub button: i16,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
}

impl MouseEvent {
    pub fn new(event_type: &str, button: i16) -> Self {
        Self {
            event_type: event_type.to_string(),
            button,
            ..Self::default()
        }
    }

    pub fn with_alt(mut self, on: bool) -> Self {
        self.alt_key = on;
        self
    }

    pub fn with_ctrl(mut self, on: bool) -> Self {
        self.ctrl_key = on;
        self
    }

    pub fn with_shift(mut self, on: bool) -> Self {
        self.shift_key = on;
        self
    }

    pub fn with_meta(mut self, on: bool) -> Self {
        self.meta_key = on;
        self
    }
}

impl NativeEvent for MouseEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Event without modifier state (`scroll`, `focus`, media events)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericEvent {
    pub event_type: String,
}

impl GenericEvent {
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
        }
    }
}

impl NativeEvent for GenericEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One element of a logical event payload
///
/// Native dispatch delivers a single `Native` argument. Logical emits can
/// carry any number of arbitrary values.
#[derive(Clone, Debug)]
pub enum EventArg {
    Native(Rc<dyn NativeEvent>),
    Value(Rc<dyn Any>),
}

impl EventArg {
    pub fn native(event: impl NativeEvent) -> Self {
        EventArg::Native(Rc::new(event))
    }

    pub fn value<T: Any>(value: T) -> Self {
        EventArg::Value(Rc::new(value))
    }

    pub fn as_native(&self) -> Option<&dyn NativeEvent> {
        match self {
            EventArg::Native(event) => Some(&**event),
            EventArg::Value(_) => None,
        }
    }

    /// Borrow the payload as a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            EventArg::Native(event) => event.as_any().downcast_ref::<T>(),
            EventArg::Value(value) => (**value).downcast_ref::<T>(),
        }
    }
}

impl From<KeyboardEvent> for EventArg {
    fn from(event: KeyboardEvent) -> Self {
        EventArg::native(event)
    }
}

impl From<MouseEvent> for EventArg {
    fn from(event: MouseEvent) -> Self {
        EventArg::native(event)
    }
}
