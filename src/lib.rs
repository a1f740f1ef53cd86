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


//! Widget Events
//!
//! Semantic event subscriptions for DOM-backed widgets. Callers subscribe to
//! names like `mouse:click` or `key:press:ctrl+space` instead of raw
//! platform events, and each node carries at most one native listener per
//! (native event, capture) pair no matter how many subscribers exist.
//!
//! # Features
//!
//! - **Selector Grammar:** Order- and case-independent modifier selectors
//! - **Event Namespace:** Static category/action -> native event table
//! - **Shared Native Listeners:** Reference-counted attach and detach
//! - **Fan-out:** One native firing reaches generic and qualified subscribers
//! - **Logical Events:** Non-DOM names pass straight through
//!
//! # Architecture
//!
//! - **`core`:** Selector grammar, namespace table, selector compiler
//! - **`dom`:** Platform boundary (`EventTarget`, native event shapes)
//! - **`emitter`:** Native listener registry, emission router, `WidgetEvents`
//! - **`config`:** Emitter settings
//!
//! # Examples
//!
//! ## Normalising a modifier selector
//!
//! ```
//! use widget_events::normalize_selector;
//!
//! assert_eq!(normalize_selector("Space+Shift+Ctrl")?, "ctrl+shift+space");
//! # Ok::<(), widget_events::EventError>(())
//! ```
//!
//! ## Subscribing on a node
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use widget_events::dom::{MemoryTarget, MouseEvent};
//! use widget_events::{Listener, WidgetEvents};
//!
//! let target = Rc::new(MemoryTarget::new());
//! let events = WidgetEvents::new(target.clone())?;
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&clicks);
//! events.subscribe("mouse:click:ctrl+button0", &Listener::new(move |_| {
//!     counter.set(counter.get() + 1);
//! }), false)?;
//!
//! target.dispatch(MouseEvent::new("click", 0).with_ctrl(true));
//! target.dispatch(MouseEvent::new("click", 0));
//! assert_eq!(clicks.get(), 1);
//! # Ok::<(), widget_events::EventError>(())
//! ```

pub mod config;
pub mod core;
pub mod dom;
pub mod emitter;

// Re-export commonly used types for convenience
pub use crate::config::EmitterConfig;
pub use crate::core::{
    compile, list_actions, list_categories, normalize_selector, resolve_native_event_name,
    EventError, EventSelector, EventSource, Modifier, ModifierSet, Result,
};
pub use crate::dom::{EventArg, EventTarget, NativeEvent, NodeType};
pub use crate::emitter::{Listener, WidgetEvents};
