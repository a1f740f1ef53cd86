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


//! src/emitter/listeners.rs
//!
//! Logical listener storage
//!
//! Listeners are bucketed by subscription key. Each entry remembers which
//! native registration it holds a reference on, so removing it can release
//! exactly that reference.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::EventArg;

/// A logical event handler
///
/// Cloning shares the same handler. Identity (for unsubscribe) is pointer
/// identity of the shared closure.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&[EventArg])>);

impl Listener {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[EventArg]) + 'static,
    {
        Self(Rc::new(handler))
    }

    pub fn call(&self, args: &[EventArg]) {
        (self.0)(args)
    }

    /// Whether both handles share one handler
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// One subscription in a bucket
#[derive(Clone, Debug)]
pub(crate) struct ListenerEntry {
    pub listener: Listener,
    pub once: bool,
    /// Native registration this entry holds a reference on
    pub native: Option<(&'static str, bool)>,
}

/// Subscription key -> listeners in subscription order
#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    buckets: HashMap<String, Vec<ListenerEntry>>,
}

impl ListenerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; returns the bucket size afterwards
    pub fn push(&mut self, key: String, entry: ListenerEntry) -> usize {
        let bucket = self.buckets.entry(key).or_default();
        bucket.push(entry);
        bucket.len()
    }

    /// Remove the most recently added entry for `listener`
    pub fn remove_last(&mut self, key: &str, listener: &Listener) -> Option<ListenerEntry> {
        let bucket = self.buckets.get_mut(key)?;
        let pos = bucket.iter().rposition(|e| e.listener.ptr_eq(listener))?;
        let entry = bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        Some(entry)
    }

    /// Remove a whole bucket
    pub fn remove_key(&mut self, key: &str) -> Vec<ListenerEntry> {
        self.buckets.remove(key).unwrap_or_default()
    }

    /// Remove every bucket
    pub fn drain_all(&mut self) -> Vec<ListenerEntry> {
        self.buckets.drain().flat_map(|(_, bucket)| bucket).collect()
    }

    /// Copy of a bucket for an in-flight emission
    ///
    /// `once` entries are removed from the store here, before any handler
    /// runs; they are returned in the second list so their native
    /// references can be released.
    pub fn take_snapshot(&mut self, key: &str) -> (Vec<Listener>, Vec<ListenerEntry>) {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return (Vec::new(), Vec::new());
        };

        let snapshot: Vec<Listener> = bucket.iter().map(|e| e.listener.clone()).collect();
        let (expired, kept): (Vec<_>, Vec<_>) = bucket.drain(..).partition(|e| e.once);
        *bucket = kept;
        if bucket.is_empty() {
            self.buckets.remove(key);
        }
        (snapshot, expired)
    }

    pub fn count(&self, key: &str) -> usize {
        self.buckets.get(key).map(Vec::len).unwrap_or(0)
    }

    /// Subscription keys with at least one listener, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.buckets.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
