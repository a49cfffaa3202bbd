// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::Element;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A named event travelling to the listeners of one element.
#[derive(Debug, Clone)]
pub struct Event {
    kind:       String,
    is_trusted: bool,
    target:     Option<Element>,
}

impl Event {
    /// Creates a synthetic event, the kind a component dispatches itself.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind:       kind.into(),
            is_trusted: false,
            target:     None,
        }
    }

    /// Creates an event standing for direct user input.
    pub fn trusted(kind: impl Into<String>) -> Self {
        Self {
            is_trusted: true,
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> &str { &self.kind }

    pub const fn is_trusted(&self) -> bool { self.is_trusted }

    /// The element the event was dispatched on. `None` before dispatch.
    pub const fn target(&self) -> Option<&Element> { self.target.as_ref() }

    pub(crate) fn with_target(mut self, target: Element) -> Self {
        self.target = Some(target);
        self
    }
}

/// A callback with a stable identity.
///
/// Clones share the identity, so the handle kept at attach time is the one
/// that removes the listener later. Two listeners built from identical
/// closures are still distinct.
#[derive(Clone)]
pub struct EventListener {
    id:       u64,
    callback: Rc<dyn Fn(&Event)>,
}

impl EventListener {
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self {
            id:       NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed),
            callback: Rc::new(callback),
        }
    }

    pub const fn id(&self) -> u64 { self.id }

    pub(crate) fn call(&self, event: &Event) { (self.callback)(event) }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener").field("id", &self.id).finish()
    }
}
