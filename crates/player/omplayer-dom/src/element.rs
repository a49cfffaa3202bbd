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
    cell::RefCell,
    fmt::{self, Write as _},
    rc::{Rc, Weak},
};

use snafu::ensure;
use tracing::trace;

use crate::{
    Event, EventListener,
    err::{HierarchyRequestSnafu, NotAChildSnafu, Result},
};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

struct Node {
    tag:        String,
    attributes: RefCell<Vec<(String, String)>>,
    /// Live `value` property. `None` until written, then it no longer
    /// follows the `value` attribute.
    value:      RefCell<Option<String>>,
    text:       RefCell<String>,
    children:   RefCell<Vec<Element>>,
    parent:     RefCell<Weak<Node>>,
    listeners:  RefCell<Vec<(String, EventListener)>>,
}

/// Shared handle to a node in a headless document.
///
/// Cloning is cheap and yields the same node; equality is node identity.
#[derive(Clone)]
pub struct Element(Rc<Node>);

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self(Rc::new(Node {
            tag:        tag.to_ascii_lowercase(),
            attributes: RefCell::default(),
            value:      RefCell::default(),
            text:       RefCell::default(),
            children:   RefCell::default(),
            parent:     RefCell::default(),
            listeners:  RefCell::default(),
        }))
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> &str { &self.0.tag }

    // ---- attributes ----

    /// Sets an attribute, keeping its original position when it exists.
    pub fn set_attribute(&self, name: &str, value: impl ToString) {
        let value = value.to_string();
        let mut attributes = self.0.attributes.borrow_mut();
        if let Some(slot) = attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            attributes.push((name.to_string(), value));
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.attributes.borrow().iter().any(|(n, _)| n == name)
    }

    /// Returns whether the attribute was present.
    pub fn remove_attribute(&self, name: &str) -> bool {
        let mut attributes = self.0.attributes.borrow_mut();
        let before = attributes.len();
        attributes.retain(|(n, _)| n != name);
        attributes.len() != before
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> { self.0.attributes.borrow().clone() }

    pub fn class_name(&self) -> String { self.attribute("class").unwrap_or_default() }

    pub fn set_class_name(&self, class: &str) { self.set_attribute("class", class) }

    // ---- form value ----

    /// The `value` property of a form control.
    ///
    /// Mirrors the `value` attribute until [`Element::set_value`] is called.
    pub fn value(&self) -> String {
        self.0
            .value
            .borrow()
            .clone()
            .or_else(|| self.attribute("value"))
            .unwrap_or_default()
    }

    pub fn set_value(&self, value: impl ToString) {
        *self.0.value.borrow_mut() = Some(value.to_string());
    }

    // ---- text ----

    /// Concatenated text of this node and all descendants, in tree order.
    pub fn text_content(&self) -> String {
        let mut out = self.0.text.borrow().clone();
        for child in self.0.children.borrow().iter() {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Replaces all children with the given text.
    pub fn set_text_content(&self, text: &str) {
        let children = std::mem::take(&mut *self.0.children.borrow_mut());
        for child in &children {
            *child.0.parent.borrow_mut() = Weak::new();
        }
        *self.0.text.borrow_mut() = text.to_string();
    }

    // ---- tree ----

    /// Appends `child` as the last child.
    ///
    /// A child that already has a parent is moved, so appending the same node
    /// twice never duplicates it.
    pub fn append_child(&self, child: &Self) -> Result<()> {
        ensure!(
            !child.contains(self),
            HierarchyRequestSnafu {
                parent: self.tag_name(),
                child:  child.tag_name(),
            }
        );

        if let Some(old_parent) = child.parent() {
            old_parent
                .0
                .children
                .borrow_mut()
                .retain(|existing| existing != child);
        }

        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        trace!(parent = self.tag_name(), child = child.tag_name(), "appended child");
        Ok(())
    }

    /// Detaches `child` and returns it.
    pub fn remove_child(&self, child: &Self) -> Result<Self> {
        let mut children = self.0.children.borrow_mut();
        let position = children.iter().position(|existing| existing == child);
        let Some(position) = position else {
            return NotAChildSnafu {
                parent: self.tag_name(),
                child:  child.tag_name(),
            }
            .fail();
        };
        let removed = children.remove(position);
        *removed.0.parent.borrow_mut() = Weak::new();
        Ok(removed)
    }

    pub fn children(&self) -> Vec<Self> { self.0.children.borrow().clone() }

    pub fn parent(&self) -> Option<Self> { self.0.parent.borrow().upgrade().map(Self) }

    /// Whether `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if &node == self {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    // ---- events ----

    /// Attaches `listener` for events of `kind`.
    ///
    /// Returns `false` when that exact listener is already attached for the
    /// same kind; it is not added twice.
    pub fn add_event_listener(&self, kind: &str, listener: &EventListener) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        if listeners.iter().any(|(k, l)| k == kind && l == listener) {
            return false;
        }
        listeners.push((kind.to_string(), listener.clone()));
        true
    }

    /// Detaches `listener` by identity. Returns whether it was attached.
    pub fn remove_event_listener(&self, kind: &str, listener: &EventListener) -> bool {
        let mut listeners = self.0.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(k, l)| !(k == kind && l == listener));
        listeners.len() != before
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| k == kind)
            .count()
    }

    /// Runs the listeners for `event.kind()` synchronously, in attach order.
    ///
    /// The listener list is snapshotted first, so listeners may attach,
    /// detach, or dispatch further events. A listener detached by an earlier
    /// one in the same dispatch is skipped. Events do not propagate to
    /// ancestors. Returns the number of listeners invoked.
    pub fn dispatch_event(&self, event: Event) -> usize {
        let event = event.with_target(self.clone());
        let snapshot: Vec<EventListener> = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| k == event.kind())
            .map(|(_, l)| l.clone())
            .collect();

        let mut invoked = 0;
        for listener in snapshot {
            let still_attached = self
                .0
                .listeners
                .borrow()
                .iter()
                .any(|(k, l)| k == event.kind() && l == &listener);
            if still_attached {
                listener.call(&event);
                invoked += 1;
            }
        }
        trace!(
            target_tag = self.tag_name(),
            kind = event.kind(),
            invoked,
            "dispatched event"
        );
        invoked
    }

    /// Dispatches a synthetic `click`.
    pub fn click(&self) -> usize { self.dispatch_event(Event::new("click")) }

    // ---- serialization ----

    /// HTML for this node and its subtree.
    ///
    /// Only attributes are serialized; a live `value` property written through
    /// [`Element::set_value`] does not appear, as in a browser.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag_name());
        for (name, value) in self.0.attributes.borrow().iter() {
            let _ = write!(out, " {name}=\"{}\"", escape(value, true));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag_name()) {
            return;
        }

        out.push_str(&escape(&self.0.text.borrow(), false));
        for child in self.0.children.borrow().iter() {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag_name());
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.0.tag)
            .field("attributes", &self.0.attributes.borrow())
            .field("children", &self.0.children.borrow().len())
            .finish_non_exhaustive()
    }
}
