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

//! Headless document model for omplayer controls.
//!
//! Controls never reach for a global document. They receive a
//! [`RenderContext`] and build [`Element`] trees through it, which keeps them
//! testable without a browser and lets a host mirror the tree into whatever
//! surface it renders to.
//!
//! The model is single-threaded: elements are `Rc` handles and event dispatch
//! runs listeners synchronously on the caller's stack.

mod document;
mod element;
mod err;
mod event;

pub use document::{Document, RenderContext};
pub use element::Element;
pub use err::{Error, Result};
pub use event::{Event, EventListener};
