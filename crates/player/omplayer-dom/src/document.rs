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

use crate::Element;

/// Capability to create elements.
///
/// Components take this instead of a global document.
pub trait RenderContext {
    fn create_element(&self, tag: &str) -> Element;
}

/// A headless document with a `<body>` to mount controls into.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    pub const fn body(&self) -> &Element { &self.body }
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl RenderContext for Document {
    fn create_element(&self, tag: &str) -> Element { Element::new(tag) }
}
