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

//! omplayer controls - interactive widgets bound to a media element.
//!
//! A control owns its elements, mirrors media state into them and writes
//! user input back to the media. The surrounding player owns the media and
//! the document; controls only borrow them through [`MediaHandle`] and
//! [`omplayer_dom::RenderContext`].

pub mod config;
mod err;
pub mod media;
pub mod volume_control;

pub use config::VolumeControlConfig;
pub use err::{Error, Result};
pub use media::{MediaElement, MediaHandle, MediaKind};
pub use volume_control::{VOLUME_CHANGE_EVENT, VolumeControl};
