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

//! The media contract controls are written against.

use std::cell::Cell;

use omplayer_dom::{Element, RenderContext};
use snafu::ensure;
use tracing::warn;

use crate::err::{InvalidVolumeSnafu, Result};

/// Playback object owned by the player.
///
/// Setters take `&self`: the player and every control hold the same handle
/// and mutate it through interior mutability.
pub trait MediaHandle {
    /// Current volume in `[0, 1]`.
    fn volume(&self) -> f64;

    fn set_volume(&self, volume: f64);

    fn muted(&self) -> bool;

    fn set_muted(&self, muted: bool);

    /// Element that carries media events such as `volumechange`.
    fn element(&self) -> Element;
}

/// Checks the runtime half of the media contract.
///
/// The trait fixes the shape; this rejects a volume that is NaN, infinite,
/// or outside `[0, 1]`.
pub fn validate(media: &dyn MediaHandle) -> Result<()> {
    let volume = media.volume();
    ensure!(is_valid_volume(volume), InvalidVolumeSnafu { volume });
    Ok(())
}

pub(crate) fn is_valid_volume(volume: f64) -> bool {
    volume.is_finite() && (0.0..=1.0).contains(&volume)
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Audio,
    Video,
}

/// In-memory media element.
///
/// Starts at full volume and unmuted. Volumes are clamped into `[0, 1]`;
/// non-finite values are ignored. It never dispatches `volumechange` on its
/// own, whoever changes it is responsible for announcing the change.
#[derive(Debug)]
pub struct MediaElement {
    kind:    MediaKind,
    element: Element,
    volume:  Cell<f64>,
    muted:   Cell<bool>,
}

impl MediaElement {
    pub fn new(ctx: &dyn RenderContext, kind: MediaKind) -> Self {
        Self {
            kind,
            element: ctx.create_element(kind.as_ref()),
            volume: Cell::new(1.0),
            muted: Cell::new(false),
        }
    }

    pub const fn kind(&self) -> MediaKind { self.kind }
}

impl MediaHandle for MediaElement {
    fn volume(&self) -> f64 { self.volume.get() }

    fn set_volume(&self, volume: f64) {
        if !volume.is_finite() {
            warn!(volume, "ignoring non-finite media volume");
            return;
        }
        self.volume.set(volume.clamp(0.0, 1.0));
    }

    fn muted(&self) -> bool { self.muted.get() }

    fn set_muted(&self, muted: bool) { self.muted.set(muted); }

    fn element(&self) -> Element { self.element.clone() }
}
