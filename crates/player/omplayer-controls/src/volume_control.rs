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

//! Volume control component with mute toggle and slider.
//!
//! Renders a mute button and a range input into a host container:
//!
//! ```text
//! <button type="button" class="om-controls__mute"><span class="om-sr">Mute</span></button>
//! <input type="range" class="om-controls__volume" min="0" max="1" step="0.1" ...>
//! ```
//!
//! Every change the control makes to the media is announced with a synthetic
//! `volumechange` on the media element. The control listens for that same
//! event to refresh the slider, so changes made by anyone else show up too.

use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use omplayer_dom::{Element, Event, EventListener, RenderContext};
use snafu::{ResultExt, ensure};
use tracing::{debug, info, warn};

use crate::{
    config::VolumeControlConfig,
    err::{InvalidSliderValueSnafu, InvalidVolumeSnafu, Result},
    media::{self, MediaHandle},
};

/// Event announcing a change of `volume` or `muted` on the media element.
pub const VOLUME_CHANGE_EVENT: &str = "volumechange";

const SLIDER_EVENTS: [&str; 2] = ["input", "change"];
const CLICK_EVENT: &str = "click";

/// State shared between the control and its listeners.
///
/// Listeners hold a `Weak` to it: the elements own the listeners, and this
/// owns the elements.
struct Shared {
    media:        Rc<dyn MediaHandle>,
    slider:       Element,
    button:       Element,
    /// Volume restored on unmute. Only slider input writes it.
    saved_volume: Cell<f64>,
    config:       VolumeControlConfig,
}

impl Shared {
    /// Media -> UI.
    fn update_slider(&self) {
        let volume = self.media.volume();
        let percent = percent(volume);
        self.slider.set_attribute("aria-valuenow", percent);
        self.slider
            .set_attribute("aria-valuetext", format!("{percent}%"));
        self.slider.set_value(volume);
        debug!(volume, percent, "slider synced to media");
    }

    /// UI -> Media, from the slider's current text value.
    fn apply_slider_value(&self, raw: &str) -> Result<()> {
        let volume = raw
            .trim()
            .parse::<f64>()
            .context(InvalidSliderValueSnafu { value: raw })?;
        ensure!(volume.is_finite(), InvalidVolumeSnafu { volume });
        self.apply_volume(volume.clamp(0.0, 1.0));
        Ok(())
    }

    fn apply_volume(&self, volume: f64) {
        self.media.set_volume(volume);
        self.saved_volume.set(volume);
        if self.config.unmute_on_input && self.media.muted() {
            self.media.set_muted(false);
        }
        debug!(volume, muted = self.media.muted(), "volume set from slider");
        self.announce();
    }

    fn toggle_mute(&self) -> bool {
        let muted = !self.media.muted();
        self.media.set_muted(muted);
        if muted {
            self.media.set_volume(0.0);
        } else {
            self.media.set_volume(self.saved_volume.get());
        }
        debug!(
            muted,
            restored = self.saved_volume.get(),
            "mute toggled"
        );
        self.announce();
        muted
    }

    fn announce(&self) {
        self.media
            .element()
            .dispatch_event(Event::new(VOLUME_CHANGE_EVENT));
    }
}

/// One listener attached by [`VolumeControl::register`].
struct Binding {
    target:   Element,
    kind:     &'static str,
    listener: EventListener,
}

/// Volume slider plus mute button bound to a media handle.
///
/// ```text
/// unmuted --click--> muted    (volume 0, saved volume kept)
/// muted   --click--> unmuted  (volume = saved volume)
/// ```
///
/// Slider input sets both the volume and the saved volume whatever the mute
/// state; whether it also clears `muted` is
/// [`VolumeControlConfig::unmute_on_input`].
pub struct VolumeControl {
    shared:   Rc<Shared>,
    bindings: Vec<Binding>,
}

impl VolumeControl {
    /// Creates the slider and the button. Nothing is attached to the tree or
    /// to the media yet.
    pub fn new(
        ctx: &dyn RenderContext,
        media: Rc<dyn MediaHandle>,
        config: VolumeControlConfig,
    ) -> Result<Self> {
        media::validate(media.as_ref())?;
        config.validate()?;

        let volume = media.volume();
        let percent = percent(volume);

        let slider = ctx.create_element("input");
        slider.set_attribute("type", "range");
        slider.set_class_name(&config.slider_class);
        slider.set_value(volume);
        slider.set_attribute("min", 0);
        slider.set_attribute("aria-valuemin", 0);
        slider.set_attribute("max", 1);
        slider.set_attribute("aria-valuemax", 1);
        slider.set_attribute("step", config.step);
        slider.set_attribute("aria-valuetext", format!("{percent}%"));

        let button = ctx.create_element("button");
        button.set_attribute("type", "button");
        button.set_class_name(&config.button_class);
        let label = ctx.create_element("span");
        label.set_class_name(&config.label_class);
        label.set_text_content(&config.mute_label);
        button.append_child(&label)?;

        Ok(Self {
            shared:   Rc::new(Shared {
                media,
                slider,
                button,
                saved_volume: Cell::new(volume),
                config,
            }),
            bindings: Vec::new(),
        })
    }

    pub fn with_defaults(ctx: &dyn RenderContext, media: Rc<dyn MediaHandle>) -> Result<Self> {
        Self::new(ctx, media, VolumeControlConfig::default())
    }

    /// Wires media -> slider, slider -> media and button -> media.
    ///
    /// Not idempotent: a second call attaches a second set of listeners.
    /// Every set is recorded and [`VolumeControl::unregister`] removes all of
    /// them.
    pub fn register(&mut self) -> &mut Self {
        let media_element = self.shared.media.element();
        let slider = self.shared.slider.clone();
        let button = self.shared.button.clone();

        let on_volume_change = self.listener(|shared, _event| shared.update_slider());
        self.attach(&media_element, VOLUME_CHANGE_EVENT, on_volume_change);

        let on_slider = self.listener(|shared, event| {
            let raw = event
                .target()
                .map_or_else(|| shared.slider.value(), Element::value);
            if let Err(err) = shared.apply_slider_value(&raw) {
                warn!(error = %err, "ignoring slider value");
            }
        });
        for kind in SLIDER_EVENTS {
            self.attach(&slider, kind, on_slider.clone());
        }

        let on_click = self.listener(|shared, _event| {
            shared.toggle_mute();
        });
        self.attach(&button, CLICK_EVENT, on_click);

        info!(bindings = self.bindings.len(), "volume control registered");
        self
    }

    /// Removes every listener a previous `register` attached, by the identity
    /// stored at attach time. No-op when nothing is registered.
    pub fn unregister(&mut self) -> &mut Self {
        let count = self.bindings.len();
        for binding in self.bindings.drain(..) {
            binding
                .target
                .remove_event_listener(binding.kind, &binding.listener);
        }
        if count > 0 {
            info!(bindings = count, "volume control unregistered");
        }
        self
    }

    /// Appends the button, then the slider, to `container`.
    pub fn build(&self, container: &Element) -> Result<&Self> {
        container.append_child(&self.shared.button)?;
        container.append_child(&self.shared.slider)?;
        Ok(self)
    }

    /// Refreshes the slider from the media without dispatching an event.
    pub fn sync(&self) { self.shared.update_slider(); }

    /// Programmatic slider change: updates the slider, the media and the saved
    /// volume, then announces `volumechange`.
    pub fn set_volume(&self, volume: f64) -> Result<()> {
        ensure!(volume.is_finite(), InvalidVolumeSnafu { volume });
        let volume = volume.clamp(0.0, 1.0);
        self.shared.slider.set_value(volume);
        self.shared.apply_volume(volume);
        Ok(())
    }

    /// Programmatic mute click. Returns the new muted state.
    pub fn toggle_mute(&self) -> bool { self.shared.toggle_mute() }

    pub fn slider(&self) -> &Element { &self.shared.slider }

    pub fn button(&self) -> &Element { &self.shared.button }

    pub fn media(&self) -> &Rc<dyn MediaHandle> { &self.shared.media }

    pub fn saved_volume(&self) -> f64 { self.shared.saved_volume.get() }

    pub fn config(&self) -> &VolumeControlConfig { &self.shared.config }

    pub fn is_registered(&self) -> bool { !self.bindings.is_empty() }

    fn listener(&self, handler: impl Fn(&Shared, &Event) + 'static) -> EventListener {
        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        EventListener::new(move |event| {
            if let Some(shared) = shared.upgrade() {
                handler(&shared, event);
            }
        })
    }

    fn attach(&mut self, target: &Element, kind: &'static str, listener: EventListener) {
        target.add_event_listener(kind, &listener);
        self.bindings.push(Binding {
            target: target.clone(),
            kind,
            listener,
        });
    }
}

impl Drop for VolumeControl {
    fn drop(&mut self) { self.unregister(); }
}

/// Whole percent, rounded down.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(volume: f64) -> u32 { (volume.clamp(0.0, 1.0) * 100.0).floor() as u32 }
