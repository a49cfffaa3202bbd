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

//! Scripted interactions replayed by `omplayer simulate`.

use std::{fmt, num::ParseFloatError, str::FromStr};

use omplayer_controls::{VOLUME_CHANGE_EVENT, VolumeControl};
use omplayer_dom::Event;
use snafu::{ResultExt, Snafu};

#[derive(Snafu, Debug)]
pub enum ParseStepError {
    #[snafu(display("Unknown step {step:?}, expected input=V, change=V, volume=V, click or sync"))]
    UnknownStep { step: String },

    #[snafu(display("Step {step:?} has a bad number"))]
    BadNumber {
        step:   String,
        source: ParseFloatError,
    },
}

/// One interaction with a registered volume control.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// User drags the slider (`input` event).
    Input(f64),
    /// User releases the slider (`change` event).
    Change(f64),
    /// User clicks the mute button.
    Click,
    /// Something outside the control changes the media volume and announces
    /// it.
    External(f64),
    /// Direct slider refresh, no event.
    Sync,
}

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = s.trim();
        match step.split_once('=') {
            None if step == "click" => Ok(Self::Click),
            None if step == "sync" => Ok(Self::Sync),
            Some((name, value)) => {
                let value = value
                    .trim()
                    .parse::<f64>()
                    .context(BadNumberSnafu { step })?;
                match name.trim() {
                    "input" => Ok(Self::Input(value)),
                    "change" => Ok(Self::Change(value)),
                    "volume" => Ok(Self::External(value)),
                    _ => UnknownStepSnafu { step }.fail(),
                }
            }
            None => UnknownStepSnafu { step }.fail(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(v) => write!(f, "input={v}"),
            Self::Change(v) => write!(f, "change={v}"),
            Self::Click => f.write_str("click"),
            Self::External(v) => write!(f, "volume={v}"),
            Self::Sync => f.write_str("sync"),
        }
    }
}

impl Step {
    /// Applies the step the way a user or the player would.
    pub fn apply(&self, control: &VolumeControl) {
        match self {
            Self::Input(v) => slide(control, "input", *v),
            Self::Change(v) => slide(control, "change", *v),
            Self::Click => {
                control.button().click();
            }
            Self::External(v) => {
                control.media().set_volume(*v);
                control
                    .media()
                    .element()
                    .dispatch_event(Event::new(VOLUME_CHANGE_EVENT));
            }
            Self::Sync => control.sync(),
        }
    }
}

fn slide(control: &VolumeControl, kind: &str, value: f64) {
    let slider = control.slider();
    slider.set_value(value);
    slider.dispatch_event(Event::trusted(kind));
}

/// One line of `simulate` output describing the state after a step.
pub fn describe(step: &Step, control: &VolumeControl) -> String {
    let media = control.media();
    let slider = control.slider();
    format!(
        "{:<12} volume={:.2} muted={} saved={:.2} slider={} aria={}",
        step.to_string(),
        media.volume(),
        media.muted(),
        control.saved_volume(),
        slider.value(),
        slider.attribute("aria-valuetext").unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use omplayer_controls::{MediaElement, MediaKind};
    use omplayer_dom::Document;

    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!("click".parse::<Step>().unwrap(), Step::Click);
        assert_eq!(" sync ".parse::<Step>().unwrap(), Step::Sync);
        assert_eq!("input=0.3".parse::<Step>().unwrap(), Step::Input(0.3));
        assert_eq!("change = 1".parse::<Step>().unwrap(), Step::Change(1.0));
        assert_eq!("volume=0.2".parse::<Step>().unwrap(), Step::External(0.2));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "jump".parse::<Step>(),
            Err(ParseStepError::UnknownStep { .. })
        ));
        assert!(matches!(
            "seek=3".parse::<Step>(),
            Err(ParseStepError::UnknownStep { .. })
        ));
        assert!(matches!(
            "input=loud".parse::<Step>(),
            Err(ParseStepError::BadNumber { .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["click", "sync", "input=0.3", "change=1", "volume=0.25"] {
            assert_eq!(raw.parse::<Step>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_apply_and_describe() {
        let document = Document::new();
        let media = Rc::new(MediaElement::new(&document, MediaKind::Audio));
        let mut control = VolumeControl::with_defaults(&document, media).unwrap();
        control.register();

        let step = Step::Input(0.3);
        step.apply(&control);
        assert_eq!(
            describe(&step, &control),
            "input=0.3    volume=0.30 muted=false saved=0.30 slider=0.3 aria=30%"
        );

        let step = Step::Click;
        step.apply(&control);
        assert_eq!(
            describe(&step, &control),
            "click        volume=0.00 muted=true saved=0.30 slider=0 aria=0%"
        );

        let step = Step::External(0.8);
        step.apply(&control);
        assert!(describe(&step, &control).ends_with("slider=0.8 aria=80%"));
    }
}
