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

use bon::Builder;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use snafu::ensure;

use crate::err::{InvalidStepSnafu, Result};

/// Configuration for [`crate::VolumeControl`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Builder)]
#[serde(default)]
pub struct VolumeControlConfig {
    /// Class of the range input.
    #[default = "om-controls__volume"]
    #[builder(default = "om-controls__volume".to_string(), into)]
    pub slider_class: String,

    /// Class of the mute button.
    #[default = "om-controls__mute"]
    #[builder(default = "om-controls__mute".to_string(), into)]
    pub button_class: String,

    /// Class of the screen-reader-only label inside the button.
    #[default = "om-sr"]
    #[builder(default = "om-sr".to_string(), into)]
    pub label_class: String,

    /// Accessible label of the mute button.
    #[default = "Mute"]
    #[builder(default = "Mute".to_string(), into)]
    pub mute_label: String,

    /// Slider granularity.
    #[default = 0.1]
    #[builder(default = 0.1)]
    pub step: f64,

    /// Clear the muted flag when the slider moves while muted.
    ///
    /// Off by default: sliding while muted changes the volume and the saved
    /// volume but leaves `muted` set.
    #[default = false]
    #[builder(default)]
    pub unmute_on_input: bool,
}

impl VolumeControlConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.step.is_finite() && self.step > 0.0 && self.step <= 1.0,
            InvalidStepSnafu { step: self.step }
        );
        Ok(())
    }
}
