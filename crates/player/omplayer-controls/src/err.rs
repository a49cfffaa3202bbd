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

use std::{any::Any, num::ParseFloatError};

use omplayer_error::{ErrorExt, StackError, StatusCode};
use snafu::Snafu;
use strum::EnumProperty;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug, strum_macros::EnumProperty)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Media volume {volume} is outside [0, 1]"))]
    #[strum(props(status_code = "invalid_argument"))]
    InvalidVolume {
        volume: f64,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Slider value {value:?} is not a number"))]
    #[strum(props(status_code = "invalid_argument"))]
    InvalidSliderValue {
        value:  String,
        source: ParseFloatError,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Slider step {step} must be a positive number no larger than 1"))]
    #[strum(props(status_code = "invalid_argument"))]
    InvalidStep {
        step: f64,
        #[snafu(implicit)]
        loc:  snafu::Location,
    },

    #[snafu(transparent)]
    Dom {
        source: omplayer_dom::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },
}

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        if let Self::Dom { source, .. } = self {
            return source.status_code();
        }
        self.get_str("status_code")
            .and_then(|value| value.parse().ok())
            .unwrap_or(StatusCode::Unknown)
    }

    fn as_any(&self) -> &dyn Any { self as _ }
}

impl StackError for Error {
    fn debug_fmt(&self, layer: usize, buf: &mut Vec<String>) {
        buf.push(format!("{layer}: {self}"));
        if let Some(next) = self.next() {
            next.debug_fmt(layer + 1, buf);
        }
    }

    fn next(&self) -> Option<&dyn StackError> {
        match self {
            Self::Dom { source, .. } => Some(source),
            _ => None,
        }
    }

    fn transparent(&self) -> bool { matches!(self, Self::Dom { .. }) }
}
