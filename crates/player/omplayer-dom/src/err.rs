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

use std::any::Any;

use omplayer_error::{ErrorExt, StackError, StatusCode};
use snafu::Snafu;
use strum::EnumProperty;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug, strum_macros::EnumProperty)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Cannot append <{child}> to <{parent}>: the node would contain itself"))]
    #[strum(props(status_code = "invalid_argument"))]
    HierarchyRequest {
        parent: String,
        child:  String,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("<{child}> is not a child of <{parent}>"))]
    #[strum(props(status_code = "not_found"))]
    NotAChild {
        parent: String,
        child:  String,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },
}

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        self.get_str("status_code")
            .and_then(|value| value.parse().ok())
            .unwrap_or(StatusCode::Unknown)
    }

    fn as_any(&self) -> &dyn Any { self as _ }
}

impl StackError for Error {
    fn debug_fmt(&self, layer: usize, buf: &mut Vec<String>) {
        buf.push(format!("{layer}: {self}"));
    }

    fn next(&self) -> Option<&dyn StackError> { None }
}
