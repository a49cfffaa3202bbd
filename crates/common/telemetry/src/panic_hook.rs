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

//! # Panic Hook
//!
//! Reports panics as structured tracing events with a backtrace, then hands
//! over to the previously installed hook.

use std::{
    panic,
    sync::atomic::{AtomicU64, Ordering},
};

use backtrace::Backtrace;

static PANIC_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Number of panics observed since [`set_panic_hook`] was installed.
pub fn panic_count() -> u64 { PANIC_COUNTER.load(Ordering::Relaxed) }

/// Set up panic handling with structured logging.
///
/// The replacement hook logs the panic message, its location and a backtrace
/// through `tracing::error!`, bumps [`panic_count`], then calls the default
/// hook.
pub fn set_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic| {
        let backtrace = Backtrace::new();
        let backtrace = format!("{backtrace:?}");
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                backtrace = %backtrace,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic, backtrace = %backtrace);
        }
        PANIC_COUNTER.fetch_add(1, Ordering::Relaxed);
        default_hook(panic);
    }));
}
