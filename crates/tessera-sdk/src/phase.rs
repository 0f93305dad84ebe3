// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fatal-error boundaries around the phases of a frame.

use std::fmt;
use thiserror::Error;

/// A phase of the frame whose failure ends the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Draining platform events and forwarding them to panels.
    HandleEvents,
    /// Advancing the active panel.
    Tick,
    /// Drawing the stack and presenting the frame.
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::HandleEvents => "event handling",
            Phase::Tick => "tick",
            Phase::Render => "render",
        })
    }
}

/// An error that escaped a phase boundary. Never recovered from.
#[derive(Debug, Error)]
#[error("{phase} phase failed: {source:#}")]
pub struct FatalError {
    /// The phase the error escaped from.
    pub phase: Phase,
    /// What went wrong.
    #[source]
    pub source: anyhow::Error,
}

impl Phase {
    /// Runs `f` as this phase, turning an escaping error into a [`FatalError`].
    pub fn guard<T>(self, f: impl FnOnce() -> anyhow::Result<T>) -> Result<T, FatalError> {
        f().map_err(|source| {
            log::error!("Fatal error during {self} phase: {source:#}");
            FatalError {
                phase: self,
                source,
            }
        })
    }
}

/// Routes panic messages through the logger, then runs the previous hook.
///
/// Invariant violations in the panel stack panic; with this hook installed the
/// diagnostic also reaches the log file or console the logger writes to.
pub fn install_panic_logger() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        match info.location() {
            Some(location) => log::error!(
                "Panic at {}:{}: {message}",
                location.file(),
                location.line()
            ),
            None => log::error!("Panic: {message}"),
        }
        previous(info);
    }));
}
