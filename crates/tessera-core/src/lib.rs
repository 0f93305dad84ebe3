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

//! # Tessera Core
//!
//! Foundational crate containing the panel contract, plain data types, and the
//! narrow interfaces through which the runtime talks to its subsystems.
//!
//! Nothing in this crate owns a frame loop. The loop, the panel stack and the
//! event dispatcher live in `tessera-sdk`; concrete windowing and presentation
//! backends live in `tessera-infra`.

#![warn(missing_docs)]

pub mod audio;
pub mod config;
pub mod event;
pub mod input;
pub mod panel;
pub mod renderer;
pub mod telemetry;

pub use config::Options;
pub use event::{EventSource, InputEvent, PlatformEvent};
pub use panel::{Panel, PanelContext};
