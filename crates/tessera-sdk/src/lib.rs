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

//! The runtime of a Tessera application.
//!
//! One [`Engine`] owns every panel and every subsystem and drives them through
//! a fixed sequence each frame:
//!
//! 1. **Pace**: the [`FrameScheduler`] sleeps off the rest of the frame budget
//!    and produces a clamped delta.
//! 2. **Sample**: input snapshot, audio bookkeeping, frame-time statistics.
//! 3. **Dispatch + tick**: the [`EventDispatcher`] drains platform events,
//!    then the active panel is ticked.
//! 4. **Render**: base panel, sub-panels bottom to top, the active panel's
//!    secondary pass, the cursor, then present.
//!
//! Panels request stack changes while they run; the [`PanelStack`] applies
//! those requests only between callbacks.

pub mod context;
pub mod dispatch;
pub mod engine;
pub mod frame;
pub mod headless;
pub mod phase;
pub mod screenshot;
pub mod stack;

pub use context::Context;
pub use dispatch::{EventClass, EventDispatcher};
pub use engine::Engine;
pub use frame::{Clock, FrameScheduler, SystemClock};
pub use phase::{FatalError, Phase};
pub use screenshot::ScreenshotWriter;
pub use stack::PanelStack;

/// Re-exports for writing panels without depending on `tessera-core` directly.
pub mod prelude {
    pub use tessera_core::audio::AudioManager;
    pub use tessera_core::config::Options;
    pub use tessera_core::event::{InputEvent, MouseButton, PlatformEvent};
    pub use tessera_core::panel::{Panel, PanelBox, PanelContext};
    pub use tessera_core::renderer::{Canvas, Color, CursorAlignment, Rect, Texture};
}
