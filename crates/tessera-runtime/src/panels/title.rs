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

//! The title screen: the base panel the program starts on.

use super::cursor;
use super::scene::ScenePanel;
use anyhow::Result;
use tessera_core::event::InputEvent;
use tessera_core::panel::{Panel, PanelContext};
use tessera_core::renderer::{Canvas, Color, CursorAlignment, Rect, Texture};

const BACKGROUND: Color = Color::rgb(24, 20, 37);
const BANNER: Color = Color::rgb(200, 170, 90);
const PROMPT: Color = Color::rgb(230, 230, 230);

/// Seconds per on/off cycle of the "press Enter" prompt.
const BLINK_PERIOD: f64 = 1.0;

/// Shows a banner and a blinking prompt; Enter starts the scene.
pub struct TitlePanel {
    elapsed: f64,
    cursor: Texture,
}

impl TitlePanel {
    /// Music track started together with the title screen.
    pub const MUSIC: &'static str = "title";

    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            cursor: cursor::arrow(),
        }
    }

    fn prompt_visible(&self) -> bool {
        self.elapsed % BLINK_PERIOD < BLINK_PERIOD / 2.0
    }
}

impl Default for TitlePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for TitlePanel {
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut PanelContext<'_>) -> Result<()> {
        if event.is_key_pressed("Enter") {
            log::info!("Starting the scene.");
            ctx.set_panel(Box::new(ScenePanel::new()));
        }
        Ok(())
    }

    fn tick(&mut self, dt: f64, _ctx: &mut PanelContext<'_>) -> Result<()> {
        self.elapsed += dt;
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        let (w, h) = (canvas.width(), canvas.height());
        canvas.fill_rect(Rect::new(0, 0, w, h), BACKGROUND);
        canvas.fill_rect(
            Rect::new((w / 8) as i32, (h / 4) as i32, w * 3 / 4, h / 6),
            BANNER,
        );
        if self.prompt_visible() {
            canvas.fill_rect(
                Rect::new((w * 3 / 8) as i32, (h * 2 / 3) as i32, w / 4, (h / 40).max(2)),
                PROMPT,
            );
        }
        Ok(())
    }

    fn current_cursor(&self) -> Option<(&Texture, CursorAlignment)> {
        Some((&self.cursor, CursorAlignment::TopLeft))
    }

    fn name(&self) -> &str {
        "title"
    }
}
