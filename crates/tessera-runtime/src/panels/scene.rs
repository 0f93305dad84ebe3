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

//! A small interactive scene: a player square and a bouncing block.

use super::cursor;
use super::pause_menu::PauseMenuPanel;
use anyhow::Result;
use tessera_core::event::InputEvent;
use tessera_core::panel::{Panel, PanelContext};
use tessera_core::renderer::{Canvas, Color, CursorAlignment, Rect, Texture};

const SKY: Color = Color::rgb(40, 60, 90);
const GROUND: Color = Color::rgb(50, 90, 50);
const PLAYER: Color = Color::rgb(220, 80, 60);
const BLOCK: Color = Color::rgb(240, 200, 80);
const FPS_BAR: Color = Color::rgb(80, 220, 120);

/// Player speed, in canvas widths per second.
const PLAYER_SPEED: f64 = 0.5;
/// Block speed, in canvas widths per second.
const BLOCK_SPEED: f64 = 0.3;
/// Side of the player and the block, as a fraction of the canvas height.
const SPRITE_SIZE: f64 = 0.08;

/// The gameplay panel. Escape opens the pause menu.
pub struct ScenePanel {
    player: (f64, f64),
    block_x: f64,
    block_direction: f64,
    paused: bool,
    music_started: bool,
    last_fps: f64,
    cursor: Texture,
}

impl ScenePanel {
    /// Music track of the scene.
    pub const MUSIC: &'static str = "scene";

    pub fn new() -> Self {
        Self {
            player: (0.5, 0.7),
            block_x: 0.0,
            block_direction: 1.0,
            paused: false,
            music_started: false,
            last_fps: 0.0,
            cursor: cursor::arrow(),
        }
    }

    fn sprite_rect(canvas: &Canvas, (x, y): (f64, f64)) -> Rect {
        let side = ((canvas.height() as f64 * SPRITE_SIZE) as u32).max(1);
        let px = (x * canvas.width() as f64) as i32 - (side / 2) as i32;
        let py = (y * canvas.height() as f64) as i32 - (side / 2) as i32;
        Rect::new(px, py, side, side)
    }
}

impl Default for ScenePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ScenePanel {
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut PanelContext<'_>) -> Result<()> {
        if event.is_key_pressed("Escape") {
            ctx.push_sub_panel(Box::new(PauseMenuPanel::new()));
        }
        Ok(())
    }

    fn tick(&mut self, dt: f64, ctx: &mut PanelContext<'_>) -> Result<()> {
        if !self.music_started {
            ctx.audio.play_music(Self::MUSIC);
            self.music_started = true;
        }
        self.last_fps = ctx.fps.average_fps();

        if self.paused {
            return Ok(());
        }

        let input = ctx.input;
        let step = PLAYER_SPEED * dt;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.key_is_down("ArrowLeft") {
            dx -= step;
        }
        if input.key_is_down("ArrowRight") {
            dx += step;
        }
        if input.key_is_down("ArrowUp") {
            dy -= step;
        }
        if input.key_is_down("ArrowDown") {
            dy += step;
        }
        self.player.0 = (self.player.0 + dx).clamp(0.0, 1.0);
        self.player.1 = (self.player.1 + dy).clamp(0.0, 1.0);

        self.block_x += self.block_direction * BLOCK_SPEED * dt;
        if !(0.0..=1.0).contains(&self.block_x) {
            self.block_x = self.block_x.clamp(0.0, 1.0);
            self.block_direction = -self.block_direction;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        let (w, h) = (canvas.width(), canvas.height());
        let horizon = h * 3 / 4;
        canvas.fill_rect(Rect::new(0, 0, w, horizon), SKY);
        canvas.fill_rect(Rect::new(0, horizon as i32, w, h - horizon), GROUND);

        let block = Self::sprite_rect(canvas, (self.block_x, 0.3));
        canvas.fill_rect(block, BLOCK);
        let player = Self::sprite_rect(canvas, self.player);
        canvas.fill_rect(player, PLAYER);
        Ok(())
    }

    fn render_secondary(&self, canvas: &mut Canvas) -> Result<()> {
        // One pixel of bar per frame per second, capped at the canvas width.
        let width = (self.last_fps.max(0.0) as u32).min(canvas.width());
        canvas.fill_rect(Rect::new(2, 2, width, 3), FPS_BAR);
        Ok(())
    }

    fn on_pause_changed(&mut self, paused: bool) {
        log::debug!("Scene {}.", if paused { "paused" } else { "resumed" });
        self.paused = paused;
    }

    fn current_cursor(&self) -> Option<(&Texture, CursorAlignment)> {
        Some((&self.cursor, CursorAlignment::TopLeft))
    }

    fn name(&self) -> &str {
        "scene"
    }
}
