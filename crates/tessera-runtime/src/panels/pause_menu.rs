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

//! The pause menu, pushed over the scene.

use super::cursor;
use super::title::TitlePanel;
use anyhow::Result;
use tessera_core::config::AudioOptions;
use tessera_core::event::InputEvent;
use tessera_core::panel::{Panel, PanelContext};
use tessera_core::renderer::{Canvas, Color, CursorAlignment, Rect, Texture};

const FRAME: Color = Color::rgb(20, 20, 20);
const ITEM: Color = Color::rgb(110, 110, 130);
const SELECTED: Color = Color::rgb(250, 250, 250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Resume,
    ToggleMusic,
    QuitToTitle,
}

const ITEMS: [Item; 3] = [Item::Resume, Item::ToggleMusic, Item::QuitToTitle];

/// A modal menu. Escape or "Resume" closes it, "Quit to title" replaces the
/// scene with the title screen.
pub struct PauseMenuPanel {
    selected: usize,
    cursor: Texture,
}

impl PauseMenuPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            cursor: cursor::arrow(),
        }
    }

    fn activate(&mut self, item: Item, ctx: &mut PanelContext<'_>) {
        match item {
            Item::Resume => ctx.pop_sub_panel(),
            Item::ToggleMusic => {
                let audio = &mut ctx.options.audio;
                audio.music_volume = if audio.music_volume > 0.0 {
                    0.0
                } else {
                    AudioOptions::default().music_volume
                };
                log::info!("Music volume set to {}.", audio.music_volume);
            }
            Item::QuitToTitle => {
                ctx.set_panel(Box::new(TitlePanel::new()));
                ctx.pop_sub_panel();
                ctx.audio.play_music(TitlePanel::MUSIC);
            }
        }
    }

    fn item_rect(canvas: &Canvas, index: usize) -> Rect {
        let (w, h) = (canvas.width(), canvas.height());
        let item_height = (h / 12).max(1);
        let top = h / 3 + index as u32 * item_height * 3 / 2;
        Rect::new((w * 3 / 8) as i32, top as i32, w / 4, item_height)
    }
}

impl Default for PauseMenuPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for PauseMenuPanel {
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut PanelContext<'_>) -> Result<()> {
        let InputEvent::KeyPressed { key_code } = event else {
            return Ok(());
        };
        match key_code.as_str() {
            "Escape" => ctx.pop_sub_panel(),
            "ArrowUp" => self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len(),
            "ArrowDown" => self.selected = (self.selected + 1) % ITEMS.len(),
            "Enter" => self.activate(ITEMS[self.selected], ctx),
            _ => {}
        }
        Ok(())
    }

    fn tick(&mut self, _dt: f64, _ctx: &mut PanelContext<'_>) -> Result<()> {
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        let (w, h) = (canvas.width(), canvas.height());
        canvas.fill_rect(Rect::new((w / 4) as i32, (h / 4) as i32, w / 2, h / 2), FRAME);
        for index in 0..ITEMS.len() {
            canvas.fill_rect(Self::item_rect(canvas, index), ITEM);
        }
        Ok(())
    }

    fn render_secondary(&self, canvas: &mut Canvas) -> Result<()> {
        let item = Self::item_rect(canvas, self.selected);
        let marker = Rect::new(item.x - 6, item.y, 4, item.height);
        canvas.fill_rect(marker, SELECTED);
        Ok(())
    }

    fn current_cursor(&self) -> Option<(&Texture, CursorAlignment)> {
        Some((&self.cursor, CursorAlignment::TopLeft))
    }

    fn name(&self) -> &str {
        "pause menu"
    }
}
