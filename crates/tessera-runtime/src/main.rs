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

mod panels;

use anyhow::{anyhow, Context as _, Result};
use panels::TitlePanel;
use tessera_core::audio::{AudioManager, SilentAudio};
use tessera_infra::platform::paths;
use tessera_infra::{RonOptionsStore, WgpuCanvasRenderer, WinitEventSource, WinitWindowBuilder};
use tessera_sdk::phase::install_panic_logger;
use tessera_sdk::{Context, Engine};

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();
    install_panic_logger();

    let base_path = paths::base_path();
    let user_dir = paths::user_dir();
    log::info!("Tessera starting on {}.", paths::platform_name());
    log::info!("Base path: '{}'", base_path.display());
    log::info!("User directory: '{}'", user_dir.display());

    let store = RonOptionsStore::new(&base_path, &user_dir);
    let options = store.load().context("failed to load options")?;

    let graphics = &options.graphics;
    let events = WinitEventSource::new(
        WinitWindowBuilder::new()
            .with_title("Tessera")
            .with_dimensions(graphics.screen_width, graphics.screen_height)
            .with_fullscreen(graphics.fullscreen),
    )?;
    let window = events
        .window()
        .cloned()
        .ok_or_else(|| anyhow!("the event source has no window"))?;
    let renderer = WgpuCanvasRenderer::new(&window).context("failed to initialize graphics")?;

    let mut audio = SilentAudio::new();
    audio.play_music(TitlePanel::MUSIC);

    let context = Context::new(options, Box::new(audio), Box::new(renderer));
    let mut engine = Engine::new(
        context,
        Box::new(events),
        Box::new(TitlePanel::new()),
        paths::screenshot_dir(),
    )
    .with_options_store(Box::new(store));

    engine.run()?;
    log::info!("Tessera exited cleanly.");
    Ok(())
}
