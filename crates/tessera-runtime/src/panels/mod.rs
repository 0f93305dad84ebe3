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

//! Demo panels shipped with the runner.

mod cursor;
mod pause_menu;
mod scene;
mod title;

pub use title::TitlePanel;

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::audio::{AudioManager, SilentAudio};
    use tessera_core::config::Options;
    use tessera_core::event::{InputEvent, PlatformEvent};
    use tessera_sdk::headless::{HeadlessRenderer, ManualClock, ScriptedEventSource};
    use tessera_sdk::{Context, Engine, FrameScheduler};

    fn key(code: &str) -> PlatformEvent {
        PlatformEvent::Input(InputEvent::KeyPressed {
            key_code: code.to_string(),
        })
    }

    fn engine(frames: Vec<Vec<PlatformEvent>>) -> (Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let context = Context::new(
            Options::default(),
            Box::new(SilentAudio::new()),
            Box::new(HeadlessRenderer::new(320, 240)),
        );
        let engine = Engine::new(
            context,
            Box::new(ScriptedEventSource::new(frames)),
            Box::new(TitlePanel::new()),
            dir.path(),
        )
        .with_scheduler(FrameScheduler::with_clock(Box::new(ManualClock::new())));
        (engine, dir)
    }

    fn names(engine: &Engine) -> (String, String) {
        let stack = engine.stack();
        (stack.base().name().to_owned(), stack.active().name().to_owned())
    }

    #[test]
    fn enter_starts_the_scene_and_escape_toggles_the_pause_menu() {
        let (mut engine, _dir) = engine(vec![
            vec![key("Enter")],
            vec![key("Escape")],
            vec![key("Escape")],
        ]);

        engine.run_frame().unwrap();
        assert_eq!(names(&engine), ("scene".into(), "scene".into()));
        assert_eq!(
            engine.context().audio.current_music(),
            Some(scene::ScenePanel::MUSIC)
        );

        engine.run_frame().unwrap();
        assert_eq!(names(&engine), ("scene".into(), "pause menu".into()));

        engine.run_frame().unwrap();
        assert_eq!(names(&engine), ("scene".into(), "scene".into()));
    }

    #[test]
    fn quitting_from_the_pause_menu_returns_to_the_title() {
        let (mut engine, _dir) = engine(vec![
            vec![key("Enter")],
            vec![key("Escape")],
            vec![key("ArrowDown"), key("ArrowDown"), key("Enter")],
        ]);

        for _ in 0..3 {
            engine.run_frame().unwrap();
        }

        assert_eq!(names(&engine), ("title".into(), "title".into()));
        assert_eq!(engine.stack().sub_panel_count(), 0);
        assert_eq!(
            engine.context().audio.current_music(),
            Some(TitlePanel::MUSIC)
        );
    }

    #[test]
    fn the_pause_menu_can_mute_the_music_option() {
        let (mut engine, _dir) = engine(vec![
            vec![key("Enter")],
            vec![key("Escape")],
            vec![key("ArrowDown"), key("Enter")],
        ]);

        for _ in 0..3 {
            engine.run_frame().unwrap();
        }

        assert_eq!(engine.context().options.audio.music_volume, 0.0);
        assert_eq!(names(&engine).1, "pause menu");
    }

    #[test]
    fn every_frame_draws_the_cursor() {
        let (mut engine, _dir) = engine(vec![vec![PlatformEvent::Input(
            InputEvent::MouseMoved { x: 100.0, y: 50.0 },
        )]]);

        engine.run_frame().unwrap();

        let canvas = engine.context().renderer.canvas();
        assert_eq!(
            canvas.pixel(100, 50),
            Some(tessera_core::renderer::Color::BLACK),
            "Cursor outline at the hot spot"
        );
        assert_ne!(canvas.pixel(102, 54), canvas.pixel(300, 230));
    }
}
