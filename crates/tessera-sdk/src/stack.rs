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

//! The panel stack and its deferred-transition protocol.

use anyhow::{Context as _, Result};
use tessera_core::panel::{Panel, PanelBox, Stager, Transitions};
use tessera_core::renderer::{Canvas, CursorAlignment, Texture};

/// Owns every live panel: one base panel and the sub-panels above it.
///
/// The active panel is the top sub-panel, or the base panel when there are
/// none. Panels only ever see the stack through a [`Stager`], so a running
/// callback can request changes but never observe them; the changes take
/// effect in [`PanelStack::apply_deferred_transitions`].
pub struct PanelStack {
    base: PanelBox,
    sub_panels: Vec<PanelBox>,
    transitions: Transitions,
}

impl PanelStack {
    /// Creates a stack holding only `base`.
    pub fn new(base: PanelBox) -> Self {
        log::debug!("Panel stack created with base panel '{}'.", base.name());
        Self {
            base,
            sub_panels: Vec::new(),
            transitions: Transitions::new(),
        }
    }

    /// Stages a base-panel replacement.
    pub fn set_panel(&mut self, panel: PanelBox) {
        self.transitions.stage_panel(panel);
    }

    /// Stages a sub-panel push.
    pub fn push_sub_panel(&mut self, panel: PanelBox) {
        self.transitions.stage_sub_panel(panel);
    }

    /// Stages removal of the top sub-panel.
    ///
    /// # Panics
    ///
    /// Panics if a pop is already staged or if there are no sub-panels.
    pub fn pop_sub_panel(&mut self) {
        self.transitions.stage_pop(self.sub_panels.len());
    }

    /// The panel currently receiving input.
    pub fn active(&self) -> &dyn Panel {
        match self.sub_panels.last() {
            Some(top) => top.as_ref(),
            None => self.base.as_ref(),
        }
    }

    /// Mutable access to the panel currently receiving input.
    pub fn active_mut(&mut self) -> &mut dyn Panel {
        match self.sub_panels.last_mut() {
            Some(top) => top.as_mut(),
            None => self.base.as_mut(),
        }
    }

    /// The base panel.
    pub fn base(&self) -> &dyn Panel {
        self.base.as_ref()
    }

    /// Number of sub-panels above the base panel.
    pub fn sub_panel_count(&self) -> usize {
        self.sub_panels.len()
    }

    /// Whether any transition is staged and not yet applied.
    pub fn has_pending_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Runs `f` on the active panel together with a [`Stager`] for this stack.
    ///
    /// This is the only way panel callbacks get to request stack changes.
    pub fn with_active<R>(&mut self, f: impl FnOnce(&mut dyn Panel, Stager<'_>) -> R) -> R {
        let stager = Stager::new(&mut self.transitions, self.sub_panels.len());
        let active: &mut dyn Panel = match self.sub_panels.last_mut() {
            Some(top) => top.as_mut(),
            None => self.base.as_mut(),
        };
        f(active, stager)
    }

    /// Realizes the staged transitions: pop, then push, then base replacement.
    ///
    /// Each step only runs if it was staged. Panels removed here are dropped
    /// here.
    pub fn apply_deferred_transitions(&mut self) {
        if self.transitions.take_pop() {
            if let Some(popped) = self.sub_panels.pop() {
                log::debug!("Popped sub-panel '{}'.", popped.name());
                drop(popped);
            }
            let exposed = self.active_mut();
            log::debug!("Resuming panel '{}'.", exposed.name());
            exposed.on_pause_changed(false);
        }

        if let Some(panel) = self.transitions.take_sub_panel() {
            let covered = self.active_mut();
            log::debug!(
                "Pausing panel '{}' under sub-panel '{}'.",
                covered.name(),
                panel.name()
            );
            covered.on_pause_changed(true);
            self.sub_panels.push(panel);
        }

        if let Some(panel) = self.transitions.take_panel() {
            let old = std::mem::replace(&mut self.base, panel);
            log::debug!(
                "Replaced base panel '{}' with '{}'.",
                old.name(),
                self.base.name()
            );
            drop(old);
        }
    }

    /// Forwards a resize to the base panel, then to every sub-panel bottom to top.
    pub fn resize_all(&mut self, width: u32, height: u32) {
        self.base.resize(width, height);
        for panel in &mut self.sub_panels {
            panel.resize(width, height);
        }
    }

    /// Draws every panel bottom to top, then the active panel's secondary pass.
    pub fn render(&self, canvas: &mut Canvas) -> Result<()> {
        self.base
            .render(canvas)
            .with_context(|| format!("panel '{}' failed to render", self.base.name()))?;
        for panel in &self.sub_panels {
            panel
                .render(canvas)
                .with_context(|| format!("panel '{}' failed to render", panel.name()))?;
        }

        let active = self.active();
        active.render_secondary(canvas).with_context(|| {
            format!("panel '{}' failed to render its overlay", active.name())
        })
    }

    /// The cursor of the active panel, if it wants one drawn.
    pub fn active_cursor(&self) -> Option<(&Texture, CursorAlignment)> {
        self.active().current_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessera_core::event::InputEvent;
    use tessera_core::panel::PanelContext;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
        fail_render: bool,
    }

    impl Probe {
        fn boxed(name: &'static str, log: &Log) -> PanelBox {
            Box::new(Self {
                name,
                log: log.clone(),
                fail_render: false,
            })
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{} {}", self.name, what));
        }
    }

    impl Panel for Probe {
        fn handle_event(&mut self, _: &InputEvent, _: &mut PanelContext<'_>) -> Result<()> {
            Ok(())
        }

        fn tick(&mut self, _: f64, _: &mut PanelContext<'_>) -> Result<()> {
            Ok(())
        }

        fn render(&self, _: &mut Canvas) -> Result<()> {
            if self.fail_render {
                bail!("out of ink");
            }
            self.record("render");
            Ok(())
        }

        fn render_secondary(&self, _: &mut Canvas) -> Result<()> {
            self.record("overlay");
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.record(&format!("resize {width}x{height}"));
        }

        fn on_pause_changed(&mut self, paused: bool) {
            self.record(if paused { "paused" } else { "unpaused" });
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.record("dropped");
        }
    }

    fn stack_with(log: &Log, subs: &[&'static str]) -> PanelStack {
        let mut stack = PanelStack::new(Probe::boxed("base", log));
        for name in subs {
            stack.push_sub_panel(Probe::boxed(name, log));
            stack.apply_deferred_transitions();
        }
        log.borrow_mut().clear();
        stack
    }

    fn taken(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn push_makes_the_pushed_panel_active_and_pauses_the_previous_one() {
        let log = Log::default();
        let mut stack = stack_with(&log, &[]);

        stack.push_sub_panel(Probe::boxed("menu", &log));
        assert_eq!(stack.active().name(), "base", "Staging must not change the stack");

        stack.apply_deferred_transitions();
        assert_eq!(stack.active().name(), "menu");
        assert_eq!(stack.sub_panel_count(), 1);
        assert_eq!(taken(&log), vec!["base paused"]);
    }

    #[test]
    fn pop_exposes_the_panel_below_and_unpauses_it() {
        let log = Log::default();
        let mut stack = stack_with(&log, &["first", "second"]);

        stack.pop_sub_panel();
        stack.apply_deferred_transitions();
        assert_eq!(stack.active().name(), "first");
        assert_eq!(taken(&log), vec!["second dropped", "first unpaused"]);

        stack.pop_sub_panel();
        stack.apply_deferred_transitions();
        assert_eq!(stack.active().name(), "base");
        assert_eq!(taken(&log), vec!["first dropped", "base unpaused"]);
    }

    #[test]
    fn one_apply_runs_pop_then_push_then_base_replacement() {
        let log = Log::default();
        let mut stack = stack_with(&log, &["first", "second"]);

        stack.set_panel(Probe::boxed("new base", &log));
        stack.push_sub_panel(Probe::boxed("third", &log));
        stack.pop_sub_panel();
        stack.apply_deferred_transitions();

        assert_eq!(
            taken(&log),
            vec![
                "second dropped",
                "first unpaused",
                "first paused",
                "base dropped"
            ]
        );
        assert_eq!(stack.active().name(), "third");
        assert_eq!(stack.base().name(), "new base");
        assert_eq!(stack.sub_panel_count(), 2);
        assert!(!stack.has_pending_transitions());

        stack.apply_deferred_transitions();
        assert!(taken(&log).is_empty(), "A second apply must be a no-op");
    }

    #[test]
    #[should_panic(expected = "double pop request")]
    fn double_pop_faults() {
        let log = Log::default();
        let mut stack = stack_with(&log, &["first", "second"]);
        stack.pop_sub_panel();
        stack.pop_sub_panel();
    }

    #[test]
    #[should_panic(expected = "nothing to pop")]
    fn pop_without_sub_panels_faults() {
        let log = Log::default();
        let mut stack = stack_with(&log, &[]);
        stack.pop_sub_panel();
    }

    #[test]
    fn callbacks_stage_through_the_stager_without_touching_the_stack() {
        let log = Log::default();
        let mut stack = stack_with(&log, &["menu"]);

        let seen = stack.with_active(|panel, mut stager| {
            stager.pop_sub_panel();
            stager.push_sub_panel(Probe::boxed("options", &log));
            (panel.name().to_owned(), stager.sub_panel_count())
        });
        assert_eq!(seen, ("menu".to_owned(), 1));
        assert_eq!(stack.active().name(), "menu");
        assert!(stack.has_pending_transitions());

        stack.apply_deferred_transitions();
        assert_eq!(stack.active().name(), "options");
        assert_eq!(stack.sub_panel_count(), 1);
    }

    #[test]
    fn superseded_push_is_dropped_before_apply() {
        let log = Log::default();
        let mut stack = stack_with(&log, &[]);

        stack.push_sub_panel(Probe::boxed("first choice", &log));
        stack.push_sub_panel(Probe::boxed("second choice", &log));
        assert_eq!(taken(&log), vec!["first choice dropped"]);

        stack.apply_deferred_transitions();
        assert_eq!(stack.active().name(), "second choice");
    }

    #[test]
    fn resize_reaches_base_then_sub_panels_bottom_to_top() {
        let log = Log::default();
        let mut stack = stack_with(&log, &["first", "second"]);

        stack.resize_all(800, 600);
        assert_eq!(
            taken(&log),
            vec![
                "base resize 800x600",
                "first resize 800x600",
                "second resize 800x600"
            ]
        );
    }

    #[test]
    fn render_draws_bottom_to_top_with_overlay_for_the_active_panel_only() {
        let log = Log::default();
        let stack = stack_with(&log, &["first", "second"]);
        let mut canvas = Canvas::new(4, 4);

        stack.render(&mut canvas).unwrap();
        assert_eq!(
            taken(&log),
            vec![
                "base render",
                "first render",
                "second render",
                "second overlay"
            ]
        );
    }

    #[test]
    fn render_failure_names_the_panel() {
        let log = Log::default();
        let stack = PanelStack::new(Box::new(Probe {
            name: "broken",
            log: log.clone(),
            fail_render: true,
        }));

        let err = stack.render(&mut Canvas::new(1, 1)).unwrap_err();
        assert!(format!("{err:#}").contains("panel 'broken' failed to render"));
        assert!(format!("{err:#}").contains("out of ink"));
    }
}
