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

use super::PanelBox;

/// The pending stack changes: one base replacement, one push and one pop.
///
/// Requests are only recorded here. The panel stack realizes them at its
/// apply point, after the callback that made them has returned. A second
/// request of the same kind before the apply point replaces the first; the
/// replaced panel is dropped on the spot.
#[derive(Default)]
pub struct Transitions {
    next_panel: Option<PanelBox>,
    next_sub_panel: Option<PanelBox>,
    pop_requested: bool,
}

impl Transitions {
    /// Creates an empty command buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a base-panel replacement.
    pub fn stage_panel(&mut self, panel: PanelBox) {
        if let Some(superseded) = self.next_panel.replace(panel) {
            log::warn!(
                "Pending panel '{}' was superseded before being applied; dropping it.",
                superseded.name()
            );
        }
    }

    /// Records a sub-panel push.
    pub fn stage_sub_panel(&mut self, panel: PanelBox) {
        if let Some(superseded) = self.next_sub_panel.replace(panel) {
            log::warn!(
                "Pending sub-panel '{}' was superseded before being applied; dropping it.",
                superseded.name()
            );
        }
    }

    /// Records a sub-panel pop against a stack currently holding
    /// `sub_panel_count` sub-panels.
    ///
    /// # Panics
    ///
    /// Panics on a double pop request, and when there is nothing to pop. Both
    /// are bugs in the calling panel.
    pub fn stage_pop(&mut self, sub_panel_count: usize) {
        assert!(
            !self.pop_requested,
            "double pop request: a sub-panel pop is already scheduled"
        );
        assert!(
            sub_panel_count > 0,
            "nothing to pop: there are no sub-panels on the stack"
        );
        self.pop_requested = true;
    }

    /// Whether a pop is pending.
    pub fn pop_requested(&self) -> bool {
        self.pop_requested
    }

    /// Whether a base replacement is pending.
    pub fn has_pending_panel(&self) -> bool {
        self.next_panel.is_some()
    }

    /// Whether a push is pending.
    pub fn has_pending_sub_panel(&self) -> bool {
        self.next_sub_panel.is_some()
    }

    /// Whether nothing at all is pending.
    pub fn is_empty(&self) -> bool {
        !self.pop_requested && self.next_panel.is_none() && self.next_sub_panel.is_none()
    }

    /// Clears and returns the pop flag.
    pub fn take_pop(&mut self) -> bool {
        std::mem::take(&mut self.pop_requested)
    }

    /// Removes the pending push, if any.
    pub fn take_sub_panel(&mut self) -> Option<PanelBox> {
        self.next_sub_panel.take()
    }

    /// Removes the pending base replacement, if any.
    pub fn take_panel(&mut self) -> Option<PanelBox> {
        self.next_panel.take()
    }
}

/// The request-only view of [`Transitions`] handed to panel callbacks.
pub struct Stager<'a> {
    transitions: &'a mut Transitions,
    sub_panel_count: usize,
}

impl<'a> Stager<'a> {
    /// Wraps the command buffer of a stack that currently holds
    /// `sub_panel_count` sub-panels.
    pub fn new(transitions: &'a mut Transitions, sub_panel_count: usize) -> Self {
        Self {
            transitions,
            sub_panel_count,
        }
    }

    /// See [`Transitions::stage_panel`].
    pub fn set_panel(&mut self, panel: PanelBox) {
        self.transitions.stage_panel(panel);
    }

    /// See [`Transitions::stage_sub_panel`].
    pub fn push_sub_panel(&mut self, panel: PanelBox) {
        self.transitions.stage_sub_panel(panel);
    }

    /// See [`Transitions::stage_pop`].
    pub fn pop_sub_panel(&mut self) {
        self.transitions.stage_pop(self.sub_panel_count);
    }

    /// Number of sub-panels on the stack when this stager was created.
    pub fn sub_panel_count(&self) -> usize {
        self.sub_panel_count
    }
}
