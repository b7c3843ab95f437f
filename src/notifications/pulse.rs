// SPDX-License-Identifier: MPL-2.0
//! Attention pulse for an external indicator (the cart badge).
//!
//! The coordinator knows nothing about severities or rendering. It keeps a
//! boolean and at most one pending deactivation deadline. Two paths turn the
//! pulse off, the deadline and the indicator reporting that its animation
//! ended, and both go through the same idempotent [`PulseCoordinator::deactivate`].

use crate::domain::PulseWindow;
use std::time::Instant;

/// What a trigger did to the pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseTransition {
    /// The pulse was idle and is now active.
    Started,
    /// The pulse was already active; its window restarted from this trigger.
    Restarted,
}

/// Owns the pulse flag and its single deactivation timer.
#[derive(Debug, Default)]
pub struct PulseCoordinator {
    active: bool,
    deactivate_at: Option<Instant>,
    window: PulseWindow,
}

impl PulseCoordinator {
    /// Creates an idle coordinator with the given pulse window.
    #[must_use]
    pub fn new(window: PulseWindow) -> Self {
        Self {
            active: false,
            deactivate_at: None,
            window,
        }
    }

    /// Activates the pulse until one window after `now`.
    ///
    /// A pending deactivation is replaced, never stacked: the window always
    /// counts from the most recent trigger.
    pub fn trigger(&mut self, now: Instant) -> PulseTransition {
        let transition = if self.active {
            PulseTransition::Restarted
        } else {
            PulseTransition::Started
        };
        self.active = true;
        self.deactivate_at = Some(now + self.window.as_duration());
        log::trace!("Pulse {transition:?}, ends in {}ms", self.window.millis());
        transition
    }

    /// Fires the deactivation timer if it is due at `now`.
    ///
    /// Returns `true` if this call turned the pulse off.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deactivate_at {
            Some(deadline) if deadline <= now => self.deactivate(),
            _ => false,
        }
    }

    /// Called by the indicator once its own animation has completed.
    ///
    /// Returns `true` if this call turned the pulse off.
    pub fn on_animation_finished(&mut self) -> bool {
        self.deactivate()
    }

    /// Turns the pulse off and drops any pending deactivation.
    ///
    /// Returns `false` when the pulse was already off.
    pub fn deactivate(&mut self) -> bool {
        self.deactivate_at = None;
        if self.active {
            self.active = false;
            log::trace!("Pulse stopped");
            true
        } else {
            false
        }
    }

    /// Returns whether the indicator should currently be pulsing.
    #[must_use]
    pub fn currently_active(&self) -> bool {
        self.active
    }

    /// Returns the pending deactivation deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deactivate_at
    }

    /// Returns the configured window.
    #[must_use]
    pub fn window(&self) -> PulseWindow {
        self.window
    }
}
