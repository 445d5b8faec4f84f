//! Staging of map switches triggered by teleporters.

use macroquad::prelude::*;

use crate::teleporter::{Destination, Teleporter};

/// A switch staged during one frame and applied at the start of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSwitch {
    /// Where to go.
    pub destination: Destination,
    /// Index of the teleporter that fired.
    pub teleporter: usize,
}

/// `Active` ⇄ `SwitchPending` state machine.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    pending: Option<PendingSwitch>,
    /// Teleporter whose switch failed; ignored until the player steps off it.
    suppressed: Option<usize>,
}

impl TransitionController {
    /// Controller in the `Active` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a switch is staged.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Stages the destination of the first teleporter (file order) the box
    /// overlaps. Does nothing if a switch is already staged.
    pub fn check(&mut self, teleporters: &[Teleporter], center: Vec2, size: Vec2) -> bool {
        if self.pending.is_some() {
            return false;
        }

        if let Some(idx) = self.suppressed {
            let still_on = teleporters.get(idx).is_some_and(|t| t.contains(center, size));
            if !still_on {
                self.suppressed = None;
            }
        }

        let hit = teleporters
            .iter()
            .enumerate()
            .find(|(idx, t)| Some(*idx) != self.suppressed && t.contains(center, size));

        match hit {
            Some((idx, t)) => {
                log::debug!(
                    "teleporter {} staged switch to {:?}",
                    idx,
                    t.destination.layers
                );
                self.pending = Some(PendingSwitch {
                    destination: t.destination.clone(),
                    teleporter: idx,
                });
                true
            }
            None => false,
        }
    }

    /// Takes the staged switch, returning to `Active`.
    pub fn take_pending(&mut self) -> Option<PendingSwitch> {
        self.pending.take()
    }

    /// Records that the switch from `teleporter` could not be completed.
    pub fn switch_failed(&mut self, teleporter: usize) {
        self.suppressed = Some(teleporter);
    }

    /// Forgets any suppression, e.g. once a new world is active.
    pub fn switch_completed(&mut self) {
        self.suppressed = None;
    }
}
