//! Logical boolean controls.

use crate::controller::Controller;
use crate::influence::{Influence, InfluenceId, InfluenceSet};
use tracing::trace;

/// A named on/off control, pressed while any of its influences is active.
#[derive(Debug, Clone, Default)]
pub struct Button {
    influences: InfluenceSet<Influence>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `influence` and returns a handle for later removal.
    pub fn add_influence(&mut self, influence: Influence) -> InfluenceId {
        self.influences.push(influence)
    }

    pub fn remove_influence(&mut self, id: InfluenceId) -> Option<Influence> {
        self.influences.remove(id)
    }

    pub fn has_influence(&self, id: InfluenceId) -> bool {
        self.influences.get(id).is_some()
    }

    pub fn influence(&self, id: InfluenceId) -> Option<&Influence> {
        self.influences.get(id)
    }

    /// Attached influences in insertion order.
    pub fn influences(&self) -> impl Iterator<Item = (InfluenceId, &Influence)> {
        self.influences.iter()
    }

    pub fn influence_count(&self) -> usize {
        self.influences.len()
    }

    pub fn clear(&mut self) {
        self.influences.clear();
    }

    /// `true` if any influence has an active source.
    ///
    /// Reads are non-destructive, so testing the same button twice in one frame
    /// gives the same answer.
    pub fn test(&self, input: &Controller) -> bool {
        self.influences.iter().any(|(id, inf)| {
            let active = is_active(inf, input);
            if active {
                trace!(influence = %id, "button influence active");
            }
            active
        })
    }
}

/// Per influence, sources are checked as: keys, gamepad buttons, pointer buttons,
/// touch regions, pointer motion, gamepad axes past the influence's threshold.
fn is_active(inf: &Influence, input: &Controller) -> bool {
    let state = input.state();
    let pads = input.gamepads();
    let pad = inf.gamepad_index();

    inf.key_list().iter().any(|k| state.key(k))
        || inf.gp_button_list().iter().any(|&b| pads.button(b, pad))
        || inf
            .mouse_button_list()
            .iter()
            .any(|&b| state.pointer_button(b))
        || input.primary_pointer_in(inf.touch_rect_list())
        || inf
            .mouse_axis_list()
            .iter()
            .any(|&axis| input.peek_movement(axis) != 0.0)
        || inf
            .gp_axis_list()
            .iter()
            .any(|&a| inf.gp_axis_active(pads.axis(a, pad)))
}
