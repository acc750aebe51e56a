//! Logical scalar controls.
//!
//! An [`Axis`] walks its influences in insertion order and reports the value of
//! the first one that activates. Values are not summed: with `w => 1.0` added
//! before `s => -1.0`, holding both keys reads `1.0`.
//!
//! Within one influence, sources are tried in this order and the first active
//! one decides the result:
//!
//! | source          | result                                          |
//! |-----------------|-------------------------------------------------|
//! | keys            | `value`                                         |
//! | pointer buttons | `value`                                         |
//! | touch regions   | `value`                                         |
//! | pointer motion  | largest-magnitude delta × `pointer_axis_scale`  |
//! | gamepad buttons | `value`                                         |
//! | gamepad axes    | largest-magnitude axis × `gamepad_axis_scale`   |
//!
//! Gamepad axes whose magnitude does not exceed the influence's threshold
//! (default `0.0`) are ignored. An axis with no active influence reads `0.0`.

use crate::controller::Controller;
use crate::influence::{largest_magnitude, AxisInfluence, InfluenceId, InfluenceSet};
use tracing::trace;

/// A named scalar control resolved first-match-wins over its influences.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    influences: InfluenceSet<AxisInfluence>,
}

impl Axis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `influence`; later influences only win when earlier ones are idle.
    pub fn add_influence(&mut self, influence: AxisInfluence) -> InfluenceId {
        self.influences.push(influence)
    }

    pub fn remove_influence(&mut self, id: InfluenceId) -> Option<AxisInfluence> {
        self.influences.remove(id)
    }

    pub fn has_influence(&self, id: InfluenceId) -> bool {
        self.influences.get(id).is_some()
    }

    pub fn influence(&self, id: InfluenceId) -> Option<&AxisInfluence> {
        self.influences.get(id)
    }

    /// Attached influences in resolution order.
    pub fn influences(&self) -> impl Iterator<Item = (InfluenceId, &AxisInfluence)> {
        self.influences.iter()
    }

    pub fn influence_count(&self) -> usize {
        self.influences.len()
    }

    pub fn clear(&mut self) {
        self.influences.clear();
    }

    /// Current value: the first active influence's result, or `0.0`.
    pub fn test(&self, input: &Controller) -> f32 {
        for (id, inf) in self.influences.iter() {
            if let Some(value) = resolve(inf, input) {
                trace!(influence = %id, value, "axis influence active");
                return value;
            }
        }
        0.0
    }
}

fn resolve(inf: &AxisInfluence, input: &Controller) -> Option<f32> {
    let sources = inf.sources();
    let state = input.state();
    let pads = input.gamepads();
    let pad = sources.gamepad_index();

    if sources.key_list().iter().any(|k| state.key(k)) {
        return Some(inf.value());
    }

    if sources
        .mouse_button_list()
        .iter()
        .any(|&b| state.pointer_button(b))
    {
        return Some(inf.value());
    }

    if input.primary_pointer_in(sources.touch_rect_list()) {
        return Some(inf.value());
    }

    let motion = largest_magnitude(
        sources
            .mouse_axis_list()
            .iter()
            .map(|&axis| input.peek_movement(axis)),
    );
    if motion != 0.0 {
        return Some(motion * inf.pointer_scale());
    }

    if sources.gp_button_list().iter().any(|&b| pads.button(b, pad)) {
        return Some(inf.value());
    }

    let stick = largest_magnitude(
        sources
            .gp_axis_list()
            .iter()
            .map(|&a| pads.axis(a, pad))
            .filter(|&v| sources.gp_axis_active(v)),
    );
    if stick != 0.0 {
        return Some(stick * inf.gamepad_scale());
    }

    None
}
