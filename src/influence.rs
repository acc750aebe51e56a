//! Influences: the declarative rules that drive a control.
//!
//! An [`Influence`] lists physical sources (keys, pointer buttons, touch regions,
//! pointer motion axes, gamepad buttons, gamepad axes) that can activate a
//! [`Button`](crate::button::Button).
//! An [`AxisInfluence`] adds the numbers an [`Axis`](crate::axis::Axis) needs: the
//! `value` emitted for digital sources and per-source scale factors for analog ones.
//!
//! Both are plain values. Builders normalize as they go (duplicate sources are
//! dropped, scales default to `1.0`), so a finished influence is never mutated
//! after it is attached to a control.
//!
//! ```
//! use gameinput::{Influence, PointerAxis};
//!
//! let jump = Influence::new().key(" ").gp_button(0);
//! let look = Influence::new()
//!     .mouse_axis(PointerAxis::X)
//!     .gp_axis(2)
//!     .with_value(0.0)
//!     .pointer_axis_scale(0.01);
//! assert!(!jump.is_empty());
//! assert_eq!(look.pointer_scale(), 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative pointer motion axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAxis {
    X,
    Y,
}

impl PointerAxis {
    /// Layout encoding: `0` for X, `1` for Y.
    pub fn id(self) -> u8 {
        match self {
            PointerAxis::X => 0,
            PointerAxis::Y => 1,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(PointerAxis::X),
            1 => Some(PointerAxis::Y),
            _ => None,
        }
    }
}

/// Screen region in normalized `[0, 1]` viewport coordinates.
///
/// Active while the primary pointer (or first touch) is held strictly inside it.
/// Regions need a [`Viewport`](crate::viewport::Viewport) on the controller;
/// without one they never activate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TouchRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// `true` if `(nx, ny)` lies strictly inside. Edges do not count.
    pub fn contains(&self, nx: f32, ny: f32) -> bool {
        nx > self.left
            && nx < self.left + self.width
            && ny > self.top
            && ny < self.top + self.height
    }
}

impl Default for TouchRect {
    /// The whole viewport.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Sources that can activate a control.
///
/// An influence with no sources is valid but never activates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Influence {
    keys: Vec<String>,
    gp_buttons: Vec<usize>,
    gp_axes: Vec<usize>,
    mouse_buttons: Vec<u32>,
    mouse_axes: Vec<PointerAxis>,
    touch_rects: Vec<TouchRect>,
    gamepad: Option<usize>,
    gp_axis_threshold: f32,
}

impl Influence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        push_unique(&mut self.keys, key.into());
        self
    }

    pub fn keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().fold(self, |inf, k| inf.key(k))
    }

    pub fn gp_button(mut self, button: usize) -> Self {
        push_unique(&mut self.gp_buttons, button);
        self
    }

    pub fn gp_buttons(self, buttons: impl IntoIterator<Item = usize>) -> Self {
        buttons.into_iter().fold(self, Influence::gp_button)
    }

    pub fn gp_axis(mut self, axis: usize) -> Self {
        push_unique(&mut self.gp_axes, axis);
        self
    }

    pub fn gp_axes(self, axes: impl IntoIterator<Item = usize>) -> Self {
        axes.into_iter().fold(self, Influence::gp_axis)
    }

    pub fn mouse_button(mut self, button: u32) -> Self {
        push_unique(&mut self.mouse_buttons, button);
        self
    }

    pub fn mouse_buttons(self, buttons: impl IntoIterator<Item = u32>) -> Self {
        buttons.into_iter().fold(self, Influence::mouse_button)
    }

    pub fn mouse_axis(mut self, axis: PointerAxis) -> Self {
        push_unique(&mut self.mouse_axes, axis);
        self
    }

    pub fn mouse_axes(self, axes: impl IntoIterator<Item = PointerAxis>) -> Self {
        axes.into_iter().fold(self, Influence::mouse_axis)
    }

    pub fn touch_rect(mut self, rect: TouchRect) -> Self {
        push_unique(&mut self.touch_rects, rect);
        self
    }

    pub fn touch_rects(self, rects: impl IntoIterator<Item = TouchRect>) -> Self {
        rects.into_iter().fold(self, Influence::touch_rect)
    }

    /// Gamepad axes only count once their magnitude exceeds `threshold`.
    /// Defaults to `0.0`; negative and NaN values are stored as `0.0`.
    pub fn gp_axis_threshold(mut self, threshold: f32) -> Self {
        self.gp_axis_threshold = threshold.max(0.0);
        self
    }

    /// Restricts gamepad sources to slot `index`. Without this, the first
    /// connected gamepad is used.
    pub fn gamepad(mut self, index: usize) -> Self {
        self.gamepad = Some(index);
        self
    }

    /// Turns this into an axis influence emitting `value` for digital sources.
    pub fn with_value(self, value: f32) -> AxisInfluence {
        AxisInfluence {
            sources: self,
            value,
            gamepad_axis_scale: 1.0,
            pointer_axis_scale: 1.0,
        }
    }

    pub fn key_list(&self) -> &[String] {
        &self.keys
    }

    pub fn gp_button_list(&self) -> &[usize] {
        &self.gp_buttons
    }

    pub fn gp_axis_list(&self) -> &[usize] {
        &self.gp_axes
    }

    pub fn mouse_button_list(&self) -> &[u32] {
        &self.mouse_buttons
    }

    pub fn mouse_axis_list(&self) -> &[PointerAxis] {
        &self.mouse_axes
    }

    pub fn touch_rect_list(&self) -> &[TouchRect] {
        &self.touch_rects
    }

    pub fn gamepad_index(&self) -> Option<usize> {
        self.gamepad
    }

    pub fn gp_threshold(&self) -> f32 {
        self.gp_axis_threshold
    }

    /// Whether a gamepad axis reading passes this influence's threshold.
    pub(crate) fn gp_axis_active(&self, value: f32) -> bool {
        value.abs() > self.gp_axis_threshold
    }

    /// `true` when no source is configured.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
            && self.gp_buttons.is_empty()
            && self.gp_axes.is_empty()
            && self.mouse_buttons.is_empty()
            && self.mouse_axes.is_empty()
            && self.touch_rects.is_empty()
    }
}

/// An [`Influence`] plus the numbers an axis reports when it activates.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInfluence {
    sources: Influence,
    value: f32,
    gamepad_axis_scale: f32,
    pointer_axis_scale: f32,
}

impl AxisInfluence {
    pub fn new(sources: Influence, value: f32) -> Self {
        sources.with_value(value)
    }

    /// Multiplier applied when a gamepad axis activates this influence.
    pub fn gamepad_axis_scale(mut self, scale: f32) -> Self {
        self.gamepad_axis_scale = scale;
        self
    }

    /// Multiplier applied when pointer motion activates this influence.
    pub fn pointer_axis_scale(mut self, scale: f32) -> Self {
        self.pointer_axis_scale = scale;
        self
    }

    pub fn sources(&self) -> &Influence {
        &self.sources
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn gamepad_scale(&self) -> f32 {
        self.gamepad_axis_scale
    }

    pub fn pointer_scale(&self) -> f32 {
        self.pointer_axis_scale
    }
}

/// Stable handle to an influence attached to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfluenceId(u64);

impl fmt::Display for InfluenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Insertion-ordered influences with removal by handle.
#[derive(Debug, Clone)]
pub(crate) struct InfluenceSet<T> {
    next_id: u64,
    entries: Vec<(InfluenceId, T)>,
}

impl<T> Default for InfluenceSet<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> InfluenceSet<T> {
    pub(crate) fn push(&mut self, item: T) -> InfluenceId {
        let id = InfluenceId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, item));
        id
    }

    pub(crate) fn remove(&mut self, id: InfluenceId) -> Option<T> {
        let pos = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub(crate) fn get(&self, id: InfluenceId) -> Option<&T> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (InfluenceId, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The reading with the greatest magnitude, sign kept. Ties keep the earlier reading.
pub(crate) fn largest_magnitude(values: impl IntoIterator<Item = f32>) -> f32 {
    values.into_iter().fold(0.0, |largest, current| {
        if current.abs() > largest.abs() {
            current
        } else {
            largest
        }
    })
}
