//! Serializable input layouts.
//!
//! An [`InputConfig`] declares buttons and axes by name together with their
//! influences. It is the on-disk form of a controller's bindings and can be read
//! from JSON or TOML:
//!
//! ```json
//! {
//!   "name": "default",
//!   "buttons": [
//!     { "id": "jump", "influences": [ { "keys": [" "], "gpButtons": [0] } ] }
//!   ],
//!   "axes": [
//!     { "id": "forward", "influences": [
//!       { "keys": ["w"], "value": 1.0 },
//!       { "keys": ["s"], "value": -1.0 },
//!       { "gpAxes": [1], "value": 0.0, "gamepadAxisScale": -1.0 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Absent source lists mean "not used by this influence". `value` is required on
//! axis influences; the scale factors default to `1.0`. `touchRects` lists
//! normalized `{ left, top, width, height }` regions, and `gpAxisThreshold`
//! (default `0`) sets how far a gamepad axis must move before it counts. `gpIndex` and
//! `gpAxisScale` are accepted as older spellings of `gamepadIndex` and
//! `gamepadAxisScale`, and a negative `gamepadIndex` means "first connected".
//!
//! Parsing rejects unknown fields. [`InputConfig::compile`] then validates every
//! entry (pointer axes must be `0` or `1`, numbers must be finite, thresholds and
//! region sizes must not be negative) and either produces all influences or
//! fails without producing any.

use crate::error::{InputError, Result};
use crate::influence::{AxisInfluence, Influence, PointerAxis, TouchRect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputConfig {
    /// User-facing name of the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<AxisConfig>,
}

/// Declares a button. Entries without an `influences` list are skipped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influences: Option<Vec<InfluenceConfig>>,
}

/// Declares an axis. Entries without an `influences` list are skipped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influences: Option<Vec<AxisInfluenceConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InfluenceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gp_buttons: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gp_axes: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_buttons: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_axes: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touch_rects: Vec<TouchRect>,
    #[serde(default, alias = "gpIndex", skip_serializing_if = "Option::is_none")]
    pub gamepad_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gp_axis_threshold: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisInfluenceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gp_buttons: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gp_axes: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_buttons: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mouse_axes: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub touch_rects: Vec<TouchRect>,
    #[serde(default, alias = "gpIndex", skip_serializing_if = "Option::is_none")]
    pub gamepad_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gp_axis_threshold: Option<f32>,
    /// Emitted when a key, pointer button, or gamepad button activates.
    pub value: f32,
    #[serde(default, alias = "gpAxisScale", skip_serializing_if = "Option::is_none")]
    pub gamepad_axis_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer_axis_scale: Option<f32>,
}

/// Validated influences ready to attach, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CompiledLayout {
    pub name: Option<String>,
    pub buttons: Vec<(String, Vec<Influence>)>,
    pub axes: Vec<(String, Vec<AxisInfluence>)>,
}

impl InputConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a layout file. `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Validates every entry and converts it into influences.
    pub fn compile(&self) -> Result<CompiledLayout> {
        let buttons = self
            .buttons
            .iter()
            .filter_map(|b| b.influences.as_ref().map(|list| (&b.id, list)))
            .map(|(id, list)| -> Result<(String, Vec<Influence>)> {
                let influences = list
                    .iter()
                    .map(|inf| inf.to_influence(id))
                    .collect::<Result<Vec<_>>>()?;
                Ok((id.clone(), influences))
            })
            .collect::<Result<Vec<_>>>()?;

        let axes = self
            .axes
            .iter()
            .filter_map(|a| a.influences.as_ref().map(|list| (&a.id, list)))
            .map(|(id, list)| -> Result<(String, Vec<AxisInfluence>)> {
                let influences = list
                    .iter()
                    .map(|inf| inf.to_influence(id))
                    .collect::<Result<Vec<_>>>()?;
                Ok((id.clone(), influences))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledLayout {
            name: self.name.clone(),
            buttons,
            axes,
        })
    }
}

/// Source fields shared by button and axis influence entries.
struct SourceFields<'a> {
    keys: &'a [String],
    gp_buttons: &'a [usize],
    gp_axes: &'a [usize],
    mouse_buttons: &'a [u32],
    mouse_axes: &'a [u8],
    touch_rects: &'a [TouchRect],
    gamepad_index: Option<i64>,
    gp_axis_threshold: Option<f32>,
}

impl SourceFields<'_> {
    fn build(&self, control: &str) -> Result<Influence> {
        let pointer_axes = self
            .mouse_axes
            .iter()
            .map(|&id| {
                PointerAxis::from_id(id).ok_or_else(|| {
                    InputError::invalid(control, format!("mouse axis {id} is not 0 (X) or 1 (Y)"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for rect in self.touch_rects {
            for (field, v) in [
                ("left", rect.left),
                ("top", rect.top),
                ("width", rect.width),
                ("height", rect.height),
            ] {
                finite(control, field, v)?;
            }
            if rect.width < 0.0 || rect.height < 0.0 {
                return Err(InputError::invalid(control, "touch rect size must not be negative"));
            }
        }

        let threshold = finite(
            control,
            "gpAxisThreshold",
            self.gp_axis_threshold.unwrap_or(0.0),
        )?;
        if threshold < 0.0 {
            return Err(InputError::invalid(control, "gpAxisThreshold must not be negative"));
        }

        let mut inf = Influence::new()
            .keys(self.keys.iter().cloned())
            .gp_buttons(self.gp_buttons.iter().copied())
            .gp_axes(self.gp_axes.iter().copied())
            .mouse_buttons(self.mouse_buttons.iter().copied())
            .mouse_axes(pointer_axes)
            .touch_rects(self.touch_rects.iter().copied())
            .gp_axis_threshold(threshold);

        if let Some(index) = self.gamepad_index.and_then(|i| usize::try_from(i).ok()) {
            inf = inf.gamepad(index);
        }
        Ok(inf)
    }
}

fn finite(control: &str, field: &str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::invalid(control, format!("{field} must be finite")))
    }
}

impl InfluenceConfig {
    fn fields(&self) -> SourceFields<'_> {
        SourceFields {
            keys: &self.keys,
            gp_buttons: &self.gp_buttons,
            gp_axes: &self.gp_axes,
            mouse_buttons: &self.mouse_buttons,
            mouse_axes: &self.mouse_axes,
            touch_rects: &self.touch_rects,
            gamepad_index: self.gamepad_index,
            gp_axis_threshold: self.gp_axis_threshold,
        }
    }

    pub fn to_influence(&self, control: &str) -> Result<Influence> {
        self.fields().build(control)
    }
}

impl AxisInfluenceConfig {
    fn fields(&self) -> SourceFields<'_> {
        SourceFields {
            keys: &self.keys,
            gp_buttons: &self.gp_buttons,
            gp_axes: &self.gp_axes,
            mouse_buttons: &self.mouse_buttons,
            mouse_axes: &self.mouse_axes,
            touch_rects: &self.touch_rects,
            gamepad_index: self.gamepad_index,
            gp_axis_threshold: self.gp_axis_threshold,
        }
    }

    pub fn to_influence(&self, control: &str) -> Result<AxisInfluence> {
        let sources = self.fields().build(control)?;
        let value = finite(control, "value", self.value)?;
        let gp_scale = finite(
            control,
            "gamepadAxisScale",
            self.gamepad_axis_scale.unwrap_or(1.0),
        )?;
        let ptr_scale = finite(
            control,
            "pointerAxisScale",
            self.pointer_axis_scale.unwrap_or(1.0),
        )?;
        Ok(sources
            .with_value(value)
            .gamepad_axis_scale(gp_scale)
            .pointer_axis_scale(ptr_scale))
    }
}

impl From<&Influence> for InfluenceConfig {
    fn from(inf: &Influence) -> Self {
        Self {
            keys: inf.key_list().to_vec(),
            gp_buttons: inf.gp_button_list().to_vec(),
            gp_axes: inf.gp_axis_list().to_vec(),
            mouse_buttons: inf.mouse_button_list().to_vec(),
            mouse_axes: inf.mouse_axis_list().iter().map(|a| a.id()).collect(),
            touch_rects: inf.touch_rect_list().to_vec(),
            gamepad_index: inf.gamepad_index().map(|i| i as i64),
            gp_axis_threshold: (inf.gp_threshold() != 0.0).then_some(inf.gp_threshold()),
        }
    }
}

impl From<&AxisInfluence> for AxisInfluenceConfig {
    fn from(inf: &AxisInfluence) -> Self {
        let base = InfluenceConfig::from(inf.sources());
        let non_default = |scale: f32| (scale != 1.0).then_some(scale);
        Self {
            keys: base.keys,
            gp_buttons: base.gp_buttons,
            gp_axes: base.gp_axes,
            mouse_buttons: base.mouse_buttons,
            mouse_axes: base.mouse_axes,
            touch_rects: base.touch_rects,
            gamepad_index: base.gamepad_index,
            gp_axis_threshold: base.gp_axis_threshold,
            value: inf.value(),
            gamepad_axis_scale: non_default(inf.gamepad_scale()),
            pointer_axis_scale: non_default(inf.pointer_scale()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"{
        "name": "default",
        "buttons": [
            { "id": "jump", "influences": [ { "keys": [" "], "gpButtons": [0] } ] },
            { "id": "unused" }
        ],
        "axes": [
            { "id": "forward", "influences": [
                { "keys": ["w"], "value": 1.0 },
                { "keys": ["s"], "value": -1.0 },
                { "gpAxes": [1], "gpIndex": -1, "value": 0, "gpAxisScale": -1.0 }
            ] }
        ]
    }"#;

    #[test]
    fn parses_json_layout() {
        let cfg = InputConfig::from_json_str(LAYOUT).unwrap();
        assert_eq!(cfg.name.as_deref(), Some("default"));
        assert_eq!(cfg.buttons.len(), 2);
        assert!(cfg.buttons[1].influences.is_none());

        let compiled = cfg.compile().unwrap();
        assert_eq!(compiled.buttons.len(), 1);
        let (id, forward) = &compiled.axes[0];
        assert_eq!(id, "forward");
        assert_eq!(forward.len(), 3);
        assert_eq!(forward[2].gamepad_scale(), -1.0);
        assert_eq!(forward[2].pointer_scale(), 1.0);
        assert_eq!(forward[2].sources().gamepad_index(), None);
    }

    #[test]
    fn parses_toml_layout() {
        let text = r#"
            name = "toml"

            [[buttons]]
            id = "fire"

            [[buttons.influences]]
            mouseButtons = [0]
            gamepadIndex = 1

            [[axes]]
            id = "turn"

            [[axes.influences]]
            mouseAxes = [0]
            value = 0.0
            pointerAxisScale = 0.1
        "#;
        let compiled = InputConfig::from_toml_str(text).unwrap().compile().unwrap();
        let (_, fire) = &compiled.buttons[0];
        assert_eq!(fire[0].mouse_button_list(), [0]);
        assert_eq!(fire[0].gamepad_index(), Some(1));
        let (_, turn) = &compiled.axes[0];
        assert_eq!(turn[0].sources().mouse_axis_list(), [PointerAxis::X]);
        assert_eq!(turn[0].pointer_scale(), 0.1);
    }

    #[test]
    fn axis_value_is_required() {
        let text = r#"{ "axes": [ { "id": "x", "influences": [ { "keys": ["a"] } ] } ] }"#;
        assert!(matches!(
            InputConfig::from_json_str(text),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = r#"{ "buttons": [ { "id": "x", "influences": [ { "kes": ["a"] } ] } ] }"#;
        assert!(InputConfig::from_json_str(text).is_err());
    }

    #[test]
    fn bad_pointer_axis_fails_the_whole_layout() {
        let text = r#"{
            "buttons": [ { "id": "ok", "influences": [ { "keys": ["a"] } ] } ],
            "axes": [ { "id": "look", "influences": [ { "mouseAxes": [2], "value": 0 } ] } ]
        }"#;
        let err = InputConfig::from_json_str(text).unwrap().compile().unwrap_err();
        match err {
            InputError::InvalidInfluence { control, .. } => assert_eq!(control, "look"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_influence_is_accepted() {
        let text = r#"{ "buttons": [ { "id": "noop", "influences": [ {} ] } ] }"#;
        let compiled = InputConfig::from_json_str(text).unwrap().compile().unwrap();
        assert!(compiled.buttons[0].1[0].is_empty());
    }

    #[test]
    fn export_omits_defaults() {
        let inf = Influence::new().key("w").with_value(1.0);
        let json = serde_json::to_string(&AxisInfluenceConfig::from(&inf)).unwrap();
        assert_eq!(json, r#"{"keys":["w"],"value":1.0}"#);
    }

    #[test]
    fn touch_rects_and_thresholds_load() {
        let text = r#"{
            "buttons": [ { "id": "tap", "influences": [
                { "touchRects": [ { "left": 0.5, "top": 0.0, "width": 0.5, "height": 1.0 } ] },
                { "gpAxes": [0], "gpAxisThreshold": 0.3 }
            ] } ]
        }"#;
        let compiled = InputConfig::from_json_str(text).unwrap().compile().unwrap();
        let (_, tap) = &compiled.buttons[0];
        assert_eq!(tap[0].touch_rect_list(), [TouchRect::new(0.5, 0.0, 0.5, 1.0)]);
        assert_eq!(tap[0].gp_threshold(), 0.0);
        assert_eq!(tap[1].gp_threshold(), 0.3);

        let back = InfluenceConfig::from(&tap[1]);
        assert_eq!(back.gp_axis_threshold, Some(0.3));
        assert!(InfluenceConfig::from(&tap[0]).gp_axis_threshold.is_none());
    }

    #[test]
    fn negative_threshold_or_size_is_invalid() {
        let threshold = r#"{ "buttons": [ { "id": "b", "influences": [ { "gpAxes": [0], "gpAxisThreshold": -0.1 } ] } ] }"#;
        let size = r#"{ "buttons": [ { "id": "b", "influences": [
            { "touchRects": [ { "left": 0, "top": 0, "width": -1, "height": 1 } ] }
        ] } ] }"#;
        for text in [threshold, size] {
            assert!(matches!(
                InputConfig::from_json_str(text).unwrap().compile(),
                Err(InputError::InvalidInfluence { .. })
            ));
        }
    }

    #[test]
    fn toml_output_parses_back() {
        let cfg = InputConfig::from_json_str(LAYOUT).unwrap();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(InputConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
