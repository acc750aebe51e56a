//! Pointer coordinate mapping.
//!
//! The host's renderer describes its drawing area with a [`Viewport`] so pointer
//! positions can be expressed relative to it. This is a pure coordinate transform
//! and plays no part in control resolution.

/// Drawing area the pointer coordinates refer to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// World-space point shown at the middle of the viewport.
    pub center_x: f32,
    pub center_y: f32,
    /// `None` behaves like `1.0`.
    pub zoom: Option<f32>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center_x: 0.0,
            center_y: 0.0,
            zoom: None,
        }
    }

    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    fn zoom_factor(&self) -> f32 {
        match self.zoom {
            Some(z) if z != 0.0 => z,
            _ => 1.0,
        }
    }

    /// Maps to `[0, 1]` across the viewport. Zero-sized viewports map to `(0, 0)`.
    pub fn normalized(&self, x: f32, y: f32) -> (f32, f32) {
        let nx = if self.width != 0.0 { x / self.width } else { 0.0 };
        let ny = if self.height != 0.0 { y / self.height } else { 0.0 };
        (nx, ny)
    }

    /// Offset from the viewport middle, divided by zoom.
    pub fn centered(&self, x: f32, y: f32) -> (f32, f32) {
        let zoom = self.zoom_factor();
        (
            (x - self.width / 2.0) / zoom,
            (y - self.height / 2.0) / zoom,
        )
    }

    /// [`Viewport::centered`] minus the viewport's center point.
    pub fn world(&self, x: f32, y: f32) -> (f32, f32) {
        let (cx, cy) = self.centered(x, y);
        (cx - self.center_x, cy - self.center_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_spans_unit_square() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.normalized(400.0, 150.0), (0.5, 0.25));
        assert_eq!(Viewport::new(0.0, 0.0).normalized(10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn centered_applies_zoom() {
        let vp = Viewport::new(800.0, 600.0).with_zoom(2.0);
        assert_eq!(vp.centered(600.0, 300.0), (100.0, 0.0));
        assert_eq!(Viewport::new(800.0, 600.0).with_zoom(0.0).centered(0.0, 0.0), (-400.0, -300.0));
    }

    #[test]
    fn world_subtracts_center() {
        let vp = Viewport::new(100.0, 100.0).with_center(10.0, -5.0);
        assert_eq!(vp.world(50.0, 50.0), (-10.0, 5.0));
    }
}
