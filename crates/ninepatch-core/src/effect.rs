use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;

fn visible_by_default() -> bool {
    true
}

/// A drop shadow cast by a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Blur radius of the shadow.
    pub radius: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl DropShadow {
    pub fn new(offset_x: f64, offset_y: f64, radius: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            radius,
            visible: true,
        }
    }

    /// Union of `base` with the area the shadow may paint.
    ///
    /// The shadow starts as a copy of `base` pushed out along the offset
    /// direction. Each edge then grows by the blur radius unless the offset
    /// already carries it past the radius on that side.
    pub fn expand(&self, base: Bounds) -> Bounds {
        let mut shadow = base;
        if self.offset_x > 0.0 {
            shadow.right += self.offset_x;
        } else {
            shadow.left += self.offset_x;
        }
        if self.offset_y > 0.0 {
            shadow.bottom += self.offset_y;
        } else {
            shadow.top += self.offset_y;
        }

        let r = self.radius;
        if r > 0.0 {
            if self.offset_y < r {
                shadow.top -= r;
            }
            if self.offset_x > -r {
                shadow.right += r;
            }
            if self.offset_y > -r {
                shadow.bottom += r;
            }
            if self.offset_x < r {
                shadow.left -= r;
            }
        }

        shadow.union(&base)
    }
}

/// A blur applied to the layer's own pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBlur {
    pub radius: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl LayerBlur {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            visible: true,
        }
    }
}

/// A visual effect attached to a layer.
///
/// Only drop shadows and layer blurs can paint outside the layer box. Every
/// other effect kind deserializes to [`Effect::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(DropShadow),
    LayerBlur(LayerBlur),
    #[serde(other)]
    Other,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        match self {
            Effect::DropShadow(s) => s.visible,
            Effect::LayerBlur(b) => b.visible,
            Effect::Other => false,
        }
    }

    /// Widen `bounds` by whatever this effect can paint.
    pub fn expand(&self, bounds: Bounds) -> Bounds {
        if !self.is_visible() {
            return bounds;
        }
        match self {
            Effect::DropShadow(s) => s.expand(bounds),
            Effect::LayerBlur(b) => bounds.expand(b.radius),
            Effect::Other => bounds,
        }
    }
}

impl From<DropShadow> for Effect {
    fn from(shadow: DropShadow) -> Self {
        Effect::DropShadow(shadow)
    }
}

impl From<LayerBlur> for Effect {
    fn from(blur: LayerBlur) -> Self {
        Effect::LayerBlur(blur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Bounds {
        Bounds::new(0.0, 100.0, 50.0, 0.0)
    }

    #[test]
    fn test_blur_expands_all_sides() {
        let b = Effect::from(LayerBlur::new(5.0)).expand(base());
        assert_eq!(b, Bounds::new(-5.0, 105.0, 55.0, -5.0));
    }

    #[test]
    fn test_hidden_effects_are_noops() {
        let mut shadow = DropShadow::new(4.0, 4.0, 8.0);
        shadow.visible = false;
        let mut blur = LayerBlur::new(3.0);
        blur.visible = false;
        assert_eq!(Effect::from(shadow).expand(base()), base());
        assert_eq!(Effect::from(blur).expand(base()), base());
        assert_eq!(Effect::Other.expand(base()), base());
    }

    #[test]
    fn test_shadow_without_blur_extends_offset_side() {
        let b = DropShadow::new(6.0, -3.0, 0.0).expand(base());
        assert_eq!(b, Bounds::new(-3.0, 106.0, 50.0, 0.0));
    }

    #[test]
    fn test_shadow_blur_conditional_edges() {
        // offset_y (10) >= radius (4): the top edge is not blurred.
        let b = DropShadow::new(0.0, 10.0, 4.0).expand(base());
        assert_eq!(b, Bounds::new(0.0, 104.0, 64.0, -4.0));
    }

    #[test]
    fn test_shadow_blur_skips_edges_behind_horizontal_offset() {
        // offset_x (-10) <= -radius: the right edge is not blurred.
        let b = DropShadow::new(-10.0, 0.0, 4.0).expand(base());
        assert_eq!(b, Bounds::new(-4.0, 100.0, 54.0, -14.0));

        // offset_x (10) >= radius: the left edge is not blurred.
        let b = DropShadow::new(10.0, 0.0, 4.0).expand(base());
        assert_eq!(b, Bounds::new(-4.0, 114.0, 54.0, 0.0));
    }

    #[test]
    fn test_shadow_blur_skips_bottom_for_upward_offset() {
        let b = DropShadow::new(0.0, -10.0, 4.0).expand(base());
        assert_eq!(b, Bounds::new(-14.0, 104.0, 50.0, -4.0));
    }

    #[test]
    fn test_small_shadow_blurs_every_edge() {
        let b = DropShadow::new(0.0, 4.0, 16.0).expand(base());
        assert_eq!(b, Bounds::new(-16.0, 116.0, 70.0, -16.0));
    }

    #[test]
    fn test_shadow_never_shrinks_base() {
        for &(dx, dy, r) in &[(-20.0, -20.0, 2.0), (30.0, 0.0, 50.0), (0.0, 0.0, 0.0)] {
            let b = DropShadow::new(dx, dy, r).expand(base());
            assert!(b.contains(&base()), "shadow ({dx}, {dy}, {r}) shrank {b:?}");
        }
    }

    #[test]
    fn test_effect_json_tags() {
        let json = r#"[
            {"type": "DROP_SHADOW", "offset_x": 0, "offset_y": 4, "radius": 8},
            {"type": "LAYER_BLUR", "radius": 2, "visible": false},
            {"type": "INNER_SHADOW", "radius": 3}
        ]"#;
        let effects: Vec<Effect> = serde_json::from_str(json).unwrap();
        assert_eq!(effects[0], Effect::DropShadow(DropShadow::new(0.0, 4.0, 8.0)));
        assert!(!effects[1].is_visible());
        assert_eq!(effects[2], Effect::Other);
    }
}
