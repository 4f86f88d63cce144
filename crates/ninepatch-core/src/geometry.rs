use serde::{Deserialize, Serialize};

/// A 2D point in document coordinates (pixels at 1x).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An unrotated layer box: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink the rectangle by `d` on every side.
    pub fn inset(&self, d: f64) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            width: self.width - 2.0 * d,
            height: self.height - 2.0 * d,
        }
    }
}

/// Axis-aligned edges `[top, right, bottom, left]` in parent coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Bounds {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            top: rect.y,
            right: rect.right(),
            bottom: rect.bottom(),
            left: rect.x,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width(), self.height())
    }

    /// Grow every edge outward by `d`.
    pub fn expand(&self, d: f64) -> Self {
        Self {
            top: self.top - d,
            right: self.right + d,
            bottom: self.bottom + d,
            left: self.left - d,
        }
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
            left: self.left.min(other.left),
        }
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
            && self.left <= other.left
    }
}

/// Axis-aligned bounds of a `width` x `height` box rotated by `rotation`
/// degrees about its top-left corner `(x, y)`.
///
/// Negative angles take the clockwise branch. Both branches reduce to the
/// plain box at `rotation == 0`. This is a closed-form approximation, not a
/// general affine composition: it is exact for `|rotation| <= 90`.
pub fn rotated_bounds(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Bounds {
    if rotation < 0.0 {
        let rad = (-rotation).to_radians();
        let (sin, cos) = rad.sin_cos();
        Bounds {
            top: y,
            right: x + cos * width,
            bottom: y + cos * height + sin * width,
            left: x - sin * height,
        }
    } else {
        let rad = rotation.to_radians();
        let (sin, cos) = rad.sin_cos();
        Bounds {
            top: y - sin * width,
            right: x + cos * width + sin * height,
            bottom: y + cos * height,
            left: x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bounds_eq(a: &Bounds, b: &Bounds) {
        assert!((a.top - b.top).abs() < 1e-9, "top {} != {}", a.top, b.top);
        assert!((a.right - b.right).abs() < 1e-9, "right {} != {}", a.right, b.right);
        assert!((a.bottom - b.bottom).abs() < 1e-9, "bottom {} != {}", a.bottom, b.bottom);
        assert!((a.left - b.left).abs() < 1e-9, "left {} != {}", a.left, b.left);
    }

    #[test]
    fn test_unrotated_is_plain_box() {
        let b = rotated_bounds(3.0, 4.0, 100.0, 50.0, 0.0);
        assert_eq!(b, Bounds::new(4.0, 103.0, 54.0, 3.0));
    }

    #[test]
    fn test_branches_agree_near_zero() {
        let pos = rotated_bounds(10.0, 20.0, 30.0, 40.0, 1e-12);
        let neg = rotated_bounds(10.0, 20.0, 30.0, 40.0, -1e-12);
        assert_bounds_eq(&pos, &neg);
        assert_bounds_eq(&pos, &Bounds::new(20.0, 40.0, 60.0, 10.0));
    }

    #[test]
    fn test_rotate_90_counter_clockwise() {
        // The box swings up above its origin.
        let b = rotated_bounds(0.0, 0.0, 100.0, 50.0, 90.0);
        assert_bounds_eq(&b, &Bounds::new(-100.0, 50.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate_90_clockwise() {
        let b = rotated_bounds(0.0, 0.0, 100.0, 50.0, -90.0);
        assert_bounds_eq(&b, &Bounds::new(0.0, 0.0, 100.0, -50.0));
    }

    #[test]
    fn test_rotate_45_square() {
        let b = rotated_bounds(0.0, 0.0, 10.0, 10.0, 45.0);
        let d = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_bounds_eq(&b, &Bounds::new(-d, 2.0 * d, d, 0.0));
        assert!((b.width() - b.height()).abs() < 1e-9);
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(-1.0, -1.0, 102.0, 52.0).inset(1.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!((r.right(), r.bottom()), (100.0, 50.0));
    }

    #[test]
    fn test_bounds_union_and_expand() {
        let a = Bounds::from_rect(&Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Bounds::from_rect(&Rect::new(20.0, 20.0, 10.0, 10.0));
        let u = a.union(&b);
        assert_eq!(u, Bounds::new(0.0, 30.0, 30.0, 0.0));
        assert!(u.expand(1.0).contains(&u));
        assert_eq!(u.expand(1.0).to_rect(), Rect::new(-1.0, -1.0, 32.0, 32.0));
    }
}
