use crate::vector::Vector;

/// Axis-aligned box. `min <= max` on both axes is assumed, never checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vector,
    pub max: Vector,
}

impl Rect {
    #[inline]
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    pub fn centered(center: Vector, size: Vector) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vector {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        let size = self.size();
        size.x / size.y
    }

    /// Shortest axis-aligned push that separates `other` from `self`, or
    /// `None` if they don't overlap. Subtract the result from `self` (or add
    /// it to `other`) to resolve.
    pub fn intersection(&self, other: &Rect) -> Option<Vector> {
        let left = Vector::new(self.max.x - other.min.x, 0.0);
        if left.x <= 0.0 {
            return None;
        }
        let right = Vector::new(self.min.x - other.max.x, 0.0);
        if right.x >= 0.0 {
            return None;
        }
        let up = Vector::new(0.0, self.max.y - other.min.y);
        if up.y <= 0.0 {
            return None;
        }
        let down = Vector::new(0.0, self.min.y - other.max.y);
        if down.y >= 0.0 {
            return None;
        }

        [left, right, up, down]
            .into_iter()
            .min_by(|a, b| a.length().total_cmp(&b.length()))
    }
}
