use crate::ray::Ray;
use crate::texture::Texture;
use crate::vector::Vector;

/// A sprite's footprint in the map plane: a segment from `start` along
/// `direction` for `length` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    pub start: Vector,
    pub direction: Vector,
    pub length: f64,
    pub texture: Texture,
}

impl Billboard {
    pub fn new(start: Vector, direction: Vector, length: f64, texture: Texture) -> Self {
        Self {
            start,
            direction,
            length,
            texture,
        }
    }

    /// Unit-wide billboard centered on `position`, square to `view`.
    pub fn facing(position: Vector, view: Vector, texture: Texture) -> Self {
        let across = view.orthogonal();
        Self::new(position - across / 2.0, across, 1.0, texture)
    }

    #[inline]
    pub fn end(&self) -> Vector {
        self.start + self.direction * self.length
    }

    /// Where `ray` crosses the segment, if it does so in front of the ray.
    pub fn hit_test(&self, ray: &Ray) -> Option<Vector> {
        let lhs = ray.non_vertical();
        let rhs = Ray::new(self.start, self.direction).non_vertical();

        let (slope1, intercept1) = lhs.slope_intercept();
        let (slope2, intercept2) = rhs.slope_intercept();
        if slope1 == slope2 {
            return None;
        }

        let x = (intercept1 - intercept2) / (slope2 - slope1);
        let y = slope1 * x + intercept1;

        let along_ray = (x - lhs.origin.x) / lhs.direction.x;
        if along_ray < 0.0 {
            return None;
        }
        let along_billboard = (x - rhs.origin.x) / rhs.direction.x;
        if along_billboard < 0.0 || along_billboard > self.length {
            return None;
        }
        Some(Vector::new(x, y))
    }
}
