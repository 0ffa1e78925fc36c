use crate::vector::Vector;

/// Smallest |dx| allowed before slope-intercept math. Both lines of an
/// intersection get the same substitution.
pub const VERTICAL_EPSILON: f64 = 0.00001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector,
    pub direction: Vector,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vector, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// `(slope, intercept)` of the line through the ray. Undefined for a
    /// vertical ray; see [`Ray::non_vertical`].
    #[inline]
    pub fn slope_intercept(&self) -> (f64, f64) {
        let slope = self.direction.y / self.direction.x;
        let intercept = self.origin.y - slope * self.origin.x;
        (slope, intercept)
    }

    /// Copy with `direction.x` replaced by [`VERTICAL_EPSILON`] when it is
    /// closer to zero than that.
    #[inline]
    pub fn non_vertical(mut self) -> Self {
        if self.direction.x.abs() < VERTICAL_EPSILON {
            self.direction.x = VERTICAL_EPSILON;
        }
        self
    }

    #[inline]
    pub fn point_at(&self, distance: f64) -> Vector {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_intercept_of_diagonal() {
        let ray = Ray::new(Vector::new(1.0, 3.0), Vector::new(2.0, 1.0));
        let (slope, intercept) = ray.slope_intercept();
        assert_eq!(slope, 0.5);
        assert_eq!(intercept, 2.5);
    }

    #[test]
    fn vertical_rays_are_nudged() {
        let up = Ray::new(Vector::ZERO, Vector::new(0.0, 1.0)).non_vertical();
        assert_eq!(up.direction.x, VERTICAL_EPSILON);
        let nearly = Ray::new(Vector::ZERO, Vector::new(-0.000001, -1.0)).non_vertical();
        assert_eq!(nearly.direction.x, VERTICAL_EPSILON);
        let diagonal = Ray::new(Vector::ZERO, Vector::new(-0.5, 0.5)).non_vertical();
        assert_eq!(diagonal.direction.x, -0.5);
        assert!(up.slope_intercept().0.is_finite());
    }

    #[test]
    fn point_at_walks_the_direction() {
        let ray = Ray::new(Vector::new(1.0, 1.0), Vector::new(0.0, -1.0));
        assert_eq!(ray.point_at(2.5), Vector::new(1.0, -1.5));
    }
}
