use crate::ray::Ray;
use crate::vector::Vector;

pub const FOCAL_LENGTH: f64 = 1.0;

pub struct Camera {
    pub position: Vector,  // eye position on the map plane
    pub direction: Vector, // unit facing direction
    pub view_width: f64,   // view plane width, the screen aspect ratio
}

impl Camera {
    pub fn new(position: Vector, direction: Vector, width: usize, height: usize) -> Self {
        Self {
            position,
            direction,
            view_width: width as f64 / height as f64,
        }
    }

    #[inline]
    pub fn view_plane(&self) -> Vector {
        self.direction.orthogonal() * self.view_width
    }

    /// Left end of the view plane, `FOCAL_LENGTH` in front of the eye.
    #[inline]
    pub fn view_start(&self) -> Vector {
        let center = self.position + self.direction * FOCAL_LENGTH;
        center - self.view_plane() / 2.0
    }

    /// Unit ray through screen column `x` of `columns`, and the distance
    /// from the eye to that column's point on the view plane.
    #[inline]
    pub fn column_ray(&self, x: usize, columns: usize) -> (Ray, f64) {
        let step = self.view_plane() / columns as f64;
        let column = self.view_start() + step * x as f64;
        let direction = column - self.position;
        let view_plane_distance = direction.length();
        (
            Ray::new(self.position, direction / view_plane_distance),
            view_plane_distance,
        )
    }
}

/// Distance along the view direction rather than along the ray. Using this
/// instead of the raw distance removes the fisheye bulge.
#[inline]
pub fn perpendicular_distance(ray_distance: f64, view_plane_distance: f64) -> f64 {
    ray_distance / (view_plane_distance / FOCAL_LENGTH)
}

/// On-screen height of a unit-tall wall at `perpendicular` distance.
#[inline]
pub fn projected_height(perpendicular: f64, screen_height: usize) -> f64 {
    FOCAL_LENGTH / perpendicular * screen_height as f64
}
