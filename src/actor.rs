use crate::rect::Rect;
use crate::tilemap::Tilemap;
use crate::vector::Vector;
use crate::world::World;

/// Upper bound on push-out passes in [`Actor::avoid_walls`].
pub const AVOID_WALLS_ATTEMPTS: usize = 10;

/// Anything with a square footprint that takes part in collision.
///
/// Implementors provide the three capability accessors; the collision and
/// wall-avoidance logic comes from the default methods.
pub trait Actor {
    fn radius(&self) -> f64;
    fn position(&self) -> Vector;
    fn set_position(&mut self, position: Vector);

    fn is_dead(&self) -> bool {
        false
    }

    fn rect(&self) -> Rect {
        let half = Vector::new(self.radius(), self.radius());
        let position = self.position();
        Rect::new(position - half, position + half)
    }

    /// Dead actors are intangible.
    fn intersection_with_actor(&self, other: &dyn Actor) -> Option<Vector> {
        if self.is_dead() || other.is_dead() {
            return None;
        }
        self.rect().intersection(&other.rect())
    }

    /// Deepest push out of any wall tile the footprint overlaps. Taking the
    /// largest keeps concave corners from flipping between two walls.
    fn intersection_with_map(&self, map: &Tilemap) -> Option<Vector> {
        let rect = self.rect();
        let (min_x, max_x) = (rect.min.x.floor() as isize, rect.max.x.floor() as isize);
        let (min_y, max_y) = (rect.min.y.floor() as isize, rect.max.y.floor() as isize);

        let mut largest: Option<Vector> = None;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if !map.is_wall(x, y) {
                    continue;
                }
                let Some(push) = rect.intersection(&Tilemap::tile_rect(x, y)) else {
                    continue;
                };
                if push.length() > largest.map_or(0.0, Vector::length) {
                    largest = Some(push);
                }
            }
        }
        largest
    }

    /// Map first, then doors, then pushwalls.
    fn intersection_with_world(&self, world: &World) -> Option<Vector> {
        if let Some(push) = self.intersection_with_map(&world.map) {
            return Some(push);
        }
        if let Some(push) = world
            .doors
            .iter()
            .find_map(|door| self.intersection_with_actor(door))
        {
            return Some(push);
        }
        let position = self.position();
        world
            .pushwalls
            .iter()
            .filter(|pushwall| pushwall.position != position)
            .find_map(|pushwall| self.intersection_with_actor(pushwall))
    }

    /// Push out of walls until clear or out of attempts. May give up inside
    /// a wall on pathological geometry.
    fn avoid_walls(&mut self, world: &World) {
        for _ in 0..AVOID_WALLS_ATTEMPTS {
            let Some(push) = self.intersection_with_world(world) else {
                return;
            };
            self.set_position(self.position() - push);
        }
    }

    /// Off the map (with a one-tile margin), inside a wall, or overlapping a
    /// pushwall. Gameplay uses this to hurt trapped actors.
    fn is_stuck(&self, world: &World) -> bool {
        let position = self.position();
        let size = world.map.size();
        if position.x < 1.0
            || position.x > size.x - 1.0
            || position.y < 1.0
            || position.y > size.y - 1.0
        {
            return true;
        }
        if world
            .map
            .is_wall(position.x.floor() as isize, position.y.floor() as isize)
        {
            return true;
        }
        world.pushwalls.iter().any(|pushwall| {
            (position.x - pushwall.position.x).abs() < 0.6
                && (position.y - pushwall.position.y).abs() < 0.6
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::MapData;

    struct Probe {
        position: Vector,
        radius: f64,
        dead: bool,
    }

    impl Actor for Probe {
        fn radius(&self) -> f64 {
            self.radius
        }
        fn position(&self) -> Vector {
            self.position
        }
        fn set_position(&mut self, position: Vector) {
            self.position = position;
        }
        fn is_dead(&self) -> bool {
            self.dead
        }
    }

    fn probe(x: f64, y: f64, radius: f64) -> Probe {
        Probe {
            position: Vector::new(x, y),
            radius,
            dead: false,
        }
    }

    /// 5x5 open floor with walls at (2, 1), (2, 2) and (1, 2).
    fn corner_map() -> Tilemap {
        let mut tiles = vec![0u8; 25];
        tiles[1 * 5 + 2] = 1;
        tiles[2 * 5 + 2] = 1;
        tiles[2 * 5 + 1] = 1;
        Tilemap::new(&MapData {
            width: 5,
            tiles,
            things: vec![0; 25],
        })
        .unwrap()
    }

    #[test]
    fn rect_is_centered_on_position() {
        let p = probe(2.0, 3.0, 0.5);
        assert_eq!(p.rect(), Rect::new(Vector::new(1.5, 2.5), Vector::new(2.5, 3.5)));
    }

    #[test]
    fn dead_actors_do_not_collide() {
        let a = probe(1.0, 1.0, 0.5);
        let mut b = probe(1.5, 1.0, 0.5);
        assert!(a.intersection_with_actor(&b).is_some());
        b.dead = true;
        assert!(a.intersection_with_actor(&b).is_none());
        assert!(b.intersection_with_actor(&a).is_none());
    }

    #[test]
    fn map_push_picks_the_deepest_wall() {
        let map = corner_map();
        // overlaps (2, 1) by 0.2 on x and (1, 2) by 0.3 on y
        let p = probe(1.7, 1.8, 0.5);
        let push = p.intersection_with_map(&map).unwrap();
        assert!((push.length() - 0.3).abs() < 1e-9);
        assert_eq!(push.x, 0.0);
    }

    #[test]
    fn clear_of_walls_means_no_push() {
        let map = corner_map();
        assert_eq!(probe(0.5, 0.5, 0.25).intersection_with_map(&map), None);
        assert_eq!(probe(4.5, 4.5, 0.4).intersection_with_map(&map), None);
    }
}
