//! Property tests for the geometry and collision core.
//!
//! Coordinates are drawn on a 1/64 grid so that push arithmetic stays exact.

use proptest::prelude::*;
use rampage::actor::Actor;
use rampage::billboard::Billboard;
use rampage::ray::Ray;
use rampage::rect::Rect;
use rampage::renderer::depth_sorted;
use rampage::rng::GameRng;
use rampage::texture::Texture;
use rampage::tilemap::{MapData, Tilemap};
use rampage::vector::Vector;
use rampage::world::{Monster, World};

/// Multiples of 1/64 in `[lo, hi)`.
fn grid(lo: i32, hi: i32) -> impl Strategy<Value = f64> {
    (lo * 64..hi * 64).prop_map(|v| v as f64 / 64.0)
}

/// Points strictly inside a cell, never on a grid line.
fn off_grid(lo: i32, hi: i32) -> impl Strategy<Value = f64> {
    (lo..hi, 1..64i32).prop_map(|(cell, fraction)| cell as f64 + fraction as f64 / 64.0)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (grid(-8, 8), grid(-8, 8), 1..256i32, 1..256i32).prop_map(|(x, y, w, h)| {
        let min = Vector::new(x, y);
        Rect::new(min, min + Vector::new(w as f64 / 64.0, h as f64 / 64.0))
    })
}

/// 8x8 room, walls on the border only.
fn open_room() -> MapData {
    let mut tiles = vec![0u8; 64];
    let mut things = vec![0u8; 64];
    for i in 0..8 {
        tiles[i] = 1;
        tiles[56 + i] = 1;
        tiles[i * 8] = 1;
        tiles[i * 8 + 7] = 1;
    }
    things[9] = 1;
    MapData {
        width: 8,
        tiles,
        things,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn push_separates_overlapping_rects(a in rect_strategy(), b in rect_strategy()) {
        if let Some(push) = a.intersection(&b) {
            // exactly one axis
            prop_assert!(push.x == 0.0 || push.y == 0.0);
            let moved = Rect::new(a.min - push, a.max - push);
            prop_assert_eq!(moved.intersection(&b), None);
        }
    }

    #[test]
    fn rects_apart_on_an_axis_never_intersect(
        a in rect_strategy(),
        gap in grid(0, 4),
        horizontal in any::<bool>(),
    ) {
        let size = a.size();
        let offset = if horizontal {
            Vector::new(size.x + gap, 0.0)
        } else {
            Vector::new(0.0, size.y + gap)
        };
        let b = Rect::new(a.min + offset, a.max + offset);
        prop_assert_eq!(a.intersection(&b), None);
        prop_assert_eq!(b.intersection(&a), None);
    }

    #[test]
    fn rays_in_a_room_stop_on_its_walls(
        x in off_grid(1, 7),
        y in off_grid(1, 7),
        angle in 0.0..std::f64::consts::TAU,
    ) {
        let map = Tilemap::new(&open_room()).unwrap();
        let ray = Ray::new(Vector::new(x, y), Vector::new(angle.cos(), angle.sin()));
        let hit = map.hit_test(&ray);
        prop_assert!(hit.x.is_finite() && hit.y.is_finite());
        prop_assert!((1.0 - 1e-9..=7.0 + 1e-9).contains(&hit.x), "{:?}", hit);
        prop_assert!((1.0 - 1e-9..=7.0 + 1e-9).contains(&hit.y), "{:?}", hit);
        let on_border = [hit.x - 1.0, hit.x - 7.0, hit.y - 1.0, hit.y - 7.0]
            .iter()
            .any(|d| d.abs() < 1e-6);
        prop_assert!(on_border, "{:?}", hit);
    }

    #[test]
    fn free_actor_is_left_alone(x in grid(2, 6), y in grid(2, 6)) {
        let world = World::new(&open_room()).unwrap();
        let mut monster = Monster::new(Vector::new(x, y));
        monster.avoid_walls(&world);
        prop_assert_eq!(monster.position, Vector::new(x, y));
        prop_assert!(!monster.is_stuck(&world));
    }

    #[test]
    fn sprites_come_out_farthest_first(
        points in prop::collection::vec((grid(-16, 16), grid(-16, 16)), 0..24),
        eye in (grid(-4, 4), grid(-4, 4)),
    ) {
        let eye = Vector::new(eye.0, eye.1);
        let billboards = points
            .iter()
            .map(|&(x, y)| Billboard::facing(Vector::new(x, y), Vector::new(1.0, 0.0), Texture::Monster))
            .collect();
        let sorted = depth_sorted(eye, billboards);
        prop_assert_eq!(sorted.len(), points.len());
        let distances: Vec<f64> = sorted.iter().map(|b| (b.start - eye).length()).collect();
        prop_assert!(distances.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn same_seed_same_draws(seed in any::<u64>()) {
        let mut a = GameRng::new(seed);
        let mut b = GameRng::new(seed);
        for _ in 0..16 {
            prop_assert_eq!(a.next_u64(), b.next_u64());
        }
        let items = [1, 2, 3, 4, 5];
        prop_assert_eq!(a.choose(&items), b.choose(&items));
    }
}
