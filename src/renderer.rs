use crate::billboard::Billboard;
use crate::bitmap::{Bitmap, Color};
use crate::camera::{Camera, FOCAL_LENGTH, perpendicular_distance, projected_height};
use crate::effect::{Effect, EffectKind};
use crate::rng::GameRng;
use crate::texture::{Texture, Textures};
use crate::tilemap::{Tile, Tilemap};
use crate::vector::Vector;
use crate::world::World;

const WALL_HEIGHT: f64 = 1.0;
const FIZZLE_CELLS: usize = 10_000;
const FIZZLE_GRANULARITY: usize = 4;

pub struct Renderer {
    bitmap: Bitmap,
    textures: Textures,
    fizzle: Vec<usize>, // shuffled cell order for the fizzle dissolve
}

/// Billboards ordered farthest-first from `viewpoint`, by the distance to
/// each billboard's start. The order doesn't depend on the column, so one
/// sort serves the whole frame.
pub fn depth_sorted(viewpoint: Vector, billboards: Vec<Billboard>) -> Vec<Billboard> {
    let mut keyed: Vec<(f64, Billboard)> = billboards
        .into_iter()
        .map(|b| ((b.start - viewpoint).length(), b))
        .collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal)); // farthest first
    keyed.into_iter().map(|(_, b)| b).collect()
}

/// Texture and horizontal texture coordinate for the wall face at `end`.
fn wall_face(world: &World, end: Vector, direction: Vector) -> (Texture, f64) {
    let (tile_x, tile_y) = Tilemap::tile_coords(end, direction);
    let tile = world.map.get(tile_x, tile_y).unwrap_or(Tile::Wall);

    // cells in front of the two candidate faces, back towards the eye
    let front_x = tile_x + if direction.x > 0.0 { -1 } else { 1 };
    let front_y = tile_y + if direction.y > 0.0 { -1 } else { 1 };

    let on_x = end.x == end.x.floor();
    let on_y = end.y == end.y.floor();
    let vertical = match (on_x, on_y) {
        (true, false) => true,
        (false, true) => false,
        // Exactly on a corner: a face whose front cell is itself a wall can't
        // be seen, so shade the other one. Otherwise go with the steeper axis.
        (true, true) => {
            if world.map.is_wall(front_x, tile_y) {
                false
            } else if world.map.is_wall(tile_x, front_y) {
                true
            } else {
                direction.x.abs() >= direction.y.abs()
            }
        }
        // inside a cell: a door or pushwall face, drawn again as a sprite
        (false, false) => false,
    };

    if vertical {
        let texture = if world.is_door(front_x, tile_y) {
            Texture::Doorjamb
        } else {
            tile.textures()[0]
        };
        (texture, end.y - end.y.floor())
    } else {
        let texture = if world.is_door(tile_x, front_y) {
            Texture::Doorjamb2
        } else {
            tile.textures()[1]
        };
        (texture, end.x - end.x.floor())
    }
}

impl Renderer {
    pub fn new(width: usize, height: usize, textures: Textures, rng: &mut GameRng) -> Self {
        let mut fizzle: Vec<usize> = (0..FIZZLE_CELLS).collect();
        rng.shuffle(&mut fizzle);
        Self {
            bitmap: Bitmap::new(width, height, Color::BLACK),
            textures,
            fizzle,
        }
    }

    #[inline]
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.bitmap.width() || height != self.bitmap.height() {
            self.bitmap = Bitmap::new(width, height, Color::BLACK);
        }
    }

    /// Render one frame of `world`. The world is only read.
    pub fn draw(&mut self, world: &World) -> &Bitmap {
        let width = self.bitmap.width();
        let height = self.bitmap.height();
        if width == 0 || height == 0 {
            return &self.bitmap;
        }
        self.bitmap.fill(Color::BLACK);

        let player = &world.player;
        let camera = Camera::new(player.position, player.direction, width, height);
        let sprites = depth_sorted(camera.position, world.sprites());
        let solids = world.solids(camera.position);

        for x in 0..width {
            let (ray, view_plane_distance) = camera.column_ray(x, width);
            let end = world.hit_test_among(&ray, &solids);
            let wall_distance = (end - ray.origin).length();
            let distance_ratio = view_plane_distance / FOCAL_LENGTH;

            // Walls
            let perpendicular = perpendicular_distance(wall_distance, view_plane_distance);
            let wall_height = projected_height(perpendicular / WALL_HEIGHT, height);
            let (texture, wall_x) = wall_face(world, end, ray.direction);
            let wall_texture = self.textures.get(texture);
            let texture_x = ((wall_x * wall_texture.width() as f64) as usize)
                .min(wall_texture.width().saturating_sub(1));
            let wall_start = Vector::new(x as f64, (height as f64 - wall_height) / 2.0 - 0.001);
            self.bitmap
                .draw_column(texture_x, wall_texture, wall_start, wall_height);

            // Floor and ceiling
            let floor_start = (wall_start.y + wall_height).max(0.0) as usize + 1;
            let mut floor_tile = None;
            let (mut floor_texture, mut ceiling_texture) = (Texture::Floor, Texture::Ceiling);
            for y in floor_start.min(height)..height {
                let normalized_y = (y as f64 / height as f64) * 2.0 - 1.0;
                let perpendicular = WALL_HEIGHT * FOCAL_LENGTH / normalized_y;
                let map_position = ray.point_at(perpendicular * distance_ratio);
                let (tile_x, tile_y) = (map_position.x.floor(), map_position.y.floor());
                let Some(tile) = world.map.get(tile_x as isize, tile_y as isize) else {
                    continue;
                };
                if floor_tile != Some(tile) {
                    [floor_texture, ceiling_texture] = tile.textures();
                    floor_tile = Some(tile);
                }
                let (u, v) = (map_position.x - tile_x, map_position.y - tile_y);
                let floor = self.textures.get(floor_texture).sample(u, v);
                let ceiling = self.textures.get(ceiling_texture).sample(u, v);
                self.bitmap.set(x, y, floor);
                self.bitmap.set(x, height - 1 - y, ceiling);
            }

            // Sprites, back to front
            for sprite in &sprites {
                let Some(hit) = sprite.hit_test(&ray) else {
                    continue;
                };
                let sprite_distance = (hit - ray.origin).length();
                if sprite_distance > wall_distance {
                    continue;
                }
                let perpendicular = perpendicular_distance(sprite_distance, view_plane_distance);
                let sprite_height = projected_height(perpendicular / WALL_HEIGHT, height);
                let sprite_x = (hit - sprite.start).length() / sprite.length;
                let sprite_texture = self.textures.get(sprite.texture);
                let texture_x = ((sprite_x * sprite_texture.width() as f64) as usize)
                    .min(sprite_texture.width().saturating_sub(1));
                let start = Vector::new(x as f64, (height as f64 - sprite_height) / 2.0 + 0.001);
                self.bitmap
                    .draw_column(texture_x, sprite_texture, start, sprite_height);
            }
        }

        for effect in &world.effects {
            self.apply_effect(effect);
        }

        &self.bitmap
    }

    fn apply_effect(&mut self, effect: &Effect) {
        match effect.kind {
            EffectKind::FadeIn => self.bitmap.tint(effect.color, 1.0 - effect.progress()),
            EffectKind::FadeOut => self.bitmap.tint(effect.color, effect.progress()),
            EffectKind::FizzleOut => {
                let threshold = (effect.progress() * self.fizzle.len() as f64) as usize;
                let width = self.bitmap.width();
                for y in 0..self.bitmap.height() {
                    for x in 0..width {
                        let cell = (y / FIZZLE_GRANULARITY) * width + x / FIZZLE_GRANULARITY;
                        if self.fizzle[cell % self.fizzle.len()] < threshold {
                            self.bitmap.set(x, y, effect.color);
                        }
                    }
                }
            }
        }
    }
}
