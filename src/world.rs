use crate::actor::Actor;
use crate::billboard::Billboard;
use crate::bitmap::Color;
use crate::effect::{Effect, EffectKind};
use crate::error::MapError;
use crate::ray::Ray;
use crate::rect::Rect;
use crate::texture::Texture;
use crate::tilemap::{MapData, Thing, Tile, Tilemap};
use crate::vector::{Rotation, Vector};

/// Per-tick control state, already turned into a rotation by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Input {
    /// Forward speed in `[-1, 1]`.
    pub speed: f64,
    pub rotation: Rotation,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            speed: 0.0,
            rotation: Rotation::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vector,
    pub direction: Vector,
    pub velocity: Vector,
    /// Map units per second at full input.
    pub speed: f64,
    pub health: f64,
}

impl Player {
    pub const RADIUS: f64 = 0.25;

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            direction: Vector::new(1.0, 0.0),
            velocity: Vector::ZERO,
            speed: 2.0,
            health: 100.0,
        }
    }

    pub fn update(&mut self, input: &Input) {
        self.direction = self.direction.rotated(input.rotation);
        self.velocity = self.direction * input.speed * self.speed;
    }
}

impl Actor for Player {
    fn radius(&self) -> f64 {
        Self::RADIUS
    }
    fn position(&self) -> Vector {
        self.position
    }
    fn set_position(&mut self, position: Vector) {
        self.position = position;
    }
    fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monster {
    pub position: Vector,
    pub velocity: Vector,
    pub health: f64,
}

impl Monster {
    pub const RADIUS: f64 = 0.4375;

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            health: 50.0,
        }
    }

    pub fn billboard(&self, view: Vector) -> Billboard {
        let texture = if self.is_dead() {
            Texture::MonsterDead
        } else {
            Texture::Monster
        };
        Billboard::facing(self.position, view, texture)
    }
}

impl Actor for Monster {
    fn radius(&self) -> f64 {
        Self::RADIUS
    }
    fn position(&self) -> Vector {
        self.position
    }
    fn set_position(&mut self, position: Vector) {
        self.position = position;
    }
    fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A sliding door. `offset` runs from 0 (closed) to 1 (open) and is driven by
/// the door logic outside the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub position: Vector,
    pub direction: Vector,
    pub offset: f64,
}

impl Door {
    pub fn new(position: Vector, is_vertical: bool) -> Self {
        let direction = if is_vertical {
            Vector::new(0.0, 1.0)
        } else {
            Vector::new(1.0, 0.0)
        };
        Self {
            position,
            direction,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.direction.x == 0.0
    }

    pub fn billboard(&self) -> Billboard {
        let texture = if self.is_vertical() {
            Texture::Door2
        } else {
            Texture::Door
        };
        Billboard::new(
            self.position + self.direction * (self.offset - 0.5),
            self.direction,
            1.0,
            texture,
        )
    }
}

impl Actor for Door {
    fn radius(&self) -> f64 {
        0.5
    }
    fn position(&self) -> Vector {
        self.position
    }
    fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// The door leaf is a zero-thickness slab along its axis.
    fn rect(&self) -> Rect {
        let start = self.position + self.direction * (self.offset - 0.5);
        Rect::new(start, start + self.direction)
    }
}

/// A wall block that can slide. The tile it was placed on is carved to
/// floor and its wall kind travels with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pushwall {
    pub position: Vector,
    pub velocity: Vector,
    pub tile: Tile,
}

impl Pushwall {
    pub fn new(position: Vector, tile: Tile) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            tile,
        }
    }

    /// The faces whose outward side looks at `viewpoint`.
    pub fn billboards(&self, viewpoint: Vector) -> impl Iterator<Item = Billboard> {
        let Rect {
            min: top_left,
            max: bottom_right,
        } = self.rect();
        let top_right = Vector::new(bottom_right.x, top_left.y);
        let bottom_left = Vector::new(top_left.x, bottom_right.y);
        let [side, front] = self.tile.textures();
        [
            Billboard::new(top_left, Vector::new(0.0, 1.0), 1.0, side),
            Billboard::new(top_right, Vector::new(-1.0, 0.0), 1.0, front),
            Billboard::new(bottom_right, Vector::new(0.0, -1.0), 1.0, side),
            Billboard::new(bottom_left, Vector::new(1.0, 0.0), 1.0, front),
        ]
        .into_iter()
        // walking each face in order, the outward normal is its orthogonal
        .filter(move |face| (viewpoint - face.start).dot(face.direction.orthogonal()) > 0.0)
    }
}

impl Actor for Pushwall {
    fn radius(&self) -> f64 {
        0.5
    }
    fn position(&self) -> Vector {
        self.position
    }
    fn set_position(&mut self, position: Vector) {
        self.position = position;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Medkit,
    Shotgun,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vector,
}

impl Pickup {
    pub fn billboard(&self, view: Vector) -> Billboard {
        let texture = match self.kind {
            PickupKind::Medkit => Texture::Medkit,
            PickupKind::Shotgun => Texture::ShotgunPickup,
        };
        Billboard::facing(self.position, view, texture)
    }
}

impl Actor for Pickup {
    fn radius(&self) -> f64 {
        0.4
    }
    fn position(&self) -> Vector {
        self.position
    }
    fn set_position(&mut self, position: Vector) {
        self.position = position;
    }
}

/// Everything the renderer draws and the collision code pushes around.
/// Owned by the simulation; the renderer only ever borrows it.
#[derive(Debug, Clone)]
pub struct World {
    pub map: Tilemap,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub doors: Vec<Door>,
    pub pushwalls: Vec<Pushwall>,
    pub pickups: Vec<Pickup>,
    pub switches: Vec<(isize, isize)>,
    pub effects: Vec<Effect>,
}

impl World {
    /// Build a level from loader data. Content mistakes abort construction,
    /// so a `World` always has exactly one player.
    pub fn new(data: &MapData) -> Result<Self, MapError> {
        let mut map = Tilemap::new(data)?;
        let mut player = None;
        let mut monsters = Vec::new();
        let mut doors = Vec::new();
        let mut pushwalls = Vec::new();
        let mut pickups = Vec::new();
        let mut switches = Vec::new();

        for y in 0..map.height() {
            for x in 0..map.width() {
                let (ix, iy) = (x as isize, y as isize);
                let position = Vector::new(x as f64 + 0.5, y as f64 + 0.5);
                match map.thing(ix, iy) {
                    Thing::Nothing => {}
                    Thing::Player => {
                        if player.is_some() {
                            return Err(MapError::DuplicatePlayer { x, y });
                        }
                        player = Some(Player::new(position));
                    }
                    Thing::Monster => monsters.push(Monster::new(position)),
                    Thing::Door => {
                        if y == 0 || y + 1 >= map.height() || x == 0 || x + 1 >= map.width() {
                            return Err(MapError::DoorOnEdge { x, y });
                        }
                        let is_vertical = map.is_wall(ix, iy - 1) && map.is_wall(ix, iy + 1);
                        doors.push(Door::new(position, is_vertical));
                    }
                    Thing::Pushwall => {
                        let tile = map.get(ix, iy).unwrap_or(Tile::Wall);
                        let tile = if tile.is_wall() { tile } else { Tile::Wall };
                        pushwalls.push(Pushwall::new(position, tile));
                        map.set(ix, iy, Tile::Floor);
                    }
                    Thing::Switch => {
                        if !map.is_wall(ix, iy) {
                            return Err(MapError::SwitchNotOnWall { x, y });
                        }
                        switches.push((ix, iy));
                    }
                    Thing::Medkit => pickups.push(Pickup {
                        kind: PickupKind::Medkit,
                        position,
                    }),
                    Thing::Shotgun => pickups.push(Pickup {
                        kind: PickupKind::Shotgun,
                        position,
                    }),
                }
            }
        }

        let player = player.ok_or(MapError::MissingPlayer)?;
        tracing::info!(
            width = map.width(),
            height = map.height(),
            monsters = monsters.len(),
            doors = doors.len(),
            pushwalls = pushwalls.len(),
            pickups = pickups.len(),
            "level loaded"
        );

        Ok(Self {
            map,
            player,
            monsters,
            doors,
            pushwalls,
            pickups,
            switches,
            effects: vec![Effect::new(EffectKind::FadeIn, Color::BLACK, 0.5)],
        })
    }

    #[inline]
    pub fn is_door(&self, x: isize, y: isize) -> bool {
        self.map.thing(x, y) == Thing::Door
    }

    /// One fixed physics step.
    pub fn update(&mut self, time_step: f64, input: &Input) {
        for effect in &mut self.effects {
            effect.time += time_step;
        }
        self.effects.retain(|effect| !effect.is_completed());

        if !self.player.is_dead() {
            self.player.update(input);
            self.player.position += self.player.velocity * time_step;
        }
        for monster in &mut self.monsters {
            if !monster.is_dead() {
                monster.position += monster.velocity * time_step;
            }
        }

        // split each overlap evenly between the two bodies
        for i in 0..self.monsters.len() {
            if let Some(push) = self.player.intersection_with_actor(&self.monsters[i]) {
                self.player.position -= push / 2.0;
                self.monsters[i].position += push / 2.0;
            }
            for j in i + 1..self.monsters.len() {
                if let Some(push) = self.monsters[i].intersection_with_actor(&self.monsters[j]) {
                    self.monsters[i].position -= push / 2.0;
                    self.monsters[j].position += push / 2.0;
                }
            }
            let mut monster = self.monsters[i];
            monster.avoid_walls(self);
            self.monsters[i] = monster;
        }

        let mut player = self.player;
        player.avoid_walls(self);
        self.player = player;
    }

    /// Every sprite for this frame, built once rather than per column.
    pub fn sprites(&self) -> Vec<Billboard> {
        let view = self.player.direction;
        let viewpoint = self.player.position;
        self.monsters
            .iter()
            .map(|monster| monster.billboard(view))
            .chain(self.doors.iter().map(Door::billboard))
            .chain(
                self.pushwalls
                    .iter()
                    .flat_map(|pushwall| pushwall.billboards(viewpoint)),
            )
            .chain(self.pickups.iter().map(|pickup| pickup.billboard(view)))
            .collect()
    }

    /// Door leaves and the pushwall faces visible from `viewpoint`. Both
    /// stop rays, so the renderer builds them once per frame.
    pub fn solids(&self, viewpoint: Vector) -> Vec<Billboard> {
        self.doors
            .iter()
            .map(Door::billboard)
            .chain(
                self.pushwalls
                    .iter()
                    .flat_map(|pushwall| pushwall.billboards(viewpoint)),
            )
            .collect()
    }

    /// Nearest solid surface along `ray`: map walls, closed doors and
    /// pushwall faces.
    pub fn hit_test(&self, ray: &Ray) -> Vector {
        self.hit_test_among(ray, &self.solids(ray.origin))
    }

    /// [`World::hit_test`] against billboards from [`World::solids`] built
    /// for `ray.origin`.
    pub fn hit_test_among(&self, ray: &Ray, solids: &[Billboard]) -> Vector {
        let mut hit = self.map.hit_test(ray);
        let mut distance = (hit - ray.origin).length();
        for billboard in solids {
            let Some(candidate) = billboard.hit_test(ray) else {
                continue;
            };
            let candidate_distance = (candidate - ray.origin).length();
            if candidate_distance < distance {
                hit = candidate;
                distance = candidate_distance;
            }
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses rows of characters: `#` wall, `.` floor, `P` player,
    /// `M` monster, `D` door, `W` pushwall, `S` switch, `+` medkit.
    fn level(rows: &[&str]) -> MapData {
        let width = rows[0].len();
        let mut tiles = Vec::new();
        let mut things = Vec::new();
        for row in rows {
            for c in row.chars() {
                let (tile, thing) = match c {
                    '#' => (1, 0),
                    'S' => (1, 5),
                    'W' => (1, 4),
                    'P' => (0, 1),
                    'M' => (0, 2),
                    'D' => (0, 3),
                    '+' => (0, 6),
                    _ => (0, 0),
                };
                tiles.push(tile);
                things.push(thing);
            }
        }
        MapData {
            width,
            tiles,
            things,
        }
    }

    #[test]
    fn spawns_things_from_the_overlay() {
        let world = World::new(&level(&[
            "######", //
            "#P.M.#", //
            "##D#W#", //
            "#+...S", //
            "######",
        ]))
        .unwrap();
        assert_eq!(world.player.position, Vector::new(1.5, 1.5));
        assert_eq!(world.monsters.len(), 1);
        assert_eq!(world.doors.len(), 1);
        assert!(!world.doors[0].is_vertical());
        assert_eq!(world.pushwalls.len(), 1);
        assert_eq!(world.pushwalls[0].tile, Tile::Wall);
        assert_eq!(world.map.get(4, 2), Some(Tile::Floor));
        assert_eq!(world.pickups[0].kind, PickupKind::Medkit);
        assert_eq!(world.switches, vec![(5, 3)]);
        assert!(world.is_door(2, 2));
    }

    #[test]
    fn content_errors_abort_construction() {
        let no_player = World::new(&level(&["###", "#.#", "###"]));
        assert!(matches!(no_player, Err(MapError::MissingPlayer)));

        let two_players = World::new(&level(&["####", "#PP#", "####"]));
        assert!(matches!(two_players, Err(MapError::DuplicatePlayer { x: 2, y: 1 })));

        let mut data = level(&["####", "#P.#", "####"]);
        data.things[2 * 4 + 2] = 3;
        data.tiles[2 * 4 + 2] = 0;
        assert!(matches!(World::new(&data), Err(MapError::DoorOnEdge { x: 2, y: 2 })));

        let mut data = level(&["####", "#P.#", "####"]);
        data.things[1 * 4 + 2] = 5;
        assert!(matches!(World::new(&data), Err(MapError::SwitchNotOnWall { x: 2, y: 1 })));
    }

    #[test]
    fn player_walks_and_stops_at_walls() {
        let mut world = World::new(&level(&["#####", "#P..#", "#####"])).unwrap();
        world.effects.clear();
        let forward = Input {
            speed: 1.0,
            rotation: Rotation::IDENTITY,
        };
        for _ in 0..600 {
            world.update(1.0 / 120.0, &forward);
        }
        let x = world.player.position.x;
        assert!((x - (4.0 - Player::RADIUS)).abs() < 1e-9, "x = {x}");
        assert!(!world.player.is_stuck(&world));
    }

    #[test]
    fn overlapping_monsters_are_split_apart() {
        let mut world = World::new(&level(&["#######", "#P....#", "#.....#", "#######"])).unwrap();
        world.monsters = vec![
            Monster::new(Vector::new(3.0, 2.0)),
            Monster::new(Vector::new(3.5, 2.0)),
        ];
        world.update(1.0 / 120.0, &Input::default());
        let gap = world.monsters[1].position.x - world.monsters[0].position.x;
        assert!(gap >= 2.0 * Monster::RADIUS - 1e-9);
        assert_eq!(world.monsters[0].position.y, 2.0);
    }

    #[test]
    fn effects_expire() {
        let mut world = World::new(&level(&["###", "#P#", "###"])).unwrap();
        assert_eq!(world.effects.len(), 1);
        for _ in 0..61 {
            world.update(1.0 / 120.0, &Input::default());
        }
        assert!(world.effects.is_empty());
    }

    #[test]
    fn doors_block_rays_and_pushwalls_show_near_faces() {
        let world = World::new(&level(&[
            "#######", //
            "#P.D.W#", //
            "#######",
        ]))
        .unwrap();
        let ray = Ray::new(world.player.position, Vector::new(1.0, 0.0));
        let hit = world.hit_test(&ray);
        assert!((hit.x - 3.5).abs() < 1e-4);

        let faces: Vec<_> = world.pushwalls[0].billboards(Vector::new(2.5, 1.5)).collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].start, Vector::new(5.0, 1.0));
        assert_eq!(faces[0].direction, Vector::new(0.0, 1.0));
    }

    #[test]
    fn frame_solids_match_per_ray_hit_test() {
        let world = World::new(&level(&[
            "#######", //
            "#P.D.W#", //
            "#.....#", //
            "#######",
        ]))
        .unwrap();
        let eye = world.player.position;
        let solids = world.solids(eye);
        // the door leaf plus the one pushwall face looking back at the eye
        assert_eq!(solids.len(), 2);
        for direction in [
            Vector::new(1.0, 0.0),
            Vector::new(0.8, 0.6),
            Vector::new(0.6, 0.8),
            Vector::new(-1.0, 0.0),
        ] {
            let ray = Ray::new(eye, direction);
            assert_eq!(world.hit_test_among(&ray, &solids), world.hit_test(&ray));
        }
    }

    #[test]
    fn stuck_detection() {
        let mut world = World::new(&level(&["######", "#P..W#", "#.#..#", "######"])).unwrap();
        assert!(!world.player.is_stuck(&world));
        world.player.position = Vector::new(0.5, 1.5);
        assert!(world.player.is_stuck(&world));
        world.player.position = Vector::new(4.2, 1.4);
        assert!(world.player.is_stuck(&world));
        world.player.position = Vector::new(2.5, 2.5);
        assert!(world.player.is_stuck(&world));
        world.player.position = Vector::new(3.5, 2.5);
        assert!(!world.player.is_stuck(&world));
    }
}
