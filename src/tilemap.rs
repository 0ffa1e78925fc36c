use serde::Deserialize;

use crate::error::MapError;
use crate::ray::Ray;
use crate::rect::Rect;
use crate::texture::Texture;
use crate::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor,
    Wall,
    CrackWall,
    SlimeWall,
    CrackFloor,
    ElevatorFloor,
    ElevatorBackWall,
    ElevatorSideWall,
}

impl Tile {
    #[inline]
    pub fn is_wall(self) -> bool {
        !matches!(self, Tile::Floor | Tile::CrackFloor | Tile::ElevatorFloor)
    }

    /// Walls: `[east/west face, north/south face]`. Floors: `[floor, ceiling]`.
    pub fn textures(self) -> [Texture; 2] {
        match self {
            Tile::Floor => [Texture::Floor, Texture::Ceiling],
            Tile::CrackFloor => [Texture::CrackFloor, Texture::Ceiling],
            Tile::ElevatorFloor => [Texture::ElevatorFloor, Texture::ElevatorCeiling],
            Tile::Wall => [Texture::Wall, Texture::Wall2],
            Tile::CrackWall => [Texture::CrackWall, Texture::CrackWall2],
            Tile::SlimeWall => [Texture::SlimeWall, Texture::SlimeWall2],
            Tile::ElevatorSideWall => [Texture::ElevatorSideWall, Texture::ElevatorSideWall2],
            Tile::ElevatorBackWall => [Texture::ElevatorBackWall, Texture::ElevatorBackWall2],
        }
    }
}

impl TryFrom<u8> for Tile {
    type Error = MapError;

    fn try_from(tag: u8) -> Result<Self, MapError> {
        Ok(match tag {
            0 => Tile::Floor,
            1 => Tile::Wall,
            2 => Tile::CrackWall,
            3 => Tile::SlimeWall,
            4 => Tile::CrackFloor,
            5 => Tile::ElevatorFloor,
            6 => Tile::ElevatorBackWall,
            7 => Tile::ElevatorSideWall,
            _ => return Err(MapError::UnknownTile(tag)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thing {
    Nothing,
    Player,
    Monster,
    Door,
    Pushwall,
    Switch,
    Medkit,
    Shotgun,
}

impl TryFrom<u8> for Thing {
    type Error = MapError;

    fn try_from(tag: u8) -> Result<Self, MapError> {
        Ok(match tag {
            0 => Thing::Nothing,
            1 => Thing::Player,
            2 => Thing::Monster,
            3 => Thing::Door,
            4 => Thing::Pushwall,
            5 => Thing::Switch,
            6 => Thing::Medkit,
            7 => Thing::Shotgun,
            _ => return Err(MapError::UnknownThing(tag)),
        })
    }
}

/// Raw level layout as handed over by the map loader.
#[derive(Debug, Clone, Deserialize)]
pub struct MapData {
    pub width: usize,
    pub tiles: Vec<u8>,
    pub things: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    width: usize,
    tiles: Vec<Tile>,
    things: Vec<Thing>,
}

impl Tilemap {
    pub fn new(data: &MapData) -> Result<Self, MapError> {
        if data.width == 0 {
            return Err(MapError::ZeroWidth);
        }
        if data.tiles.len() % data.width != 0 {
            return Err(MapError::RaggedTiles {
                len: data.tiles.len(),
                width: data.width,
            });
        }
        if data.things.len() != data.tiles.len() {
            return Err(MapError::OverlayMismatch {
                tiles: data.tiles.len(),
                things: data.things.len(),
            });
        }
        let tiles = data
            .tiles
            .iter()
            .map(|&t| Tile::try_from(t))
            .collect::<Result<Vec<_>, _>>()?;
        let things = data
            .things
            .iter()
            .map(|&t| Thing::try_from(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width: data.width,
            tiles,
            things,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.tiles.len() / self.width
    }

    #[inline]
    pub fn size(&self) -> Vector {
        Vector::new(self.width as f64, self.height() as f64)
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height() {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: isize, y: isize, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    #[inline]
    pub fn thing(&self, x: isize, y: isize) -> Thing {
        self.index(x, y).map_or(Thing::Nothing, |i| self.things[i])
    }

    /// Whether the tile at the given coordinates is a wall. Everything outside
    /// the map counts as solid.
    #[inline]
    pub fn is_wall(&self, x: isize, y: isize) -> bool {
        self.get(x, y).is_none_or(Tile::is_wall)
    }

    pub fn tile_rect(x: isize, y: isize) -> Rect {
        let min = Vector::new(x as f64, y as f64);
        Rect::new(min, min + Vector::new(1.0, 1.0))
    }

    /// Cell that owns `position`. A coordinate sitting exactly on a grid line
    /// belongs to the cell the ray is heading into.
    pub fn tile_coords(position: Vector, direction: Vector) -> (isize, isize) {
        let mut x = position.x.floor() as isize;
        let mut y = position.y.floor() as isize;
        if position.x == position.x.floor() && direction.x <= 0.0 {
            x -= 1;
        }
        if position.y == position.y.floor() && direction.y <= 0.0 {
            y -= 1;
        }
        (x, y)
    }

    #[inline]
    pub fn tile_at(&self, position: Vector, direction: Vector) -> Option<Tile> {
        let (x, y) = Self::tile_coords(position, direction);
        self.get(x, y)
    }

    /// Step the ray from grid line to grid line until it enters a wall (or
    /// leaves the map) and return where it crossed in.
    pub fn hit_test(&self, ray: &Ray) -> Vector {
        let direction = ray.direction;
        let mut position = ray.origin;
        loop {
            let edge_x = if direction.x > 0.0 {
                position.x.floor() + 1.0 - position.x
            } else {
                position.x.ceil() - 1.0 - position.x
            };
            let edge_y = if direction.y > 0.0 {
                position.y.floor() + 1.0 - position.y
            } else {
                position.y.ceil() - 1.0 - position.y
            };

            // A zero component never reaches that axis' next grid line.
            let step_x = (direction.x != 0.0)
                .then(|| Vector::new(edge_x, edge_x * direction.y / direction.x));
            let step_y = (direction.y != 0.0)
                .then(|| Vector::new(edge_y * direction.x / direction.y, edge_y));
            let step = match (step_x, step_y) {
                (Some(a), Some(b)) => {
                    if a.length() < b.length() {
                        a
                    } else {
                        b
                    }
                }
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => return position,
            };
            position += step;

            if self.tile_at(position, direction).is_none_or(Tile::is_wall) {
                return position;
            }
        }
    }

    /// Passable means in range and not a wall.
    #[inline]
    pub fn is_passable(&self, x: isize, y: isize) -> bool {
        !self.is_wall(x, y)
    }

    /// 4-connected passable neighbours, for path search.
    pub fn neighbors(&self, x: isize, y: isize) -> impl Iterator<Item = (isize, isize)> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| self.is_passable(nx, ny))
    }
}
