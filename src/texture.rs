use crate::bitmap::{Bitmap, Color};

/// Every texture the renderer can ask for. Resolving an id to pixels is the
/// job of whoever fills in [`Textures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Texture {
    Wall,
    Wall2,
    CrackWall,
    CrackWall2,
    SlimeWall,
    SlimeWall2,
    Door,
    Door2,
    Doorjamb,
    Doorjamb2,
    Floor,
    CrackFloor,
    Ceiling,
    ElevatorFloor,
    ElevatorCeiling,
    ElevatorSideWall,
    ElevatorSideWall2,
    ElevatorBackWall,
    ElevatorBackWall2,
    Monster,
    MonsterDead,
    Medkit,
    ShotgunPickup,
}

impl Texture {
    pub const ALL: [Texture; 23] = [
        Texture::Wall,
        Texture::Wall2,
        Texture::CrackWall,
        Texture::CrackWall2,
        Texture::SlimeWall,
        Texture::SlimeWall2,
        Texture::Door,
        Texture::Door2,
        Texture::Doorjamb,
        Texture::Doorjamb2,
        Texture::Floor,
        Texture::CrackFloor,
        Texture::Ceiling,
        Texture::ElevatorFloor,
        Texture::ElevatorCeiling,
        Texture::ElevatorSideWall,
        Texture::ElevatorSideWall2,
        Texture::ElevatorBackWall,
        Texture::ElevatorBackWall2,
        Texture::Monster,
        Texture::MonsterDead,
        Texture::Medkit,
        Texture::ShotgunPickup,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Texture id -> bitmap lookup.
pub struct Textures {
    bitmaps: Vec<Bitmap>,
}

impl Textures {
    /// `load` is called once per id, in [`Texture::ALL`] order.
    pub fn new(mut load: impl FnMut(Texture) -> Bitmap) -> Self {
        Self {
            bitmaps: Texture::ALL.iter().map(|&t| load(t)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, texture: Texture) -> &Bitmap {
        &self.bitmaps[texture.index()]
    }

    /// Generated stand-ins so the engine runs without an asset pipeline.
    pub fn placeholder(size: usize) -> Self {
        Self::new(|texture| placeholder_bitmap(texture, size))
    }
}

fn placeholder_bitmap(texture: Texture, size: usize) -> Bitmap {
    use Texture::*;

    let (base, line) = match texture {
        Wall => (Color::rgb(120, 120, 130), Color::rgb(70, 70, 80)),
        Wall2 => (Color::rgb(90, 90, 100), Color::rgb(55, 55, 60)),
        CrackWall => (Color::rgb(130, 110, 100), Color::rgb(40, 30, 30)),
        CrackWall2 => (Color::rgb(100, 85, 75), Color::rgb(30, 25, 25)),
        SlimeWall => (Color::rgb(90, 140, 80), Color::rgb(40, 80, 30)),
        SlimeWall2 => (Color::rgb(70, 110, 60), Color::rgb(30, 60, 25)),
        Door | Door2 => (Color::rgb(110, 80, 40), Color::rgb(160, 120, 60)),
        Doorjamb | Doorjamb2 => (Color::rgb(80, 80, 90), Color::rgb(140, 140, 150)),
        Floor | CrackFloor => (Color::rgb(60, 60, 60), Color::rgb(45, 45, 45)),
        Ceiling => (Color::rgb(100, 100, 110), Color::rgb(80, 80, 90)),
        ElevatorFloor | ElevatorCeiling => (Color::rgb(70, 70, 90), Color::rgb(50, 50, 70)),
        ElevatorSideWall | ElevatorBackWall => (Color::rgb(150, 150, 170), Color::rgb(90, 90, 110)),
        ElevatorSideWall2 | ElevatorBackWall2 => {
            (Color::rgb(120, 120, 140), Color::rgb(70, 70, 90))
        }
        Monster => (Color::rgb(200, 40, 40), Color::rgb(240, 200, 40)),
        MonsterDead => (Color::rgb(110, 20, 20), Color::rgb(60, 10, 10)),
        Medkit => (Color::WHITE, Color::RED),
        ShotgunPickup => (Color::rgb(60, 50, 40), Color::rgb(150, 150, 150)),
    };

    let sprite = matches!(texture, Monster | MonsterDead | Medkit | ShotgunPickup);
    let mut bitmap = Bitmap::new(size, size, Color::CLEAR);
    let quarter = size / 4;
    for y in 0..size {
        for x in 0..size {
            let color = if sprite {
                // a centered blob, transparent around it
                let inside = x >= quarter && x < size - quarter && y >= quarter;
                let cross = x.abs_diff(size / 2) < size / 16 || y.abs_diff(size * 5 / 8) < size / 16;
                match (inside, cross) {
                    (false, _) => Color::CLEAR,
                    (true, true) => line,
                    (true, false) => base,
                }
            } else {
                // brick courses, offset every other row
                let row = y / (size / 4).max(1);
                let shift = if row % 2 == 0 { 0 } else { size / 4 };
                let mortar = y % (size / 4).max(1) == 0 || (x + shift) % (size / 2).max(1) == 0;
                if mortar { line } else { base }
            };
            bitmap.set(x, y, color);
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_texture_resolves() {
        let textures = Textures::placeholder(16);
        for texture in Texture::ALL {
            let bitmap = textures.get(texture);
            assert_eq!((bitmap.width(), bitmap.height()), (16, 16));
        }
        assert_eq!(Texture::ALL.len(), Texture::ShotgunPickup as usize + 1);
    }

    #[test]
    fn sprites_have_transparent_margins() {
        let textures = Textures::placeholder(16);
        assert_eq!(textures.get(Texture::Monster).get(0, 0), Some(Color::CLEAR));
        assert_eq!(textures.get(Texture::Wall).get(5, 5).map(|c| c.a), Some(255));
    }
}
