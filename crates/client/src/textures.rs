//! Procedural placeholder art.
//!
//! Every texture is generated at startup from a few patterns, so the client
//! runs without image assets.
use std::collections::{BTreeMap, HashMap};

use raycast_core::{
    DoorLock, GameConfig, KeyColor, PickupKind, Rgba, SpriteTexture, Texture, TextureOracle, WeaponKind,
    pickup::DROP_AMMO,
};

const SIZE: u32 = 32;
const CLEAR: Rgba = Rgba::TRANSPARENT;

/// Wall codes that get a generated texture. Other codes use the flat fallback.
const WALL_CODES: core::ops::RangeInclusive<u16> = 1..=9;
/// Frames in an enemy sheet.
const ENEMY_FRAMES: u8 = 14;

pub struct ProceduralTextures {
    walls: BTreeMap<u16, Texture>,
    door_frame: Texture,
    floor: Texture,
    ceiling: Texture,
    sprites: HashMap<SpriteTexture, Texture>,
}

impl ProceduralTextures {
    pub fn new() -> Self {
        let walls = WALL_CODES.map(|code| (code, wall(code))).collect();

        let mut sprites = HashMap::new();
        for color in [KeyColor::Blue, KeyColor::Red, KeyColor::Gold] {
            let kind = PickupKind::Key(color);
            sprites.insert(SpriteTexture::Pickup(kind), key(key_rgb(color)));
        }
        for kind in [WeaponKind::Knife, WeaponKind::Pistol, WeaponKind::Rifle] {
            sprites.insert(SpriteTexture::Pickup(PickupKind::Weapon(kind)), weapon(kind));
        }
        for amount in [10, 25] {
            sprites.insert(SpriteTexture::Pickup(PickupKind::Health(amount)), health(amount));
        }
        for (weapon, amount) in [
            (WeaponKind::Pistol, 15),
            (WeaponKind::Rifle, 10),
            (WeaponKind::Pistol, DROP_AMMO),
            (WeaponKind::Rifle, DROP_AMMO),
        ] {
            let kind = PickupKind::Ammo { weapon, amount };
            sprites.insert(SpriteTexture::Pickup(kind), ammo(weapon, amount));
        }
        for letter in ('A'..='Z').chain('a'..='z') {
            sprites.insert(SpriteTexture::Decoration(letter), decoration(letter));
        }
        for frame in 0..ENEMY_FRAMES {
            for octant in 0..GameConfig::ENEMY_OCTANTS {
                sprites.insert(SpriteTexture::Enemy { frame, octant }, guard(frame, octant));
            }
        }

        Self {
            walls,
            door_frame: Texture::from_fn(SIZE, SIZE, |x, _| {
                if x % 8 == 0 { Rgba::rgb(70, 70, 80) } else { Rgba::rgb(110, 110, 125) }
            }),
            floor: Texture::from_fn(SIZE, SIZE, |x, y| checker(x, y, 8, Rgba::rgb(96, 96, 96), Rgba::rgb(84, 84, 84))),
            ceiling: Texture::solid(SIZE, SIZE, Rgba::rgb(48, 48, 56)),
            sprites,
        }
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl Default for ProceduralTextures {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureOracle for ProceduralTextures {
    fn wall(&self, code: u16) -> Option<&Texture> {
        self.walls.get(&code)
    }

    fn door_frame(&self) -> Option<&Texture> {
        Some(&self.door_frame)
    }

    fn floor(&self) -> Option<&Texture> {
        Some(&self.floor)
    }

    fn ceiling(&self) -> Option<&Texture> {
        Some(&self.ceiling)
    }

    fn sprite(&self, key: SpriteTexture) -> Option<&Texture> {
        self.sprites.get(&key)
    }
}

// ============================================================================
// Patterns
// ============================================================================

fn checker(x: u32, y: u32, cell: u32, a: Rgba, b: Rgba) -> Rgba {
    if (x / cell + y / cell) % 2 == 0 { a } else { b }
}

fn key_rgb(color: KeyColor) -> Rgba {
    match color {
        KeyColor::Blue => Rgba::rgb(60, 90, 230),
        KeyColor::Red => Rgba::rgb(220, 40, 40),
        KeyColor::Gold => Rgba::rgb(235, 190, 40),
    }
}

fn wall(code: u16) -> Texture {
    match DoorLock::from_code(code) {
        Some(lock) => door(lock.required_key()),
        None => {
            let base = match code % 5 {
                1 => Rgba::rgb(150, 60, 50),
                2 => Rgba::rgb(120, 120, 130),
                3 => Rgba::rgb(70, 110, 70),
                4 => Rgba::rgb(90, 80, 140),
                _ => Rgba::rgb(140, 120, 80),
            };
            let mortar = base.shade(0.55);
            Texture::from_fn(SIZE, SIZE, |x, y| {
                let row = y / 8;
                let offset = if row % 2 == 0 { 0 } else { 8 };
                if y % 8 == 0 || (x + offset) % 16 == 0 { mortar } else { base }
            })
        }
    }
}

fn door(lock: Option<KeyColor>) -> Texture {
    let steel = Rgba::rgb(80, 110, 120);
    let trim = steel.shade(0.6);
    Texture::from_fn(SIZE, SIZE, |x, y| {
        let band = (12..20).contains(&y);
        match lock {
            Some(color) if band && (4..28).contains(&x) => key_rgb(color),
            _ if x < 2 || x >= SIZE - 2 || y < 2 || y >= SIZE - 2 => trim,
            _ => steel,
        }
    })
}

/// Draws a filled box into a transparent canvas.
fn boxed(color: Rgba, left: u32, top: u32, right: u32, bottom: u32) -> impl Fn(u32, u32) -> Rgba {
    move |x, y| {
        if (left..right).contains(&x) && (top..bottom).contains(&y) { color } else { CLEAR }
    }
}

fn key(color: Rgba) -> Texture {
    Texture::from_fn(SIZE, SIZE, |x, y| {
        let ring = (10..22).contains(&x) && (16..24).contains(&y) && !((13..19).contains(&x) && (18..22).contains(&y));
        let shaft = (14..18).contains(&x) && (24..31).contains(&y);
        let tooth = (18..21).contains(&x) && (27..29).contains(&y);
        if ring || shaft || tooth { color } else { CLEAR }
    })
}

fn weapon(kind: WeaponKind) -> Texture {
    let metal = Rgba::rgb(150, 150, 160);
    let grip = Rgba::rgb(90, 60, 40);
    match kind {
        WeaponKind::Knife => Texture::from_fn(SIZE, SIZE, |x, y| match (x, y) {
            (8..22, 25..27) => metal,
            (22..28, 24..28) => grip,
            _ => CLEAR,
        }),
        WeaponKind::Pistol => Texture::from_fn(SIZE, SIZE, |x, y| match (x, y) {
            (8..24, 22..25) => metal,
            (18..23, 25..31) => grip,
            _ => CLEAR,
        }),
        WeaponKind::Rifle => Texture::from_fn(SIZE, SIZE, |x, y| match (x, y) {
            (2..28, 23..26) => metal,
            (20..30, 24..29) => grip,
            (12..15, 26..30) => metal,
            _ => CLEAR,
        }),
    }
}

fn health(amount: u32) -> Texture {
    let (top, size) = if amount >= 25 { (14, 16) } else { (20, 10) };
    let left = (SIZE - size) / 2;
    let white = boxed(Rgba::rgb(235, 235, 235), left, top, left + size, top + size);
    let mid = left + size / 2;
    let vmid = top + size / 2;
    Texture::from_fn(SIZE, SIZE, |x, y| {
        let cross = (x + 2 > mid && x < mid + 2 && (top + 2..top + size - 2).contains(&y))
            || (y + 2 > vmid && y < vmid + 2 && (left + 2..left + size - 2).contains(&x));
        if cross { Rgba::rgb(200, 30, 30) } else { white(x, y) }
    })
}

fn ammo(weapon: WeaponKind, amount: u32) -> Texture {
    let shell = match weapon {
        WeaponKind::Rifle => Rgba::rgb(180, 140, 60),
        _ => Rgba::rgb(200, 170, 90),
    };
    let width = 6 + amount.min(15);
    let left = (SIZE - width) / 2;
    let body = boxed(Rgba::rgb(70, 90, 50), left, 22, left + width, SIZE);
    Texture::from_fn(SIZE, SIZE, |x, y| {
        if (left..left + width).contains(&x) && (19..22).contains(&y) && x % 3 != 0 {
            shell
        } else {
            body(x, y)
        }
    })
}

fn decoration(letter: char) -> Texture {
    // Spread hues by letter so neighbors differ.
    let seed = letter as u32;
    let color = Rgba::rgb((seed * 53 % 160 + 60) as u8, (seed * 97 % 160 + 60) as u8, (seed * 29 % 160 + 60) as u8);
    let stem = color.shade(0.6);
    Texture::from_fn(SIZE, SIZE, |x, y| {
        let dx = x as i32 - 16;
        let dy = y as i32 - 10;
        if dx * dx + dy * dy < 64 {
            color
        } else if ((15..17).contains(&x) && y >= 10) || (y >= SIZE - 2 && (10..22).contains(&x)) {
            stem
        } else {
            CLEAR
        }
    })
}

fn guard(frame: u8, octant: u8) -> Texture {
    let uniform = match frame {
        8 | 9 => Rgba::rgb(200, 120, 100),
        10..=13 => Rgba::rgb(100, 70, 60),
        _ => Rgba::rgb(120, 100, 60),
    };
    let skin = Rgba::rgb(220, 180, 140);
    let muzzle = Rgba::rgb(255, 230, 120);
    // Dead frames sink toward the floor.
    let sink = u32::from(frame.saturating_sub(9)) * 5;
    // Facing shifts the face pixel so the octant is visible.
    let face = 12 + u32::from(octant % 4) * 2;
    Texture::from_fn(SIZE, SIZE, move |x, y| {
        let y = match y.checked_sub(sink) {
            Some(y) => y,
            None => return CLEAR,
        };
        let head = (12..20).contains(&x) && (2..9).contains(&y);
        let body = (9..23).contains(&x) && (9..22).contains(&y);
        let legs = ((10..15).contains(&x) || (17..22).contains(&x)) && (22..32).contains(&y);
        if frame == 6 && (22..26).contains(&x) && (12..15).contains(&y) {
            muzzle
        } else if head && x == face && y == 5 && octant < 4 {
            Rgba::BLACK
        } else if head {
            skin
        } else if body || legs {
            uniform
        } else {
            CLEAR
        }
    })
}
