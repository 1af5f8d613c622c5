//! Billboard sprites: pickups, decorations, enemies and dropped ammo.
mod compositor;

pub use compositor::{SpriteProjection, VisibleSprite, project, render_sprites};

use crate::enemy::EnemyId;
use crate::geometry::Vec2;
use crate::pickup::PickupKind;
use crate::render::SpriteTexture;

/// Index into a [`SpriteList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(pub u32);

/// What a sprite stands for in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Decoration,
    Pickup(PickupKind),
    Enemy(EnemyId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    /// World position of the sprite's center.
    pub position: Vec2,
    pub texture: SpriteTexture,
    pub kind: SpriteKind,
    pub active: bool,
    /// Spawned during play; removed on restart.
    pub dynamic: bool,
}

impl Sprite {
    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, SpriteKind::Enemy(_))
    }
}

/// All sprites of a level. Ids stay stable until [`SpriteList::remove_dynamic`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, position: Vec2, texture: SpriteTexture, kind: SpriteKind, dynamic: bool) -> SpriteId {
        let id = SpriteId(self.sprites.len() as u32);
        self.sprites.push(Sprite {
            id,
            position,
            texture,
            kind,
            active: true,
            dynamic,
        });
        id
    }

    /// Adds a sprite that belongs to the level layout.
    pub fn add(&mut self, position: Vec2, texture: SpriteTexture, kind: SpriteKind) -> SpriteId {
        self.push(position, texture, kind, false)
    }

    /// Adds a sprite spawned during play.
    pub fn spawn(&mut self, position: Vec2, texture: SpriteTexture, kind: SpriteKind) -> SpriteId {
        self.push(position, texture, kind, true)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|sprite| sprite.active)
    }

    /// Drops every sprite spawned during play.
    ///
    /// Level sprites are always added before play starts, so removing the
    /// dynamic tail leaves every remaining id valid.
    pub fn remove_dynamic(&mut self) {
        self.sprites.retain(|sprite| !sprite.dynamic);
    }

    /// Reactivates every level sprite.
    pub fn reactivate_all(&mut self) {
        for sprite in &mut self.sprites {
            sprite.active = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::WeaponKind;

    #[test]
    fn restart_helpers_keep_level_sprites() {
        let mut list = SpriteList::new();
        let key = list.add(
            Vec2::new(1.5, 1.5),
            SpriteTexture::Decoration('L'),
            SpriteKind::Decoration,
        );
        let drop = PickupKind::Ammo {
            weapon: WeaponKind::Pistol,
            amount: 5,
        };
        list.spawn(Vec2::new(2.5, 1.5), SpriteTexture::Pickup(drop), SpriteKind::Pickup(drop));
        if let Some(sprite) = list.get_mut(key) {
            sprite.active = false;
        }

        list.remove_dynamic();
        list.reactivate_all();
        assert_eq!(list.len(), 1);
        assert!(list.get(key).unwrap().active);
    }
}
