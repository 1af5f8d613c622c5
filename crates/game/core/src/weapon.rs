//! Weapon definitions and the player's arsenal.
use std::collections::BTreeMap;

use crate::combat::{AttackProfile, DamageRoll};
use crate::config::FalloffRange;

/// Upper bound on carried rounds per weapon.
pub const MAX_AMMO: u32 = 99;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Knife,
    Pistol,
    Rifle,
}

impl WeaponKind {
    /// Weapon bound to number key `slot` (1-based).
    pub const fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Knife),
            2 => Some(Self::Pistol),
            3 => Some(Self::Rifle),
            _ => None,
        }
    }
}

/// Static properties of one weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDef {
    pub kind: WeaponKind,
    pub multiplier: u32,
    pub accuracy: u32,
    /// Rounds granted on pickup; `None` for weapons that need no ammo.
    pub starting_ammo: Option<u32>,
    pub range: f32,
    /// Seconds between shots.
    pub cooldown: f32,
    /// Enemies within this distance hear the shot.
    pub alert_radius: f32,
}

impl WeaponDef {
    pub const fn uses_ammo(&self) -> bool {
        self.starting_ammo.is_some()
    }

    pub fn attack_profile(&self, falloff: FalloffRange) -> AttackProfile {
        AttackProfile {
            accuracy: self.accuracy,
            falloff,
            damage: DamageRoll::Scaled {
                multiplier: self.multiplier,
            },
        }
    }
}

/// Definitions indexed by [`WeaponKind`], built once at load.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponRegistry {
    defs: [WeaponDef; 3],
}

impl WeaponRegistry {
    /// Builds a registry, filling kinds missing from `defs` with defaults.
    pub fn from_defs(defs: impl IntoIterator<Item = WeaponDef>) -> Self {
        let mut registry = Self::default();
        for def in defs {
            registry.defs[def.kind as usize] = def;
        }
        registry
    }

    pub fn get(&self, kind: WeaponKind) -> &WeaponDef {
        &self.defs[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeaponDef> {
        self.defs.iter()
    }
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        // Slots follow the declaration order of `WeaponKind`.
        let defs = [
            WeaponDef {
                kind: WeaponKind::Knife,
                multiplier: 1,
                accuracy: 100,
                starting_ammo: None,
                range: 2.0,
                cooldown: 0.1,
                alert_radius: 0.0,
            },
            WeaponDef {
                kind: WeaponKind::Pistol,
                multiplier: 2,
                accuracy: 4,
                starting_ammo: Some(30),
                range: 70.0,
                cooldown: 0.3,
                alert_radius: 16.0,
            },
            WeaponDef {
                kind: WeaponKind::Rifle,
                multiplier: 3,
                accuracy: 6,
                starting_ammo: Some(50),
                range: 90.0,
                cooldown: 0.7,
                alert_radius: 24.0,
            },
        ];
        Self { defs }
    }
}

/// Why a trigger pull did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FireBlocked {
    #[error("no weapon equipped")]
    Unarmed,
    #[error("weapon is cooling down")]
    CoolingDown,
    #[error("{0} is out of ammo")]
    OutOfAmmo(WeaponKind),
}

/// Weapons the player holds, their ammo and the shot cooldown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arsenal {
    /// Owned weapons with their ammo (`None` for ammo-less weapons).
    owned: BTreeMap<WeaponKind, Option<u32>>,
    equipped: Option<WeaponKind>,
    cooldown: f32,
}

impl Arsenal {
    pub fn has(&self, kind: WeaponKind) -> bool {
        self.owned.contains_key(&kind)
    }

    pub fn equipped(&self) -> Option<WeaponKind> {
        self.equipped
    }

    pub fn ammo(&self, kind: WeaponKind) -> Option<u32> {
        self.owned.get(&kind).copied().flatten()
    }

    /// Adds a weapon with its starting ammo and equips it.
    /// Returns false if it was already owned.
    pub fn grant(&mut self, def: &WeaponDef) -> bool {
        if self.has(def.kind) {
            return false;
        }
        self.owned
            .insert(def.kind, def.starting_ammo.map(|ammo| ammo.min(MAX_AMMO)));
        self.equipped = Some(def.kind);
        true
    }

    /// Equips an owned weapon. Returns false for weapons not owned.
    pub fn equip(&mut self, kind: WeaponKind) -> bool {
        if !self.has(kind) {
            return false;
        }
        self.equipped = Some(kind);
        true
    }

    /// Adds rounds to an owned ammo weapon, capped at [`MAX_AMMO`].
    /// Returns false when nothing was added.
    pub fn add_ammo(&mut self, kind: WeaponKind, amount: u32) -> bool {
        match self.owned.get_mut(&kind) {
            Some(Some(ammo)) if *ammo < MAX_AMMO => {
                *ammo = (*ammo + amount).min(MAX_AMMO);
                true
            }
            _ => false,
        }
    }

    /// Counts down the shot cooldown.
    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Pulls the trigger: checks cooldown and ammo, consumes a round and
    /// starts the cooldown. Returns the weapon that fired.
    pub fn fire(&mut self, registry: &WeaponRegistry) -> Result<WeaponKind, FireBlocked> {
        let kind = self.equipped.ok_or(FireBlocked::Unarmed)?;
        if self.cooldown > 0.0 {
            return Err(FireBlocked::CoolingDown);
        }
        if let Some(Some(ammo)) = self.owned.get_mut(&kind) {
            if *ammo == 0 {
                return Err(FireBlocked::OutOfAmmo(kind));
            }
            *ammo -= 1;
        }
        self.cooldown = registry.get(kind).cooldown;
        Ok(kind)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_fills_missing_kinds() {
        let custom = WeaponDef {
            range: 5.0,
            ..*WeaponRegistry::default().get(WeaponKind::Pistol)
        };
        let registry = WeaponRegistry::from_defs([custom]);
        assert_eq!(registry.get(WeaponKind::Pistol).range, 5.0);
        assert_eq!(registry.get(WeaponKind::Rifle).accuracy, 6);
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn firing_consumes_ammo_and_respects_cooldown() {
        let registry = WeaponRegistry::default();
        let mut arsenal = Arsenal::default();
        assert_eq!(arsenal.fire(&registry), Err(FireBlocked::Unarmed));

        arsenal.grant(registry.get(WeaponKind::Pistol));
        assert_eq!(arsenal.fire(&registry), Ok(WeaponKind::Pistol));
        assert_eq!(arsenal.ammo(WeaponKind::Pistol), Some(29));
        assert_eq!(arsenal.fire(&registry), Err(FireBlocked::CoolingDown));

        arsenal.tick(0.3);
        assert!(arsenal.fire(&registry).is_ok());
    }

    #[test]
    fn knife_never_runs_dry() {
        let registry = WeaponRegistry::default();
        let mut arsenal = Arsenal::default();
        arsenal.grant(registry.get(WeaponKind::Knife));
        for _ in 0..5 {
            assert!(arsenal.fire(&registry).is_ok());
            arsenal.tick(1.0);
        }
        assert_eq!(arsenal.ammo(WeaponKind::Knife), None);
    }

    #[test]
    fn ammo_caps_and_requires_weapon() {
        let registry = WeaponRegistry::default();
        let mut arsenal = Arsenal::default();
        assert!(!arsenal.add_ammo(WeaponKind::Rifle, 10));
        arsenal.grant(registry.get(WeaponKind::Rifle));
        assert!(arsenal.add_ammo(WeaponKind::Rifle, 60));
        assert_eq!(arsenal.ammo(WeaponKind::Rifle), Some(MAX_AMMO));
        assert!(!arsenal.add_ammo(WeaponKind::Rifle, 1));
    }

    #[test]
    fn equip_only_owned() {
        let registry = WeaponRegistry::default();
        let mut arsenal = Arsenal::default();
        arsenal.grant(registry.get(WeaponKind::Knife));
        assert!(!arsenal.equip(WeaponKind::Rifle));
        assert_eq!(arsenal.equipped(), Some(WeaponKind::Knife));
        assert_eq!(WeaponKind::from_slot(3), Some(WeaponKind::Rifle));
    }
}
