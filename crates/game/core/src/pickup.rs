//! Collectible items and what they do to the player.
use crate::grid::KeyColor;
use crate::player::{KeyRing, Player};
use crate::weapon::{WeaponKind, WeaponRegistry};

/// Rounds in an ammo pack dropped by a killed enemy.
pub const DROP_AMMO: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Key(KeyColor),
    Weapon(WeaponKind),
    Health(u32),
    Ammo { weapon: WeaponKind, amount: u32 },
}

impl PickupKind {
    /// Pickup placed by a map letter, `None` for decorations.
    pub const fn from_map_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'B' => Self::Key(KeyColor::Blue),
            'R' => Self::Key(KeyColor::Red),
            'G' => Self::Key(KeyColor::Gold),
            'K' => Self::Weapon(WeaponKind::Knife),
            'P' => Self::Weapon(WeaponKind::Pistol),
            'S' => Self::Weapon(WeaponKind::Rifle),
            'h' => Self::Health(10),
            'H' => Self::Health(25),
            'a' => Self::Ammo {
                weapon: WeaponKind::Pistol,
                amount: 15,
            },
            'A' => Self::Ammo {
                weapon: WeaponKind::Rifle,
                amount: 10,
            },
            _ => return None,
        })
    }

    /// Ammo pack left behind by a killed enemy.
    pub const fn drop(weapon: WeaponKind) -> Self {
        Self::Ammo {
            weapon,
            amount: DROP_AMMO,
        }
    }

    /// Applies the pickup to `player`. Returns false when it is of no use
    /// right now and should stay on the floor.
    pub fn apply(self, player: &mut Player, weapons: &WeaponRegistry) -> bool {
        match self {
            Self::Key(color) => {
                if player.keys.holds(color) {
                    return false;
                }
                player.keys |= KeyRing::of(color);
                true
            }
            Self::Weapon(kind) => player.arsenal.grant(weapons.get(kind)),
            Self::Health(amount) => player.heal(amount),
            Self::Ammo { weapon, amount } => player.arsenal.add_ammo(weapon, amount),
        }
    }
}
