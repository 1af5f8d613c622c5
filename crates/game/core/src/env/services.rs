//! Narrow output services the world reports to while updating.
//!
//! Audio playback and HUD presentation live outside the core. The world only
//! emits cues and events through these traits.
use crate::grid::KeyColor;
use crate::pickup::PickupKind;
use crate::player::KeyRing;
use crate::weapon::WeaponKind;

/// Sound effects the simulation can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Weapon(WeaponKind),
    DoorOpen,
    DoorClose,
    Pickup,
    EnemyShoot,
    EnemyPain,
    EnemyDeath,
    PlayerHurt,
}

/// Volume used for most cues, in `[0, 1]`.
pub const FULL_VOLUME: f32 = 1.0;
/// Volume used for pickups.
pub const HALF_VOLUME: f32 = 0.5;

/// Plays sound cues. Implementations must not block the frame.
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// One-shot notifications for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HudEvent {
    DoorLocked(KeyColor),
    Collected(PickupKind),
    WeaponFired(WeaponKind),
    EnemyKilled,
    PlayerHurt(u32),
    PlayerDied,
    LevelRestarted,
}

/// Snapshot of what the HUD shows every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerStatus {
    pub health: u32,
    pub weapon: Option<WeaponKind>,
    /// Ammo of the equipped weapon; `None` for weapons without ammo.
    pub ammo: Option<u32>,
    pub keys: KeyRing,
}

pub trait HudSink {
    fn notify(&mut self, event: HudEvent);

    fn status(&mut self, status: &PlayerStatus);
}

/// Bundles the output services passed into [`World::update`](crate::World::update).
pub struct Services<'a> {
    pub sound: &'a mut dyn SoundPlayer,
    pub hud: &'a mut dyn HudSink,
}

impl<'a> Services<'a> {
    pub fn new(sound: &'a mut dyn SoundPlayer, hud: &'a mut dyn HudSink) -> Self {
        Self { sound, hud }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

impl HudSink for Silent {
    fn notify(&mut self, _event: HudEvent) {}

    fn status(&mut self, _status: &PlayerStatus) {}
}

/// Keeps every cue and event, for inspection after an update.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub sounds: Vec<SoundCue>,
    pub events: Vec<HudEvent>,
    pub last_status: Option<PlayerStatus>,
}

impl Recorder {
    pub fn heard(&self, cue: SoundCue) -> bool {
        self.sounds.contains(&cue)
    }

    pub fn saw(&self, event: HudEvent) -> bool {
        self.events.contains(&event)
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl SoundPlayer for Recorder {
    fn play(&mut self, cue: SoundCue, _volume: f32) {
        self.sounds.push(cue);
    }
}

impl HudSink for Recorder {
    fn notify(&mut self, event: HudEvent) {
        self.events.push(event);
    }

    fn status(&mut self, status: &PlayerStatus) {
        self.last_status = Some(status.clone());
    }
}
