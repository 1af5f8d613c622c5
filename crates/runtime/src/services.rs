//! Sound and HUD sinks backed by tracing and an in-memory message log.
use std::collections::VecDeque;

use raycast_core::{HudEvent, HudSink, PickupKind, PlayerStatus, SoundCue, SoundPlayer};

/// Sound player that only logs cues. Used when no audio device is wired in.
#[derive(Clone, Debug, Default)]
pub struct LoggedSound {
    played: u64,
}

impl LoggedSound {
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundPlayer for LoggedSound {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.played += 1;
        tracing::trace!(?cue, volume, "sound cue");
    }
}

/// A HUD line with the seconds it has left on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct HudMessage {
    pub text: String,
    pub remaining: f32,
}

/// Keeps the latest player status and a short queue of fading messages.
#[derive(Clone, Debug)]
pub struct HudLog {
    status: Option<PlayerStatus>,
    messages: VecDeque<HudMessage>,
    capacity: usize,
    ttl: f32,
}

impl HudLog {
    pub fn new(capacity: usize, ttl: f32) -> Self {
        Self {
            status: None,
            messages: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn player_status(&self) -> Option<&PlayerStatus> {
        self.status.as_ref()
    }

    /// Messages oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &HudMessage> {
        self.messages.iter()
    }

    /// Ages messages by `dt` and drops the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for message in &mut self.messages {
            message.remaining -= dt;
        }
        self.messages.retain(|message| message.remaining > 0.0);
    }

    fn push(&mut self, text: String) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(HudMessage {
            text,
            remaining: self.ttl,
        });
    }
}

impl Default for HudLog {
    fn default() -> Self {
        Self::new(4, 2.5)
    }
}

impl HudSink for HudLog {
    fn notify(&mut self, event: HudEvent) {
        match event {
            HudEvent::PlayerDied | HudEvent::LevelRestarted => tracing::info!(?event, "hud"),
            _ => tracing::debug!(?event, "hud"),
        }
        // Shots are visible on screen already.
        if matches!(event, HudEvent::WeaponFired(_)) {
            return;
        }
        self.push(describe_event(event));
    }

    fn status(&mut self, status: &PlayerStatus) {
        if self.status.as_ref() != Some(status) {
            self.status = Some(status.clone());
        }
    }
}

/// Player-facing text for a HUD event.
pub fn describe_event(event: HudEvent) -> String {
    match event {
        HudEvent::DoorLocked(color) => format!("You need the {color} key"),
        HudEvent::Collected(pickup) => match pickup {
            PickupKind::Key(color) => format!("Picked up the {color} key"),
            PickupKind::Weapon(kind) => format!("Picked up a {kind}"),
            PickupKind::Health(amount) => format!("Health +{amount}"),
            PickupKind::Ammo { weapon, amount } => format!("{weapon} ammo +{amount}"),
        },
        HudEvent::WeaponFired(kind) => format!("{kind} fired"),
        HudEvent::EnemyKilled => "Enemy down".to_owned(),
        HudEvent::PlayerHurt(damage) => format!("Hit for {damage}"),
        HudEvent::PlayerDied => "You died. Press R to restart".to_owned(),
        HudEvent::LevelRestarted => "Level restarted".to_owned(),
    }
}
