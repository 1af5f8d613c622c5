//! Sliding doors: lock policy, animation state and the blocking rules the
//! ray marcher applies to door cells.
use std::collections::BTreeMap;

use crate::config::DoorConfig;
use crate::geometry::GridCoord;

use super::{Grid, TileKind};

/// Key colors, in tile-code order (7, 8, 9).
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
pub enum KeyColor {
    Blue,
    Red,
    Gold,
}

/// Who may open a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorLock {
    Unlocked,
    Key(KeyColor),
}

impl DoorLock {
    /// Lock policy for a door tile code, `None` when `code` is not a door.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            6 => Some(Self::Unlocked),
            7 => Some(Self::Key(KeyColor::Blue)),
            8 => Some(Self::Key(KeyColor::Red)),
            9 => Some(Self::Key(KeyColor::Gold)),
            _ => None,
        }
    }

    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Key(_))
    }

    pub const fn required_key(self) -> Option<KeyColor> {
        match self {
            Self::Unlocked => None,
            Self::Key(color) => Some(color),
        }
    }
}

/// How a door cell is judged by a ray or collision probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DoorRule {
    /// The door leaf covers `[open, 1]` of the tile edge; a crossing at
    /// `local <= open` slips through the gap.
    #[default]
    Graded,
    /// Anything short of fully open blocks.
    Structural,
}

impl DoorRule {
    /// Whether `door` stops a crossing at edge coordinate `local`.
    pub fn blocks(self, door: &Door, local: f32) -> bool {
        if door.open_amount <= 0.0 {
            return true;
        }
        match self {
            Self::Graded => local > door.open_amount,
            Self::Structural => door.open_amount < 1.0,
        }
    }
}

/// State of one door tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub lock: DoorLock,
    /// 0 is sealed, 1 is fully open.
    pub open_amount: f32,
    pub opening: bool,
    pub closing: bool,
    /// No entity is standing in the doorway.
    pub vacant: bool,
    /// Seconds spent fully open.
    pub open_timer: f32,
}

impl Door {
    pub fn new(lock: DoorLock) -> Self {
        Self {
            lock,
            open_amount: 0.0,
            opening: false,
            closing: false,
            vacant: true,
            open_timer: 0.0,
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.open_amount <= 0.0
    }

    pub fn is_fully_open(&self) -> bool {
        self.open_amount >= 1.0
    }

    pub fn is_animating(&self) -> bool {
        self.opening || self.closing
    }

    /// Start opening. Returns false if the door is not sealed and idle.
    pub fn begin_opening(&mut self) -> bool {
        if !self.is_sealed() || self.opening {
            return false;
        }
        self.opening = true;
        self.closing = false;
        true
    }

    /// Start closing. Only a fully open, vacant, idle door closes.
    pub fn begin_closing(&mut self) -> bool {
        if !self.is_fully_open() || self.closing || !self.vacant {
            return false;
        }
        self.closing = true;
        self.open_timer = 0.0;
        true
    }

    fn reset(&mut self) {
        *self = Self::new(self.lock);
    }
}

/// Something a door did during [`DoorMap::tick`] that deserves a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorTransition {
    FinishedOpening(GridCoord),
    StartedClosing(GridCoord),
    FinishedClosing(GridCoord),
}

/// All doors of a level, keyed by tile coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoorMap {
    doors: BTreeMap<GridCoord, Door>,
}

impl DoorMap {
    /// Creates one sealed door per door-coded tile of `grid`.
    pub fn from_grid(grid: &Grid) -> Self {
        let doors = grid
            .cells()
            .filter_map(|(coord, code)| DoorLock::from_code(code).map(|lock| (coord, Door::new(lock))))
            .collect();
        Self { doors }
    }

    pub fn get(&self, coord: GridCoord) -> Option<&Door> {
        self.doors.get(&coord)
    }

    pub fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Door> {
        self.doors.get_mut(&coord)
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Door)> {
        self.doors.iter().map(|(coord, door)| (*coord, door))
    }

    /// Checks that every door-coded tile has an entry and vice versa.
    pub fn matches_grid(&self, grid: &Grid) -> bool {
        let door_tiles = grid
            .cells()
            .filter(|(_, code)| DoorLock::from_code(*code).is_some())
            .count();
        door_tiles == self.doors.len()
            && self
                .doors
                .keys()
                .all(|coord| grid.kind(*coord) == Some(TileKind::Door))
    }

    /// Marks whether someone stands in the doorway at `coord`. Non-door cells are ignored.
    pub fn set_vacant(&mut self, coord: GridCoord, vacant: bool) {
        if let Some(door) = self.doors.get_mut(&coord) {
            door.vacant = vacant;
        }
    }

    /// Moves an occupant from `from` to `to`, updating both doorways.
    pub fn track_move(&mut self, from: GridCoord, to: GridCoord) {
        if from == to {
            return;
        }
        self.set_vacant(from, true);
        self.set_vacant(to, false);
    }

    /// Advances every door animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, config: &DoorConfig) -> Vec<DoorTransition> {
        let mut transitions = Vec::new();
        for (coord, door) in self.doors.iter_mut() {
            let coord = *coord;
            if door.opening {
                door.open_amount += config.transition_speed * dt;
                if door.open_amount >= 1.0 {
                    door.open_amount = 1.0;
                    door.opening = false;
                    door.open_timer = 0.0;
                    transitions.push(DoorTransition::FinishedOpening(coord));
                }
            } else if door.is_fully_open() && !door.closing {
                door.open_timer += dt;
                if door.open_timer > config.hold_open {
                    if door.vacant {
                        door.closing = true;
                        tracing::debug!(%coord, "door closing");
                        transitions.push(DoorTransition::StartedClosing(coord));
                    }
                    door.open_timer = 0.0;
                }
            }

            if door.closing {
                door.open_amount -= config.transition_speed * dt;
                if door.open_amount <= 0.0 {
                    door.open_amount = 0.0;
                    door.closing = false;
                    transitions.push(DoorTransition::FinishedClosing(coord));
                }
            }
        }
        transitions
    }

    /// Seals every door and clears occupancy.
    pub fn reset(&mut self) {
        for door in self.doors.values_mut() {
            door.reset();
        }
    }
}
