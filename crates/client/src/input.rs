//! Keyboard input with held-key emulation.
//!
//! Most terminals report key presses and auto-repeats but no releases, so a
//! movement key counts as held for a short window after each press or
//! repeat. Commands (door, weapon select, restart, quit) fire once per press.
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use raycast_core::{PlayerIntent, Vec2, WeaponKind};
use raycast_runtime::{FrameInput, InputSource};

/// Controls that stay active while their key is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Fire,
}

impl Control {
    const COUNT: usize = 7;

    const fn index(self) -> usize {
        self as usize
    }
}

/// One-shot commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Interact,
    Select(WeaponKind),
    Restart,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Hold(Control),
    Press(Command),
}

/// Maps a key to its game binding.
pub fn bind(key: &KeyEvent) -> Option<Binding> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Binding::Press(Command::Quit));
    }
    let binding = match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Binding::Hold(Control::Forward),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Binding::Hold(Control::Back),
        KeyCode::Char('a' | 'A') => Binding::Hold(Control::StrafeLeft),
        KeyCode::Char('d' | 'D') => Binding::Hold(Control::StrafeRight),
        KeyCode::Left => Binding::Hold(Control::TurnLeft),
        KeyCode::Right => Binding::Hold(Control::TurnRight),
        KeyCode::Char('f' | 'F') | KeyCode::Enter => Binding::Hold(Control::Fire),
        KeyCode::Char(' ') => Binding::Press(Command::Interact),
        KeyCode::Char('r' | 'R') => Binding::Press(Command::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Binding::Press(Command::Quit),
        KeyCode::Char(digit @ '1'..='3') => {
            let slot = digit as u8 - b'0';
            Binding::Press(Command::Select(WeaponKind::from_slot(slot)?))
        }
        _ => return None,
    };
    Some(binding)
}

/// Held controls and pending commands between two frames.
#[derive(Clone, Debug)]
pub struct KeyState {
    hold: f32,
    remaining: [f32; Control::COUNT],
    pending: FrameInput,
}

impl KeyState {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold: hold.as_secs_f32(),
            remaining: [0.0; Control::COUNT],
            pending: FrameInput::default(),
        }
    }

    pub fn press(&mut self, binding: Binding) {
        match binding {
            Binding::Hold(control) => self.remaining[control.index()] = self.hold,
            Binding::Press(Command::Interact) => self.pending.intent.interact = true,
            Binding::Press(Command::Select(kind)) => self.pending.intent.select = Some(kind),
            Binding::Press(Command::Restart) => self.pending.restart = true,
            Binding::Press(Command::Quit) => self.pending.quit = true,
        }
    }

    /// Explicit release, for terminals that report them.
    pub fn release(&mut self, control: Control) {
        self.remaining[control.index()] = 0.0;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.remaining[control.index()] > 0.0
    }

    /// Builds this frame's input, then ages held keys by `dt`.
    pub fn frame(&mut self, dt: f32) -> FrameInput {
        let mut input = std::mem::take(&mut self.pending);
        let axis = |positive: Control, negative: Control| {
            f32::from(u8::from(self.is_held(positive))) - f32::from(u8::from(self.is_held(negative)))
        };
        input.intent = PlayerIntent {
            movement: Vec2::new(
                axis(Control::Forward, Control::Back),
                axis(Control::StrafeRight, Control::StrafeLeft),
            ),
            turn: axis(Control::TurnRight, Control::TurnLeft),
            fire: self.is_held(Control::Fire),
            ..input.intent
        };
        for remaining in &mut self.remaining {
            *remaining = (*remaining - dt).max(0.0);
        }
        input
    }
}

/// [`InputSource`] reading crossterm key events without blocking.
pub struct KeyboardInput {
    state: KeyState,
}

impl KeyboardInput {
    pub fn new(hold: Duration) -> Self {
        Self {
            state: KeyState::new(hold),
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self, dt: f32) -> io::Result<FrameInput> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match (bind(&key), key.kind) {
                (Some(Binding::Hold(control)), KeyEventKind::Release) => self.state.release(control),
                (Some(binding), KeyEventKind::Press | KeyEventKind::Repeat) => {
                    self.state.press(binding);
                }
                (None, KeyEventKind::Press) => tracing::trace!(code = ?key.code, "unbound key"),
                _ => {}
            }
        }
        Ok(self.state.frame(dt))
    }
}
