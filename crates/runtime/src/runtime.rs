//! Fixed-rate frame loop.
//!
//! One tick is: sample input, update the world, render, present. The loop
//! is paced by a tokio interval; the simulation itself stays synchronous.

use tokio::time::{MissedTickBehavior, interval};

use raycast_core::{
    FrameBuffer, NoTextures, PcgRng, RngSource, Services, SoundPlayer, TextureOracle, World,
};

use crate::api::{FrameView, InputSource, Presenter, Result, RuntimeError};
use crate::clock::FrameClock;
use crate::config::RuntimeConfig;
use crate::services::{HudLog, LoggedSound};

/// Whether the loop keeps going after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main runtime that owns the world and drives it frame by frame.
pub struct Runtime<R = PcgRng> {
    config: RuntimeConfig,
    world: World<R>,
    input: Box<dyn InputSource>,
    presenter: Box<dyn Presenter>,
    textures: Box<dyn TextureOracle>,
    sound: Box<dyn SoundPlayer>,
    hud: HudLog,
    frame: FrameBuffer,
    clock: FrameClock,
    frames: u64,
}

impl Runtime<PcgRng> {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder<PcgRng> {
        RuntimeBuilder::new()
    }
}

impl<R: RngSource> Runtime<R> {
    pub fn world(&self) -> &World<R> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<R> {
        &mut self.world
    }

    pub fn hud(&self) -> &HudLog {
        &self.hud
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one tick with the given delta.
    pub fn step(&mut self, dt: f32) -> Result<Flow> {
        let input = self.input.poll(dt).map_err(RuntimeError::Input)?;
        if input.quit {
            tracing::info!(frames = self.frames, "quit requested");
            return Ok(Flow::Quit);
        }

        {
            let mut services = Services::new(self.sound.as_mut(), &mut self.hud);
            if input.restart {
                self.world.restart_level(&mut services);
            }
            self.world.update(&input.intent, dt, &mut services);
        }
        self.hud.tick(dt);

        if let Some((width, height)) = self.presenter.viewport() {
            if (width, height) != (self.frame.width(), self.frame.height()) {
                tracing::debug!(width, height, "resizing frame buffer");
                self.frame = FrameBuffer::new(width, height);
            }
        }
        let output = self.world.render(self.textures.as_ref(), &mut self.frame);
        let view = FrameView {
            frame: &self.frame,
            output: &output,
            hud: &self.hud,
            level: self.world.name(),
            index: self.frames,
            dt,
        };
        self.presenter.present(&view).map_err(RuntimeError::Present)?;
        self.frames += 1;

        if self.config.max_frames.is_some_and(|max| self.frames >= max) {
            tracing::info!(frames = self.frames, "frame limit reached");
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    /// Run the frame loop until the input source quits or the frame limit
    /// is reached. Returns the number of frames presented.
    pub async fn run(&mut self) -> Result<u64> {
        let mut ticker = interval(self.clock.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.clock.reset();
        tracing::info!(
            level = %self.world.name(),
            fps = self.config.target_fps,
            "frame loop started"
        );

        loop {
            let now = ticker.tick().await;
            let dt = self.clock.tick(now.into_std());
            if self.step(dt)? == Flow::Quit {
                break;
            }
        }

        tracing::info!(frames = self.frames, "frame loop stopped");
        Ok(self.frames)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder<R = PcgRng> {
    config: RuntimeConfig,
    world: Option<World<R>>,
    input: Option<Box<dyn InputSource>>,
    presenter: Option<Box<dyn Presenter>>,
    textures: Option<Box<dyn TextureOracle>>,
    sound: Option<Box<dyn SoundPlayer>>,
}

impl<R: RngSource> RuntimeBuilder<R> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            input: None,
            presenter: None,
            textures: None,
            sound: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the world to drive (required)
    pub fn world<S: RngSource>(self, world: World<S>) -> RuntimeBuilder<S> {
        RuntimeBuilder {
            config: self.config,
            world: Some(world),
            input: self.input,
            presenter: self.presenter,
            textures: self.textures,
            sound: self.sound,
        }
    }

    /// Set the input source (required)
    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Set the presenter (required)
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Set wall and sprite textures (default: flat fallbacks only)
    pub fn textures(mut self, textures: impl TextureOracle + 'static) -> Self {
        self.textures = Some(Box::new(textures));
        self
    }

    /// Set the sound player (default: [`LoggedSound`])
    pub fn sound(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Some(Box::new(sound));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime<R>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let input = self.input.ok_or(RuntimeError::MissingInput)?;
        let presenter = self.presenter.ok_or(RuntimeError::MissingPresenter)?;

        let view = &world.config().view;
        let frame = FrameBuffer::new(view.screen_width, view.screen_height);
        let hud = HudLog::new(self.config.hud_capacity, self.config.hud_message_ttl);
        let clock = self.config.clock();

        Ok(Runtime {
            world,
            input,
            presenter,
            textures: self.textures.unwrap_or_else(|| Box::new(NoTextures)),
            sound: self.sound.unwrap_or_else(|| Box::new(LoggedSound::default())),
            hud,
            frame,
            clock,
            frames: 0,
            config: self.config,
        })
    }
}
