//! Frame loop scenarios with scripted input and a capturing presenter.
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use raycast_core::{
    GameConfig, GameError, LevelData, PcgRng, PlayerIntent, Vec2, WeaponRegistry, World,
};
use raycast_runtime::{
    Flow, FrameInput, FrameView, InputSource, Presenter, Runtime, RuntimeConfig, RuntimeError,
    load_world,
};
use tempfile::TempDir;

struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _dt: f32) -> io::Result<FrameInput> {
        Ok(self.frames.pop_front().unwrap_or(FrameInput::QUIT))
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Shown {
    index: u64,
    size: (u32, u32),
    messages: Vec<String>,
    health: Option<u32>,
}

#[derive(Clone, Default)]
struct Capture {
    shown: Arc<Mutex<Vec<Shown>>>,
    viewport: Option<(u32, u32)>,
}

impl Capture {
    fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }
}

impl Presenter for Capture {
    fn viewport(&mut self) -> Option<(u32, u32)> {
        self.viewport
    }

    fn present(&mut self, view: &FrameView<'_>) -> io::Result<()> {
        assert_eq!(view.output.depth.len(), view.frame.width() as usize);
        self.shown.lock().unwrap().push(Shown {
            index: view.index,
            size: (view.frame.width(), view.frame.height()),
            messages: view.hud.messages().map(|m| m.text.clone()).collect(),
            health: view.hud.player_status().map(|s| s.health),
        });
        Ok(())
    }
}

fn room() -> World<PcgRng> {
    let level = LevelData::new(
        "room",
        vec![
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
        ],
        Vec2::new(1.5, 1.5),
        0.0,
    );
    World::new(level, GameConfig::default(), WeaponRegistry::default(), PcgRng::new(9)).unwrap()
}

fn forward() -> FrameInput {
    FrameInput {
        intent: PlayerIntent {
            movement: Vec2::new(1.0, 0.0),
            ..PlayerIntent::default()
        },
        ..FrameInput::default()
    }
}

#[test]
fn builder_requires_its_collaborators() {
    let missing_world = Runtime::builder().build();
    assert!(matches!(missing_world, Err(RuntimeError::MissingWorld)));

    let missing_input = Runtime::builder().world(room()).presenter(Capture::default()).build();
    assert!(matches!(missing_input, Err(RuntimeError::MissingInput)));

    let missing_presenter = Runtime::builder()
        .world(room())
        .input(ScriptedInput::new(Vec::<FrameInput>::new()))
        .build();
    assert!(matches!(missing_presenter, Err(RuntimeError::MissingPresenter)));
}

#[test]
fn each_step_updates_then_presents() {
    let capture = Capture::default();
    let mut runtime = Runtime::builder()
        .world(room())
        .input(ScriptedInput::new(vec![forward(); 30]))
        .presenter(capture.clone())
        .build()
        .unwrap();

    let mut flow = Flow::Continue;
    while flow == Flow::Continue {
        flow = runtime.step(1.0 / 60.0).unwrap();
    }

    // 30 frames at 2 tiles/s for 1/60 s each.
    let x = runtime.world().player().position.x;
    assert!((x - 2.5).abs() < 1e-3, "player at {x}");
    assert_eq!(runtime.frames(), 30);

    let shown = capture.shown();
    assert_eq!(shown.len(), 30);
    assert!(shown.iter().enumerate().all(|(i, s)| s.index == i as u64));
    assert!(shown.iter().all(|s| s.size == (320, 200) && s.health == Some(100)));
}

#[test]
fn restart_input_resets_the_level() {
    let capture = Capture::default();
    let restart = FrameInput {
        restart: true,
        ..FrameInput::default()
    };
    let mut runtime = Runtime::builder()
        .world(room())
        .input(ScriptedInput::new([FrameInput::default(), restart]))
        .presenter(capture.clone())
        .build()
        .unwrap();

    runtime.world_mut().player_mut().take_damage(30);
    runtime.world_mut().place_player(Vec2::new(4.5, 2.5), 1.0);
    assert_eq!(runtime.step(0.01).unwrap(), Flow::Continue);
    assert_eq!(runtime.step(0.01).unwrap(), Flow::Continue);
    assert_eq!(runtime.step(0.01).unwrap(), Flow::Quit);

    assert_eq!(runtime.world().player().position, Vec2::new(1.5, 1.5));
    let shown = capture.shown();
    assert_eq!(shown[0].health, Some(70));
    assert_eq!(shown[1].health, Some(100));
    assert!(shown[1].messages.contains(&"Level restarted".to_owned()));
}

#[test]
fn presenter_viewport_resizes_the_frame() {
    let capture = Capture {
        viewport: Some((80, 48)),
        ..Capture::default()
    };
    let mut runtime = Runtime::builder()
        .world(room())
        .input(ScriptedInput::new([FrameInput::default()]))
        .presenter(capture.clone())
        .build()
        .unwrap();

    runtime.step(0.016).unwrap();
    assert_eq!(capture.shown()[0].size, (80, 48));
    assert_eq!(runtime.frame().width(), 80);
}

#[tokio::test]
async fn run_stops_at_the_frame_limit() {
    let config = RuntimeConfig {
        target_fps: 200,
        max_frames: Some(3),
        ..RuntimeConfig::default()
    };
    let capture = Capture::default();
    let mut runtime = Runtime::builder()
        .config(config)
        .world(room())
        .input(ScriptedInput::new(vec![FrameInput::default(); 10]))
        .presenter(capture.clone())
        .build()
        .unwrap();

    assert_eq!(runtime.run().await.unwrap(), 3);
    assert_eq!(capture.shown().len(), 3);
}

#[tokio::test]
async fn run_ends_when_input_quits() {
    let capture = Capture::default();
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            target_fps: 500,
            ..RuntimeConfig::default()
        })
        .world(room())
        .input(ScriptedInput::new([FrameInput::default(), FrameInput::QUIT, forward()]))
        .presenter(capture.clone())
        .build()
        .unwrap();

    assert_eq!(runtime.run().await.unwrap(), 1);
    assert_eq!(runtime.world().player().position, Vec2::new(1.5, 1.5));
}

#[test]
fn sessions_load_from_a_content_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("levels")).unwrap();
    fs::write(
        temp.path().join("levels/tiny.toml"),
        "name = \"tiny\"\nmap = \"tiny.txt\"\nspawn = [1.5, 1.5]\n",
    )
    .unwrap();
    fs::write(temp.path().join("levels/tiny.txt"), "1 1 1\n1 h 1\n1 1 1\n").unwrap();

    let config = RuntimeConfig {
        content_dir: temp.path().to_path_buf(),
        level: "tiny".to_owned(),
        ..RuntimeConfig::default()
    };
    let world = load_world(&config).unwrap();
    assert_eq!(world.name(), "tiny");
    assert_eq!(world.sprites().len(), 1);

    let missing = RuntimeConfig {
        level: "nowhere".to_owned(),
        ..config
    };
    let error = load_world(&missing).unwrap_err();
    assert_eq!(error.error_code(), "RUNTIME_CONTENT");
    assert!(error.to_string().contains("nowhere.toml"), "{error}");
}

#[test]
fn blocked_spawn_surfaces_as_a_level_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("levels")).unwrap();
    fs::write(
        temp.path().join("levels/walled.toml"),
        "name = \"walled\"\nmap = \"walled.txt\"\nspawn = [0.5, 0.5]\n",
    )
    .unwrap();
    fs::write(temp.path().join("levels/walled.txt"), "1 1 1\n1 0 1\n1 1 1\n").unwrap();

    let config = RuntimeConfig {
        content_dir: temp.path().to_path_buf(),
        level: "walled".to_owned(),
        ..RuntimeConfig::default()
    };
    let error = load_world(&config).unwrap_err();
    assert!(matches!(error, RuntimeError::Level(_)));
    assert_eq!(error.error_code(), "LEVEL_SPAWN_BLOCKED");
}
