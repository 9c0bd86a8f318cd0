//! Desktop simulator for the stride pedometer.
//!
//! Renders the stride pages in an SDL2 window via `embedded-graphics-simulator`
//! and feeds a mock step counter so the whole app can be exercised without a
//! device. Preferences are written to a file so restarts can be tested.
//!
//! # Usage
//!
//! ```text
//! stride-simulator [PREFS_PATH] [--no-sensor]
//! ```
//!
//! # Key bindings
//!
//! | Key   | Action                                   |
//! |-------|------------------------------------------|
//! | W     | Walk 25 steps                            |
//! | A     | Toggle auto-walk                         |
//! | B     | Toggle foreground / background           |
//! | X     | Simulate a reboot (sensor counter to 0)  |
//! | Q/Esc | Quit                                     |
//!
//! Mouse clicks are forwarded as touch events.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use stride::app_state::StepCounterApp;
use stride::config::Config;
use stride::pages::PageManager;
use stride::sensors::{SensorAdapter, SensorChannel, SensorError, StepCounter};
use stride::storage::{KeyValueStore, MemoryStore, StorageError, Value};
use stride::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchEvent, TouchPoint, screen_bounds};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const DEFAULT_PREFS_PATH: &str = "stride-prefs.bin";

/// Steps added by one press of `W`.
const WALK_STEPS: f32 = 25.0;

/// Auto-walk cadence: one step per interval.
const AUTO_WALK_INTERVAL: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Mock sensor
// ---------------------------------------------------------------------------

/// Cumulative step counter driven by the keyboard.
struct MockPedometer {
    count: Rc<Cell<f32>>,
}

impl StepCounter for MockPedometer {
    fn read(&mut self) -> Result<f32, SensorError> {
        Ok(self.count.get())
    }
}

// ---------------------------------------------------------------------------
// File-backed preferences
// ---------------------------------------------------------------------------

/// [`MemoryStore`] that writes its postcard snapshot to disk after each write.
struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    fn open(path: PathBuf) -> Self {
        let inner = match std::fs::read(&path) {
            Ok(bytes) => MemoryStore::from_bytes(&bytes).unwrap_or_else(|e| {
                warn!("Ignoring unreadable preferences {}: {}", path.display(), e);
                MemoryStore::new()
            }),
            Err(_) => {
                info!("No preferences at {}, starting fresh", path.display());
                MemoryStore::new()
            }
        };
        Self { path, inner }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.inner.write(key, value)?;
        let bytes = self.inner.to_bytes()?;
        std::fs::write(&self.path, bytes).map_err(|e| {
            error!("Failed to write {}: {}", self.path.display(), e);
            StorageError::Io
        })
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

struct Args {
    prefs_path: PathBuf,
    no_sensor: bool,
}

fn parse_args() -> Args {
    let mut prefs_path = None;
    let mut no_sensor = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-sensor" => no_sensor = true,
            other if other.starts_with("--") => warn!("Unknown flag {}", other),
            path => {
                if prefs_path.is_none() {
                    prefs_path = Some(PathBuf::from(path));
                }
            }
        }
    }

    Args {
        prefs_path: prefs_path.unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH)),
        no_sensor,
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let args = parse_args();
    let config = Config::default();

    info!("Starting stride simulator");
    info!(
        "Display: {}×{} (scale {}×), preferences: {}",
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
        WINDOW_SCALE,
        args.prefs_path.display()
    );
    info!("Keys: W=Walk  A=AutoWalk  B=Background  X=Reboot  Q=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Stride Simulator", &output_settings);

    // Sensor plumbing
    let steps = Rc::new(Cell::new(0.0f32));
    let channel = SensorChannel::new();
    let receiver = channel.receiver();
    let sensor = (!args.no_sensor).then(|| MockPedometer {
        count: Rc::clone(&steps),
    });
    let mut adapter = SensorAdapter::new(sensor, channel.sender());

    let mut app = StepCounterApp::new(FileStore::open(args.prefs_path), &config);
    let mut pages = PageManager::new(screen_bounds(), &app.view());

    let mut foreground = true;
    app.on_foreground(&mut adapter);

    let poll_interval = Duration::from_millis(config.sensor.poll_interval_ms as u64);
    let mut last_poll = Instant::now();
    let mut auto_walk = false;
    let mut last_auto_step = Instant::now();
    let mut touching = false;
    let mut last_frame = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = pages.draw(&mut display) {
        error!("Draw error: {:?}", e);
    }
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let touch = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    match keycode {
                        Keycode::Q | Keycode::Escape => break 'running,
                        Keycode::W => {
                            steps.set(steps.get() + WALK_STEPS);
                            info!("Walked, sensor count {}", steps.get());
                        }
                        Keycode::A => {
                            auto_walk = !auto_walk;
                            info!("Auto-walk {}", if auto_walk { "on" } else { "off" });
                        }
                        Keycode::B => {
                            foreground = !foreground;
                            if foreground {
                                info!("App foregrounded");
                                app.on_foreground(&mut adapter);
                            } else {
                                info!("App backgrounded");
                                app.on_background(&mut adapter);
                            }
                        }
                        Keycode::X => {
                            info!("Simulated reboot, sensor count reset to 0");
                            steps.set(0.0);
                        }
                        _ => {}
                    }
                    None
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    touching = true;
                    Some(TouchEvent::Press(touch_point(point)))
                }
                SimulatorEvent::MouseMove { point } if touching => {
                    Some(TouchEvent::Drag(touch_point(point)))
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    touching = false;
                    Some(TouchEvent::Release(touch_point(point)))
                }

                _ => None,
            };

            // A backgrounded app has no visible screen to touch
            if let Some(touch) = touch.filter(|_| foreground)
                && let Some(action) = pages.handle_touch(touch)
            {
                info!("Touch → action {:?}", action);
                if let Err(e) = app.handle_action(&action) {
                    warn!("Action rejected: {}", e);
                }
            }
        }

        // --- Mock walking -------------------------------------------------
        if auto_walk && last_auto_step.elapsed() >= AUTO_WALK_INTERVAL {
            steps.set(steps.get() + 1.0);
            last_auto_step = Instant::now();
        }

        // --- Sensor -------------------------------------------------------
        if last_poll.elapsed() >= poll_interval {
            if let Err(e) = adapter.poll() {
                warn!("Sensor poll failed: {}", e);
            }
            last_poll = Instant::now();
        }
        app.process_events(&receiver);

        let elapsed_ms = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        app.tick(elapsed_ms);

        // --- Render -------------------------------------------------------
        pages.sync(&app.view());
        if let Err(e) = pages.draw(&mut display) {
            error!("Draw error: {:?}", e);
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
