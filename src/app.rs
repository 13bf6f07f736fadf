use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::FieldConfig;
use crate::ecs::components::Viewport;
use crate::error::AppError;
use crate::field::ParticleField;
use crate::pointer::PointerTracker;
use crate::render::GpuState;
use crate::scheduler::Scheduler;

/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_frame_time: Option<Instant>,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_frame_time: None,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, now: Instant) {
        let Some(last) = self.last_frame_time.replace(now) else {
            return;
        };
        let dt = now.duration_since(last).as_secs_f64();

        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = now.duration_since(self.last_log_time).as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            self.last_log_time = now;
            self.frame_time_sum = 0.0;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    // Created once the window reports a non-empty size.
    field: Option<ParticleField>,
    pointer: PointerTracker,
    scheduler: Scheduler,
    viewport: Viewport,

    frame_stats: FrameStats,

    // Set when initialisation inside the event loop fails.
    init_error: Option<AppError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            field: None,
            pointer: PointerTracker::new(),
            scheduler: Scheduler::new(),
            viewport: Viewport::new(0.0, 0.0),
            frame_stats: FrameStats::new(),
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = WindowAttributes::default()
            .with_title("driftfield")
            .with_visible(false)
            .with_maximized(true);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        self.gpu = Some(GpuState::new(window.clone())?);
        log::info!("wgpu + dot pipeline initialized");

        // Frames are requested explicitly while the scheduler runs.
        event_loop.set_control_flow(ControlFlow::Wait);
        window.set_visible(true);

        // The pre-maximise size may still be reported here, so the field
        // spawns on the first Resized or the first frame, whichever comes first.
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// Spawn the field on the first usable viewport and start ticking.
    fn ensure_field(&mut self) {
        if self.field.is_some() || self.viewport.is_empty() {
            return;
        }
        if let Some(seed) = self.config.seed {
            log::info!("Using seed {seed}");
        }
        self.field = Some(ParticleField::new(&self.config, self.viewport));
        self.scheduler.start();
    }

    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.scheduler.stop();
        self.field = None;
        event_loop.exit();
    }

    fn run_frame(&mut self) {
        if self.field.is_none() {
            if let Some(w) = &self.window {
                let size = w.inner_size();
                self.viewport = Viewport::new(size.width as f32, size.height as f32);
            }
            self.ensure_field();
        }

        // Minimised: keep the field frozen until a real extent comes back.
        if self.viewport.is_empty() {
            return;
        }

        let now = Instant::now();
        self.frame_stats.record_frame(now);

        let (Some(field), Some(gpu)) = (self.field.as_mut(), self.gpu.as_mut()) else {
            return;
        };
        self.scheduler.frame(now, self.viewport, field, &mut self.pointer, gpu);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Initialisation failed: {e}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Schedule the next iteration only while the loop is live.
        if self.scheduler.is_running() {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Close requested, exiting");
                self.teardown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                self.viewport = Viewport::new(new_size.width as f32, new_size.height as f32);
                self.ensure_field();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer
                    .on_pointer_move(position.x as f32, position.y as f32, Instant::now());
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.on_pointer_leave();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                self.pointer.on_pointer_down(Instant::now());
            }
            WindowEvent::RedrawRequested => {
                self.run_frame();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scheduler.stop();
    }
}

/// Entry point - create event loop and run until the window closes.
pub fn run(config: FieldConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
