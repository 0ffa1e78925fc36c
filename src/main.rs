use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use rampage::clock::FrameClock;
use rampage::config::Config;
use rampage::renderer::Renderer;
use rampage::rng::GameRng;
use rampage::scaler::{ScaleLut, blit_bilinear_stretch, build_scale_lut};
use rampage::texture::Textures;
use rampage::tilemap::MapData;
use rampage::vector::Rotation;
use rampage::world::{Input, World};

const CONFIG_PATH: &str = "rampage.toml";

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    world: World,
    renderer: Renderer,
    clock: FrameClock,

    // HUD
    frame_counter: u32,
    sub_steps: usize,
    last_fps_print: Instant,

    scale_lut: ScaleLut,

    // Input and movement
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(config: Config, world: World, clock: FrameClock) -> Self {
        let mut rng = GameRng::new(config.seed);
        let textures = Textures::placeholder(config.render.texture_size);
        let height = config.render.internal_height;
        let renderer = Renderer::new(height * 4 / 3, height, textures, &mut rng);
        Self {
            clock,
            config,
            window: None,
            surface: None,
            world,
            renderer,
            frame_counter: 0,
            sub_steps: 0,
            last_fps_print: Instant::now(),
            scale_lut: ScaleLut::empty(),
            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }

    fn pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|code| self.keys_down.contains(code))
    }

    fn axis(&self, negative: &[KeyCode], positive: &[KeyCode]) -> f64 {
        let mut value = 0.0;
        if self.pressed(negative) {
            value -= 1.0;
        }
        if self.pressed(positive) {
            value += 1.0;
        }
        value
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        let speed = self.axis(
            &[KeyCode::KeyS, KeyCode::ArrowDown],
            &[KeyCode::KeyW, KeyCode::ArrowUp],
        );
        let turn = self.axis(
            &[KeyCode::KeyA, KeyCode::ArrowLeft],
            &[KeyCode::KeyD, KeyCode::ArrowRight],
        );

        let (count, step) = self.clock.substeps(delta);
        // trig stays out here; the world only sees a rotation matrix
        let angle = turn * self.config.sim.turn_speed * step;
        let input = Input {
            speed,
            rotation: Rotation::new(angle.sin(), angle.cos()),
        };
        self.world.player.speed = self.config.sim.move_speed;
        for _ in 0..count {
            self.world.update(step, &input);
        }
        self.sub_steps += count;
    }

    fn rebuild_internal_fb_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        // Keep internal height fixed (controls pixel size look)
        let target_h = self.config.render.internal_height;
        let aspect = if dst_h > 0 {
            dst_w as f64 / dst_h as f64
        } else {
            1.0
        };

        // Derive width from aspect, kept even
        let mut target_w = (target_h as f64 * aspect).round() as usize;
        target_w = target_w.max(self.config.render.min_internal_width);
        if target_w % 2 != 0 {
            target_w += 1;
        }

        self.renderer.resize(target_w, target_h);
        self.scale_lut = build_scale_lut(dst_w, dst_h, target_w, target_h);
        tracing::info!(
            window_width = dst_w,
            window_height = dst_h,
            internal_width = target_w,
            internal_height = target_h,
            "resized"
        );
    }

    fn present(&mut self, id: WindowId) -> Result<(), softbuffer::SoftBufferError> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        surface.resize(width, height)?;

        let frame = self.renderer.draw(&self.world);
        let mut buf = surface.buffer_mut()?;
        blit_bilinear_stretch(&mut buf, width.get() as usize, frame, &self.scale_lut);
        buf.present()?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            tracing::debug!(
                fps = self.frame_counter as f32 / elapsed,
                sub_steps = self.sub_steps,
                "frame stats"
            );
            self.frame_counter = 0;
            self.sub_steps = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Rampage")
            .with_inner_size(LogicalSize::new(
                self.config.render.window_width,
                self.config.render.window_height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window -- exiting");
                event_loop.exit();
                return;
            }
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(surface) => surface,
            Err(e) => {
                tracing::error!(error = %e, "failed to create softbuffer surface -- exiting");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.last_tick = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    match state {
                        ElementState::Pressed => {
                            self.keys_down.insert(code);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(e) = self.present(id) {
                    tracing::error!(error = %e, "failed to present frame -- exiting");
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_internal_fb_and_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config() -> Result<Config, rampage::ConfigError> {
    if Path::new(CONFIG_PATH).exists() {
        tracing::info!(path = CONFIG_PATH, "loading config");
        Config::load(CONFIG_PATH)
    } else {
        Ok(Config::default())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let data: MapData = toml::from_str(rampage::DEFAULT_LEVEL)?;
    let world = World::new(&data)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let clock = FrameClock::from_config(&config.sim)?;
    let mut app = App::new(config, world, clock);
    event_loop.run_app(&mut app)?;
    Ok(())
}
