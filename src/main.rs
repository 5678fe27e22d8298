//! Shape Slayer entry point
//!
//! On wasm32 this drives the canvas game loop. Natively it runs a headless
//! autopilot session and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

    use shape_slayer::config::{GameConfig, KeyAction, KeyBindings};
    use shape_slayer::renderer::{RenderState, build_scene, health_text};
    use shape_slayer::sim::{FrameInput, GamePhase, Session};

    /// How long the attack circle stays on screen
    const ATTACK_FLASH_SECS: f32 = 0.1;

    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        last_time: f64,
        input: FrameInput,
        keys: KeyBindings,
        attack_flash: f32,
        game_over_logged: bool,
    }

    impl Game {
        fn new(config: &GameConfig, seed: u64) -> Self {
            Self {
                session: Session::new(config, seed),
                render_state: None,
                last_time: 0.0,
                input: FrameInput::default(),
                keys: config.keys.clone(),
                attack_flash: 0.0,
                game_over_logged: false,
            }
        }

        fn set_key(&mut self, key: &str, down: bool, repeat: bool) {
            match self.keys.action_for(key) {
                Some(KeyAction::Up) => self.input.keys.up = down,
                Some(KeyAction::Down) => self.input.keys.down = down,
                Some(KeyAction::Left) => self.input.keys.left = down,
                Some(KeyAction::Right) => self.input.keys.right = down,
                Some(KeyAction::Pause) => {
                    if down && !repeat {
                        self.input.toggle_pause = true;
                    }
                }
                Some(KeyAction::Restart) => {
                    if down && !repeat && self.session.state.phase == GamePhase::GameOver {
                        self.restart(js_sys::Date::now() as u64);
                    }
                }
                None => {}
            }
        }

        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.attack_flash = 0.0;
            self.game_over_logged = false;
            self.input.clear_one_shots();
        }

        fn update(&mut self, dt: f32) {
            if self.input.attack && self.session.state.phase == GamePhase::Playing {
                self.attack_flash = ATTACK_FLASH_SECS;
            } else {
                self.attack_flash = (self.attack_flash - dt).max(0.0);
            }

            let report = self.session.advance(dt, &self.input);
            if report.attack_hits > 0 {
                log::debug!("Attack hit {} enemies", report.attack_hits);
            }
            if report.game_over && !self.game_over_logged {
                let state = &self.session.state;
                log::info!(
                    "Game over after {:.1}s with {} kills",
                    state.elapsed_secs(),
                    state.kills
                );
                self.game_over_logged = true;
            }
            self.input.clear_one_shots();
        }

        fn render(&mut self) {
            let vertices = build_scene(&self.session, self.attack_flash > 0.0);
            let screen = self.session.state.screen;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, (screen.x, screen.y)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("health-text") {
                el.set_text_content(Some(&health_text(&self.session.state)));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.session.state.phase == GamePhase::GameOver {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Size the canvas backing store for the device pixel ratio; returns the CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (Vec2, (u32, u32)) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), (width, height))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (css_size, (width, height)) = fit_canvas(&canvas);

        let mut config = GameConfig::load();
        config.screen_width = css_size.x;
        config.screen_height = css_size.y;
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("{} starting", config.game.title());

        let game = Rc::new(RefCell::new(Game::new(&config, seed)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_resize_handler(&canvas, game.clone())?;

        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), true, event.repeat());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), false, false);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.mouse = Some(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.mouse = Some(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
                g.input.attack = true;
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                // Scrolling up zooms in
                let notch = -(event.delta_y().signum() as f32);
                game.borrow_mut().input.wheel += notch;
            });
            canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (css_size, (width, height)) = fit_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.input.resize = Some(css_size);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
            log::debug!("Resized to {}x{}", css_size.x, css_size.y);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use shape_slayer::sim::{FrameInput, GameState, MoveKeys, circles_overlap};

    /// Fixed frame time for headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Input a simple bot would give this frame: back away from the closest
    /// enemy and swing at it once it is inside the attack circle.
    pub fn autopilot(state: &GameState) -> FrameInput {
        let player = &state.player;
        let Some(nearest) = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            })
        else {
            return FrameInput::default();
        };

        let away = player.pos - nearest.pos;
        let keys = MoveKeys {
            up: away.y < -1.0,
            down: away.y > 1.0,
            left: away.x < -1.0,
            right: away.x > 1.0,
        };

        // Mouse sits on the enemy, in screen space around the centred player
        let aim = (nearest.pos - player.pos).normalize_or(Vec2::X);
        let mouse = state.screen / 2.0 + aim * 100.0;

        let attack_center = player.pos + aim * (player.size + player.attack_radius / 2.0);
        let attack = circles_overlap(
            attack_center,
            player.attack_radius,
            nearest.pos,
            nearest.size,
        );

        FrameInput {
            keys,
            mouse: Some(mouse),
            attack,
            ..Default::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shape_slayer::config::{GameConfig, GameKind};
    use shape_slayer::sim::{GamePhase, Session};

    env_logger::init();

    let mut config = GameConfig::load();
    let mut seconds: f32 = 60.0;
    for arg in std::env::args().skip(1) {
        if let Some(kind) = GameKind::parse(&arg) {
            config.game = kind;
        } else if let Ok(secs) = arg.parse::<f32>() {
            seconds = secs.max(0.0);
        } else {
            eprintln!("usage: shape-slayer [shape-slayer|slayfast] [seconds]");
            std::process::exit(2);
        }
    }

    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    let mut session = Session::new(&config, seed);

    let frames = (seconds / headless::FRAME_DT).round() as u64;
    let mut attacks = 0usize;
    for _ in 0..frames {
        let input = headless::autopilot(&session.state);
        let report = session.advance(headless::FRAME_DT, &input);
        attacks += report.attack_hits;
        if report.game_over || session.state.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = &session.state;
    log::info!(
        "{} finished: {} ticks ({:.1}s), {} kills, {} hits, health {}/{}, {} enemies alive",
        config.game.title(),
        state.time_ticks,
        state.elapsed_secs(),
        state.kills,
        attacks,
        state.player.health.max(0),
        state.player.max_health,
        state.enemies.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::headless::*;
    use glam::Vec2;
    use shape_slayer::config::GameConfig;
    use shape_slayer::sim::Session;

    #[test]
    fn test_autopilot_idle_without_enemies() {
        let session = Session::new(&GameConfig::default(), 3);
        let input = autopilot(&session.state);
        assert_eq!(input.keys, Default::default());
        assert!(!input.attack);
    }

    #[test]
    fn test_autopilot_flees_and_swings() {
        let mut session = Session::new(&GameConfig::default(), 3);
        session.state.spawn_enemy(Vec2::new(80.0, 0.0));
        let input = autopilot(&session.state);
        assert!(input.keys.left);
        assert!(!input.keys.right);
        assert!(input.attack);
        let mouse = input.mouse.expect("aims at enemy");
        assert!(mouse.x > session.state.screen.x / 2.0);
    }
}
