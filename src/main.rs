//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use lane_runner::scene::{SceneBridge, apply_events, sync_transforms};
    use lane_runner::sim::{GameState, ObstacleId, TickInput, tick};
    use lane_runner::ui::{Hud, OverlaySurface};

    // The 3D engine lives on the JS side; these are its narrow entry points.
    #[wasm_bindgen(inline_js = "
        export function scene_add_obstacle(id, x, y, z) {
            window.sceneEngine?.addObstacle(id, x, y, z);
        }
        export function scene_remove_obstacle(id) {
            window.sceneEngine?.removeObstacle(id);
        }
        export function scene_set_obstacle_position(id, x, y, z) {
            window.sceneEngine?.setObstaclePosition(id, x, y, z);
        }
        export function scene_set_avatar_y(y) {
            window.sceneEngine?.setAvatarY(y);
        }
        export function scene_set_ground_scroll(offset) {
            window.sceneEngine?.setGroundScroll(offset);
        }
        export function scene_set_run_clip(time, paused) {
            window.sceneEngine?.setRunClip(time, paused);
        }
        export function scene_update_camera() {
            window.sceneEngine?.updateControls();
        }
        export function scene_render() {
            window.sceneEngine?.render();
        }
        export function scene_load_avatar() {
            return window.sceneEngine
                ? window.sceneEngine.loadAvatar()
                : Promise.reject('no scene engine');
        }
    ")]
    extern "C" {
        fn scene_add_obstacle(id: u32, x: f32, y: f32, z: f32);
        fn scene_remove_obstacle(id: u32);
        fn scene_set_obstacle_position(id: u32, x: f32, y: f32, z: f32);
        fn scene_set_avatar_y(y: f32);
        fn scene_set_ground_scroll(offset: f32);
        fn scene_set_run_clip(time: f32, paused: bool);
        fn scene_update_camera();
        fn scene_render();
        fn scene_load_avatar() -> js_sys::Promise;
    }

    /// SceneBridge over the JS engine bindings
    struct JsScene;

    impl SceneBridge for JsScene {
        fn add_obstacle(&mut self, id: ObstacleId, pos: glam::Vec3) {
            scene_add_obstacle(id.0, pos.x, pos.y, pos.z);
        }
        fn remove_obstacle(&mut self, id: ObstacleId) {
            scene_remove_obstacle(id.0);
        }
        fn set_obstacle_position(&mut self, id: ObstacleId, pos: glam::Vec3) {
            scene_set_obstacle_position(id.0, pos.x, pos.y, pos.z);
        }
        fn set_avatar_y(&mut self, y: f32) {
            scene_set_avatar_y(y);
        }
        fn set_ground_scroll(&mut self, offset: f32) {
            scene_set_ground_scroll(offset);
        }
        fn set_run_clip(&mut self, time: f32, paused: bool) {
            scene_set_run_clip(time, paused);
        }
        fn render(&mut self) {
            scene_render();
        }
    }

    /// OverlaySurface over the 2D canvas context
    struct CanvasOverlay {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl OverlaySurface for CanvasOverlay {
        fn size(&self) -> (f32, f32) {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        }

        fn clear(&mut self) {
            let (w, h) = self.size();
            self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        }

        fn fill_arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, color: &str) {
            self.ctx.begin_path();
            if self
                .ctx
                .arc(x as f64, y as f64, radius as f64, start as f64, end as f64)
                .is_ok()
            {
                self.ctx.line_to(x as f64, y as f64);
                self.ctx.set_fill_style_str(color);
                self.ctx.fill();
            }
            self.ctx.close_path();
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx
                .fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
            self.ctx.set_font(font);
            self.ctx.set_text_align("center");
            self.ctx.set_fill_style_str(color);
            let _ = self.ctx.fill_text(text, x as f64, y as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: JsScene,
        hud: Hud,
        overlay: CanvasOverlay,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        /// One display refresh: step the sim once, sync the scene, redraw
        /// the overlay if the lives snapshot changed.
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            let input = self.input;
            self.input.jump = false; // one-shot

            tick(&mut self.state, &input, dt);

            let events = self.state.take_events();
            apply_events(&events, &mut self.scene);
            sync_transforms(&self.state, &mut self.scene);
            if self.state.avatar_ready {
                scene_update_camera();
            }
            self.scene.render();

            self.hud
                .update(self.state.lives.snapshot(), &mut self.overlay);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("uiContainer")
            .expect("no overlay canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(800.0) as u32);
        canvas
            .set_height(window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(600.0) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            scene: JsScene,
            hud: Hud::new(),
            overlay: CanvasOverlay { canvas, ctx },
            input: TickInput::default(),
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Single-attempt async model load. On failure the avatar never
        // becomes ready: obstacles and the lane keep moving, jump and
        // collision stay disabled.
        {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match wasm_bindgen_futures::JsFuture::from(scene_load_avatar()).await {
                    Ok(_) => {
                        game.borrow_mut().state.set_avatar_ready();
                        log::info!("avatar model loaded");
                    }
                    Err(err) => {
                        log::error!("avatar model failed to load: {:?}", err);
                    }
                }
            });
        }

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        // Start the frame loop
        request_animation_frame(game);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key().as_str() == " " {
                game.borrow_mut().input.jump = true;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let mut g = game.borrow_mut();
            let w = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(800.0) as u32;
            let h = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(600.0) as u32;
            g.overlay.canvas.set_width(w);
            g.overlay.canvas.set_height(h);
            g.hud.mark_dirty();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Each step is scheduled, not nested: the closure runs the frame and
    /// then asks for the next one, so the call stack never grows.
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::scene::{RecordingScene, SceneBridge, apply_events, sync_transforms};
    use lane_runner::sim::{GameState, TickInput, tick};
    use lane_runner::ui::{Hud, RecordingOverlay};

    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: a short session against the recording bridges
    let mut state = GameState::new(42);
    state.set_avatar_ready();
    let mut scene = RecordingScene::new();
    let mut hud = Hud::new();
    let mut overlay = RecordingOverlay::new(800.0, 600.0);

    for frame in 0..1800u32 {
        let input = TickInput {
            jump: frame % 120 == 0,
        };
        tick(&mut state, &input, 1.0 / 60.0);
        let events = state.take_events();
        apply_events(&events, &mut scene);
        sync_transforms(&state, &mut scene);
        scene.render();
        hud.update(state.lives.snapshot(), &mut overlay);
    }

    let snapshot = state.lives.snapshot();
    println!(
        "30s headless session: {} obstacles spawned, {} live, {}/{} lives, game over: {}",
        scene.adds,
        state.obstacles.len(),
        snapshot.lives,
        snapshot.max_lives,
        snapshot.is_game_over
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
