//! Word Scramble entry point
//!
//! Binds the round engine to the page on the web, or plays a plain
//! terminal round loop natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use word_scramble::sim::{GameEvent, GuessOutcome, Phase, RoundEngine};
    use word_scramble::{Preset, Settings, TimerMode};

    /// Longest frame delta fed to the engine (ms); a hidden tab stalls the clock
    const MAX_FRAME_MS: f64 = 100.0;

    /// Game instance holding the engine and frame timing
    struct Game {
        engine: RoundEngine,
        accumulator: f64,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                engine: RoundEngine::with_builtin_words(Settings::from_preset(Preset::Full), seed),
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Feed whole milliseconds of frame time to the engine
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            self.accumulator += dt;

            let whole = self.accumulator.floor();
            self.accumulator -= whole;
            if whole > 0.0 {
                self.engine.update(whole as u64);
            }
        }

        /// Apply queued engine events to the DOM
        fn update_hud(&mut self, document: &Document) {
            for event in self.engine.take_events() {
                match event {
                    GameEvent::RoundPrepared { scrambled } => {
                        set_text(document, "scrambledWord", &scrambled);
                        set_text(document, "message", "");
                        set_class(document, "message", "message");
                        reset_input(document);
                    }
                    GameEvent::ScoreChanged { score, .. } => {
                        set_text(document, "score", &score.to_string());
                    }
                    GameEvent::TimeChanged { time_left } => {
                        let text = time_left.map(|t| t.to_string()).unwrap_or_else(|| "∞".to_string());
                        set_text(document, "timer", &text);
                    }
                    GameEvent::Feedback(feedback) => {
                        set_text(document, "message", &feedback.message);
                        set_class(
                            document,
                            "message",
                            &format!("message {}", feedback.kind.css_class()),
                        );
                    }
                    GameEvent::PhaseChanged(phase) => show_phase(document, phase),
                    GameEvent::GameOver { final_score, word } => {
                        set_text(document, "finalScore", &final_score.to_string());
                        set_text(document, "revealedWord", &word);
                    }
                }
            }
        }
    }

    fn element(document: &Document, id: &str) -> Option<Element> {
        document.get_element_by_id(id)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = element(document, id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = element(document, id) {
            el.set_class_name(class);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = element(document, id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn player_input(document: &Document) -> Option<HtmlInputElement> {
        element(document, "playerInput")?.dyn_into().ok()
    }

    fn select_value(document: &Document, id: &str) -> Option<String> {
        let select: HtmlSelectElement = element(document, id)?.dyn_into().ok()?;
        Some(select.value())
    }

    fn reset_input(document: &Document) {
        if let Some(input) = player_input(document) {
            input.set_value("");
            let _ = input.focus();
        }
    }

    fn show_phase(document: &Document, phase: Phase) {
        set_visible(document, "settingsModal", phase == Phase::Idle);
        set_visible(document, "startBtn", phase == Phase::Ready);
        set_visible(document, "gameOver", phase == Phase::GameOver);
        if let Some(input) = player_input(document) {
            input.set_disabled(phase != Phase::Active);
            if phase == Phase::Active {
                let _ = input.focus();
            }
        }
    }

    fn submit(game: &Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(input) = player_input(&document) else {
            return;
        };
        let mut g = game.borrow_mut();
        match g.engine.submit_guess(&input.value()) {
            Ok(GuessOutcome::Incorrect { game_over: false }) => reset_input(&document),
            Ok(outcome) => log::debug!("Guess: {:?}", outcome),
            Err(err) => log::debug!("Guess rejected: {}", err),
        }
    }

    /// Read the settings modal and start a game
    fn start_from_settings(game: &Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let difficulty = select_value(&document, "difficultySelect").unwrap_or_default();
        let timer = select_value(&document, "timerSelect").unwrap_or_default();

        let mut g = game.borrow_mut();
        let started = timer
            .parse::<TimerMode>()
            .and_then(|timer_mode| g.engine.configure(&difficulty, timer_mode))
            .and_then(|()| g.engine.start_game());
        if let Err(err) = started {
            log::warn!("Cannot start: {}", err);
            set_text(&document, "message", &err.to_string());
            set_class(&document, "message", "message incorrect");
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(el) = element(document, id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Word Scramble starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_help(&document);

        show_phase(&document, Phase::Idle);
        request_animation_frame(game);
        log::info!("Word Scramble running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(input) = player_input(document) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    submit(&game);
                }
            });
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "submitBtn", move || submit(&game));
        }
        {
            let game = game.clone();
            on_click(document, "startBtn", move || game.borrow_mut().engine.begin());
        }
        {
            let game = game.clone();
            on_click(document, "settingsStartBtn", move || start_from_settings(&game));
        }
        {
            let game = game.clone();
            on_click(document, "restartBtn", move || {
                if let Err(err) = game.borrow_mut().engine.restart() {
                    log::warn!("Cannot restart: {}", err);
                }
            });
        }
        on_click(document, "settingsBtn", move || {
            game.borrow_mut().engine.quit();
            log::info!("Back to settings");
        });
    }

    fn setup_help(document: &Document) {
        on_click(document, "helpBtn", || {
            let document = web_sys::window().unwrap().document().unwrap();
            set_class(&document, "helpGuide", "help-guide");
        });
        on_click(document, "closeHelpBtn", || {
            let document = web_sys::window().unwrap().document().unwrap();
            set_class(&document, "helpGuide", "help-guide help-hidden");
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();
            g.update(time);
            g.update_hud(&document);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead, Write};
    use std::time::{SystemTime, UNIX_EPOCH};

    use word_scramble::consts::ADVANCE_DELAY_MS;
    use word_scramble::sim::{GuessOutcome, Phase, RoundEngine};
    use word_scramble::{Preset, Settings};

    env_logger::init();
    log::info!("Word Scramble (native) starting...");
    log::info!("Native mode is a plain terminal loop - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut engine = RoundEngine::with_builtin_words(Settings::from_preset(Preset::Classic), seed);
    if let Err(err) = engine.start_game() {
        eprintln!("Cannot start: {}", err);
        return;
    }

    println!("Unscramble the word! (Ctrl-D to quit)");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some(word) = engine.scrambled_word() {
            print!("\n{}   score: {}\n> ", word, engine.score());
            let _ = io::stdout().flush();
        }
        let Some(Ok(line)) = lines.next() else {
            break;
        };

        let result = engine.submit_guess(&line);
        if let Some(feedback) = engine.feedback() {
            println!("{}", feedback.message);
        }
        if let Ok(GuessOutcome::Correct { .. }) = result {
            // No wall clock here: skip straight past the advance delay
            engine.update(ADVANCE_DELAY_MS);
        }
        if engine.phase() == Phase::GameOver {
            break;
        }
    }
    println!("\nFinal score: {}", engine.score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
