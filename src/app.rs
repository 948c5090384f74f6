//! Application shell
//!
//! Owns the screen flow (title → in-game → title), converts polled buttons
//! into a [`TickInput`], steps the simulation once per frame and routes the
//! resulting events to audio and best score storage.

use crate::audio::AudioManager;
use crate::highscores::BestScore;
use crate::platform::{AudioSink, Button, Canvas, InputSource, ScoreStore};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    InGame,
}

/// Game instance holding all state
pub struct Game {
    screen: Screen,
    state: GameState,
    best: BestScore,
    settings: Settings,
    audio: AudioManager,
    renderer: Renderer,
    /// Frames since startup (drives title color cycling)
    frame: u64,
    /// Seed for the next run when settings do not fix one
    next_seed: u64,
}

impl Game {
    pub fn new(settings: Settings, store: &dyn ScoreStore, seed: u64) -> Self {
        let best = BestScore::load(store);
        log::info!("Demolisher ready, best score {}", best.value);
        Self {
            screen: Screen::Title,
            state: GameState::new(settings.seed.unwrap_or(seed)),
            best,
            audio: AudioManager::from_settings(&settings),
            renderer: Renderer::new(seed ^ 0x9e37_79b9_7f4a_7c15, &settings),
            settings,
            frame: 0,
            next_seed: seed,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn best_score(&self) -> u64 {
        self.best.value
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.renderer.apply_settings(&settings);
        self.settings = settings;
    }

    /// Start a fresh run at stage 0
    fn start_run(&mut self) {
        let seed = self.settings.seed.unwrap_or(self.next_seed);
        self.next_seed = self.next_seed.wrapping_add(1);
        self.state = GameState::new(seed);
        self.screen = Screen::InGame;
        log::info!("New run with seed: {}", seed);
    }

    /// Advance one frame; returns the simulation events it produced
    pub fn update(
        &mut self,
        input: &dyn InputSource,
        audio: &mut dyn AudioSink,
        store: &mut dyn ScoreStore,
    ) -> Vec<GameEvent> {
        self.frame += 1;

        match self.screen {
            Screen::Title => {
                if !input.pressed(Button::Confirm) {
                    return Vec::new();
                }
                self.start_run();
            }
            Screen::InGame => {
                if self.state.phase == GamePhase::Lost && input.pressed(Button::Confirm) {
                    self.screen = Screen::Title;
                    audio.stop_music();
                    return Vec::new();
                }
                tick(&mut self.state, &tick_input(input));
            }
        }

        let events = self.state.drain_events();
        self.record_round_ends(&events, store);
        self.audio.dispatch(&events, audio);
        events
    }

    fn record_round_ends(&mut self, events: &[GameEvent], store: &mut dyn ScoreStore) {
        for event in events {
            let (GameEvent::RoundWon { score, .. } | GameEvent::RoundLost { score, .. }) = event else {
                continue;
            };
            match self.best.record(store, *score) {
                Ok(true) => log::info!("New best score: {}", score),
                Ok(false) => {}
                Err(e) => log::warn!("Failed to save best score: {}", e),
            }
        }
    }

    /// Draw the current screen
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        match self.screen {
            Screen::Title => self.renderer.render_title(self.best.value, self.frame, canvas),
            Screen::InGame => self.renderer.render_game(&self.state, canvas),
        }
    }
}

/// Map polled buttons to simulation input
pub fn tick_input(input: &dyn InputSource) -> TickInput {
    TickInput {
        left: input.held(Button::Left),
        right: input.held(Button::Right),
        up: input.held(Button::Up),
        down: input.held(Button::Down),
        fire_held: input.held(Button::Fire),
        fire_pressed: input.pressed(Button::Fire),
        laser_pressed: input.pressed(Button::Laser),
        confirm: input.pressed(Button::Confirm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MusicTrack;
    use crate::persistence::{FileScoreStore, MemoryScoreStore};
    use crate::platform::{AudioCue, AudioLog, ButtonState, DrawList};

    struct Harness {
        game: Game,
        input: ButtonState,
        audio: AudioLog,
    }

    impl Harness {
        fn new(store: &dyn ScoreStore) -> Self {
            Self {
                game: Game::new(Settings::default(), store, 77),
                input: ButtonState::new(),
                audio: AudioLog::default(),
            }
        }

        fn frame(&mut self, down: &[Button], store: &mut dyn ScoreStore) -> Vec<GameEvent> {
            self.input.update(down);
            self.game.update(&self.input, &mut self.audio, store)
        }

        /// Press and release confirm
        fn confirm(&mut self, store: &mut dyn ScoreStore) {
            self.frame(&[Button::Confirm], store);
            self.frame(&[], store);
        }
    }

    #[test]
    fn test_title_waits_for_confirm() {
        let mut store = MemoryScoreStore::default();
        let mut h = Harness::new(&store);
        h.frame(&[Button::Fire], &mut store);
        assert_eq!(h.game.screen(), Screen::Title);

        h.frame(&[Button::Confirm], &mut store);
        assert_eq!(h.game.screen(), Screen::InGame);
        assert_eq!(h.game.state().stage, 0);
        assert!(h.audio.cues.contains(&AudioCue::Music {
            track: MusicTrack::Main,
            looped: true
        }));
    }

    #[test]
    fn test_buttons_map_to_tick_input() {
        let mut input = ButtonState::new();
        input.update(&[Button::Left, Button::Fire]);
        let t = tick_input(&input);
        assert!(t.left && t.fire_held && t.fire_pressed);
        assert!(!t.right && !t.laser_pressed && !t.confirm);

        input.update(&[Button::Fire]);
        let t = tick_input(&input);
        assert!(t.fire_held && !t.fire_pressed);
    }

    #[test]
    fn test_best_score_persisted_after_losing_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        let mut store = FileScoreStore::new(&path);

        let mut h = Harness::new(&store);
        assert_eq!(h.game.best_score(), 0);
        h.confirm(&mut store);

        let state = h.game.state_mut();
        state.score = 250;
        state.shots_left = 0;
        state.balls.clear();
        let events = h.frame(&[], &mut store);

        assert!(events.contains(&GameEvent::RoundLost { stage: 0, score: 250 }));
        assert_eq!(h.game.best_score(), 250);
        assert_eq!(FileScoreStore::new(&path).load_best_score(), 250);
    }

    #[test]
    fn test_lost_confirm_returns_to_title() {
        let mut store = MemoryScoreStore::default();
        let mut h = Harness::new(&store);
        h.confirm(&mut store);

        let state = h.game.state_mut();
        state.score = 120;
        state.shots_left = 0;
        h.frame(&[], &mut store);
        assert_eq!(h.game.state().phase, GamePhase::Lost);

        h.confirm(&mut store);
        assert_eq!(h.game.screen(), Screen::Title);

        let mut canvas = DrawList::default();
        h.game.draw(&mut canvas);
        assert!(canvas.contains_text("HIGH SCORE: 120"));

        // Fresh run from the title
        h.confirm(&mut store);
        assert_eq!(h.game.screen(), Screen::InGame);
        assert_eq!(h.game.state().score, 0);
        assert_eq!(h.game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_won_confirm_advances_stage() {
        let mut store = MemoryScoreStore::default();
        let mut h = Harness::new(&store);
        h.confirm(&mut store);

        for block in &mut h.game.state_mut().blocks {
            block.active = false;
        }
        h.frame(&[], &mut store);
        assert_eq!(h.game.state().phase, GamePhase::Won);

        h.confirm(&mut store);
        assert_eq!(h.game.screen(), Screen::InGame);
        assert_eq!(h.game.state().stage, 1);
        assert_eq!(h.game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_failed_persist_keeps_playing() {
        let mut store = MemoryScoreStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut h = Harness::new(&store);
        h.confirm(&mut store);

        let state = h.game.state_mut();
        state.score = 900;
        state.shots_left = 0;
        h.frame(&[], &mut store);

        assert_eq!(h.game.best_score(), 900);
        assert_eq!(store.best, None);
    }

    #[test]
    fn test_fixed_seed_setting_repeats_layout() {
        let store = MemoryScoreStore::default();
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let mut a = Game::new(settings.clone(), &store, 1);
        let mut b = Game::new(settings, &store, 2);
        let mut input = ButtonState::new();
        input.update(&[Button::Confirm]);
        let mut sink = AudioLog::default();
        let mut store = MemoryScoreStore::default();
        a.update(&input, &mut sink, &mut store);
        b.update(&input, &mut sink, &mut store);

        let pa: Vec<_> = a.state().blocks.iter().map(|b| b.pos).collect();
        let pb: Vec<_> = b.state().blocks.iter().map(|b| b.pos).collect();
        assert_eq!(pa, pb);
    }
}
