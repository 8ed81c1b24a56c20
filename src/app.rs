use std::time::Instant;

use crate::session::{Controller, Mode, SecondTimer, Step, Summary};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;
use crate::words::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Playing,
    Summary,
}

/// Screen routing around the session controller. Every input reaches the
/// controller through here, one event at a time.
pub struct App {
    pub screen: AppScreen,
    pub menu: Menu,
    pub theme: Theme,
    pub controller: Controller,
    pub summary: Option<Summary>,
    pub summary_scroll: u16,
    pub timer: SecondTimer,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let menu = Menu::new(controller.words());
        Self {
            screen: AppScreen::Menu,
            menu,
            theme: Theme::default(),
            controller,
            summary: None,
            summary_scroll: 0,
            timer: SecondTimer::default(),
            should_quit: false,
        }
    }

    pub fn start(&mut self, category: Category, mode: Mode, now: Instant) {
        self.menu.select(&category);
        self.menu.mode = mode;
        self.summary = None;
        self.summary_scroll = 0;
        self.screen = AppScreen::Playing;
        let step = self
            .controller
            .start_session(category, mode.is_timed(), mode.is_hard());
        self.follow(step, now);
    }

    pub fn start_selected(&mut self, now: Instant) {
        let category = self.menu.selected_category().clone();
        let mode = self.menu.mode;
        self.start(category, mode, now);
    }

    pub fn type_char(&mut self, ch: char) {
        self.controller.type_char(ch);
    }

    pub fn backspace(&mut self) {
        self.controller.backspace();
    }

    pub fn submit(&mut self, now: Instant) {
        if !self.controller.is_playing() {
            return;
        }
        let step = self.controller.submit_input();
        self.follow(step, now);
    }

    pub fn request_narration(&mut self) {
        self.controller.request_narration();
    }

    /// Feed the countdown from the event loop's periodic tick.
    pub fn on_tick(&mut self, now: Instant) {
        while self.screen == AppScreen::Playing && self.timer.poll(now) {
            let step = self.controller.tick();
            self.follow(step, now);
        }
    }

    pub fn play_again(&mut self, now: Instant) {
        if let Some(step) = self.controller.play_again() {
            self.summary = None;
            self.summary_scroll = 0;
            self.screen = AppScreen::Playing;
            self.follow(step, now);
        }
    }

    pub fn go_to_menu(&mut self) {
        if self.screen == AppScreen::Playing {
            self.controller.abandon();
        }
        self.timer.disarm();
        self.screen = AppScreen::Menu;
    }

    pub fn scroll_summary(&mut self, down: bool) {
        self.summary_scroll = if down {
            self.summary_scroll.saturating_add(1)
        } else {
            self.summary_scroll.saturating_sub(1)
        };
    }

    fn follow(&mut self, step: Step, now: Instant) {
        match step {
            Step::NextWord(_) => {
                let timed = self
                    .controller
                    .session()
                    .is_some_and(|s| s.mode().is_timed());
                if timed {
                    self.timer.arm(now);
                }
            }
            Step::Finished => {
                self.timer.disarm();
                self.summary = self.controller.end_session();
                self.summary_scroll = 0;
                self.screen = AppScreen::Summary;
            }
            Step::Retry | Step::Countdown(_) | Step::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::speech::{SilentNarrator, Voice};
    use crate::store::NullStore;
    use crate::words::{WordList, WordSource};

    fn app() -> App {
        let words = WordSource::with_seed(
            vec![
                WordList::new("week1", "Week 1", &["cat", "dog", "hat"]),
                WordList::new("week2", "Week 2", &["school", "friend"]),
            ],
            Some(2),
        )
        .unwrap();
        let controller = Controller::new(
            words,
            Box::new(SilentNarrator),
            Box::new(NullStore),
            Voice::default(),
            SmallRng::seed_from_u64(4),
        );
        App::new(controller)
    }

    fn type_word(app: &mut App, word: &str) {
        for ch in word.chars() {
            app.type_char(ch);
        }
    }

    fn current_word(app: &App) -> String {
        app.controller.session().unwrap().current_word().to_string()
    }

    #[test]
    fn starts_on_menu() {
        let app = app();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.menu.selected_category().is_all());
    }

    #[test]
    fn full_round_reaches_summary() {
        let mut app = app();
        let now = Instant::now();
        app.start(Category::new("week2"), Mode::Untimed, now);
        assert_eq!(app.screen, AppScreen::Playing);
        assert!(!app.timer.is_armed());

        for _ in 0..2 {
            let word = current_word(&app);
            type_word(&mut app, &word);
            app.submit(now);
        }
        assert_eq!(app.screen, AppScreen::Summary);
        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.history.len(), 2);
    }

    #[test]
    fn countdown_runs_only_in_timed_mode() {
        let mut app = app();
        let start = Instant::now();
        app.start(Category::new("week1"), Mode::Hard, start);
        assert!(app.timer.is_armed());

        app.on_tick(start + Duration::from_millis(2500));
        assert_eq!(app.controller.session().unwrap().time_left(), 3);

        app.on_tick(start + Duration::from_millis(5000));
        let session = app.controller.session().unwrap();
        assert_eq!(session.lives(), 3);
        assert_eq!(session.time_left(), 5);
        assert_eq!(session.used_words().len(), 2);
    }

    #[test]
    fn timeouts_end_game_on_summary() {
        let mut app = app();
        let start = Instant::now();
        app.start(Category::new("week1"), Mode::Hard, start);

        for second in 1..=20 {
            app.on_tick(start + Duration::from_secs(second));
        }
        assert_eq!(app.screen, AppScreen::Summary);
        assert!(!app.timer.is_armed());
        let summary = app.summary.as_ref().unwrap();
        assert!(summary.history.is_empty());
    }

    #[test]
    fn timeouts_through_the_whole_list_show_summary() {
        let mut app = app();
        let start = Instant::now();
        app.start(Category::new("week2"), Mode::Hard, start);

        for second in 1..=10 {
            app.on_tick(start + Duration::from_secs(second));
        }
        assert_eq!(app.screen, AppScreen::Summary);
        assert!(!app.timer.is_armed());
        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.lives, 2);
        assert!(summary.history.is_empty());
    }

    #[test]
    fn escape_from_play_drops_session() {
        let mut app = app();
        app.start(Category::new("week1"), Mode::Timed, Instant::now());
        app.go_to_menu();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.controller.session().is_none());
        assert!(!app.timer.is_armed());
    }

    #[test]
    fn play_again_restarts_same_settings() {
        let mut app = app();
        let now = Instant::now();
        app.start(Category::new("week2"), Mode::Timed, now);
        for _ in 0..4 {
            app.submit(now);
        }
        assert_eq!(app.screen, AppScreen::Summary);

        app.play_again(now);
        assert_eq!(app.screen, AppScreen::Playing);
        let session = app.controller.session().unwrap();
        assert_eq!(session.category(), &Category::new("week2"));
        assert_eq!(session.mode(), Mode::Timed);
        assert_eq!(session.lives(), 4);
        assert!(app.summary.is_none());
        assert!(app.timer.is_armed());
    }

    #[test]
    fn start_selected_uses_menu_choice() {
        let mut app = app();
        app.menu.next();
        app.menu.next_mode();
        app.start_selected(Instant::now());
        let session = app.controller.session().unwrap();
        assert_eq!(session.category(), &Category::new("week2"));
        assert_eq!(session.mode(), Mode::Timed);
    }
}
