use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::session::input;
use crate::session::record::Summary;
use crate::session::state::{Mode, Session, Step};
use crate::speech::{Narrator, Voice};
use crate::store::ScoreStore;
use crate::words::{Category, WordSource};

/// Owns the current session and the high score, and runs the side effects
/// (narration, saving) that session transitions ask for.
pub struct Controller {
    words: WordSource,
    narrator: Box<dyn Narrator>,
    store: Box<dyn ScoreStore>,
    voice: Voice,
    rng: SmallRng,
    session: Option<Session>,
    high_score: u32,
}

impl Controller {
    pub fn new(
        words: WordSource,
        narrator: Box<dyn Narrator>,
        store: Box<dyn ScoreStore>,
        voice: Voice,
        rng: SmallRng,
    ) -> Self {
        let high_score = store.load_high_score();
        Self {
            words,
            narrator,
            store,
            voice,
            rng,
            session: None,
            high_score,
        }
    }

    pub fn words(&self) -> &WordSource {
        &self.words
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_playing)
    }

    /// Replace any previous session with a fresh one and present its first word.
    pub fn start_session(&mut self, category: Category, timed: bool, hard: bool) -> Step {
        let mode = Mode::from_flags(timed, hard);
        info!(category = %category, mode = mode.label(), "session started");

        let words = self.words.words_for(&category);
        let (session, step) = Session::start(category, mode, words, &mut self.rng);
        self.session = Some(session);
        self.follow(step)
    }

    /// Same category and mode as the last session, new word order.
    pub fn play_again(&mut self) -> Option<Step> {
        let session = self.session.as_ref()?;
        let category = session.category().clone();
        let mode = session.mode();
        Some(self.start_session(category, mode.is_timed(), mode.is_hard()))
    }

    /// Move on to a fresh word without scoring the current one.
    ///
    /// Panics without a session or once the session has finished.
    pub fn select_next_word(&mut self) -> Step {
        let Some(session) = self.session.as_mut() else {
            panic!("select_next_word called without a session");
        };
        let words = self.words.words_for(session.category());
        let step = session.select_next_word(words, &mut self.rng);
        self.follow(step)
    }

    pub fn submit_attempt(&mut self, attempt: &str) -> Step {
        let Some(session) = self.session.as_mut() else {
            panic!("submit_attempt called without a session");
        };
        let words = self.words.words_for(session.category());
        let step = session.submit(attempt, words, &mut self.rng);
        let score = session.score();
        debug!(?step, score, lives = session.lives(), "attempt checked");

        self.record_score(score);
        self.follow(step)
    }

    /// Submit whatever is in the answer buffer.
    pub fn submit_input(&mut self) -> Step {
        let attempt = match self.session.as_ref() {
            Some(session) => session.input().to_string(),
            None => panic!("submit_input called without a session"),
        };
        self.submit_attempt(&attempt)
    }

    pub fn tick(&mut self) -> Step {
        let Some(session) = self.session.as_mut() else {
            panic!("tick called without a session");
        };
        let words = self.words.words_for(session.category());
        let step = session.tick(words, &mut self.rng);
        if matches!(step, Step::NextWord(_) | Step::Finished) {
            debug!(lives = session.lives(), "word timed out");
        }
        self.follow(step)
    }

    /// Finish the session (if still running) and hand back what the summary
    /// screen needs. `None` when no session was ever started.
    pub fn end_session(&mut self) -> Option<Summary> {
        let session = self.session.as_mut()?;
        if session.is_playing() {
            session.finish();
            self.narrator.cancel();
            info!(score = session.score(), "session ended");
        }
        Some(session.summary())
    }

    /// Leave mid-game without a summary.
    pub fn abandon(&mut self) {
        if self.session.take().is_some() {
            self.narrator.cancel();
            info!("session abandoned");
        }
    }

    /// Say the current word again.
    pub fn request_narration(&mut self) {
        let word = match self.session.as_ref() {
            Some(session) if session.is_playing() && !session.current_word().is_empty() => {
                session.current_word().to_string()
            }
            _ => return,
        };
        self.narrate(&word);
    }

    pub fn type_char(&mut self, ch: char) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| input::process_char(session, ch))
    }

    pub fn backspace(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(input::process_backspace)
    }

    fn follow(&mut self, step: Step) -> Step {
        match &step {
            Step::NextWord(word) => {
                debug!(word = %word, "next word");
                let word = word.clone();
                self.narrate(&word);
            }
            Step::Finished => {
                self.narrator.cancel();
                if let Some(session) = self.session.as_ref() {
                    info!(
                        score = session.score(),
                        words = session.history().len(),
                        "session finished"
                    );
                }
            }
            Step::Retry | Step::Countdown(_) | Step::Ignored => {}
        }
        step
    }

    fn narrate(&mut self, word: &str) {
        self.narrator.cancel();
        if let Err(err) = self.narrator.speak(&self.voice.utterance(word)) {
            warn!(error = %err, "narration failed");
        }
    }

    fn record_score(&mut self, score: u32) {
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        info!(high_score = score, "new high score");
        if let Err(err) = self.store.save_high_score(score) {
            warn!(error = %err, "could not save high score");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use anyhow::{Result, bail};
    use rand::SeedableRng;

    use super::*;
    use crate::speech::{SpeechError, Utterance};
    use crate::words::WordList;

    #[derive(Clone, Default)]
    struct RecordingNarrator {
        spoken: Rc<RefCell<Vec<String>>>,
        cancels: Rc<Cell<usize>>,
    }

    impl Narrator for RecordingNarrator {
        fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
            self.spoken.borrow_mut().push(utterance.text.clone());
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels.set(self.cancels.get() + 1);
        }
    }

    struct BrokenNarrator;

    impl Narrator for BrokenNarrator {
        fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
            Err(SpeechError::Backend(tts::Error::OperationFailed))
        }

        fn cancel(&mut self) {}
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        score: Rc<Cell<u32>>,
        saves: Rc<Cell<usize>>,
    }

    impl ScoreStore for MemoryStore {
        fn load_high_score(&self) -> u32 {
            self.score.get()
        }

        fn save_high_score(&self, score: u32) -> Result<()> {
            self.score.set(score);
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn load_high_score(&self) -> u32 {
            0
        }

        fn save_high_score(&self, _score: u32) -> Result<()> {
            bail!("disk full")
        }
    }

    fn word_source() -> WordSource {
        WordSource::with_seed(
            vec![
                WordList::new("week1", "Week 1", &["cat", "dog", "hat"]),
                WordList::new("week2", "Week 2", &["school", "friend"]),
            ],
            Some(5),
        )
        .unwrap()
    }

    fn controller_with(narrator: RecordingNarrator, store: MemoryStore) -> Controller {
        Controller::new(
            word_source(),
            Box::new(narrator),
            Box::new(store),
            Voice::default(),
            SmallRng::seed_from_u64(99),
        )
    }

    fn current_word(controller: &Controller) -> String {
        controller.session().unwrap().current_word().to_string()
    }

    #[test]
    fn start_narrates_first_word() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(narrator.clone(), MemoryStore::default());

        let step = controller.start_session(Category::new("week1"), false, false);
        let word = current_word(&controller);
        assert_eq!(step, Step::NextWord(word.clone()));
        assert_eq!(*narrator.spoken.borrow(), vec![word]);
        assert!(controller.is_playing());
    }

    #[test]
    fn replay_cancels_before_speaking() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(narrator.clone(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        let cancels_before = narrator.cancels.get();

        controller.request_narration();
        assert_eq!(narrator.spoken.borrow().len(), 2);
        assert_eq!(narrator.cancels.get(), cancels_before + 1);
    }

    #[test]
    fn high_score_is_saved_when_beaten() {
        let store = MemoryStore::default();
        store.score.set(1);
        let mut controller = controller_with(RecordingNarrator::default(), store.clone());
        assert_eq!(controller.high_score(), 1);

        controller.start_session(Category::new("week1"), false, false);
        let word = current_word(&controller);
        controller.submit_attempt(&word);
        assert_eq!(controller.high_score(), 1);
        assert_eq!(store.saves.get(), 0);

        let word = current_word(&controller);
        controller.submit_attempt(&word);
        assert_eq!(controller.high_score(), 2);
        assert_eq!(store.score.get(), 2);
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn failing_store_does_not_stop_play() {
        let mut controller = Controller::new(
            word_source(),
            Box::new(RecordingNarrator::default()),
            Box::new(FailingStore),
            Voice::default(),
            SmallRng::seed_from_u64(1),
        );
        controller.start_session(Category::new("week1"), false, false);
        let word = current_word(&controller);
        assert!(matches!(controller.submit_attempt(&word), Step::NextWord(_)));
        assert_eq!(controller.high_score(), 1);
    }

    #[test]
    fn broken_speech_does_not_stop_play() {
        let mut controller = Controller::new(
            word_source(),
            Box::new(BrokenNarrator),
            Box::new(MemoryStore::default()),
            Voice::default(),
            SmallRng::seed_from_u64(1),
        );
        controller.start_session(Category::new("week2"), false, false);
        controller.request_narration();
        let word = current_word(&controller);
        assert!(matches!(controller.submit_attempt(&word), Step::NextWord(_)));
    }

    #[test]
    fn typed_input_is_submitted() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        let word = current_word(&controller);
        for ch in word.chars() {
            assert!(controller.type_char(ch));
        }
        assert!(!controller.type_char('z'));

        assert!(matches!(controller.submit_input(), Step::NextWord(_)));
        assert_eq!(controller.session().unwrap().score(), 1);
    }

    #[test]
    fn backspace_then_submit_wrong() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        controller.type_char('q');
        assert!(controller.backspace());
        assert_eq!(controller.submit_input(), Step::Retry);
        let session = controller.session().unwrap();
        assert_eq!(session.word_attempts(), [""]);
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn end_session_is_idempotent() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        assert!(controller.end_session().is_none());

        controller.start_session(Category::new("week1"), true, false);
        let first = controller.end_session().unwrap();
        let second = controller.end_session().unwrap();
        assert_eq!(first.finished_at, second.finished_at);
        assert_eq!(first.category, Category::new("week1"));
        assert_eq!(first.mode, Mode::Timed);
        assert!(!controller.is_playing());
    }

    #[test]
    fn play_again_keeps_settings() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        assert!(controller.play_again().is_none());

        controller.start_session(Category::new("week2"), true, true);
        let word = current_word(&controller);
        controller.submit_attempt(&word);
        controller.end_session();

        let step = controller.play_again().unwrap();
        assert!(matches!(step, Step::NextWord(_)));
        let session = controller.session().unwrap();
        assert_eq!(session.category(), &Category::new("week2"));
        assert_eq!(session.mode(), Mode::Hard);
        assert_eq!(session.score(), 0);
        assert_eq!(session.used_words().len(), 1);
        assert!(session.history().is_empty());
    }

    #[test]
    fn abandon_drops_session_and_silences() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(narrator.clone(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        let cancels_before = narrator.cancels.get();

        controller.abandon();
        assert!(controller.session().is_none());
        assert_eq!(narrator.cancels.get(), cancels_before + 1);
        controller.request_narration();
        assert_eq!(narrator.spoken.borrow().len(), 1);
    }

    #[test]
    fn finishing_stops_narration() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(narrator.clone(), MemoryStore::default());
        controller.start_session(Category::new("week2"), false, false);
        for _ in 0..2 {
            let word = current_word(&controller);
            controller.submit_attempt(&word);
        }
        assert!(!controller.is_playing());
        assert_eq!(narrator.spoken.borrow().len(), 2);
        let cancels = narrator.cancels.get();
        controller.request_narration();
        assert_eq!(narrator.cancels.get(), cancels);
    }

    #[test]
    fn skipping_resets_the_word_state() {
        let narrator = RecordingNarrator::default();
        let mut controller = controller_with(narrator.clone(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        let first = current_word(&controller);
        controller.submit_attempt("zz");
        controller.type_char('q');
        let cancels_before = narrator.cancels.get();

        let step = controller.select_next_word();
        let Step::NextWord(next) = step else {
            panic!("expected a new word, got {step:?}");
        };
        assert_ne!(next, first);

        let session = controller.session().unwrap();
        assert_eq!(session.used_words(), [first, next.clone()]);
        assert_eq!(session.failed_attempts(), 0);
        assert!(session.word_attempts().is_empty());
        assert_eq!(session.input(), "");
        assert_eq!(session.lives(), 3);
        assert_eq!(narrator.spoken.borrow().last(), Some(&next));
        assert_eq!(narrator.cancels.get(), cancels_before + 1);
    }

    #[test]
    #[should_panic(expected = "finished session")]
    fn skipping_after_the_end_panics() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        controller.start_session(Category::new("week1"), false, false);
        controller.end_session();
        controller.select_next_word();
    }

    #[test]
    #[should_panic(expected = "without a session")]
    fn submit_without_session_panics() {
        let mut controller = controller_with(RecordingNarrator::default(), MemoryStore::default());
        controller.submit_attempt("cat");
    }
}
