use crate::config::Config;
use crate::corpus::{Corpus, WORD_COUNT_OPTIONS};
use crate::session::Session;
use crate::theme::ThemeMode;

/// Application state: the current session plus the two user preferences.
///
/// Reconfiguration (word count, new test) is refused while a session is
/// active; the theme toggle is always available.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub theme: ThemeMode,
    pub word_count: usize,
    corpus: Corpus,
}

impl App {
    pub fn new(word_count: usize, theme: ThemeMode) -> Self {
        let corpus = Corpus::load();
        let session = Session::new(corpus.target_text(word_count), word_count);
        Self {
            session,
            theme,
            word_count,
            corpus,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.number_of_words,
            ThemeMode::from_dark_flag(config.dark_mode),
        )
    }

    pub fn to_config(&self) -> Config {
        Config {
            number_of_words: self.word_count,
            dark_mode: self.theme.is_dark(),
        }
    }

    /// Replace the session with a fresh idle one. Ignored while a session
    /// is active; nothing of the old session survives the swap, including
    /// any tick still in flight.
    pub fn new_test(&mut self) -> bool {
        if self.session.is_active() {
            return false;
        }
        self.session = Session::new(self.corpus.target_text(self.word_count), self.word_count);
        true
    }

    /// Move the word count through the enumerated options, wrapping at the
    /// ends, and start a fresh session on the new size. Ignored while a
    /// session is active.
    pub fn cycle_word_count(&mut self, step: isize) -> bool {
        if self.session.is_active() {
            return false;
        }

        let options = WORD_COUNT_OPTIONS;
        let idx = options
            .iter()
            .position(|&n| n == self.word_count)
            .unwrap_or(0) as isize;
        let next = (idx + step).rem_euclid(options.len() as isize) as usize;

        self.word_count = options[next];
        self.new_test();
        true
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    pub fn write(&mut self, c: char) {
        self.session.write(c);
    }

    pub fn backspace(&mut self) {
        self.session.backspace();
    }

    pub fn on_tick(&mut self) {
        self.session.on_tick();
    }
}
