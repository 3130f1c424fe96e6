use std::time::Instant;

/// Per-position verdict for a target character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Input has not reached this position yet.
    Untyped,
    /// Input matches the target at this position.
    Correct,
    /// Input differs from the target at this position.
    Incorrect,
}

/// One attempt at typing the target text, from reset to completion.
///
/// The lifecycle is idle -> active -> complete. Activation happens on the
/// first keystroke, completion when the input covers the whole target.
/// After completion every input mutation and tick is refused; the next
/// attempt is a fresh `Session`.
#[derive(Debug, Clone)]
pub struct Session {
    pub target: String,
    pub input: String,
    pub word_count: usize,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    /// Whole seconds accumulated by the one-second tick while active.
    pub elapsed_secs: u64,
    /// Live percentage of typed characters matching the target, 0-100.
    pub accuracy: u32,
    /// Words per minute, computed once on completion; 0 before that.
    pub wpm: u32,
    target_len: usize,
}

impl Session {
    pub fn new(target: String, word_count: usize) -> Self {
        let target_len = target.chars().count();
        Self {
            target,
            input: String::new(),
            word_count,
            started_at: None,
            finished_at: None,
            elapsed_secs: 0,
            accuracy: 100,
            wpm: 0,
            target_len,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.started_at.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.has_started() && !self.has_finished()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Next position to be typed, also the cursor cell for rendering.
    pub fn cursor_pos(&self) -> usize {
        self.input.chars().count()
    }

    /// Append one typed character. The first keystroke of a session
    /// activates it; the keystroke that covers the target completes it.
    pub fn write(&mut self, c: char) {
        if self.has_finished() {
            return;
        }

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        self.input.push(c);
        self.accuracy = self.recalc_accuracy();

        if self.cursor_pos() >= self.target_len {
            self.finish();
        }
    }

    /// Remove the last typed character, if any. Deletions keep the session
    /// active; only covering the target ends it.
    pub fn backspace(&mut self) {
        if self.has_finished() {
            return;
        }

        if self.input.pop().is_some() {
            self.accuracy = self.recalc_accuracy();
        }
    }

    /// Apply one second of elapsed time. Ticks arrive on a fixed cadence
    /// for the life of the process; only an active session counts them.
    pub fn on_tick(&mut self) {
        if self.is_active() {
            self.elapsed_secs += 1;
        }
    }

    /// Verdict for the target character at `idx`.
    pub fn outcome_at(&self, idx: usize) -> Outcome {
        match self.input.chars().nth(idx) {
            None => Outcome::Untyped,
            Some(typed) if self.target.chars().nth(idx) == Some(typed) => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
        }
    }

    /// Every target character paired with its verdict, in order. Single
    /// pass over both strings; this is what the renderer consumes.
    pub fn outcomes(&self) -> impl Iterator<Item = (char, Outcome)> + '_ {
        let mut typed = self.input.chars();
        self.target.chars().map(move |expected| match typed.next() {
            None => (expected, Outcome::Untyped),
            Some(c) if c == expected => (expected, Outcome::Correct),
            Some(_) => (expected, Outcome::Incorrect),
        })
    }

    fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
        self.wpm = self.calc_wpm();
    }

    fn recalc_accuracy(&self) -> u32 {
        let typed = self.cursor_pos();
        if typed == 0 {
            // No keystrokes, no mistakes.
            return 100;
        }

        let correct = self
            .input
            .chars()
            .zip(self.target.chars())
            .filter(|(typed, expected)| typed == expected)
            .count();

        ((correct as f64 / typed as f64) * 100.0).round() as u32
    }

    fn calc_wpm(&self) -> u32 {
        let words_typed = self.input.trim().split_whitespace().count();
        // Completing inside the first second would divide by zero; clamp
        // the elapsed time to one second.
        let secs = self.elapsed_secs.max(1);
        ((words_typed as f64 * 60.0) / secs as f64).round() as u32
    }
}
