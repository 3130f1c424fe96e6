use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::from_str;

static CORPUS_DIR: Dir = include_dir!("src/corpus");

/// Word-count choices offered by the selector, smallest to largest.
pub const WORD_COUNT_OPTIONS: [usize; 5] = [10, 25, 50, 100, 200];

/// The fixed sample text every session draws from.
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub text: String,
}

impl Corpus {
    pub fn load() -> Self {
        let file = CORPUS_DIR
            .get_file("classic.json")
            .expect("Corpus file not found");

        let file_as_str = file
            .contents_utf8()
            .expect("Unable to interpret corpus file as a string");

        from_str(file_as_str).expect("Unable to deserialize corpus json")
    }

    /// Corpus tokens in order. The text is single-space separated, so a
    /// plain split is exact.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }

    pub fn total_words(&self) -> usize {
        self.words().count()
    }

    /// First `word_count` tokens rejoined with single spaces. Asking for
    /// more words than the corpus holds yields the whole corpus.
    pub fn target_text(&self, word_count: usize) -> String {
        self.words().take(word_count).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_loads() {
        let corpus = Corpus::load();

        assert_eq!(corpus.name, "classic");
        assert!(!corpus.text.is_empty());
        assert!(corpus.total_words() > 0);
    }

    #[test]
    fn test_corpus_tokens_nonempty() {
        let corpus = Corpus::load();

        assert!(corpus.words().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_target_text_token_counts() {
        let corpus = Corpus::load();
        let total = corpus.total_words();

        for word_count in WORD_COUNT_OPTIONS {
            let target = corpus.target_text(word_count);
            let expected = word_count.min(total);
            assert_eq!(target.split(' ').count(), expected);
        }
    }

    #[test]
    fn test_target_text_is_corpus_prefix() {
        let corpus = Corpus::load();

        for word_count in WORD_COUNT_OPTIONS {
            let target = corpus.target_text(word_count);
            assert!(corpus.text.starts_with(&target));
        }
    }

    #[test]
    fn test_oversized_request_yields_whole_corpus() {
        let corpus = Corpus::load();

        // The corpus holds fewer than 200 tokens, so the largest option
        // falls back to the full text.
        assert!(corpus.total_words() < 200);
        assert_eq!(corpus.target_text(200), corpus.text);
        assert_eq!(corpus.target_text(usize::MAX), corpus.text);
    }

    #[test]
    fn test_word_count_options_are_sorted_and_distinct() {
        for pair in WORD_COUNT_OPTIONS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
