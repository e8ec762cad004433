//! Word ladders.
//!
//! Turn a word into another one by changing one letter at a time, where every
//! intermediate step must be a word from a dictionary.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::puzzle::Puzzle;

const ALPHABET: std::ops::RangeInclusive<u8> = b'a'..=b'z';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordLadderError {
    #[error("Words can't be empty")]
    EmptyWord,
    #[error("Invalid word {0:?}. Only lowercase ASCII letters are allowed")]
    InvalidWord(String),
}

fn validate(word: &str) -> Result<(), WordLadderError> {
    if word.is_empty() {
        return Err(WordLadderError::EmptyWord);
    }
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(WordLadderError::InvalidWord(word.to_string()));
    }
    Ok(())
}

/// Lowercases a dictionary word, rejecting anything but ASCII letters.
fn normalize(word: &str) -> Result<String, WordLadderError> {
    let word = word.to_ascii_lowercase();
    validate(&word)?;
    Ok(word)
}

/// The words a ladder can step on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: FxHashSet<String>,
}

impl Dictionary {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl std::convert::TryFrom<&str> for Dictionary {
    type Error = WordLadderError;

    /// Reads whitespace separated words, ignoring case.
    ///
    /// Fails on the first word that isn't made of ASCII letters.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(normalize)
            .collect::<Result<FxHashSet<String>, _>>()
            .map(|words| Dictionary { words })
    }
}

/// Collects words ignoring case, like [`Dictionary::try_from`], but skips
/// the ones that aren't made of ASCII letters instead of failing.
impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Dictionary {
            words: iter
                .into_iter()
                .filter_map(|w| normalize(w.as_ref()).ok())
                .collect(),
        }
    }
}

/// A word ladder from `from` towards `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordLadderPuzzle {
    from: String,
    to: String,
    dictionary: Rc<Dictionary>,
}

impl WordLadderPuzzle {
    pub fn new(
        from: &str,
        to: &str,
        dictionary: Rc<Dictionary>,
    ) -> Result<Self, WordLadderError> {
        validate(from)?;
        validate(to)?;

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            dictionary,
        })
    }

    /// The current word.
    pub fn word(&self) -> &str {
        &self.from
    }

    fn step(&self, word: String) -> Self {
        Self {
            from: word,
            to: self.to.clone(),
            dictionary: Rc::clone(&self.dictionary),
        }
    }
}

impl Puzzle for WordLadderPuzzle {
    type Fingerprint = String;

    fn is_goal(&self) -> bool {
        self.from == self.to
    }

    /// Moves keep the length of the word.
    fn should_prune(&self) -> bool {
        self.from.len() != self.to.len()
    }

    fn fingerprint(&self) -> String {
        self.from.clone()
    }

    fn expand(&self) -> Vec<Self> {
        let mut word = self.from.clone().into_bytes();
        let mut extensions = Vec::new();

        for i in 0..word.len() {
            let original = word[i];
            for letter in ALPHABET.filter(|&l| l != original) {
                word[i] = letter;
                // Only ASCII letters were swapped in.
                let Ok(candidate) = std::str::from_utf8(&word) else {
                    continue;
                };
                if self.dictionary.contains(candidate) {
                    extensions.push(self.step(candidate.to_string()));
                }
            }
            word[i] = original;
        }

        extensions
    }
}

impl std::fmt::Display for WordLadderPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Rc<Dictionary> {
        Rc::new(Dictionary::from_iter([
            "a", "b", "c", "aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc", "aaa", "aba",
            "abc", "aca", "acb", "acc",
        ]))
    }

    #[test]
    fn expand_in_position_then_letter_order() {
        let puzzle = WordLadderPuzzle::new("aba", "abc", dictionary()).unwrap();
        let words: Vec<String> = puzzle.expand().iter().map(Puzzle::fingerprint).collect();
        assert_eq!(words, vec!["aaa", "aca", "abc"]);
    }

    #[test]
    fn goal_and_prune() {
        let done = WordLadderPuzzle::new("abc", "abc", dictionary()).unwrap();
        assert!(done.is_goal());
        assert!(!done.should_prune());

        let mismatch = WordLadderPuzzle::new("ab", "abc", dictionary()).unwrap();
        assert!(!mismatch.is_goal());
        assert!(mismatch.should_prune());
        assert_eq!(format!("{mismatch}"), "ab -> abc");
    }

    #[test]
    fn invalid_words() {
        assert_eq!(
            WordLadderPuzzle::new("", "a", dictionary()).unwrap_err(),
            WordLadderError::EmptyWord
        );
        assert_eq!(
            WordLadderPuzzle::new("aB", "ab", dictionary()).unwrap_err(),
            WordLadderError::InvalidWord("aB".to_string())
        );
    }

    #[test]
    fn dictionary_from_text() {
        let d = Dictionary::try_from("Cat cot\ncog\n").unwrap();
        assert_eq!(d.len(), 3);
        assert!(d.contains("cat"));
        assert!(Dictionary::try_from("c4t").is_err());
    }

    #[test]
    fn dictionary_from_words() {
        let d = Dictionary::from_iter(["Cat", "cot", "c4t", "", "cog"]);
        assert_eq!(d, Dictionary::try_from("cat cot cog").unwrap());
        assert!(!d.contains("Cat"));
        assert!(!d.contains("c4t"));
    }
}
