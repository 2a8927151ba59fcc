use std::sync::LazyLock;

use anyhow::anyhow;
use regex::{Matches, Regex};

use crate::mr::{KeyValue, MRApp};

// Runs of ASCII word characters; same words as splitting on ASCII \W+ with
// the empty edge tokens dropped. Non-ASCII letters separate words.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u:\w)+").expect("word pattern compiles"));

/// Sliding three-word windows over one line, joined with single spaces.
pub struct Trigrams<'a> {
    words: Matches<'static, 'a>,
    first: Option<&'a str>,
    second: Option<&'a str>,
}

pub fn trigrams(line: &str) -> Trigrams<'_> {
    Trigrams {
        words: WORD.find_iter(line.trim()),
        first: None,
        second: None,
    }
}

impl<'a> Iterator for Trigrams<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let word = self.words.next()?.as_str();
            match (self.first, self.second) {
                (Some(first), Some(second)) => {
                    self.first = Some(second);
                    self.second = Some(word);
                    return Some([first, second, word].join(" "));
                }
                (Some(_), None) => self.second = Some(word),
                (None, _) => self.first = Some(word),
            }
        }
    }
}

pub const JOB_NAME: &str = "TrigramCount";

pub struct TrigramCount;

impl MRApp for TrigramCount {
    type Value = u64;

    fn map<'a>(&'a self, line: &'a str) -> Result<Box<dyn Iterator<Item = KeyValue<u64>> + 'a>, anyhow::Error> {
        Ok(Box::new(trigrams(line).map(|key| KeyValue { key, value: 1 })))
    }

    fn reduce(&self, key: &str, acc: &mut u64, value: u64) -> Result<(), anyhow::Error> {
        *acc = acc
            .checked_add(value)
            .ok_or_else(|| anyhow!("count overflow for trigram {:?}", key))?;
        Ok(())
    }
}
