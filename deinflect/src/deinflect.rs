use std::collections::HashMap;

use enumflags2::BitFlags;

use crate::classify::{collect_results, DeinflectionResult};
use crate::kana::katakana_to_hiragana;
use crate::rules::{rules_for, rules_grouped_by_reason, DeinflectionRule, RULES};
use crate::search::search;
use crate::word_class::WordClass;

/// Romaji handling, delegated: the engine only asks "does this contain
/// romaji?" and "what is it in hiragana?".
pub trait Transliterator: Send + Sync {
    fn contains_romaji(&self, text: &str) -> bool;
    fn to_hiragana(&self, text: &str) -> String;
}

/// Dictionary tag metadata lookup. Threaded through the call signature for
/// the dictionary layer's benefit; the engine itself never queries it.
pub trait TagLoader {
    fn tags_for(&self, base_form: &str) -> Vec<String>;
}

const POLITE_REQUEST: &str = "ください";
const MIN_PREFIX_CHARS: usize = 2;

/// Entry point for deinflection: normalizes the input, peels a polite
/// request suffix, and falls back to progressively shorter prefixes when the
/// full word finds nothing.
///
/// The engine is purely computational and keeps no per-call state, so one
/// instance can serve concurrent callers without locking.
#[derive(Default)]
pub struct Deinflector {
    transliterator: Option<Box<dyn Transliterator>>,
}

impl Deinflector {
    pub fn new() -> Self {
        Deinflector { transliterator: None }
    }

    pub fn with_transliterator(transliterator: Box<dyn Transliterator>) -> Self {
        Deinflector {
            transliterator: Some(transliterator),
        }
    }

    pub fn deinflect(&self, word: &str) -> Vec<DeinflectionResult> {
        self.deinflect_with_tags(word, None)
    }

    pub fn deinflect_with_tags(
        &self,
        word: &str,
        tag_loader: Option<&dyn TagLoader>,
    ) -> Vec<DeinflectionResult> {
        let word = word.trim();
        if word.is_empty() {
            return Vec::new();
        }
        let word = match &self.transliterator {
            Some(t) if t.contains_romaji(word) => t.to_hiragana(word),
            _ => word.to_string(),
        };
        let word = katakana_to_hiragana(&word);

        if let Some(prefix) = word.strip_suffix(POLITE_REQUEST) {
            if !prefix.is_empty() {
                let mut results = self.deinflect_with_tags(prefix, tag_loader);
                if !results.is_empty() {
                    for result in &mut results {
                        result.original_form = word.clone();
                        result.reason_chain.push("polite request form".to_string());
                    }
                    return results;
                }
                tracing::debug!(%word, "nothing behind the polite request suffix");
            }
        }

        deinflect_with_progressive_matching(&word)
    }

    /// The full static rule table.
    pub fn all_rules(&self) -> &'static [DeinflectionRule] {
        &RULES
    }

    /// Rules able to produce a word of the given classes.
    pub fn rules_for_verb_type(
        &self,
        classes: BitFlags<WordClass>,
    ) -> Vec<&'static DeinflectionRule> {
        rules_for(classes)
    }

    /// The rule table keyed by reason label.
    pub fn rules_by_reason(&self) -> HashMap<&'static str, Vec<&'static DeinflectionRule>> {
        rules_grouped_by_reason()
    }
}

fn deinflect_with_progressive_matching(word: &str) -> Vec<DeinflectionResult> {
    let chars: Vec<char> = word.chars().collect();
    let mut len = chars.len();
    loop {
        let prefix: String = chars[..len].iter().collect();
        let candidates = search(&prefix);
        let results = collect_results(&prefix, &candidates);
        if !results.is_empty() {
            return results;
        }
        if len <= MIN_PREFIX_CHARS {
            return Vec::new();
        }
        len -= 1;
        tracing::debug!(%word, len, "retrying on a shorter prefix");
    }
}
