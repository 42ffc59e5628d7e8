use std::collections::{HashMap, HashSet};

use enumflags2::BitFlags;

use crate::euphony;
use crate::kana::katakana_to_hiragana;
use crate::rules::{DeinflectionRule, RULES};
use crate::word_class::WordClass;

/// Queue entries examined per search; entries appended beyond the bound are
/// simply never expanded. A resource cap, not an error.
pub(crate) const MAX_CANDIDATES: usize = 100;

// reasons that mark an irrealis stem produced by a transformation which
// cannot take a bare る
const NO_SYNTHESIS_REASONS: [&str; 3] = ["potential or passive", "causative", "causative passive"];

#[derive(Clone, Debug)]
pub(crate) struct CandidateWord {
    pub word: String,
    pub type_: BitFlags<WordClass>,
    /// One entry per derivation that reached this word; each chain lists its
    /// labels innermost transformation first.
    pub reason_chains: Vec<Vec<&'static str>>,
    /// Every label anywhere in the history, for the O(1) loop-prevention
    /// check.
    seen: HashSet<&'static str>,
}

impl CandidateWord {
    pub(crate) fn root(word: &str) -> Self {
        CandidateWord {
            word: word.to_string(),
            type_: WordClass::all() | WordClass::Initial,
            reason_chains: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn first_chain(&self) -> &[&'static str] {
        self.reason_chains.first().map_or(&[], |chain| chain.as_slice())
    }

    fn leading_reason(&self) -> Option<&'static str> {
        self.reason_chains.first().and_then(|chain| chain.first()).copied()
    }

    #[cfg(test)]
    pub(crate) fn derived(
        word: &str,
        type_: impl Into<BitFlags<WordClass>>,
        chain: &[&'static str],
    ) -> Self {
        CandidateWord {
            word: word.to_string(),
            type_: type_.into(),
            reason_chains: vec![chain.to_vec()],
            seen: chain.iter().copied().collect(),
        }
    }
}

/// Bounded breadth-first search over the rewrite rules, starting from the
/// input typed as "could be any final category". The returned list contains
/// every candidate produced, deduplicated by surface word and type; callers
/// filter it down to genuine dictionary forms.
pub(crate) fn search(word: &str) -> Vec<CandidateWord> {
    let mut candidates = vec![CandidateWord::root(word)];
    let mut index: HashMap<String, usize> = HashMap::new();
    index.insert(word.to_string(), 0);

    let mut i = 0;
    while i < candidates.len() && i < MAX_CANDIDATES {
        let current = candidates[i].clone();
        i += 1;

        synthesize_dictionary_form(&current, &mut candidates, &mut index);

        let normalized = katakana_to_hiragana(&current.word);
        let word_len = normalized.chars().count();
        for rule in RULES.iter() {
            let suffix_len = rule.from.chars().count();
            if suffix_len > word_len
                || !normalized.ends_with(rule.from)
                || !current.type_.intersects(rule.from_type)
                || !euphony::is_valid(&normalized, rule)
            {
                continue;
            }
            // a reason never applies twice on one derivation ("negative"
            // cannot be undone twice)
            if rule.reasons.iter().any(|r| current.seen.contains(r)) {
                continue;
            }
            let prefix_end = byte_offset(&current.word, word_len - suffix_len);
            let rewritten = format!("{}{}", &current.word[..prefix_end], rule.to);
            if rewritten.is_empty() {
                continue;
            }
            apply(&current, rule, rewritten, &mut candidates, &mut index);
        }
    }
    if candidates.len() > i {
        tracing::debug!(
            examined = i,
            appended = candidates.len(),
            "candidate cap reached before the queue drained"
        );
    }
    candidates
}

/// A masu, ta/te, or irrealis stem plus る is an ichidan (or 来る) dictionary
/// form; synthesize that child unless the stem provably cannot take it.
fn synthesize_dictionary_form(
    current: &CandidateWord,
    candidates: &mut Vec<CandidateWord>,
    index: &mut HashMap<String, usize>,
) {
    if !current.type_.intersects(WordClass::stems()) {
        return;
    }
    // a bare masu stem is already terminal for an ichidan verb
    if current.reason_chains.len() == 1 && current.reason_chains[0] == ["masu stem"] {
        return;
    }
    if let Some(reason) = current.leading_reason() {
        if NO_SYNTHESIS_REASONS.contains(&reason) {
            return;
        }
    }
    // し is reserved for the irregular する path
    if current.word == "し" && current.type_.contains(WordClass::MasuStem) {
        return;
    }

    let synthesized = format!("{}る", current.word);
    let type_ = WordClass::IchidanVerb | WordClass::KuruVerb;
    if let Some(&at) = index.get(&synthesized) {
        if candidates[at].type_ == type_ {
            return;
        }
    }
    index.insert(synthesized.clone(), candidates.len());
    candidates.push(CandidateWord {
        word: synthesized,
        type_,
        reason_chains: current.reason_chains.clone(),
        seen: current.seen.clone(),
    });
}

fn apply(
    current: &CandidateWord,
    rule: &'static DeinflectionRule,
    rewritten: String,
    candidates: &mut Vec<CandidateWord>,
    index: &mut HashMap<String, usize>,
) {
    if let Some(&at) = index.get(&rewritten) {
        if candidates[at].type_ == rule.to_type {
            // same word, same resulting type: record the new derivation on
            // the existing node instead of growing the queue; the earlier
            // derivation keeps position 0 and stays the emitted chain
            if !rule.reasons.is_empty() {
                candidates[at].reason_chains.push(rule.reasons.to_vec());
                candidates[at].seen.extend(rule.reasons.iter().copied());
            }
            return;
        }
    }

    let mut chains = current.reason_chains.clone();
    let mut seen = current.seen.clone();
    if !rule.reasons.is_empty() {
        seen.extend(rule.reasons.iter().copied());
        match chains.first_mut() {
            Some(first) => {
                if rule.reasons == ["causative"] && first.first() == Some(&"potential or passive") {
                    // e.g. 行かせられる: one combined grammatical step
                    first[0] = "causative passive";
                    seen.insert("causative passive");
                } else {
                    for reason in rule.reasons.iter().rev() {
                        first.insert(0, reason);
                    }
                }
            }
            None => chains.push(rule.reasons.to_vec()),
        }
    }
    index.insert(rewritten.clone(), candidates.len());
    candidates.push(CandidateWord {
        word: rewritten,
        type_: rule.to_type,
        reason_chains: chains,
        seen,
    });
}

fn byte_offset(word: &str, chars: usize) -> usize {
    word.char_indices().nth(chars).map_or(word.len(), |(i, _)| i)
}
