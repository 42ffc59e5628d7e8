use std::collections::HashSet;

use serde::Serialize;

use crate::search::CandidateWord;
use crate::word_class::WordClass;

/// Concrete conjugation class assigned to a deinflection result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum VerbType {
    Ichidan,
    GodanK,
    GodanG,
    GodanS,
    GodanT,
    GodanN,
    GodanB,
    GodanM,
    GodanR,
    GodanU,
    IkuIrregular,
    SuruIrregular,
    KuruIrregular,
    AdjectiveI,
    Unknown,
}

/// One recovered dictionary form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DeinflectionResult {
    pub original_form: String,
    pub base_form: String,
    /// Labels of the reversed transformations, innermost first.
    pub reason_chain: Vec<String>,
    pub verb_type: Option<VerbType>,
}

// Inputs shaped like して+X arise from the rule overlap between する and
// the generic し stem; restrict those to する derivations only.
const SHITE_CONTINUATIONS: [&str; 9] = [
    "いました", "います", "いた", "いる", "ました", "ます", "い", "る", "た",
];

fn is_shite_continuous(original: &str) -> bool {
    original
        .strip_prefix("して")
        .is_some_and(|rest| SHITE_CONTINUATIONS.contains(&rest))
}

/// Filter the candidate graph down to dictionary forms: drop intermediate
/// stems, assign a conjugation class, deduplicate by base form, and apply
/// the する-continuous suppression.
pub(crate) fn collect_results(original: &str, candidates: &[CandidateWord]) -> Vec<DeinflectionResult> {
    let suppress_to_suru = is_shite_continuous(original);
    let mut seen_bases: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();
    for candidate in candidates {
        if !candidate.type_.intersects(WordClass::all()) {
            continue;
        }
        let base = candidate.word.as_str();
        if suppress_to_suru && base != "する" && !base.ends_with("する") {
            continue;
        }
        let verb_type = classify(candidate, original);
        let chain = candidate.first_chain();
        if base == original
            && chain.is_empty()
            && verb_type.is_none()
            && !base.ends_with(['る', 'う', 'い'])
        {
            // dropped without reserving the base form, so a later candidate
            // with an actual derivation can still claim it
            continue;
        }
        if !seen_bases.insert(base) {
            continue;
        }
        results.push(DeinflectionResult {
            original_form: original.to_string(),
            base_form: base.to_string(),
            reason_chain: chain.iter().map(|r| r.to_string()).collect(),
            verb_type,
        });
    }
    results
}

fn classify(candidate: &CandidateWord, original: &str) -> Option<VerbType> {
    let word = candidate.word.as_str();
    if word == original && candidate.reason_chains.is_empty() {
        // no transformation happened, nothing to classify
        return None;
    }
    let type_ = candidate.type_;
    // synthesized forms are typed Ichidan | Kuru; 来る itself outranks the
    // ichidan guess
    if (word == "来る" || word == "くる") && type_.contains(WordClass::KuruVerb) {
        return Some(VerbType::KuruIrregular);
    }
    if type_.contains(WordClass::IchidanVerb) {
        return Some(VerbType::Ichidan);
    }
    if type_.contains(WordClass::GodanVerb) {
        return Some(match word.chars().last() {
            Some('く') if word == "行く" || word == "いく" => VerbType::IkuIrregular,
            Some('く') => VerbType::GodanK,
            Some('ぐ') => VerbType::GodanG,
            Some('す') => VerbType::GodanS,
            Some('つ') => VerbType::GodanT,
            Some('ぬ') => VerbType::GodanN,
            Some('ぶ') => VerbType::GodanB,
            Some('む') => VerbType::GodanM,
            Some('る') => VerbType::GodanR,
            Some('う') => VerbType::GodanU,
            _ => VerbType::Unknown,
        });
    }
    if type_.intersects(WordClass::SuruVerb | WordClass::SpecialSuruVerb) {
        return Some(VerbType::SuruIrregular);
    }
    if type_.contains(WordClass::KuruVerb) {
        return Some(VerbType::KuruIrregular);
    }
    if type_.contains(WordClass::IAdjective) {
        return Some(VerbType::AdjectiveI);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search;

    fn deinflect_raw(word: &str) -> Vec<DeinflectionResult> {
        let candidates = search(word);
        collect_results(word, &candidates)
    }

    #[test]
    fn intermediate_stems_are_dropped() {
        let results = deinflect_raw("飲みました");
        // the bare stem 飲み never appears as a base form
        assert!(results.iter().all(|r| r.base_form != "飲み"));
        let nomu = results.iter().find(|r| r.base_form == "飲む").unwrap();
        assert_eq!(nomu.verb_type, Some(VerbType::GodanM));
    }

    #[test]
    fn dictionary_form_input_passes_through() {
        let results = deinflect_raw("食べる");
        let passthrough = results.iter().find(|r| r.base_form == "食べる").unwrap();
        assert_eq!(passthrough.verb_type, None);
        assert!(passthrough.reason_chain.is_empty());
    }

    #[test]
    fn unmatchable_input_yields_nothing() {
        assert!(deinflect_raw("日本ん").is_empty());
    }

    #[test]
    fn shite_continuous_restricts_to_suru() {
        for input in ["しています", "している", "します", "していました"] {
            let results = deinflect_raw(input);
            if is_shite_continuous(input) {
                assert!(!results.is_empty(), "{input}");
                assert!(
                    results
                        .iter()
                        .all(|r| r.base_form == "する" || r.base_form.ends_with("する")),
                    "{input}: {results:?}"
                );
            }
        }
        assert!(is_shite_continuous("しています"));
        assert!(is_shite_continuous("している"));
        assert!(!is_shite_continuous("します"));
    }

    #[test]
    fn iku_is_special_cased() {
        let results = deinflect_raw("行った");
        let iku = results.iter().find(|r| r.base_form == "行く").unwrap();
        assert_eq!(iku.verb_type, Some(VerbType::IkuIrregular));
    }

    #[test]
    fn dropped_passthrough_does_not_reserve_its_base_form() {
        // the chain-less passthrough for 飲む is dropped; it must not shadow
        // a later candidate that reached the same base through a real
        // derivation
        let candidates = [
            CandidateWord::root("飲む"),
            CandidateWord::derived("飲む", WordClass::GodanVerb, &["past"]),
        ];
        let results = collect_results("飲む", &candidates);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].reason_chain, ["past"]);
        assert_eq!(results[0].verb_type, Some(VerbType::GodanM));
    }

    #[test]
    fn results_deduplicate_by_base_form() {
        let results = deinflect_raw("来なかった");
        let kuru: Vec<_> = results.iter().filter(|r| r.base_form == "来る").collect();
        assert_eq!(kuru.len(), 1);
        assert_eq!(kuru[0].verb_type, Some(VerbType::KuruIrregular));
    }
}
