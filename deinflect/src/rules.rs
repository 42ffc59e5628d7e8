use std::cmp::Reverse;
use std::collections::HashMap;

use enumflags2::BitFlags;
use lazy_static::lazy_static;

use crate::word_class::WordClass;

// A rule rewrites a trailing suffix of a candidate word into the suffix of a
// form one step closer to the dictionary form:
//   * `from` is the suffix to look for on the candidate
//   * `to` is what the suffix is replaced with (possibly empty)
//   * `from_type` is the set of classes the candidate must intersect for the
//     rule to fire
//   * `to_type` is the set of classes of the rewritten word
//   * `reasons` are the user-facing labels recorded for the step; silent
//     structural rules (stem-row rewrites) carry none
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeinflectionRule {
    pub from: &'static str,
    pub to: &'static str,
    pub from_type: BitFlags<WordClass>,
    pub to_type: BitFlags<WordClass>,
    pub reasons: &'static [&'static str],
}

fn rule(
    from: &'static str,
    to: &'static str,
    from_type: impl Into<BitFlags<WordClass>>,
    to_type: impl Into<BitFlags<WordClass>>,
    reasons: &'static [&'static str],
) -> DeinflectionRule {
    DeinflectionRule {
        from,
        to,
        from_type: from_type.into(),
        to_type: to_type.into(),
        reasons,
    }
}

lazy_static! {
    pub static ref RULES: Vec<DeinflectionRule> = build_rules();
}

/// Rules whose `to_type` intersects the requested classes.
pub fn rules_for(classes: BitFlags<WordClass>) -> Vec<&'static DeinflectionRule> {
    RULES.iter().filter(|r| r.to_type.intersects(classes)).collect()
}

/// The table keyed by reason label, for introspection and tests.
pub fn rules_grouped_by_reason() -> HashMap<&'static str, Vec<&'static DeinflectionRule>> {
    let mut groups: HashMap<&'static str, Vec<&'static DeinflectionRule>> = HashMap::new();
    for rule in RULES.iter() {
        for &reason in rule.reasons {
            groups.entry(reason).or_default().push(rule);
        }
    }
    groups
}

fn build_rules() -> Vec<DeinflectionRule> {
    use WordClass::*;

    // surface forms are either the untouched input or a word synthesized
    // from a stem, which the search types Ichidan | Kuru
    let surface = Initial | IchidanVerb | KuruVerb;
    // adjective suffixes also chain after a recovered い-adjective
    // (高くなかった → 高くない → 高い)
    let adjective = surface | IAdjective;
    let godan: BitFlags<WordClass> = GodanVerb.into();

    let mut rules = vec![
        // polite forms
        rule("ませんでした", "", surface, MasuStem, &["polite past negative"]),
        rule("ましょう", "", surface, MasuStem, &["polite volitional"]),
        rule("ました", "", surface, MasuStem, &["polite past"]),
        rule("ません", "", surface, MasuStem, &["polite negative"]),
        rule("ます", "", surface, MasuStem, &["polite"]),
        // progressive / continuous, with contracted variants and their pasts
        rule("ている", "", surface, TaTeStem, &["continuous"]),
        rule("でいる", "", surface, DaDeStem, &["continuous"]),
        rule("ていた", "", surface, TaTeStem, &["continuous", "past"]),
        rule("でいた", "", surface, DaDeStem, &["continuous", "past"]),
        rule("てる", "", surface, TaTeStem, &["continuous"]),
        rule("でる", "", surface, DaDeStem, &["continuous"]),
        rule("てた", "", surface, TaTeStem, &["continuous", "past"]),
        rule("でた", "", surface, DaDeStem, &["continuous", "past"]),
        // ぐ-row euphonic allomorphs; the で/だ stem rules demand a stem in
        // ん, so these carry their い explicitly
        rule("いでいる", "ぐ", surface, godan, &["continuous"]),
        rule("いでいた", "ぐ", surface, godan, &["continuous", "past"]),
        rule("いでる", "ぐ", surface, godan, &["continuous"]),
        rule("いでた", "ぐ", surface, godan, &["continuous", "past"]),
        rule("いで", "ぐ", surface, godan, &["te-form"]),
        rule("いだ", "ぐ", surface, godan, &["past"]),
        // te-form and past
        rule("て", "", surface, TaTeStem, &["te-form"]),
        rule("で", "", surface, DaDeStem, &["te-form"]),
        rule("た", "", surface, TaTeStem, &["past"]),
        rule("だ", "", surface, DaDeStem, &["past"]),
        // negative
        rule("ない", "", adjective, IrrealisStem, &["negative"]),
        rule("ぬ", "", surface, IrrealisStem, &["negative"]),
        rule("ない", "ある", surface, godan, &["negative"]),
        // い-adjective endings
        rule("かった", "い", adjective, IAdjective, &["past"]),
        rule("くない", "い", adjective, IAdjective, &["negative"]),
        rule("くて", "い", adjective, IAdjective, &["te-form"]),
        rule("ければ", "い", adjective, IAdjective, &["conditional"]),
        rule("く", "い", adjective, IAdjective, &["adverb"]),
        // いい conjugates on the 良い stem
        rule("よかった", "いい", surface, IAdjective, &["past"]),
        rule("よくない", "いい", surface, IAdjective, &["negative"]),
        rule("よくて", "いい", surface, IAdjective, &["te-form"]),
        rule("よければ", "いい", surface, IAdjective, &["conditional"]),
        rule("よく", "いい", surface, IAdjective, &["adverb"]),
        // volitional
        rule("よう", "る", surface, IchidanVerb | KuruVerb, &["volitional"]),
        rule("おう", "う", surface, godan, &["volitional"]),
        rule("こう", "く", surface, godan, &["volitional"]),
        rule("ごう", "ぐ", surface, godan, &["volitional"]),
        rule("そう", "す", surface, godan, &["volitional"]),
        rule("とう", "つ", surface, godan, &["volitional"]),
        rule("のう", "ぬ", surface, godan, &["volitional"]),
        rule("ぼう", "ぶ", surface, godan, &["volitional"]),
        rule("もう", "む", surface, godan, &["volitional"]),
        rule("ろう", "る", surface, godan, &["volitional"]),
        rule("しよう", "する", surface, SuruVerb, &["volitional"]),
        rule("こよう", "くる", surface, KuruVerb, &["volitional"]),
        // passive / potential
        rule("られる", "る", surface, IchidanVerb | KuruVerb, &["potential or passive"]),
        rule("れる", "", surface, IrrealisStem, &["potential or passive"]),
        rule("される", "する", surface, SuruVerb, &["potential or passive"]),
        rule("こられる", "くる", surface, KuruVerb, &["potential or passive"]),
        // causative
        rule("させる", "る", surface, IchidanVerb | KuruVerb, &["causative"]),
        rule("せる", "", surface, IrrealisStem, &["causative"]),
        rule("させる", "する", surface, SuruVerb, &["causative"]),
        rule("こさせる", "くる", surface, KuruVerb, &["causative"]),
        // imperative
        rule("ろ", "る", surface, IchidanVerb | KuruVerb, &["imperative"]),
        rule("よ", "る", surface, IchidanVerb | KuruVerb, &["imperative"]),
        rule("え", "う", surface, godan, &["imperative"]),
        rule("け", "く", surface, godan, &["imperative"]),
        rule("げ", "ぐ", surface, godan, &["imperative"]),
        rule("せ", "す", surface, godan, &["imperative"]),
        rule("て", "つ", surface, godan, &["imperative"]),
        rule("ね", "ぬ", surface, godan, &["imperative"]),
        rule("べ", "ぶ", surface, godan, &["imperative"]),
        rule("め", "む", surface, godan, &["imperative"]),
        rule("れ", "る", surface, godan, &["imperative"]),
        rule("しろ", "する", surface, SuruVerb, &["imperative"]),
        rule("せよ", "する", surface, SuruVerb, &["imperative"]),
        rule("こい", "くる", surface, KuruVerb, &["imperative"]),
        rule("来い", "来る", surface, KuruVerb, &["imperative"]),
        // conditional (ば-form per godan row)
        rule("えば", "う", surface, godan, &["conditional"]),
        rule("けば", "く", surface, godan, &["conditional"]),
        rule("げば", "ぐ", surface, godan, &["conditional"]),
        rule("せば", "す", surface, godan, &["conditional"]),
        rule("てば", "つ", surface, godan, &["conditional"]),
        rule("ねば", "ぬ", surface, godan, &["conditional"]),
        rule("べば", "ぶ", surface, godan, &["conditional"]),
        rule("めば", "む", surface, godan, &["conditional"]),
        rule("れば", "る", surface, godan | IchidanVerb | KuruVerb, &["conditional"]),
        rule("すれば", "する", surface, SuruVerb, &["conditional"]),
        rule("くれば", "くる", surface, KuruVerb, &["conditional"]),
        // the input taken as a bare masu stem (noun form); validated against
        // the word-final character so not every input matches
        rule("", "る", Initial, IchidanVerb | KuruVerb, &["masu stem"]),
        rule("", "", Initial, MasuStem, &["masu stem"]),
        // irregular verbs, declared ahead of the generic stem rules so that
        // their reason history wins the merge when both reach the same word
        rule("し", "する", MasuStem | TaTeStem | IrrealisStem, SuruVerb, &[]),
        rule("き", "くる", MasuStem | TaTeStem, KuruVerb, &[]),
        rule("こ", "くる", IrrealisStem, KuruVerb, &[]),
        rule("来", "来る", MasuStem | TaTeStem | IrrealisStem, KuruVerb, &[]),
        rule("いき", "いく", MasuStem, godan, &[]),
        rule("いっ", "いく", TaTeStem, godan, &[]),
        rule("行き", "行く", MasuStem, godan, &[]),
        rule("行っ", "行く", TaTeStem, godan, &[]),
        rule("あり", "ある", MasuStem, godan, &[]),
        rule("あっ", "ある", TaTeStem, godan, &[]),
        // masu stem, い-row back to the u-row
        rule("い", "う", MasuStem, godan, &[]),
        rule("き", "く", MasuStem, godan, &[]),
        rule("ぎ", "ぐ", MasuStem, godan, &[]),
        rule("し", "す", MasuStem | TaTeStem, godan, &[]),
        rule("ち", "つ", MasuStem, godan, &[]),
        rule("に", "ぬ", MasuStem, godan, &[]),
        rule("び", "ぶ", MasuStem, godan, &[]),
        rule("み", "む", MasuStem, godan, &[]),
        rule("り", "る", MasuStem, godan, &[]),
        // te/ta stems (促音便 and イ音便)
        rule("っ", "う", TaTeStem, godan, &[]),
        rule("っ", "つ", TaTeStem, godan, &[]),
        rule("っ", "る", TaTeStem, godan, &[]),
        rule("い", "く", TaTeStem, godan, &[]),
        // de/da stems (撥音便)
        rule("ん", "ぬ", DaDeStem, godan, &[]),
        rule("ん", "ぶ", DaDeStem, godan, &[]),
        rule("ん", "む", DaDeStem, godan, &[]),
        // irrealis stem, あ-row back to the u-row
        rule("わ", "う", IrrealisStem, godan, &[]),
        rule("か", "く", IrrealisStem, godan, &[]),
        rule("が", "ぐ", IrrealisStem, godan, &[]),
        rule("さ", "す", IrrealisStem, godan, &[]),
        rule("た", "つ", IrrealisStem, godan, &[]),
        rule("な", "ぬ", IrrealisStem, godan, &[]),
        rule("ば", "ぶ", IrrealisStem, godan, &[]),
        rule("ま", "む", IrrealisStem, godan, &[]),
        rule("ら", "る", IrrealisStem, godan, &[]),
    ];

    // descending suffix length; the sort is stable, so irregular rules keep
    // their place ahead of equally-long generic ones
    rules.sort_by_key(|r| Reverse(r.from.chars().count()));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_size() {
        assert!(RULES.len() >= 100, "table has {} rules", RULES.len());
    }

    #[test]
    fn sorted_by_descending_suffix_length() {
        let lengths: Vec<usize> = RULES.iter().map(|r| r.from.chars().count()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by_key(|n| Reverse(*n));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn irregulars_precede_generic_stem_rules() {
        let suru = RULES
            .iter()
            .position(|r| r.from == "し" && r.to == "する")
            .unwrap();
        let generic = RULES
            .iter()
            .position(|r| r.from == "し" && r.to == "す")
            .unwrap();
        assert!(suru < generic);
    }

    #[test]
    fn rules_for_intersects_to_type() {
        let godan = rules_for(WordClass::GodanVerb.into());
        assert!(!godan.is_empty());
        assert!(godan
            .iter()
            .all(|r| r.to_type.contains(WordClass::GodanVerb)));
    }

    #[test]
    fn grouped_by_reason() {
        let groups = rules_grouped_by_reason();
        assert!(groups["polite"].iter().any(|r| r.from == "ます"));
        assert_eq!(groups["conditional"].len(), 13);
        assert!(!groups.contains_key(""));
    }

    #[test]
    fn no_reason_label_is_blank() {
        for rule in RULES.iter() {
            for reason in rule.reasons {
                assert!(!reason.is_empty());
            }
        }
    }
}
