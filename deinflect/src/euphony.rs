use crate::kana::{is_e_row, is_hiragana, is_i_row, is_kanji};
use crate::rules::DeinflectionRule;

// Japanese sound changes at the verb-stem boundary (音便) decide which
// suffix allomorph can attach: で/だ and their compounds only ever follow a
// stem in ん (撥音便), while て/た and the contracted っ/ん stems never do.
// Textual suffix matching alone cannot tell these apart, so without this
// check the search would accept rewrites like 死んて→死つ.
//
// The two zero-suffix rules reinterpret the whole input as a masu stem; they
// are gated on the word-final character (a stem can only end in an い-row or
// え-row kana, or in kanji) so that unmatchable input stays unmatchable and
// the progressive-truncation fallback of the facade stays reachable.

/// Whether `rule` may phonologically apply to `word` (already
/// hiragana-normalized).
pub(crate) fn is_valid(word: &str, rule: &DeinflectionRule) -> bool {
    if rule.from.is_empty() {
        return bare_stem_is_plausible(word, rule.to == "る");
    }
    let Some(family) = rule.from.chars().next() else {
        return true;
    };
    let stem_ends_in_n = stem_last_char(word, rule) == Some('ん');
    match family {
        'て' | 'た' | 'っ' | 'ん' => !stem_ends_in_n,
        'で' | 'だ' => stem_ends_in_n,
        _ => true,
    }
}

fn stem_last_char(word: &str, rule: &DeinflectionRule) -> Option<char> {
    let word_len = word.chars().count();
    let suffix_len = rule.from.chars().count();
    if word_len <= suffix_len {
        return None;
    }
    word.chars().nth(word_len - suffix_len - 1)
}

fn bare_stem_is_plausible(word: &str, synthesizes_ru: bool) -> bool {
    let Some(last) = word.chars().last() else {
        return false;
    };
    if is_kanji(last) {
        return true;
    }
    if !is_hiragana(last) {
        return false;
    }
    // masu stems end in the い-row; ichidan stems also allow the え-row
    is_i_row(last) || (synthesizes_ru && is_e_row(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RULES;

    fn rule_with(from: &str, to: &str) -> &'static DeinflectionRule {
        RULES
            .iter()
            .find(|r| r.from == from && r.to == to)
            .expect("rule should be in the table")
    }

    #[test]
    fn de_family_needs_moraic_n() {
        let de = rule_with("で", "");
        assert!(is_valid("飲んで", de));
        assert!(!is_valid("泳いで", de));
        let da = rule_with("だ", "");
        assert!(is_valid("死んだ", da));
        assert!(!is_valid("書いだ", da));
    }

    #[test]
    fn te_family_rejects_moraic_n() {
        let te = rule_with("て", "");
        assert!(is_valid("書いて", te));
        assert!(!is_valid("死んて", te));
        let ta = rule_with("た", "");
        assert!(is_valid("買った", ta));
        assert!(!is_valid("飲んた", ta));
    }

    #[test]
    fn other_families_unconstrained() {
        let ide = rule_with("いで", "ぐ");
        assert!(is_valid("泳いで", ide));
        let masu = rule_with("ます", "");
        assert!(is_valid("飲みます", masu));
    }

    // property across the whole table: build a word around each rule's
    // suffix and check both polarities
    #[test]
    fn euphony_property_by_construction() {
        for rule in RULES.iter() {
            let Some(family) = rule.from.chars().next() else {
                continue;
            };
            let after_n = format!("ん{}", rule.from);
            let after_open = format!("か{}", rule.from);
            match family {
                'て' | 'た' | 'っ' | 'ん' => {
                    assert!(!is_valid(&after_n, rule), "{rule:?}");
                    assert!(is_valid(&after_open, rule), "{rule:?}");
                }
                'で' | 'だ' => {
                    assert!(is_valid(&after_n, rule), "{rule:?}");
                    assert!(!is_valid(&after_open, rule), "{rule:?}");
                }
                _ => {
                    assert!(is_valid(&after_n, rule), "{rule:?}");
                    assert!(is_valid(&after_open, rule), "{rule:?}");
                }
            }
        }
    }

    #[test]
    fn bare_stem_gate() {
        let noun = rule_with("", "");
        let ichidan = rule_with("", "る");
        assert!(is_valid("のみ", noun));
        assert!(is_valid("たべ", ichidan));
        assert!(!is_valid("たべ", noun)); // え-row is not a masu stem
        assert!(is_valid("見", ichidan)); // kanji stems stay plausible
        assert!(!is_valid("たべた。", ichidan));
        assert!(!is_valid("らーめん", ichidan));
        assert!(!is_valid("", ichidan));
    }
}
