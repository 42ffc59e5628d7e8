/// Map katakana to the corresponding hiragana, leaving everything else
/// (kanji, romaji, punctuation, the prolonged sound mark) untouched.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

// い-row and え-row kana are the only hiragana that can legitimately end a
// verb stem (masu stem and ichidan stem respectively)
pub(crate) fn is_i_row(c: char) -> bool {
    matches!(
        c,
        'い' | 'き' | 'ぎ' | 'し' | 'じ' | 'ち' | 'ぢ' | 'に' | 'ひ' | 'び' | 'ぴ' | 'み' | 'り'
    )
}

pub(crate) fn is_e_row(c: char) -> bool {
    matches!(
        c,
        'え' | 'け' | 'げ' | 'せ' | 'ぜ' | 'て' | 'で' | 'ね' | 'へ' | 'べ' | 'ぺ' | 'め' | 'れ'
    )
}

pub(crate) fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309f}').contains(&c)
}

pub(crate) fn is_kanji(c: char) -> bool {
    c == '々' // IDEOGRAPHIC ITERATION MARK (U+3005)
        || ('\u{3400}'..='\u{4dbf}').contains(&c) // CJK Unified Ideographs Extension A
        || ('\u{4e00}'..='\u{9fff}').contains(&c) // CJK Unified Ideographs
        || ('\u{f900}'..='\u{faff}').contains(&c) // CJK Compatibility Ideographs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_converts() {
        assert_eq!(katakana_to_hiragana("タベマス"), "たべます");
        assert_eq!(katakana_to_hiragana("食べるヨ"), "食べるよ");
        assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
    }

    #[test]
    fn hiragana_untouched() {
        assert_eq!(katakana_to_hiragana("たべます"), "たべます");
    }

    #[test]
    fn char_classes() {
        assert!(is_i_row('み'));
        assert!(!is_i_row('ま'));
        assert!(is_e_row('べ'));
        assert!(is_kanji('食'));
        assert!(is_kanji('々'));
        assert!(!is_kanji('。'));
        assert!(is_hiragana('ん'));
    }
}
