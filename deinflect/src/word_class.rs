use enumflags2::{bitflags, BitFlags};

// a word's class is a set, not a single value: surface forms stay ambiguous
// until later rules disambiguate them
// the first seven bits are final (dictionary-form) categories:
//   * IchidanVerb for 一段 verbs ('v1' dictionary marker)
//   * GodanVerb for 五段 verbs (markers starting with 'v5')
//   * IAdjective for い-adjectives (marker 'adj-i')
//   * KuruVerb for 来る (marker 'vk')
//   * SuruVerb / SpecialSuruVerb for する verbs (markers starting with 'vs')
//   * NounTakingSuru for nouns usable with する
// the rest are intermediate pseudo-categories that only exist during a
// search: Initial marks the untouched input word, the four stem classes mark
// words from which a suffix family has been removed but which are not yet
// dictionary forms
#[bitflags]
#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WordClass {
    IchidanVerb = 1 << 0,
    GodanVerb = 1 << 1,
    IAdjective = 1 << 2,
    KuruVerb = 1 << 3,
    SuruVerb = 1 << 4,
    SpecialSuruVerb = 1 << 5,
    NounTakingSuru = 1 << 6,
    Initial = 1 << 7,
    TaTeStem = 1 << 8,
    DaDeStem = 1 << 9,
    MasuStem = 1 << 10,
    IrrealisStem = 1 << 11,
}

impl WordClass {
    /// Union of the final (dictionary-form) categories.
    pub fn all() -> BitFlags<WordClass> {
        WordClass::IchidanVerb
            | WordClass::GodanVerb
            | WordClass::IAdjective
            | WordClass::KuruVerb
            | WordClass::SuruVerb
            | WordClass::SpecialSuruVerb
            | WordClass::NounTakingSuru
    }

    /// The stem pseudo-classes that can take a bare る to form an ichidan
    /// dictionary form.
    pub fn stems() -> BitFlags<WordClass> {
        WordClass::MasuStem | WordClass::TaTeStem | WordClass::IrrealisStem
    }
}
