//! Reverse-mapping of conjugated Japanese surface forms to their dictionary
//! forms, for use by a dictionary lookup layer. The engine applies a static
//! table of suffix-rewrite rules in a bounded breadth-first search, validates
//! each application phonologically, and classifies the surviving candidates.

mod classify;
mod deinflect;
mod euphony;
mod kana;
mod rules;
mod search;
mod word_class;

pub use classify::{DeinflectionResult, VerbType};
pub use deinflect::{Deinflector, TagLoader, Transliterator};
pub use kana::katakana_to_hiragana;
pub use rules::{rules_for, rules_grouped_by_reason, DeinflectionRule};
pub use word_class::WordClass;
