//! Portuguese-aware string ordering.
//!
//! Strings compare first by their base letters (accents and case removed),
//! then by accents, then by case. This matches the ordering a reader
//! expects from a pt-BR sorted list: "Álvares" sorts next to "Alves", not
//! after "Zé".

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Primary collation key: decomposed, marks stripped, lowercased.
pub fn base_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Secondary key: lowercased but keeping accents.
fn accent_key(value: &str) -> String {
    value.nfd().flat_map(char::to_lowercase).collect()
}

/// Full comparison (base letters, then accents, then case).
pub fn compare_pt(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| b.cmp(a))
}

/// Comparison on base letters only; strings differing only in accents or
/// case are equal.
pub fn compare_pt_base(a: &str, b: &str) -> Ordering {
    base_key(a).cmp(&base_key(b))
}
