//! Vietnamese-alphabet string comparison.
//!
//! Replaces the original deployment's `localeCompare(name, "vi")` for the
//! name tie-break in the list view. Comparison is case-insensitive with
//! base letters as the primary weight and tone marks as the secondary
//! weight, the conventional Vietnamese dictionary ordering.

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Letter families in Vietnamese alphabetical order. Within a family the
/// precomposed characters are ordered by tone mark: level, huyền, hỏi,
/// ngã, sắc, nặng.
const FAMILIES: &[&str] = &[
    "aàảãáạ",
    "ăằẳẵắặ",
    "âầẩẫấậ",
    "b",
    "c",
    "d",
    "đ",
    "eèẻẽéẹ",
    "êềểễếệ",
    "g",
    "h",
    "iìỉĩíị",
    "k",
    "l",
    "m",
    "n",
    "oòỏõóọ",
    "ôồổỗốộ",
    "ơờởỡớợ",
    "p",
    "q",
    "r",
    "s",
    "t",
    "uùủũúụ",
    "ưừửữứự",
    "v",
    "x",
    "yỳỷỹýỵ",
];

static RANKS: Lazy<HashMap<char, (u32, u8)>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (family, members) in FAMILIES.iter().enumerate() {
        for (tone, ch) in members.chars().enumerate() {
            table.insert(ch, (family as u32, tone as u8));
        }
    }
    table
});

/// Characters outside the alphabet sort after it, by code point.
const FOREIGN_BASE: u32 = 0x20_0000;

fn weights(text: &str) -> (Vec<u32>, Vec<u8>) {
    let mut primary = Vec::new();
    let mut secondary = Vec::new();
    for ch in text.chars() {
        for lower in ch.to_lowercase() {
            match RANKS.get(&lower) {
                Some(&(family, tone)) => {
                    primary.push(family);
                    secondary.push(tone);
                }
                None => {
                    primary.push(FOREIGN_BASE + lower as u32);
                    secondary.push(0);
                }
            }
        }
    }
    (primary, secondary)
}

/// Compare two strings under Vietnamese collation.
///
/// Total ordering: base-letter sequence first, then tone marks, then the
/// raw strings as a last resort so distinct strings never compare equal.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (primary_a, secondary_a) = weights(a);
    let (primary_b, secondary_b) = weights(b);
    primary_a
        .cmp(&primary_b)
        .then_with(|| secondary_a.cmp(&secondary_b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| compare(a, b));
        names
    }

    #[test]
    fn diacritics_follow_the_vietnamese_alphabet() {
        assert_eq!(sorted(vec!["Cờ", "Ánh", "Bão"]), ["Ánh", "Bão", "Cờ"]);
    }

    #[test]
    fn breve_and_circumflex_sort_between_plain_letters() {
        // a < ă < â < b, and d < đ < e.
        assert_eq!(sorted(vec!["âm", "ăn", "an"]), ["an", "ăn", "âm"]);
        assert_eq!(sorted(vec!["đá", "dưa", "em"]), ["dưa", "đá", "em"]);
    }

    #[test]
    fn tone_marks_break_base_letter_ties() {
        // Level tone before huyền before sắc.
        assert_eq!(sorted(vec!["má", "mà", "ma"]), ["ma", "mà", "má"]);
    }

    #[test]
    fn comparison_is_case_insensitive_first() {
        assert_eq!(sorted(vec!["bưởi", "Anh"]), ["Anh", "bưởi"]);
    }

    #[test]
    fn distinct_strings_never_compare_equal() {
        assert_ne!(compare("Ma", "ma"), Ordering::Equal);
        assert_eq!(compare("ma", "ma"), Ordering::Equal);
    }

    #[test]
    fn non_vietnamese_characters_sort_after_the_alphabet() {
        assert_eq!(sorted(vec!["42", "zelda", "yên"]), ["yên", "42", "zelda"]);
    }
}
