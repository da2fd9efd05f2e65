//! Scoring rubric configuration.
//!
//! The rubric is data, not code: both deployed revisions of the app are
//! expressed as criteria tables, and every total/verdict computation is
//! parameterised on the rubric size rather than hardcoding either set.

use serde::{Deserialize, Serialize};

/// Highest score a single criterion can receive.
pub const SCORE_MAX: i64 = 5;

/// One scoring criterion, rated 0 to [`SCORE_MAX`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable key used in persisted score maps.
    pub key: String,
    /// Display title shown in the rating form.
    pub title: String,
    /// Short prompt explaining what the score should reflect.
    pub hint: String,
}

/// Which built-in rubric a deployment evaluates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RubricVariant {
    /// 8 criteria, max total 40, with the watch-list flag.
    #[default]
    Standard,
    /// 10 criteria, max total 50, no watch-list flag.
    Extended,
}

/// Ordered criteria list plus the capabilities tied to a rubric revision.
///
/// Criterion order is significant: it is both the display order and the
/// order totals are summed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    criteria: Vec<Criterion>,
    watch_list: bool,
}

impl Rubric {
    /// Build the rubric for a configured variant.
    pub fn for_variant(variant: RubricVariant) -> Self {
        match variant {
            RubricVariant::Standard => Self::standard(),
            RubricVariant::Extended => Self::extended(),
        }
    }

    /// The original 8-criterion rubric with the watch-list flag.
    pub fn standard() -> Self {
        Self {
            criteria: base_criteria(),
            watch_list: true,
        }
    }

    /// The revised 10-criterion rubric without the watch-list flag.
    pub fn extended() -> Self {
        let mut criteria = base_criteria();
        criteria.push(criterion(
            "replay",
            "9. Giá trị chơi lại",
            "Bạn có muốn quay lại game này sau khi đã hoàn thành không?",
        ));
        criteria.push(criterion(
            "stability",
            "10. Hiệu năng & Độ ổn định",
            "Game chạy có mượt, ít lỗi, ít giật lag trên máy của bạn không?",
        ));
        Self {
            criteria,
            watch_list: false,
        }
    }

    /// Criteria in display and summation order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True for a rubric with no criteria.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Whether this rubric revision supports the watch-list flag.
    pub fn has_watch_list(&self) -> bool {
        self.watch_list
    }

    /// Maximum achievable total.
    pub fn max_total(&self) -> i64 {
        SCORE_MAX * self.criteria.len() as i64
    }

    /// Verdict tier boundaries at roughly 50%, 70% and 90% of the maximum
    /// total. Yields 20/28/36 for the standard rubric and 25/35/45 for the
    /// extended one.
    pub fn breakpoints(&self) -> [i64; 3] {
        let max = self.max_total() as f64;
        [0.5, 0.7, 0.9].map(|fraction| (fraction * max).round() as i64)
    }
}

fn criterion(key: &str, title: &str, hint: &str) -> Criterion {
    Criterion {
        key: key.to_string(),
        title: title.to_string(),
        hint: hint.to_string(),
    }
}

fn base_criteria() -> Vec<Criterion> {
    vec![
        criterion(
            "story",
            "1. Thế giới & Câu chuyện",
            "Có hấp dẫn, mạch lạc, khiến bạn muốn tìm hiểu và theo dõi không?",
        ),
        criterion(
            "characters",
            "2. Nhân vật",
            "Cá tính, diễn xuất của từng nhân vật có khiến bạn gắn bó không?",
        ),
        criterion(
            "experience",
            "3. Trải nghiệm chơi & Nhịp độ",
            "Lối chơi, cảm giác mượt, mức cuốn, nhịp nhanh chậm… tất cả có hợp gu của bạn không?",
        ),
        criterion(
            "art",
            "4. Đồ họa & Phong cách nghệ thuật",
            "Thẩm mỹ, phối màu, thiết kế, tổng thể visual có hợp gu của bạn không?",
        ),
        criterion(
            "sound",
            "5. Âm thanh & Lồng tiếng",
            "Nhạc nền, hiệu ứng, giọng lồng tiếng có khiến bạn muốn đeo tai nghe để tận hưởng không?",
        ),
        criterion(
            "resources",
            "6. Đầu tư",
            "Skin mặc định có đủ đẹp để không cần nạp tiền mua skin trả phí không?",
        ),
        criterion(
            "community",
            "7. Cộng đồng & Môi trường chơi",
            "Bạn có thích cộng đồng của game không?",
        ),
        criterion(
            "fit",
            "8. Mức độ phù hợp với nhu cầu & tâm trạng",
            "Game này có đúng với nhu cầu bạn đang tìm và hợp với cảm xúc hiện tại của bạn không?",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rubric_shape() {
        let rubric = Rubric::standard();
        assert_eq!(rubric.len(), 8);
        assert_eq!(rubric.max_total(), 40);
        assert!(rubric.has_watch_list());
        assert_eq!(rubric.breakpoints(), [20, 28, 36]);
    }

    #[test]
    fn extended_rubric_shape() {
        let rubric = Rubric::extended();
        assert_eq!(rubric.len(), 10);
        assert_eq!(rubric.max_total(), 50);
        assert!(!rubric.has_watch_list());
        assert_eq!(rubric.breakpoints(), [25, 35, 45]);
    }

    #[test]
    fn criterion_keys_are_unique() {
        for rubric in [Rubric::standard(), Rubric::extended()] {
            let mut keys: Vec<_> = rubric.criteria().iter().map(|c| c.key.clone()).collect();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), rubric.len());
        }
    }

    #[test]
    fn extended_rubric_extends_the_standard_keys() {
        let standard = Rubric::standard();
        let extended = Rubric::extended();
        for (a, b) in standard.criteria().iter().zip(extended.criteria()) {
            assert_eq!(a.key, b.key);
        }
    }
}
