//! Domain models: games, evaluations, and the tracking status.
//!
//! Serialised field names follow the original browser deployment
//! (`scoreCached`, `mobileRevenue`, `dateISO`, `playing`, `watching`) so an
//! exported payload from that app loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{compute_total, ScoreSheet};
use crate::rubric::Rubric;

/// Tracking status for a game.
///
/// The original app kept two checkbox flags that cleared each other on
/// activation; since at most one can be set, the pair collapses into a
/// single enumeration with a pure transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StatusFlags", into = "StatusFlags")]
pub enum Status {
    /// Neither currently playing nor on the watch list.
    #[default]
    NotTracked,
    /// On the watch list.
    Watching,
    /// Currently playing.
    Playing,
}

impl Status {
    /// Flip the "currently playing" mark. Activating it leaves any watch
    /// mark behind; deactivating returns to [`Status::NotTracked`].
    pub fn toggle_playing(self) -> Self {
        match self {
            Status::Playing => Status::NotTracked,
            _ => Status::Playing,
        }
    }

    /// Flip the watch-list mark, symmetric to [`Status::toggle_playing`].
    pub fn toggle_watching(self) -> Self {
        match self {
            Status::Watching => Status::NotTracked,
            _ => Status::Watching,
        }
    }

    /// Ordering weight for the list view; higher sorts first.
    pub fn priority(self) -> u8 {
        match self {
            Status::Playing => 2,
            Status::Watching => 1,
            Status::NotTracked => 0,
        }
    }

    /// True when the game is marked as currently playing.
    pub fn is_playing(self) -> bool {
        matches!(self, Status::Playing)
    }

    /// True when the game is on the watch list.
    pub fn is_watching(self) -> bool {
        matches!(self, Status::Watching)
    }
}

/// Wire form of [`Status`]: the two boolean fields of the persisted schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StatusFlags {
    #[serde(default)]
    playing: bool,
    #[serde(default)]
    watching: bool,
}

impl From<StatusFlags> for Status {
    fn from(flags: StatusFlags) -> Self {
        if flags.playing {
            Status::Playing
        } else if flags.watching {
            Status::Watching
        } else {
            Status::NotTracked
        }
    }
}

impl From<Status> for StatusFlags {
    fn from(status: Status) -> Self {
        StatusFlags {
            playing: status.is_playing(),
            watching: status.is_watching(),
        }
    }
}

/// One completed scoring pass over the rubric. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Unique identifier.
    pub id: String,
    /// Instant the evaluation was recorded.
    #[serde(rename = "dateISO")]
    pub recorded_at: DateTime<Utc>,
    /// Submitted scores keyed by criterion key.
    pub scores: ScoreSheet,
    /// Sum of `scores` over the rubric, cached at creation.
    pub total: i64,
}

impl Evaluation {
    /// Score a submission against the rubric with a fresh id and the
    /// current instant.
    pub fn new(scores: ScoreSheet, rubric: &Rubric) -> Self {
        Self::with_parts(Uuid::new_v4().to_string(), Utc::now(), scores, rubric)
    }

    /// Constructor with explicit id and instant for deterministic tests.
    pub fn with_parts(
        id: String,
        recorded_at: DateTime<Utc>,
        scores: ScoreSheet,
        rubric: &Rubric,
    ) -> Self {
        let total = compute_total(&scores, rubric);
        Self {
            id,
            recorded_at,
            scores,
            total,
        }
    }
}

/// A tracked game and its accumulated evaluation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier, assigned at creation and never reused.
    pub id: String,
    /// Display name. Non-empty; validated by the ledger on creation.
    pub name: String,
    /// Opaque thumbnail reference. Stored and displayed, never decoded.
    #[serde(default)]
    pub image: Option<String>,
    /// Playing/watching state, persisted as the two boolean flags.
    #[serde(flatten)]
    pub status: Status,
    /// Total of the most recent evaluation, 0 when none exist.
    #[serde(default, rename = "scoreCached")]
    pub score_cached: i64,
    /// Append-only evaluation history in chronological order.
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
    /// Deadline text in `dd/mm/yy` form. Stored verbatim, parsed only when
    /// the deadline view sorts.
    #[serde(default)]
    pub deadline: Option<String>,
    /// Monthly mobile revenue figure, unset when not entered.
    #[serde(default, rename = "mobileRevenue")]
    pub mobile_revenue: Option<f64>,
}

impl Game {
    /// Create an empty game record with a fresh id.
    pub fn new(name: impl Into<String>, image: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, image)
    }

    /// Create an empty game record with an explicit id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image,
            status: Status::NotTracked,
            score_cached: 0,
            evaluations: Vec::new(),
            deadline: None,
            mobile_revenue: None,
        }
    }

    /// Most recent evaluation, if any.
    pub fn latest_evaluation(&self) -> Option<&Evaluation> {
        self.evaluations.last()
    }

    /// Revenue as a plain number for ranking; unset counts as 0.
    pub fn revenue_or_zero(&self) -> f64 {
        self.mobile_revenue
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_transition_table() {
        assert_eq!(Status::NotTracked.toggle_playing(), Status::Playing);
        assert_eq!(Status::Playing.toggle_playing(), Status::NotTracked);
        assert_eq!(Status::Watching.toggle_playing(), Status::Playing);
        assert_eq!(Status::NotTracked.toggle_watching(), Status::Watching);
        assert_eq!(Status::Watching.toggle_watching(), Status::NotTracked);
        assert_eq!(Status::Playing.toggle_watching(), Status::Watching);
    }

    #[test]
    fn status_serialises_as_boolean_flags() {
        let game = Game::with_id("g1", "Hollow Knight", None);
        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(value["playing"], json!(false));
        assert_eq!(value["watching"], json!(false));
        assert_eq!(value["scoreCached"], json!(0));
    }

    #[test]
    fn legacy_record_without_watching_field_loads() {
        let game: Game = serde_json::from_value(json!({
            "id": "abc",
            "name": "Celeste",
            "playing": true,
            "scoreCached": 31,
            "evaluations": []
        }))
        .unwrap();
        assert_eq!(game.status, Status::Playing);
        assert_eq!(game.score_cached, 31);
        assert!(game.deadline.is_none());
    }

    #[test]
    fn watching_flag_round_trips() {
        let mut game = Game::with_id("g2", "Outer Wilds", None);
        game.status = Status::Watching;
        let text = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&text).unwrap();
        assert_eq!(back.status, Status::Watching);
    }

    #[test]
    fn evaluation_total_matches_rubric_sum() {
        let rubric = Rubric::standard();
        let scores: ScoreSheet = [("story".to_string(), 5), ("art".to_string(), 4)]
            .into_iter()
            .collect();
        let eval = Evaluation::with_parts(
            "e1".to_string(),
            Utc::now(),
            scores,
            &rubric,
        );
        assert_eq!(eval.total, 9);
    }

    #[test]
    fn revenue_defaults_to_zero_for_ranking() {
        let game = Game::with_id("g3", "Hades", None);
        assert_eq!(game.revenue_or_zero(), 0.0);
    }
}
