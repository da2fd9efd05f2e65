//! The game record store and its mutation commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::engine::ScoreSheet;
use crate::models::{Evaluation, Game, Status};
use crate::rubric::Rubric;

/// Validation failures reported to the caller before any state change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// `add_game` was called with a blank name.
    #[error("game name must not be empty")]
    EmptyName,
}

/// An evaluation staged by [`Ledger::stage_evaluation`] and awaiting an
/// explicit confirm or cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingEvaluation {
    /// Id of the game the evaluation targets.
    pub game_id: String,
    /// The fully computed candidate evaluation.
    pub evaluation: Evaluation,
}

/// In-memory collection of games plus the staged evaluation, if any.
///
/// Each command derives a fresh snapshot from the previous one and bumps a
/// revision counter, so callers can mirror changed snapshots to storage
/// after every event.
#[derive(Debug, Clone)]
pub struct Ledger {
    rubric: Rubric,
    games: Vec<Game>,
    pending: Option<PendingEvaluation>,
    revision: u64,
}

impl Ledger {
    /// Empty ledger for the given rubric.
    pub fn new(rubric: Rubric) -> Self {
        Self::from_games(rubric, Vec::new())
    }

    /// Wrap a collection loaded from storage.
    ///
    /// A record saved under the watch-list rubric may carry a watch mark
    /// the active rubric cannot express; those come back as not tracked.
    pub fn from_games(rubric: Rubric, mut games: Vec<Game>) -> Self {
        if !rubric.has_watch_list() {
            for game in &mut games {
                if game.status.is_watching() {
                    game.status = Status::NotTracked;
                }
            }
        }
        Self {
            rubric,
            games,
            pending: None,
            revision: 0,
        }
    }

    /// The rubric this ledger evaluates against.
    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Current snapshot, newest insertion first.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Counter incremented once per collection change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The staged evaluation, if one is awaiting confirmation.
    pub fn pending(&self) -> Option<&PendingEvaluation> {
        self.pending.as_ref()
    }

    /// Look up a game by id.
    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Insert a new game at the front of the collection.
    pub fn add_game(&mut self, name: &str, image: Option<String>) -> Result<&Game, LedgerError> {
        self.add_game_with_id(Uuid::new_v4().to_string(), name, image)
    }

    /// [`Ledger::add_game`] with an explicit id for deterministic tests.
    pub fn add_game_with_id(
        &mut self,
        id: String,
        name: &str,
        image: Option<String>,
    ) -> Result<&Game, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let mut next = Vec::with_capacity(self.games.len() + 1);
        next.push(Game::with_id(id, name, image));
        next.extend(self.games.iter().cloned());
        self.replace(next);
        Ok(&self.games[0])
    }

    /// Remove a game. Unknown ids are a no-op, not an error.
    pub fn delete_game(&mut self, id: &str) {
        if self.game(id).is_none() {
            return;
        }
        let next = self
            .games
            .iter()
            .filter(|game| game.id != id)
            .cloned()
            .collect();
        self.replace(next);
    }

    /// Flip the "currently playing" flag of a game.
    pub fn toggle_playing(&mut self, id: &str) {
        self.update_game(id, |game| game.status = game.status.toggle_playing());
    }

    /// Flip the watch-list flag of a game. No-op under a rubric without the
    /// watch-list capability.
    pub fn toggle_watching(&mut self, id: &str) {
        if !self.rubric.has_watch_list() {
            return;
        }
        self.update_game(id, |game| game.status = game.status.toggle_watching());
    }

    /// Store deadline text verbatim. No parsing or validation happens at
    /// write time.
    pub fn set_deadline(&mut self, id: &str, text: &str) {
        let value = text.to_string();
        self.update_game(id, |game| game.deadline = Some(value.clone()));
    }

    /// Update the revenue field. Empty input clears it; input that does not
    /// parse as a finite number leaves the stored value untouched.
    pub fn set_mobile_revenue(&mut self, id: &str, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            self.update_game(id, |game| game.mobile_revenue = None);
            return;
        }
        if let Ok(value) = raw.parse::<f64>() {
            if value.is_finite() {
                self.update_game(id, |game| game.mobile_revenue = Some(value));
            }
        }
    }

    /// First phase of a save: score the submission and hold it until the
    /// caller confirms or cancels. Staging replaces any previous pending
    /// evaluation and does not touch the collection.
    pub fn stage_evaluation(&mut self, game_id: &str, scores: ScoreSheet) -> &Evaluation {
        let evaluation = Evaluation::new(scores, &self.rubric);
        self.stage_prepared(game_id, evaluation)
    }

    /// [`Ledger::stage_evaluation`] with explicit id and instant for
    /// deterministic tests.
    pub fn stage_evaluation_with(
        &mut self,
        game_id: &str,
        id: String,
        recorded_at: DateTime<Utc>,
        scores: ScoreSheet,
    ) -> &Evaluation {
        let evaluation = Evaluation::with_parts(id, recorded_at, scores, &self.rubric);
        self.stage_prepared(game_id, evaluation)
    }

    fn stage_prepared(&mut self, game_id: &str, evaluation: Evaluation) -> &Evaluation {
        let staged = self.pending.insert(PendingEvaluation {
            game_id: game_id.to_string(),
            evaluation,
        });
        &staged.evaluation
    }

    /// Second phase: append the staged evaluation to its game and refresh
    /// the cached score. Returns `false` when nothing was staged or the
    /// target game no longer exists.
    pub fn confirm_evaluation(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if self.game(&pending.game_id).is_none() {
            return false;
        }
        self.update_game(&pending.game_id, |game| {
            game.evaluations.push(pending.evaluation.clone());
            game.score_cached = pending.evaluation.total;
        });
        true
    }

    /// Discard the staged evaluation without touching the collection.
    pub fn cancel_evaluation(&mut self) {
        self.pending = None;
    }

    fn update_game(&mut self, id: &str, mut apply: impl FnMut(&mut Game)) {
        if self.game(id).is_none() {
            return;
        }
        let next = self
            .games
            .iter()
            .cloned()
            .map(|mut game| {
                if game.id == id {
                    apply(&mut game);
                }
                game
            })
            .collect();
        self.replace(next);
    }

    fn replace(&mut self, next: Vec<Game>) {
        self.games = next;
        self.revision += 1;
    }
}
