//! The two ordered projections of the game collection.

use std::cmp::Ordering;

use crate::collate;
use crate::dates::parse_deadline;
use crate::models::Game;

/// Ordering for the "Danh sách" tab: status priority (playing, then
/// watching, then the rest), score descending, then name ascending under
/// Vietnamese collation.
pub fn list_view(games: &[Game]) -> Vec<Game> {
    let mut items = games.to_vec();
    items.sort_by(|a, b| {
        b.status
            .priority()
            .cmp(&a.status.priority())
            .then_with(|| b.score_cached.cmp(&a.score_cached))
            .then_with(|| collate::compare(&a.name, &b.name))
    });
    items
}

/// Ordering for the "Deadline" tab, over playing games only.
///
/// Games with a parseable deadline come first in ascending date order;
/// undated games follow. Same date breaks by score then revenue descending;
/// two undated games break by revenue then score descending. Unset revenue
/// compares as 0.
pub fn deadline_view(games: &[Game]) -> Vec<Game> {
    let mut items: Vec<Game> = games
        .iter()
        .filter(|game| game.status.is_playing())
        .cloned()
        .collect();
    items.sort_by(|a, b| {
        let date_a = a.deadline.as_deref().and_then(parse_deadline);
        let date_b = b.deadline.as_deref().and_then(parse_deadline);
        match (date_a, date_b) {
            (Some(da), Some(db)) => da
                .cmp(&db)
                .then_with(|| b.score_cached.cmp(&a.score_cached))
                .then_with(|| b.revenue_or_zero().total_cmp(&a.revenue_or_zero())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b
                .revenue_or_zero()
                .total_cmp(&a.revenue_or_zero())
                .then_with(|| b.score_cached.cmp(&a.score_cached)),
        }
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn game(id: &str, name: &str) -> Game {
        Game::with_id(id, name, None)
    }

    fn playing(id: &str, name: &str, deadline: Option<&str>, score: i64, revenue: Option<f64>) -> Game {
        let mut g = game(id, name);
        g.status = Status::Playing;
        g.deadline = deadline.map(str::to_string);
        g.score_cached = score;
        g.mobile_revenue = revenue;
        g
    }

    fn names(items: &[Game]) -> Vec<&str> {
        items.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn list_orders_by_status_then_score_then_name() {
        let mut watched = game("w", "Watched");
        watched.status = Status::Watching;
        watched.score_cached = 40;

        let mut played = game("p", "Played");
        played.status = Status::Playing;
        played.score_cached = 5;

        let mut idle_high = game("i1", "Idle high");
        idle_high.score_cached = 30;
        let idle_low = game("i2", "Idle low");

        let view = list_view(&[idle_low.clone(), idle_high, watched, played]);
        assert_eq!(names(&view), ["Played", "Watched", "Idle high", "Idle low"]);
    }

    #[test]
    fn list_ties_break_by_vietnamese_name_order() {
        let view = list_view(&[game("1", "Cờ"), game("2", "Ánh"), game("3", "Bão")]);
        assert_eq!(names(&view), ["Ánh", "Bão", "Cờ"]);
    }

    #[test]
    fn deadline_view_keeps_only_playing_games() {
        let mut bench = game("b", "Benched");
        bench.deadline = Some("01/01/25".to_string());
        let active = playing("a", "Active", Some("02/01/25"), 0, None);
        let view = deadline_view(&[bench, active]);
        assert_eq!(names(&view), ["Active"]);
    }

    #[test]
    fn dated_games_come_first_in_ascending_order() {
        let view = deadline_view(&[
            playing("a", "Undated", None, 40, None),
            playing("b", "Mid Jan", Some("15/01/25"), 0, None),
            playing("c", "New Year", Some("01/01/25"), 0, None),
        ]);
        assert_eq!(names(&view), ["New Year", "Mid Jan", "Undated"]);
    }

    #[test]
    fn unparseable_deadlines_rank_with_the_undated() {
        let view = deadline_view(&[
            playing("a", "Garbled", Some("31/02/25"), 10, None),
            playing("b", "Dated", Some("28/02/25"), 0, None),
        ]);
        assert_eq!(names(&view), ["Dated", "Garbled"]);
    }

    #[test]
    fn same_date_breaks_by_score_then_revenue() {
        let view = deadline_view(&[
            playing("a", "Low score", Some("01/01/25"), 10, Some(900.0)),
            playing("b", "High score", Some("01/01/25"), 30, None),
            playing("c", "Rich tie", Some("01/01/25"), 10, Some(1200.0)),
        ]);
        assert_eq!(names(&view), ["High score", "Rich tie", "Low score"]);
    }

    #[test]
    fn undated_games_break_by_revenue_then_score() {
        let view = deadline_view(&[
            playing("a", "Fifty", None, 35, Some(50.0)),
            playing("b", "Hundred", None, 20, Some(100.0)),
            playing("c", "Broke", None, 39, None),
        ]);
        assert_eq!(names(&view), ["Hundred", "Fifty", "Broke"]);
    }

    #[test]
    fn short_and_long_year_forms_compare_as_dates() {
        let view = deadline_view(&[
            playing("a", "Long form", Some("01/06/2024"), 0, None),
            playing("b", "Short form", Some("31/05/24"), 0, None),
        ]);
        assert_eq!(names(&view), ["Short form", "Long form"]);
    }
}
