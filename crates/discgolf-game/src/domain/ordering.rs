//! Turn order for the next round.

use discgolf_core::store::Scores;

/// Computes the next round's turn order from the previous order and the
/// scores submitted in the round that just finished.
///
/// Players are sorted by score ascending, so the lowest score leads. Ties keep
/// their relative position from `prev_order`. Players in `prev_order` without
/// a score are left out, and score entries for names not in `prev_order` are
/// ignored.
///
/// Scores are whole strokes. Fractional scores never reach this function:
/// the HTTP layer rejects them with a validation error.
///
/// ```
/// use discgolf_core::store::Scores;
/// use discgolf_game::domain::ordering::calculate_next_round_order;
///
/// let order = vec!["A".to_owned(), "B".to_owned(), "C".to_owned()];
/// let scores = Scores::from([("A".to_owned(), 5), ("B".to_owned(), 2), ("C".to_owned(), 2)]);
///
/// assert_eq!(calculate_next_round_order(&order, &scores), ["B", "C", "A"]);
/// ```
#[must_use]
pub fn calculate_next_round_order(prev_order: &[String], prev_scores: &Scores) -> Vec<String> {
    let mut scored: Vec<(&String, i32)> = prev_order
        .iter()
        .filter_map(|player| prev_scores.get(player).map(|&score| (player, score)))
        .collect();

    // Stable: equal scores stay in previous-order position.
    scored.sort_by_key(|&(_, score)| score);

    scored.into_iter().map(|(player, _)| player.clone()).collect()
}
