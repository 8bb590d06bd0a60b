//! Per-round action-point budget check.

use crate::action::GameAction;

/// `budget − Σ cost` over `actions`. Negative means the set of actions is
/// over budget; the caller (the controller) rejects whichever action pushed
/// it negative rather than storing it.
pub fn remaining_action_points(budget: i64, actions: impl IntoIterator<Item = GameAction>) -> i64 {
    let spent: i64 = actions.into_iter().map(|a| a.cost() as i64).sum();
    budget - spent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;

    #[test]
    fn empty_actions_leave_full_budget() {
        assert_eq!(remaining_action_points(3, []), 3);
    }

    #[test]
    fn spending_reduces_remaining() {
        let actions = [
            GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1),
            GameAction::march(HexCoord::new(1, 0), HexCoord::new(2, 0), 1),
        ];
        assert_eq!(remaining_action_points(3, actions), 1);
    }

    #[test]
    fn overspending_goes_negative() {
        let actions = [
            GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1),
            GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1),
            GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1),
            GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1),
        ];
        assert_eq!(remaining_action_points(3, actions), -1);
    }
}
