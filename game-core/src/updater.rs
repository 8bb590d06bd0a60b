//! The deterministic state transition: `status + actions -> events + status`.

use std::collections::HashMap;

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::event::Event;
use crate::player::PlayerId;
use crate::status::GameStatus;
use crate::troop::{Dominance, Troop};

/// Applies one full turn's worth of submitted actions to `status`, returning
/// the events produced (in issuance order) and the resulting status.
///
/// `is_valid` is injected rather than called directly so tests can assert on
/// the interleaving and resolution logic independent of the validator, and
/// so the updater has no compile-time dependency on it.
pub fn update(
    status: &GameStatus,
    actions_by_player: &HashMap<PlayerId, Vec<GameAction>>,
    is_valid: impl Fn(PlayerId, GameAction, &GameStatus) -> bool,
    config: &GameConfig,
) -> (Vec<Event>, GameStatus) {
    let mut events = Vec::new();
    let mut current = status.clone();

    for (player, action) in interleave(status, actions_by_player) {
        let (new_events, new_status) = resolve_one(&current, player, action, &is_valid);
        events.extend(new_events);
        current = new_status;
    }

    current.turn_number += 1;
    let current = check_termination(current, config);

    (events, current)
}

/// Round-robin flattening: each player's k-th action in turn, in
/// `status.player_order` order, skipping players with fewer actions.
fn interleave(
    status: &GameStatus,
    actions_by_player: &HashMap<PlayerId, Vec<GameAction>>,
) -> Vec<(PlayerId, GameAction)> {
    let mut flat = Vec::new();
    let max_len = actions_by_player.values().map(Vec::len).max().unwrap_or(0);
    for k in 0..max_len {
        for player in status.player_order.iter() {
            if let Some(actions) = actions_by_player.get(player) {
                if let Some(action) = actions.get(k) {
                    flat.push((*player, *action));
                }
            }
        }
    }
    flat
}

fn resolve_one(
    status: &GameStatus,
    player: PlayerId,
    action: GameAction,
    is_valid: &impl Fn(PlayerId, GameAction, &GameStatus) -> bool,
) -> (Vec<Event>, GameStatus) {
    if !is_valid(player, action, status) {
        return (vec![Event::NoChanges { action }], status.clone());
    }

    match action {
        GameAction::Spawn {
            coord, troop_kind, ..
        } => {
            let troop = Troop::new(troop_kind, player);
            let board = status
                .board
                .place(coord, troop)
                .expect("validator confirmed coord is on the board");
            let mut next = status.clone();
            next.board = board;
            (vec![Event::TroopSpawned { troop, coord }], next)
        }
        GameAction::March { from, to, .. } => resolve_march(status, player, from, to),
    }
}

fn resolve_march(
    status: &GameStatus,
    player: PlayerId,
    from: crate::hex::HexCoord,
    to: crate::hex::HexCoord,
) -> (Vec<Event>, GameStatus) {
    let attacker = status
        .board
        .occupant(from)
        .expect("validator confirmed source is on the board")
        .expect("validator confirmed source is occupied by the mover");
    let defender = status
        .board
        .occupant(to)
        .expect("validator confirmed destination is on the board");

    match defender {
        None => {
            let board = status
                .board
                .move_troop(from, to)
                .expect("validator confirmed both endpoints are on the board");
            let mut next = status.clone();
            next.board = board;
            (
                vec![Event::TroopMoved {
                    troop: attacker,
                    from,
                    to,
                }],
                next,
            )
        }
        Some(defender) if defender.is_home_base() && defender.owner != player => {
            let eliminated = defender.owner;
            let board = status
                .board
                .remove_all_owned_by(eliminated)
                .move_troop(from, to)
                .expect("validator confirmed both endpoints are on the board");
            let mut next = status.clone();
            next.board = board;
            next.player_order.remove(eliminated);
            (vec![Event::PlayerRemoved { player: eliminated }], next)
        }
        Some(defender) => match attacker.dominance_over(defender) {
            Dominance::Wins => {
                let board = status
                    .board
                    .move_troop(from, to)
                    .expect("validator confirmed both endpoints are on the board");
                let mut next = status.clone();
                next.board = board;
                (
                    vec![Event::AttackWon {
                        attacker,
                        defender,
                        from,
                        to,
                    }],
                    next,
                )
            }
            Dominance::Loses => {
                let board = status
                    .board
                    .remove_at(from)
                    .expect("validator confirmed source is on the board");
                let mut next = status.clone();
                next.board = board;
                (
                    vec![Event::AttackLost {
                        attacker,
                        defender,
                        at: from,
                    }],
                    next,
                )
            }
            Dominance::Ties => (
                vec![Event::NoChanges {
                    action: GameAction::march(from, to, 0),
                }],
                status.clone(),
            ),
        },
    }
}

fn check_termination(mut status: GameStatus, config: &GameConfig) -> GameStatus {
    if status.turn_number > config.max_turns {
        status.winner = troop_count_winner(&status);
        return status;
    }

    let core_occupant = status
        .board
        .occupant(status.core_coordinate)
        .unwrap_or(None);
    status.control_score = status.control_score.observe(core_occupant);

    if status.control_score.turns_held() >= config.winning_core_control_turns {
        if let Some(troop) = status.control_score.occupant() {
            status.winner = Some(troop.owner);
            return status;
        }
    }

    status.player_order.rotate();
    status
}

/// Most troops on the board wins; ties broken by earliest position in
/// `player_order` (`Iterator::max_by_key` would instead keep the *last*
/// maximal element, so the max is found by hand).
fn troop_count_winner(status: &GameStatus) -> Option<PlayerId> {
    let counts = status.board.troop_counts();
    let mut best: Option<(PlayerId, usize)> = None;
    for player in status.player_order.iter() {
        let count = counts.get(player).copied().unwrap_or(0);
        let replace = match best {
            Some((_, best_count)) => count > best_count,
            None => true,
        };
        if replace {
            best = Some((*player, count));
        }
    }
    best.map(|(player, _)| player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::hex::HexCoord;
    use crate::player::PlayerOrder;
    use crate::troop::TroopKind;

    fn always_valid(_: PlayerId, _: GameAction, _: &GameStatus) -> bool {
        true
    }

    fn base_status() -> GameStatus {
        let board = Board::new([
            HexCoord::ORIGIN,
            HexCoord::new(1, 0),
            HexCoord::new(2, 0),
            HexCoord::new(3, 0),
            HexCoord::new(-1, 0),
        ]);
        GameStatus::new(
            PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]),
            board,
            HexCoord::new(99, 99),
        )
    }

    #[test]
    fn round_robin_interleaves_fairly() {
        let status = base_status();
        let mut actions = HashMap::new();
        actions.insert(
            PlayerId(0),
            vec![
                GameAction::march(HexCoord::new(1, 0), HexCoord::new(2, 0), 1),
                GameAction::march(HexCoord::new(2, 0), HexCoord::new(3, 0), 1),
            ],
        );
        actions.insert(
            PlayerId(1),
            vec![GameAction::march(HexCoord::new(-1, 0), HexCoord::ORIGIN, 1)],
        );
        let flat = interleave(&status, &actions);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].0, PlayerId(0));
        assert_eq!(flat[1].0, PlayerId(1));
        assert_eq!(flat[2].0, PlayerId(0));
    }

    #[test]
    fn turn_number_increments_exactly_once() {
        let status = base_status();
        let config = GameConfig::default();
        let (_, next) = update(&status, &HashMap::new(), always_valid, &config);
        assert_eq!(next.turn_number, status.turn_number + 1);
    }

    #[test]
    fn invalid_action_emits_no_changes_and_preserves_board() {
        let status = base_status();
        let config = GameConfig::default();
        let mut actions = HashMap::new();
        actions.insert(
            PlayerId(0),
            vec![GameAction::march(HexCoord::new(1, 0), HexCoord::new(2, 0), 1)],
        );
        let (events, next) = update(&status, &actions, |_, _, _| false, &config);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::NoChanges { .. }));
        assert_eq!(next.board, status.board);
    }

    #[test]
    fn capturing_home_base_eliminates_owner() {
        let board = Board::new([HexCoord::ORIGIN, HexCoord::new(1, 0)])
            .place(HexCoord::new(1, 0), Troop::new(TroopKind::HomeBase, PlayerId(1)))
            .unwrap()
            .place(HexCoord::ORIGIN, Troop::new(TroopKind::Triangle, PlayerId(0)))
            .unwrap();
        let status = GameStatus::new(
            PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]),
            board,
            HexCoord::new(99, 99),
        );
        let config = GameConfig::default();
        let mut actions = HashMap::new();
        actions.insert(
            PlayerId(0),
            vec![GameAction::march(HexCoord::ORIGIN, HexCoord::new(1, 0), 1)],
        );
        let (events, next) = update(&status, &actions, always_valid, &config);
        assert!(matches!(events[0], Event::PlayerRemoved { player } if player == PlayerId(1)));
        assert!(!next.player_order.contains(PlayerId(1)));
        assert_eq!(next.board.troop_counts().get(&PlayerId(1)), None);
    }

    #[test]
    fn turn_limit_breaks_ties_by_player_order() {
        let board = Board::new([HexCoord::ORIGIN, HexCoord::new(1, 0), HexCoord::new(2, 0)])
            .place(HexCoord::ORIGIN, Troop::new(TroopKind::Triangle, PlayerId(1)))
            .unwrap()
            .place(HexCoord::new(1, 0), Troop::new(TroopKind::Triangle, PlayerId(0)))
            .unwrap();
        let mut status = GameStatus::new(
            PlayerOrder::new(vec![PlayerId(1), PlayerId(0)]),
            board,
            HexCoord::new(99, 99),
        );
        status.turn_number = 20;
        let config = GameConfig::default();
        let (_, next) = update(&status, &HashMap::new(), always_valid, &config);
        assert_eq!(next.winner, Some(PlayerId(1)));
    }

    #[test]
    fn sustained_core_control_wins_the_match() {
        let board = Board::new([HexCoord::ORIGIN])
            .place(HexCoord::ORIGIN, Troop::new(TroopKind::Triangle, PlayerId(0)))
            .unwrap();
        let mut status = GameStatus::new(
            PlayerOrder::new(vec![PlayerId(0), PlayerId(1)]),
            board,
            HexCoord::ORIGIN,
        );
        status.control_score = status.control_score.observe(Some(Troop::new(
            TroopKind::Triangle,
            PlayerId(0),
        )));
        status.control_score = status.control_score.observe(Some(Troop::new(
            TroopKind::Triangle,
            PlayerId(0),
        )));
        let config = GameConfig::default();
        let (_, next) = update(&status, &HashMap::new(), always_valid, &config);
        assert_eq!(next.winner, Some(PlayerId(0)));
    }
}
