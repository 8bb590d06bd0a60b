//! Troop kinds and the cyclic dominance relation.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// The four troop variants. `HomeBase` is immovable and always loses any
/// comparison; the remaining three form a rock-paper-scissors cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TroopKind {
    Triangle,
    Square,
    Pentagon,
    HomeBase,
}

/// Outcome of comparing two troop kinds in combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dominance {
    Wins,
    Loses,
    Ties,
}

impl TroopKind {
    /// Cyclic dominance: Triangle > Pentagon, Square > Triangle,
    /// Pentagon > Square. `HomeBase` always loses; two `HomeBase`s tie.
    ///
    /// Implemented as an exhaustive match, not a numeric/type-id comparison,
    /// so adding a variant is a compile error here rather than a silent gap.
    pub fn dominance_over(self, other: TroopKind) -> Dominance {
        use Dominance::*;
        use TroopKind::*;
        match (self, other) {
            (HomeBase, HomeBase) => Ties,
            (HomeBase, _) => Loses,
            (_, HomeBase) => Wins,
            (a, b) if a == b => Ties,
            (Triangle, Pentagon) | (Pentagon, Square) | (Square, Triangle) => Wins,
            _ => Loses,
        }
    }
}

/// A troop occupying a tile, owned by exactly one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troop {
    pub kind: TroopKind,
    pub owner: PlayerId,
}

impl Troop {
    pub fn new(kind: TroopKind, owner: PlayerId) -> Self {
        Troop { kind, owner }
    }

    pub fn dominance_over(self, other: Troop) -> Dominance {
        self.kind.dominance_over(other.kind)
    }

    pub fn is_home_base(self) -> bool {
        self.kind == TroopKind::HomeBase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TroopKind::*;

    fn all_playable() -> [TroopKind; 3] {
        [Triangle, Square, Pentagon]
    }

    #[test]
    fn cycle_is_total_and_exclusive() {
        for a in all_playable() {
            for b in all_playable() {
                let outcomes = [
                    a.dominance_over(b) == Dominance::Wins,
                    a.dominance_over(b) == Dominance::Loses,
                    a.dominance_over(b) == Dominance::Ties,
                ];
                assert_eq!(outcomes.iter().filter(|x| **x).count(), 1);
            }
        }
    }

    #[test]
    fn cycle_matches_rock_paper_scissors_shape() {
        assert_eq!(Triangle.dominance_over(Pentagon), Dominance::Wins);
        assert_eq!(Square.dominance_over(Triangle), Dominance::Wins);
        assert_eq!(Pentagon.dominance_over(Square), Dominance::Wins);
        assert_eq!(Pentagon.dominance_over(Triangle), Dominance::Loses);
    }

    #[test]
    fn equal_kinds_tie() {
        for kind in all_playable() {
            assert_eq!(kind.dominance_over(kind), Dominance::Ties);
        }
    }

    #[test]
    fn home_base_loses_to_every_playable_kind() {
        for kind in all_playable() {
            assert_eq!(HomeBase.dominance_over(kind), Dominance::Loses);
            assert_eq!(kind.dominance_over(HomeBase), Dominance::Wins);
        }
    }

    #[test]
    fn two_home_bases_tie() {
        assert_eq!(HomeBase.dominance_over(HomeBase), Dominance::Ties);
    }
}
