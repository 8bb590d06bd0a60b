//! Board setup for a freshly formed lobby group: load a level file by
//! player count, falling back to the geometric generator, then seat players
//! (shuffled deterministically from the configured random seed) onto the
//! home bases it describes.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use game_core::{Board, GameStatus, HexCoord, Player, PlayerId, PlayerOrder, Troop, TroopKind, levelgen};

struct BoardPlan {
    domain: Vec<HexCoord>,
    home_bases: Vec<HexCoord>,
}

/// Loads `<player_count>.json` from `level_directory`, falling back to
/// [`levelgen`] if the file is missing or fails to parse. A level file is
/// just the tile domain as a bare JSON array of `{q, r}` coordinates; home
/// bases are derived from it the same way the generator derives them from
/// its own domain. A malformed file, or a domain that doesn't yield a home
/// base for every player, is logged and treated the same as a missing file
/// rather than failing the match outright.
async fn load_plan(level_directory: &Path, player_count: usize) -> BoardPlan {
    let path = level_directory.join(format!("{player_count}.json"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<HexCoord>>(&bytes) {
            Ok(domain) => {
                let home_bases = levelgen::home_bases_from_domain(&domain, player_count);
                if home_bases.len() == player_count {
                    BoardPlan { domain, home_bases }
                } else {
                    tracing::warn!(
                        ?path,
                        "level file domain doesn't yield a home base per player, generating instead"
                    );
                    generated_plan(player_count)
                }
            }
            Err(error) => {
                tracing::warn!(?path, %error, "level file failed to parse, generating instead");
                generated_plan(player_count)
            }
        },
        Err(_) => generated_plan(player_count),
    }
}

fn generated_plan(player_count: usize) -> BoardPlan {
    BoardPlan {
        domain: levelgen::generate_domain(player_count),
        home_bases: levelgen::generate_home_bases(player_count),
    }
}

/// Builds the initial [`GameStatus`] for `players`, shuffling turn order
/// deterministically from `random_seed` and seating the shuffled players
/// onto the plan's home bases in order.
pub async fn build_initial_status(
    level_directory: &Path,
    players: &[Player],
    random_seed: u64,
) -> GameStatus {
    let plan = load_plan(level_directory, players.len()).await;

    let mut shuffled: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let mut rng = StdRng::seed_from_u64(random_seed);
    shuffled.shuffle(&mut rng);

    let mut board = Board::new(plan.domain);
    for (player, coord) in shuffled.iter().zip(plan.home_bases) {
        board = board
            .place(coord, Troop::new(TroopKind::HomeBase, *player))
            .expect("home base coordinate is always within the board's own domain");
    }

    let core_coordinate = levelgen::core_coordinate_for(&board);
    GameStatus::new(PlayerOrder::new(shuffled), board, core_coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32) -> Player {
        Player {
            id: PlayerId(id),
            username: format!("player-{id}"),
        }
    }

    #[tokio::test]
    async fn missing_level_directory_falls_back_to_generated_board() {
        let players = vec![player(1), player(2), player(3)];
        let status = build_initial_status(Path::new("/nonexistent/levels"), &players, 42).await;
        assert_eq!(status.player_order.len(), 3);
        for p in &players {
            assert!(status.board.home_base_of(p.id).is_some());
        }
    }

    #[tokio::test]
    async fn same_seed_produces_the_same_turn_order() {
        let players = vec![player(1), player(2), player(3), player(4)];
        let a = build_initial_status(Path::new("/nonexistent/levels"), &players, 7).await;
        let b = build_initial_status(Path::new("/nonexistent/levels"), &players, 7).await;
        assert_eq!(a.player_order, b.player_order);
    }

    #[tokio::test]
    async fn a_bare_array_level_file_is_honored_instead_of_the_generator() {
        let dir = std::env::temp_dir().join("hexcommand-level-test-honored");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let domain = vec![
            HexCoord::new(3, 0),
            HexCoord::new(-3, 1),
            HexCoord::new(0, -3),
            HexCoord::ORIGIN,
        ];
        tokio::fs::write(dir.join("3.json"), serde_json::to_vec(&domain).unwrap())
            .await
            .unwrap();

        let players = vec![player(1), player(2), player(3)];
        let status = build_initial_status(&dir, &players, 1).await;
        assert_eq!(status.board.domain().count(), domain.len());
        for p in &players {
            let base = status.board.home_base_of(p.id).expect("player seated on a home base");
            assert!(domain.contains(&base));
        }

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn a_malformed_level_file_falls_back_to_generated_board() {
        let dir = std::env::temp_dir().join("hexcommand-level-test-malformed");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("3.json"), b"not json")
            .await
            .unwrap();

        let players = vec![player(1), player(2), player(3)];
        let status = build_initial_status(&dir, &players, 1).await;
        for p in &players {
            assert!(status.board.home_base_of(p.id).is_some());
        }

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
