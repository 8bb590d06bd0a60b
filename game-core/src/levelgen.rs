//! Geometric fallback board generation, used when no level file exists or
//! a level file is malformed for a given player count.

use crate::board::Board;
use crate::hex::HexCoord;
use crate::player::PlayerId;
use crate::troop::{Troop, TroopKind};

const RADIUS: i32 = 8;

/// The set of tiles for `player_count` players, shaped per spec: a triangle
/// for 3, a square for 4, a pointy-top hex for 5-6, a flat-top hex for 7-8.
/// All shapes are centered on the origin and sized by `RADIUS`.
pub fn generate_domain(player_count: usize) -> Vec<HexCoord> {
    match player_count {
        3 => triangle(RADIUS),
        4 => square(RADIUS),
        5 | 6 => pointy_hex(RADIUS),
        _ => flat_hex(RADIUS),
    }
}

/// Home-base coordinates for each of `player_count` players, placed evenly
/// around the ring at distance `RADIUS` from the origin so every player
/// starts equidistant from the core.
pub fn generate_home_bases(player_count: usize) -> Vec<HexCoord> {
    home_bases_from_domain(&generate_domain(player_count), player_count)
}

/// Chooses one home-base tile per player out of an arbitrary `domain`,
/// mirroring the angular-bucket selection in the reference architecture's
/// `board_factory._find_vertices`: split the domain into `player_count`
/// angular sectors around the origin, then take the tile farthest from the
/// origin in each occupied sector. Used both for the geometric generator's
/// own domain and for hand-authored level files, so a level file only needs
/// to supply the playable tile domain, not the home-base slots themselves.
pub fn home_bases_from_domain(domain: &[HexCoord], player_count: usize) -> Vec<HexCoord> {
    if player_count == 0 {
        return Vec::new();
    }
    let step = std::f64::consts::TAU / player_count as f64;
    let mut buckets: Vec<Vec<HexCoord>> = vec![Vec::new(); player_count];
    for &coord in domain {
        let (x, y) = axial_to_xy(coord);
        let angle = y.atan2(x) + std::f64::consts::PI;
        let idx = ((angle / step) as usize).min(player_count - 1);
        buckets[idx].push(coord);
    }
    buckets
        .into_iter()
        .filter_map(|bucket| {
            bucket
                .into_iter()
                .max_by_key(|c| c.distance(HexCoord::ORIGIN))
        })
        .collect()
}

fn axial_to_xy(c: HexCoord) -> (f64, f64) {
    let q = c.q as f64;
    let r = c.r as f64;
    let sqrt3 = 3f64.sqrt();
    (sqrt3 * q + sqrt3 / 2.0 * r, 1.5 * r)
}

/// Builds a fresh board for `player_count` players, with a `HomeBase` troop
/// placed for each player in `player_order` order.
pub fn build_board(player_count: usize, players: &[PlayerId]) -> Board {
    let domain = generate_domain(player_count);
    let home_bases = generate_home_bases(player_count);
    let mut board = Board::new(domain);
    for (player, coord) in players.iter().zip(home_bases) {
        board = board
            .place(coord, Troop::new(TroopKind::HomeBase, *player))
            .expect("home base coordinate is always within the generated domain");
    }
    board
}

/// The distinguished core tile for a freshly built board. Canonically the
/// origin; if a home base was placed there instead (can't happen with the
/// ring placement above, but level files are free-form), falls back to the
/// centroid of unoccupied tiles.
pub fn core_coordinate_for(board: &Board) -> HexCoord {
    if matches!(board.occupant(HexCoord::ORIGIN), Ok(None) | Err(_)) {
        return HexCoord::ORIGIN;
    }
    let unoccupied: Vec<HexCoord> = board
        .domain()
        .filter(|c| matches!(board.occupant(*c), Ok(None)))
        .collect();
    if unoccupied.is_empty() {
        return HexCoord::ORIGIN;
    }
    let (sum_q, sum_r) = unoccupied
        .iter()
        .fold((0i64, 0i64), |(q, r), c| (q + c.q as i64, r + c.r as i64));
    let n = unoccupied.len() as i64;
    let centroid = HexCoord::new((sum_q / n) as i32, (sum_r / n) as i32);
    *unoccupied
        .iter()
        .min_by_key(|c| c.distance(centroid))
        .unwrap_or(&HexCoord::ORIGIN)
}

fn triangle(radius: i32) -> Vec<HexCoord> {
    let mut tiles = Vec::new();
    for q in -radius..=radius {
        for r in -radius..=radius {
            let c = HexCoord::new(q, r);
            if q >= 0 && r >= 0 && HexCoord::ORIGIN.distance(c) <= radius {
                tiles.push(c);
            }
        }
    }
    tiles
}

fn square(radius: i32) -> Vec<HexCoord> {
    let mut tiles = Vec::new();
    for q in -radius..=radius {
        for r in -radius..=radius {
            tiles.push(HexCoord::new(q, r));
        }
    }
    tiles
}

fn pointy_hex(radius: i32) -> Vec<HexCoord> {
    let mut tiles = Vec::new();
    for q in -radius..=radius {
        for r in -radius..=radius {
            let c = HexCoord::new(q, r);
            if HexCoord::ORIGIN.distance(c) <= radius {
                tiles.push(c);
            }
        }
    }
    tiles
}

fn flat_hex(radius: i32) -> Vec<HexCoord> {
    // Same tiling as the pointy-top hex; the orientation distinction is a
    // presentation concern for the client, not the coordinate domain.
    pointy_hex(radius)
}
