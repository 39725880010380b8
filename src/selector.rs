// Single-ply move selection
//
// Given one board snapshot, rule out every direction that walks into a wall,
// into any snake body, or onto a cell an opposing head could also reach next
// turn, then pick uniformly among what is left.

use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

use crate::types::{Board, Coord, Direction};

/// Move returned when every direction is unsafe
pub const FALLBACK_MOVE: Direction = Direction::Down;

/// Snapshot problems that make a decision meaningless
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snake '{0}' not found on board")]
    UnknownSnake(String),
    #[error("snake '{0}' has an empty body")]
    EmptyBody(String),
}

/// Per-direction safety flags, indexed by `Direction::index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyMask([bool; 4]);

impl SafetyMask {
    pub fn all_safe() -> Self {
        SafetyMask([true; 4])
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        self.0[dir.index()]
    }

    pub fn mark_unsafe(&mut self, dir: Direction) {
        self.0[dir.index()] = false;
    }

    /// Safe directions in `Direction::ALL` order
    pub fn safe_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| self.is_safe(dir))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&safe| safe)
    }
}

/// Outcome of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Picked among at least one safe direction
    Safe(Direction),
    /// Nothing was safe; carries `FALLBACK_MOVE`
    NoSafeMoves,
}

impl Selection {
    /// The concrete move to send back
    pub fn direction(&self) -> Direction {
        match self {
            Selection::Safe(dir) => *dir,
            Selection::NoSafeMoves => FALLBACK_MOVE,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Selection::NoSafeMoves)
    }
}

/// Computes which of the four directions are safe for `you_id` this turn.
///
/// Deterministic: the same snapshot always yields the same mask.
pub fn compute_safety_mask(board: &Board, you_id: &str) -> Result<SafetyMask, SnapshotError> {
    let you = board
        .snake(you_id)
        .ok_or_else(|| SnapshotError::UnknownSnake(you_id.to_string()))?;
    let head = *you
        .body
        .first()
        .ok_or_else(|| SnapshotError::EmptyBody(you_id.to_string()))?;

    let mut mask = SafetyMask::all_safe();

    avoid_walls(&mut mask, head, board.width, board.height);
    avoid_bodies(&mut mask, head, board);
    avoid_head_collisions(&mut mask, head, board, you_id);

    Ok(mask)
}

/// Picks a move for `you_id`: uniform among the safe directions, or the
/// fallback when there are none.
pub fn select_move<R: Rng>(
    board: &Board,
    you_id: &str,
    rng: &mut R,
) -> Result<Selection, SnapshotError> {
    let safe = compute_safety_mask(board, you_id)?.safe_moves();

    if safe.is_empty() {
        return Ok(Selection::NoSafeMoves);
    }

    Ok(Selection::Safe(safe[rng.random_range(0..safe.len())]))
}

fn avoid_walls(mask: &mut SafetyMask, head: Coord, width: i32, height: i32) {
    if head.x == width - 1 {
        mask.mark_unsafe(Direction::Right);
    }
    if head.x == 0 {
        mask.mark_unsafe(Direction::Left);
    }
    if head.y == height - 1 {
        mask.mark_unsafe(Direction::Up);
    }
    if head.y == 0 {
        mask.mark_unsafe(Direction::Down);
    }
}

fn avoid_bodies(mask: &mut SafetyMask, head: Coord, board: &Board) {
    // Pre-move occupancy: tails count, our own neck counts
    let occupied: HashSet<Coord> = board
        .snakes
        .iter()
        .flat_map(|s| s.body.iter().copied())
        .collect();

    for dir in Direction::ALL {
        if mask.is_safe(dir) && occupied.contains(&dir.apply(&head)) {
            mask.mark_unsafe(dir);
        }
    }
}

/// Rules out cells any opposing head can reach next turn, whatever the
/// lengths involved.
fn avoid_head_collisions(mask: &mut SafetyMask, head: Coord, board: &Board, you_id: &str) {
    let contested: HashSet<Coord> = board
        .snakes
        .iter()
        .filter(|s| s.id != you_id)
        .flat_map(|s| Direction::ALL.map(|d| d.apply(&s.head)))
        .collect();

    if contested.is_empty() {
        return;
    }

    for dir in Direction::ALL {
        if mask.is_safe(dir) && contested.contains(&dir.apply(&head)) {
            mask.mark_unsafe(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Battlesnake;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_open_board_only_excludes_neck() {
        let b = board(11, 11, vec![snake("me", &[(5, 5), (5, 4), (5, 3)])]);
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert_eq!(
            mask.safe_moves(),
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_each_wall_excludes_its_direction() {
        let cases = [
            ((0, 5), Direction::Left),
            ((10, 5), Direction::Right),
            ((5, 0), Direction::Down),
            ((5, 10), Direction::Up),
        ];
        for ((x, y), blocked) in cases {
            let b = board(11, 11, vec![snake("me", &[(x, y)])]);
            let mask = compute_safety_mask(&b, "me").unwrap();
            assert!(!mask.is_safe(blocked), "{:?} should be blocked at ({}, {})", blocked, x, y);
            assert_eq!(mask.safe_moves().len(), 3);
        }
    }

    #[test]
    fn test_one_by_one_board_has_no_safe_moves() {
        let b = board(1, 1, vec![snake("me", &[(0, 0)])]);
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert!(mask.is_empty());

        let mut rng = StdRng::seed_from_u64(1);
        let selection = select_move(&b, "me", &mut rng).unwrap();
        assert_eq!(selection, Selection::NoSafeMoves);
        assert_eq!(selection.direction(), Direction::Down);
    }

    #[test]
    fn test_tail_is_treated_as_obstacle() {
        // Head at (5,5) with tail curled to (6,5)
        let b = board(
            11,
            11,
            vec![snake("me", &[(5, 5), (5, 4), (6, 4), (6, 5)])],
        );
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert!(!mask.is_safe(Direction::Right));
        assert!(!mask.is_safe(Direction::Down));
    }

    #[test]
    fn test_adjacent_opponent_head_blocks_contested_cells() {
        // Opponent head two cells right: (6,5) is reachable by both heads
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(5, 5), (4, 5)]),
                snake("them", &[(7, 5), (8, 5)]),
            ],
        );
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert!(!mask.is_safe(Direction::Right));
        assert!(mask.is_safe(Direction::Up));
        assert!(mask.is_safe(Direction::Down));
    }

    #[test]
    fn test_diagonal_opponent_blocks_two_directions() {
        // Opponent at (6,6) reaches (5,6) and (6,5)
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(5, 5), (5, 4)]),
                snake("them", &[(6, 6), (7, 6)]),
            ],
        );
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert_eq!(mask.safe_moves(), vec![Direction::Left]);
    }

    #[test]
    fn test_shorter_opponent_still_blocks() {
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)]),
                snake("them", &[(5, 7)]),
            ],
        );
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert!(!mask.is_safe(Direction::Up));
    }

    #[test]
    fn test_own_head_is_not_an_opponent() {
        let b = board(11, 11, vec![snake("me", &[(5, 5)])]);
        let mask = compute_safety_mask(&b, "me").unwrap();
        assert_eq!(mask, SafetyMask::all_safe());
    }

    #[test]
    fn test_unknown_snake_is_rejected() {
        let b = board(11, 11, vec![snake("me", &[(5, 5)])]);
        assert_eq!(
            compute_safety_mask(&b, "ghost"),
            Err(SnapshotError::UnknownSnake("ghost".to_string()))
        );
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let b = board(11, 11, vec![snake("me", &[])]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_move(&b, "me", &mut rng),
            Err(SnapshotError::EmptyBody("me".to_string()))
        );
    }

    #[test]
    fn test_snapshot_error_messages() {
        assert_eq!(
            SnapshotError::UnknownSnake("ghost".to_string()).to_string(),
            "snake 'ghost' not found on board"
        );
        assert_eq!(
            SnapshotError::EmptyBody("me".to_string()).to_string(),
            "snake 'me' has an empty body"
        );
    }

    #[test]
    fn test_selection_is_always_safe() {
        let b = board(11, 11, vec![snake("me", &[(5, 5), (5, 4), (5, 3)])]);
        let mask = compute_safety_mask(&b, "me").unwrap();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_move(&b, "me", &mut rng).unwrap();
            assert!(!selection.is_fallback());
            assert!(mask.is_safe(selection.direction()));
        }
    }
}
