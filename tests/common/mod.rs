// Board builders shared by the integration tests

#![allow(dead_code)]

use scarf_snake::types::{Battlesnake, Board, Coord, Game, GameState};
use serde_json::json;

pub fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

pub fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
    Board {
        width,
        height,
        food: vec![],
        snakes,
        hazards: vec![],
    }
}

pub fn game_state(board: Board, you_id: &str, turn: i32) -> GameState {
    let you = board
        .snakes
        .iter()
        .find(|s| s.id == you_id)
        .cloned()
        .unwrap_or_else(|| snake(you_id, &[(0, 0)]));

    GameState {
        game: Game {
            id: "test-game".to_string(),
            ruleset: json!({"name": "standard"}),
            timeout: 500,
            source: "test".to_string(),
        },
        turn,
        board,
        you,
    }
}
