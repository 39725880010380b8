// Integration tests for the Bot's /move responses
//
// A trapped snake must answer "down" rather than error, and a snapshot the
// selector cannot evaluate must also degrade to "down".

mod common;

use common::{board, game_state, snake};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scarf_snake::bot::Bot;
use scarf_snake::config::Config;
use scarf_snake::debug_logger::DebugLogger;

fn bot() -> Bot {
    Bot::new(Config::default_hardcoded(), DebugLogger::disabled())
}

/// Snake at top wall (y=10), boxed in by its own body and an opponent
#[test]
fn test_trapped_at_top_wall_moves_down() {
    let b = board(
        11,
        11,
        vec![
            snake("our-snake", &[(5, 10), (5, 9), (4, 9), (4, 10)]),
            snake("opponent", &[(6, 10), (6, 9), (6, 8)]),
        ],
    );
    let state = game_state(b, "our-snake", 40);

    let mut rng = StdRng::seed_from_u64(3);
    let response = bot().get_move_with_rng(&state, &mut rng);
    assert_eq!(response["move"], "down");
}

#[test]
fn test_response_is_one_of_the_safe_moves() {
    let b = board(11, 11, vec![snake("our-snake", &[(0, 0), (1, 0)])]);
    let state = game_state(b, "our-snake", 1);
    let bot = bot();

    // Only up is safe from the bottom-left corner with the neck to the right
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let response = bot.get_move_with_rng(&state, &mut rng);
        assert_eq!(response["move"], "up");
    }
}

#[test]
fn test_missing_self_snake_falls_back() {
    let b = board(11, 11, vec![snake("someone-else", &[(5, 5)])]);
    let state = game_state(b, "our-snake", 7);

    let response = bot().get_move(&state);
    assert_eq!(response["move"], "down");
}

#[test]
fn test_empty_body_falls_back() {
    let mut me = snake("our-snake", &[(5, 5)]);
    me.body.clear();
    let state = game_state(board(11, 11, vec![me]), "our-snake", 2);

    let response = bot().get_move(&state);
    assert_eq!(response["move"], "down");
}

#[test]
fn test_info_reports_configured_appearance() {
    let info = bot().info();
    assert_eq!(info["apiversion"], "1");
    assert_eq!(info["author"], "belimawr");
    assert_eq!(info["color"], "#1a0a74");
    assert_eq!(info["head"], "scarf");
    assert_eq!(info["tail"], "ice-skate");
}

#[test]
fn test_start_and_end_do_not_panic() {
    let state = game_state(board(11, 11, vec![snake("our-snake", &[(5, 5)])]), "our-snake", 0);
    let bot = bot();
    bot.start(&state);
    bot.end(&state);
}
