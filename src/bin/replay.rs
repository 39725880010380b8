// Standalone replay tool for checking Battlesnake decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --game <id>            Only replay records from this game
//   --move <dir>           Only replay records that logged this move
//   --verbose              Show detailed output for each turn

use std::env;
use std::process;

use scarf_snake::replay::ReplayEngine;
use scarf_snake::types::Direction;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --game <id>             Only replay records from this game");
    eprintln!("  --move <up|down|...>    Only replay records that logged this move");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay battlesnake_debug.jsonl");
    eprintln!("  replay battlesnake_debug.jsonl --game abc123 --turns 5,10,15 --verbose");
    eprintln!("  replay battlesnake_debug.jsonl --move down");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let wants_help = args.iter().any(|a| a == "--help");

    if args.len() < 2 || wants_help {
        print_usage();
        process::exit(if wants_help { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut verbose = false;
    let mut turns = None;
    let mut game_id: Option<String> = None;
    let mut chosen_move: Option<Direction> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--turns" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --turns requires an argument");
                    process::exit(1);
                };
                match parse_turns(value) {
                    Ok(t) => turns = Some(t),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--game" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --game requires an argument");
                    process::exit(1);
                };
                game_id = Some(value.clone());
                i += 1;
            }
            "--move" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --move requires an argument");
                    process::exit(1);
                };
                match value.parse::<Direction>() {
                    Ok(dir) => chosen_move = Some(dir),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let engine = ReplayEngine::new(verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => ReplayEngine::filter_entries(&entries, game_id.as_deref(), chosen_move),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let results = match turns {
        Some(turns) => match engine.replay_turns(&entries, &turns) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => engine.replay_all(&entries),
    };

    engine.print_report(&results);

    if engine.generate_stats(&results).violations > 0 {
        process::exit(2);
    }
}
