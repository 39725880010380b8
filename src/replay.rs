// Replay module for checking logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs written by the debug logger
// 2. Recompute the safety mask for every logged board
// 3. Flag any logged move that was not in the safe set
// 4. Print a summary report

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::debug_logger::DecisionRecord;
use crate::selector::{self, FALLBACK_MOVE};
use crate::types::Direction;

/// Verdict for a single replayed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Logged move was one of the safe moves
    Safe,
    /// Nothing was safe and the record is a flagged fallback
    Fallback,
    /// Logged move was not in the safe set, or the fallback flag
    /// disagrees with whether any safe move existed
    Violation,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub logged_move: Direction,
    pub safe_moves: Vec<Direction>,
    pub verdict: Verdict,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub safe: usize,
    pub fallbacks: usize,
    pub violations: usize,
}

/// Replay engine for decision logs
pub struct ReplayEngine {
    verbose: bool,
}

impl ReplayEngine {
    pub fn new(verbose: bool) -> Self {
        ReplayEngine { verbose }
    }

    /// Loads all records from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionRecord>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionRecord = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Recomputes the safe set for one record and judges the logged move
    pub fn replay_entry(&self, entry: &DecisionRecord) -> Result<ReplayResult, String> {
        let mask = selector::compute_safety_mask(&entry.board, &entry.snake_id)
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        let safe_moves = mask.safe_moves();

        let verdict = if safe_moves.is_empty() {
            if entry.fallback && entry.chosen_move == FALLBACK_MOVE {
                Verdict::Fallback
            } else {
                Verdict::Violation
            }
        } else if !entry.fallback && safe_moves.contains(&entry.chosen_move) {
            Verdict::Safe
        } else {
            Verdict::Violation
        };

        if self.verbose {
            match verdict {
                Verdict::Safe => info!("Turn {}: ✓ {} in {:?}", entry.turn, entry.chosen_move, safe_moves),
                Verdict::Fallback => info!("Turn {}: no safe moves, fallback {}", entry.turn, entry.chosen_move),
                Verdict::Violation => warn!(
                    "Turn {}: ✗ {} not in {:?}",
                    entry.turn, entry.chosen_move, safe_moves
                ),
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            logged_move: entry.chosen_move,
            safe_moves,
            verdict,
        })
    }

    /// Replays all entries, skipping ones that cannot be evaluated
    pub fn replay_all(&self, entries: &[DecisionRecord]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Keeps records matching the optional game id and logged move
    pub fn filter_entries(
        entries: &[DecisionRecord],
        game_id: Option<&str>,
        chosen_move: Option<Direction>,
    ) -> Vec<DecisionRecord> {
        entries
            .iter()
            .filter(|e| game_id.map_or(true, |id| e.game_id == id))
            .filter(|e| chosen_move.map_or(true, |dir| e.chosen_move == dir))
            .cloned()
            .collect()
    }

    /// Replays specific turns.
    /// A log shared by concurrent games repeats turn numbers, so each turn
    /// must match exactly one record; narrow with `filter_entries` first.
    pub fn replay_turns(
        &self,
        entries: &[DecisionRecord],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        turn_numbers
            .iter()
            .map(|turn_num| {
                let mut matching = entries.iter().filter(|e| e.turn == *turn_num);
                let entry = matching
                    .next()
                    .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;
                if let Some(other) = matching.next() {
                    return Err(format!(
                        "Turn {} is ambiguous: logged by games '{}' and '{}'",
                        turn_num, entry.game_id, other.game_id
                    ));
                }
                self.replay_entry(entry)
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let count = |v: Verdict| results.iter().filter(|r| r.verdict == v).count();

        ReplayStats {
            total_turns: results.len(),
            safe: count(Verdict::Safe),
            fallbacks: count(Verdict::Fallback),
            violations: count(Verdict::Violation),
        }
    }

    /// Prints a report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Safe:           {}", stats.safe);
        println!("Fallbacks:      {}", stats.fallbacks);
        println!("Violations:     {}", stats.violations);
        println!("═══════════════════════════════════════════════════════════\n");

        let violations: Vec<_> = results
            .iter()
            .filter(|r| r.verdict == Verdict::Violation)
            .collect();
        for result in violations {
            println!(
                "Turn {}: logged {} but safe set was {:?}",
                result.turn,
                result.logged_move,
                result.safe_moves.iter().map(|d| d.as_str()).collect::<Vec<_>>()
            );
        }
    }
}
