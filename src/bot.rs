// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot answers the engine's endpoints. Move decisions live in `selector`;
// this layer adds configuration, logging, and the JSON responses.
// For more info see docs.battlesnake.com

use log::{error, info, warn};
use rand::Rng;
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::{DebugLogger, DecisionRecord};
use crate::selector::{self, Selection, FALLBACK_MOVE};
use crate::types::{Direction, GameState};

/// Battlesnake Bot
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `debug_logger` - Sink for per-turn decision records
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!("{} START", state.game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("{} END", state.game.id);
    }

    /// Chooses the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, state: &GameState) -> Value {
        self.get_move_with_rng(state, &mut rand::rng())
    }

    /// Same as `get_move` with a caller-supplied random source
    pub fn get_move_with_rng<R: Rng>(&self, state: &GameState, rng: &mut R) -> Value {
        let chosen_move = self.decide(state, rng);
        json!({ "move": chosen_move.as_str() })
    }

    /// Runs the selector and emits the per-turn log line.
    /// Never fails: invalid snapshots get the fallback move.
    fn decide<R: Rng>(&self, state: &GameState, rng: &mut R) -> Direction {
        let game_id = &state.game.id;
        let you_id = &state.you.id;

        let selection = match selector::select_move(&state.board, you_id, rng) {
            Ok(selection) => selection,
            Err(e) => {
                error!(
                    "{} {} MOVE {}: invalid snapshot ({}), moving {}",
                    game_id, you_id, state.turn, e, FALLBACK_MOVE
                );
                return FALLBACK_MOVE;
            }
        };

        let chosen_move = selection.direction();
        match selection {
            Selection::Safe(_) => {
                info!("{} {} MOVE {}: {}", game_id, you_id, state.turn, chosen_move);
            }
            Selection::NoSafeMoves => {
                warn!(
                    "{} {} MOVE {}: No safe moves detected! Moving {}",
                    game_id, you_id, state.turn, chosen_move
                );
            }
        }

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_move(DecisionRecord::new(
                game_id,
                you_id,
                state.turn,
                chosen_move,
                selection.is_fallback(),
                state.board.clone(),
            ));
        }

        chosen_move
    }
}
