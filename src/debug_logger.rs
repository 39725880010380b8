// Decision log for /move requests
//
// Fire-and-forget async logging so the request/response cycle never waits on
// disk. Each decision becomes one line of a JSONL file that the replay tool
// can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Board, Direction};

/// One logged decision
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecisionRecord {
    pub game_id: String,
    pub snake_id: String,
    pub turn: i32,
    pub chosen_move: Direction,
    pub fallback: bool,
    pub board: Board,
    pub timestamp: String,
}

impl DecisionRecord {
    pub fn new(
        game_id: &str,
        snake_id: &str,
        turn: i32,
        chosen_move: Direction,
        fallback: bool,
        board: Board,
    ) -> Self {
        DecisionRecord {
            game_id: game_id.to_string(),
            snake_id: snake_id.to_string(),
            turn,
            chosen_move,
            fallback,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared decision logger state
/// Uses Arc<Mutex<File>> so concurrent games can append from separate tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a decision without blocking the caller
    /// Must be called from within a tokio runtime when enabled
    pub fn log_move(&self, record: DecisionRecord) {
        if !self.enabled {
            return;
        }

        let logger = self.clone();
        tokio::spawn(async move {
            logger.write_record(&record).await;
        });
    }

    /// Appends one record and flushes it
    pub async fn write_record(&self, record: &DecisionRecord) {
        let mut file_guard = self.file.lock().await;

        let Some(file) = file_guard.as_mut() else {
            return;
        };

        match serde_json::to_string(record) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush().await {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
