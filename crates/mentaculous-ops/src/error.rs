//! Error types for the operations layer.

use mentaculous_core::PlayerId;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Transport failure talking to a remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote service answered with a non-success status.
    #[error("API error for {resource}: HTTP {status}")]
    Api { resource: String, status: u16 },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stats API has no such game.
    #[error("Game {game_pk} not found")]
    GameNotFound { game_pk: u64 },

    /// The player is unknown (to the stats API, the box score or the ledger).
    #[error("Player {player_id} not found")]
    PlayerNotFound { player_id: PlayerId },

    /// The player has no matching home run in the game.
    #[error("Player {player_id} has no matching home run in game {game_pk}")]
    NoHomeRun { player_id: PlayerId, game_pk: u64 },

    /// Backup credentials not configured.
    #[error("Backup not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY or use `mtc config set`")]
    BackupNotConfigured,

    /// The backup sink rejected the snapshot.
    #[error("Backup failed: {0}")]
    Backup(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context.
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl OpsError {
    /// Create a new error with additional context.
    pub fn with_context(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether the error means the requested thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OpsError::GameNotFound { .. } | OpsError::PlayerNotFound { .. }
        )
    }

    /// Whether the error came from a remote service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            OpsError::Http(_) | OpsError::Api { .. } | OpsError::Backup(_)
        )
    }
}

impl From<anyhow::Error> for OpsError {
    fn from(err: anyhow::Error) -> Self {
        OpsError::WithContext {
            context: "Operation failed".to_string(),
            message: err.to_string(),
        }
    }
}
