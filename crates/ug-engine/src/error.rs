use thiserror::Error;
use ug_core::CoreError;
use ug_font::FontError;

/// Errors originating from the engine: windows, fonts and configuration.
///
/// # Example
/// ```
/// use ug_engine::{Engine, EngineError};
/// use ug_core::EngineConfig;
/// let engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
/// let err = engine.get_window("hud").unwrap_err();
/// assert!(matches!(err, EngineError::UnknownWindow(_)));
/// assert_eq!(err.to_string(), "Fenêtre inconnue : hud");
/// ```
#[derive(Error, Debug)]
pub enum EngineError {
    /// `get_window` on a name that was never created (or was removed).
    #[error("Fenêtre inconnue : {0}")]
    UnknownWindow(String),

    /// Font could not be loaded.
    #[error(transparent)]
    Font(#[from] FontError),

    /// Invalid window geometry or configuration.
    #[error(transparent)]
    Core(#[from] CoreError),
}
