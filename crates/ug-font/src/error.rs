use thiserror::Error;

/// Errors originating from font loading and BDF parsing.
#[derive(Error, Debug)]
pub enum FontError {
    /// Font name not in the known list.
    #[error("Police inconnue : {name}. Disponibles : {available}")]
    UnknownFont {
        /// Requested name.
        name: String,
        /// Comma-separated list of known names.
        available: String,
    },

    /// Font file missing and builtin fallback disabled.
    #[error("Fichier de police introuvable : {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// Font file exists but cannot be read.
    #[error("Impossible de lire {path} : {source}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed BDF content.
    #[error("BDF ligne {line} : {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Input ended inside a block.
    #[error("BDF : fin de fichier inattendue (attendu {0})")]
    UnexpectedEof(&'static str),
}
