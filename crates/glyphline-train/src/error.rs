//! Error types for glyphline-train

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from one external engine call
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine binary could not be started
    #[error("failed to start {}: {source}", .binary.display())]
    Spawn {
        /// Binary that was executed
        binary: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The engine exited unsuccessfully
    #[error("engine exited with {}: {stderr}", exit_label(.code))]
    Failed {
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Tail of the engine's standard error
        stderr: String,
    },

    /// The engine ran past its deadline and was killed
    #[error("engine timed out after {after:?}")]
    TimedOut {
        /// Deadline that expired
        after: Duration,
    },

    /// Waiting on the engine process failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

impl EngineError {
    /// Stable label used in report tallies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "engine-spawn",
            Self::Failed { .. } => "engine-exit",
            Self::TimedOut { .. } => "engine-timeout",
            Self::Io(_) => "engine-io",
        }
    }
}

/// Errors that can occur while aligning boxes or building artifacts
#[derive(Debug, Error)]
pub enum TrainError {
    /// Region count and ground-truth length disagree
    #[error("alignment mismatch: {regions} regions for {expected} characters")]
    AlignmentMismatch {
        /// Detected ink regions
        regions: usize,
        /// Characters that need a region
        expected: usize,
    },

    /// A box file line could not be parsed
    #[error("invalid box file line {line}: {message}")]
    InvalidBoxFile {
        /// 1-based line number
        line: usize,
        /// What is wrong
        message: String,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// External engine error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode error
    #[error("image error: {0}")]
    Image(#[from] glyphline_io::IoError),

    /// Binarization error
    #[error("color error: {0}")]
    Color(#[from] glyphline_color::ColorError),

    /// Connected component error
    #[error("region error: {0}")]
    Region(#[from] glyphline_region::RegionError),

    /// Corpus layout error
    #[error("synth error: {0}")]
    Synth(#[from] glyphline_synth::SynthError),

    /// Worker pool could not be started
    #[error("worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphline_core::Error),
}

/// Result type for training operations
pub type TrainResult<T> = Result<T, TrainError>;
