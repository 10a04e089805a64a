//! External OCR engine client
//!
//! The engine is a separate program called once per line image. It is
//! given the image, an output base path, a page segmentation mode, a
//! language and a mode word, and signals success with exit status 0.
//! Everything it needs is passed on the command line; no environment
//! variable is set or read.

use crate::EngineError;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// How often a running engine is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Bytes of standard error kept for error reports
const STDERR_TAIL: usize = 2048;

/// What the engine is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineMode {
    /// An initial box file
    Makebox,
    /// A training feature file from an existing box file
    LstmTrain,
}

impl EngineMode {
    /// Mode word on the engine command line
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::Makebox => "makebox",
            Self::LstmTrain => "lstm.train",
        }
    }
}

/// One engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    /// Line image
    pub image: PathBuf,
    /// Output path without extension
    pub output_base: PathBuf,
    /// What to produce
    pub mode: EngineMode,
}

impl EngineRequest {
    /// Create a request
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(image: P, output_base: Q, mode: EngineMode) -> Self {
        Self {
            image: image.as_ref().to_path_buf(),
            output_base: output_base.as_ref().to_path_buf(),
            mode,
        }
    }
}

/// An engine that turns line images into training files
pub trait OcrEngine: Send + Sync {
    /// Run one request to completion.
    fn run(&self, request: &EngineRequest) -> Result<(), EngineError>;
}

/// How to invoke the engine program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine executable
    pub binary: PathBuf,
    /// Arguments placed before the request arguments
    pub binary_args: Vec<String>,
    /// Model directory passed as `--tessdata-dir`
    pub tessdata_dir: Option<PathBuf>,
    /// Language or model name passed as `-l`
    pub language: String,
    /// Page segmentation mode passed as `--psm`
    pub psm: u32,
    /// Deadline of a single call
    pub timeout: Duration,
    /// Extra arguments before the mode word in makebox mode
    pub makebox_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            binary_args: Vec::new(),
            tessdata_dir: None,
            language: "eng".to_string(),
            psm: 7,
            timeout: Duration::from_secs(300),
            makebox_args: vec!["batch.nochop".to_string()],
        }
    }
}

impl EngineConfig {
    /// Full argument list for `request`, `binary_args` first.
    pub fn args(&self, request: &EngineRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.binary_args.iter().map(OsString::from).collect();
        args.push(request.image.clone().into_os_string());
        args.push(request.output_base.clone().into_os_string());
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".into());
            args.push(dir.clone().into_os_string());
        }
        args.push("--psm".into());
        args.push(self.psm.to_string().into());
        args.push("-l".into());
        args.push(self.language.clone().into());
        if request.mode == EngineMode::Makebox {
            args.extend(self.makebox_args.iter().map(OsString::from));
        }
        args.push(request.mode.as_arg().into());
        args
    }
}

/// Runs a tesseract-compatible program as a child process
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    config: EngineConfig,
}

impl TesseractEngine {
    /// Create a client for `config`
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn tail(text: &str) -> String {
    let text = text.trim();
    if text.len() <= STDERR_TAIL {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}

impl OcrEngine for TesseractEngine {
    fn run(&self, request: &EngineRequest) -> Result<(), EngineError> {
        let args = self.config.args(request);
        debug!(binary = %self.config.binary.display(), ?args, "running engine");

        let mut child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                binary: self.config.binary.clone(),
                source,
            })?;

        // drain stderr so a chatty engine cannot block on a full pipe;
        // `done` fires when the pipe closes
        let captured = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done) = mpsc::channel::<()>();
        if let Some(mut pipe) = child.stderr.take() {
            let sink = Arc::clone(&captured);
            thread::spawn(move || {
                let mut chunk = [0u8; 4096];
                while let Ok(n @ 1..) = pipe.read(&mut chunk) {
                    if let Ok(mut bytes) = sink.lock() {
                        bytes.extend_from_slice(&chunk[..n]);
                    }
                }
                let _ = done_tx.send(());
            });
        }

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.config.timeout {
                let _ = child.kill();
                child.wait()?;
                return Err(EngineError::TimedOut {
                    after: self.config.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        if status.success() {
            return Ok(());
        }
        // a background process left by the engine may hold the pipe open;
        // report what arrived before the deadline
        let remaining = self.config.timeout.saturating_sub(started.elapsed());
        let _ = done.recv_timeout(remaining);
        let bytes = captured.lock().map(|b| b.clone()).unwrap_or_default();
        Err(EngineError::Failed {
            code: status.code(),
            stderr: tail(&String::from_utf8_lossy(&bytes)),
        })
    }
}
