//! First-pass box files from the engine

use crate::pool::map_ordered;
use crate::{EngineError, EngineMode, EngineRequest, OcrEngine, TrainResult};
use glyphline_synth::{Tally, UnitPaths};
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of [`make_initial_boxes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakeboxReport {
    /// Units handed to the engine
    pub attempted: usize,
    /// Units the engine succeeded on
    pub succeeded: usize,
    /// Failed units, by reason
    pub failed: Tally,
}

impl fmt::Display for MakeboxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "makebox:")?;
        writeln!(f, "  attempted: {}", self.attempted)?;
        writeln!(f, "  succeeded: {}", self.succeeded)?;
        write!(f, "  failed:    {}", self.failed)
    }
}

/// Ask the engine for an initial box file of every unit.
///
/// Engine failures are counted per unit; only a worker pool that cannot
/// be started is an error.
pub fn make_initial_boxes(
    engine: &dyn OcrEngine,
    units: &[UnitPaths],
    workers: usize,
) -> TrainResult<MakeboxReport> {
    info!(units = units.len(), "generating initial box files");
    let results: Vec<Result<(), EngineError>> = map_ordered(workers, units, |unit| {
        engine.run(&EngineRequest::new(
            unit.image(),
            unit.output_base(),
            EngineMode::Makebox,
        ))
    })?;

    let mut report = MakeboxReport {
        attempted: units.len(),
        ..Default::default()
    };
    for (unit, result) in units.iter().zip(&results) {
        match result {
            Ok(()) => {
                report.succeeded += 1;
                debug!(unit = unit.base_name(), "box file generated");
            }
            Err(e) => {
                report.failed.add(e.kind());
                warn!(unit = unit.base_name(), error = %e, "makebox failed");
            }
        }
    }
    info!(
        succeeded = report.succeeded,
        failed = report.failed.total(),
        "box file generation complete"
    );
    Ok(report)
}
