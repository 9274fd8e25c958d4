//! Report output port trait.

use crate::domain::error::StockscoreError;
use crate::domain::evaluation::ScoreResult;

/// Port for writing the consolidated result table.
pub trait ReportPort {
    fn write(&self, results: &[ScoreResult], output_path: &str) -> Result<(), StockscoreError>;
}
