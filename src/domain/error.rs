//! Domain error types.

/// Why a single instrument could not be evaluated.
///
/// Short histories are not errors: indicators whose window exceeds the
/// available bars are simply undefined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("empty series")]
    EmptySeries,

    #[error("malformed series at bar {index}: {reason}")]
    MalformedSeries { index: usize, reason: String },
}

/// Top-level error type for stockscore.
#[derive(Debug, thiserror::Error)]
pub enum StockscoreError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockscoreError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        StockscoreError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&StockscoreError> for std::process::ExitCode {
    fn from(err: &StockscoreError) -> Self {
        let code: u8 = match err {
            StockscoreError::Io(_) | StockscoreError::Report { .. } => 1,
            StockscoreError::ConfigParse { .. }
            | StockscoreError::ConfigMissing { .. }
            | StockscoreError::ConfigInvalid { .. } => 2,
            StockscoreError::DataSource { .. } => 3,
            StockscoreError::NoData { .. } | StockscoreError::Evaluation(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}
