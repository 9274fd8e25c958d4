//! Market data port trait.

use crate::domain::error::StockscoreError;
use crate::domain::evaluation::StaticInfo;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::period::Period;

pub trait DataPort {
    /// Bars for `symbol` over the trailing `period`, oldest first.
    fn fetch_history(&self, symbol: &str, period: Period)
    -> Result<Vec<OhlcvBar>, StockscoreError>;

    fn fetch_info(&self, symbol: &str) -> Result<StaticInfo, StockscoreError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError>;
}
