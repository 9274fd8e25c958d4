//! Symbol list parsing.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

/// Split a comma-separated list into upper-cased symbols, preserving order.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_list() {
        assert_eq!(
            parse_symbols("AAPL,MSFT,GOOG").unwrap(),
            vec!["AAPL", "MSFT", "GOOG"]
        );
    }

    #[test]
    fn trims_and_uppercases() {
        assert_eq!(
            parse_symbols("  aapl , msft ,Goog").unwrap(),
            vec!["AAPL", "MSFT", "GOOG"]
        );
    }

    #[test]
    fn single_symbol() {
        assert_eq!(parse_symbols("TSLA").unwrap(), vec!["TSLA"]);
    }

    #[test]
    fn empty_token_fails() {
        assert_eq!(parse_symbols("AAPL,,MSFT"), Err(UniverseError::EmptyToken));
        assert_eq!(parse_symbols(""), Err(UniverseError::EmptyToken));
    }

    #[test]
    fn duplicate_fails() {
        assert_eq!(
            parse_symbols("AAPL,msft,aapl"),
            Err(UniverseError::DuplicateSymbol("AAPL".into()))
        );
    }
}
