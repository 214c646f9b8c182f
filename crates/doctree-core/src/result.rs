//! Result type alias for doctree operations

use crate::error::DocTreeError;

/// Standard Result type for doctree operations
pub type Result<T> = std::result::Result<T, DocTreeError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Convert an error to a recoverable error if possible
    fn recoverable(self) -> Result<Option<T>>;

    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Recoverable error: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Ignoring error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_swallows_offset_table_errors() {
        let result: Result<u32> = Err(DocTreeError::InvalidOffsetTable {
            expected: 4,
            actual: 2,
        });
        assert!(matches!(result.recoverable(), Ok(None)));
    }

    #[test]
    fn recoverable_propagates_fatal_errors() {
        let result: Result<u32> = Err(DocTreeError::internal_error("boom"));
        assert!(result.recoverable().is_err());
    }

    #[test]
    fn log_and_continue_keeps_values() {
        let result: Result<u32> = Ok(7);
        assert_eq!(result.log_and_continue(), Some(7));
    }
}
