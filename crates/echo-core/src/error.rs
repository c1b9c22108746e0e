//! The workspace-wide error type.

use thiserror::Error;

/// Errors produced by the EchoSpace adapter.
///
/// All errors are raised at the point of detection. There is no local
/// recovery, retry, or partial-success reporting anywhere in the
/// workspace — operations either fully succeed or fail outright.
///
/// # Example
///
/// ```
/// use echo_core::EchoError;
///
/// let err = EchoError::InputDim { expected: 3, got: 4 };
/// assert!(err.to_string().contains("dimension"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EchoError {
    /// Invalid construction parameters (e.g. a zero-unit reservoir).
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Step input's trailing dimension differs from the dimension fixed
    /// at weight initialization.
    #[error("input dimension {got} does not match reservoir input dimension {expected}")]
    InputDim { expected: usize, got: usize },

    /// Step input was not a single row vector.
    #[error("step input must be a single row vector, got {got} rows")]
    InputRows { got: usize },

    /// A graph node's name could not be parsed as a float literal.
    #[error("node name {name:?} is not a valid float literal")]
    NameParse { name: String },

    /// Requested shape's element count differs from the available count.
    #[error("cannot reshape {elements} elements into ({rows}, {cols})")]
    ReshapeMismatch {
        elements: usize,
        rows: usize,
        cols: usize,
    },

    /// Store persistence or lock failure.
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = EchoError::NameParse {
            name: "value_0".to_string(),
        };
        assert!(err.to_string().contains("value_0"));

        let err = EchoError::ReshapeMismatch {
            elements: 3,
            rows: 2,
            cols: 2,
        };
        assert!(err.to_string().contains("(2, 2)"));
    }
}
