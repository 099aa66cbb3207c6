use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Failure of a checked access through a [`UniquePtr`](crate::UniquePtr).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("the owner holds the null handle")]
    Null,

    #[error("index {index} is out of bounds for an array of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::AccessError;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(AccessError::Null.to_string(), "the owner holds the null handle");
        assert_eq!(
            AccessError::OutOfBounds { index: 4, len: 2 }.to_string(),
            "index 4 is out of bounds for an array of length 2",
        );
    }
}
