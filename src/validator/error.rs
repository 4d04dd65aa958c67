//! Error type definition.

use thiserror::Error;

/// Error type for validation against the wild-type sequence.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "encountered a negative index in {variant} with 'one_based' set as '{one_based}'; \
        positions might not be one-based"
    )]
    NegativeIndex { variant: String, one_based: bool },
    #[error(
        "position {position} (index {index}) in {variant} extends beyond the maximum index \
        {max_index} of the wild-type sequence with length {length}"
    )]
    OutOfBounds {
        variant: String,
        position: i64,
        index: i64,
        max_index: usize,
        length: usize,
    },
    #[error(
        "base '{expected}' at 1-based position {position} in the wild-type sequence does not \
        match the base '{claimed}' from the variant '{variant}'"
    )]
    ReferenceMismatch {
        variant: String,
        position: i64,
        expected: char,
        claimed: char,
    },
    #[error(
        "amino acid '{expected}' at 1-based position {position} in the translated protein \
        sequence does not match the amino acid '{claimed}' suggested in the variant '{variant}'"
    )]
    ResidueMismatch {
        variant: String,
        position: i64,
        expected: String,
        claimed: String,
    },
    #[error("parsing failed")]
    Parse(#[from] crate::parser::Error),
    #[error("sequence operation failed")]
    Sequence(#[from] crate::sequence::Error),
}
