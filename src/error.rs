use std::collections::TryReserveError;

/// Everything that can go wrong between raw weights and a built table.
///
/// The first four variants come out of [`validate`](crate::validate); the
/// last two out of the builder. Sampling itself has no error path.
#[derive(Debug)]
pub enum WeightError {
    Empty,
    Negative { index: usize, value: f64 },
    NoPositive,
    IndexRange { len: usize, max: usize },
    InvalidSum { total: f64 },
    Alloc(TryReserveError),
}

impl std::fmt::Display for WeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightError::Empty => write!(f, "weights slice is empty"),
            WeightError::Negative { index, value } => {
                write!(
                    f,
                    "weights contain a negative value at index {index}: {value}"
                )
            }
            WeightError::NoPositive => write!(f, "weights contain no positive value"),
            WeightError::IndexRange { len, max } => {
                write!(
                    f,
                    "{len} weights don't fit the alias index type (max index {max})"
                )
            }
            WeightError::InvalidSum { total } => {
                write!(f, "sum of weights is not positive and finite: {total}")
            }
            WeightError::Alloc(e) => write!(f, "table allocation failed: {e}"),
        }
    }
}

impl std::error::Error for WeightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeightError::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for WeightError {
    fn from(e: TryReserveError) -> Self {
        WeightError::Alloc(e)
    }
}
