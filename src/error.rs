// src/error.rs

use thiserror::Error;

/// Faults that abort a whole extraction run. Per-field damage is absorbed
/// inline with defaults and short rows are skipped outright; these are the
/// cases where the markup has drifted too far from the expected shape to
/// trust any further output. `row` is the 1-based table row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("card table not found in document")]
    TableNotFound,

    #[error("row {row}: name cell carries no link")]
    MissingNameLink { row: usize },

    #[error("row {row}: ability marker with no following title node")]
    DanglingAbilityMarker { row: usize },

    #[error("row {row}: stage {stage:?} but no preceding card to evolve from")]
    NoPrecedingCard { row: usize, stage: String },
}
