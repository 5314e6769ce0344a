use thiserror::Error;

/// Problems found while reading or validating a launch dataset.
///
/// Any of these is fatal at startup; from File → Open they are shown in the
/// top bar and the previous dataset stays loaded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: empty launch site")]
    EmptySite { row: usize },

    #[error("row {row}: invalid payload mass {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: invalid class value '{value}' (expected 0 or 1)")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        row: usize,
        column: String,
        data_type: String,
    },
}

/// Errors raised by a single dashboard interaction.
///
/// These never touch the shared dataset; the affected chart is replaced with
/// an empty one and the message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("unknown launch site '{0}'")]
    InvalidSite(String),
}
