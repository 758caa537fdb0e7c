use thiserror::Error;

/// Everything that can go wrong while turning a split request into an artifact.
///
/// The first eight variants are input problems and are detected before the
/// extractor is ever called. `ExtractionFailed` and `PackagingFailed` come from
/// collaborators and abort the call without returning partial output.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Page range expression is empty")]
    EmptyExpression,

    #[error("Invalid range format: {token}")]
    InvalidRangeFormat { token: String },

    #[error("Invalid page number: {value}")]
    InvalidNumber { value: String },

    #[error("Range start {start} cannot be greater than range end {end}")]
    DescendingRange { start: u32, end: u32 },

    #[error("Page {page} exceeds page count {total}")]
    RangeExceedsPageCount { page: u32, total: u32 },

    #[error("Removing these pages would leave nothing to keep")]
    NothingToKeep,

    #[error("Invalid window size {size} for a {total}-page document")]
    InvalidWindowSize { size: i64, total: u32 },

    #[error("Unknown split mode: {0}")]
    UnknownSplitMode(String),

    #[error("Failed to extract {target}: {source}")]
    ExtractionFailed {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to package {entry}: {source}")]
    PackagingFailed {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },
}

impl SplitError {
    /// True when the caller sent something unusable, false when a collaborator failed.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            SplitError::ExtractionFailed { .. } | SplitError::PackagingFailed { .. }
        )
    }

    pub(crate) fn extraction<E>(target: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SplitError::ExtractionFailed {
            target: target.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T, E = SplitError> = std::result::Result<T, E>;
