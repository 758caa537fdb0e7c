use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SplitError};
use crate::page_range::{self, PageSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Extract the pages named by a range expression into one PDF
    Ranges,
    /// Cut the document into consecutive windows of a fixed size
    FixedRange,
    /// Keep every page except the ones named by a range expression
    RemovePages,
}

impl SplitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Ranges => "ranges",
            SplitMode::FixedRange => "fixed_range",
            SplitMode::RemovePages => "remove_pages",
        }
    }
}

impl FromStr for SplitMode {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ranges" => Ok(SplitMode::Ranges),
            "fixed_range" => Ok(SplitMode::FixedRange),
            "remove_pages" => Ok(SplitMode::RemovePages),
            other => Err(SplitError::UnknownSplitMode(other.to_string())),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode-specific parameters. Only the field for the chosen mode is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitParams {
    pub ranges_expr: Option<String>,
    pub remove_expr: Option<String>,
    pub window_size: Option<i64>,
}

/// All pages in `1..=total_pages` that are not in `remove`, ascending.
pub fn complement(remove: &[u32], total_pages: u32) -> PageSelection {
    let remove: HashSet<u32> = remove.iter().copied().collect();
    (1..=total_pages).filter(|p| !remove.contains(p)).collect()
}

/// Split `1..=total_pages` into consecutive windows of `window_size` pages.
/// The last window is truncated, never padded.
pub fn partition(total_pages: u32, window_size: u32) -> Result<Vec<PageSelection>> {
    if window_size == 0 || total_pages == 0 {
        return Err(SplitError::InvalidWindowSize {
            size: window_size.into(),
            total: total_pages,
        });
    }

    Ok((1..=total_pages)
        .step_by(window_size as usize)
        .map(|start| {
            let end = start.saturating_add(window_size - 1).min(total_pages);
            (start..=end).collect()
        })
        .collect())
}

/// Turn a mode and its parameters into the page lists to extract, one per output.
///
/// Every validation happens here, so a successful plan never needs to be
/// abandoned halfway for bad input.
pub fn plan(
    mode: SplitMode,
    params: &SplitParams,
    total_pages: u32,
) -> Result<Vec<PageSelection>> {
    match mode {
        SplitMode::Ranges => {
            let expr = params.ranges_expr.as_deref().unwrap_or_default();
            Ok(vec![page_range::parse_within(expr, total_pages)?])
        }
        SplitMode::RemovePages => {
            let expr = params.remove_expr.as_deref().unwrap_or_default();
            let remove = page_range::parse_within(expr, total_pages)?;
            let keep = complement(&remove, total_pages);
            if keep.is_empty() {
                return Err(SplitError::NothingToKeep);
            }
            Ok(vec![keep])
        }
        SplitMode::FixedRange => {
            let size = params.window_size.unwrap_or(0);
            if size <= 0 {
                return Err(SplitError::InvalidWindowSize {
                    size,
                    total: total_pages,
                });
            }
            partition(total_pages, u32::try_from(size).unwrap_or(u32::MAX))
        }
    }
}
