use crate::error::{Result, SplitError};

/// An ordered list of 1-based page numbers. Order is the output order and
/// duplicates are allowed.
pub type PageSelection = Vec<u32>;

/// One comma-separated token of a range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRange {
    Single(u32),
    Span { start: u32, end: u32 },
}

impl PageRange {
    /// Parse a single token like "5" or "1-5"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains('-') {
            let mut parts = s.split('-');
            let (start_str, end_str) = match (parts.next(), parts.next(), parts.next()) {
                (Some(start), Some(end), None)
                    if !start.trim().is_empty() && !end.trim().is_empty() =>
                {
                    (start, end)
                }
                _ => {
                    return Err(SplitError::InvalidRangeFormat {
                        token: s.to_string(),
                    })
                }
            };

            let start = parse_page_number(start_str)?;
            let end = parse_page_number(end_str)?;
            if start > end {
                return Err(SplitError::DescendingRange { start, end });
            }

            Ok(PageRange::Span { start, end })
        } else {
            parse_page_number(s).map(PageRange::Single)
        }
    }

    /// Largest page this token names
    pub fn max_page(&self) -> u32 {
        match *self {
            PageRange::Single(page) => page,
            PageRange::Span { end, .. } => end,
        }
    }

    /// Append this token's pages to `pages`, spans in ascending order
    pub fn expand_into(&self, pages: &mut PageSelection) {
        match *self {
            PageRange::Single(page) => pages.push(page),
            PageRange::Span { start, end } => pages.extend(start..=end),
        }
    }
}

fn parse_page_number(s: &str) -> Result<u32> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(SplitError::InvalidNumber {
            value: s.to_string(),
        }),
    }
}

/// Parse a comma-separated list of page ranges like "1,3,5-8"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>> {
    if s.trim().is_empty() {
        return Err(SplitError::EmptyExpression);
    }
    s.split(',').map(PageRange::parse).collect()
}

/// Expand a range expression into page numbers, keeping the order the tokens were written in.
#[allow(dead_code)]
pub fn parse(s: &str) -> Result<PageSelection> {
    parse_page_ranges(s).map(|ranges| expand(&ranges))
}

/// Like [`parse`], but fails with `RangeExceedsPageCount` when any token names
/// a page past `total_pages`. The check runs on token endpoints, before any
/// span is expanded.
pub fn parse_within(s: &str, total_pages: u32) -> Result<PageSelection> {
    let ranges = parse_page_ranges(s)?;
    if let Some(page) = ranges.iter().map(PageRange::max_page).max() {
        if page > total_pages {
            return Err(SplitError::RangeExceedsPageCount {
                page,
                total: total_pages,
            });
        }
    }
    Ok(expand(&ranges))
}

fn expand(ranges: &[PageRange]) -> PageSelection {
    let mut pages = Vec::new();
    for range in ranges {
        range.expand_into(&mut pages);
    }
    pages
}
