//! Page state, page slicing and the page-button window.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows per page, or no paging at all.
///
/// Serialized as a positive number, or as `false` for [`PageSize::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr", into = "PageSizeRepr")]
pub enum PageSize {
    /// Return every row on one page.
    All,
    /// At most this many rows per page.
    Limit(usize),
}

impl PageSize {
    /// The row limit, if paging is on.
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Limit(n) => Some(n),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Limit(20)
    }
}

impl From<usize> for PageSize {
    fn from(n: usize) -> Self {
        Self::Limit(n)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Limit(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeRepr {
    Limit(usize),
    Flag(bool),
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = String;

    fn try_from(repr: PageSizeRepr) -> Result<Self, Self::Error> {
        match repr {
            PageSizeRepr::Limit(n) => Ok(Self::Limit(n)),
            PageSizeRepr::Flag(false) => Ok(Self::All),
            PageSizeRepr::Flag(true) => Err("page size must be a number or false".to_string()),
        }
    }
}

impl From<PageSize> for PageSizeRepr {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::All => Self::Flag(false),
            PageSize::Limit(n) => Self::Limit(n),
        }
    }
}

/// Current page index (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page index.
    pub index: usize,
    /// Rows per page.
    pub size: PageSize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            index: 1,
            size: PageSize::default(),
        }
    }
}

impl PageState {
    /// Page state at page 1 with the given size.
    pub fn new(size: PageSize) -> Self {
        Self { index: 1, size }
    }

    /// Index of the first row on the current page.
    pub fn offset(&self) -> usize {
        match self.size {
            PageSize::All => 0,
            PageSize::Limit(n) => self.index.saturating_sub(1).saturating_mul(n),
        }
    }

    /// The rows of the current page.
    pub fn slice<'a>(&self, rows: &'a [Value]) -> &'a [Value] {
        match self.size {
            PageSize::All => rows,
            PageSize::Limit(n) => {
                let start = self.offset().min(rows.len());
                let end = start.saturating_add(n).min(rows.len());
                &rows[start..end]
            }
        }
    }

    /// Number of pages for `total_count` rows under the current size.
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_pages(self.size, total_count)
    }
}

/// Number of pages needed for `total_count` rows.
///
/// Always at least 1: no paging, a zero page size, or a page size larger
/// than the row count all give a single page.
pub fn total_pages(size: PageSize, total_count: usize) -> usize {
    match size {
        PageSize::Limit(n) if n > 0 && n <= total_count => total_count.div_ceil(n),
        _ => 1,
    }
}

/// The page numbers to offer as buttons.
///
/// The window holds `min(button_count, total_pages)` consecutive pages,
/// centered on `current` where possible and shifted to stay inside
/// `1..=total_pages` otherwise. With an even count the extra slot goes to
/// the left of the current page.
pub fn page_window(current: usize, total_pages: usize, button_count: usize) -> Vec<usize> {
    let count = button_count.min(total_pages);
    if count == 0 {
        return Vec::new();
    }

    let left = count / 2;
    let right = count.div_ceil(2) - 1;

    let (start, end) = if current <= left {
        (1, count)
    } else if current.saturating_add(right) > total_pages {
        (total_pages - count + 1, total_pages)
    } else {
        (current - left, current + right)
    };

    (start..=end).collect()
}
