// src/domain/pagination.rs
//! Page-number pagination with boundary clamping.
//!
//! A missing or non-integer page token selects the first page; an integer
//! below 1 or past the end selects the last page. Neither case is an error.
use std::num::IntErrorKind;

pub const DEFAULT_PAGE_SIZE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: u32,
}

/// The page a request resolved to, with the window to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelection {
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageSelection {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// `per_page` of zero is treated as one.
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of pages for `total` items; an empty collection still has one page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.per_page)).max(1)
    }

    pub fn select(&self, requested: Option<&str>, total: u64) -> PageSelection {
        let num_pages = self.num_pages(total);
        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some(token) => match token.parse::<i64>() {
                Ok(n) if n >= 1 && n.unsigned_abs() <= num_pages => n.unsigned_abs(),
                Ok(_) => num_pages,
                Err(err)
                    if matches!(
                        err.kind(),
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                    ) =>
                {
                    num_pages
                }
                Err(_) => 1,
            },
        };

        let per_page = u64::from(self.per_page);
        PageSelection {
            number,
            num_pages,
            total,
            offset: (number - 1) * per_page,
            limit: per_page,
        }
    }
}
