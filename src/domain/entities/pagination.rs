use std::num::IntErrorKind;

use serde::Serialize;

/// The slice of a listing the store should return for a requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u32,
    pub num_pages: u32,
    pub per_page: u32,
}

impl PageWindow {
    /// Resolves a raw `?page=` value against the listing size.
    ///
    /// Missing or non-numeric values give page 1, `"last"` the last page, and
    /// numbers outside `1..=num_pages` are clamped to the nearest valid page.
    pub fn resolve(requested: Option<&str>, total: i64, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let num_pages = num_pages(total, per_page);

        let number = match requested.map(str::trim) {
            Some("last") => num_pages,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) => n.clamp(1, num_pages as i64) as u32,
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => num_pages,
                Err(_) => 1,
            },
            None => 1,
        };

        PageWindow { number, num_pages, per_page }
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.number.saturating_sub(1) as i64) * (self.per_page as i64)
    }
}

/// Number of pages for `total` items; an empty listing still has one (empty) page.
pub fn num_pages(total: i64, per_page: u32) -> u32 {
    let per_page = per_page.max(1) as i64;
    let total = total.max(0);
    (((total + per_page - 1) / per_page).max(1)) as u32
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total: i64) -> Self {
        Page {
            items,
            number: window.number,
            num_pages: window.num_pages,
            per_page: window.per_page,
            total,
            has_previous: window.number > 1,
            has_next: window.number < window.num_pages,
        }
    }
}
