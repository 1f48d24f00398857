//! Pagination utilities for admin tables
//!
//! The backend returns whole collections; tables page them on our side.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

fn default_page() -> u32 { 1 }
fn default_per_page() -> u32 { 20 }

impl Pagination {
    /// Clamp to sane defaults; returns `(zero_based_page, per_page)`.
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as usize, per_page as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: default_page(), per_page: default_per_page() } }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice one page out of a full collection. Pages past the end are empty.
pub fn paginate<T>(all: Vec<T>, opts: Pagination) -> Page<T> {
    let (idx, per_page) = opts.normalize();
    let total = all.len();
    let total_pages = total.div_ceil(per_page);
    let items = all.into_iter().skip(idx * per_page).take(per_page).collect();
    Page { items, page: idx as u32 + 1, per_page: per_page as u32, total, total_pages }
}
