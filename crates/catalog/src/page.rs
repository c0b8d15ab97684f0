use serde::{Deserialize, Serialize};

use rescata_products::ClassifiedProduct;

/// Requested page. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Page size with a floor of one.
    pub fn effective_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// `ceil(total / size)`.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.effective_size())
    }

    /// Requested page clamped into `1..=page_count` (1 when there are no pages).
    pub fn clamp(&self, total: usize) -> usize {
        let last = self.page_count(total).max(1) as i64;
        self.page.clamp(1, last) as usize
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<ClassifiedProduct<'a>>,
    /// Page actually served after clamping.
    pub page: usize,
    pub page_size: usize,
    /// Items that passed the filter, across all pages.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a> CatalogPage<'a> {
    pub(crate) fn slice(items: Vec<ClassifiedProduct<'a>>, request: &PageRequest) -> Self {
        let total_items = items.len();
        let page_size = request.effective_size();
        let page = request.clamp(total_items);
        let start = (page - 1) * page_size;
        let items = items.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages: request.page_count(total_items),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
