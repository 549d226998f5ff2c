use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;

/// `?page=&per_page=`, both optional. Pages start at 1; out of range values are clamped
/// rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    page: Option<u32>,
    per_page: Option<u32>,
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    pub fn paginate<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let total = items.len();
        let per_page = self.per_page() as usize;
        let skip = (self.page() as usize - 1).saturating_mul(per_page);

        PaginatedResponse {
            data: items.into_iter().skip(skip).take(per_page).collect(),
            page: self.page() as usize,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

#[derive(Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}
