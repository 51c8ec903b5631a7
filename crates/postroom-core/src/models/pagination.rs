use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of results plus the page bookkeeping needed to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub per_page: i64,
    pub last_page: i64,
    pub total: i64,
}

impl<T> Paginated<T> {
    /// Assemble a page. `last_page` is derived from `total` and `per_page`
    /// and never drops below 1, so an empty result still renders page 1 of 1.
    pub fn new(data: Vec<T>, total: i64, current_page: i64, per_page: i64) -> Self {
        let last_page = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        }
        .max(1);

        Paginated {
            data,
            current_page,
            per_page,
            last_page,
            total,
        }
    }

    /// Map the page's rows, keeping the pagination bookkeeping.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            total: self.total,
        }
    }
}
