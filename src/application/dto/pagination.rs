use crate::domain::pagination::PageSelection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, selection: &PageSelection) -> Self {
        Self {
            items,
            page: selection.number,
            num_pages: selection.num_pages,
            total: selection.total,
            per_page: selection.limit,
            has_next: selection.has_next(),
            has_previous: selection.has_previous(),
        }
    }
}
