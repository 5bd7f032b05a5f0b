use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use utoipa::{IntoParams, ToSchema};

/// A page request, as it arrives from the dashboard.
///
/// Pages are 1-indexed; requesting a page past the end of the data is not an
/// error and yields an empty result set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct Paginated {
    /// The requested page, starting at 1
    #[serde(default = "default::page")]
    #[schema(value_type = u64, minimum = 1)]
    #[param(value_type = u64, minimum = 1)]
    pub page: NonZeroU64,
    /// The number of items per page
    #[serde(default = "default::page_size")]
    #[schema(value_type = u64, minimum = 1)]
    #[param(value_type = u64, minimum = 1)]
    pub page_size: NonZeroU64,
}

impl Paginated {
    /// First page with the given page size.
    ///
    /// Changing the page size invalidates the old page index, so this is the
    /// only way to apply a new size.
    pub fn with_page_size(page_size: NonZeroU64) -> Self {
        Self {
            page: default::page(),
            page_size,
        }
    }

    /// Zero-based offset of the first item of this page.
    ///
    /// Saturates instead of overflowing: an absurdly large page number is
    /// just a page past the end of any list, not an error.
    pub fn offset(&self) -> u64 {
        self.page
            .get()
            .saturating_sub(1)
            .saturating_mul(self.page_size.get())
    }
}

impl Default for Paginated {
    fn default() -> Self {
        Self {
            page: default::page(),
            page_size: default::page_size(),
        }
    }
}

mod default {
    use std::num::NonZeroU64;

    #[allow(clippy::unwrap_used)]
    pub(super) fn page() -> NonZeroU64 {
        NonZeroU64::new(1).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    pub(super) fn page_size() -> NonZeroU64 {
        NonZeroU64::new(25).unwrap()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResults<R> {
    pub results: Vec<R>,
    #[schema(value_type = u64, minimum = 1)]
    pub page: NonZeroU64,
    #[schema(value_type = u64, minimum = 1)]
    pub page_size: NonZeroU64,
    pub number_of_items: u64,
    pub number_of_pages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<Paginated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<Paginated>,
}

impl<R> PaginatedResults<R> {
    /// Assemble a page from the items of that page plus the total number of
    /// items the paged-through collection holds.
    pub fn new(paginated: Paginated, number_of_items: u64, results: Vec<R>) -> Self {
        let page_size = paginated.page_size.get();
        let number_of_pages = number_of_items.div_ceil(page_size);

        PaginatedResults {
            results,
            page: paginated.page,
            page_size: paginated.page_size,
            number_of_items,
            number_of_pages,
            previous_page: NonZeroU64::new(paginated.page.get() - 1).map(|page| Paginated {
                page,
                page_size: paginated.page_size,
            }),
            next_page: if paginated.page.get() < number_of_pages {
                NonZeroU64::new(paginated.page.get() + 1).map(|page| Paginated {
                    page,
                    page_size: paginated.page_size,
                })
            } else {
                None
            },
        }
    }
}
