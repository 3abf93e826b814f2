//! Paginated, price-filtered views over the catalog.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

use crate::product::Product;

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Typed price bounds for catalog queries.
///
/// Bounds are inclusive; an absent bound leaves that side open. They arrive
/// as floats from the request layer and are compared numerically against
/// integer unit prices. The storage adapter translates this into its native
/// query form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl PriceFilter {
    pub fn new(min_price: Option<f64>, max_price: Option<f64>) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// A filter with both sides open (matches every product).
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn matches(&self, price: u64) -> bool {
        let price = price as f64;
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

impl ValueObject for PriceFilter {}

/// Validated pagination window.
///
/// Input-constraint checking lives here, before any query logic runs:
/// `limit >= 1`, `offset >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u64,
    offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> DomainResult<Self> {
        if limit < 1 {
            return Err(DomainError::validation("limit must be >= 1"));
        }
        if offset < 0 {
            return Err(DomainError::validation("offset must be >= 0"));
        }
        Ok(Self {
            limit: limit as u64,
            offset: offset as u64,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Pagination metadata for one page of a filtered catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub limit: u64,
    /// `offset + limit`, present only when more rows remain beyond the page.
    pub next_offset: Option<u64>,
    /// `offset - limit`, present only when that value is non-negative.
    pub prev_offset: Option<u64>,
    /// Count of all products matching the active filter (not just this page).
    pub total: u64,
}

impl PageInfo {
    /// Derive paging metadata from the request window and the *filtered*
    /// total the slice was taken from.
    pub fn compute(request: &PageRequest, total: u64) -> Self {
        let end = request.offset + request.limit;
        Self {
            limit: request.limit,
            next_offset: (total > end).then_some(end),
            prev_offset: request.offset.checked_sub(request.limit),
            total,
        }
    }
}

/// One bounded slice of the filtered product set plus paging metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub page: PageInfo,
}
