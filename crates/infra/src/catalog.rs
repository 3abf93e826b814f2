//! Catalog listing workflow.

use tracing::instrument;

use storefront_catalog::{PageInfo, PageRequest, PriceFilter, ProductPage};

use crate::store::{Store, StoreError};

/// Build the filtered, paginated catalog view.
///
/// The slice and the matching total come from a single storage read, so the
/// page metadata can never disagree with the page contents.
#[instrument(skip(store))]
pub async fn list_products<S: Store>(
    store: &S,
    request: &PageRequest,
    filter: &PriceFilter,
) -> Result<ProductPage, StoreError> {
    let (data, total) = store
        .count_and_slice(filter, request.offset(), request.limit())
        .await?;

    Ok(ProductPage {
        data,
        page: PageInfo::compute(request, total),
    })
}
