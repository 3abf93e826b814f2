use serde::Deserialize;

use storefront_catalog::{PriceFilter, ProductPage};
use storefront_core::ProductId;
use storefront_orders::{Address, Order, OrderItem};

// -------------------------
// Request DTOs
// -------------------------

/// Query parameters for `GET /products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

fn default_limit() -> i64 {
    storefront_catalog::DEFAULT_PAGE_LIMIT as i64
}

impl ListProductsQuery {
    pub fn price_filter(&self) -> PriceFilter {
        PriceFilter::new(self.min_price, self.max_price)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub bought_quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub city: String,
    pub country: String,
    pub zip_code: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub user_address: AddressRequest,
}

impl CreateOrderRequest {
    pub fn items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|i| OrderItem {
                product_id: ProductId::new(i.product_id),
                bought_quantity: i.bought_quantity,
            })
            .collect()
    }

    pub fn address(&self) -> Address {
        Address {
            city: self.user_address.city.clone(),
            country: self.user_address.country.clone(),
            zip_code: self.user_address.zip_code,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_page_to_json(page: ProductPage) -> serde_json::Value {
    serde_json::json!({
        "data": page.data.into_iter().map(|p| serde_json::json!({
            "id": p.id.value(),
            "name": p.name,
            "price": p.price,
            "quantity": p.quantity,
        })).collect::<Vec<_>>(),
        "page": {
            "limit": page.page.limit,
            "nextOffset": page.page.next_offset,
            "prevOffset": page.page.prev_offset,
            "total": page.page.total,
        }
    })
}

pub fn order_to_json(order: Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.to_string(),
        "createdOn": order.created_on.to_rfc3339(),
        "items": order.items.into_iter().map(|l| serde_json::json!({
            "productId": l.product_id.value(),
            "boughtQuantity": l.bought_quantity,
            "totalAmount": l.subtotal,
        })).collect::<Vec<_>>(),
        "userAddress": {
            "city": order.user_address.city,
            "country": order.user_address.country,
            "zipCode": order.user_address.zip_code,
        },
        "totalAmount": order.total_amount,
    })
}
