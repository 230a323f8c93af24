use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned product identifier. Opaque to the client and immutable
/// once a record exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product as submitted to the backend. Carries no identity; it only
/// becomes addressable once the backend has persisted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub status: bool,
}

impl Default for ProductRequest {
    /// The empty form draft. New products start out active.
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            description: String::new(),
            price: 0.0,
            status: true,
        }
    }
}

/// A persisted product: request fields plus the backend-assigned id. The
/// wire representation stays flat (`{"id": ..., "sku": ..., ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    #[serde(flatten)]
    pub product: ProductRequest,
}

impl ProductResponse {
    /// The record's fields without its identity, as needed when a persisted
    /// product is copied back into an editable draft.
    pub fn to_request(&self) -> ProductRequest {
        self.product.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_defaults_to_active_status() {
        let draft = ProductRequest::default();
        assert_eq!(draft.sku, "");
        assert_eq!(draft.name, "");
        assert_eq!(draft.description, "");
        assert_eq!(draft.price, 0.0);
        assert!(draft.status);
    }

    #[test]
    fn product_response_wire_format_is_flat() {
        let response = ProductResponse {
            id: ProductId::new("42"),
            product: ProductRequest {
                sku: "A1".into(),
                name: "Widget".into(),
                description: "d".into(),
                price: 9.99,
                status: true,
            },
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "sku": "A1",
                "name": "Widget",
                "description": "d",
                "price": 9.99,
                "status": true,
            })
        );

        let parsed: ProductResponse = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, response);
    }

    #[test]
    fn to_request_drops_the_id() {
        let response = ProductResponse {
            id: ProductId::new("42"),
            product: ProductRequest {
                sku: "A1".into(),
                name: "Widget".into(),
                description: "d".into(),
                price: 9.99,
                status: false,
            },
        };

        let request = response.to_request();
        assert_eq!(request, response.product);
    }
}
