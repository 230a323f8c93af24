use std::sync::Arc;

use shared::domain::ProductResponse;

use crate::{ProductApi, RemoteCallError};

/// The read-only product listing: fetches the full product set once at
/// initialization and holds it as display state. It never re-fetches on its
/// own; after a mutation the frontend calls [`refresh`](Self::refresh) on
/// behalf of the form.
pub struct ProductList {
    api: Arc<dyn ProductApi>,
    products: Vec<ProductResponse>,
}

impl ProductList {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            products: Vec::new(),
        }
    }

    pub async fn init(&mut self) -> Result<(), RemoteCallError> {
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), RemoteCallError> {
        self.products = self.api.get_all_products().await?;
        Ok(())
    }

    /// Products in backend response order.
    pub fn products(&self) -> &[ProductResponse] {
        &self.products
    }
}
