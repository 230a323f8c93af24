use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{ProductId, ProductRequest, ProductResponse};
use tracing::info;
use url::Url;

pub mod error;
mod form;
mod list;

pub use error::{InvalidServerUrl, RemoteCallError};
pub use form::{FormMode, ProductForm};
pub use list::ProductList;


/// Typed access to the product backend. One method per REST operation; each
/// call completes once or fails, with no retries and no local state behind
/// it. Views receive this as an `Arc<dyn ProductApi>` handle at
/// construction, so tests can substitute a stub backend.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Creates a product. The backend assigns the id and returns no payload.
    async fn add_product(&self, request: &ProductRequest) -> Result<(), RemoteCallError>;

    /// Fetches every product, in backend response order.
    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteCallError>;

    /// Replaces the record identified by `id` and returns the updated
    /// representation.
    async fn update_product(
        &self,
        id: &ProductId,
        request: &ProductRequest,
    ) -> Result<ProductResponse, RemoteCallError>;

    /// Fetches a single record. Not used by the form or list views, but part
    /// of the public contract.
    async fn get_product_by_id(&self, id: &ProductId) -> Result<ProductResponse, RemoteCallError>;
}

/// Stateless reqwest-backed implementation of [`ProductApi`], a pure
/// translation layer from typed calls to `/api/product` REST requests.
pub struct CatalogClient {
    http: Client,
    server_url: String,
}

impl CatalogClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, InvalidServerUrl> {
        Self::new_with_http(Client::new(), server_url)
    }

    /// Builds the client around a caller-configured `reqwest::Client`, e.g.
    /// one carrying a request timeout.
    pub fn new_with_http(
        http: Client,
        server_url: impl Into<String>,
    ) -> Result<Self, InvalidServerUrl> {
        let server_url = server_url.into();
        let parsed = Url::parse(&server_url).map_err(|err| InvalidServerUrl {
            url: server_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(InvalidServerUrl {
                url: server_url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/product", self.server_url)
    }

    fn item_url(&self, id: &ProductId) -> String {
        format!("{}/api/product/{id}", self.server_url)
    }
}

fn expect_success(
    operation: &'static str,
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<reqwest::Response, RemoteCallError> {
    let response = response.map_err(|source| RemoteCallError::transport(operation, source))?;
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteCallError::status(operation, status));
    }
    Ok(response)
}

#[async_trait]
impl ProductApi for CatalogClient {
    async fn add_product(&self, request: &ProductRequest) -> Result<(), RemoteCallError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(request)
            .send()
            .await;
        expect_success("add_product", response)?;
        info!(sku = %request.sku, name = %request.name, "product added");
        Ok(())
    }

    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteCallError> {
        let response = self.http.get(self.collection_url()).send().await;
        let products: Vec<ProductResponse> = expect_success("get_all_products", response)?
            .json()
            .await
            .map_err(|source| RemoteCallError::decode("get_all_products", source))?;
        Ok(products)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &ProductRequest,
    ) -> Result<ProductResponse, RemoteCallError> {
        let response = self.http.put(self.item_url(id)).json(request).send().await;
        let updated: ProductResponse = expect_success("update_product", response)?
            .json()
            .await
            .map_err(|source| RemoteCallError::decode("update_product", source))?;
        info!(id = %updated.id, name = %updated.product.name, "product updated");
        Ok(updated)
    }

    async fn get_product_by_id(&self, id: &ProductId) -> Result<ProductResponse, RemoteCallError> {
        let response = self.http.get(self.item_url(id)).send().await;
        expect_success("get_product_by_id", response)?
            .json()
            .await
            .map_err(|source| RemoteCallError::decode("get_product_by_id", source))
    }
}
