use std::sync::Arc;

use shared::domain::{ProductId, ProductRequest, ProductResponse};
use tracing::error;

use crate::{ProductApi, RemoteCallError};

/// Which submission the form will perform. The edit target lives inside the
/// `Edit` variant, so an edit submission always has an id to address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit { target: ProductId },
}

/// The product form: a single in-progress draft, the mode it will be
/// submitted under, and the product listing the form itself displays.
///
/// State transitions:
/// - `Create -> Edit` when an existing product is selected via
///   [`edit_product`](Self::edit_product), copying its fields (minus the id)
///   into the draft.
/// - `Edit -> Create` only through a successful [`submit`](Self::submit);
///   there is deliberately no standalone cancel-edit operation.
///
/// Methods take `&mut self`, so operations on one form never overlap and a
/// superseded request is cancelled by dropping its future.
pub struct ProductForm {
    api: Arc<dyn ProductApi>,
    draft: ProductRequest,
    mode: FormMode,
    products: Vec<ProductResponse>,
}

impl ProductForm {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            draft: ProductRequest::default(),
            mode: FormMode::Create,
            products: Vec::new(),
        }
    }

    pub fn draft(&self) -> &ProductRequest {
        &self.draft
    }

    /// Mutable access for field-by-field editing by the frontend. No
    /// client-side validation happens here; the backend is the source of
    /// truth for field constraints.
    pub fn draft_mut(&mut self) -> &mut ProductRequest {
        &mut self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// The listing displayed alongside the form. Refreshed on successful
    /// submission and by [`load_products`](Self::load_products).
    pub fn products(&self) -> &[ProductResponse] {
        &self.products
    }

    pub async fn load_products(&mut self) -> Result<(), RemoteCallError> {
        self.products = self.api.get_all_products().await?;
        Ok(())
    }

    /// Selects a persisted product for editing: the draft becomes a copy of
    /// its fields without the id, and the id is recorded as the edit target.
    /// Selecting while already editing simply retargets the form.
    pub fn edit_product(&mut self, product: &ProductResponse) {
        self.draft = product.to_request();
        self.mode = FormMode::Edit {
            target: product.id.clone(),
        };
    }

    /// Submits the draft: a creation in `Create` mode, a replacement of the
    /// recorded target in `Edit` mode.
    ///
    /// On success the full product list is re-fetched (strictly after the
    /// success signal, no local merge) and the form resets to an empty
    /// `Create` draft. On failure the draft and mode are left untouched and
    /// no reload is issued; the caller displays the returned error and the
    /// user may correct and resubmit.
    pub async fn submit(&mut self) -> Result<(), RemoteCallError> {
        let outcome = match &self.mode {
            FormMode::Create => self.api.add_product(&self.draft).await,
            FormMode::Edit { target } => self
                .api
                .update_product(target, &self.draft)
                .await
                .map(|_updated| ()),
        };

        if let Err(err) = outcome {
            error!(operation = err.operation(), error = %err, "submit failed; draft kept for retry");
            return Err(err);
        }

        // The submission stood, so the form resets even if the follow-up
        // reload fails; the reload error still surfaces to the caller.
        let reload = self.load_products().await;
        self.reset();
        reload
    }

    fn reset(&mut self) {
        self.draft = ProductRequest::default();
        self.mode = FormMode::Create;
    }
}
