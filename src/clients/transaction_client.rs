use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::domain::{normalize_id, Transaction, TransactionDraft, TransactionPatch};
use crate::product_actor::ProductError;
use crate::transaction_actor::TransactionError;

/// Client for interacting with the Transaction actor.
///
/// Recording a movement is orchestrated here: the product is validated, the
/// movement stored, and the product's stock adjusted.
#[derive(Clone)]
pub struct TransactionClient {
    inner: ResourceClient<Transaction>,
    product_client: ProductClient,
}

impl TransactionClient {
    pub fn new(inner: ResourceClient<Transaction>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Records a stock movement and applies it to the product's stock.
    ///
    /// The movement is stored before stock changes and deleted again if the
    /// change is refused.
    ///
    /// # Errors
    /// - `ValidationError` for a zero quantity
    /// - `InvalidProduct` when the product does not exist
    /// - `InsufficientStock` when an output exceeds the available stock
    #[instrument(skip(self))]
    pub async fn record_movement(&self, draft: TransactionDraft) -> Result<String, TransactionError> {
        info!("Processing record_movement request (Client Side)");

        if draft.quantity == 0 {
            return Err(TransactionError::ValidationError("quantity must be positive".to_string()));
        }
        let product_id = normalize_id(&draft.product_id);
        let delta = draft.stock_delta();

        // Step 1: Validate product
        match self.product_client.get_product(product_id.clone()).await {
            Ok(Some(product)) => debug!(product_name = %product.name, "Product validation successful"),
            Ok(None) => {
                error!("Product not found");
                return Err(TransactionError::InvalidProduct(product_id));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(TransactionError::InvalidProduct(format!("Product validation failed: {}", e)));
            }
        }

        // Step 2: Store the movement
        let id = self.inner.create(draft).await.map_err(TransactionError::from)?;

        // Step 3: Apply the stock change, withdrawing the movement if it is refused
        let failure = match self.product_client.adjust_stock(product_id.clone(), delta).await {
            Ok(level) => {
                info!(transaction_id = %id, stock = level, "Movement recorded");
                return Ok(id);
            }
            Err(ProductError::InsufficientStock { requested, available }) => {
                warn!(requested, available, "Insufficient stock for movement");
                TransactionError::InsufficientStock { requested, available }
            }
            Err(ProductError::NotFound(_)) => {
                error!("Product removed before stock could be adjusted");
                TransactionError::InvalidProduct(product_id)
            }
            Err(e) => {
                error!(error = %e, "Stock adjustment failed");
                TransactionError::ActorCommunicationError(e.to_string())
            }
        };

        if let Err(e) = self.inner.delete(id.clone()).await {
            warn!(transaction_id = %id, error = %e, "Failed to withdraw movement");
        }
        Err(failure)
    }

    #[instrument(skip(self))]
    pub async fn update_transaction(&self, id: String, patch: TransactionPatch) -> Result<Transaction, TransactionError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(TransactionError::from)
    }

    /// Movements belonging to `product_id`, in recording order.
    #[instrument(skip(self))]
    pub async fn transactions_for_product(&self, product_id: String) -> Result<Vec<Transaction>, TransactionError> {
        let wanted = normalize_id(&product_id);
        let movements = self.list_transactions().await?;
        Ok(movements.into_iter().filter(|t| normalize_id(&t.product_id) == wanted).collect())
    }
}

impl_client_methods!(TransactionClient, Transaction, TransactionError, transaction);
