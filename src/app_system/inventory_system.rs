use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use super::config::SystemConfig;
use super::error::InventoryError;
use crate::actor_framework::ResourceActor;
use crate::analytics::{
    compute_inventory_stats_by_type, compute_product_profit, dashboard_stats, DashboardStats, InventoryStats,
    ProductProfit,
};
use crate::clients::{ProductClient, TransactionClient};
use crate::domain::{normalize_id, Product, Transaction};

fn counter_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The inventory application: a product actor, a movement actor, and the
/// reports computed over their contents.
pub struct InventorySystem {
    pub product_client: ProductClient,
    pub transaction_client: TransactionClient,
    config: SystemConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Starts both actors. Must be called from within a tokio runtime.
    pub fn new(config: SystemConfig) -> Self {
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(config.channel_buffer, counter_ids("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (transaction_actor, transaction_resource_client) =
            ResourceActor::<Transaction>::new(config.channel_buffer, counter_ids("movement"));
        let transaction_client = TransactionClient::new(transaction_resource_client, product_client.clone());
        let transaction_handle = tokio::spawn(transaction_actor.run());

        info!(channel_buffer = config.channel_buffer, "Inventory system started");
        Self {
            product_client,
            transaction_client,
            config,
            handles: vec![product_handle, transaction_handle],
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Deletes a product and every movement recorded against it.
    ///
    /// Returns the number of movements removed. Fails without touching
    /// anything while the product still has stock.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: String) -> Result<usize, InventoryError> {
        let id = normalize_id(&id);
        self.product_client.delete_product(id.clone()).await?;

        let movements = self.transaction_client.transactions_for_product(id.clone()).await?;
        let removed = movements.len();
        for movement in movements {
            self.transaction_client.delete_transaction(movement.id).await?;
        }
        info!(product_id = %id, removed, "Product removed");
        Ok(removed)
    }

    async fn snapshot(&self) -> Result<(Vec<Product>, Vec<Transaction>), InventoryError> {
        let (products, transactions) = tokio::try_join!(
            async { self.product_client.list_products().await.map_err(InventoryError::from) },
            async { self.transaction_client.list_transactions().await.map_err(InventoryError::from) },
        )?;
        Ok((products, transactions))
    }

    #[instrument(skip(self))]
    pub async fn profit_report(&self) -> Result<Vec<ProductProfit>, InventoryError> {
        let (products, transactions) = self.snapshot().await?;
        Ok(compute_product_profit(&products, &transactions))
    }

    #[instrument(skip(self))]
    pub async fn stats_by_type(&self) -> Result<HashMap<String, InventoryStats>, InventoryError> {
        let (products, transactions) = self.snapshot().await?;
        Ok(compute_inventory_stats_by_type(&products, &transactions))
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, InventoryError> {
        let (products, transactions) = self.snapshot().await?;
        Ok(dashboard_stats(&products, &transactions, self.config.top_products))
    }

    pub async fn shutdown(self) -> Result<(), InventoryError> {
        info!("Shutting down system...");
        // Actors stop once every client is gone.
        drop(self.transaction_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(InventoryError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
