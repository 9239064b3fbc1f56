use tracing::{error, info, Instrument};

use stock_ledger::adapters::products_from_legacy_json;
use stock_ledger::app_system::{setup_tracing, InventorySystem, SystemConfig};
use stock_ledger::domain::{ProductCreate, TransactionDraft};

const LEGACY_CATALOGUE: &str = r#"[
    {"id": 1, "code": "MON-24", "description": "24in monitor", "type": "Electronics",
     "supplierValue": "120.00", "stockQuantity": 0}
]"#;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = SystemConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Starting inventory system");
    let system = InventorySystem::new(config);

    // Seed the catalogue from a legacy listing plus a hand-written product
    let mut seeds: Vec<ProductCreate> = products_from_legacy_json(LEGACY_CATALOGUE)
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|p| ProductCreate {
            code: p.code,
            name: p.name,
            description: p.description,
            product_type: p.product_type,
            supplier_price: p.supplier_price,
            selling_price: if p.selling_price > 0.0 { p.selling_price } else { p.supplier_price * 1.5 },
            stock: p.stock,
        })
        .collect();
    seeds.push(ProductCreate::new("Desk lamp", "Furniture", 12.5, 25.0, 0));

    let mut product_ids = Vec::new();
    for seed in seeds {
        let id = system.product_client.create_product(seed).await.map_err(|e| e.to_string())?;
        info!(product_id = %id, "Product created");
        product_ids.push(id);
    }

    let span = tracing::info_span!("movements");
    async {
        for id in &product_ids {
            let drafts = [
                TransactionDraft::input(id.clone(), 10),
                TransactionDraft::output(id.clone(), 4, 30.0).with_notes("counter sale"),
                TransactionDraft::output(id.clone(), 20, 30.0),
            ];
            for draft in drafts {
                match system.transaction_client.record_movement(draft).await {
                    Ok(movement_id) => info!(movement_id = %movement_id, "Movement recorded"),
                    Err(e) => error!(error = %e, "Movement rejected"),
                }
            }
        }
    }
    .instrument(span)
    .await;

    let report = system.profit_report().await.map_err(|e| e.to_string())?;
    for row in &report {
        info!(
            product_id = %row.product.id,
            sold = row.total_sold,
            profit = row.total_profit,
            margin = row.profit_margin_percent,
            "Profit"
        );
    }

    let stats = system.stats_by_type().await.map_err(|e| e.to_string())?;
    for (product_type, s) in &stats {
        info!(%product_type, available = s.total_available, sold = s.total_sold, profit = s.total_profit, "Type stats");
    }

    let dashboard = system.dashboard().await.map_err(|e| e.to_string())?;
    info!(
        stock_value = dashboard.total_stock_value,
        top = dashboard.top_profit_products.len(),
        "Dashboard"
    );

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Application completed successfully");
    Ok(())
}
