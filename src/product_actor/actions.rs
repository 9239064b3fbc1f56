/// Custom actions for Product entities.
///
/// These actions represent stock operations that can be performed on a
/// product beyond standard CRUD operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Adds a signed amount to the stock level.
    ///
    /// # Errors
    /// Fails, leaving stock untouched, if a negative amount exceeds the
    /// available stock.
    AdjustStock(i64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Result from CheckStock action - returns the current stock level
    StockLevel(u32),
    /// Result from AdjustStock action - returns the new stock level
    Adjusted(u32),
}
