//! Order lifecycle transitions
//!
//! Every mutating transition follows the same discipline: begin a transaction
//! on the writer pool (which serializes writers), re-check every precondition
//! inside the transaction, apply the writes, recompute the denormalized total
//! from the line table, then commit. An error anywhere before the commit
//! drops the transaction and rolls everything back.

use sqlx::{FromRow, QueryBuilder, Sqlite, Transaction};
use tracing::info;

use super::LedgerError;
use crate::common::now_millis;
use crate::db::DbService;
use crate::db::models::{
    DiningTable, Food, Order, OrderDetail, OrderLineDetail, OrderStatus, TableStatus,
};

/// Order lifecycle state machine over the relational store
#[derive(Clone)]
pub struct OrderLedger {
    db: DbService,
}

/// Flat row for an order joined with its table
#[derive(FromRow)]
struct OrderRow {
    id: i64,
    status: OrderStatus,
    total: i64,
    created_at: i64,
    table_id: i64,
    number: i64,
    table_status: TableStatus,
}

impl OrderRow {
    fn into_detail(self, lines: Vec<OrderLineDetail>) -> OrderDetail {
        OrderDetail {
            id: self.id,
            status: self.status,
            total: self.total,
            created_at: self.created_at,
            table: DiningTable {
                id: self.table_id,
                number: self.number,
                status: self.table_status,
            },
            lines,
        }
    }
}

const ORDER_ROW_SQL: &str = "SELECT o.id, o.status, o.total, o.created_at, \
     t.id AS table_id, t.number, t.status AS table_status \
     FROM orders o JOIN tables t ON t.id = o.table_id";

impl OrderLedger {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    // ========== Transitions ==========

    /// Open an order against an available table.
    ///
    /// Inside one write transaction: the table must exist and be `available`,
    /// and no open order may exist for it. Creates the order with `total = 0`
    /// and flips the table to `occupied`; both writes commit atomically.
    pub async fn open_order(&self, table_id: i64) -> Result<OrderDetail, LedgerError> {
        let mut tx = self.db.writer.begin().await?;

        let table: Option<DiningTable> =
            sqlx::query_as("SELECT id, number, status FROM tables WHERE id = ?")
                .bind(table_id)
                .fetch_optional(&mut *tx)
                .await?;
        let table = table.ok_or(LedgerError::TableNotFound(table_id))?;

        if table.status != TableStatus::Available {
            return Err(LedgerError::TableNotAvailable(table.number));
        }

        // Defense-in-depth: the status check above should already exclude
        // this, and the partial unique index backstops it at the schema.
        let open_orders: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE table_id = ? AND status = 'open'",
        )
        .bind(table_id)
        .fetch_one(&mut *tx)
        .await?;
        if open_orders > 0 {
            return Err(LedgerError::OpenOrderExists(table.number));
        }

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (table_id, status, total, created_at) \
             VALUES (?, 'open', 0, ?) RETURNING id",
        )
        .bind(table_id)
        .bind(now_millis())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE tables SET status = 'occupied' WHERE id = ?")
            .bind(table_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(order_id, table_number = table.number, "Order opened");
        self.get_order(order_id).await
    }

    /// Append a line item to an open order.
    ///
    /// The unit price is snapshotted from the food's current price at this
    /// instant; later catalog edits never touch existing lines. The total is
    /// recomputed from all lines inside the same transaction, so interleaved
    /// writers cannot lose updates.
    pub async fn add_item(
        &self,
        order_id: i64,
        food_id: i64,
        quantity: i64,
    ) -> Result<OrderDetail, LedgerError> {
        if quantity < 1 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let mut tx = self.db.writer.begin().await?;

        let order = Self::fetch_order_for_update(&mut tx, order_id).await?;
        if order.status != OrderStatus::Open {
            return Err(LedgerError::OrderAlreadyClosed(order_id));
        }

        let food: Option<Food> = sqlx::query_as(
            "SELECT id, name, price, category, created_at FROM foods WHERE id = ?",
        )
        .bind(food_id)
        .fetch_optional(&mut *tx)
        .await?;
        let food = food.ok_or(LedgerError::FoodNotFound(food_id))?;

        sqlx::query(
            "INSERT INTO order_lines (order_id, food_id, quantity, unit_price) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(food_id)
        .bind(quantity)
        .bind(food.price)
        .execute(&mut *tx)
        .await?;

        let total = Self::recompute_total(&mut tx, order_id).await?;

        tx.commit().await?;

        info!(order_id, food_id, quantity, total, "Item added to order");
        self.get_order(order_id).await
    }

    /// Close an open order and release its table.
    ///
    /// Recomputes the total one final time, marks the order `closed`
    /// (terminal) and flips the table back to `available`.
    pub async fn close_order(&self, order_id: i64) -> Result<OrderDetail, LedgerError> {
        let mut tx = self.db.writer.begin().await?;

        let order = Self::fetch_order_for_update(&mut tx, order_id).await?;
        if order.status != OrderStatus::Open {
            return Err(LedgerError::OrderAlreadyClosed(order_id));
        }

        let total = Self::recompute_total(&mut tx, order_id).await?;

        sqlx::query("UPDATE orders SET status = 'closed', total = ? WHERE id = ?")
            .bind(total)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE tables SET status = 'available' WHERE id = ?")
            .bind(order.table_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(order_id, total, "Order closed");
        self.get_order(order_id).await
    }

    // ========== Reads ==========

    /// Load one order with its table and lines eager-loaded
    pub async fn get_order(&self, order_id: i64) -> Result<OrderDetail, LedgerError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{ORDER_ROW_SQL} WHERE o.id = ?"))
                .bind(order_id)
                .fetch_optional(&self.db.reader)
                .await?;
        let row = row.ok_or(LedgerError::OrderNotFound(order_id))?;

        let lines = self.fetch_lines(&[order_id]).await?;
        Ok(row.into_detail(lines))
    }

    /// One page of orders, newest first, each with table and lines
    pub async fn list_orders(
        &self,
        per_page: i64,
        offset: i64,
    ) -> Result<(Vec<OrderDetail>, i64), LedgerError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "{ORDER_ROW_SQL} ORDER BY o.created_at DESC, o.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.db.reader)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.db.reader)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let lines = self.fetch_lines(&ids).await?;

        let details = rows
            .into_iter()
            .map(|row| {
                let order_lines = lines
                    .iter()
                    .filter(|l| l.order_id == row.id)
                    .cloned()
                    .collect();
                row.into_detail(order_lines)
            })
            .collect();

        Ok((details, total))
    }

    /// Lines for a set of orders, food names resolved via LEFT JOIN so lines
    /// referencing a deleted food still load
    async fn fetch_lines(&self, order_ids: &[i64]) -> Result<Vec<OrderLineDetail>, LedgerError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT l.id, l.order_id, l.food_id, l.quantity, l.unit_price, \
             f.name AS food_name \
             FROM order_lines l LEFT JOIN foods f ON f.id = l.food_id \
             WHERE l.order_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in order_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY l.id");

        let lines = qb
            .build_query_as::<OrderLineDetail>()
            .fetch_all(&self.db.reader)
            .await?;
        Ok(lines)
    }

    // ========== Helpers ==========

    async fn fetch_order_for_update(
        tx: &mut Transaction<'_, Sqlite>,
        order_id: i64,
    ) -> Result<Order, LedgerError> {
        let order: Option<Order> = sqlx::query_as(
            "SELECT id, table_id, status, total, created_at FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_optional(&mut **tx)
        .await?;
        order.ok_or(LedgerError::OrderNotFound(order_id))
    }

    /// Full recomputation over all lines — never an incremental add, so the
    /// result is correct regardless of how writers interleaved.
    async fn recompute_total(
        tx: &mut Transaction<'_, Sqlite>,
        order_id: i64,
    ) -> Result<i64, LedgerError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity * unit_price), 0) FROM order_lines WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
            .bind(total)
            .bind(order_id)
            .execute(&mut **tx)
            .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::foods;

    async fn test_db() -> (DbService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();
        for number in 1..=5 {
            sqlx::query("INSERT INTO tables (number, status) VALUES (?, 'available')")
                .bind(number)
                .execute(&db.writer)
                .await
                .unwrap();
        }
        (db, dir)
    }

    async fn seed_food(db: &DbService, name: &str, price: i64) -> i64 {
        foods::create(&db.writer, name, price, None).await.unwrap().id
    }

    #[tokio::test]
    async fn test_open_order_success() {
        let (db, _dir) = test_db().await;
        let ledger = OrderLedger::new(db.clone());

        let order = ledger.open_order(1).await.unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.total, 0);
        assert_eq!(order.table.status, TableStatus::Occupied);
        assert!(order.lines.is_empty());
    }

    #[tokio::test]
    async fn test_open_order_missing_table() {
        let (db, _dir) = test_db().await;
        let ledger = OrderLedger::new(db);

        let err = ledger.open_order(99).await.unwrap_err();
        assert!(matches!(err, LedgerError::TableNotFound(99)));
    }

    #[tokio::test]
    async fn test_open_order_occupied_table_rejected() {
        let (db, _dir) = test_db().await;
        let ledger = OrderLedger::new(db.clone());

        ledger.open_order(2).await.unwrap();
        let err = ledger.open_order(2).await.unwrap_err();
        assert!(matches!(err, LedgerError::TableNotAvailable(2)));

        // The rejection must not have written anything
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&db.reader)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_opens_exactly_one_succeeds() {
        let (db, _dir) = test_db().await;
        let ledger = OrderLedger::new(db);

        let (a, b) = tokio::join!(ledger.open_order(3), ledger.open_order(3));
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    }

    #[tokio::test]
    async fn test_add_item_recomputes_total() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let rice = seed_food(&db, "Rice", 20000).await;
        let ledger = OrderLedger::new(db);

        let order = ledger.open_order(1).await.unwrap();
        let order = ledger.add_item(order.id, tea, 2).await.unwrap();
        assert_eq!(order.total, 16000);

        let order = ledger.add_item(order.id, rice, 1).await.unwrap();
        assert_eq!(order.total, 36000);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].unit_price, 8000);
        assert_eq!(order.lines[1].unit_price, 20000);
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_catalog_edit() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db.clone());

        let order = ledger.open_order(1).await.unwrap();
        ledger.add_item(order.id, tea, 1).await.unwrap();

        foods::update(&db.writer, tea, "Tea", 9500, None)
            .await
            .unwrap();

        let order = ledger.add_item(order.id, tea, 1).await.unwrap();
        assert_eq!(order.lines[0].unit_price, 8000);
        assert_eq!(order.lines[1].unit_price, 9500);
        assert_eq!(order.total, 17500);
    }

    #[tokio::test]
    async fn test_add_item_missing_food() {
        let (db, _dir) = test_db().await;
        let ledger = OrderLedger::new(db);

        let order = ledger.open_order(1).await.unwrap();
        let err = ledger.add_item(order.id, 404, 1).await.unwrap_err();
        assert!(matches!(err, LedgerError::FoodNotFound(404)));
    }

    #[tokio::test]
    async fn test_add_item_invalid_quantity() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db);

        let order = ledger.open_order(1).await.unwrap();
        let err = ledger.add_item(order.id, tea, 0).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(0)));
    }

    #[tokio::test]
    async fn test_add_item_to_closed_order_writes_nothing() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db.clone());

        let order = ledger.open_order(1).await.unwrap();
        ledger.add_item(order.id, tea, 2).await.unwrap();
        ledger.close_order(order.id).await.unwrap();

        let err = ledger.add_item(order.id, tea, 1).await.unwrap_err();
        assert!(matches!(err, LedgerError::OrderAlreadyClosed(_)));

        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_lines")
            .fetch_one(&db.reader)
            .await
            .unwrap();
        assert_eq!(lines, 1);
    }

    #[tokio::test]
    async fn test_close_releases_table_and_is_terminal() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db);

        let order = ledger.open_order(5).await.unwrap();
        ledger.add_item(order.id, tea, 2).await.unwrap();

        let closed = ledger.close_order(order.id).await.unwrap();
        assert_eq!(closed.status, OrderStatus::Closed);
        assert_eq!(closed.total, 16000);
        assert_eq!(closed.table.status, TableStatus::Available);

        let err = ledger.close_order(order.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::OrderAlreadyClosed(_)));

        // Table may be reopened afterwards
        let reopened = ledger.open_order(5).await.unwrap();
        assert_eq!(reopened.status, OrderStatus::Open);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_with_lines() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db);

        let first = ledger.open_order(1).await.unwrap();
        ledger.add_item(first.id, tea, 1).await.unwrap();
        let second = ledger.open_order(2).await.unwrap();

        let (orders, total) = ledger.list_orders(20, 0).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
        assert_eq!(orders[1].lines.len(), 1);
        assert_eq!(orders[1].lines[0].food_name.as_deref(), Some("Tea"));
    }

    #[tokio::test]
    async fn test_lines_tolerate_deleted_food() {
        let (db, _dir) = test_db().await;
        let tea = seed_food(&db, "Tea", 8000).await;
        let ledger = OrderLedger::new(db.clone());

        let order = ledger.open_order(1).await.unwrap();
        ledger.add_item(order.id, tea, 2).await.unwrap();
        foods::delete(&db.writer, tea).await.unwrap();

        let order = ledger.get_order(order.id).await.unwrap();
        assert_eq!(order.lines[0].food_name, None);
        assert_eq!(order.lines[0].unit_price, 8000);
        assert_eq!(order.total, 16000);
    }
}
