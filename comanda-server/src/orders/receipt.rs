//! Receipt projection
//!
//! Renders a closed order into a fixed-width text receipt. Purely derived:
//! slices in, text out, no state of its own.
//!
//! Lines are grouped by `(food_id, unit_price)` — repeated additions of the
//! same item at the same snapshotted price collapse into one printed row with
//! summed quantity, while additions at a different snapshot price (after a
//! catalog edit) stay separate rows.

use std::collections::BTreeMap;

use chrono::DateTime;
use comanda_receipt::{TicketBuilder, format_minor};

use super::LedgerError;
use crate::db::models::{OrderDetail, OrderLineDetail, OrderStatus};

/// 58mm paper, 32 characters
const RECEIPT_WIDTH: usize = 32;

/// One printed receipt row
#[derive(Debug, PartialEq, Eq)]
pub struct ReceiptGroup {
    pub label: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub subtotal: i64,
}

/// Group lines by (food_id, unit_price), summing quantities
pub fn group_lines(lines: &[OrderLineDetail]) -> Vec<ReceiptGroup> {
    let mut groups: BTreeMap<(i64, i64), ReceiptGroup> = BTreeMap::new();

    for line in lines {
        let entry = groups
            .entry((line.food_id, line.unit_price))
            .or_insert_with(|| ReceiptGroup {
                label: line
                    .food_name
                    .clone()
                    .unwrap_or_else(|| format!("Item #{}", line.food_id)),
                unit_price: line.unit_price,
                quantity: 0,
                subtotal: 0,
            });
        entry.quantity += line.quantity;
        entry.subtotal += line.quantity * line.unit_price;
    }

    groups.into_values().collect()
}

/// Render a closed order as receipt text
///
/// Fails with [`LedgerError::OrderNotClosed`] when the order is still open —
/// receipts exist for closed orders only.
pub fn render_receipt(order: &OrderDetail) -> Result<String, LedgerError> {
    if order.status != OrderStatus::Closed {
        return Err(LedgerError::OrderNotClosed(order.id));
    }

    let mut b = TicketBuilder::new(RECEIPT_WIDTH);

    b.center("COMANDA");
    b.center("* RECEIPT *");
    b.sep_double();
    b.columns(&format!("Order #{}", order.id), &format!("Table {}", order.table.number));
    if let Some(ts) = DateTime::from_timestamp_millis(order.created_at) {
        b.line(&ts.format("%Y-%m-%d %H:%M").to_string());
    }
    b.sep();

    for group in group_lines(&order.lines) {
        b.line(&group.label);
        b.columns(
            &format!("  {} x {}", group.quantity, format_minor(group.unit_price)),
            &format_minor(group.subtotal),
        );
    }

    b.sep_double();
    b.columns("TOTAL", &format_minor(order.total));
    b.blank();
    b.center("Thank you!");

    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{DiningTable, TableStatus};

    fn line(id: i64, food_id: i64, qty: i64, unit_price: i64, name: &str) -> OrderLineDetail {
        OrderLineDetail {
            id,
            order_id: 1,
            food_id,
            quantity: qty,
            unit_price,
            food_name: Some(name.to_string()),
        }
    }

    fn closed_order(lines: Vec<OrderLineDetail>, total: i64) -> OrderDetail {
        OrderDetail {
            id: 1,
            status: OrderStatus::Closed,
            total,
            created_at: 1_700_000_000_000,
            table: DiningTable {
                id: 5,
                number: 5,
                status: TableStatus::Available,
            },
            lines,
        }
    }

    #[test]
    fn test_open_order_refused() {
        let mut order = closed_order(vec![], 0);
        order.status = OrderStatus::Open;
        assert!(matches!(
            render_receipt(&order),
            Err(LedgerError::OrderNotClosed(1))
        ));
    }

    #[test]
    fn test_grouping_collapses_same_snapshot() {
        let lines = vec![
            line(1, 10, 1, 8000, "Tea"),
            line(2, 10, 1, 8000, "Tea"),
            line(3, 20, 1, 20000, "Rice"),
        ];
        let groups = group_lines(&lines);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Tea");
        assert_eq!(groups[0].quantity, 2);
        assert_eq!(groups[0].subtotal, 16000);
        assert_eq!(groups[1].label, "Rice");
        assert_eq!(groups[1].subtotal, 20000);
    }

    #[test]
    fn test_grouping_splits_on_price_change() {
        let lines = vec![
            line(1, 10, 1, 8000, "Tea"),
            line(2, 10, 1, 9500, "Tea"),
        ];
        let groups = group_lines(&lines);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].unit_price, 8000);
        assert_eq!(groups[1].unit_price, 9500);
    }

    #[test]
    fn test_render_scenario() {
        let lines = vec![
            line(1, 10, 2, 8000, "Tea"),
            line(2, 20, 1, 20000, "Rice"),
        ];
        let text = render_receipt(&closed_order(lines, 36000)).unwrap();

        assert!(text.contains("Order #1"));
        assert!(text.contains("Table 5"));
        assert!(text.contains("Tea"));
        assert!(text.contains("16,000"));
        assert!(text.contains("Rice"));
        assert!(text.contains("20,000"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("36,000"));
    }

    #[test]
    fn test_deleted_food_renders_fallback_label() {
        let mut l = line(1, 42, 1, 5000, "x");
        l.food_name = None;
        let groups = group_lines(&[l]);
        assert_eq!(groups[0].label, "Item #42");
    }
}
