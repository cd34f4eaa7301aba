//! Kitchen tickets and queue ordering.

use super::timing::{elapsed_minutes, is_overdue, remaining_minutes, remaining_percent};
use crate::framework::Versioned;
use crate::model::Order;
use crate::status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One order on the kitchen board, with its timings as of the read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenTicket {
    pub order: Versioned<Order>,
    pub elapsed_minutes: i64,
    pub remaining_minutes: i64,
    /// Cook-progress bar fill: how much of the estimate is left, `0..=100`.
    pub remaining_percent: u8,
    pub is_overdue: bool,
}

impl KitchenTicket {
    pub fn new(order: Versioned<Order>, now: DateTime<Utc>) -> Self {
        Self {
            elapsed_minutes: elapsed_minutes(&order, now),
            remaining_minutes: remaining_minutes(&order, now),
            remaining_percent: remaining_percent(&order, now),
            is_overdue: is_overdue(&order, now),
            order,
        }
    }
}

/// Header counts for the kitchen board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KitchenStats {
    pub pending: usize,
    pub in_progress: usize,
    pub ready: usize,
    pub overdue: usize,
}

/// All three queues plus stats, read from one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KitchenBoard {
    pub pending: Vec<KitchenTicket>,
    pub in_progress: Vec<KitchenTicket>,
    pub ready: Vec<KitchenTicket>,
    pub stats: KitchenStats,
}

/// Orders in `status`, highest priority first, then oldest first.
///
/// `snapshot` must be in submission order; the sort is stable so exact ties keep it.
pub fn build_queue(
    snapshot: &[Versioned<Order>],
    status: OrderStatus,
    now: DateTime<Utc>,
) -> Vec<KitchenTicket> {
    let mut queue: Vec<&Versioned<Order>> = snapshot
        .iter()
        .filter(|order| order.status == status)
        .collect();
    queue.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    queue
        .into_iter()
        .map(|order| KitchenTicket::new(order.clone(), now))
        .collect()
}

pub fn build_board(snapshot: &[Versioned<Order>], now: DateTime<Utc>) -> KitchenBoard {
    let pending = build_queue(snapshot, OrderStatus::Pending, now);
    let in_progress = build_queue(snapshot, OrderStatus::InProgress, now);
    let ready = build_queue(snapshot, OrderStatus::Ready, now);
    let stats = KitchenStats {
        pending: pending.len(),
        in_progress: in_progress.len(),
        ready: ready.len(),
        overdue: in_progress.iter().filter(|t| t.is_overdue).count(),
    };
    KitchenBoard {
        pending,
        in_progress,
        ready,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Channel, LineItems, OrderCreate, OrderId, OrderTotals, Priority};
    use chrono::{Duration, TimeZone};

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn order(id: u32, priority: Priority, created_at: DateTime<Utc>) -> Versioned<Order> {
        Versioned {
            version: 1,
            entity: Order::new(
                OrderId(id),
                OrderCreate {
                    created_at,
                    channel: Channel::Takeaway,
                    table: None,
                    customer: None,
                    phone: None,
                    notes: None,
                    priority,
                    estimated_prep_minutes: 15,
                    lines: LineItems::default(),
                    totals: OrderTotals::default(),
                },
            ),
        }
    }

    fn ids(queue: &[KitchenTicket]) -> Vec<u32> {
        queue.iter().map(|ticket| ticket.order.id.0).collect()
    }

    #[test]
    fn sorts_by_priority_then_age() {
        let snapshot = vec![
            order(1, Priority::Low, t(1)),
            order(2, Priority::High, t(2)),
            order(3, Priority::High, t(1)),
            order(4, Priority::Medium, t(3)),
        ];

        let queue = build_queue(&snapshot, OrderStatus::Pending, t(10));
        assert_eq!(ids(&queue), vec![3, 2, 4, 1]);
    }

    #[test]
    fn exact_ties_keep_submission_order() {
        let snapshot = vec![
            order(1, Priority::High, t(5)),
            order(2, Priority::High, t(5)),
            order(3, Priority::High, t(5)),
        ];
        let queue = build_queue(&snapshot, OrderStatus::Pending, t(10));
        assert_eq!(ids(&queue), vec![1, 2, 3]);
    }

    #[test]
    fn board_partitions_and_counts_overdue() {
        let mut cooking_late = order(2, Priority::Low, t(0));
        cooking_late.entity.status = OrderStatus::InProgress;
        cooking_late.entity.started_at = Some(t(0));

        let mut cooking = order(3, Priority::High, t(1));
        cooking.entity.status = OrderStatus::InProgress;
        cooking.entity.started_at = Some(t(15));

        let mut ready = order(4, Priority::Medium, t(2));
        ready.entity.status = OrderStatus::Ready;

        let mut served = order(5, Priority::Medium, t(2));
        served.entity.status = OrderStatus::Served;

        let snapshot = vec![order(1, Priority::Medium, t(3)), cooking_late, cooking, ready, served];
        let now = t(0) + Duration::minutes(20);
        let board = build_board(&snapshot, now);

        assert_eq!(ids(&board.pending), vec![1]);
        assert_eq!(ids(&board.in_progress), vec![3, 2]);
        assert_eq!(ids(&board.ready), vec![4]);
        assert_eq!(
            board.stats,
            KitchenStats {
                pending: 1,
                in_progress: 2,
                ready: 1,
                overdue: 1
            }
        );

        let late = &board.in_progress[1];
        assert_eq!(late.elapsed_minutes, 20);
        assert_eq!(late.remaining_minutes, -5);
        assert!(late.is_overdue);
    }
}
