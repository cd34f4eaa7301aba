//! Time-derived kitchen figures. Computed on every read, never stored.

use crate::model::Order;
use crate::status::OrderStatus;
use chrono::{DateTime, Utc};

/// Whole minutes since cooking started, floored. `0` if never started or if the
/// clock reads earlier than the start stamp.
pub fn elapsed_minutes(order: &Order, now: DateTime<Utc>) -> i64 {
    order
        .started_at
        .map_or(0, |started| (now - started).num_minutes().max(0))
}

/// Minutes left on the estimate. Negative once an in-progress order runs late.
pub fn remaining_minutes(order: &Order, now: DateTime<Utc>) -> i64 {
    let estimate = i64::from(order.estimated_prep_minutes);
    if order.status == OrderStatus::InProgress {
        estimate - elapsed_minutes(order, now)
    } else {
        estimate
    }
}

pub fn is_overdue(order: &Order, now: DateTime<Utc>) -> bool {
    order.status == OrderStatus::InProgress && remaining_minutes(order, now) < 0
}

/// Share of the estimate still left, as a whole percent in `0..=100`.
///
/// Overdue orders sit at `0`. An order with no estimate has nothing left to show.
pub fn remaining_percent(order: &Order, now: DateTime<Utc>) -> u8 {
    let estimate = i64::from(order.estimated_prep_minutes);
    if estimate == 0 {
        return 0;
    }
    let percent = (remaining_minutes(order, now) * 100 / estimate).clamp(0, 100);
    u8::try_from(percent).unwrap_or(0)
}
