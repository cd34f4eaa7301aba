//! Demo: seeds the house menu and walks one dine-in order from the till to the table.

use kitchen_orders::access::Role;
use kitchen_orders::catalog::demo_menu;
use kitchen_orders::clock::SystemClock;
use kitchen_orders::config::PosConfig;
use kitchen_orders::lifecycle::{setup_tracing, PosSystem};
use kitchen_orders::model::{LineOp, MenuItemId, PaymentMethod, Priority};
use kitchen_orders::status::OrderStatus;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = PosConfig::from_env();
    let system = PosSystem::new(&config, Arc::new(demo_menu()), Arc::new(SystemClock));

    let cashier = system.terminal(Role::Cashier);
    let kitchen = system.terminal(Role::Kitchen);
    let waiter = system.terminal(Role::Waiter);

    let span = tracing::info_span!("order_taking");
    let order_id = async {
        let mut draft = cashier.compose_order()?;
        draft.set_table("T12");
        draft.set_customer("John Smith");
        draft.set_priority(Priority::High);
        let burger = draft.add_line(MenuItemId(1), 2, &["Extra Cheese"], None)?;
        draft.set_line_notes(burger, "medium rare")?;
        draft.add_line(MenuItemId(4), 2, &["Vanilla Syrup"], Some("Large"))?;

        let totals = draft.draft().totals;
        info!(subtotal = %totals.subtotal, tax = %totals.tax, total = %totals.total, "Draft ready");
        cashier.submit(&mut draft).await
    }
    .instrument(span)
    .await?;

    let order = cashier.get_order(order_id).await?;
    let order = cashier
        .update_line_items(order_id, vec![LineOp::add(MenuItemId(6), 1)], order.version)
        .await?;
    info!(id = %order_id, total = %order.totals.total, "Dessert added");

    let order = kitchen
        .transition_status(order_id, OrderStatus::InProgress, order.version)
        .await?;

    let board = kitchen.kitchen_board().await?;
    info!(stats = ?board.stats, "Kitchen board");
    println!("{}", serde_json::to_string_pretty(&board.in_progress)?);

    // Waiters cannot mark food ready; the kitchen can.
    if let Err(e) = waiter
        .transition_status(order_id, OrderStatus::Ready, order.version)
        .await
    {
        warn!(error = %e, "Expected rejection");
    }
    let order = kitchen
        .transition_status(order_id, OrderStatus::Ready, order.version)
        .await?;
    let order = waiter
        .transition_status(order_id, OrderStatus::Served, order.version)
        .await?;
    let order = cashier
        .mark_paid(order_id, PaymentMethod::Card, order.version)
        .await?;
    info!(id = %order_id, status = %order.status, version = order.version, "Order closed");

    cashier.delete_order(order_id).await?;

    drop((cashier, kitchen, waiter));
    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
