use chrono::{DateTime, TimeZone, Utc};
use kitchen_orders::access::{AccessPolicy, Capability, Role};
use kitchen_orders::catalog::{Catalog, InMemoryCatalog};
use kitchen_orders::clients::{OrderClient, StaffTerminal};
use kitchen_orders::clock::{Clock, ManualClock};
use kitchen_orders::composer::{LineEditor, OrderComposer};
use kitchen_orders::config::PosConfig;
use kitchen_orders::framework::{mock::MockClient, Versioned};
use kitchen_orders::kitchen::KitchenScheduler;
use kitchen_orders::model::{
    cents, Channel, LineItems, LineOp, MenuItem, MenuItemId, Modifier, Order, OrderCreate,
    OrderId, OrderLineItem, OrderTotals, Priority, ValidationError,
};
use kitchen_orders::order_actor::{OrderContext, OrderError};
use kitchen_orders::status::OrderStatus;
use std::sync::Arc;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// A two-item menu: soup is on, the special has sold out.
fn small_menu() -> Arc<dyn Catalog> {
    Arc::new(InMemoryCatalog::new([
        MenuItem::new(MenuItemId(1), "Tomato Soup", "soups", cents(650))
            .with_modifier(Modifier::new("Croutons", cents(75)))
            .with_prep_minutes(6),
        MenuItem::new(MenuItemId(2), "Chef's Special", "mains", cents(2400))
            .with_prep_minutes(25)
            .unavailable(),
    ]))
}

fn context(clock: Arc<ManualClock>) -> OrderContext {
    OrderContext::new(small_menu(), clock as Arc<dyn Clock>, &PosConfig::default())
}

fn soup_order(ctx: &OrderContext, id: u32, priority: Priority) -> Versioned<Order> {
    let mut composer = OrderComposer::new(ctx.clone());
    composer.set_channel(Channel::Takeaway);
    composer.set_priority(priority);
    composer.add_line(MenuItemId(1), 1, &[], None).unwrap();
    Versioned {
        version: 1,
        entity: Order::new(OrderId(id), composer.submit().unwrap()),
    }
}

/// Real order actor with an injected catalog and clock.
///
/// The store's rules (validation on create, locked lines, atomic batches) run for
/// real; only the menu and the time are fixed by the test.
#[tokio::test]
async fn test_order_actor_with_injected_catalog_and_clock() {
    let clock = Arc::new(ManualClock::new(noon()));
    let ctx = context(clock.clone());

    let (order_actor, order_client) = kitchen_orders::order_actor::new(8);
    let actor_handle = tokio::spawn(order_actor.run(ctx.clone()));

    let mut composer = OrderComposer::new(ctx.clone());
    composer.set_table("T2");
    composer
        .add_line(MenuItemId(1), 2, &["Croutons"], None)
        .unwrap();
    let id = composer.submit_to(&order_client).await.unwrap();

    let order = order_client.get_order(id).await.unwrap();
    assert_eq!(order.created_at, noon());
    assert_eq!(order.totals.subtotal, cents(1450));
    assert_eq!(order.estimated_prep_minutes, 6);

    // Sold-out items are refused and the order is left alone.
    let err = order_client
        .update_line_items(id, vec![LineOp::add(MenuItemId(2), 1)], 1)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Validation(ValidationError::UnavailableItem(MenuItemId(2)))
    );
    assert_eq!(order_client.get_order(id).await.unwrap().version, 1);

    // Items the menu has never heard of fail the same way.
    let err = order_client
        .update_line_items(id, vec![LineOp::add(MenuItemId(42), 1)], 1)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Catalog(_)));

    // Removing every line would leave an empty order.
    let err = order_client
        .update_line_items(
            id,
            vec![LineOp::RemoveLine {
                line_id: order.lines.as_slice()[0].id,
            }],
            1,
        )
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::Validation(ValidationError::EmptyOrder));

    clock.advance_minutes(4);
    let order = order_client
        .transition_status(id, OrderStatus::InProgress, 1)
        .await
        .unwrap();
    assert_eq!(order.started_at, Some(clock.now()));

    let err = order_client
        .transition_status(id, OrderStatus::Served, order.version)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::IllegalTransition {
            from: OrderStatus::InProgress,
            to: OrderStatus::Served
        }
    );

    drop(order_client);
    actor_handle.await.unwrap();
}

/// A payload built outside the composer cannot smuggle in its own prices.
#[tokio::test]
async fn test_store_reprices_submitted_orders() {
    let clock = Arc::new(ManualClock::new(noon()));
    let ctx = context(clock);

    let (order_actor, order_client) = kitchen_orders::order_actor::new(8);
    let actor_handle = tokio::spawn(order_actor.run(ctx.clone()));

    let mut lines = LineItems::default();
    LineEditor::new(ctx.catalog.as_ref(), &ctx.pricing)
        .add_line(&mut lines, MenuItemId(1), 2, &["Croutons"], None, None)
        .unwrap();
    lines.iter_mut().for_each(|line| line.line_total = cents(1));

    let mut payload = delivery_payload(lines);
    payload.estimated_prep_minutes = 0;
    payload.totals = OrderTotals {
        subtotal: cents(1),
        tax: cents(0),
        total: cents(1),
    };
    let id = order_client.create_order(payload).await.unwrap();

    let order = order_client.get_order(id).await.unwrap();
    assert_eq!(order.lines.as_slice()[0].line_total, cents(1450));
    assert_eq!(order.totals, ctx.pricing.totals(order.lines.as_slice()));
    assert_eq!(order.totals.tax, cents(116));
    assert_eq!(order.totals.total, cents(1566));
    assert_eq!(order.estimated_prep_minutes, 6);

    // Sold-out items are caught at the store too.
    let soup = order.lines.as_slice()[0].clone();
    let mut lines = LineItems::default();
    lines.push(OrderLineItem {
        menu_item_id: MenuItemId(2),
        name: "Chef's Special".to_string(),
        ..soup
    });
    let payload = delivery_payload(lines);
    assert_eq!(
        order_client.create_order(payload).await.unwrap_err(),
        OrderError::Validation(ValidationError::UnavailableItem(MenuItemId(2)))
    );

    drop(order_client);
    actor_handle.await.unwrap();
}

fn delivery_payload(lines: LineItems) -> OrderCreate {
    OrderCreate {
        created_at: noon(),
        channel: Channel::Delivery,
        table: None,
        customer: None,
        phone: None,
        notes: None,
        priority: Priority::Low,
        estimated_prep_minutes: 15,
        lines,
        totals: OrderTotals::default(),
    }
}

/// Kitchen scheduler against a mocked store.
///
/// The snapshot is handed back in submission order; the scheduler must sort it and
/// derive the timings from the injected clock.
#[tokio::test]
async fn test_kitchen_scheduler_with_mocked_store() {
    let clock = Arc::new(ManualClock::new(noon()));
    let ctx = context(clock.clone());

    let low = soup_order(&ctx, 1, Priority::Low);
    let high = soup_order(&ctx, 2, Priority::High);
    let mut cooking = soup_order(&ctx, 3, Priority::Medium);
    cooking.entity.status = OrderStatus::InProgress;
    cooking.entity.started_at = Some(noon());
    cooking.version = 2;

    let mut mock = MockClient::<Order>::new();
    mock.expect_list()
        .return_ok(vec![low.clone(), high.clone(), cooking.clone()]);
    mock.expect_list()
        .return_ok(vec![low.clone(), high.clone(), cooking.clone()]);

    let scheduler = KitchenScheduler::new(OrderClient::new(mock.client()), clock.clone());

    let pending = scheduler.queue_for(OrderStatus::Pending).await.unwrap();
    let ids: Vec<OrderId> = pending.iter().map(|ticket| ticket.order.id).collect();
    assert_eq!(ids, vec![OrderId(2), OrderId(1)]);
    assert_eq!(pending[0].remaining_minutes, 6);
    assert_eq!(pending[0].remaining_percent, 100);

    clock.advance_minutes(9);
    let board = scheduler.board().await.unwrap();
    assert_eq!(board.stats.pending, 2);
    assert_eq!(board.stats.in_progress, 1);
    assert_eq!(board.stats.overdue, 1);
    assert_eq!(board.in_progress[0].elapsed_minutes, 9);
    assert_eq!(board.in_progress[0].remaining_minutes, -3);
    assert_eq!(board.in_progress[0].remaining_percent, 0);

    // Non-kitchen statuses are rejected without a round trip.
    assert_eq!(
        scheduler.queue_for(OrderStatus::Cancelled).await.unwrap_err(),
        OrderError::NotKitchenStatus(OrderStatus::Cancelled)
    );

    mock.verify();
}

/// Staff terminal against a mocked store: permitted requests go through, denied ones
/// never leave the terminal.
#[tokio::test]
async fn test_terminal_checks_role_before_sending() {
    let clock = Arc::new(ManualClock::new(noon()));
    let ctx = context(clock.clone());

    let mut ready = soup_order(&ctx, 7, Priority::Medium);
    ready.entity.status = OrderStatus::Ready;
    ready.version = 3;

    let mut mock = MockClient::<Order>::new();
    mock.expect_action(OrderId(7)).return_ok(ready.clone());

    let orders = OrderClient::new(mock.client());
    let scheduler = KitchenScheduler::new(orders.clone(), clock.clone());
    let policy = Arc::new(AccessPolicy::default());
    let terminal = |role| {
        StaffTerminal::new(
            role,
            policy.clone(),
            orders.clone(),
            scheduler.clone(),
            ctx.clone(),
        )
    };

    let waiter = terminal(Role::Waiter);
    let err = waiter
        .transition_status(OrderId(7), OrderStatus::Ready, 2)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Forbidden {
            role: Role::Waiter,
            capability: Capability::MarkReady
        }
    );

    let kitchen = terminal(Role::Kitchen);
    let order = kitchen
        .transition_status(OrderId(7), OrderStatus::Ready, 2)
        .await
        .unwrap();
    assert_eq!(order, ready);

    assert!(kitchen.compose_order().is_err());
    assert!(terminal(Role::Inventory)
        .browse_menu(&Default::default())
        .is_err());
    let menu = waiter.browse_menu(&Default::default()).unwrap();
    assert_eq!(menu.len(), 1);

    mock.verify();
}
