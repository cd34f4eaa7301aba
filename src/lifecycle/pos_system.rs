use crate::access::{AccessPolicy, Role};
use crate::catalog::Catalog;
use crate::clients::{OrderClient, StaffTerminal};
use crate::clock::Clock;
use crate::config::PosConfig;
use crate::kitchen::KitchenScheduler;
use crate::order_actor::OrderContext;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// The running point-of-sale core.
///
/// Owns the order actor task and the clients that talk to it.
///
/// # Example
///
/// ```ignore
/// let system = PosSystem::new(&PosConfig::from_env(), Arc::new(demo_menu()), Arc::new(SystemClock));
///
/// let cashier = system.terminal(Role::Cashier);
/// let mut draft = cashier.compose_order()?;
/// draft.set_table("T3");
/// draft.add_line(MenuItemId(1), 2, &["Extra Cheese"], None)?;
/// let id = cashier.submit(&mut draft).await?;
///
/// drop(cashier);
/// system.shutdown().await?;
/// ```
pub struct PosSystem {
    pub order_client: OrderClient,
    pub kitchen: KitchenScheduler,
    context: OrderContext,
    policy: Arc<AccessPolicy>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Spawns the order actor with the default access policy. Must run inside a Tokio runtime.
    pub fn new(config: &PosConfig, catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(config, catalog, clock, AccessPolicy::default())
    }

    pub fn with_policy(
        config: &PosConfig,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
        policy: AccessPolicy,
    ) -> Self {
        let context = OrderContext::new(catalog, clock.clone(), config);

        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_capacity);
        let order_handle = tokio::spawn(order_actor.run(context.clone()));

        let kitchen = KitchenScheduler::new(order_client.clone(), clock);
        info!(
            tax_rate = %config.tax_rate,
            default_prep_minutes = config.default_prep_minutes,
            "POS system started"
        );

        Self {
            order_client,
            kitchen,
            context,
            policy: Arc::new(policy),
            handles: vec![order_handle],
        }
    }

    /// A terminal acting as `role`.
    pub fn terminal(&self, role: Role) -> StaffTerminal {
        StaffTerminal::new(
            role,
            self.policy.clone(),
            self.order_client.clone(),
            self.kitchen.clone(),
            self.context.clone(),
        )
    }

    pub fn context(&self) -> &OrderContext {
        &self.context
    }

    /// Drops the system's clients and waits for the actor to drain.
    ///
    /// The actor stops once *every* client clone is gone, so drop any terminals,
    /// schedulers or `OrderClient` clones handed out earlier before awaiting this.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.kitchen);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
