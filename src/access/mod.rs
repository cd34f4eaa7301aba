//! Role-based capability checks.
//!
//! The store and the state machine know nothing about staff roles. Every check happens
//! in [`crate::clients::StaffTerminal`] before a request reaches the store.

use crate::status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Cashier,
    Waiter,
    Kitchen,
    Inventory,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
            Role::Waiter => "waiter",
            Role::Kitchen => "kitchen",
            Role::Inventory => "inventory",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    BrowseMenu,
    ComposeOrder,
    EditOrder,
    ViewOrders,
    ViewKitchenQueue,
    StartCooking,
    PauseCooking,
    MarkReady,
    ServeOrder,
    CancelOrder,
    TakePayment,
    DeleteOrder,
}

impl Capability {
    pub const ALL: [Capability; 12] = [
        Capability::BrowseMenu,
        Capability::ComposeOrder,
        Capability::EditOrder,
        Capability::ViewOrders,
        Capability::ViewKitchenQueue,
        Capability::StartCooking,
        Capability::PauseCooking,
        Capability::MarkReady,
        Capability::ServeOrder,
        Capability::CancelOrder,
        Capability::TakePayment,
        Capability::DeleteOrder,
    ];

    /// The capability needed to move an order into `to`.
    ///
    /// The only way back into `pending` is pausing a cooking order, so the target
    /// status alone decides.
    pub fn for_transition(to: OrderStatus) -> Capability {
        match to {
            OrderStatus::Composing => Capability::EditOrder,
            OrderStatus::Pending => Capability::PauseCooking,
            OrderStatus::InProgress => Capability::StartCooking,
            OrderStatus::Ready => Capability::MarkReady,
            OrderStatus::Served => Capability::ServeOrder,
            OrderStatus::Cancelled => Capability::CancelOrder,
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Role {role} may not {capability}")]
pub struct AccessDenied {
    pub role: Role,
    pub capability: Capability,
}

/// Which roles hold which capabilities.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl Default for AccessPolicy {
    /// Front of house composes, edits, serves, cancels and takes payment. The kitchen
    /// drives cooking. Admin can do everything; inventory staff nothing order-related.
    fn default() -> Self {
        use Capability::*;

        let front_of_house = [
            BrowseMenu,
            ComposeOrder,
            EditOrder,
            ViewOrders,
            ServeOrder,
            CancelOrder,
            TakePayment,
        ];

        let mut policy = Self::empty();
        policy.grant_all(Role::Admin, Capability::ALL);
        policy.grant_all(Role::Cashier, front_of_house);
        policy.grant(Role::Cashier, DeleteOrder);
        policy.grant_all(Role::Waiter, front_of_house);
        policy.grant_all(
            Role::Kitchen,
            [ViewOrders, ViewKitchenQueue, StartCooking, PauseCooking, MarkReady],
        );
        policy
    }
}

impl AccessPolicy {
    /// A policy that grants nothing.
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    pub fn grant(&mut self, role: Role, capability: Capability) {
        self.grants.entry(role).or_default().insert(capability);
    }

    pub fn grant_all(&mut self, role: Role, capabilities: impl IntoIterator<Item = Capability>) {
        self.grants.entry(role).or_default().extend(capabilities);
    }

    pub fn revoke(&mut self, role: Role, capability: Capability) {
        if let Some(granted) = self.grants.get_mut(&role) {
            granted.remove(&capability);
        }
    }

    pub fn permits(&self, role: Role, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|granted| granted.contains(&capability))
    }

    pub fn authorize(&self, role: Role, capability: Capability) -> Result<(), AccessDenied> {
        if self.permits(role, capability) {
            Ok(())
        } else {
            Err(AccessDenied { role, capability })
        }
    }
}
