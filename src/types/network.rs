//! Organizations and networks as listed by the dashboard

use serde::{Deserialize, Serialize};

/// A dashboard organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// Product families a network can contain.
///
/// Only `Wireless` drives checks today; `Switch` is recognised so wired
/// networks can be reported as skipped rather than silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    Wireless,
    Switch,
    Appliance,
    Camera,
    CellularGateway,
    Sensor,
    SystemsManager,
    #[serde(other)]
    Other,
}

/// A network inside an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_types: Vec<ProductType>,
}

impl Network {
    pub fn has_product(&self, product: &ProductType) -> bool {
        self.product_types.contains(product)
    }

    /// Whether the wireless checks apply to this network.
    pub fn supports_wireless(&self) -> bool {
        self.has_product(&ProductType::Wireless)
    }
}
