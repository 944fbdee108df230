//! Dashboard summary and alert shapes.

use serde::{Deserialize, Serialize};

use crate::health::EquipmentStatus;

/// Status counts across the fleet.
///
/// `good + warning + critical == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
}

/// Equipment that needs attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub equipment_id: i64,
    pub code: String,
    pub name: String,
    pub status: EquipmentStatus,
    pub usage_hours: i64,
    pub maintenance_limit: i64,
}
