//! Equipment health classification.
//!
//! Status is derived from usage figures on every read and never stored.

use serde::{Deserialize, Serialize};

use crate::models::{Alert, DashboardSummary, Equipment};

/// Usage ratio at which equipment enters the warning band.
pub const WARNING_RATIO: f64 = 0.75;
/// Usage ratio at which equipment is due (or overdue) for maintenance.
pub const CRITICAL_RATIO: f64 = 1.0;

/// Health label derived from `usage_hours / maintenance_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Good,
    Warning,
    Critical,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Good => "Good",
            EquipmentStatus::Warning => "Warning",
            EquipmentStatus::Critical => "Critical",
        }
    }

    /// Whether this status should be surfaced as an alert.
    pub fn is_alert(&self) -> bool {
        !matches!(self, EquipmentStatus::Good)
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify equipment by the ratio of usage to its maintenance limit.
///
/// Lower band bounds are inclusive: a ratio of exactly 0.75 is `Warning` and
/// exactly 1.0 is `Critical`. Limits are validated positive on write; a
/// non-positive limit that reaches here anyway is reported as `Critical`.
pub fn classify(usage_hours: i64, maintenance_limit: i64) -> EquipmentStatus {
    if maintenance_limit <= 0 {
        return EquipmentStatus::Critical;
    }

    let ratio = usage_hours as f64 / maintenance_limit as f64;
    if ratio >= CRITICAL_RATIO {
        EquipmentStatus::Critical
    } else if ratio >= WARNING_RATIO {
        EquipmentStatus::Warning
    } else {
        EquipmentStatus::Good
    }
}

/// Tally statuses across the collection.
pub fn summarize(equipment: &[Equipment]) -> DashboardSummary {
    equipment.iter().fold(
        DashboardSummary {
            total: equipment.len(),
            ..DashboardSummary::default()
        },
        |mut summary, eq| {
            match eq.status() {
                EquipmentStatus::Good => summary.good += 1,
                EquipmentStatus::Warning => summary.warning += 1,
                EquipmentStatus::Critical => summary.critical += 1,
            }
            summary
        },
    )
}

/// Equipment with a non-`Good` status, in input order.
pub fn alerts(equipment: &[Equipment]) -> Vec<Alert> {
    equipment
        .iter()
        .filter_map(|eq| {
            let status = eq.status();
            status.is_alert().then(|| Alert {
                equipment_id: eq.id,
                code: eq.code.clone(),
                name: eq.name.clone(),
                status,
                usage_hours: eq.usage_hours,
                maintenance_limit: eq.maintenance_limit,
            })
        })
        .collect()
}
