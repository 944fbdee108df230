//! Equipment model and request bodies.

use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_positive, optional_text, required_text};
use crate::errors::AppError;
use crate::health::{classify, EquipmentStatus};

/// A piece of mining equipment as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    /// Unique business key, e.g. "CAT-797F-001"
    pub code: String,
    pub name: String,
    /// Free-text category such as "Haul Truck"
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub usage_hours: i64,
    /// Usage hours after which maintenance is due
    pub maintenance_limit: i64,
}

impl Equipment {
    /// Current health status, computed from usage figures.
    pub fn status(&self) -> EquipmentStatus {
        classify(self.usage_hours, self.maintenance_limit)
    }
}

/// Equipment list item with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentView {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub usage_hours: i64,
    pub maintenance_limit: i64,
    pub status: EquipmentStatus,
}

impl From<Equipment> for EquipmentView {
    fn from(eq: Equipment) -> Self {
        let status = eq.status();
        Self {
            id: eq.id,
            code: eq.code,
            name: eq.name,
            equipment_type: eq.equipment_type,
            usage_hours: eq.usage_hours,
            maintenance_limit: eq.maintenance_limit,
            status,
        }
    }
}

/// Request body for creating equipment.
///
/// Every field is optional at the serde level so that absence is reported
/// as a validation error naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEquipmentRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub usage_hours: Option<i64>,
    #[serde(default)]
    pub maintenance_limit: Option<i64>,
}

/// Validated equipment ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    pub code: String,
    pub name: String,
    pub equipment_type: String,
    pub usage_hours: i64,
    pub maintenance_limit: i64,
}

impl CreateEquipmentRequest {
    pub fn validate(self) -> Result<NewEquipment, AppError> {
        let code = required_text(self.code, "code")?;
        let name = required_text(self.name, "name")?;
        let equipment_type = required_text(self.equipment_type, "type")?;
        let maintenance_limit = self
            .maintenance_limit
            .ok_or_else(|| AppError::missing_field("maintenance_limit"))?;

        Ok(NewEquipment {
            code,
            name,
            equipment_type,
            usage_hours: check_non_negative(self.usage_hours.unwrap_or(0), "usage_hours")?,
            maintenance_limit: check_positive(maintenance_limit, "maintenance_limit")?,
        })
    }
}

/// Request body for a partial equipment update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEquipmentRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub usage_hours: Option<i64>,
    #[serde(default)]
    pub maintenance_limit: Option<i64>,
}

impl UpdateEquipmentRequest {
    /// Check provided fields; absent fields keep their stored values.
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            code: optional_text(self.code, "code")?,
            name: optional_text(self.name, "name")?,
            equipment_type: optional_text(self.equipment_type, "type")?,
            usage_hours: self
                .usage_hours
                .map(|h| check_non_negative(h, "usage_hours"))
                .transpose()?,
            maintenance_limit: self
                .maintenance_limit
                .map(|l| check_positive(l, "maintenance_limit"))
                .transpose()?,
        })
    }

    /// Overlay the provided fields onto an existing record.
    pub fn apply_to(&self, existing: Equipment) -> Equipment {
        Equipment {
            id: existing.id,
            code: self.code.clone().unwrap_or(existing.code),
            name: self.name.clone().unwrap_or(existing.name),
            equipment_type: self
                .equipment_type
                .clone()
                .unwrap_or(existing.equipment_type),
            usage_hours: self.usage_hours.unwrap_or(existing.usage_hours),
            maintenance_limit: self.maintenance_limit.unwrap_or(existing.maintenance_limit),
        }
    }
}

/// Request body for the dedicated usage-hours update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHoursRequest {
    #[serde(default)]
    pub usage_hours: Option<i64>,
}

impl UpdateHoursRequest {
    /// New usage figure, or `None` to leave it unchanged.
    pub fn validate(self) -> Result<Option<i64>, AppError> {
        self.usage_hours
            .map(|h| check_non_negative(h, "usage_hours"))
            .transpose()
    }
}

/// Equipment snapshot returned after an hours update.
#[derive(Debug, Clone, Serialize)]
pub struct HoursSnapshot {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub usage_hours: i64,
    pub status: EquipmentStatus,
}

impl From<Equipment> for HoursSnapshot {
    fn from(eq: Equipment) -> Self {
        let status = eq.status();
        Self {
            id: eq.id,
            code: eq.code,
            name: eq.name,
            usage_hours: eq.usage_hours,
            status,
        }
    }
}

/// Body returned by `POST /api/equipment/{id}/update-hours`.
#[derive(Debug, Clone, Serialize)]
pub struct HoursUpdatedResponse {
    pub message: String,
    pub equipment: HoursSnapshot,
}
