//! Maintenance log model.

use serde::{Deserialize, Serialize};

use super::{check_non_negative, required_text};
use crate::errors::AppError;

/// Name shown for maintenance whose equipment no longer exists.
pub const UNKNOWN_EQUIPMENT_NAME: &str = "Unknown";

/// A maintenance log entry with the owning equipment's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: i64,
    pub equipment_id: i64,
    pub equipment_name: String,
    /// Service date, conventionally `YYYY-MM-DD`; stored as given
    pub service_date: String,
    pub maintenance_type: String,
    pub technician: String,
    pub description: String,
    /// Usage hours recorded at the time of service
    pub usage_at_service: i64,
}

/// Request body for logging maintenance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMaintenanceRequest {
    #[serde(default)]
    pub equipment_id: Option<i64>,
    #[serde(default)]
    pub service_date: Option<String>,
    #[serde(default)]
    pub maintenance_type: Option<String>,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage_at_service: Option<i64>,
}

/// Validated maintenance entry ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenance {
    pub equipment_id: i64,
    pub service_date: String,
    pub maintenance_type: String,
    pub technician: String,
    pub description: String,
    pub usage_at_service: i64,
}

impl CreateMaintenanceRequest {
    pub fn validate(self) -> Result<NewMaintenance, AppError> {
        let equipment_id = self
            .equipment_id
            .ok_or_else(|| AppError::missing_field("equipment_id"))?;
        let service_date = required_text(self.service_date, "service_date")?;
        let maintenance_type = required_text(self.maintenance_type, "maintenance_type")?;
        let technician = required_text(self.technician, "technician")?;
        let description = required_text(self.description, "description")?;
        let usage_at_service = self
            .usage_at_service
            .ok_or_else(|| AppError::missing_field("usage_at_service"))?;

        Ok(NewMaintenance {
            equipment_id,
            service_date,
            maintenance_type,
            technician,
            description,
            usage_at_service: check_non_negative(usage_at_service, "usage_at_service")?,
        })
    }
}
