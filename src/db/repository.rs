//! Database repository for CRUD operations.
//!
//! Every write runs inside a single `BEGIN IMMEDIATE` transaction so a
//! rejected request leaves no partial state behind, and concurrent writers
//! queue on the busy timeout instead of failing on a stale WAL snapshot.

use std::collections::HashMap;

use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use super::{SAMPLE_EQUIPMENT, SAMPLE_MAINTENANCE};
use crate::errors::AppError;
use crate::models::{
    Equipment, Maintenance, NewEquipment, NewMaintenance, UpdateEquipmentRequest,
    UNKNOWN_EQUIPMENT_NAME,
};

const EQUIPMENT_COLUMNS: &str =
    "id, code, name, equipment_type, usage_hours, maintenance_limit";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a transaction holding the write lock from its first statement.
    ///
    /// A deferred transaction that reads before writing cannot be upgraded
    /// once another connection has committed (SQLITE_BUSY_SNAPSHOT).
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    // ==================== EQUIPMENT OPERATIONS ====================

    /// List all equipment in insertion order.
    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM equipment ORDER BY id",
            EQUIPMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(equipment_from_row).collect())
    }

    /// Get equipment by ID.
    pub async fn get_equipment(&self, id: i64) -> Result<Option<Equipment>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM equipment WHERE id = ?",
            EQUIPMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(equipment_from_row))
    }

    /// Number of stored equipment records.
    pub async fn count_equipment(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }

    /// Create new equipment, rejecting a duplicate code.
    pub async fn create_equipment(&self, new: &NewEquipment) -> Result<Equipment, AppError> {
        let mut tx = self.begin_write().await?;

        ensure_code_available(&mut tx, &new.code, None).await?;

        let id = sqlx::query(
            "INSERT INTO equipment (code, name, equipment_type, usage_hours, maintenance_limit) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.code)
        .bind(&new.name)
        .bind(&new.equipment_type)
        .bind(new.usage_hours)
        .bind(new.maintenance_limit)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        tracing::info!(equipment_id = id, code = %new.code, "Equipment created");

        Ok(Equipment {
            id,
            code: new.code.clone(),
            name: new.name.clone(),
            equipment_type: new.equipment_type.clone(),
            usage_hours: new.usage_hours,
            maintenance_limit: new.maintenance_limit,
        })
    }

    /// Apply a partial update to equipment.
    pub async fn update_equipment(
        &self,
        id: i64,
        request: &UpdateEquipmentRequest,
    ) -> Result<Equipment, AppError> {
        let mut tx = self.begin_write().await?;

        let existing = fetch_equipment(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::equipment_not_found(id))?;

        if let Some(code) = &request.code {
            if *code != existing.code {
                ensure_code_available(&mut tx, code, Some(id)).await?;
            }
        }

        let updated = request.apply_to(existing);

        sqlx::query(
            "UPDATE equipment SET code = ?, name = ?, equipment_type = ?, usage_hours = ?, maintenance_limit = ? WHERE id = ?",
        )
        .bind(&updated.code)
        .bind(&updated.name)
        .bind(&updated.equipment_type)
        .bind(updated.usage_hours)
        .bind(updated.maintenance_limit)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(equipment_id = id, "Equipment updated");

        Ok(updated)
    }

    /// Set usage hours only; `None` leaves the stored value untouched.
    pub async fn update_usage_hours(
        &self,
        id: i64,
        usage_hours: Option<i64>,
    ) -> Result<Equipment, AppError> {
        let mut tx = self.begin_write().await?;

        let mut equipment = fetch_equipment(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::equipment_not_found(id))?;

        if let Some(hours) = usage_hours {
            sqlx::query("UPDATE equipment SET usage_hours = ? WHERE id = ?")
                .bind(hours)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            equipment.usage_hours = hours;
        }

        tx.commit().await?;
        tracing::info!(
            equipment_id = id,
            usage_hours = equipment.usage_hours,
            "Usage hours updated"
        );

        Ok(equipment)
    }

    /// Delete equipment. Its maintenance history is kept.
    pub async fn delete_equipment(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::equipment_not_found(id));
        }

        tracing::info!(equipment_id = id, "Equipment deleted");
        Ok(())
    }

    // ==================== MAINTENANCE OPERATIONS ====================

    /// List all maintenance with equipment names resolved.
    pub async fn list_maintenance(&self) -> Result<Vec<Maintenance>, AppError> {
        let rows = sqlx::query(
            r#"SELECT m.id, m.equipment_id, e.name AS equipment_name, m.service_date,
                      m.maintenance_type, m.technician, m.description, m.usage_at_service
               FROM maintenance m
               LEFT JOIN equipment e ON e.id = m.equipment_id
               ORDER BY m.id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(maintenance_from_row).collect())
    }

    /// Log maintenance against existing equipment and return the new id.
    pub async fn create_maintenance(&self, new: &NewMaintenance) -> Result<i64, AppError> {
        let mut tx = self.begin_write().await?;

        if fetch_equipment(&mut tx, new.equipment_id).await?.is_none() {
            tracing::warn!(
                equipment_id = new.equipment_id,
                "Rejected maintenance for unknown equipment"
            );
            return Err(AppError::equipment_not_found(new.equipment_id));
        }

        let id = insert_maintenance(&mut tx, new).await?;

        tx.commit().await?;
        tracing::info!(
            maintenance_id = id,
            equipment_id = new.equipment_id,
            "Maintenance recorded"
        );

        Ok(id)
    }

    // ==================== SEEDING ====================

    /// Insert the sample fleet. Refused once any equipment exists.
    pub async fn seed_sample_data(&self) -> Result<(), AppError> {
        let mut tx = self.begin_write().await?;

        let existing: i64 = sqlx::query("SELECT COUNT(*) AS n FROM equipment")
            .fetch_one(&mut *tx)
            .await?
            .get("n");
        if existing > 0 {
            return Err(AppError::BadRequest("Data already exists".to_string()));
        }

        let mut ids_by_code = HashMap::with_capacity(SAMPLE_EQUIPMENT.len());
        for sample in SAMPLE_EQUIPMENT {
            let id = sqlx::query(
                "INSERT INTO equipment (code, name, equipment_type, usage_hours, maintenance_limit) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(sample.code)
            .bind(sample.name)
            .bind(sample.equipment_type)
            .bind(sample.usage_hours)
            .bind(sample.maintenance_limit)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
            ids_by_code.insert(sample.code, id);
        }

        for sample in SAMPLE_MAINTENANCE {
            let equipment_id = *ids_by_code.get(sample.equipment_code).ok_or_else(|| {
                AppError::Internal(format!(
                    "Sample maintenance references unknown code {}",
                    sample.equipment_code
                ))
            })?;

            insert_maintenance(
                &mut tx,
                &NewMaintenance {
                    equipment_id,
                    service_date: sample.service_date.to_string(),
                    maintenance_type: sample.maintenance_type.to_string(),
                    technician: sample.technician.to_string(),
                    description: sample.description.to_string(),
                    usage_at_service: sample.usage_at_service,
                },
            )
            .await?;
        }

        tx.commit().await?;
        tracing::info!(
            equipment = SAMPLE_EQUIPMENT.len(),
            maintenance = SAMPLE_MAINTENANCE.len(),
            "Sample data inserted"
        );

        Ok(())
    }
}

// Helpers shared by transactional operations

async fn fetch_equipment(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<Equipment>, AppError> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM equipment WHERE id = ?",
        EQUIPMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.as_ref().map(equipment_from_row))
}

async fn ensure_code_available(
    tx: &mut Transaction<'_, Sqlite>,
    code: &str,
    except_id: Option<i64>,
) -> Result<(), AppError> {
    let taken = sqlx::query("SELECT id FROM equipment WHERE code = ? AND id != ?")
        .bind(code)
        .bind(except_id.unwrap_or(-1))
        .fetch_optional(&mut **tx)
        .await?
        .is_some();

    if taken {
        tracing::debug!(code, "Duplicate equipment code");
        return Err(AppError::Conflict(format!(
            "Equipment code {} already exists",
            code
        )));
    }
    Ok(())
}

async fn insert_maintenance(
    tx: &mut Transaction<'_, Sqlite>,
    new: &NewMaintenance,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO maintenance (equipment_id, service_date, maintenance_type, technician, description, usage_at_service) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(new.equipment_id)
    .bind(&new.service_date)
    .bind(&new.maintenance_type)
    .bind(&new.technician)
    .bind(&new.description)
    .bind(new.usage_at_service)
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

// Helper functions for row conversion

fn equipment_from_row(row: &sqlx::sqlite::SqliteRow) -> Equipment {
    Equipment {
        id: row.get("id"),
        code: row.get("code"),
        name: row.get("name"),
        equipment_type: row.get("equipment_type"),
        usage_hours: row.get("usage_hours"),
        maintenance_limit: row.get("maintenance_limit"),
    }
}

fn maintenance_from_row(row: &sqlx::sqlite::SqliteRow) -> Maintenance {
    let equipment_name: Option<String> = row.get("equipment_name");
    Maintenance {
        id: row.get("id"),
        equipment_id: row.get("equipment_id"),
        equipment_name: equipment_name.unwrap_or_else(|| UNKNOWN_EQUIPMENT_NAME.to_string()),
        service_date: row.get("service_date"),
        maintenance_type: row.get("maintenance_type"),
        technician: row.get("technician"),
        description: row.get("description"),
        usage_at_service: row.get("usage_at_service"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_equipment(code: &str) -> NewEquipment {
        NewEquipment {
            code: code.to_string(),
            name: "Caterpillar 797F".to_string(),
            equipment_type: "Haul Truck".to_string(),
            usage_hours: 4200,
            maintenance_limit: 5000,
        }
    }

    fn new_maintenance(equipment_id: i64) -> NewMaintenance {
        NewMaintenance {
            equipment_id,
            service_date: "2024-03-10".to_string(),
            maintenance_type: "Brake Inspection".to_string(),
            technician: "Maria Garcia".to_string(),
            description: "Brake system check".to_string(),
            usage_at_service: 4000,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (repo, _dir) = test_repo().await;

        let created = repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();
        let fetched = repo.get_equipment(created.id).await.unwrap().unwrap();

        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let (repo, _dir) = test_repo().await;

        repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();
        let err = repo
            .create_equipment(&new_equipment("CAT-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.count_equipment().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_code_conflicts() {
        let (repo, _dir) = test_repo().await;

        repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();
        let second = repo.create_equipment(&new_equipment("CAT-2")).await.unwrap();

        let request = UpdateEquipmentRequest {
            code: Some("CAT-1".to_string()),
            ..Default::default()
        };
        let err = repo.update_equipment(second.id, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Keeping its own code is not a conflict
        let request = UpdateEquipmentRequest {
            code: Some("CAT-2".to_string()),
            usage_hours: Some(10),
            ..Default::default()
        };
        let updated = repo.update_equipment(second.id, &request).await.unwrap();
        assert_eq!(updated.usage_hours, 10);
    }

    #[tokio::test]
    async fn test_update_missing_equipment() {
        let (repo, _dir) = test_repo().await;

        let err = repo
            .update_equipment(42, &UpdateEquipmentRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo.update_usage_hours(42, Some(1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_usage_hours() {
        let (repo, _dir) = test_repo().await;
        let created = repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();

        let unchanged = repo.update_usage_hours(created.id, None).await.unwrap();
        assert_eq!(unchanged.usage_hours, 4200);

        let updated = repo.update_usage_hours(created.id, Some(5100)).await.unwrap();
        assert_eq!(updated.usage_hours, 5100);
        assert_eq!(
            repo.get_equipment(created.id)
                .await
                .unwrap()
                .unwrap()
                .usage_hours,
            5100
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (repo, _dir) = test_repo().await;
        let err = repo.delete_equipment(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_maintenance_requires_existing_equipment() {
        let (repo, _dir) = test_repo().await;

        let err = repo
            .create_maintenance(&new_maintenance(7))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.list_maintenance().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_equipment_leaves_orphaned_history() {
        let (repo, _dir) = test_repo().await;
        let eq = repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();
        repo.create_maintenance(&new_maintenance(eq.id)).await.unwrap();

        let before = repo.list_maintenance().await.unwrap();
        assert_eq!(before[0].equipment_name, "Caterpillar 797F");

        repo.delete_equipment(eq.id).await.unwrap();

        let after = repo.list_maintenance().await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].equipment_id, eq.id);
        assert_eq!(after[0].equipment_name, UNKNOWN_EQUIPMENT_NAME);

        // The id is not reused by the next insert
        let next = repo.create_equipment(&new_equipment("CAT-2")).await.unwrap();
        assert_ne!(next.id, eq.id);
    }

    #[tokio::test]
    async fn test_seed_once() {
        let (repo, _dir) = test_repo().await;

        repo.seed_sample_data().await.unwrap();
        assert_eq!(repo.count_equipment().await.unwrap(), 8);

        let maintenance = repo.list_maintenance().await.unwrap();
        let names: Vec<&str> = maintenance
            .iter()
            .map(|m| m.equipment_name.as_str())
            .collect();
        assert_eq!(names, vec!["Bell B60E", "Caterpillar 797F", "Atlas Copco ST18"]);

        let err = repo.seed_sample_data().await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(repo.count_equipment().await.unwrap(), 8);
        assert_eq!(repo.list_maintenance().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_refused_when_any_equipment_exists() {
        let (repo, _dir) = test_repo().await;
        repo.create_equipment(&new_equipment("OWN-1")).await.unwrap();

        assert!(repo.seed_sample_data().await.is_err());
        assert_eq!(repo.count_equipment().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_distinct_codes() {
        let (repo, _dir) = test_repo().await;

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create_equipment(&new_equipment(&format!("C-{}", i)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "create failed: {:?}", result.err());
        }
        assert_eq!(repo.count_equipment().await.unwrap(), 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_code() {
        let (repo, _dir) = test_repo().await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create_equipment(&new_equipment("DUP-1")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repo.count_equipment().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_hours_updates_and_maintenance() {
        let (repo, _dir) = test_repo().await;
        let id = repo.create_equipment(&new_equipment("CAT-1")).await.unwrap().id;

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    if i % 2 == 0 {
                        repo.update_usage_hours(id, Some(i)).await.map(|_| ())
                    } else {
                        repo.create_maintenance(&new_maintenance(id))
                            .await
                            .map(|_| ())
                    }
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "write failed: {:?}", result.err());
        }
        assert_eq!(repo.list_maintenance().await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_code_conflict() {
        let (repo, _dir) = test_repo().await;
        repo.create_equipment(&new_equipment("CAT-1")).await.unwrap();

        // Bypass the pre-insert check so the UNIQUE constraint fires
        let err = sqlx::query(
            "INSERT INTO equipment (code, name, equipment_type, usage_hours, maintenance_limit) VALUES ('CAT-1', 'Dup', 'Haul Truck', 0, 100)",
        )
        .execute(&repo.pool)
        .await
        .unwrap_err();

        match AppError::from(err) {
            AppError::Conflict(msg) => assert_eq!(msg, "Equipment code already exists"),
            other => panic!("expected conflict, got {}", other),
        }
    }
}
