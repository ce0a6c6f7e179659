//! Layout slots: named rectangles with an active flag.

use models::slot;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::orders::ingest::optional_i32;

/// Upsert payload. Geometry is required and may arrive as numeric strings;
/// `is_active` defaults to false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotInput {
    pub slot_id: String,
    pub x: Option<Value>,
    pub y: Option<Value>,
    pub w: Option<Value>,
    pub h: Option<Value>,
    pub is_active: Option<bool>,
}

fn required_i32(v: &Option<Value>, field: &str) -> Result<i32, ServiceError> {
    optional_i32(v, field)?.ok_or_else(|| ServiceError::required(field))
}

impl SlotInput {
    fn into_model(self) -> Result<slot::Model, ServiceError> {
        if self.slot_id.trim().is_empty() {
            return Err(ServiceError::required("slot_id"));
        }
        Ok(slot::Model {
            x: required_i32(&self.x, "x")?,
            y: required_i32(&self.y, "y")?,
            w: required_i32(&self.w, "w")?,
            h: required_i32(&self.h, "h")?,
            is_active: self.is_active.unwrap_or(false),
            slot_id: self.slot_id,
        })
    }
}

pub async fn list_slots(db: &DatabaseConnection) -> Result<Vec<slot::Model>, ServiceError> {
    Ok(slot::Entity::find().order_by_asc(slot::Column::SlotId).all(db).await?)
}

/// Insert, or overwrite all five fields of an existing slot.
#[instrument(skip(db, input), fields(slot_id = %input.slot_id))]
pub async fn save_slot(
    db: &DatabaseConnection,
    input: SlotInput,
) -> Result<slot::Model, ServiceError> {
    let saved = slot::upsert(db, input.into_model()?).await?;
    info!(slot_id = %saved.slot_id, active = saved.is_active, "slot_saved");
    Ok(saved)
}

pub async fn delete_slot(db: &DatabaseConnection, slot_id: &str) -> Result<bool, ServiceError> {
    let res = slot::Entity::delete_by_id(slot_id.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    fn rect(id: &str, x: i32, y: i32, w: i32, h: i32) -> SlotInput {
        SlotInput {
            slot_id: id.into(),
            x: Some(json!(x)),
            y: Some(json!(y)),
            w: Some(json!(w)),
            h: Some(json!(h)),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_row_with_latest_values() -> anyhow::Result<()> {
        let db = get_db().await?;
        save_slot(&db, rect("A-1", 10, 10, 100, 100)).await?;
        save_slot(&db, SlotInput { is_active: Some(true), ..rect("A-1", -5, 20, 30, 40) }).await?;

        let all = list_slots(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(
            all[0],
            slot::Model { slot_id: "A-1".into(), x: -5, y: 20, w: 30, h: 40, is_active: true }
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_geometry_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = save_slot(&db, SlotInput { h: None, ..rect("A-1", 0, 0, 1, 1) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m.contains('h')));
        let unnamed = save_slot(&db, rect("", 0, 0, 1, 1)).await;
        assert!(matches!(unnamed, Err(ServiceError::Validation(_))));
        assert!(list_slots(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn geometry_accepts_numeric_strings() -> anyhow::Result<()> {
        let db = get_db().await?;
        let input: SlotInput = serde_json::from_value(json!({
            "slot_id": "C-1", "x": "10", "y": 5, "w": "30", "h": 40.0
        }))?;
        let saved = save_slot(&db, input).await?;
        assert_eq!((saved.x, saved.y, saved.w, saved.h), (10, 5, 30, 40));

        let bad = SlotInput { x: Some(json!("left")), ..rect("C-2", 0, 0, 1, 1) };
        let err = save_slot(&db, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "x must be an integer"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let db = get_db().await?;
        save_slot(&db, rect("B-1", 0, 0, 1, 1)).await?;
        assert!(delete_slot(&db, "B-1").await?);
        assert!(!delete_slot(&db, "B-1").await?);
        Ok(())
    }
}
