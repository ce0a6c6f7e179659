use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot_id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the slot, or overwrite all five mutable fields if the id exists.
/// Last writer wins; there is no version check.
pub async fn upsert<C: ConnectionTrait>(db: &C, slot: Model) -> Result<Model, ModelError> {
    if slot.slot_id.trim().is_empty() {
        return Err(ModelError::Validation("slot_id required".into()));
    }
    let existing = Entity::find_by_id(slot.slot_id.clone()).one(db).await?;
    match existing {
        Some(found) => {
            let mut am: ActiveModel = found.into();
            am.x = Set(slot.x);
            am.y = Set(slot.y);
            am.w = Set(slot.w);
            am.h = Set(slot.h);
            am.is_active = Set(slot.is_active);
            Ok(am.update(db).await?)
        }
        None => {
            let am = ActiveModel {
                slot_id: Set(slot.slot_id),
                x: Set(slot.x),
                y: Set(slot.y),
                w: Set(slot.w),
                h: Set(slot.h),
                is_active: Set(slot.is_active),
            };
            am.insert(db).await.map_err(|e| ModelError::from_db(e, "slot"))
        }
    }
}
