use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_code: String,
    pub product_name: String,
    pub brand: String,
    pub category: String,
    pub color: String,
    pub size: String,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_item_code(code: &str) -> Result<(), ModelError> {
    if code.trim().is_empty() {
        return Err(ModelError::Validation("item_code required".into()));
    }
    Ok(())
}

/// Insert a product; a duplicate item code is a `Conflict`.
pub async fn create<C: ConnectionTrait>(db: &C, product: Model) -> Result<Model, ModelError> {
    validate_item_code(&product.item_code)?;
    let am: ActiveModel = product.into_active_model_set();
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "product"))
}

/// Overwrite stock for an item code; returns rows touched (0 when the code is unknown).
pub async fn set_stock<C: ConnectionTrait>(
    db: &C,
    item_code: &str,
    stock: i32,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Stock, Expr::value(stock))
        .filter(Column::ItemCode.eq(item_code))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

impl Model {
    fn into_active_model_set(self) -> ActiveModel {
        ActiveModel {
            item_code: Set(self.item_code),
            product_name: Set(self.product_name),
            brand: Set(self.brand),
            category: Set(self.category),
            color: Set(self.color),
            size: Set(self.size),
            stock: Set(self.stock),
        }
    }
}
