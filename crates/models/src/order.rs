use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company: String,
    pub item_name: String,
    pub quantity: i32,
    pub order_date: String,
    pub due_date: String,
    pub status: String,
    pub contact: String,
    pub price: i64,
    pub note: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Well-known status values. Status is free text: any value may replace any other.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const PAYMENT_COMPLETE: &str = "payment complete";
    pub const CANCELLED: &str = "cancelled";
}

/// Column values for a new order row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub company: String,
    pub item_name: String,
    pub quantity: i32,
    pub order_date: String,
    pub due_date: String,
    pub status: String,
    pub contact: String,
    pub price: i64,
    pub note: String,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            company: String::new(),
            item_name: String::new(),
            quantity: 1,
            order_date: String::new(),
            due_date: String::new(),
            status: status::PENDING.to_string(),
            contact: String::new(),
            price: 0,
            note: String::new(),
        }
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewOrder) -> Result<Model, ModelError> {
    let am = ActiveModel {
        company: Set(new.company),
        item_name: Set(new.item_name),
        quantity: Set(new.quantity),
        order_date: Set(new.order_date),
        due_date: Set(new.due_date),
        status: Set(new.status),
        contact: Set(new.contact),
        price: Set(new.price),
        note: Set(new.note),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "order"))
}

/// All orders, newest first.
pub async fn list_newest_first<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_desc(Column::Id).all(db).await?)
}

pub async fn list_by_contact<C: ConnectionTrait>(
    db: &C,
    contact: &str,
) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Contact.eq(contact))
        .order_by_desc(Column::Id)
        .all(db)
        .await?)
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    id: i32,
    status: &str,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
