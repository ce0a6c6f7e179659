//! Purchase orders: manual entry, listing, status changes and cart ingestion.

pub mod ingest;
pub mod log;

use models::order;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
pub use ingest::{ingest_cart_orders, CartItem, IngestOutcome, IngestSource, OrderLine};
pub use log::{OrderLog, OrderLogEntry};

/// Manually entered order. `company` and `item_name` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrderInput {
    pub company: String,
    pub item_name: String,
    pub quantity: Option<Value>,
    pub order_date: String,
    pub due_date: String,
    pub contact: String,
    pub price: Option<Value>,
    pub note: String,
}

pub async fn list_all_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>, ServiceError> {
    Ok(order::list_newest_first(db).await?)
}

/// Orders whose contact matches; no contact means no orders.
pub async fn list_orders_by_contact(
    db: &DatabaseConnection,
    contact: Option<&str>,
) -> Result<Vec<order::Model>, ServiceError> {
    match contact.filter(|c| !c.trim().is_empty()) {
        Some(c) => Ok(order::list_by_contact(db, c).await?),
        None => Ok(Vec::new()),
    }
}

#[instrument(skip(db, input), fields(company = %input.company))]
pub async fn add_order(
    db: &DatabaseConnection,
    input: NewOrderInput,
) -> Result<order::Model, ServiceError> {
    if input.company.trim().is_empty() {
        return Err(ServiceError::required("company"));
    }
    if input.item_name.trim().is_empty() {
        return Err(ServiceError::required("item_name"));
    }
    let quantity = ingest::coerce_int(&input.quantity)
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(1);
    let created = order::create(
        db,
        order::NewOrder {
            company: input.company,
            item_name: input.item_name,
            quantity,
            order_date: input.order_date,
            due_date: input.due_date,
            contact: input.contact,
            price: ingest::coerce_int(&input.price).unwrap_or(0),
            note: input.note,
            ..Default::default()
        },
    )
    .await?;
    info!(order_id = created.id, "order_added");
    Ok(created)
}

/// Any status may replace any other; unknown ids are a no-op.
#[instrument(skip(db))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    id: i32,
    status: &str,
) -> Result<(), ServiceError> {
    if status.trim().is_empty() {
        return Err(ServiceError::required("status"));
    }
    order::set_status(db, id, status).await?;
    Ok(())
}

pub async fn delete_order(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = order::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    fn manual(company: &str, contact: &str) -> NewOrderInput {
        NewOrderInput {
            company: company.into(),
            item_name: "Track jacket".into(),
            contact: contact.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_order_applies_defaults() -> anyhow::Result<()> {
        let db = get_db().await?;
        let o = add_order(&db, manual("Umbro", "")).await?;
        assert_eq!((o.quantity, o.price, o.status.as_str()), (1, 0, order::status::PENDING));
        assert_eq!(o.due_date, "");

        let priced = NewOrderInput {
            quantity: Some(json!("5")),
            price: Some(json!(1200)),
            ..manual("Umbro", "")
        };
        let o = add_order(&db, priced).await?;
        assert_eq!((o.quantity, o.price), (5, 1200));

        assert!(matches!(add_order(&db, manual("", "")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            add_order(&db, NewOrderInput { item_name: String::new(), ..manual("Umbro", "") }).await,
            Err(ServiceError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_filtered() -> anyhow::Result<()> {
        let db = get_db().await?;
        let a = add_order(&db, manual("Puma", "010-1")).await?;
        let b = add_order(&db, manual("Umbro", "010-2")).await?;
        let c = add_order(&db, manual("Puma", "010-1")).await?;

        let ids: Vec<_> = list_all_orders(&db).await?.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        let mine: Vec<_> = list_orders_by_contact(&db, Some("010-1"))
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(mine, vec![c.id, a.id]);
        assert!(list_orders_by_contact(&db, None).await?.is_empty());
        assert!(list_orders_by_contact(&db, Some("")).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn status_changes_are_unconstrained() -> anyhow::Result<()> {
        let db = get_db().await?;
        let o = add_order(&db, manual("Puma", "")).await?;
        let statuses = [
            order::status::CANCELLED,
            order::status::APPROVED,
            order::status::PENDING,
            "on hold",
        ];
        for s in statuses {
            update_order_status(&db, o.id, s).await?;
            assert_eq!(list_all_orders(&db).await?[0].status, s);
        }
        update_order_status(&db, 9999, "approved").await?;
        let blank = update_order_status(&db, o.id, " ").await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let db = get_db().await?;
        let o = add_order(&db, manual("Puma", "")).await?;
        assert!(delete_order(&db, o.id).await?);
        assert!(!delete_order(&db, o.id).await?);
        assert!(!delete_order(&db, 424242).await?);
        Ok(())
    }
}
