//! Product catalog: listing and stock bookkeeping.

use models::product;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::orders::ingest::optional_i32;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub item_code: String,
    /// Defaults to the item code.
    pub product_name: Option<String>,
    pub brand: String,
    pub category: String,
    pub color: String,
    pub size: String,
    /// Number or numeric string; defaults to 0.
    pub stock: Option<Value>,
}

#[instrument(skip(db))]
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let rows = product::Entity::find()
        .order_by_asc(product::Column::ItemCode)
        .all(db)
        .await?;
    Ok(rows)
}

#[instrument(skip(db, input), fields(item_code = %input.item_code))]
pub async fn add_product(
    db: &DatabaseConnection,
    input: NewProduct,
) -> Result<product::Model, ServiceError> {
    let stock = optional_i32(&input.stock, "stock")?.unwrap_or(0);
    let product_name = input
        .product_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| input.item_code.clone());
    let created = product::create(
        db,
        product::Model {
            item_code: input.item_code,
            product_name,
            brand: input.brand,
            category: input.category,
            color: input.color,
            size: input.size,
            stock,
        },
    )
    .await?;
    info!(item_code = %created.item_code, "product_added");
    Ok(created)
}

/// Overwrite stock. Unknown codes and negative values are accepted as-is.
#[instrument(skip(db))]
pub async fn update_stock(
    db: &DatabaseConnection,
    item_code: &str,
    new_stock: i32,
) -> Result<(), ServiceError> {
    if item_code.trim().is_empty() {
        return Err(ServiceError::required("item_code"));
    }
    product::set_stock(db, item_code, new_stock).await?;
    Ok(())
}

/// Idempotent; returns whether a row was removed.
#[instrument(skip(db))]
pub async fn delete_product(
    db: &DatabaseConnection,
    item_code: &str,
) -> Result<bool, ServiceError> {
    let res = product::Entity::delete_by_id(item_code.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    fn tee(code: &str) -> NewProduct {
        NewProduct {
            item_code: code.into(),
            brand: "Puma".into(),
            category: "Top".into(),
            color: "Black".into(),
            size: "L".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_list_delete_round_trip() -> anyhow::Result<()> {
        let db = get_db().await?;
        let created = add_product(&db, tee("PM-TS-01")).await?;
        assert_eq!(created.product_name, "PM-TS-01");
        assert_eq!(created.stock, 0);

        let codes: Vec<_> = list_products(&db).await?.into_iter().map(|p| p.item_code).collect();
        assert_eq!(codes, vec!["PM-TS-01"]);

        assert!(delete_product(&db, "PM-TS-01").await?);
        assert!(list_products(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_item_code_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        add_product(&db, tee("PM-TS-01")).await?;
        let err = add_product(&db, tee("PM-TS-01")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(matches!(add_product(&db, tee(" ")).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_stock_overwrites_regardless_of_prior_value() -> anyhow::Result<()> {
        let db = get_db().await?;
        add_product(&db, NewProduct { stock: Some(json!(40)), ..tee("PM-TS-01") }).await?;
        for n in [7, 0, -3, 120] {
            update_stock(&db, "PM-TS-01", n).await?;
            let stock = list_products(&db).await?[0].stock;
            assert_eq!(stock, n);
        }
        // unknown code is a silent no-op
        update_stock(&db, "NOPE", 5).await?;
        Ok(())
    }

    #[tokio::test]
    async fn stock_accepts_numeric_strings_only() -> anyhow::Result<()> {
        let db = get_db().await?;
        let four = NewProduct { stock: Some(json!("4")), ..tee("PM-TS-01") };
        let created = add_product(&db, four).await?;
        assert_eq!(created.stock, 4);

        let err = add_product(&db, NewProduct { stock: Some(json!("four")), ..tee("PM-TS-02") })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(list_products(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_missing_product_succeeds() -> anyhow::Result<()> {
        let db = get_db().await?;
        assert!(!delete_product(&db, "NOPE").await?);
        Ok(())
    }
}
