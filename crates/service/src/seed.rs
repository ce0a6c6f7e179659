//! Demo data for a fresh database. Each table is only seeded while empty,
//! so running it on every startup is safe.

use models::{order, product, slot, user};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::{info, instrument};

use crate::accounts::password::hash_password;
use crate::errors::ServiceError;

pub const ADMIN_ID: &str = "admin";
pub const ADMIN_PASSWORD: &str = "1234";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub admin: bool,
    pub products: usize,
    pub orders: usize,
    pub slots: usize,
}

// (item_code, name, brand, category, color, size, stock)
const PRODUCTS: [(&str, &str, &str, &str, &str, &str, i32); 10] = [
    ("BP-01-01-01", "BeanPole Basic T-Shirt", "BeanPole", "TOP", "Black", "XS", 10),
    ("BP-01-02-02", "BeanPole Logo Pique Shirt", "BeanPole", "TOP", "White", "S", 15),
    ("BP-02-03-04", "BeanPole Comfort Chino Pants", "BeanPole", "BOTTOM", "Gray", "L", 8),
    ("UB-01-04-05", "Umbro Team Training Top", "Umbro", "TOP", "Red", "XL", 12),
    ("UB-02-05-03", "Umbro Woven Jogger Pants", "Umbro", "BOTTOM", "Blue", "M", 20),
    ("UB-03-01-03", "Umbro Bench Long Coat", "Umbro", "OUTER", "Black", "M", 7),
    ("UB-03-02-06", "Umbro Anorak Jacket", "Umbro", "OUTER", "White", "Free", 5),
    ("PM-01-03-02", "Puma T7 Track Jacket", "Puma", "TOP", "Gray", "S", 18),
    ("PM-02-01-05", "Puma Iconic T7 Pants", "Puma", "BOTTOM", "Black", "XL", 1),
    ("DS-03-01-04", "Descente Swiss Ski Team Jacket", "DESCENTE", "OUTER", "Black", "L", 5),
];

// (company, item, qty, price, ordered, due, contact, note, status)
const ORDERS: [(&str, &str, i32, i64, &str, &str, &str, &str, &str); 3] = [
    (
        "BeanPole HQ",
        "BeanPole Logo Pique Shirt",
        50,
        45_000,
        "2023-11-25",
        "2023-11-30",
        "010-1111-2222",
        "rush delivery",
        order::status::PENDING,
    ),
    (
        "Umbro Sports",
        "Umbro Woven Jogger Pants",
        20,
        39_000,
        "2023-11-24",
        "2023-12-01",
        "010-3333-4444",
        "afternoon delivery",
        order::status::APPROVED,
    ),
    (
        "Descente Korea",
        "Ski Team T-Shirt",
        10,
        15_000,
        "2023-11-20",
        "2023-11-28",
        "02-123-4567",
        "mixed sizes",
        order::status::CANCELLED,
    ),
];

const SLOTS: [(&str, i32, i32, i32, i32, bool); 3] = [
    ("A-1", 10, 10, 100, 50, true),
    ("A-2", 120, 10, 100, 50, true),
    ("B-1", 10, 80, 100, 50, false),
];

#[instrument(skip(db))]
pub async fn seed_initial_data(db: &DatabaseConnection) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    if !user::exists(db, ADMIN_ID).await? {
        let password_hash =
            hash_password(ADMIN_PASSWORD).map_err(|e| ServiceError::Internal(e.to_string()))?;
        user::create(
            db,
            user::NewUser {
                id: ADMIN_ID.into(),
                password_hash,
                name: "Administrator".into(),
                nickname: "Admin".into(),
                role: user::Role::Admin.as_str().into(),
                ..Default::default()
            },
        )
        .await?;
        report.admin = true;
    }

    if product::Entity::find().count(db).await? == 0 {
        for (code, name, brand, category, color, size, stock) in PRODUCTS {
            product::create(
                db,
                product::Model {
                    item_code: code.into(),
                    product_name: name.into(),
                    brand: brand.into(),
                    category: category.into(),
                    color: color.into(),
                    size: size.into(),
                    stock,
                },
            )
            .await?;
        }
        report.products = PRODUCTS.len();
    }

    if order::Entity::find().count(db).await? == 0 {
        for (company, item, quantity, price, ordered, due, contact, note, status) in ORDERS {
            order::create(
                db,
                order::NewOrder {
                    company: company.into(),
                    item_name: item.into(),
                    quantity,
                    price,
                    order_date: ordered.into(),
                    due_date: due.into(),
                    contact: contact.into(),
                    note: note.into(),
                    status: status.into(),
                },
            )
            .await?;
        }
        report.orders = ORDERS.len();
    }

    if slot::Entity::find().count(db).await? == 0 {
        for (slot_id, x, y, w, h, is_active) in SLOTS {
            slot::upsert(db, slot::Model { slot_id: slot_id.into(), x, y, w, h, is_active }).await?;
        }
        report.slots = SLOTS.len();
    }

    info!(
        admin = report.admin,
        products = report.products,
        orders = report.orders,
        slots = report.slots,
        "seed_complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::password::verify_password;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seeds_once() -> anyhow::Result<()> {
        let db = get_db().await?;
        let first = seed_initial_data(&db).await?;
        assert_eq!(first, SeedReport { admin: true, products: 10, orders: 3, slots: 3 });

        let admin = user::find(&db, ADMIN_ID).await?.expect("admin row");
        assert_eq!(admin.role, "ADMIN");
        assert!(verify_password(ADMIN_PASSWORD, &admin.password)?);

        let second = seed_initial_data(&db).await?;
        assert_eq!(second, SeedReport::default());
        assert_eq!(product::Entity::find().count(&db).await?, 10);
        Ok(())
    }
}
