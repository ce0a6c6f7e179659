use crate::db::{connect_with_config, DatabaseConfig};
use crate::errors::ModelError;
use crate::{order, product, slot, user};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};

/// Setup an in-memory database with migrations applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn sample_product(code: &str) -> product::Model {
    product::Model {
        item_code: code.into(),
        product_name: "T7 Track Jacket".into(),
        brand: "Puma".into(),
        category: "TOP".into(),
        color: "Gray".into(),
        size: "S".into(),
        stock: 18,
    }
}

fn bare_user(id: &str) -> user::NewUser {
    user::NewUser { id: id.into(), password_hash: "x".into(), ..Default::default() }
}

fn manual_order(company: &str, item_name: &str, contact: &str) -> order::NewOrder {
    order::NewOrder {
        company: company.into(),
        item_name: item_name.into(),
        contact: contact.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_user_create_and_lookup() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, user::NewUser {
        id: "kim".into(),
        password_hash: "$argon2id$placeholder".into(),
        phone: "010-1234-5678".into(),
        role: "admin".into(),
        ..Default::default()
    })
    .await?;
    assert_eq!(created.role, "ADMIN");
    assert!(created.profile_image.is_none());

    assert_eq!(user::find_phone(&db, "kim").await?, Some("010-1234-5678".into()));
    assert_eq!(user::find_phone(&db, "nobody").await?, None);
    assert!(user::exists(&db, "kim").await?);

    let dup = user::create(&db, bare_user("kim")).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn test_user_rejects_unknown_role() -> Result<()> {
    let db = setup_test_db().await?;
    let res = user::create(&db, user::NewUser { role: "OWNER".into(), ..bare_user("lee") }).await;
    assert!(matches!(res, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_user_blank_phone_is_none() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, user::NewUser { phone: "  ".into(), ..bare_user("park") }).await?;
    assert_eq!(user::find_phone(&db, "park").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_product_duplicate_is_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    product::create(&db, sample_product("PM-01-03-02")).await?;
    let again = product::create(&db, sample_product("PM-01-03-02")).await;
    assert!(matches!(again, Err(ModelError::Conflict(_))));

    let touched = product::set_stock(&db, "PM-01-03-02", 3).await?;
    assert_eq!(touched, 1);
    let found = product::Entity::find_by_id("PM-01-03-02".to_string()).one(&db).await?.unwrap();
    assert_eq!(found.stock, 3);
    Ok(())
}

#[tokio::test]
async fn test_order_defaults_and_ordering() -> Result<()> {
    let db = setup_test_db().await?;
    let first = order::create(&db, manual_order("Umbro", "Jogger", "010")).await?;
    let second = order::create(&db, manual_order("Puma", "T7", "011")).await?;
    assert_eq!(first.status, order::status::PENDING);
    assert_eq!(first.quantity, 1);
    assert!(second.id > first.id);

    let all = order::list_newest_first(&db).await?;
    assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![second.id, first.id]);

    let mine = order::list_by_contact(&db, "010").await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].company, "Umbro");

    order::set_status(&db, first.id, order::status::CANCELLED).await?;
    let reloaded = order::Entity::find_by_id(first.id).one(&db).await?.unwrap();
    assert_eq!(reloaded.status, "cancelled");
    Ok(())
}

#[tokio::test]
async fn test_slot_upsert_keeps_single_row() -> Result<()> {
    let db = setup_test_db().await?;
    let first = slot::Model { slot_id: "A-1".into(), x: 10, y: 10, w: 100, h: 50, is_active: true };
    let second = slot::Model { x: 20, y: 30, w: 40, h: 60, is_active: false, ..first.clone() };
    slot::upsert(&db, first).await?;
    slot::upsert(&db, second.clone()).await?;

    let rows = slot::Entity::find().all(&db).await?;
    assert_eq!(rows, vec![second]);
    Ok(())
}
