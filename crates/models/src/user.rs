use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
    pub profile_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
        }
    }

    /// Case-insensitive parse; an empty string is the default role.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "STAFF" => Ok(Role::Staff),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ModelError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// Fields of a new account row; `password_hash` is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub id: String,
    pub password_hash: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, ModelError> {
    if new.id.trim().is_empty() {
        return Err(ModelError::Validation("id required".into()));
    }
    if new.password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let role = Role::parse(&new.role)?;
    let am = ActiveModel {
        id: Set(new.id),
        password: Set(new.password_hash),
        name: Set(new.name),
        nickname: Set(new.nickname),
        role: Set(role.as_str().to_string()),
        email: Set(new.email),
        phone: Set(new.phone),
        birthdate: Set(new.birthdate),
        profile_image: Set(None),
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "user"))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id.to_string()).one(db).await?)
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, ModelError> {
    Ok(find(db, id).await?.is_some())
}

/// Stored phone number of a user, if the user exists and has one.
pub async fn find_phone<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<String>, ModelError> {
    let phone = find(db, id)
        .await?
        .map(|u| u.phone)
        .filter(|p| !p.trim().is_empty());
    Ok(phone)
}

/// Profile columns overwritten by a profile update.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
}

/// Overwrite profile columns; returns the number of rows touched.
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    id: &str,
    fields: ProfileFields,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Name, Expr::value(fields.name))
        .col_expr(Column::Nickname, Expr::value(fields.nickname))
        .col_expr(Column::Email, Expr::value(fields.email))
        .col_expr(Column::Phone, Expr::value(fields.phone))
        .col_expr(Column::Birthdate, Expr::value(fields.birthdate))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn set_password<C: ConnectionTrait>(
    db: &C,
    id: &str,
    password_hash: String,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Password, Expr::value(password_hash))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn set_profile_image<C: ConnectionTrait>(
    db: &C,
    id: &str,
    file_name: &str,
) -> Result<u64, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::ProfileImage, Expr::value(Some(file_name.to_string())))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
