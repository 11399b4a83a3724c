//! Users table for the login gate.
//!
//! Users are unrelated to donors: they only decide who may run gated
//! commands.

use sea_orm::entity::prelude::*;

/// A registered operator of the tool. The password hash never leaves the
/// engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}
