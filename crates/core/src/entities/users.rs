use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role. An email may own one account per role, so a person can be
/// both a tutor and a student under the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "tutor")]
    Tutor,
    #[sea_orm(string_value = "student")]
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tutor => "tutor",
            Role::Student => "student",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    /// Argon2 hash. Never leaves the server.
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub role: Role,
    /// 6-character connection code handed out to counterparties.
    #[sea_orm(unique)]
    pub code: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::messages::Entity")]
    SentMessages,
    #[sea_orm(has_many = "super::files::Entity")]
    UploadedFiles,
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SentMessages.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedFiles.def()
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
