use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shared study material. Only metadata lives here; the `url` points at
/// wherever the blob actually is. `size` is the human-readable string the
/// client sent ("2.5 MB") and is parsed back to bytes for quota stats.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: String,
    pub url: Option<String>,
    pub subject: Option<String>,
    pub uploaded_by_id: i32,
    /// None = visible to every connected student of the uploader.
    pub assigned_to_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedById",
        to = "super::users::Column::Id"
    )]
    UploadedBy,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedToId",
        to = "super::users::Column::Id"
    )]
    AssignedTo,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
