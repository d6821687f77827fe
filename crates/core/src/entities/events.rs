use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A scheduled lesson. `date` and `time` are kept in the client's own
/// formats (`YYYY-MM-DD`, `H:MM AM/PM`); chronology is computed from them
/// on demand, see `crate::lesson_time`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub date: String,
    pub time: String,
    pub color: Option<String>,
    pub tutor_id: i32,
    pub student_id: i32,
    pub subject: Option<String>,
    /// Set when a billing transaction has been created for this lesson and
    /// is still awaiting the tutor's confirmation.
    pub payment_pending: bool,
    /// Link to the billing transaction. Intentionally not unique: the
    /// backfill pass has a documented double-create race under concurrency.
    pub transaction_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TutorId",
        to = "super::users::Column::Id"
    )]
    Tutor,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id"
    )]
    Transaction,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
