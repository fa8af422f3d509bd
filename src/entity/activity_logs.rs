//! 课外活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub activity_name: String,
    pub category: Option<String>,
    pub date: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub achievement: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::ActivityLog {
        use crate::models::activities::entities::ActivityLog;
        use chrono::{DateTime, NaiveDate, Utc};

        ActivityLog {
            id: self.id,
            student_id: self.student_id,
            activity_name: self.activity_name,
            category: self.category,
            date: super::parse_stored_date(&self.date).unwrap_or(NaiveDate::MIN),
            achievement: self.achievement,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
