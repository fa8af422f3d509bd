//! 课外活动存储操作

use super::{SeaOrmStorage, db_err, page_window};
use crate::entity::activity_logs::{ActiveModel, Column, Entity as ActivityLogs, Relation};
use crate::entity::format_stored_date;
use crate::entity::students::Column as StudentColumn;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    activities::{
        entities::ActivityLog,
        requests::{ActivityListQuery, CreateActivityRequest, UpdateActivityRequest},
        responses::ActivityListResponse,
    },
    students::entities::StudentStatus,
};
use crate::utils::contains_like;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set,
};

impl SeaOrmStorage {
    pub(super) fn visible_activities() -> Select<ActivityLogs> {
        ActivityLogs::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(StudentColumn::Status.eq(StudentStatus::ACTIVE))
    }

    /// 录入课外活动
    pub async fn create_activity_impl(&self, req: CreateActivityRequest) -> Result<ActivityLog> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            activity_name: Set(req.activity_name),
            category: Set(req.category),
            date: Set(format_stored_date(req.date)),
            achievement: Set(req.achievement),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("录入活动失败"))?;

        Ok(result.into_activity())
    }

    pub async fn get_activity_by_id_impl(&self, id: i64) -> Result<Option<ActivityLog>> {
        let result = Self::visible_activities()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err("查询活动失败"))?;

        Ok(result.map(|m| m.into_activity()))
    }

    /// 分页列出课外活动，按日期升序
    pub async fn list_activities_with_pagination_impl(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        let (page, size) = page_window(query.page, query.size);

        let mut select = Self::visible_activities();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(category) = query.category.as_deref().map(str::trim)
            && !category.is_empty()
        {
            select = select.filter(Column::Category.eq(category.to_ascii_uppercase()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::ActivityName.like(contains_like(search.trim())));
        }
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(format_stored_date(from)));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(format_stored_date(to)));
        }
        if query.achievement_only.unwrap_or(false) {
            select = select
                .filter(Column::Achievement.is_not_null())
                .filter(Column::Achievement.ne(""));
        }

        select = select.order_by_asc(Column::Date).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询活动总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("查询活动页数失败"))?;
        let activities = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询活动列表失败"))?;

        Ok(ActivityListResponse {
            items: activities.into_iter().map(|m| m.into_activity()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_activity_impl(
        &self,
        id: i64,
        update: UpdateActivityRequest,
    ) -> Result<Option<ActivityLog>> {
        if self.get_activity_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.activity_name {
            model.activity_name = Set(name);
        }
        if let Some(category) = update.category {
            let trimmed = category.trim();
            model.category = Set((!trimmed.is_empty()).then(|| trimmed.to_ascii_uppercase()));
        }
        if let Some(date) = update.date {
            model.date = Set(format_stored_date(date));
        }
        if let Some(achievement) = update.achievement {
            let trimmed = achievement.trim();
            model.achievement = Set((!trimmed.is_empty()).then(|| trimmed.to_string()));
        }

        model.update(&self.db).await.map_err(db_err("更新活动失败"))?;

        self.get_activity_by_id_impl(id).await
    }

    pub async fn delete_activity_impl(&self, id: i64) -> Result<bool> {
        if self.get_activity_by_id_impl(id).await?.is_none() {
            return Ok(false);
        }

        let result = ActivityLogs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除活动失败"))?;

        Ok(result.rows_affected > 0)
    }
}
