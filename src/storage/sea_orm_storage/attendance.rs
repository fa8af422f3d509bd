//! 考勤存储操作

use super::{SeaOrmStorage, db_err, page_window};
use crate::entity::attendance_events::{ActiveModel, Column, Entity as AttendanceEvents, Relation};
use crate::entity::format_stored_date;
use crate::entity::students::Column as StudentColumn;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::AttendanceEvent,
        requests::{AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    students::entities::StudentStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set,
};

impl SeaOrmStorage {
    pub(super) fn visible_attendance() -> Select<AttendanceEvents> {
        AttendanceEvents::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(StudentColumn::Status.eq(StudentStatus::ACTIVE))
    }

    /// 录入考勤，同一学生同一天只能有一条
    pub async fn create_attendance_impl(
        &self,
        req: CreateAttendanceRequest,
    ) -> Result<AttendanceEvent> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            date: Set(format_stored_date(req.date)),
            present: Set(req.present),
            note: Set(req.note),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("录入考勤失败"))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<AttendanceEvent>> {
        let result = Self::visible_attendance()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err("查询考勤失败"))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 分页列出考勤，按日期升序
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = page_window(query.page, query.size);

        let mut select = Self::visible_attendance();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        // 日期以 YYYY-MM-DD 存储，字符串比较即日期比较
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(format_stored_date(from)));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(format_stored_date(to)));
        }
        if let Some(present) = query.present {
            select = select.filter(Column::Present.eq(present));
        }

        select = select.order_by_asc(Column::Date).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询考勤总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("查询考勤页数失败"))?;
        let events = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询考勤列表失败"))?;

        Ok(AttendanceListResponse {
            items: events.into_iter().map(|m| m.into_attendance()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceEvent>> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        let mut changed = false;
        if let Some(present) = update.present {
            model.present = Set(present);
            changed = true;
        }
        if let Some(note) = update.note {
            let trimmed = note.trim();
            model.note = Set((!trimmed.is_empty()).then(|| trimmed.to_string()));
            changed = true;
        }

        // 没有可更新字段时直接返回当前记录
        if changed {
            model.update(&self.db).await.map_err(db_err("更新考勤失败"))?;
        }

        self.get_attendance_by_id_impl(id).await
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(false);
        }

        let result = AttendanceEvents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除考勤失败"))?;

        Ok(result.rows_affected > 0)
    }
}
