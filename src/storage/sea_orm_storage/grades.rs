//! 成绩存储操作
//!
//! 所有读取都关联学生表，只返回在读学生的成绩。

use super::{SeaOrmStorage, db_err, page_window};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Relation};
use crate::entity::students::Column as StudentColumn;
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    grades::{
        entities::GradeRecord,
        requests::{CreateGradeRequest, GradeListQuery},
        responses::GradeListResponse,
    },
    students::entities::StudentStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set,
};

impl SeaOrmStorage {
    /// 只包含在读学生成绩的查询
    pub(super) fn visible_grades() -> Select<Grades> {
        Grades::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(StudentColumn::Status.eq(StudentStatus::ACTIVE))
    }

    /// 录入成绩，(学生, 科目, 学期) 重复时返回冲突
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<GradeRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            semester: Set(req.semester.to_string()),
            score: Set(req.score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("录入成绩失败"))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<GradeRecord>> {
        let result = Self::visible_grades()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err("查询成绩失败"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = page_window(query.page, query.size);

        let mut select = Self::visible_grades();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.to_string()));
        }
        // 分数区间，两端包含
        if let Some(min_score) = query.min_score {
            select = select.filter(Column::Score.gte(min_score));
        }
        if let Some(max_score) = query.max_score {
            select = select.filter(Column::Score.lte(max_score));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询成绩总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("查询成绩页数失败"))?;
        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询成绩列表失败"))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 只更新分数，学生、科目和学期保持不变
    pub async fn update_grade_score_impl(
        &self,
        id: i64,
        score: f64,
    ) -> Result<Option<GradeRecord>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            score: Set(score),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model.update(&self.db).await.map_err(db_err("更新成绩失败"))?;

        self.get_grade_by_id_impl(id).await
    }

    /// 删除成绩
    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(false);
        }

        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除成绩失败"))?;

        Ok(result.rows_affected > 0)
    }
}
