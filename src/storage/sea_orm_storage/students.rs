//! 学生存储操作

use super::{SeaOrmStorage, db_err, page_window};
use crate::entity::activity_logs;
use crate::entity::format_stored_date;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::contains_like;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

/// 空字符串表示清空可选字段
fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_number: Set(req.student_number),
            name: Set(req.name),
            class_name: Set(req.class_name),
            discipline: Set(req.discipline),
            enrollment_year: Set(req.enrollment_year),
            admission_date: Set(req.admission_date.map(format_stored_date)),
            status: Set(StudentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            withdrawn_at: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建学生失败"))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取在读学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .filter(Column::Status.eq(StudentStatus::ACTIVE))
            .one(&self.db)
            .await
            .map_err(db_err("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取在读学生
    pub async fn get_student_by_number_impl(&self, student_number: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::StudentNumber.eq(student_number))
            .filter(Column::Status.eq(StudentStatus::ACTIVE))
            .one(&self.db)
            .await
            .map_err(db_err("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 构造带筛选条件的查询，按 ID 升序
    fn filtered_students(query: &StudentListQuery) -> Select<Students> {
        let status = query.status.unwrap_or(StudentStatus::Active);
        let mut select = Students::find().filter(Column::Status.eq(status.to_string()));

        if let Some(discipline) = query.discipline.as_deref().map(str::trim)
            && !discipline.is_empty()
        {
            select = select.filter(Column::Discipline.eq(discipline));
        }

        if let Some(class_name) = query.class_name.as_deref().map(str::trim)
            && !class_name.is_empty()
        {
            select = select.filter(Column::ClassName.eq(class_name));
        }

        // 搜索姓名或学号
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_like(search.trim())))
                    .add(Column::StudentNumber.like(contains_like(search.trim()))),
            );
        }

        // 是否有获奖记录
        if let Some(has_achievement) = query.has_achievement {
            let achievers = Query::select()
                .column(activity_logs::Column::StudentId)
                .from(activity_logs::Entity)
                .and_where(activity_logs::Column::Achievement.is_not_null())
                .and_where(activity_logs::Column::Achievement.ne(""))
                .to_owned();
            select = if has_achievement {
                select.filter(Column::Id.in_subquery(achievers))
            } else {
                select.filter(Column::Id.not_in_subquery(achievers))
            };
        }

        if let Some(from) = query.enrollment_year_from {
            select = select.filter(Column::EnrollmentYear.gte(from));
        }
        if let Some(to) = query.enrollment_year_to {
            select = select.filter(Column::EnrollmentYear.lte(to));
        }

        select.order_by_asc(Column::Id)
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_window(query.page, query.size);

        let paginator = Self::filtered_students(&query).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询学生总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("查询学生页数失败"))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询学生列表失败"))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 导出用，最多返回 limit 条
    pub async fn list_students_for_export_impl(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<Student>> {
        let students = Self::filtered_students(&query)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("导出学生失败"))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新在读学生信息
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        // 已退学的学生视为不存在
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(discipline) = update.discipline {
            model.discipline = Set(optional_text(discipline));
        }
        if let Some(student_number) = update.student_number {
            model.student_number = Set(optional_text(student_number));
        }
        if let Some(year) = update.enrollment_year {
            model.enrollment_year = Set(Some(year));
        }
        if let Some(date) = update.admission_date {
            model.admission_date = Set(Some(format_stored_date(date)));
        }

        model.update(&self.db).await.map_err(db_err("更新学生失败"))?;

        self.get_student_by_id_impl(id).await
    }

    /// 退学（软删除），关联记录随之在所有读取中失效
    pub async fn withdraw_student_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Students::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(StudentStatus::WITHDRAWN),
            )
            .col_expr(Column::WithdrawnAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(StudentStatus::ACTIVE))
            .exec(&self.db)
            .await
            .map_err(db_err("学生退学失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 物理删除，外键级联删除成绩、考勤和活动记录
    pub async fn purge_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除学生失败"))?;

        Ok(result.rows_affected > 0)
    }
}
