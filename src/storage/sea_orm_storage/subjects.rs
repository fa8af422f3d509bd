//! 科目存储操作

use super::{SeaOrmStorage, db_err, page_window};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::contains_like;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            discipline: Set(req.discipline),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建科目失败"))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 通过科目代码获取科目
    pub async fn get_subject_by_code_impl(&self, code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = page_window(query.page, query.size);

        let mut select = Subjects::find();

        if let Some(discipline) = query.discipline.as_deref().map(str::trim)
            && !discipline.is_empty()
        {
            select = select.filter(Column::Discipline.eq(discipline));
        }

        // 搜索代码或名称
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(contains_like(search.trim())))
                    .add(Column::Name.like(contains_like(search.trim()))),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询科目总数失败"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("查询科目页数失败"))?;
        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询科目列表失败"))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(discipline) = update.discipline {
            let trimmed = discipline.trim();
            model.discipline = Set((!trimmed.is_empty()).then(|| trimmed.to_string()));
        }

        model.update(&self.db).await.map_err(db_err("更新科目失败"))?;

        self.get_subject_by_id_impl(id).await
    }

    /// 删除科目，外键级联删除相关成绩
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除科目失败"))?;

        Ok(result.rows_affected > 0)
    }
}
