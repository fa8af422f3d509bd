pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{CreateGradeRequest, GradeQueryParams, UpdateGradeRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    // 录入成绩
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade).await
    }

    pub async fn get_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, grade_id).await
    }

    // 修改分数，学生、科目与学期不可变
    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update).await
    }

    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }
}
