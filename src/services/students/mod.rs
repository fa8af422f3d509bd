pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod profile;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentExportParams, StudentQueryParams, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 获取学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 登记新学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update).await
    }

    // 退学或物理删除
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        purge: bool,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id, purge).await
    }

    // 学生画像：成绩、出勤、活动与排名
    pub async fn get_student_profile(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        profile::get_student_profile(self, request, student_id).await
    }

    pub async fn export_students(
        &self,
        request: &HttpRequest,
        params: StudentExportParams,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, request, params).await
    }
}
