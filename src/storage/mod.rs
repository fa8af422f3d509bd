use crate::models::{
    activities::{
        entities::ActivityLog,
        requests::{ActivityListQuery, CreateActivityRequest, UpdateActivityRequest},
        responses::ActivityListResponse,
    },
    attendance::{
        entities::AttendanceEvent,
        requests::{AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    dashboard::{
        entities::StudentAggregate,
        requests::SemesterQueryParams,
        responses::{DashboardTotals, SemesterBreakdown},
    },
    grades::{
        entities::GradeRecord,
        requests::{CreateGradeRequest, GradeListQuery},
        responses::GradeListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::{StudentListResponse, SubjectAverage},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层抽象
///
/// 读取操作只返回在读学生及其关联记录；已退学学生对所有读取不可见。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取在读学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取在读学生
    async fn get_student_by_number(&self, student_number: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 导出学生
    async fn list_students_for_export(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<Student>>;
    // 更新学生信息
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    // 退学（软删除）
    async fn withdraw_student(&self, id: i64) -> Result<bool>;
    // 物理删除学生及其关联记录
    async fn purge_student(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<GradeRecord>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<GradeRecord>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery) -> Result<GradeListResponse>;
    // 只修改分数
    async fn update_grade_score(&self, id: i64, score: f64) -> Result<Option<GradeRecord>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 考勤管理方法
    async fn create_attendance(&self, event: CreateAttendanceRequest) -> Result<AttendanceEvent>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceEvent>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceEvent>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    /// 课外活动管理方法
    async fn create_activity(&self, activity: CreateActivityRequest) -> Result<ActivityLog>;
    async fn get_activity_by_id(&self, id: i64) -> Result<Option<ActivityLog>>;
    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse>;
    async fn update_activity(
        &self,
        id: i64,
        update: UpdateActivityRequest,
    ) -> Result<Option<ActivityLog>>;
    async fn delete_activity(&self, id: i64) -> Result<bool>;

    /// 看板聚合方法
    async fn dashboard_totals(&self) -> Result<DashboardTotals>;
    async fn student_aggregates(&self) -> Result<Vec<StudentAggregate>>;
    async fn semester_breakdown(&self, params: SemesterQueryParams)
    -> Result<Vec<SemesterBreakdown>>;
    async fn subject_averages(&self, student_id: i64) -> Result<Vec<SubjectAverage>>;
}

/// 根据全局配置创建存储后端
pub async fn create_storage() -> Result<std::sync::Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(std::sync::Arc::new(storage))
}
