//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod attendance;
mod dashboard;
mod grades;
mod students;
mod subjects;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{DashboardError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 保留约束冲突的分类，其余数据库错误附带上下文
pub(crate) fn db_err(context: &'static str) -> impl Fn(DbErr) -> DashboardError {
    move |e| match DashboardError::from(e) {
        DashboardError::DatabaseOperation(msg) => {
            DashboardError::database_operation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

/// 规范化分页参数：size 限制在 1..=100，page 上限保证偏移量不超过 i64::MAX
pub(crate) fn page_window(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let size = size.unwrap_or(10).clamp(1, 100) as u64;
    let max_page = i64::MAX as u64 / size;
    let page = (page.unwrap_or(1).max(1) as u64).min(max_page);
    (page, size)
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DashboardError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DashboardError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接相互独立，只能使用单连接且不回收
        let in_memory = url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { config.pool_size.max(1) };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));
        pool_options = if in_memory {
            pool_options.idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| DashboardError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DashboardError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DashboardError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 连通性检查
    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(db_err("数据库连通性检查失败"))?;
        Ok(())
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_number(&self, student_number: &str) -> Result<Option<Student>> {
        self.get_student_by_number_impl(student_number).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_for_export(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<Student>> {
        self.list_students_for_export_impl(query, limit).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn withdraw_student(&self, id: i64) -> Result<bool> {
        self.withdraw_student_impl(id).await
    }

    async fn purge_student(&self, id: i64) -> Result<bool> {
        self.purge_student_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(code).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 成绩模块
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<GradeRecord> {
        self.create_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<GradeRecord>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade_score(&self, id: i64, score: f64) -> Result<Option<GradeRecord>> {
        self.update_grade_score_impl(id, score).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 考勤模块
    async fn create_attendance(&self, event: CreateAttendanceRequest) -> Result<AttendanceEvent> {
        self.create_attendance_impl(event).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceEvent>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceEvent>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    // 课外活动模块
    async fn create_activity(&self, activity: CreateActivityRequest) -> Result<ActivityLog> {
        self.create_activity_impl(activity).await
    }

    async fn get_activity_by_id(&self, id: i64) -> Result<Option<ActivityLog>> {
        self.get_activity_by_id_impl(id).await
    }

    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        self.list_activities_with_pagination_impl(query).await
    }

    async fn update_activity(
        &self,
        id: i64,
        update: UpdateActivityRequest,
    ) -> Result<Option<ActivityLog>> {
        self.update_activity_impl(id, update).await
    }

    async fn delete_activity(&self, id: i64) -> Result<bool> {
        self.delete_activity_impl(id).await
    }

    // 看板聚合
    async fn dashboard_totals(&self) -> Result<DashboardTotals> {
        self.dashboard_totals_impl().await
    }

    async fn student_aggregates(&self) -> Result<Vec<StudentAggregate>> {
        self.student_aggregates_impl().await
    }

    async fn semester_breakdown(
        &self,
        params: SemesterQueryParams,
    ) -> Result<Vec<SemesterBreakdown>> {
        self.semester_breakdown_impl(params).await
    }

    async fn subject_averages(&self, student_id: i64) -> Result<Vec<SubjectAverage>> {
        self.subject_averages_impl(student_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults_and_bounds() {
        assert_eq!(page_window(None, None), (1, 10));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1));
        assert_eq!(page_window(Some(-5), Some(500)), (1, 100));
        assert_eq!(page_window(Some(3), Some(20)), (3, 20));
    }

    #[test]
    fn test_page_window_offset_never_overflows() {
        for size in [1, 7, 100] {
            let (page, size) = page_window(Some(i64::MAX), Some(size));
            let offset = (page - 1).checked_mul(size).expect("offset fits in u64");
            assert!(offset <= i64::MAX as u64);
            assert!(page.checked_mul(size).is_some());
        }
    }
}
