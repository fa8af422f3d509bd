//! 批量导入服务
//!
//! 每一行独立校验并写入，失败的行记录行号、字段和原因，不影响其他行。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

use super::UploadService;
use super::table::{ImportTable, TableRow, parse_csv, parse_xlsx};
use crate::errors::DashboardError;
use crate::models::activities::requests::CreateActivityRequest;
use crate::models::attendance::requests::CreateAttendanceRequest;
use crate::models::grades::entities::Semester;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::upload::entities::{ImportRowError, UploadKind};
use crate::models::upload::responses::UploadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::services::{activities, students, subjects};
use crate::storage::Storage;
use crate::utils::validate::{FieldError, normalize_optional, parse_presence, validate_score};

const IMPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// 各类型的必需列，每组中至少出现一个
pub fn required_columns(kind: UploadKind) -> &'static [&'static [&'static str]] {
    match kind {
        UploadKind::Students => &[&["name"], &["class"]],
        UploadKind::Subjects => &[&["code"], &["name"]],
        UploadKind::Grades => &[
            &["student_id", "student_number"],
            &["subject_id", "subject_code"],
            &["semester"],
            &["score"],
        ],
        UploadKind::Attendance => &[&["student_id", "student_number"], &["date"], &["present"]],
        UploadKind::Activities => &[
            &["student_id", "student_number"],
            &["activity_name"],
            &["date"],
        ],
    }
}

pub async fn import_file(
    service: &UploadService,
    request: &HttpRequest,
    kind: UploadKind,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let (file_bytes, file_name) =
        match read_file_from_multipart(&mut payload, config.upload.max_size).await {
            Ok(result) => result,
            Err(msg) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    msg,
                )));
            }
        };

    let parsed = if file_name.to_ascii_lowercase().ends_with(".xlsx") {
        parse_xlsx(&file_bytes)
    } else {
        parse_csv(&file_bytes)
    };

    let table = match parsed.and_then(|table| {
        table.require_columns(required_columns(kind))?;
        Ok(table)
    }) {
        Ok(table) => table,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if table.total_rows() == 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "The file contains no data rows",
        )));
    }

    if table.total_rows() > config.upload.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!(
                "At most {} rows can be imported at once, got {}",
                config.upload.max_rows,
                table.total_rows()
            ),
        )));
    }

    let mut importer = RowImporter::new(storage, &table);
    let mut inserted = 0;
    let mut errors: Vec<ImportRowError> = table
        .unreadable
        .iter()
        .map(|bad| ImportRowError {
            row: bad.row,
            field: String::new(),
            message: bad.message.clone(),
        })
        .collect();

    for row in &table.rows {
        match importer.import_row(kind, row).await {
            Ok(()) => inserted += 1,
            Err(e) => errors.push(ImportRowError {
                row: row.row,
                field: e.field.to_string(),
                message: e.message,
            }),
        }
    }

    errors.sort_by_key(|e| e.row);

    if inserted > 0 {
        invalidate_dashboard_cache(request).await;
    }

    info!(
        "Imported {} {} from '{}': {} inserted, {} failed",
        table.total_rows(),
        kind,
        file_name,
        inserted,
        errors.len()
    );

    let response = UploadResponse {
        kind,
        total: table.total_rows(),
        inserted,
        failed: errors.len(),
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

async fn read_file_from_multipart(
    payload: &mut Multipart,
    max_size: usize,
) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Failed to read multipart field: {e}"))?;

        if field.name() != Some("file") {
            continue;
        }

        file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload.csv")
            .to_string();

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| format!("Failed to read file data: {e}"))?;
            if file_bytes.len() + data.len() > max_size {
                return Err(format!("File exceeds the maximum size of {max_size} bytes"));
            }
            file_bytes.extend_from_slice(&data);
        }
    }

    if file_bytes.is_empty() {
        return Err("Multipart field 'file' is missing or empty".to_string());
    }

    Ok((file_bytes, file_name))
}

/// 逐行导入，缓存同一文件内已解析的学号和科目代码
struct RowImporter<'a> {
    storage: Arc<dyn Storage>,
    table: &'a ImportTable,
    student_numbers: HashMap<String, i64>,
    subject_codes: HashMap<String, i64>,
}

impl<'a> RowImporter<'a> {
    fn new(storage: Arc<dyn Storage>, table: &'a ImportTable) -> Self {
        Self {
            storage,
            table,
            student_numbers: HashMap::new(),
            subject_codes: HashMap::new(),
        }
    }

    async fn import_row(&mut self, kind: UploadKind, row: &TableRow) -> Result<(), FieldError> {
        match kind {
            UploadKind::Students => self.import_student(row).await,
            UploadKind::Subjects => self.import_subject(row).await,
            UploadKind::Grades => self.import_grade(row).await,
            UploadKind::Attendance => self.import_attendance(row).await,
            UploadKind::Activities => self.import_activity(row).await,
        }
    }

    fn cell(&self, row: &TableRow, name: &str) -> Option<String> {
        self.table.cell(row, name).map(str::to_string)
    }

    fn required(&self, row: &TableRow, name: &'static str) -> Result<String, FieldError> {
        self.cell(row, name)
            .ok_or_else(|| FieldError::new(name, format!("{name} is required")))
    }

    async fn import_student(&mut self, row: &TableRow) -> Result<(), FieldError> {
        let student = CreateStudentRequest {
            name: self.cell(row, "name").unwrap_or_default(),
            class_name: self.cell(row, "class").unwrap_or_default(),
            discipline: self.cell(row, "discipline"),
            student_number: self.cell(row, "student_number"),
            enrollment_year: self
                .cell(row, "enrollment_year")
                .map(|v| parse_number::<i32>("enrollment_year", &v))
                .transpose()?,
            admission_date: self
                .cell(row, "admission_date")
                .map(|v| parse_date("admission_date", &v))
                .transpose()?,
        };
        let student = students::create::normalize_create_request(student)?;

        let created = self.storage.create_student(student).await.map_err(|e| {
            insert_error(
                e,
                "student_number",
                "A student with this student_number already exists",
            )
        })?;
        if let Some(number) = created.student_number {
            self.student_numbers.insert(number, created.id);
        }
        Ok(())
    }

    async fn import_subject(&mut self, row: &TableRow) -> Result<(), FieldError> {
        let subject = CreateSubjectRequest {
            code: self.cell(row, "code").unwrap_or_default(),
            name: self.cell(row, "name").unwrap_or_default(),
            discipline: self.cell(row, "discipline"),
        };
        let subject = subjects::create::normalize_create_request(subject)?;

        let created = self
            .storage
            .create_subject(subject)
            .await
            .map_err(|e| insert_error(e, "code", "A subject with this code already exists"))?;
        self.subject_codes.insert(created.code, created.id);
        Ok(())
    }

    async fn import_grade(&mut self, row: &TableRow) -> Result<(), FieldError> {
        let semester = self
            .required(row, "semester")?
            .parse::<Semester>()
            .map_err(|m| FieldError::new("semester", m))?;
        let score = parse_number::<f64>("score", &self.required(row, "score")?)?;
        validate_score(score).map_err(|m| FieldError::new("score", m))?;

        let student_id = self.resolve_student(row).await?;
        let subject_id = self.resolve_subject(row).await?;

        let grade = CreateGradeRequest {
            student_id,
            subject_id,
            semester,
            score,
        };
        self.storage.create_grade(grade).await.map_err(|e| {
            insert_error(
                e,
                "semester",
                "A grade for this student, subject and semester already exists",
            )
        })?;
        Ok(())
    }

    async fn import_attendance(&mut self, row: &TableRow) -> Result<(), FieldError> {
        let date = parse_date("date", &self.required(row, "date")?)?;
        let present = parse_presence(&self.required(row, "present")?)
            .map_err(|m| FieldError::new("present", m))?;
        let student_id = self.resolve_student(row).await?;

        let event = CreateAttendanceRequest {
            student_id,
            date,
            present,
            note: normalize_optional(self.cell(row, "note")),
        };
        self.storage.create_attendance(event).await.map_err(|e| {
            insert_error(
                e,
                "date",
                "Attendance for this student and date already exists",
            )
        })?;
        Ok(())
    }

    async fn import_activity(&mut self, row: &TableRow) -> Result<(), FieldError> {
        let date = parse_date("date", &self.required(row, "date")?)?;
        let activity = CreateActivityRequest {
            student_id: 0,
            activity_name: self.cell(row, "activity_name").unwrap_or_default(),
            category: self.cell(row, "category"),
            date,
            achievement: self.cell(row, "achievement"),
        };
        let mut activity = activities::create::normalize_create_request(activity)?;
        activity.student_id = self.resolve_student(row).await?;

        self.storage
            .create_activity(activity)
            .await
            .map_err(|e| insert_error(e, "", "Duplicate activity"))?;
        Ok(())
    }

    /// 优先使用 student_id，否则按学号查找在读学生
    async fn resolve_student(&mut self, row: &TableRow) -> Result<i64, FieldError> {
        if let Some(raw) = self.cell(row, "student_id") {
            let id = parse_number::<i64>("student_id", &raw)?;
            return match self.storage.get_student_by_id(id).await {
                Ok(Some(student)) => Ok(student.id),
                Ok(None) => Err(FieldError::new(
                    "student_id",
                    format!("Student {id} not found"),
                )),
                Err(e) => Err(lookup_error("student_id", e)),
            };
        }

        let number = self.cell(row, "student_number").ok_or_else(|| {
            FieldError::new("student_id", "student_id or student_number is required")
        })?;
        if let Some(id) = self.student_numbers.get(&number) {
            return Ok(*id);
        }
        match self.storage.get_student_by_number(&number).await {
            Ok(Some(student)) => {
                self.student_numbers.insert(number, student.id);
                Ok(student.id)
            }
            Ok(None) => Err(FieldError::new(
                "student_number",
                format!("Student with student_number '{number}' not found"),
            )),
            Err(e) => Err(lookup_error("student_number", e)),
        }
    }

    async fn resolve_subject(&mut self, row: &TableRow) -> Result<i64, FieldError> {
        if let Some(raw) = self.cell(row, "subject_id") {
            let id = parse_number::<i64>("subject_id", &raw)?;
            return match self.storage.get_subject_by_id(id).await {
                Ok(Some(subject)) => Ok(subject.id),
                Ok(None) => Err(FieldError::new(
                    "subject_id",
                    format!("Subject {id} not found"),
                )),
                Err(e) => Err(lookup_error("subject_id", e)),
            };
        }

        let code = self
            .cell(row, "subject_code")
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| FieldError::new("subject_id", "subject_id or subject_code is required"))?;
        if let Some(id) = self.subject_codes.get(&code) {
            return Ok(*id);
        }
        match self.storage.get_subject_by_code(&code).await {
            Ok(Some(subject)) => {
                self.subject_codes.insert(code, subject.id);
                Ok(subject.id)
            }
            Ok(None) => Err(FieldError::new(
                "subject_code",
                format!("Subject with code '{code}' not found"),
            )),
            Err(e) => Err(lookup_error("subject_code", e)),
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, FieldError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| FieldError::new(field, format!("'{value}' is not a valid number")))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.trim(), IMPORT_DATE_FORMAT).map_err(|_| {
        FieldError::new(
            field,
            format!("'{value}' is not a valid date, expected YYYY-MM-DD"),
        )
    })
}

fn lookup_error(field: &'static str, e: DashboardError) -> FieldError {
    error!("Import reference lookup failed: {}", e);
    FieldError::new(field, format!("Lookup failed: {}", e.message()))
}

/// 写入失败转为行错误，非客户端错误同时记录日志
fn insert_error(e: DashboardError, conflict_field: &'static str, conflict_msg: &str) -> FieldError {
    match e {
        DashboardError::Conflict(_) => FieldError::new(conflict_field, conflict_msg),
        DashboardError::NotFound(_) => FieldError::new("", "Referenced record not found"),
        e if e.is_client_error() => FieldError::new("", e.message().to_string()),
        e => {
            error!("Import row insert failed: {}", e);
            FieldError::new("", format!("Insert failed: {}", e.message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_number::<f64>("score", " 88.5 "), Ok(88.5));
        assert_eq!(parse_number::<i64>("student_id", "x").unwrap_err().field, "student_id");
        assert_eq!(
            parse_date("date", "2025-03-01"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
        assert!(parse_date("date", "01/03/2025").is_err());
    }

    #[test]
    fn test_insert_error_mapping() {
        let err = insert_error(DashboardError::conflict("UNIQUE"), "code", "duplicate");
        assert_eq!(err, FieldError::new("code", "duplicate"));

        let err = insert_error(DashboardError::database_operation("disk"), "code", "duplicate");
        assert_eq!(err.field, "");
        assert!(err.message.contains("disk"));
    }

    #[test]
    fn test_required_columns_cover_every_kind() {
        for kind in [
            UploadKind::Students,
            UploadKind::Subjects,
            UploadKind::Grades,
            UploadKind::Attendance,
            UploadKind::Activities,
        ] {
            assert!(!required_columns(kind).is_empty());
        }
        assert_eq!(required_columns(UploadKind::Grades).len(), 4);
    }
}
