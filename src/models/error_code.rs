/// 业务错误码，随响应信封的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 学生 20xx
    StudentNotFound = 2001,
    StudentAlreadyExists = 2002,

    // 科目 21xx
    SubjectNotFound = 2101,
    SubjectAlreadyExists = 2102,

    // 成绩 22xx
    GradeNotFound = 2201,
    GradeAlreadyExists = 2202,

    // 考勤 23xx
    AttendanceNotFound = 2301,
    AttendanceAlreadyExists = 2302,

    // 课外活动 24xx
    ActivityNotFound = 2401,

    // 导入导出 30xx
    ImportFileParseFailed = 3001,
    ImportFileMissingColumn = 3002,
    ImportFileDataInvalid = 3003,
    FileUploadFailed = 3004,
    ExportFailed = 3005,

    InternalServerError = 5000,
}
