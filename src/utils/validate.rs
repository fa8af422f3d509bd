use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _-]{0,19}$").expect("Invalid class regex"));

static STUDENT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_/-]{0,31}$").expect("Invalid student number regex")
});

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,19}$").expect("Invalid code regex"));

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;

/// 必填文本校验：去除首尾空白后非空，且不超过 max_len 个字符
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} must be at most {max_len} characters"));
    }
    Ok(())
}

pub fn validate_student_name(name: &str) -> Result<(), String> {
    validate_required_text("name", name, 100)
}

pub fn validate_class_name(class_name: &str) -> Result<(), String> {
    // 班级格式：字母数字开头，最多 20 个字符，例如 "10B"
    if !CLASS_NAME_RE.is_match(class_name.trim()) {
        return Err(
            "class must be 1-20 letters, digits, spaces, underscores or hyphens".to_string(),
        );
    }
    Ok(())
}

pub fn validate_student_number(number: &str) -> Result<(), &'static str> {
    if !STUDENT_NUMBER_RE.is_match(number.trim()) {
        return Err("student_number must be 1-32 letters, digits, '_', '-' or '/'");
    }
    Ok(())
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if !SUBJECT_CODE_RE.is_match(code.trim()) {
        return Err("code must be 1-20 letters, digits, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_score(score: f64) -> Result<(), String> {
    // 分数必须为有限值且在 0..=100
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        ));
    }
    Ok(())
}

pub fn validate_enrollment_year(year: i32) -> Result<(), String> {
    if !(1900..=2100).contains(&year) {
        return Err(format!("enrollment_year must be between 1900 and 2100, got {year}"));
    }
    Ok(())
}

/// 解析出勤标记，支持 true/false、1/0、yes/no、p/a（大小写不敏感）
pub fn parse_presence(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "p" | "present" => Ok(true),
        "false" | "0" | "no" | "n" | "a" | "absent" => Ok(false),
        other => Err(format!(
            "invalid presence value '{other}', expected true/false, 1/0, yes/no or p/a"
        )),
    }
}

/// 带字段名的校验错误，导入时用于逐行报告
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// 空白字符串视为未填写
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
