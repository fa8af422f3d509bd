//! 上传文件解析
//!
//! 把 CSV 或 XLSX 读成统一的表格：表头名（小写）到列序号的映射，加上逐行的文本单元格。

use calamine::{Data, Reader, Xlsx};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use std::io::Cursor;

use crate::models::ErrorCode;

/// 整个文件无法导入的错误
#[derive(Debug, PartialEq)]
pub enum TableError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl TableError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "The file contains no data rows".to_string(),
        }
    }
}

/// 一行数据，row 为文件中的行号（表头为第 1 行）
#[derive(Debug, Clone)]
pub struct TableRow {
    pub row: usize,
    cells: Vec<String>,
}

/// 无法解码的行，只影响该行
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadableRow {
    pub row: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct ImportTable {
    columns: HashMap<String, usize>,
    pub rows: Vec<TableRow>,
    pub unreadable: Vec<UnreadableRow>,
}

impl ImportTable {
    fn new(headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();
        Self {
            columns,
            rows,
            unreadable: Vec::new(),
        }
    }

    /// 数据行总数，包括无法解码的行
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.unreadable.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 每组列名至少要出现一个
    pub fn require_columns(&self, groups: &[&[&str]]) -> Result<(), TableError> {
        for group in groups {
            if !group.iter().any(|name| self.has_column(name)) {
                return Err(TableError::MissingColumn(group.join(" or ")));
            }
        }
        Ok(())
    }

    /// 读取单元格，空白视为未填写
    pub fn cell<'a>(&self, row: &'a TableRow, name: &str) -> Option<&'a str> {
        let idx = *self.columns.get(name)?;
        row.cells
            .get(idx)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

pub fn parse_csv(data: &[u8]) -> Result<ImportTable, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let header_record = rdr
        .byte_headers()
        .map_err(|e| TableError::ParseFailed(format!("Failed to read header row: {e}")))?
        .clone();
    let headers = header_record
        .iter()
        .map(|h| {
            std::str::from_utf8(h)
                // 去掉可能存在的 UTF-8 BOM
                .map(|h| h.trim_start_matches('\u{feff}').to_string())
                .map_err(|_| {
                    TableError::ParseFailed("Header row is not valid UTF-8 text".to_string())
                })
        })
        .collect::<Result<Vec<String>, TableError>>()?;

    let mut rows = Vec::new();
    let mut unreadable = Vec::new();
    for (idx, result) in rdr.byte_records().enumerate() {
        let fallback_row = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(TableError::ParseFailed(format!(
                    "Failed to read row {fallback_row}: {e}"
                )));
            }
            Err(e) => {
                let row = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_row);
                unreadable.push(UnreadableRow {
                    row,
                    message: format!("Malformed row: {e}"),
                });
                continue;
            }
        };

        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_row);
        let cells = match record
            .iter()
            .map(|cell| std::str::from_utf8(cell).map(str::to_string))
            .collect::<Result<Vec<String>, _>>()
        {
            Ok(cells) => cells,
            Err(_) => {
                unreadable.push(UnreadableRow {
                    row,
                    message: "Row contains text that is not valid UTF-8".to_string(),
                });
                continue;
            }
        };
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(TableRow { row, cells });
    }

    let mut table = ImportTable::new(headers, rows);
    table.unreadable = unreadable;
    Ok(table)
}

pub fn parse_xlsx(data: &[u8]) -> Result<ImportTable, TableError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| TableError::ParseFailed(format!("Failed to open XLSX file: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TableError::ParseFailed("Workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TableError::ParseFailed(format!("Failed to read worksheet: {e}")))?;

    // 区域可能不从 A1 开始
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows_iter = range.rows();

    let header_row = rows_iter.next().ok_or(TableError::EmptyFile)?;
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let rows = rows_iter
        .enumerate()
        .map(|(idx, row)| TableRow {
            row: first_row + idx + 2,
            cells: row.iter().map(cell_text).collect(),
        })
        .filter(|row| row.cells.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(ImportTable::new(headers, rows))
}

/// 单元格转文本；整数形式的浮点数去掉小数部分，日期转为 YYYY-MM-DD
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::DateTime(dt) => excel_serial_date(dt.as_f64())
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.to_string()),
        other => other.to_string().trim().to_string(),
    }
}

// Excel 序列日期以 1899-12-30 为第 0 天
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_headers_case_insensitive() {
        let table = parse_csv(b"Name,CLASS\nAsha,10B\n,\nRavi,10C\n").expect("table");
        assert!(table.has_column("name"));
        assert!(table.has_column("class"));
        // 空行被跳过，行号仍对应文件行
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].row, 2);
        assert_eq!(table.rows[1].row, 4);
        assert_eq!(table.cell(&table.rows[1], "class"), Some("10C"));
    }

    #[test]
    fn test_missing_column_reports_alternatives() {
        let table = parse_csv(b"semester,score\nS1,80\n").expect("table");
        let err = table
            .require_columns(&[&["student_id", "student_number"], &["semester"]])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::MissingColumn("student_id or student_number".to_string())
        );
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }

    #[test]
    fn test_blank_cells_are_none() {
        let table = parse_csv(b"name,discipline\nAsha,  \n").expect("table");
        assert_eq!(table.cell(&table.rows[0], "discipline"), None);
        assert_eq!(table.cell(&table.rows[0], "unknown"), None);
    }

    #[test]
    fn test_invalid_utf8_row_only_affects_that_row() {
        let table = parse_csv(b"name,class\nAsha,10B\nR\xffvi,10C\nMeera,10C\n").expect("table");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].row, 2);
        assert_eq!(table.rows[1].row, 4);
        assert_eq!(table.unreadable.len(), 1);
        assert_eq!(table.unreadable[0].row, 3);
        assert_eq!(table.total_rows(), 3);
    }

    #[test]
    fn test_invalid_utf8_header_is_fatal() {
        let err = parse_csv(b"na\xffme,class\nAsha,10B\n").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ImportFileParseFailed);
    }

    #[test]
    fn test_excel_serial_date() {
        assert_eq!(
            excel_serial_date(45658.0),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(excel_serial_date(-1.0), None);
    }

    #[test]
    fn test_invalid_xlsx_is_parse_error() {
        let err = parse_xlsx(b"not a zip file").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ImportFileParseFailed);
    }
}
