//! 表格文件生成，用于导出和导入模板

use actix_web::{HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn export_error(kind: &str, e: impl std::fmt::Display) -> actix_web::Error {
    error!("{} generation failed: {}", kind, e);
    actix_web::error::ErrorInternalServerError(format!("{kind} generation failed: {e}"))
}

pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> ActixResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(headers)
        .map_err(|e| export_error("CSV", e))?;
    for row in rows {
        wtr.write_record(row).map_err(|e| export_error("CSV", e))?;
    }
    wtr.into_inner().map_err(|e| export_error("CSV", e))
}

pub fn build_xlsx(headers: &[&str], rows: &[Vec<String>]) -> ActixResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| export_error("XLSX", e))?;
    }

    for (row, values) in rows.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, value) in values.iter().enumerate() {
            worksheet
                .write_string(row, col as u16, value)
                .map_err(|e| export_error("XLSX", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| export_error("XLSX", e))
}

/// 按格式生成下载响应，format 不是 xlsx 时输出 CSV
pub fn spreadsheet_response(
    format: &str,
    basename: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> ActixResult<HttpResponse> {
    if format.eq_ignore_ascii_case("xlsx") {
        let buffer = build_xlsx(headers, rows)?;
        Ok(HttpResponse::Ok()
            .content_type(XLSX_CONTENT_TYPE)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{basename}.xlsx\""),
            ))
            .body(buffer))
    } else {
        let data = build_csv(headers, rows)?;
        Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{basename}.csv\""),
            ))
            .body(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_csv() {
        let data = build_csv(
            &["name", "class"],
            &[vec!["Asha".to_string(), "10B".to_string()]],
        )
        .expect("csv");
        assert_eq!(String::from_utf8(data).unwrap(), "name,class\nAsha,10B\n");
    }

    #[test]
    fn test_build_xlsx_is_zip() {
        let data = build_xlsx(&["code"], &[vec!["MATH".to_string()]]).expect("xlsx");
        assert!(data.starts_with(b"PK"));
    }
}
