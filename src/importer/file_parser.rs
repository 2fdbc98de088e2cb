// ==========================================
// 考试成绩分析看板 - 工作簿解析器实现
// ==========================================
// 支持: Excel (.xlsx / .xls),仅按扩展名区分
// 规则: 仅读取首个工作表; 首行为表头; 其余行为记录
// ==========================================

use crate::domain::student::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::student_importer_trait::FileParser;
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::fmt::Display;
use std::io::Cursor;

// ==========================================
// 工作簿格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xls,
}

impl WorkbookFormat {
    /// 按文件名扩展名识别格式（不区分大小写）
    ///
    /// # 返回
    /// - Err(InvalidFileType): 非 .xlsx/.xls 文件,在任何解析之前拒绝
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".xlsx") {
            Ok(WorkbookFormat::Xlsx)
        } else if lower.ends_with(".xls") {
            Ok(WorkbookFormat::Xls)
        } else {
            Err(ImportError::InvalidFileType(file_name.to_string()))
        }
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<Vec<RawRow>> {
        let format = WorkbookFormat::from_file_name(file_name)?;
        let cursor = Cursor::new(bytes);

        let range = match format {
            WorkbookFormat::Xlsx => first_sheet_range(Xlsx::new(cursor)?)?,
            WorkbookFormat::Xls => first_sheet_range(Xls::new(cursor)?)?,
        };

        Ok(rows_from_range(&range))
    }
}

/// 读取首个工作表
fn first_sheet_range<R>(mut workbook: R) -> ImportResult<Range<Data>>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: Display,
{
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(e)) => Err(ImportError::UnparsableFile(e.to_string())),
        None => Err(ImportError::UnparsableFile("工作簿没有工作表".to_string())),
    }
}

/// 将单元格区域转换为原始行记录
///
/// - 表头与单元格文本均做 TRIM
/// - 表头为空的列忽略; 同名表头以首列为准
/// - 空单元格不写入（与"缺失"等价）
/// - 完全空白的行跳过
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for data_row in rows {
        let mut row_map = RawRow::new();

        for (col_idx, cell) in data_row.iter().enumerate() {
            let Some(header) = headers.get(col_idx) else {
                continue;
            };
            if header.is_empty() {
                continue;
            }
            let value = cell.to_string().trim().to_string();
            if value.is_empty() {
                continue;
            }
            row_map.entry(header.clone()).or_insert(value);
        }

        // 跳过完全空白的行
        if row_map.is_empty() {
            continue;
        }

        records.push(row_map);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            WorkbookFormat::from_file_name("results.xlsx").unwrap(),
            WorkbookFormat::Xlsx
        );
        assert_eq!(
            WorkbookFormat::from_file_name("RESULTS.XLS").unwrap(),
            WorkbookFormat::Xls
        );
        assert!(matches!(
            WorkbookFormat::from_file_name("results.csv"),
            Err(ImportError::InvalidFileType(_))
        ));
    }

    #[test]
    fn test_rows_use_header_text_as_keys() {
        let range = sheet(&[
            &[s(" Student "), s("Final Marks"), s("Grade")],
            &[s("Alice"), Data::Float(95.0), s("A+")],
            &[s("Bob"), Data::Int(72), s("B-")],
        ]);

        let rows = rows_from_range(&range);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Student"), Some(&"Alice".to_string()));
        assert_eq!(rows[0].get("Final Marks"), Some(&"95".to_string()));
        assert_eq!(rows[1].get("Final Marks"), Some(&"72".to_string()));
    }

    #[test]
    fn test_rows_skip_blank_and_empty_cells() {
        let range = sheet(&[
            &[s("Student"), s("Grade")],
            &[s("Alice"), Data::Empty],
            &[Data::Empty, s("  ")],
            &[s("Bob"), s("B")],
        ]);

        let rows = rows_from_range(&range);

        assert_eq!(rows.len(), 2);
        assert!(!rows[0].contains_key("Grade"));
        assert_eq!(rows[1].get("Grade"), Some(&"B".to_string()));
    }

    #[test]
    fn test_header_only_sheet_yields_no_rows() {
        let range = sheet(&[&[s("Student"), s("Grade")]]);
        assert!(rows_from_range(&range).is_empty());
    }

    #[test]
    fn test_corrupt_bytes_are_unparsable() {
        let parser = ExcelParser;
        let result = parser.parse_bytes("results.xlsx", b"not a workbook".to_vec());
        assert!(matches!(result, Err(ImportError::UnparsableFile(_))));
    }

    #[test]
    fn test_wrong_extension_rejected_before_parsing() {
        let parser = ExcelParser;
        let result = parser.parse_bytes("results.txt", Vec::new());
        assert!(matches!(result, Err(ImportError::InvalidFileType(_))));
    }
}
