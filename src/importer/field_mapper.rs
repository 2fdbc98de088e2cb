// ==========================================
// 考试成绩分析看板 - 字段映射器实现
// ==========================================
// 职责: 源列名（含别名）→ Student 字段 + 宽松类型转换
// 规则: 按别名顺序取第一个非缺失值; 均缺失则取默认值
// ==========================================

use crate::domain::student::{RawRow, Student};
use crate::importer::student_importer_trait::FieldMapper as FieldMapperTrait;
use regex::Regex;
use std::sync::LazyLock;

// ==========================================
// 列名别名表（顺序即优先级）
// ==========================================
pub mod aliases {
    pub const NAME: &[&str] = &["Student", "Name", "Student Name"];
    pub const NIC: &[&str] = &["NIC/Passport", "NIC", "Passport"];
    pub const REGISTRATION_NO: &[&str] = &["Registration No", "Reg No", "Registration Number"];
    pub const ADMISSION_NO: &[&str] = &["Admission No", "Admission Number"];
    pub const SUBJECT_MARKS: &[&str] = &["Subject Marks", "Exam Marks"];
    pub const ASSESSMENT_MARKS: &[&str] = &["Assessment Marks", "CA Marks"];
    pub const FINAL_MARKS: &[&str] = &["Final Marks", "Total Marks", "Total"];
    pub const GRADE: &[&str] = &["Grade"];
    pub const ABSENT_COUNT: &[&str] = &["Absent Count"];
    pub const STATUS: &[&str] = &["Status"];
    pub const REMARK: &[&str] = &["Remark"];
}

/// 状态列缺失时的默认值
pub const DEFAULT_STATUS: &str = "Unknown";

// 前缀数值: "12.5abc" → 12.5, "85.7" → 85（整数字段）
static LEADING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")
        .expect("Invalid leading decimal regex")
});
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("Invalid leading integer regex"));

pub struct StudentFieldMapper;

impl FieldMapperTrait for StudentFieldMapper {
    fn map_to_student(&self, row: &RawRow, id: u32) -> Student {
        Student {
            id,
            student: self.get_string(row, aliases::NAME),
            nic: self.get_string(row, aliases::NIC),
            registration_no: self.get_string(row, aliases::REGISTRATION_NO),
            admission_no: self.get_string(row, aliases::ADMISSION_NO),
            subject_marks: parse_lenient_f64(first_present(row, aliases::SUBJECT_MARKS)),
            assessment_marks: parse_lenient_f64(first_present(row, aliases::ASSESSMENT_MARKS)),
            final_marks: parse_lenient_i64(first_present(row, aliases::FINAL_MARKS)),
            grade: self.get_string(row, aliases::GRADE),
            absent_count: parse_lenient_i64(first_present(row, aliases::ABSENT_COUNT)),
            status: first_present(row, aliases::STATUS)
                .unwrap_or(DEFAULT_STATUS)
                .to_string(),
            remark: self.get_string(row, aliases::REMARK),
        }
    }
}

impl StudentFieldMapper {
    /// 提取字符串字段,缺失时为空串
    fn get_string(&self, row: &RawRow, keys: &[&str]) -> String {
        first_present(row, keys).unwrap_or_default().to_string()
    }
}

/// 按别名顺序取第一个非缺失值（键不存在或 TRIM 后为空均视为缺失）
pub fn first_present<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// 宽松解析浮点数: 取前缀数值,失败为 0
pub fn parse_lenient_f64(value: Option<&str>) -> f64 {
    value
        .and_then(|v| LEADING_DECIMAL.find(v.trim()))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 宽松解析整数: 取前缀整数部分,失败为 0
pub fn parse_lenient_i64(value: Option<&str>) -> i64 {
    value
        .and_then(|v| LEADING_INTEGER.find(v.trim()))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}
