// ==========================================
// 考试成绩分析看板 - 批次识别
// ==========================================
// 规则:
// 1. 首条记录注册号形如 ABC/2024-12X/DEF... → 取匹配前缀
// 2. 否则取文件名并去掉 .xlsx / .xls 后缀
// 3. 文件名为空时使用默认标签
// ==========================================

use crate::domain::student::Student;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// 默认批次标签
pub const DEFAULT_BATCH_LABEL: &str = "Exam Results";

// 大写字母 / 四位年份 - 数字 [大写后缀] / 大写字母
static BATCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+/[0-9]{4}-[0-9]+[A-Z]*/[A-Z]+)").expect("Invalid batch pattern regex")
});

#[derive(Debug, Clone)]
pub struct BatchIdentifier {
    default_label: String,
}

impl Default for BatchIdentifier {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_LABEL)
    }
}

impl BatchIdentifier {
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            default_label: default_label.into(),
        }
    }

    /// 生成批次标签
    ///
    /// # 参数
    /// - students: 规范化后的学生序列（调用方保证非空）
    /// - file_name: 原始文件名
    pub fn identify(&self, students: &[Student], file_name: &str) -> String {
        students
            .first()
            .and_then(|s| Self::from_registration_no(&s.registration_no))
            .unwrap_or_else(|| self.label_from_file_name(file_name))
    }

    /// 从注册号提取批次前缀
    pub fn from_registration_no(registration_no: &str) -> Option<String> {
        BATCH_PATTERN
            .captures(registration_no)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// 文件名回退（仅取文件名部分,去掉 Excel 后缀）
    pub fn label_from_file_name(&self, file_name: &str) -> String {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);

        let stem = strip_suffix_ignore_case(base, ".xlsx")
            .or_else(|| strip_suffix_ignore_case(base, ".xls"))
            .unwrap_or(base)
            .trim();

        if stem.is_empty() {
            self.default_label.clone()
        } else {
            stem.to_string()
        }
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split_at = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split_at) {
        return None;
    }
    let (head, tail) = value.split_at(split_at);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
