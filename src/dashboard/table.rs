// ==========================================
// 考试成绩分析看板 - 成绩表视图
// ==========================================
// 职责: 学生序列 → 表格行（格式化、等级/状态样式、高亮）; 搜索; 按总分排序
// 红线: 搜索与排序只产生视图,不修改会话中的学生序列
// ==========================================

use crate::domain::student::Student;
use crate::domain::types::{SortOrder, FALLBACK_GRADE_CLASS};
use serde::{Deserialize, Serialize};

pub const STATUS_PROCESSED: &str = "processed";
pub const STATUS_PROCESSED_CLASS: &str = "status-processed";
pub const STATUS_PENDING_CLASS: &str = "status-pending";

/// 行高亮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowHighlight {
    /// 总分等于全体最高分
    TopPerformer,
    /// 总分等于全体最低分（且不是最高分）
    LowPerformer,
}

impl RowHighlight {
    pub fn css_class(&self) -> &'static str {
        match self {
            RowHighlight::TopPerformer => "top-performer",
            RowHighlight::LowPerformer => "low-performer",
        }
    }
}

// ==========================================
// TableRow - 表格行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 当前视图中的序号（从 1 开始）
    pub position: usize,
    pub id: u32,
    pub student: String,
    pub registration_no: String,
    /// 一位小数
    pub subject_marks: String,
    /// 一位小数
    pub assessment_marks: String,
    pub final_marks: i64,
    pub grade: String,
    pub grade_class: String,
    pub status: String,
    pub status_class: String,
    pub highlight: Option<RowHighlight>,
}

/// 排序结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedTable {
    pub order: SortOrder,
    pub rows: Vec<TableRow>,
}

/// 等级样式类（非标准等级 → grade-C）
pub fn grade_class(student: &Student) -> &'static str {
    student
        .canonical_grade()
        .map(|g| g.css_class())
        .unwrap_or(FALLBACK_GRADE_CLASS)
}

/// 状态样式类（"processed" 不区分大小写 → status-processed）
pub fn status_class(status: &str) -> &'static str {
    if status.eq_ignore_ascii_case(STATUS_PROCESSED) {
        STATUS_PROCESSED_CLASS
    } else {
        STATUS_PENDING_CLASS
    }
}

/// 按全体最高/最低分判定高亮
pub fn highlight_for(final_marks: i64, highest: i64, lowest: i64) -> Option<RowHighlight> {
    if final_marks == highest {
        Some(RowHighlight::TopPerformer)
    } else if final_marks == lowest {
        Some(RowHighlight::LowPerformer)
    } else {
        None
    }
}

/// 构建表格行
///
/// # 参数
/// - students: 当前视图中的学生（已过滤/排序）
/// - highest / lowest: 全体学生的最高/最低总分（来自统计快照）
pub fn build_rows(students: &[&Student], highest: i64, lowest: i64) -> Vec<TableRow> {
    students
        .iter()
        .enumerate()
        .map(|(idx, s)| TableRow {
            position: idx + 1,
            id: s.id,
            student: s.student.clone(),
            registration_no: s.registration_no.clone(),
            subject_marks: format!("{:.1}", s.subject_marks),
            assessment_marks: format!("{:.1}", s.assessment_marks),
            final_marks: s.final_marks,
            grade: s.grade_label().to_string(),
            grade_class: grade_class(s).to_string(),
            status: s.status.clone(),
            status_class: status_class(&s.status).to_string(),
            highlight: highlight_for(s.final_marks, highest, lowest),
        })
        .collect()
}

/// 搜索: 姓名/注册号/等级的不区分大小写子串匹配,结果保持导入顺序
///
/// 空查询返回全部学生
pub fn search<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let needle = query.to_lowercase();
    students
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.student.to_lowercase().contains(&needle)
                || s.registration_no.to_lowercase().contains(&needle)
                || s.grade.to_lowercase().contains(&needle)
        })
        .collect()
}

/// 按总分排序（稳定排序,并列保持导入顺序）
pub fn sort_by_final_marks(students: &[Student], order: SortOrder) -> Vec<&Student> {
    let mut sorted: Vec<&Student> = students.iter().collect();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.final_marks.cmp(&b.final_marks)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.final_marks.cmp(&a.final_marks)),
    }
    sorted
}
