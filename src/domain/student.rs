// ==========================================
// 考试成绩分析看板 - 学生成绩记录
// ==========================================
// 职责: 规范化后的学生记录（每行成绩表一条）
// 红线: 导入后不可变,仅随重新上传整体替换
// ==========================================

use crate::domain::types::{CanonicalGrade, UNGRADED_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始行记录（表头文本 → 单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// Student - 学生成绩记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// 导入序号（从 1 开始,与输入行顺序一致）
    pub id: u32,
    pub student: String,
    pub nic: String,
    pub registration_no: String,
    pub admission_no: String,
    pub subject_marks: f64,
    pub assessment_marks: f64,
    /// 排名、分数段、及格判定均以此为准
    pub final_marks: i64,
    pub grade: String,
    pub absent_count: i64,
    pub status: String,
    pub remark: String,
}

impl Student {
    /// 分布统计使用的等级标签（空等级 → "N/A"）
    pub fn grade_label(&self) -> &str {
        if self.grade.is_empty() {
            UNGRADED_LABEL
        } else {
            &self.grade
        }
    }

    pub fn canonical_grade(&self) -> Option<CanonicalGrade> {
        CanonicalGrade::from_label(&self.grade)
    }

    /// 非标准等级与空等级一律视为不及格
    pub fn is_passing(&self) -> bool {
        self.canonical_grade().is_some_and(|g| g.is_passing())
    }
}

// ==========================================
// ImportedBatch - 一次上传的导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedBatch {
    /// 原始文件名（不含目录）
    pub file_name: String,
    /// 批次标签（注册号前缀或文件名）
    pub batch_label: String,
    /// 非空,按输入行顺序排列
    pub students: Vec<Student>,
}
