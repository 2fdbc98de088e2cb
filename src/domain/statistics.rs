// ==========================================
// 考试成绩分析看板 - 统计快照
// ==========================================
// 职责: 统计引擎输出（按需重算,不持久化）
// ==========================================

use crate::domain::types::MarksRange;
use serde::{Deserialize, Serialize};

/// 极值分数及其对应等级（并列时取导入顺序第一人）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeMark {
    pub marks: i64,
    pub grade: String,
}

/// 等级分布条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: String,
    pub count: usize,
}

/// 分数段计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCount {
    pub range: MarksRange,
    pub count: usize,
}

// ==========================================
// StatisticsSnapshot - 统计快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub total_students: usize,
    pub avg_marks: f64,
    pub avg_subject: f64,
    pub avg_assessment: f64,
    pub highest_marks: ExtremeMark,
    pub lowest_marks: ExtremeMark,
    /// 标准等级顺序在前,非标准等级按首次出现顺序追加
    pub grade_distribution: Vec<GradeCount>,
    /// 固定 7 段,顺序同 MarksRange::ALL
    pub marks_ranges: Vec<RangeCount>,
    /// 百分比 [0, 100]
    pub pass_rate: f64,
}

impl StatisticsSnapshot {
    pub fn grade_count(&self, grade: &str) -> usize {
        self.grade_distribution
            .iter()
            .find(|g| g.grade == grade)
            .map(|g| g.count)
            .unwrap_or(0)
    }

    pub fn range_count(&self, range: MarksRange) -> usize {
        self.marks_ranges
            .iter()
            .find(|r| r.range == range)
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// 某等级人数占比（百分比）
    pub fn grade_percent(&self, count: usize) -> f64 {
        if self.total_students == 0 {
            return 0.0;
        }
        count as f64 / self.total_students as f64 * 100.0
    }
}
