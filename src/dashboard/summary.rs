// ==========================================
// 考试成绩分析看板 - 汇总卡片与等级汇总
// ==========================================
// 职责: 统计快照 → 展示文本（统一格式化,一位小数）
// ==========================================

use crate::domain::statistics::{ExtremeMark, StatisticsSnapshot};
use crate::domain::types::{CanonicalGrade, NEUTRAL_GRADE_BACKGROUND, NEUTRAL_GRADE_COLOR};
use crate::i18n::t;
use serde::{Deserialize, Serialize};

// ==========================================
// SummaryCards - 汇总卡片
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub total_students: usize,
    pub average_marks: String,
    /// 形如 "95 (A+)"
    pub highest_marks: String,
    pub lowest_marks: String,
    pub avg_subject: String,
    pub avg_assessment: String,
    /// 形如 "100.0%"
    pub pass_rate: String,
}

fn format_extreme(extreme: &ExtremeMark) -> String {
    format!("{} ({})", extreme.marks, extreme.grade)
}

impl SummaryCards {
    pub fn from_snapshot(snapshot: &StatisticsSnapshot) -> Self {
        Self {
            total_students: snapshot.total_students,
            average_marks: format!("{:.1}", snapshot.avg_marks),
            highest_marks: format_extreme(&snapshot.highest_marks),
            lowest_marks: format_extreme(&snapshot.lowest_marks),
            avg_subject: format!("{:.1}", snapshot.avg_subject),
            avg_assessment: format!("{:.1}", snapshot.avg_assessment),
            pass_rate: format!("{:.1}%", snapshot.pass_rate),
        }
    }

    /// 带当前语言标签的卡片列表（展示顺序固定）
    pub fn labeled(&self) -> Vec<(String, String)> {
        vec![
            (t("summary.total_students"), self.total_students.to_string()),
            (t("summary.average_marks"), self.average_marks.clone()),
            (t("summary.highest_marks"), self.highest_marks.clone()),
            (t("summary.lowest_marks"), self.lowest_marks.clone()),
            (t("summary.avg_subject"), self.avg_subject.clone()),
            (t("summary.avg_assessment"), self.avg_assessment.clone()),
            (t("summary.pass_rate"), self.pass_rate.clone()),
        ]
    }
}

/// 等级汇总条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummaryItem {
    pub grade: String,
    pub count: usize,
    /// 占总人数百分比,一位小数（不带 %）
    pub percent: String,
    pub color: String,
    pub background: String,
}

/// 等级配色（主色, 背景色）; 非标准等级使用中性配色
pub fn grade_palette(grade: &str) -> (&'static str, &'static str) {
    match CanonicalGrade::from_label(grade) {
        Some(g) => (g.color(), g.background()),
        None => (NEUTRAL_GRADE_COLOR, NEUTRAL_GRADE_BACKGROUND),
    }
}

/// 按分布顺序生成等级汇总
pub fn grade_summary(snapshot: &StatisticsSnapshot) -> Vec<GradeSummaryItem> {
    snapshot
        .grade_distribution
        .iter()
        .map(|entry| {
            let (color, background) = grade_palette(&entry.grade);
            GradeSummaryItem {
                grade: entry.grade.clone(),
                count: entry.count,
                percent: format!("{:.1}", snapshot.grade_percent(entry.count)),
                color: color.to_string(),
                background: background.to_string(),
            }
        })
        .collect()
}
