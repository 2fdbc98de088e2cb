// ==========================================
// 考试成绩分析看板 - 统计引擎
// ==========================================
// 职责: 学生序列 → 统计快照
// 红线: 纯函数,无副作用; 始终基于完整学生序列（不基于搜索/排序视图）
// 输入: 导入顺序的 Student 序列（非空）
// 输出: StatisticsSnapshot
// ==========================================

use crate::domain::statistics::{ExtremeMark, GradeCount, RangeCount, StatisticsSnapshot};
use crate::domain::student::Student;
use crate::domain::types::{CanonicalGrade, MarksRange};
use thiserror::Error;
use tracing::instrument;

/// 统计引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    /// 空序列不做统计（避免产生 NaN）
    #[error("学生序列为空,无法计算统计")]
    EmptyStudentSet,
}

pub type StatisticsResult<T> = Result<T, StatisticsError>;

// ==========================================
// StatisticsEngine - 统计引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算统计快照
    ///
    /// # 返回
    /// - Err(EmptyStudentSet): 输入为空（调用方在导入阶段已拦截,正常不会发生）
    ///
    /// # 说明
    /// - 可重入: 同一输入重复调用得到相同结果
    /// - 最高/最低分等级: 取导入顺序中第一个达到该分数的学生
    #[instrument(skip(self, students), fields(count = students.len()))]
    pub fn compute(&self, students: &[Student]) -> StatisticsResult<StatisticsSnapshot> {
        let (first, _) = students
            .split_first()
            .ok_or(StatisticsError::EmptyStudentSet)?;

        let total = students.len() as f64;

        let mut sum_final = 0.0;
        let mut sum_subject = 0.0;
        let mut sum_assessment = 0.0;
        let mut highest = first;
        let mut lowest = first;
        let mut pass_count = 0usize;

        for student in students {
            sum_final += student.final_marks as f64;
            sum_subject += student.subject_marks;
            sum_assessment += student.assessment_marks;

            // 严格比较,并列时保留先出现者
            if student.final_marks > highest.final_marks {
                highest = student;
            }
            if student.final_marks < lowest.final_marks {
                lowest = student;
            }
            if student.is_passing() {
                pass_count += 1;
            }
        }

        Ok(StatisticsSnapshot {
            total_students: students.len(),
            avg_marks: sum_final / total,
            avg_subject: sum_subject / total,
            avg_assessment: sum_assessment / total,
            highest_marks: extreme_of(highest),
            lowest_marks: extreme_of(lowest),
            grade_distribution: grade_distribution(students),
            marks_ranges: marks_ranges(students),
            pass_rate: pass_count as f64 / total * 100.0,
        })
    }
}

fn extreme_of(student: &Student) -> ExtremeMark {
    ExtremeMark {
        marks: student.final_marks,
        grade: student.grade_label().to_string(),
    }
}

/// 等级分布: 标准等级按 A+ → F 排列,其余等级按首次出现顺序追加
pub fn grade_distribution(students: &[Student]) -> Vec<GradeCount> {
    // 首次出现顺序的计数表
    let mut seen: Vec<GradeCount> = Vec::new();
    for student in students {
        let label = student.grade_label();
        match seen.iter_mut().find(|g| g.grade == label) {
            Some(entry) => entry.count += 1,
            None => seen.push(GradeCount {
                grade: label.to_string(),
                count: 1,
            }),
        }
    }

    let mut ordered: Vec<GradeCount> = CanonicalGrade::ALL
        .iter()
        .filter_map(|grade| seen.iter().find(|g| g.grade == grade.label()).cloned())
        .collect();

    ordered.extend(
        seen.into_iter()
            .filter(|g| CanonicalGrade::from_label(&g.grade).is_none()),
    );

    ordered
}

/// 分数段计数（7 段齐全,计数可为 0）
pub fn marks_ranges(students: &[Student]) -> Vec<RangeCount> {
    let mut counts: Vec<RangeCount> = MarksRange::ALL
        .iter()
        .map(|range| RangeCount {
            range: *range,
            count: 0,
        })
        .collect();

    for student in students {
        let range = MarksRange::for_marks(student.final_marks);
        if let Some(entry) = counts.iter_mut().find(|c| c.range == range) {
            entry.count += 1;
        }
    }

    counts
}
