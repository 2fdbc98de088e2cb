// ==========================================
// 考试成绩分析看板 - 等级细分与优秀学生
// ==========================================
// 职责: 按等级计算平时/考试均分（对比图数据源）,按总分选出前 N 名
// 输入: 完整学生序列 + 统计快照的等级分布
// ==========================================

use crate::domain::statistics::GradeCount;
use crate::domain::student::Student;
use serde::{Deserialize, Serialize};

/// 单个等级的分项均分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAverages {
    pub grade: String,
    pub student_count: usize,
    pub avg_subject: f64,
    pub avg_assessment: f64,
}

/// 前 N 名条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub id: u32,
    /// 姓名前两个词
    pub short_name: String,
    pub final_marks: i64,
}

/// 按等级分布顺序计算各等级的考试/平时均分
///
/// 空等级学生归入 "N/A"（与分布统计口径一致）
pub fn averages_by_grade(students: &[Student], distribution: &[GradeCount]) -> Vec<GradeAverages> {
    distribution
        .iter()
        .map(|entry| {
            let (count, sum_subject, sum_assessment) = students
                .iter()
                .filter(|s| s.grade_label() == entry.grade)
                .fold((0usize, 0.0, 0.0), |(n, sub, ass), s| {
                    (n + 1, sub + s.subject_marks, ass + s.assessment_marks)
                });

            let (avg_subject, avg_assessment) = if count == 0 {
                (0.0, 0.0)
            } else {
                (sum_subject / count as f64, sum_assessment / count as f64)
            };

            GradeAverages {
                grade: entry.grade.clone(),
                student_count: count,
                avg_subject,
                avg_assessment,
            }
        })
        .collect()
}

/// 按总分降序取前 limit 名（稳定排序,并列保持导入顺序）
pub fn top_performers(students: &[Student], limit: usize) -> Vec<TopPerformer> {
    sorted_by_final_marks_desc(students)
        .into_iter()
        .take(limit)
        .map(|s| TopPerformer {
            id: s.id,
            short_name: short_name(&s.student),
            final_marks: s.final_marks,
        })
        .collect()
}

/// 按总分降序的引用视图（不修改原序列）
pub fn sorted_by_final_marks_desc(students: &[Student]) -> Vec<&Student> {
    let mut sorted: Vec<&Student> = students.iter().collect();
    sorted.sort_by(|a, b| b.final_marks.cmp(&a.final_marks));
    sorted
}

/// 姓名截取前两个词
pub fn short_name(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::statistics::grade_distribution;

    fn student(id: u32, name: &str, final_marks: i64, grade: &str, sub: f64, ass: f64) -> Student {
        Student {
            id,
            student: name.to_string(),
            nic: String::new(),
            registration_no: String::new(),
            admission_no: String::new(),
            subject_marks: sub,
            assessment_marks: ass,
            final_marks,
            grade: grade.to_string(),
            absent_count: 0,
            status: "Unknown".to_string(),
            remark: String::new(),
        }
    }

    #[test]
    fn test_averages_follow_distribution_order() {
        let students = vec![
            student(1, "A", 70, "B", 50.0, 20.0),
            student(2, "B", 90, "A+", 60.0, 30.0),
            student(3, "C", 72, "B", 54.0, 18.0),
            student(4, "D", 10, "", 8.0, 2.0),
        ];
        let dist = grade_distribution(&students);

        let averages = averages_by_grade(&students, &dist);

        assert_eq!(averages.len(), 3);
        assert_eq!(averages[0].grade, "A+");
        assert_eq!(averages[1].grade, "B");
        assert_eq!(averages[1].student_count, 2);
        assert_eq!(averages[1].avg_subject, 52.0);
        assert_eq!(averages[1].avg_assessment, 19.0);
        assert_eq!(averages[2].grade, "N/A");
        assert_eq!(averages[2].avg_subject, 8.0);
    }

    #[test]
    fn test_top_performers_stable_and_limited() {
        let students = vec![
            student(1, "Amal Perera Silva", 80, "A", 0.0, 0.0),
            student(2, "Nimal", 95, "A+", 0.0, 0.0),
            student(3, "Kamal Fernando", 80, "A", 0.0, 0.0),
            student(4, "Sunil", 60, "B", 0.0, 0.0),
        ];

        let top = top_performers(&students, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].id, 2);
        assert_eq!(top[1].id, 1);
        assert_eq!(top[1].short_name, "Amal Perera");
        assert_eq!(top[2].id, 3);
    }

    #[test]
    fn test_top_performers_fewer_than_limit() {
        let students = vec![student(1, "Solo", 50, "C", 0.0, 0.0)];
        assert_eq!(top_performers(&students, 5).len(), 1);
    }
}
