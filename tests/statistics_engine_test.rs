// ==========================================
// 考试成绩分析看板 - 统计引擎集成测试
// ==========================================
// 覆盖: 分桶计数守恒、等级分布守恒、及格率范围与口径、可重入、分段边界
// 工具: proptest 随机学生序列
// ==========================================


use exam_results_dashboard::domain::{CanonicalGrade, MarksRange, Student};
use exam_results_dashboard::engine::{StatisticsEngine, StatisticsError};
use exam_results_dashboard::importer::StudentImporterImpl;
use proptest::prelude::*;
use test_helpers::{raw_row, student};

const GRADE_POOL: &[&str] = &[
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D", "F", "", "X", "Pass",
];

fn student_strategy() -> impl Strategy<Value = (i64, usize)> {
    (-5_i64..=110, 0..GRADE_POOL.len())
}

fn class_strategy() -> impl Strategy<Value = Vec<Student>> {
    proptest::collection::vec(student_strategy(), 1..60).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (marks, grade_idx))| {
                student(idx as u32 + 1, "Generated Student", marks, GRADE_POOL[grade_idx])
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn marks_ranges_sum_to_total(students in class_strategy()) {
        let snapshot = StatisticsEngine::new().compute(&students).unwrap();
        let sum: usize = snapshot.marks_ranges.iter().map(|r| r.count).sum();
        prop_assert_eq!(sum, snapshot.total_students);
        prop_assert_eq!(snapshot.marks_ranges.len(), 7);
    }

    #[test]
    fn grade_distribution_sums_to_total(students in class_strategy()) {
        let snapshot = StatisticsEngine::new().compute(&students).unwrap();
        let sum: usize = snapshot.grade_distribution.iter().map(|g| g.count).sum();
        prop_assert_eq!(sum, students.len());
    }

    #[test]
    fn pass_rate_in_range_and_matches_definition(students in class_strategy()) {
        let snapshot = StatisticsEngine::new().compute(&students).unwrap();
        prop_assert!((0.0..=100.0).contains(&snapshot.pass_rate));

        let passing = students
            .iter()
            .filter(|s| CanonicalGrade::from_label(&s.grade).is_some_and(|g| g.is_passing()))
            .count();
        let expected = 100.0 * passing as f64 / students.len() as f64;
        prop_assert!((snapshot.pass_rate - expected).abs() < 1e-9);
    }

    #[test]
    fn compute_is_idempotent(students in class_strategy()) {
        let engine = StatisticsEngine::new();
        let first = engine.compute(&students).unwrap();
        let second = engine.compute(&students).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn extremes_bound_every_student(students in class_strategy()) {
        let snapshot = StatisticsEngine::new().compute(&students).unwrap();
        for s in &students {
            prop_assert!(s.final_marks <= snapshot.highest_marks.marks);
            prop_assert!(s.final_marks >= snapshot.lowest_marks.marks);
        }
    }
}

#[test]
fn test_bucket_boundaries() {
    assert_eq!(MarksRange::for_marks(90), MarksRange::From90);
    assert_eq!(MarksRange::for_marks(89), MarksRange::From80);
    assert_eq!(MarksRange::for_marks(39), MarksRange::Below40);
    assert_eq!(MarksRange::for_marks(40), MarksRange::From40);

    let students = vec![student(1, "A", 90, "A+"), student(2, "B", 89, "A"), student(3, "C", 39, "F")];
    let snapshot = StatisticsEngine::new().compute(&students).unwrap();
    assert_eq!(snapshot.range_count(MarksRange::From90), 1);
    assert_eq!(snapshot.range_count(MarksRange::From80), 1);
    assert_eq!(snapshot.range_count(MarksRange::Below40), 1);
}

#[test]
fn test_scenario_two_students_from_rows() {
    let importer = StudentImporterImpl::default();
    let rows = vec![
        raw_row(&[("Student", "Alice"), ("Final Marks", "95"), ("Grade", "A+")]),
        raw_row(&[("Student", "Bob"), ("Final Marks", "72"), ("Grade", "B-")]),
    ];
    let batch = importer.import_rows(&rows, "scenario.xlsx").unwrap();

    let snapshot = StatisticsEngine::new().compute(&batch.students).unwrap();

    assert_eq!(snapshot.total_students, 2);
    assert_eq!(snapshot.avg_marks, 83.5);
    assert_eq!(snapshot.highest_marks.marks, 95);
    assert_eq!(snapshot.highest_marks.grade, "A+");
    assert_eq!(snapshot.lowest_marks.marks, 72);
    assert_eq!(snapshot.lowest_marks.grade, "B-");
    assert_eq!(snapshot.pass_rate, 100.0);
}

#[test]
fn test_missing_final_marks_lands_in_lowest_bucket() {
    let importer = StudentImporterImpl::default();
    let rows = vec![
        raw_row(&[("Student", "Alice"), ("Final Marks", "81"), ("Grade", "A-")]),
        raw_row(&[("Student", "Carol")]),
    ];
    let batch = importer.import_rows(&rows, "scenario.xlsx").unwrap();
    assert_eq!(batch.students[1].final_marks, 0);

    let snapshot = StatisticsEngine::new().compute(&batch.students).unwrap();
    assert_eq!(snapshot.range_count(MarksRange::Below40), 1);
    assert_eq!(snapshot.lowest_marks.marks, 0);
    assert_eq!(snapshot.lowest_marks.grade, "N/A");
    assert_eq!(snapshot.pass_rate, 50.0);
}

#[test]
fn test_empty_sequence_is_rejected() {
    let err = StatisticsEngine::new().compute(&[]).unwrap_err();
    assert_eq!(err, StatisticsError::EmptyStudentSet);
}

#[test]
fn test_tied_highest_keeps_first_in_order() {
    let students = test_helpers::sample_class();
    let snapshot = StatisticsEngine::new().compute(&students).unwrap();

    // 1 号与 3 号并列 95 分,取导入顺序第一人
    assert_eq!(snapshot.highest_marks.marks, 95);
    assert_eq!(snapshot.highest_marks.grade, "A+");
    assert_eq!(snapshot.lowest_marks.grade, "F");
}
