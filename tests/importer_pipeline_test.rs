// ==========================================
// 考试成绩分析看板 - 导入流程集成测试
// ==========================================
// 覆盖: 扩展名校验、文件读取、工作簿解析失败、空数据集、字段映射、批次识别
// ==========================================


use exam_results_dashboard::domain::RawRow;
use exam_results_dashboard::importer::{
    BatchIdentifier, FileParser, ImportError, ImportResult, StudentFieldMapper, StudentImporter,
    StudentImporterImpl,
};
use exam_results_dashboard::engine::StatisticsEngine;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use test_helpers::raw_row;

/// 忽略文件内容,返回预置行的解析器
struct StubParser {
    rows: Vec<RawRow>,
}

impl FileParser for StubParser {
    fn parse_bytes(&self, _file_name: &str, _bytes: Vec<u8>) -> ImportResult<Vec<RawRow>> {
        Ok(self.rows.clone())
    }
}

fn temp_file_with_suffix(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("results")
        .suffix(suffix)
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content).expect("写入临时文件失败");
    file
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn importer_with_rows(rows: Vec<RawRow>) -> StudentImporterImpl {
    StudentImporterImpl::new(
        Box::new(StubParser { rows }),
        Box::new(StudentFieldMapper),
        BatchIdentifier::default(),
    )
}

#[tokio::test]
async fn test_rejects_non_excel_extension_before_reading() {
    let importer = StudentImporterImpl::default();
    let file = temp_file_with_suffix(".csv", b"Student,Final Marks\nAlice,95\n");

    let err = importer.import_file(file.path()).await.unwrap_err();
    assert!(matches!(err, ImportError::InvalidFileType(_)));
}

#[tokio::test]
async fn test_missing_file_is_reported() {
    let importer = StudentImporterImpl::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");

    let err = importer.import_file(&path).await.unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[tokio::test]
async fn test_corrupt_workbook_is_unparsable() {
    let importer = StudentImporterImpl::default();

    let xlsx = temp_file_with_suffix(".xlsx", b"definitely not a zip archive");
    let err = importer.import_file(xlsx.path()).await.unwrap_err();
    assert!(matches!(err, ImportError::UnparsableFile(_)));

    let xls = temp_file_with_suffix(".XLS", b"definitely not a compound document");
    let err = importer.import_file(xls.path()).await.unwrap_err();
    assert!(matches!(err, ImportError::UnparsableFile(_)));
}

#[tokio::test]
async fn test_real_workbook_reads_first_sheet_only() {
    let importer = StudentImporterImpl::default();

    let batch = importer
        .import_file(&fixture("two_sheet_results.xlsx"))
        .await
        .unwrap();

    // 第二个工作表 (Notes) 的行不导入; 空白行跳过
    assert_eq!(batch.file_name, "two_sheet_results.xlsx");
    assert_eq!(batch.batch_label, "HND/2024-1F/IT");
    let names: Vec<&str> = batch.students.iter().map(|s| s.student.as_str()).collect();
    assert_eq!(names, vec!["Alice Perera", "Bob Silva"]);

    // 数值单元格经文本化后按宽松规则解析
    let alice = &batch.students[0];
    assert_eq!(alice.final_marks, 95);
    assert_eq!(alice.subject_marks, 66.5);
    assert_eq!(alice.assessment_marks, 28.5);
    assert_eq!(alice.grade, "A+");
    assert_eq!(batch.students[1].final_marks, 72);
    assert_eq!(batch.students[1].subject_marks, 50.4);

    let snapshot = StatisticsEngine::new().compute(&batch.students).unwrap();
    assert_eq!(snapshot.total_students, 2);
    assert_eq!(snapshot.avg_marks, 83.5);
    assert_eq!(snapshot.highest_marks.marks, 95);
    assert_eq!(snapshot.lowest_marks.grade, "B-");
    assert_eq!(snapshot.pass_rate, 100.0);
}

#[tokio::test]
async fn test_full_pipeline_with_injected_parser() {
    let importer = importer_with_rows(vec![
        raw_row(&[
            ("Student", "Alice Perera"),
            ("Registration No", "ABC/2024-12X/DEF001"),
            ("Subject Marks", "62.5"),
            ("Assessment Marks", "31"),
            ("Final Marks", "94"),
            ("Grade", "A+"),
            ("Status", "Processed"),
        ]),
        raw_row(&[("Student", "Bob"), ("Final Marks", "71.9abc"), ("Grade", "B-")]),
    ]);
    let file = temp_file_with_suffix(".xlsx", b"stub");

    let batch = importer.import_file(file.path()).await.unwrap();

    assert_eq!(batch.batch_label, "ABC/2024-12X/DEF");
    assert!(batch.file_name.ends_with(".xlsx"));
    assert_eq!(batch.students.len(), 2);

    let alice = &batch.students[0];
    assert_eq!(alice.id, 1);
    assert_eq!(alice.subject_marks, 62.5);
    assert_eq!(alice.assessment_marks, 31.0);
    assert_eq!(alice.final_marks, 94);

    let bob = &batch.students[1];
    assert_eq!(bob.id, 2);
    assert_eq!(bob.final_marks, 71);
    assert_eq!(bob.registration_no, "");
    assert_eq!(bob.status, "Unknown");
}

#[tokio::test]
async fn test_empty_sheet_is_empty_dataset() {
    let importer = importer_with_rows(Vec::new());
    let file = temp_file_with_suffix(".xlsx", b"stub");

    let err = importer.import_file(file.path()).await.unwrap_err();
    assert!(matches!(err, ImportError::EmptyDataset));
}

#[test]
fn test_batch_label_falls_back_to_file_name() {
    let importer = StudentImporterImpl::default();
    let rows = vec![raw_row(&[("Student", "Alice"), ("Registration No", "XYZ123")])];

    let batch = importer.import_rows(&rows, "results.xlsx").unwrap();
    assert_eq!(batch.batch_label, "results");
}

#[test]
fn test_batch_label_uses_first_student_only() {
    let importer = StudentImporterImpl::default();
    let rows = vec![
        raw_row(&[("Student", "Alice"), ("Registration No", "")]),
        raw_row(&[("Student", "Bob"), ("Registration No", "ABC/2024-12X/DEF002")]),
    ];

    let batch = importer.import_rows(&rows, "term-2.XLS").unwrap();
    assert_eq!(batch.batch_label, "term-2");
}

#[test]
fn test_configured_default_label_for_bare_extension() {
    let importer = StudentImporterImpl::new(
        Box::new(StubParser { rows: Vec::new() }),
        Box::new(StudentFieldMapper),
        BatchIdentifier::new("Semester Results"),
    );
    let rows = vec![raw_row(&[("Student", "Alice")])];

    let batch = importer.import_rows(&rows, ".xlsx").unwrap();
    assert_eq!(batch.batch_label, "Semester Results");
}

#[test]
fn test_empty_rows_never_reach_statistics() {
    let importer = StudentImporterImpl::default();
    let err = importer.import_rows(&[], "results.xlsx").unwrap_err();
    assert!(matches!(err, ImportError::EmptyDataset));
}
