// ==========================================
// 考试成绩分析看板 - 导入层
// ==========================================
// 职责: 成绩表 → 规范化学生序列 + 批次标签
// 支持: Excel (.xlsx / .xls)
// ==========================================

// 模块声明
pub mod batch_identifier;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod student_importer;
pub mod student_importer_trait;

// 重导出核心类型
pub use batch_identifier::{BatchIdentifier, DEFAULT_BATCH_LABEL};
pub use error::{ImportError, ImportResult};
pub use field_mapper::StudentFieldMapper;
pub use file_parser::{ExcelParser, WorkbookFormat};
pub use student_importer::StudentImporterImpl;

// 重导出 Trait 接口
pub use student_importer_trait::{FieldMapper, FileParser, StudentImporter};
