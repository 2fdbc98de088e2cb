// ==========================================
// 考试成绩分析看板 - 领域模型层
// ==========================================
// 职责: 定义学生记录、统计快照、等级与分数段类型
// 红线: 不含文件解析逻辑,不含统计计算逻辑
// ==========================================

pub mod statistics;
pub mod student;
pub mod types;

// 重导出核心类型
pub use statistics::{ExtremeMark, GradeCount, RangeCount, StatisticsSnapshot};
pub use student::{ImportedBatch, RawRow, Student};
pub use types::{CanonicalGrade, MarksRange, SortOrder, UNGRADED_LABEL};
