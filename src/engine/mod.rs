// ==========================================
// 考试成绩分析看板 - 引擎层
// ==========================================
// 职责: 统计计算（纯函数,确定性,可重入）
// 红线: 引擎不读文件、不持有会话状态、不依赖展示层
// ==========================================

pub mod grade_breakdown;
pub mod statistics;

// 重导出核心引擎
pub use grade_breakdown::{
    averages_by_grade, short_name, sorted_by_final_marks_desc, top_performers, GradeAverages,
    TopPerformer,
};
pub use statistics::{StatisticsEngine, StatisticsError, StatisticsResult};
