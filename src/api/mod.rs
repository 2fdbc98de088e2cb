// ==========================================
// 考试成绩分析看板 - API 层
// ==========================================
// 职责: 提供界面事件入口,供嵌入方（桌面壳/命令行）调用
// ==========================================

pub mod dashboard_api;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, DashboardView};
pub use error::{ApiError, ApiResult};
