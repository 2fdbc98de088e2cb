// ==========================================
// 考试成绩分析看板 - 核心库
// ==========================================
// 技术栈: Rust + calamine (Excel) + tracing + rust-i18n
// 系统定位: 单次上传的成绩表分析（无持久化、无网络）
// 流程: 导入层 → 引擎层 → 展示层 → API 层
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 学生记录、统计快照、等级与分数段
pub mod domain;

// 导入层 - Excel 解析、字段映射、批次识别
pub mod importer;

// 引擎层 - 统计计算
pub mod engine;

// 配置层 - 看板可调项
pub mod config;

// 展示层 - 会话、表格、图表、报表
pub mod dashboard;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 界面事件入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CanonicalGrade, ImportedBatch, MarksRange, SortOrder, StatisticsSnapshot, Student,
};

// 导入
pub use importer::{BatchIdentifier, ImportError, StudentImporter, StudentImporterImpl};

// 引擎
pub use engine::{StatisticsEngine, StatisticsError};

// 配置
pub use config::{ConfigManager, DashboardConfig};

// API
pub use api::{ApiError, DashboardApi, DashboardView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Exam Results Dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
