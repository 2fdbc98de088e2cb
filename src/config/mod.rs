// ==========================================
// 考试成绩分析看板 - 配置层
// ==========================================
// 职责: 看板与报表的可调项（语言、默认批次名、前 N 名数量、报表标题）
// 红线: 等级体系、及格线、分数段固定,不进入配置
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_defaults, config_keys, ConfigManager, DashboardConfig};
