// ==========================================
// 考试成绩分析看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值回退
// 存储: 内存 key-value（可选从 JSON 文件加载,不回写）
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 界面
    pub const UI_LOCALE: &str = "ui.locale";

    // 看板
    pub const DEFAULT_BATCH_LABEL: &str = "dashboard.default_batch_label";
    pub const TOP_PERFORMERS_LIMIT: &str = "dashboard.top_performers_limit";

    // 打印报表
    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_DATE_FORMAT: &str = "report.date_format";
}

// ==========================================
// 默认值
// ==========================================
pub mod config_defaults {
    pub const UI_LOCALE: &str = "en";
    pub const DEFAULT_BATCH_LABEL: &str = "Exam Results";
    pub const TOP_PERFORMERS_LIMIT: usize = 5;
    pub const REPORT_TITLE: &str = "Exam Results Report";
    pub const REPORT_DATE_FORMAT: &str = "%B %-d, %Y";
}

/// 看板配置快照（类型化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub locale: String,
    pub default_batch_label: String,
    pub top_performers_limit: usize,
    pub report_title: String,
    pub report_date_format: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        ConfigManager::new().dashboard_config()
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象文件加载配置
    ///
    /// # 参数
    /// - path: JSON 文件路径,形如 {"ui.locale": "zh-CN", "dashboard.top_performers_limit": 3}
    ///
    /// # 说明
    /// - 数字/布尔值按文本保存; null、数组、对象忽略
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let manager = Self::from_json_str(&raw)?;
        info!(path = %path.display(), keys = manager.values.len(), "配置文件已加载");
        Ok(manager)
    }

    /// 从 JSON 文本加载配置
    pub fn from_json_str(raw: &str) -> Result<Self, Box<dyn Error>> {
        let parsed: HashMap<String, Value> = serde_json::from_str(raw)?;

        let values = parsed
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        warn!(key = %key, "忽略非标量配置值");
                        return None;
                    }
                };
                Some((key, text))
            })
            .collect();

        Ok(Self { values })
    }

    /// 覆写单个配置值
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// 读取配置值,带默认值（空白值视为未配置）
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// 读取正整数配置,解析失败回退默认值
    fn get_usize_or_default(&self, key: &str, default: usize) -> usize {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!(key = %key, value = %raw, default, "配置值无效,使用默认值");
                    default
                }
            },
        }
    }

    /// 获取类型化的看板配置
    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            locale: self.get_config_or_default(config_keys::UI_LOCALE, config_defaults::UI_LOCALE),
            default_batch_label: self.get_config_or_default(
                config_keys::DEFAULT_BATCH_LABEL,
                config_defaults::DEFAULT_BATCH_LABEL,
            ),
            top_performers_limit: self.get_usize_or_default(
                config_keys::TOP_PERFORMERS_LIMIT,
                config_defaults::TOP_PERFORMERS_LIMIT,
            ),
            report_title: self
                .get_config_or_default(config_keys::REPORT_TITLE, config_defaults::REPORT_TITLE),
            report_date_format: self.get_config_or_default(
                config_keys::REPORT_DATE_FORMAT,
                config_defaults::REPORT_DATE_FORMAT,
            ),
        }
    }

    /// 获取生效配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let config = self.dashboard_config();
        let snapshot: BTreeMap<&str, Value> = BTreeMap::from([
            (config_keys::UI_LOCALE, json!(config.locale)),
            (config_keys::DEFAULT_BATCH_LABEL, json!(config.default_batch_label)),
            (config_keys::TOP_PERFORMERS_LIMIT, json!(config.top_performers_limit)),
            (config_keys::REPORT_TITLE, json!(config.report_title)),
            (config_keys::REPORT_DATE_FORMAT, json!(config.report_date_format)),
        ]);
        Ok(serde_json::to_string(&snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::new().dashboard_config();
        assert_eq!(config.locale, "en");
        assert_eq!(config.default_batch_label, "Exam Results");
        assert_eq!(config.top_performers_limit, 5);
    }

    #[test]
    fn test_from_json_overrides() {
        let manager = ConfigManager::from_json_str(
            r#"{"ui.locale": "zh-CN", "dashboard.top_performers_limit": 3, "unknown": [1]}"#,
        )
        .unwrap();

        let config = manager.dashboard_config();
        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.top_performers_limit, 3);
        assert_eq!(manager.get_config_value("unknown"), None);
    }

    #[test]
    fn test_invalid_limit_falls_back() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::TOP_PERFORMERS_LIMIT, "zero");
        assert_eq!(manager.dashboard_config().top_performers_limit, 5);

        manager.set(config_keys::TOP_PERFORMERS_LIMIT, "0");
        assert_eq!(manager.dashboard_config().top_performers_limit, 5);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::REPORT_TITLE, "   ");
        assert_eq!(manager.dashboard_config().report_title, "Exam Results Report");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ConfigManager::from_json_str("not json").is_err());
    }

    #[test]
    fn test_snapshot_contains_effective_values() {
        let snapshot = ConfigManager::new().get_config_snapshot().unwrap();
        let value: Value = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(value["ui.locale"], "en");
        assert_eq!(value["dashboard.top_performers_limit"], 5);
    }
}
