// ==========================================
// 考试成绩分析看板 - API层错误类型
// ==========================================
// 职责: 汇总导入/统计/会话错误,转换为用户可读的提示文本
// 说明: Display 面向日志; user_message() 面向界面（跟随当前语言）
// ==========================================

use crate::dashboard::charts::ChartError;
use crate::dashboard::session::SessionError;
use crate::engine::statistics::StatisticsError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 上传错误
    // ==========================================
    #[error("文件格式不支持: {0}")]
    InvalidFileType(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("Excel 读取失败: {detail}")]
    UnparsableFile { detail: String },

    #[error("成绩表为空或没有有效数据")]
    EmptyDataset,

    // ==========================================
    // 会话错误
    // ==========================================
    #[error("当前没有已加载的成绩")]
    NoActiveSession,

    #[error("上传已过期: ticket={ticket}, latest={latest}")]
    StaleUpload { ticket: u64, latest: u64 },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 界面提示文本（当前语言）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidFileType(_) => t("error.invalid_file_type"),
            ApiError::FileNotFound(path) => t_with_args("error.file_not_found", &[("path", path.as_str())]),
            ApiError::UnparsableFile { detail } => {
                t_with_args("error.unparsable_file", &[("detail", detail.as_str())])
            }
            ApiError::EmptyDataset => t("error.empty_dataset"),
            ApiError::NoActiveSession => t("error.no_active_session"),
            ApiError::StaleUpload { .. } => t("error.stale_upload"),
            ApiError::InternalError(detail) => {
                t_with_args("error.internal", &[("detail", detail.as_str())])
            }
            ApiError::Other(err) => {
                let detail = err.to_string();
                t_with_args("error.internal", &[("detail", detail.as_str())])
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidFileType(name) => ApiError::InvalidFileType(name),
            ImportError::FileNotFound(path) => ApiError::FileNotFound(path),
            ImportError::FileReadError(detail) | ImportError::UnparsableFile(detail) => {
                ApiError::UnparsableFile { detail }
            }
            ImportError::EmptyDataset => ApiError::EmptyDataset,
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 StatisticsError 转换
// ==========================================
impl From<StatisticsError> for ApiError {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::EmptyStudentSet => ApiError::EmptyDataset,
        }
    }
}

// ==========================================
// 从 SessionError 转换
// ==========================================
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::StaleUpload { ticket, latest } => ApiError::StaleUpload { ticket, latest },
        }
    }
}

// ==========================================
// 从 ChartError 转换
// ==========================================
impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
