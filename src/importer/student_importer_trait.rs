// ==========================================
// 考试成绩分析看板 - 成绩导入 Trait
// ==========================================
// 职责: 定义成绩导入接口（不包含实现）
// 管道: 文件读取 → 工作表解析 → 字段映射 → 批次识别
// ==========================================

use crate::domain::student::{ImportedBatch, RawRow, Student};
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// StudentImporter Trait
// ==========================================
// 用途: 成绩导入主接口
// 实现者: StudentImporterImpl
#[async_trait]
pub trait StudentImporter: Send + Sync {
    /// 从成绩表文件导入学生记录
    ///
    /// # 参数
    /// - file_path: 成绩表路径（.xlsx / .xls）
    ///
    /// # 返回
    /// - Ok(ImportedBatch): 规范化后的学生序列 + 批次标签
    /// - Err(InvalidFileType): 扩展名不符,未读取文件
    /// - Err(UnparsableFile): 工作簿解析失败
    /// - Err(EmptyDataset): 首个工作表没有数据行
    ///
    /// # 说明
    /// - 仅"读取文件字节"为异步步骤,其余步骤同步完成
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportedBatch>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 工作簿解析接口（阶段 1）
// 实现者: ExcelParser
pub trait FileParser: Send + Sync {
    /// 将工作簿字节解析为原始行记录（首个工作表,首行为表头）
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于按扩展名选择格式）
    /// - bytes: 文件内容
    fn parse_bytes(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 2）
// 实现者: StudentFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 Student
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - id: 导入序号（从 1 开始）
    ///
    /// # 说明
    /// - 宽松导入: 不会失败,缺失/无法解析的数值按 0 处理
    fn map_to_student(&self, row: &RawRow, id: u32) -> Student;

    /// 规范化全部行,保持输入顺序,序号从 1 开始
    ///
    /// # 返回
    /// - Err(EmptyDataset): 输入为空（调用方需提示用户,不得进入看板）
    fn normalize_rows(&self, rows: &[RawRow]) -> ImportResult<Vec<Student>> {
        if rows.is_empty() {
            return Err(ImportError::EmptyDataset);
        }

        Ok(rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_to_student(row, idx as u32 + 1))
            .collect())
    }
}
