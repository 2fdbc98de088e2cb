// ==========================================
// 考试成绩分析看板 - 成绩导入器实现
// ==========================================
// 职责: 整合导入流程,从文件到规范化学生序列
// 流程: 扩展名校验 → 读取字节 → 解析首个工作表 → 字段映射 → 批次识别
// ==========================================

use crate::domain::student::{ImportedBatch, RawRow};
use crate::importer::batch_identifier::BatchIdentifier;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::StudentFieldMapper;
use crate::importer::file_parser::{ExcelParser, WorkbookFormat};
use crate::importer::student_importer_trait::{FieldMapper, FileParser, StudentImporter};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

// ==========================================
// StudentImporterImpl - 成绩导入器实现
// ==========================================
pub struct StudentImporterImpl {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    batch_identifier: BatchIdentifier,
}

impl Default for StudentImporterImpl {
    fn default() -> Self {
        Self::new(
            Box::new(ExcelParser),
            Box::new(StudentFieldMapper),
            BatchIdentifier::default(),
        )
    }
}

impl StudentImporterImpl {
    /// 创建新的 StudentImporter 实例
    ///
    /// # 参数
    /// - file_parser: 工作簿解析器
    /// - field_mapper: 字段映射器
    /// - batch_identifier: 批次识别器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        batch_identifier: BatchIdentifier,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            batch_identifier,
        }
    }

    /// 从已解析的原始行构建导入结果（字段映射 + 批次识别）
    ///
    /// # 返回
    /// - Err(EmptyDataset): 没有任何数据行,统计引擎不会被调用
    pub fn import_rows(&self, rows: &[RawRow], file_name: &str) -> ImportResult<ImportedBatch> {
        let students = self.field_mapper.normalize_rows(rows)?;

        let batch_label = self.batch_identifier.identify(&students, file_name);
        debug!(batch_label = %batch_label, "批次识别完成");

        Ok(ImportedBatch {
            file_name: file_name.to_string(),
            batch_label,
            students,
        })
    }
}

#[async_trait::async_trait]
impl StudentImporter for StudentImporterImpl {
    #[instrument(skip(self, file_path), fields(file_name))]
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportedBatch> {
        let start_time = Instant::now();
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        tracing::Span::current().record("file_name", file_name.as_str());

        // === 步骤 1: 扩展名校验（不读取文件） ===
        WorkbookFormat::from_file_name(&file_name)?;

        // === 步骤 2: 读取文件字节（唯一的异步步骤） ===
        debug!("步骤 2: 读取文件");
        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::FileNotFound(file_path.display().to_string())
            } else {
                ImportError::from(e)
            }
        })?;

        // === 步骤 3: 解析首个工作表 ===
        debug!(bytes = bytes.len(), "步骤 3: 解析工作簿");
        let rows = self.file_parser.parse_bytes(&file_name, bytes).map_err(|e| {
            error!(error = %e, "工作簿解析失败");
            e
        })?;
        info!(total_rows = rows.len(), "工作簿解析完成");

        // === 步骤 4: 字段映射 + 批次识别 ===
        let batch = self.import_rows(&rows, &file_name)?;

        info!(
            students = batch.students.len(),
            batch_label = %batch.batch_label,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "成绩导入完成"
        );
        Ok(batch)
    }
}
