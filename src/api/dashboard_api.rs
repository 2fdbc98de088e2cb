// ==========================================
// 考试成绩分析看板 - 看板 API
// ==========================================
// 职责: 界面事件入口（选择文件、搜索、排序、统计、打印、重置）
// 架构: API 层 → 导入层 (StudentImporter) → 引擎层 (StatisticsEngine) → 展示层 (dashboard)
// 并发: 上传期间不持有会话锁; 安装结果前校验上传凭据
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::dashboard::charts::{build_chart_specs, ChartRenderer, ChartSet, RenderedChart};
use crate::dashboard::report::{format_report_date, render_print_report};
use crate::dashboard::session::{DashboardSession, SessionManager};
use crate::dashboard::summary::{grade_summary, GradeSummaryItem, SummaryCards};
use crate::dashboard::svg::SvgChartRenderer;
use crate::dashboard::table::{build_rows, search, sort_by_final_marks, SortedTable, TableRow};
use crate::domain::statistics::StatisticsSnapshot;
use crate::domain::types::SortOrder;
use crate::engine::statistics::StatisticsEngine;
use crate::i18n::t_with_args;
use crate::importer::batch_identifier::BatchIdentifier;
use crate::importer::field_mapper::StudentFieldMapper;
use crate::importer::file_parser::{ExcelParser, WorkbookFormat};
use crate::importer::student_importer::StudentImporterImpl;
use crate::importer::student_importer_trait::StudentImporter;

// ==========================================
// DashboardView - 上传成功后的完整看板视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub session_id: Uuid,
    pub batch_label: String,
    pub file_name: String,
    /// 形如 "Successfully loaded: results.xlsx (42 students)"
    pub status_line: String,
    pub summary: SummaryCards,
    pub grade_summary: Vec<GradeSummaryItem>,
    pub charts: Vec<RenderedChart>,
    /// 导入顺序
    pub rows: Vec<TableRow>,
    pub sort_order: SortOrder,
}

impl DashboardView {
    fn from_session(session: &DashboardSession) -> Self {
        let snapshot = session.snapshot();
        let students: Vec<_> = session.students().iter().collect();
        let count = snapshot.total_students.to_string();

        Self {
            session_id: session.session_id(),
            batch_label: session.batch_label().to_string(),
            file_name: session.file_name().to_string(),
            status_line: t_with_args(
                "status.loaded",
                &[("file", session.file_name()), ("count", count.as_str())],
            ),
            summary: SummaryCards::from_snapshot(snapshot),
            grade_summary: grade_summary(snapshot),
            charts: session.charts().charts().to_vec(),
            rows: build_rows(
                &students,
                snapshot.highest_marks.marks,
                snapshot.lowest_marks.marks,
            ),
            sort_order: session.sort_order(),
        }
    }
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    config: DashboardConfig,
    importer: Arc<dyn StudentImporter>,
    engine: StatisticsEngine,
    renderer: Box<dyn ChartRenderer>,
    sessions: Mutex<SessionManager>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - config: 看板配置
    /// - importer: 成绩导入器
    pub fn new(config: DashboardConfig, importer: Arc<dyn StudentImporter>) -> Self {
        Self::with_renderer(config, importer, Box::new(SvgChartRenderer))
    }

    /// 使用自定义图表渲染器创建实例
    pub fn with_renderer(
        config: DashboardConfig,
        importer: Arc<dyn StudentImporter>,
        renderer: Box<dyn ChartRenderer>,
    ) -> Self {
        Self {
            config,
            importer,
            engine: StatisticsEngine::new(),
            renderer,
            sessions: Mutex::new(SessionManager::new()),
        }
    }

    /// 使用默认 Excel 导入器创建实例（默认批次名取自配置）
    pub fn from_config(config: DashboardConfig) -> Self {
        let importer = StudentImporterImpl::new(
            Box::new(ExcelParser),
            Box::new(StudentFieldMapper),
            BatchIdentifier::new(config.default_batch_label.clone()),
        );
        Self::new(config, Arc::new(importer))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn lock_sessions(&self) -> ApiResult<MutexGuard<'_, SessionManager>> {
        self.sessions
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))
    }

    // ==========================================
    // 上传
    // ==========================================

    /// 处理选择/拖入的文件
    ///
    /// # 参数
    /// - file_path: 成绩表文件路径
    ///
    /// # 返回
    /// - Ok(DashboardView): 新会话的完整视图
    /// - Err(InvalidFileType / FileNotFound / UnparsableFile / EmptyDataset): 上传失败,当前会话不变
    /// - Err(StaleUpload): 期间有更新的上传或重置,本次结果丢弃
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    pub async fn handle_file(&self, file_path: &Path) -> ApiResult<DashboardView> {
        // 不支持的格式直接拒绝,不领取凭据,进行中的上传不受影响
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Err(e) = WorkbookFormat::from_file_name(&file_name) {
            warn!(error = %e, "文件格式不支持,忽略本次上传");
            return Err(e.into());
        }

        // 领取凭据后立即释放锁,文件读取期间不阻塞其他事件
        let ticket = self.lock_sessions()?.begin_upload();
        info!(generation = ticket.generation(), "开始上传");

        let batch = self.importer.import_file(file_path).await.map_err(|e| {
            error!(error = %e, "成绩导入失败");
            ApiError::from(e)
        })?;

        // 过期上传不再计算统计与图表
        self.lock_sessions()?.check_ticket(ticket)?;

        let snapshot = self.engine.compute(&batch.students)?;
        let specs = build_chart_specs(&snapshot, &batch.students, self.config.top_performers_limit);
        let charts = ChartSet::render(specs, self.renderer.as_ref())?;
        let session = DashboardSession::create(batch, snapshot, charts);

        let mut sessions = self.lock_sessions()?;
        let installed = sessions.install(ticket, session)?;
        let view = DashboardView::from_session(installed);

        info!(
            session_id = %view.session_id,
            batch_label = %view.batch_label,
            students = view.rows.len(),
            "看板已加载"
        );
        Ok(view)
    }

    // ==========================================
    // 表格交互
    // ==========================================

    /// 搜索（姓名/注册号/等级,不区分大小写）; 空查询返回全部
    pub fn search(&self, query: &str) -> ApiResult<Vec<TableRow>> {
        let sessions = self.lock_sessions()?;
        let session = sessions.active().ok_or(ApiError::NoActiveSession)?;
        let snapshot = session.snapshot();

        let matched = search(session.students(), query);
        Ok(build_rows(
            &matched,
            snapshot.highest_marks.marks,
            snapshot.lowest_marks.marks,
        ))
    }

    /// 切换按总分排序方向（首次点击为降序）
    pub fn toggle_sort(&self) -> ApiResult<SortedTable> {
        let mut sessions = self.lock_sessions()?;
        let session = sessions.active_mut().ok_or(ApiError::NoActiveSession)?;
        let order = session.toggle_sort();

        let snapshot = session.snapshot();
        let sorted = sort_by_final_marks(session.students(), order);
        Ok(SortedTable {
            order,
            rows: build_rows(
                &sorted,
                snapshot.highest_marks.marks,
                snapshot.lowest_marks.marks,
            ),
        })
    }

    // ==========================================
    // 统计与报表
    // ==========================================

    /// 基于完整学生序列重新计算统计
    pub fn statistics(&self) -> ApiResult<StatisticsSnapshot> {
        let sessions = self.lock_sessions()?;
        let session = sessions.active().ok_or(ApiError::NoActiveSession)?;
        Ok(self.engine.compute(session.students())?)
    }

    /// 生成打印报表 HTML
    ///
    /// # 参数
    /// - date: 报表生成日期（按配置格式显示）
    pub fn print_report(&self, date: NaiveDate) -> ApiResult<String> {
        let sessions = self.lock_sessions()?;
        let session = sessions.active().ok_or_else(|| {
            warn!("打印请求时没有已加载的成绩");
            ApiError::NoActiveSession
        })?;

        let generated_on = format_report_date(date, &self.config.report_date_format);
        let html = render_print_report(session, &self.config.report_title, &generated_on);
        info!(
            session_id = %session.session_id(),
            bytes = html.len(),
            "打印报表已生成"
        );
        Ok(html)
    }

    // ==========================================
    // 重置
    // ==========================================

    /// 返回上传界面: 释放当前会话,进行中的上传结果将被丢弃
    ///
    /// # 返回
    /// - 是否释放了会话
    pub fn reset(&self) -> bool {
        match self.sessions.lock() {
            Ok(mut sessions) => {
                let disposed = sessions.reset();
                info!(disposed, "看板已重置");
                disposed
            }
            Err(e) => {
                error!(error = %e, "会话锁获取失败,重置未执行");
                false
            }
        }
    }

    /// 当前是否有已加载的会话
    pub fn has_session(&self) -> bool {
        self.sessions
            .lock()
            .map(|s| s.active().is_some())
            .unwrap_or(false)
    }
}
