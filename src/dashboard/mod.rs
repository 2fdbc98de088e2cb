// ==========================================
// 考试成绩分析看板 - 展示层
// ==========================================
// 职责: 会话生命周期、成绩表视图、汇总卡片、图表、打印报表
// 红线: 只消费导入层与引擎层的输出,不做文件解析与统计计算
// ==========================================

pub mod charts;
pub mod report;
pub mod session;
pub mod summary;
pub mod svg;
pub mod table;

// 重导出核心类型
pub use charts::{
    build_chart_specs, ChartKind, ChartRenderer, ChartSeries, ChartSet, ChartSpec, ChartStyle,
    RenderedChart,
};
pub use report::{format_report_date, render_print_report};
pub use session::{DashboardSession, SessionError, SessionManager, SessionResult, UploadTicket};
pub use summary::{grade_summary, GradeSummaryItem, SummaryCards};
pub use svg::SvgChartRenderer;
pub use table::{build_rows, search, sort_by_final_marks, RowHighlight, SortedTable, TableRow};
