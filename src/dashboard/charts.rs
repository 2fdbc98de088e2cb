// ==========================================
// 考试成绩分析看板 - 图表规格
// ==========================================
// 职责: 统计快照 → 四张图表的规格（数据、配色、坐标范围）
// 图表: 等级分布环形图 / 分数段直方图 / 等级分项均分对比 / 前 N 名横向条形图
// 红线: 图表只消费快照与完整学生序列,不依赖表格视图的搜索/排序状态
// ==========================================

use crate::domain::statistics::StatisticsSnapshot;
use crate::domain::student::Student;
use crate::domain::types::{CanonicalGrade, NEUTRAL_GRADE_COLOR};
use crate::engine::grade_breakdown::{averages_by_grade, top_performers};
use crate::i18n::t;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 对比图两组柱的固定配色
pub const SUBJECT_SERIES_COLOR: &str = "#2563eb";
pub const ASSESSMENT_SERIES_COLOR: &str = "#f59e0b";
/// 前 N 名条形图配色
pub const TOP_PERFORMER_COLOR: &str = "#15803d";
/// 前 N 名条形图横轴上限
pub const TOP_PERFORMERS_AXIS_MAX: f64 = 100.0;

/// 图表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    GradeDistribution,
    MarksDistribution,
    SubjectVsAssessment,
    TopPerformers,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::GradeDistribution,
        ChartKind::MarksDistribution,
        ChartKind::SubjectVsAssessment,
        ChartKind::TopPerformers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::GradeDistribution => "grade_distribution",
            ChartKind::MarksDistribution => "marks_distribution",
            ChartKind::SubjectVsAssessment => "subject_vs_assessment",
            ChartKind::TopPerformers => "top_performers",
        }
    }
}

/// 图表绘制方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    Doughnut,
    VerticalBar,
    HorizontalBar,
}

/// 数据系列
///
/// colors 与 values 等长时逐项着色,否则整组使用第一个颜色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartSeries {
    pub fn color_at(&self, index: usize) -> &str {
        if self.colors.len() == self.values.len() {
            self.colors.get(index).map(String::as_str).unwrap_or(NEUTRAL_GRADE_COLOR)
        } else {
            self.colors.first().map(String::as_str).unwrap_or(NEUTRAL_GRADE_COLOR)
        }
    }
}

// ==========================================
// ChartSpec - 单张图表规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub style: ChartStyle,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// 数值轴上限; None 表示按数据自动取最大值
    pub value_axis_max: Option<f64>,
}

impl ChartSpec {
    /// 所有系列中的最大值（无数据时为 0）
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// 图表渲染错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("图表渲染失败 ({kind}): {detail}")]
    Render { kind: &'static str, detail: String },
}

/// Result 类型别名
pub type ChartResult<T> = Result<T, ChartError>;

/// 图表渲染器接口（规格 → 图像标记）
pub trait ChartRenderer: Send + Sync {
    fn render(&self, spec: &ChartSpec) -> ChartResult<String>;
}

/// 已渲染的图表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedChart {
    pub spec: ChartSpec,
    pub svg: String,
}

// ==========================================
// ChartSet - 会话持有的图表集合
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    charts: Vec<RenderedChart>,
}

impl ChartSet {
    /// 逐张渲染; 任一图表失败则整体失败
    pub fn render(specs: Vec<ChartSpec>, renderer: &dyn ChartRenderer) -> ChartResult<Self> {
        let charts = specs
            .into_iter()
            .map(|spec| {
                let svg = renderer.render(&spec)?;
                Ok(RenderedChart { spec, svg })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self { charts })
    }

    pub fn get(&self, kind: ChartKind) -> Option<&RenderedChart> {
        self.charts.iter().find(|c| c.spec.kind == kind)
    }

    pub fn charts(&self) -> &[RenderedChart] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// 释放全部图表,返回释放数量
    pub fn dispose(&mut self) -> usize {
        let released = self.charts.len();
        self.charts.clear();
        debug!(released, "图表已释放");
        released
    }
}

/// 构建四张图表的规格
///
/// # 参数
/// - snapshot: 基于完整学生序列的统计快照
/// - students: 完整学生序列（导入顺序）
/// - top_limit: 前 N 名数量
pub fn build_chart_specs(
    snapshot: &StatisticsSnapshot,
    students: &[Student],
    top_limit: usize,
) -> Vec<ChartSpec> {
    vec![
        grade_distribution_chart(snapshot),
        marks_distribution_chart(snapshot),
        subject_vs_assessment_chart(snapshot, students),
        top_performers_chart(students, top_limit),
    ]
}

fn grade_color(grade: &str) -> String {
    CanonicalGrade::from_label(grade)
        .map(|g| g.color())
        .unwrap_or(NEUTRAL_GRADE_COLOR)
        .to_string()
}

fn grade_distribution_chart(snapshot: &StatisticsSnapshot) -> ChartSpec {
    let dist = &snapshot.grade_distribution;
    ChartSpec {
        kind: ChartKind::GradeDistribution,
        style: ChartStyle::Doughnut,
        title: t("chart.grade_distribution"),
        labels: dist.iter().map(|g| g.grade.clone()).collect(),
        series: vec![ChartSeries {
            label: t("chart.number_of_students"),
            values: dist.iter().map(|g| g.count as f64).collect(),
            colors: dist.iter().map(|g| grade_color(&g.grade)).collect(),
        }],
        value_axis_max: None,
    }
}

fn marks_distribution_chart(snapshot: &StatisticsSnapshot) -> ChartSpec {
    let ranges = &snapshot.marks_ranges;
    ChartSpec {
        kind: ChartKind::MarksDistribution,
        style: ChartStyle::VerticalBar,
        title: t("chart.marks_distribution"),
        labels: ranges.iter().map(|r| r.range.label().to_string()).collect(),
        series: vec![ChartSeries {
            label: t("chart.number_of_students"),
            values: ranges.iter().map(|r| r.count as f64).collect(),
            colors: ranges.iter().map(|r| r.range.color().to_string()).collect(),
        }],
        value_axis_max: None,
    }
}

fn subject_vs_assessment_chart(snapshot: &StatisticsSnapshot, students: &[Student]) -> ChartSpec {
    let averages = averages_by_grade(students, &snapshot.grade_distribution);
    ChartSpec {
        kind: ChartKind::SubjectVsAssessment,
        style: ChartStyle::VerticalBar,
        title: t("chart.subject_vs_assessment"),
        labels: averages.iter().map(|a| a.grade.clone()).collect(),
        series: vec![
            ChartSeries {
                label: t("chart.avg_subject"),
                values: averages.iter().map(|a| a.avg_subject).collect(),
                colors: vec![SUBJECT_SERIES_COLOR.to_string()],
            },
            ChartSeries {
                label: t("chart.avg_assessment"),
                values: averages.iter().map(|a| a.avg_assessment).collect(),
                colors: vec![ASSESSMENT_SERIES_COLOR.to_string()],
            },
        ],
        value_axis_max: None,
    }
}

fn top_performers_chart(students: &[Student], limit: usize) -> ChartSpec {
    let top = top_performers(students, limit);
    ChartSpec {
        kind: ChartKind::TopPerformers,
        style: ChartStyle::HorizontalBar,
        title: t("chart.top_performers"),
        labels: top.iter().map(|p| p.short_name.clone()).collect(),
        series: vec![ChartSeries {
            label: t("chart.final_marks"),
            values: top.iter().map(|p| p.final_marks as f64).collect(),
            colors: vec![TOP_PERFORMER_COLOR.to_string()],
        }],
        value_axis_max: Some(TOP_PERFORMERS_AXIS_MAX),
    }
}
