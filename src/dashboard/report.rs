// ==========================================
// 考试成绩分析看板 - 打印报表
// ==========================================
// 职责: 会话 → 独立 HTML 文档（批次、生成日期、四项统计、两张图表、等级汇总、成绩表）
// 说明: 成绩表按总分降序; 所有文本统一转义; 打印/保存由调用方负责
// ==========================================

use crate::config::config_defaults;
use crate::dashboard::charts::ChartKind;
use crate::dashboard::session::DashboardSession;
use crate::dashboard::summary::{grade_summary, SummaryCards};
use crate::dashboard::table::grade_class;
use crate::engine::grade_breakdown::sorted_by_final_marks_desc;
use crate::i18n::{t, t_with_args};
use chrono::NaiveDate;
use std::fmt::Write as _;
use tracing::{debug, warn};

const REPORT_STYLE: &str = "body{font-family:'Segoe UI',Tahoma,sans-serif;margin:24px;color:#1f2937}\
h1{margin:0}h2{margin:4px 0 0;color:#4b5563;font-weight:500}\
.generated{color:#6b7280;font-size:13px}\
.stats{display:flex;gap:16px;margin:20px 0}\
.stat{flex:1;border:1px solid #e5e7eb;border-radius:6px;padding:12px;text-align:center}\
.stat .value{font-size:22px;font-weight:600}\
.charts{display:flex;gap:16px;flex-wrap:wrap}\
.chart-image svg{max-width:100%;height:auto}\
.grade-summary{display:flex;flex-wrap:wrap;gap:8px;margin:16px 0}\
.grade-item{border-radius:6px;padding:6px 10px}\
table{width:100%;border-collapse:collapse;font-size:13px}\
th,td{border:1px solid #e5e7eb;padding:6px 8px;text-align:left}\
th{background:#f3f4f6}";

/// 按配置格式化报表日期（格式串无效时回退默认格式）
pub fn format_report_date(date: NaiveDate, format: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(format)).is_ok() {
        return formatted;
    }

    warn!(format = %format, "报表日期格式无效,使用默认格式");
    date.format(config_defaults::REPORT_DATE_FORMAT).to_string()
}

/// 文本转义（HTML 正文与属性值）
pub fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 生成打印报表 HTML
///
/// # 参数
/// - session: 当前会话
/// - title: 报表标题
/// - generated_on: 已格式化的生成日期
pub fn render_print_report(session: &DashboardSession, title: &str, generated_on: &str) -> String {
    let snapshot = session.snapshot();
    let cards = SummaryCards::from_snapshot(snapshot);
    let batch_label = escape_markup(session.batch_label());

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} - {}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_markup(title),
        batch_label,
        REPORT_STYLE
    ));

    // 标题
    html.push_str(&format!(
        "<header>\n<h1>{}</h1>\n<h2>{}</h2>\n<p class=\"generated\">{}</p>\n</header>\n",
        escape_markup(title),
        batch_label,
        escape_markup(&t_with_args("report.generated_on", &[("date", generated_on)]))
    ));

    // 四项统计
    let stats = [
        (t("summary.total_students"), cards.total_students.to_string()),
        (t("summary.average_marks"), cards.average_marks.clone()),
        (t("summary.highest_marks"), cards.highest_marks.clone()),
        (t("summary.pass_rate"), cards.pass_rate.clone()),
    ];
    html.push_str("<section class=\"stats\">\n");
    for (label, value) in &stats {
        html.push_str(&format!(
            "<div class=\"stat\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            escape_markup(label),
            escape_markup(value)
        ));
    }
    html.push_str("</section>\n");

    // 图表（SVG 由渲染器生成,文本已转义）
    html.push_str("<section class=\"charts\">\n");
    for kind in [ChartKind::GradeDistribution, ChartKind::MarksDistribution] {
        match session.charts().get(kind) {
            Some(chart) => html.push_str(&format!(
                "<div class=\"chart-image\" data-chart=\"{}\">{}</div>\n",
                kind.as_str(),
                chart.svg
            )),
            None => debug!(chart = kind.as_str(), "图表缺失,报表中跳过"),
        }
    }
    html.push_str("</section>\n");

    // 等级汇总
    html.push_str(&format!(
        "<h3>{}</h3>\n<section class=\"grade-summary\">\n",
        escape_markup(&t("report.grade_summary"))
    ));
    for item in grade_summary(snapshot) {
        html.push_str(&format!(
            "<div class=\"grade-item\" style=\"color:{};background:{}\"><strong>{}</strong>: {} ({}%)</div>\n",
            escape_markup(&item.color),
            escape_markup(&item.background),
            escape_markup(&item.grade),
            item.count,
            item.percent
        ));
    }
    html.push_str("</section>\n");

    // 成绩表（总分降序）
    let headers: String = [
        "report.col_index",
        "report.col_name",
        "report.col_registration",
        "report.col_subject",
        "report.col_assessment",
        "report.col_final",
        "report.col_grade",
    ]
    .iter()
    .map(|key| format!("<th>{}</th>", escape_markup(&t(key))))
    .collect();
    html.push_str(&format!(
        "<h3>{}</h3>\n<table>\n<thead><tr>{}</tr></thead>\n<tbody>\n",
        escape_markup(&t("report.student_results")),
        headers
    ));
    for (idx, student) in sorted_by_final_marks_desc(session.students()).iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            idx + 1,
            escape_markup(&student.student),
            escape_markup(&student.registration_no),
            student.subject_marks,
            student.assessment_marks,
            student.final_marks,
            grade_class(student),
            escape_markup(student.grade_label())
        ));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}
