// ==========================================
// 考试成绩分析看板 - SVG 图表渲染
// ==========================================
// 职责: ChartSpec → 独立 SVG 文本（环形图 / 纵向柱状图 / 横向条形图）
// 后端: plotters SVGBackend,输出写入内存字符串,可直接嵌入打印报表
// ==========================================

use crate::dashboard::charts::{ChartError, ChartRenderer, ChartResult, ChartSpec, ChartStyle};
use crate::domain::types::NEUTRAL_GRADE_COLOR;
use plotters::coord::Shift;
use plotters::prelude::*;

const CANVAS_SIZE: (u32, u32) = (640, 360);
const FONT_FAMILY: &str = "sans-serif";
/// 每个分类内柱组占用的宽度（分类间距为 1）
const BAR_GROUP_WIDTH: f64 = 0.8;
const EMPTY_RING_COLOR: RGBColor = RGBColor(229, 231, 235);
const FALLBACK_COLOR: RGBColor = RGBColor(108, 117, 125);

type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// 数值标注: 整数不带小数,其余保留一位
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// "#rrggbb" → RGBColor; 无法识别时使用中性色
fn parse_color(hex: &str) -> RGBColor {
    parse_hex(hex)
        .or_else(|| parse_hex(NEUTRAL_GRADE_COLOR))
        .unwrap_or(FALLBACK_COLOR)
}

/// 分类轴刻度 → 分类名称（非整数刻度不标注）
fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// 数值轴上限: 显式上限优先,否则按数据最大值留出余量
fn value_axis_max(spec: &ChartSpec) -> f64 {
    spec.value_axis_max
        .unwrap_or_else(|| spec.max_value() * 1.1)
        .max(1.0)
}

// ==========================================
// SvgChartRenderer - 内置 SVG 渲染器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgChartRenderer;

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, spec: &ChartSpec) -> ChartResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CANVAS_SIZE).into_drawing_area();
            draw_chart(&root, spec).map_err(|e| ChartError::Render {
                kind: spec.kind.as_str(),
                detail: format!("{:#}", e),
            })?;
        }
        Ok(svg)
    }
}

fn draw_chart(root: &Canvas<'_>, spec: &ChartSpec) -> anyhow::Result<()> {
    root.fill(&WHITE)?;
    match spec.style {
        ChartStyle::Doughnut => draw_doughnut(root, spec)?,
        ChartStyle::VerticalBar => draw_vertical_bars(root, spec)?,
        ChartStyle::HorizontalBar => draw_horizontal_bars(root, spec)?,
    }
    root.present()?;
    Ok(())
}

/// 环形图: 从 12 点方向顺时针,零值扇区不绘制; 扇区标注 "等级: 人数"
fn draw_doughnut(root: &Canvas<'_>, spec: &ChartSpec) -> anyhow::Result<()> {
    let area = root.titled(&spec.title, (FONT_FAMILY, 20))?;
    let Some(series) = spec.series.first() else {
        return Ok(());
    };

    let mut sizes = Vec::new();
    let mut colors = Vec::new();
    let mut labels = Vec::new();
    for (idx, label) in spec.labels.iter().enumerate() {
        let value = series.values.get(idx).copied().unwrap_or(0.0);
        if value <= 0.0 {
            continue;
        }
        sizes.push(value);
        colors.push(parse_color(series.color_at(idx)));
        labels.push(format!("{}: {}", label, format_value(value)));
    }

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    if sizes.is_empty() {
        area.draw(&Circle::new(center, radius as i32, EMPTY_RING_COLOR.filled()))?;
    } else {
        let mut pie = Pie::new(
            &center,
            &radius,
            sizes.as_slice(),
            colors.as_slice(),
            labels.as_slice(),
        );
        pie.start_angle(-90.0);
        pie.label_style((FONT_FAMILY, 13).into_font().color(&BLACK));
        area.draw(&pie)?;
    }

    // 中心挖空
    area.draw(&Circle::new(center, (radius * 0.55) as i32, WHITE.filled()))?;
    Ok(())
}

/// 纵向柱状图,多系列时同一分类内并排并显示图例
fn draw_vertical_bars(root: &Canvas<'_>, spec: &ChartSpec) -> anyhow::Result<()> {
    let count = spec.labels.len().max(1);
    let axis_max = value_axis_max(spec);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT_FAMILY, 20))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(44)
        .build_cartesian_2d(-0.5..count as f64 - 0.5, 0.0..axis_max)?;

    let x_label = |x: &f64| category_label(&spec.labels, *x);
    let y_label = |y: &f64| format_value(*y);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    let bar_width = BAR_GROUP_WIDTH / spec.series.len().max(1) as f64;
    for (series_idx, series) in spec.series.iter().enumerate() {
        let offset = -BAR_GROUP_WIDTH / 2.0 + series_idx as f64 * bar_width;
        let bars = series
            .values
            .iter()
            .take(spec.labels.len())
            .enumerate()
            .map(|(idx, value)| {
                let left = idx as f64 + offset;
                Rectangle::new(
                    [(left, 0.0), (left + bar_width, value.clamp(0.0, axis_max))],
                    parse_color(series.color_at(idx)).filled(),
                )
            });

        let legend_color = parse_color(series.color_at(0));
        chart
            .draw_series(bars)?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], legend_color.filled()));
    }

    if spec.series.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}

/// 横向条形图（单系列）,首项在最上方; 超出数值轴上限的条形截断,数值标注保留原值
fn draw_horizontal_bars(root: &Canvas<'_>, spec: &ChartSpec) -> anyhow::Result<()> {
    let Some(series) = spec.series.first() else {
        return Ok(());
    };
    let count = spec.labels.len().max(1);
    let axis_max = value_axis_max(spec);
    let top_row = (count - 1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT_FAMILY, 20))
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(130)
        .build_cartesian_2d(0.0..axis_max, -0.5..count as f64 - 0.5)?;

    let x_label = |x: &f64| format_value(*x);
    let y_label = |y: &f64| category_label(&spec.labels, top_row - *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(count)
        .y_label_formatter(&y_label)
        .x_label_formatter(&x_label)
        .draw()?;

    let color = parse_color(series.color_at(0));
    let bars: Vec<(f64, f64, f64)> = series
        .values
        .iter()
        .take(spec.labels.len())
        .enumerate()
        .map(|(idx, value)| (top_row - idx as f64, value.clamp(0.0, axis_max), *value))
        .collect();

    chart.draw_series(bars.iter().map(|(row, length, _)| {
        Rectangle::new([(0.0, row - 0.35), (*length, row + 0.35)], color.filled())
    }))?;
    chart.draw_series(bars.iter().map(|(row, length, value)| {
        Text::new(
            format_value(*value),
            (*length, *row),
            (FONT_FAMILY, 12).into_font(),
        )
    }))?;
    Ok(())
}
