// ==========================================
// 考试成绩分析看板 - 命令行入口
// ==========================================
// 用法:
//   exam-results-dashboard <file.xlsx|file.xls> [--config <json>] [--report <out.html>]
//                          [--search <term>] [--sort]
// 说明: 不启动图形界面; 单次驱动 API 并打印汇总与成绩表
// ==========================================

use exam_results_dashboard::api::DashboardApi;
use exam_results_dashboard::dashboard::TableRow;
use exam_results_dashboard::{i18n, logging, ConfigManager, APP_NAME, VERSION};
use std::collections::HashSet;
use std::path::PathBuf;

const USAGE: &str = "usage: exam-results-dashboard <file.xlsx|file.xls> [--config <json>] [--report <out.html>] [--search <term>] [--sort]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    file: PathBuf,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    search: Option<String>,
    sort: bool,
}

fn parse_args() -> Result<CliArgs, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    let mut file = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().ok_or(USAGE)?.into()),
            "--report" => parsed.report = Some(args.next().ok_or(USAGE)?.into()),
            "--search" => parsed.search = Some(args.next().ok_or(USAGE)?),
            "--sort" => parsed.sort = true,
            "-h" | "--help" => return Err(USAGE.into()),
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {}\n{}", arg, USAGE).into()),
        }
    }

    parsed.file = file.ok_or(USAGE)?;
    Ok(parsed)
}

/// 排序后的行只保留搜索命中的学生,并重新编号
fn restrict_to_matches(sorted: Vec<TableRow>, matches: &[TableRow]) -> Vec<TableRow> {
    let matched: HashSet<u32> = matches.iter().map(|row| row.id).collect();
    sorted
        .into_iter()
        .filter(|row| matched.contains(&row.id))
        .enumerate()
        .map(|(idx, row)| TableRow {
            position: idx + 1,
            ..row
        })
        .collect()
}

fn print_rows(rows: &[TableRow]) {
    for row in rows {
        let marker = row.highlight.map(|h| h.css_class()).unwrap_or("");
        println!(
            "{:>4}  {:<32} {:<24} {:>6} {:>6} {:>4}  {:<3} {:<12} {}",
            row.position,
            row.student,
            row.registration_no,
            row.subject_marks,
            row.assessment_marks,
            row.final_marks,
            row.grade,
            row.status,
            marker
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = parse_args()?;

    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path)?,
        None => ConfigManager::new(),
    };
    let config = manager.dashboard_config();
    i18n::set_locale(&config.locale);

    tracing::info!(version = VERSION, app = APP_NAME, "启动");

    let api = DashboardApi::from_config(config);
    let view = match api.handle_file(&cli.file).await {
        Ok(view) => view,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    println!("{}", view.batch_label);
    println!("{}", view.status_line);
    println!();
    for (label, value) in view.summary.labeled() {
        println!("{:<24} {}", label, value);
    }
    println!();
    for item in &view.grade_summary {
        println!("{:<4} {:>4} ({}%)", item.grade, item.count, item.percent);
    }
    println!();

    let rows = match (cli.sort, &cli.search) {
        (true, Some(term)) => restrict_to_matches(api.toggle_sort()?.rows, &api.search(term)?),
        (true, None) => api.toggle_sort()?.rows,
        (false, Some(term)) => api.search(term)?,
        (false, None) => view.rows,
    };
    print_rows(&rows);

    if let Some(path) = &cli.report {
        let html = api.print_report(chrono::Local::now().date_naive())?;
        tokio::fs::write(path, html).await?;
        println!();
        println!("report: {}", path.display());
    }

    Ok(())
}
