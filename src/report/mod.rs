// レポート出力モジュール
//
// 解析結果をセクション区切りのテキストとチャート画像に変換する。
// 表示する数値は小数点以下2桁に丸めるが、内部の値は丸めない。

use std::io::Write;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::corr;
use crate::error::{Error, Result};
use crate::pipeline::{AnalysisReport, ChartSpec, PanelSpec, ReportConfig};
use crate::table::Table;
use crate::vis::{charts, PlotSettings};

/// 解析結果をテキストレポートとして書き出す
pub fn render_text<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    banner(out, &report.title)?;

    // 1. 基本情報
    section(out, "1. BASIC DATASET INFORMATION")?;
    writeln!(out, "Rows: {}", report.row_count)?;
    writeln!(out, "Columns: {}", report.column_count)?;
    writeln!(out, "Column types:")?;
    for (name, dtype) in &report.dtypes {
        writeln!(out, "  {:<32} {:?}", name, dtype)?;
    }

    // 2. データ品質
    section(out, "2. DATA QUALITY ASSESSMENT")?;
    writeln!(out, "Missing values per column:")?;
    for (name, count) in &report.quality.null_counts {
        writeln!(out, "  {:<32} {}", name, count)?;
    }
    writeln!(out, "Duplicate rows: {}", report.quality.duplicate_rows)?;
    writeln!(out, "Negative values:")?;
    for (name, count) in &report.quality.negative_counts {
        writeln!(out, "  {}: {} negative values", name, count)?;
    }
    for (name, summary) in &report.quality.categorical {
        writeln!(out, "{}: {} distinct values", name, summary.distinct)?;
        for (value, count) in &summary.value_counts {
            let share = if report.row_count > 0 {
                *count as f64 * 100.0 / report.row_count as f64
            } else {
                0.0
            };
            writeln!(out, "  {:<24} {} rows ({:.1}%)", value, count, share)?;
        }
    }

    // 3. 記述統計
    section(out, "3. DESCRIPTIVE STATISTICS")?;
    for (name, rec) in &report.summaries {
        writeln!(out, "{}:", name)?;
        writeln!(out, "  Count: {}", rec.count)?;
        writeln!(out, "  Mean: {:.2}", rec.mean)?;
        writeln!(out, "  Std: {:.2}", rec.std)?;
        writeln!(out, "  Min: {:.2}", rec.min)?;
        writeln!(out, "  25%: {:.2}", rec.q1)?;
        writeln!(out, "  Median: {:.2}", rec.median)?;
        writeln!(out, "  75%: {:.2}", rec.q3)?;
        writeln!(out, "  Max: {:.2}", rec.max)?;
        writeln!(out, "  Variance: {:.2}", rec.variance)?;
        writeln!(out, "  Skewness: {:.2}", rec.skewness)?;
        writeln!(out, "  Kurtosis: {:.2}", rec.kurtosis)?;
        writeln!(out, "  Range: {:.2}", rec.range)?;
    }

    // 4. グループ集計
    section(out, "4. GROUP ANALYSIS")?;
    for group in &report.groups {
        writeln!(out, "Grouped by '{}':", group.key)?;
        writeln!(out, "Rows per group:")?;
        for (name, count) in &group.sizes {
            writeln!(out, "  {:<24} {}", name, count)?;
        }
        for (name, columns) in &group.stats {
            writeln!(out, "{}:", name)?;
            for (column, gs) in columns {
                writeln!(
                    out,
                    "  {:<32} mean={:.2} median={:.2} std={:.2} min={:.2} max={:.2}",
                    column, gs.mean, gs.median, gs.std, gs.min, gs.max
                )?;
            }
        }
        writeln!(out, "Highest mean per column:")?;
        for (column, name, mean) in &group.max_mean {
            writeln!(out, "  {}: {} ({:.2})", column, name, mean)?;
        }
        writeln!(out)?;
    }

    // 5. 相関分析
    section(out, "5. CORRELATION ANALYSIS")?;
    writeln!(out, "Correlation matrix:")?;
    let matrix = &report.correlation.matrix;
    write!(out, "{:<32}", "")?;
    for name in matrix.columns() {
        write!(out, " {:>10}", truncate(name, 10))?;
    }
    writeln!(out)?;
    for (i, name) in matrix.columns().iter().enumerate() {
        write!(out, "{:<32}", name)?;
        for value in &matrix.values()[i] {
            write!(out, " {:>10.2}", value)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Pairs by correlation strength:")?;
    for pair in &report.correlation.pairs {
        writeln!(out, "  {} vs {}: {:.2}", pair.a, pair.b, pair.coefficient)?;
    }

    // 6. 上位・下位
    section(out, "6. TOP AND BOTTOM ROWS")?;
    for rank in &report.rankings {
        writeln!(out, "{}:", rank.column)?;
        writeln!(out, "Top {}:", rank.top.len())?;
        for row in &rank.top {
            writeln!(out, "  {}: {:.2}", row.label, row.value)?;
        }
        if rank.exclude_zero {
            writeln!(out, "Bottom {} (excluding zeros):", rank.bottom.len())?;
        } else {
            writeln!(out, "Bottom {}:", rank.bottom.len())?;
        }
        for row in &rank.bottom {
            writeln!(out, "  {}: {:.2}", row.label, row.value)?;
        }
        writeln!(out, "Rows with zero value: {}", rank.zero_count)?;
        if rank.null_count > 0 {
            writeln!(out, "Rows with missing value: {}", rank.null_count)?;
        }
        writeln!(out)?;
    }

    // 7. 外れ値
    section(out, "7. OUTLIER ANALYSIS")?;
    for outlier in &report.outliers {
        writeln!(out, "{}:", outlier.column)?;
        writeln!(out, "  IQR range: {:.2} - {:.2}", outlier.q1, outlier.q3)?;
        writeln!(
            out,
            "  Outlier bounds: {:.2} - {:.2}",
            outlier.lower_bound, outlier.upper_bound
        )?;
        writeln!(out, "  Number of outliers: {}", outlier.outliers.len())?;
        for row in &outlier.outliers {
            writeln!(out, "    {}: {:.2}", row.label, row.value)?;
        }
    }

    // 8. 主要な所見
    section(out, "8. KEY INSIGHTS")?;
    let insights = &report.insights;
    writeln!(out, "Global averages:")?;
    for (name, mean) in &insights.global_means {
        writeln!(out, "  {}: {:.2}", name, mean)?;
    }
    if !insights.top_groups.is_empty() {
        writeln!(out, "Highest group means:")?;
        for (column, name, mean) in &insights.top_groups {
            writeln!(out, "  {}: {} ({:.2})", column, name, mean)?;
        }
    }
    if let Some(peak) = &insights.peak_row {
        writeln!(out, "Highest value: {} ({:.2})", peak.label, peak.value)?;
    }
    writeln!(out, "Rows with zero value: {}", insights.zero_rows.len())?;
    if !insights.zero_rows.is_empty() {
        writeln!(out, "  {}", insights.zero_rows.join(", "))?;
    }
    if let Some(pair) = &insights.strongest_pair {
        writeln!(
            out,
            "Strongest correlation: {} vs {} ({:.2})",
            pair.a, pair.b, pair.coefficient
        )?;
    }
    if !insights.ratio_leaders.is_empty() {
        writeln!(out, "Highest values with per-unit ratio:")?;
        for (label, value, ratio) in &insights.ratio_leaders {
            writeln!(out, "  {}: {:.2} ({:.2}/unit)", label, value, ratio)?;
        }
    }
    if let Some((column, count)) = &insights.above_median {
        writeln!(out, "Rows above median {}: {}", column, count)?;
    }

    writeln!(out)?;
    banner(out, "ANALYSIS COMPLETE")?;
    Ok(())
}

/// 設定されたチャート画像をすべて書き出す
pub fn render_charts(
    table: &Table,
    report: &AnalysisReport,
    config: &ReportConfig,
    settings: &PlotSettings,
) -> Result<()> {
    for chart in &config.charts {
        render_chart_file(table, report, chart, settings)?;
        log::info!("グラフを書き出しました: {}", chart.filename);
    }
    Ok(())
}

/// 1枚のチャート画像を書き出す
fn render_chart_file(
    table: &Table,
    report: &AnalysisReport,
    chart: &ChartSpec,
    settings: &PlotSettings,
) -> Result<()> {
    if chart.panels.is_empty() {
        return Err(Error::Empty(format!(
            "チャートにパネルがありません: {}",
            chart.filename
        )));
    }

    let (rows, cols) = grid_dims(chart.panels.len());
    let root = BitMapBackend::new(&chart.filename, (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((rows, cols));
    for (i, panel) in chart.panels.iter().enumerate() {
        draw_panel(&areas[i], table, report, panel, settings, i)?;
    }

    root.present()?;
    Ok(())
}

/// パネル数からグリッドの行数・列数を決める
fn grid_dims(panels: usize) -> (usize, usize) {
    let cols = (panels as f64).sqrt().ceil() as usize;
    let rows = (panels + cols - 1) / cols;
    (rows, cols)
}

/// 1パネルを描画する
fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    table: &Table,
    report: &AnalysisReport,
    panel: &PanelSpec,
    settings: &PlotSettings,
    index: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match panel {
        PanelSpec::Histogram { column } => {
            let values = table.numeric_values(column)?;
            charts::draw_histogram(
                area,
                &values,
                &format!("Distribution of {}", column),
                column,
                settings,
                index,
            )
        }
        PanelSpec::GroupMeanBars { key, column } => {
            let group = report
                .groups
                .iter()
                .find(|g| &g.key == key)
                .ok_or_else(|| Error::ColumnNotFound(key.clone()))?;

            let mut labels = Vec::new();
            let mut heights = Vec::new();
            for (name, columns) in &group.stats {
                if let Some(gs) = columns.get(column) {
                    labels.push(name.clone());
                    heights.push(gs.mean);
                }
            }

            charts::draw_bars(
                area,
                &labels,
                &heights,
                &format!("Mean {} by {}", column, key),
                column,
                settings,
                index,
            )
        }
        PanelSpec::CategoryCountBars { column, limit } => {
            let (_, summary) = report
                .quality
                .categorical
                .iter()
                .find(|(name, _)| name == column)
                .ok_or_else(|| Error::ColumnNotFound(column.clone()))?;

            let mut labels = Vec::new();
            let mut heights = Vec::new();
            for (value, count) in summary.value_counts.iter().take(*limit) {
                labels.push(value.clone());
                heights.push(*count as f64);
            }

            charts::draw_bars(
                area,
                &labels,
                &heights,
                &format!("Rows by {}", column),
                "Rows",
                settings,
                index,
            )
        }
        PanelSpec::Scatter { x, y } => {
            let (xs, ys) = corr::paired_values(table, x, y)?;
            charts::draw_scatter(
                area,
                &xs,
                &ys,
                &format!("{} vs {}", x, y),
                x,
                y,
                settings,
                index,
            )
        }
        PanelSpec::CorrelationHeatmap => {
            charts::draw_heatmap(area, &report.correlation.matrix, "Correlation Matrix")
        }
    }
}

/// タイトルのバナーを書き出す
fn banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(60))?;
    Ok(())
}

/// セクションの見出しを書き出す
fn section<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}

/// 表示幅に合わせて文字列を切り詰める
fn truncate(value: &str, width: usize) -> String {
    if value.len() <= width {
        value.to_string()
    } else {
        value.chars().take(width).collect()
    }
}
