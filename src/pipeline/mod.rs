// 解析パイプラインモジュール
//
// 読み込み → 品質チェック → 記述統計 → グループ集計 → 相関分析 →
// 順位抽出 → 外れ値検出 → レポート出力 を一直線に実行する。
// データセットごとの違いはReportConfigにまとめ、同じパイプラインを
// 複数のデータセットに対して再利用する。各ステージは&Tableと前段の
// 結果だけを受け取り、Tableを変更しない。失敗したステージで実行は
// 打ち切られ、部分的なレポートは出力しない。

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::corr::{self, CorrPair, CorrelationAnalysis};
use crate::error::{Error, Result};
use crate::groupby::{GroupBy, GroupSummary};
use crate::outlier::{self, OutlierReport};
use crate::quality::{self, QualityReport};
use crate::ranking::{self, RankReport, RankedRow};
use crate::report;
use crate::stats::{self, SummaryRecord};
use crate::table::{DType, Table};
use crate::vis::PlotSettings;

/// チャート画像内の1パネルの内容
#[derive(Debug, Clone)]
pub enum PanelSpec {
    /// 数値列のヒストグラム
    Histogram { column: String },
    /// グループごとの平均値の棒グラフ
    GroupMeanBars { key: String, column: String },
    /// カテゴリ列の出現回数の棒グラフ（上位limit件）
    CategoryCountBars { column: String, limit: usize },
    /// 2つの数値列の散布図
    Scatter { x: String, y: String },
    /// 相関行列のヒートマップ
    CorrelationHeatmap,
}

/// 1枚のチャート画像の構成
#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// 出力ファイル名
    pub filename: String,
    /// パネルの並び（左上から行優先で配置される）
    pub panels: Vec<PanelSpec>,
}

/// レポートの構成
///
/// データセットごとの列名や出力内容をまとめる。パイプライン本体は
/// この構成以外にデータセット固有の知識を持たない。
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// レポートのタイトル
    pub title: String,
    /// 解析対象の数値列
    pub numeric_columns: Vec<String>,
    /// 品質チェックで水準を集計するカテゴリ列
    pub categorical_columns: Vec<String>,
    /// グループ集計に使うキー列
    pub group_keys: Vec<String>,
    /// 上位・下位を抽出する数値列
    pub rank_columns: Vec<String>,
    /// 行の表示ラベルに使う列（複数指定時は " → " で連結）
    pub label_columns: Vec<String>,
    /// 主要な所見の対象にする数値列
    pub target_column: String,
    /// 上位・下位の抽出件数
    pub top_k: usize,
    /// 下位抽出でゼロ値を除外するか
    pub exclude_zero_in_bottom: bool,
    /// 対象列の上位行について比率を表示する（分子列, 分母列）
    pub ratio_columns: Option<(String, String)>,
    /// 中央値を上回る行数を集計する列
    pub median_threshold_column: Option<String>,
    /// 出力するチャート画像
    pub charts: Vec<ChartSpec>,
}

/// 主要な所見
///
/// 他の解析結果から導かれる要約。レポート末尾のまとめに使う。
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    /// 数値列ごとの全体平均
    pub global_means: Vec<(String, f64)>,
    /// 最初のグループキーにおける列ごとの最大平均グループ
    pub top_groups: Vec<(String, String, f64)>,
    /// 対象列の最大値を持つ行
    pub peak_row: Option<RankedRow>,
    /// 対象列の値がゼロの行のラベル
    pub zero_rows: Vec<String>,
    /// 対象列を含むペアのうち相関が最も強いもの
    pub strongest_pair: Option<CorrPair>,
    /// 対象列上位行の比率（ラベル, 対象列の値, 比率）
    pub ratio_leaders: Vec<(String, f64, f64)>,
    /// 指定列の中央値を上回る行数（列名, 行数）
    pub above_median: Option<(String, usize)>,
}

/// 1回の解析で得られるすべての数値結果
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// レポートのタイトル
    pub title: String,
    /// 行数
    pub row_count: usize,
    /// 列数
    pub column_count: usize,
    /// 列ごとのデータ型（列順）
    pub dtypes: Vec<(String, DType)>,
    /// データ品質の集計
    pub quality: QualityReport,
    /// 数値列ごとの記述統計量
    pub summaries: Vec<(String, SummaryRecord)>,
    /// グループキーごとの集計（group_keysの順）
    pub groups: Vec<GroupSummary>,
    /// 相関分析の結果
    pub correlation: CorrelationAnalysis,
    /// 順位抽出の結果（rank_columnsの順）
    pub rankings: Vec<RankReport>,
    /// 数値列ごとの外れ値（numeric_columnsの順）
    pub outliers: Vec<OutlierReport>,
    /// 主要な所見
    pub insights: Insights,
}

/// 読み込み済みのTableを解析する
///
/// ステージを固定順で実行し、失敗した時点で中断する。
pub fn analyze(table: &Table, config: &ReportConfig) -> Result<AnalysisReport> {
    log::info!("品質チェックを実行します");
    let quality = quality::assess(table, &config.numeric_columns, &config.categorical_columns)?;

    log::info!("記述統計量を計算します");
    let summaries = stats::summarize(table, &config.numeric_columns)?;

    log::info!("グループ集計を実行します");
    let mut groups = Vec::with_capacity(config.group_keys.len());
    for key in &config.group_keys {
        groups.push(GroupBy::new(table, key)?.aggregate(&config.numeric_columns)?);
    }

    log::info!("相関分析を実行します");
    let correlation = corr::analyze(table, &config.numeric_columns)?;

    log::info!("順位抽出を実行します");
    let mut rankings = Vec::with_capacity(config.rank_columns.len());
    for column in &config.rank_columns {
        rankings.push(ranking::extract(
            table,
            column,
            &config.label_columns,
            config.top_k,
            config.exclude_zero_in_bottom,
        )?);
    }

    log::info!("外れ値検出を実行します");
    let mut outliers = Vec::with_capacity(config.numeric_columns.len());
    for column in &config.numeric_columns {
        outliers.push(outlier::detect(table, column, &config.label_columns)?);
    }

    let insights = build_insights(
        table,
        config,
        &summaries,
        &groups,
        &correlation,
        &rankings,
    )?;

    let dtypes = table
        .column_names()
        .iter()
        .map(|name| table.dtype(name).map(|d| (name.clone(), d)))
        .collect::<Result<Vec<_>>>()?;

    Ok(AnalysisReport {
        title: config.title.clone(),
        row_count: table.row_count(),
        column_count: table.column_count(),
        dtypes,
        quality,
        summaries,
        groups,
        correlation,
        rankings,
        outliers,
        insights,
    })
}

/// CSVファイルを読み込み、解析し、テキストとチャートを出力する
pub fn run<P: AsRef<Path>, W: Write>(
    path: P,
    config: &ReportConfig,
    settings: &PlotSettings,
    out: &mut W,
) -> Result<()> {
    let table = crate::io::read_table(path)?;
    let analysis = analyze(&table, config)?;
    report::render_text(&analysis, out)?;
    report::render_charts(&table, &analysis, config, settings)?;
    Ok(())
}

/// 他の解析結果から主要な所見を導く
fn build_insights(
    table: &Table,
    config: &ReportConfig,
    summaries: &[(String, SummaryRecord)],
    groups: &[GroupSummary],
    correlation: &CorrelationAnalysis,
    rankings: &[RankReport],
) -> Result<Insights> {
    let global_means = summaries
        .iter()
        .map(|(name, rec)| (name.clone(), rec.mean))
        .collect();

    let top_groups = groups
        .first()
        .map(|g| g.max_mean.clone())
        .unwrap_or_default();

    // 対象列の順位があればその先頭行が最大値の行
    let peak_row = rankings
        .iter()
        .find(|r| r.column == config.target_column)
        .and_then(|r| r.top.first().cloned());

    // 対象列の値がゼロの行
    let mut zero_rows = Vec::new();
    for (row, value) in table.numeric_entries(&config.target_column)? {
        if value == 0.0 {
            zero_rows.push(table.label(&config.label_columns, row)?);
        }
    }

    // ペアは絶対値の降順なので、対象列を含む最初のペアが最強
    let strongest_pair = correlation
        .pairs
        .iter()
        .find(|p| p.a == config.target_column || p.b == config.target_column)
        .cloned();

    // 対象列上位行の比率（例: 運賃/距離）
    let mut ratio_leaders = Vec::new();
    if let Some((numerator, denominator)) = &config.ratio_columns {
        if let Some(rank) = rankings.iter().find(|r| r.column == config.target_column) {
            let num_col = table
                .column(numerator)
                .ok_or_else(|| Error::ColumnNotFound(numerator.clone()))?;
            let den_col = table
                .column(denominator)
                .ok_or_else(|| Error::ColumnNotFound(denominator.clone()))?;
            for row in &rank.top {
                if let (Some(n), Some(d)) = (num_col.as_f64(row.row), den_col.as_f64(row.row)) {
                    if d != 0.0 {
                        ratio_leaders.push((row.label.clone(), row.value, n / d));
                    }
                }
            }
        }
    }

    // 指定列の中央値を上回る行数
    let above_median = match &config.median_threshold_column {
        Some(column) => {
            let values = table.numeric_values(column)?;
            if values.is_empty() {
                return Err(Error::EmptyColumn(column.clone()));
            }
            let median = stats::quantile(&values, 0.5)?;
            let count = values.iter().filter(|&&v| v > median).count();
            Some((column.clone(), count))
        }
        None => None,
    };

    Ok(Insights {
        global_means,
        top_groups,
        peak_row,
        zero_rows,
        strongest_pair,
        ratio_leaders,
        above_median,
    })
}
