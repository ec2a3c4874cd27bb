use std::fs;

use edars::io::{self, read_table};
use edars::pipeline::{self, ReportConfig};
use edars::vis::PlotSettings;
use edars::Error;

fn write_sample_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("sample.csv");
    fs::write(
        &path,
        "country,continent,servings,total\n\
         Aland,EU,10,1.0\n\
         Borland,EU,20,2.0\n\
         Corland,AS,90,9.0\n\
         Dorland,AS,0,0.0\n",
    )
    .unwrap();
    path
}

fn sample_config() -> ReportConfig {
    ReportConfig {
        title: "SAMPLE DATASET - EXPLORATORY DATA ANALYSIS".to_string(),
        numeric_columns: vec!["servings".to_string(), "total".to_string()],
        categorical_columns: vec!["continent".to_string()],
        group_keys: vec!["continent".to_string()],
        rank_columns: vec!["servings".to_string(), "total".to_string()],
        label_columns: vec!["country".to_string()],
        target_column: "total".to_string(),
        top_k: 3,
        exclude_zero_in_bottom: true,
        ratio_columns: Some(("total".to_string(), "servings".to_string())),
        median_threshold_column: Some("servings".to_string()),
        charts: vec![],
    }
}

#[test]
fn test_analyze_produces_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_csv(&dir);
    let table = read_table(&path).unwrap();

    let report = pipeline::analyze(&table, &sample_config()).unwrap();

    assert_eq!(report.row_count, 4);
    assert_eq!(report.column_count, 4);
    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.correlation.pairs.len(), 1);
    assert_eq!(report.rankings.len(), 2);
    assert_eq!(report.outliers.len(), 2);

    // グループサイズの合計は行数
    let total: usize = report.groups[0].sizes.values().sum();
    assert_eq!(total, 4);

    // 所見: 最大値の行、ゼロ行、対象列を含む最強ペア
    let insights = &report.insights;
    assert_eq!(insights.peak_row.as_ref().unwrap().label, "Corland");
    assert_eq!(insights.zero_rows, vec!["Dorland".to_string()]);
    assert!(insights.strongest_pair.is_some());
    assert!(insights.above_median.is_some());
    assert!(!insights.ratio_leaders.is_empty());
}

#[test]
fn test_run_writes_sectioned_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_csv(&dir);

    let mut out = Vec::new();
    pipeline::run(&path, &sample_config(), &PlotSettings::default(), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("SAMPLE DATASET - EXPLORATORY DATA ANALYSIS"));
    assert!(text.contains("1. BASIC DATASET INFORMATION"));
    assert!(text.contains("2. DATA QUALITY ASSESSMENT"));
    assert!(text.contains("3. DESCRIPTIVE STATISTICS"));
    assert!(text.contains("4. GROUP ANALYSIS"));
    assert!(text.contains("5. CORRELATION ANALYSIS"));
    assert!(text.contains("6. TOP AND BOTTOM ROWS"));
    assert!(text.contains("7. OUTLIER ANALYSIS"));
    assert!(text.contains("8. KEY INSIGHTS"));
    assert!(text.contains("ANALYSIS COMPLETE"));

    // 表示は2桁に丸められる
    assert!(text.contains("Corland: 9.00"));
}

#[test]
fn test_run_missing_file_reports_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let mut out = Vec::new();
    let result = pipeline::run(&path, &sample_config(), &PlotSettings::default(), &mut out);

    assert!(matches!(result, Err(Error::FileNotFound(_))));
    // 読み込みに失敗した場合は何も出力されない
    assert!(out.is_empty());
}

#[test]
fn test_failing_stage_aborts_run() {
    // 存在しない列を指定した構成では実行が中断される
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_csv(&dir);

    let mut config = sample_config();
    config.numeric_columns.push("no_such_column".to_string());

    let mut out = Vec::new();
    let result = pipeline::run(&path, &config, &PlotSettings::default(), &mut out);
    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_csv(&dir);
    let table = read_table(&path).unwrap();
    let report = pipeline::analyze(&table, &sample_config()).unwrap();

    // 文字列化
    let json = io::json::report_to_string(&report).unwrap();
    assert!(json.contains("\"row_count\": 4"));
    assert!(json.contains("\"duplicate_rows\": 0"));

    // ファイル書き出し
    let json_path = dir.path().join("report.json");
    io::write_report(&report, &json_path).unwrap();
    let written = fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["title"], "SAMPLE DATASET - EXPLORATORY DATA ANALYSIS");
}
