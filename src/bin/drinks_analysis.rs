// 国別アルコール消費データ（drinks.csv）の探索的データ分析

use std::env;
use std::io;
use std::process;

use edars::pipeline::{self, ChartSpec, PanelSpec, ReportConfig};
use edars::ranking::DEFAULT_TOP_K;
use edars::vis::PlotSettings;
use edars::Error;

/// drinks.csv用のレポート構成を作る
fn config() -> ReportConfig {
    let numeric_columns = vec![
        "beer_servings".to_string(),
        "spirit_servings".to_string(),
        "wine_servings".to_string(),
        "total_litres_of_pure_alcohol".to_string(),
    ];

    // 概要グリッド: 各列の分布、大陸別の平均、相関、総量との散布図
    let mut overview = Vec::new();
    for column in &numeric_columns {
        overview.push(PanelSpec::Histogram {
            column: column.clone(),
        });
    }
    for column in &numeric_columns {
        overview.push(PanelSpec::GroupMeanBars {
            key: "continent".to_string(),
            column: column.clone(),
        });
    }
    overview.push(PanelSpec::CorrelationHeatmap);
    for column in ["beer_servings", "wine_servings", "spirit_servings"] {
        overview.push(PanelSpec::Scatter {
            x: column.to_string(),
            y: "total_litres_of_pure_alcohol".to_string(),
        });
    }

    // 大陸比較グリッド: 列ごとの大陸別平均
    let comparison = numeric_columns
        .iter()
        .map(|column| PanelSpec::GroupMeanBars {
            key: "continent".to_string(),
            column: column.clone(),
        })
        .collect();

    ReportConfig {
        title: "DRINKS DATASET - EXPLORATORY DATA ANALYSIS".to_string(),
        numeric_columns: numeric_columns.clone(),
        categorical_columns: vec!["country".to_string(), "continent".to_string()],
        group_keys: vec!["continent".to_string()],
        rank_columns: numeric_columns,
        label_columns: vec!["country".to_string()],
        target_column: "total_litres_of_pure_alcohol".to_string(),
        top_k: DEFAULT_TOP_K,
        exclude_zero_in_bottom: true,
        ratio_columns: None,
        median_threshold_column: None,
        charts: vec![
            ChartSpec {
                filename: "drinks_analysis_plots.png".to_string(),
                panels: overview,
            },
            ChartSpec {
                filename: "continent_comparison.png".to_string(),
                panels: comparison,
            },
        ],
    }
}

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "drinks.csv".to_string());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match pipeline::run(&path, &config(), &PlotSettings::default(), &mut out) {
        Ok(()) => {}
        Err(Error::FileNotFound(_)) => {
            println!("Error: {} not found in current directory.", path);
            println!("Please ensure the file exists and try again.");
            process::exit(1);
        }
        Err(e) => {
            println!("An error occurred during analysis: {}", e);
            process::exit(1);
        }
    }
}
