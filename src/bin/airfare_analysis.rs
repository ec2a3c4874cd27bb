// 航空路線・運賃データ（Airfares.csv）の探索的データ分析

use std::env;
use std::io;
use std::process;

use edars::pipeline::{self, ChartSpec, PanelSpec, ReportConfig};
use edars::ranking::DEFAULT_TOP_K;
use edars::vis::PlotSettings;
use edars::Error;

/// Airfares.csv用のレポート構成を作る
fn config() -> ReportConfig {
    let numeric_columns = vec![
        "FARE".to_string(),
        "DISTANCE".to_string(),
        "PAX".to_string(),
        "S_INCOME".to_string(),
        "E_INCOME".to_string(),
        "S_POP".to_string(),
        "E_POP".to_string(),
        "HI".to_string(),
    ];

    ReportConfig {
        title: "FLIGHT DATA - EXPLORATORY DATA ANALYSIS".to_string(),
        numeric_columns,
        categorical_columns: vec![
            "S_CITY".to_string(),
            "E_CITY".to_string(),
            "VACATION".to_string(),
            "SW".to_string(),
            "SLOT".to_string(),
            "GATE".to_string(),
        ],
        group_keys: vec!["SW".to_string(), "VACATION".to_string()],
        rank_columns: vec!["FARE".to_string()],
        label_columns: vec!["S_CITY".to_string(), "E_CITY".to_string()],
        target_column: "FARE".to_string(),
        top_k: DEFAULT_TOP_K,
        exclude_zero_in_bottom: false,
        ratio_columns: Some(("FARE".to_string(), "DISTANCE".to_string())),
        median_threshold_column: Some("HI".to_string()),
        charts: vec![
            // 運賃の分布と、距離・競合他社・路線種別との関係
            ChartSpec {
                filename: "fare_analysis.png".to_string(),
                panels: vec![
                    PanelSpec::Histogram {
                        column: "FARE".to_string(),
                    },
                    PanelSpec::Scatter {
                        x: "DISTANCE".to_string(),
                        y: "FARE".to_string(),
                    },
                    PanelSpec::GroupMeanBars {
                        key: "SW".to_string(),
                        column: "FARE".to_string(),
                    },
                    PanelSpec::GroupMeanBars {
                        key: "VACATION".to_string(),
                        column: "FARE".to_string(),
                    },
                ],
            },
            // 発着都市の路線数と距離の分布
            ChartSpec {
                filename: "route_analysis.png".to_string(),
                panels: vec![
                    PanelSpec::CategoryCountBars {
                        column: "S_CITY".to_string(),
                        limit: 8,
                    },
                    PanelSpec::CategoryCountBars {
                        column: "E_CITY".to_string(),
                        limit: 8,
                    },
                    PanelSpec::Histogram {
                        column: "DISTANCE".to_string(),
                    },
                    PanelSpec::Scatter {
                        x: "DISTANCE".to_string(),
                        y: "PAX".to_string(),
                    },
                ],
            },
            // 空港の制約・所得・人口・市場集中度
            ChartSpec {
                filename: "market_analysis.png".to_string(),
                panels: vec![
                    PanelSpec::CategoryCountBars {
                        column: "SLOT".to_string(),
                        limit: 8,
                    },
                    PanelSpec::Scatter {
                        x: "S_INCOME".to_string(),
                        y: "FARE".to_string(),
                    },
                    PanelSpec::Scatter {
                        x: "S_POP".to_string(),
                        y: "PAX".to_string(),
                    },
                    PanelSpec::Histogram {
                        column: "HI".to_string(),
                    },
                ],
            },
            ChartSpec {
                filename: "correlation_matrix.png".to_string(),
                panels: vec![PanelSpec::CorrelationHeatmap],
            },
        ],
    }
}

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "Airfares.csv".to_string());
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
