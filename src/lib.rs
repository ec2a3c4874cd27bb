// 特定の警告を無効化
#![allow(clippy::too_many_arguments)]

pub mod corr;
pub mod error;
pub mod groupby;
pub mod io;
pub mod na;
pub mod outlier;
pub mod pipeline;
pub mod quality;
pub mod ranking;
pub mod report;
pub mod series;
pub mod stats;
pub mod table;
pub mod vis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use na::NA;
pub use pipeline::{AnalysisReport, ChartSpec, PanelSpec, ReportConfig};
pub use series::Series;
pub use table::{Column, DType, Table};
pub use vis::PlotSettings;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
