use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};
use crate::pipeline::AnalysisReport;

/// 解析結果をJSONファイルに書き込む
///
/// テキストレポートと同じ内容を機械可読な形で保存する。
pub fn write_report<P: AsRef<Path>>(report: &AnalysisReport, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report).map_err(Error::Json)?;
    Ok(())
}

/// 解析結果をJSON文字列にする
pub fn report_to_string(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Error::Json)
}
