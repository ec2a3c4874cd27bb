// 外れ値検出モジュール
//
// 四分位範囲（IQR）の1.5倍を超えて四分位点から離れた値を外れ値とする
// 箱ひげ図の判定法を実装する。分位数の計算は記述統計と同じ線形補間を
// 使うため、両方のレポートで四分位点が一致する。

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ranking::RankedRow;
use crate::stats;
use crate::table::Table;

/// 外れ値検出の結果
#[derive(Debug, Clone, Serialize)]
pub struct OutlierReport {
    /// 対象の数値列
    pub column: String,
    /// 第1四分位点
    pub q1: f64,
    /// 第3四分位点
    pub q3: f64,
    /// 四分位範囲（q3 - q1）
    pub iqr: f64,
    /// 下側境界（q1 - 1.5 * iqr）
    pub lower_bound: f64,
    /// 上側境界（q3 + 1.5 * iqr）
    pub upper_bound: f64,
    /// 境界の外側にある行（行順）
    pub outliers: Vec<RankedRow>,
}

/// 指定列の外れ値を1.5×IQR法で検出する
///
/// 境界値ちょうどの値は外れ値としない（厳密に外側のみ）。
pub fn detect(table: &Table, column: &str, label_columns: &[String]) -> Result<OutlierReport> {
    let entries = table.numeric_entries(column)?;
    if entries.is_empty() {
        return Err(Error::EmptyColumn(column.to_string()));
    }

    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let q1 = stats::quantile(&values, 0.25)?;
    let q3 = stats::quantile(&values, 0.75)?;
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    let mut outliers = Vec::new();
    for (row, value) in entries {
        if value < lower_bound || value > upper_bound {
            outliers.push(RankedRow {
                row,
                label: table.label(label_columns, row)?,
                value,
            });
        }
    }

    Ok(OutlierReport {
        column: column.to_string(),
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        outliers,
    })
}
