// 統計モジュール
//
// 記述統計量（平均、分散、分位数、歪度、尖度）と相関係数の計算を提供します。
// 分位数は順序統計量の線形補間、分散・標準偏差は不偏推定量（n-1）、
// 歪度・尖度は標本モーメントによる定義（g1, 過剰尖度g2）を使用します。

pub mod descriptive;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::table::Table;

/// 1つの数値列に対する記述統計量
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    /// 非欠損データの件数
    pub count: usize,
    /// 平均値
    pub mean: f64,
    /// 標準偏差（不偏推定量）
    pub std: f64,
    /// 最小値
    pub min: f64,
    /// 25%分位点
    pub q1: f64,
    /// 中央値（50%分位点）
    pub median: f64,
    /// 75%分位点
    pub q3: f64,
    /// 最大値
    pub max: f64,
    /// 分散（不偏推定量）
    pub variance: f64,
    /// 歪度
    pub skewness: f64,
    /// 尖度（過剰尖度）
    pub kurtosis: f64,
    /// 範囲（最大値 - 最小値）
    pub range: f64,
}

/// データの基本統計量を計算
///
/// # 例
/// ```rust
/// use edars::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let stats = stats::describe(&data).unwrap();
/// assert_eq!(stats.count, 5);
/// assert!((stats.mean - 3.0).abs() < 1e-10);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<SummaryRecord> {
    descriptive::describe_impl(data.as_ref())
}

/// Tableの指定数値列すべての記述統計量を計算
///
/// 非欠損値が1つもない列は `EmptyColumn` エラーになる。
pub fn summarize(table: &Table, columns: &[String]) -> Result<Vec<(String, SummaryRecord)>> {
    let mut records = Vec::with_capacity(columns.len());
    for name in columns {
        let values = table.numeric_values(name)?;
        if values.is_empty() {
            return Err(Error::EmptyColumn(name.clone()));
        }
        records.push((name.clone(), descriptive::describe_impl(&values)?));
    }
    Ok(records)
}

/// 相関係数を計算
///
/// 2つの数値配列間のピアソン相関係数を計算します。
/// 相関係数は-1から1の範囲で、1は完全な正の相関、-1は完全な負の相関、
/// 0は相関がないことを示します。
///
/// # 例
/// ```rust
/// use edars::stats;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0];
/// let y = vec![4.0, 3.0, 2.0, 1.0];
/// let corr = stats::correlation(&x, &y).unwrap();
/// assert!((corr + 1.0).abs() < 1e-10);
/// ```
pub fn correlation<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::correlation_impl(x.as_ref(), y.as_ref())
}

/// 共分散を計算
///
/// 2つの数値配列間の共分散（不偏推定量）を計算します。
pub fn covariance<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::covariance_impl(x.as_ref(), y.as_ref())
}

/// 分位数を計算
///
/// 順序統計量の線形補間による分位数。pは0.0〜1.0の範囲で指定する。
pub fn quantile<T: AsRef<[f64]>>(data: T, p: f64) -> Result<f64> {
    let data = data.as_ref();
    if data.is_empty() {
        return Err(Error::Empty(
            "分位数の計算には少なくとも1つのデータが必要です".into(),
        ));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::Consistency(format!(
            "分位数の指定が範囲外です: {}",
            p
        )));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(descriptive::percentile(&sorted, p))
}
