// 記述統計モジュール

use crate::error::{Error, Result};
use crate::stats::SummaryRecord;

/// 記述統計量を計算する内部実装
pub(crate) fn describe_impl(data: &[f64]) -> Result<SummaryRecord> {
    if data.is_empty() {
        return Err(Error::Empty(
            "記述統計量の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    let count = data.len();

    // 平均値の計算
    let mean = data.iter().sum::<f64>() / count as f64;

    // 標本モーメント（歪度・尖度用、分母n）
    let m2 = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;
    let m3 = data.iter().map(|&x| (x - mean).powi(3)).sum::<f64>() / count as f64;
    let m4 = data.iter().map(|&x| (x - mean).powi(4)).sum::<f64>() / count as f64;

    // 分散・標準偏差の計算（不偏推定量、分母n-1）
    let variance = if count > 1 {
        let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
        sum_squared_diff / (count - 1) as f64
    } else {
        0.0
    };
    let std = variance.sqrt();

    // 歪度 g1 = m3 / m2^(3/2)、過剰尖度 g2 = m4 / m2^2 - 3
    // 分散がゼロ（定数列）の場合は0とする
    let (skewness, kurtosis) = if m2 > 0.0 {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    } else {
        (0.0, 0.0)
    };

    // データをソートして分位数を計算
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[count - 1];

    // 分位数の計算（線形補間）
    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);

    Ok(SummaryRecord {
        count,
        mean,
        std,
        min,
        q1,
        median,
        q3,
        max,
        variance,
        skewness,
        kurtosis,
        range: max - min,
    })
}

/// パーセンタイルを計算
///
/// ソート済みデータに対し、位置 p * (n - 1) の順序統計量を線形補間する。
pub(crate) fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

/// 共分散を計算する内部実装
pub(crate) fn covariance_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "共分散計算のデータ長が一致しません: x={}, y={}",
            x.len(),
            y.len()
        )));
    }

    let n = x.len();

    if n <= 1 {
        return Err(Error::Empty(
            "共分散計算には少なくとも2つのデータポイントが必要です".into(),
        ));
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let cov = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>()
        / (n - 1) as f64;

    Ok(cov)
}

/// 相関係数を計算する内部実装
pub(crate) fn correlation_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "相関係数計算のデータ長が一致しません: x={}, y={}",
            x.len(),
            y.len()
        )));
    }

    let n = x.len();

    if n <= 1 {
        return Err(Error::Empty(
            "相関係数計算には少なくとも2つのデータポイントが必要です".into(),
        ));
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    // 分子: Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    // 分母: √[Σ(xi - x̄)² * Σ(yi - ȳ)²]
    let sum_squared_diff_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let sum_squared_diff_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    let denominator = (sum_squared_diff_x * sum_squared_diff_y).sqrt();

    if denominator.abs() < f64::EPSILON {
        return Err(Error::ConstantColumn(
            "分散がゼロの列が含まれています".into(),
        ));
    }

    Ok(numerator / denominator)
}
