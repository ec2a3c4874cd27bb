// 相関分析モジュール
//
// 数値列の全ペアについてピアソン相関係数を計算し、対称行列と
// 絶対値の大きい順に並べたペアの一覧を返す。

use serde::Serialize;

use crate::error::{Error, Result};
use crate::stats::descriptive;
use crate::table::Table;

/// 相関行列
///
/// 対称で対角成分は常に1.0。
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// 行列の列名を取得
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 係数の2次元配列を取得（columns()と同じ順）
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// 2列間の相関係数を取得
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// 相関係数付きの列ペア
#[derive(Debug, Clone, Serialize)]
pub struct CorrPair {
    /// 1つ目の列
    pub a: String,
    /// 2つ目の列
    pub b: String,
    /// ピアソン相関係数
    pub coefficient: f64,
}

/// 相関分析の結果
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationAnalysis {
    /// 相関行列
    pub matrix: CorrelationMatrix,
    /// 絶対値の降順に並べたペア（同値は元の列順）
    pub pairs: Vec<CorrPair>,
}

/// 指定した数値列間の相関を分析する
///
/// 各ペアの係数は両方の列が非欠損である行のみから計算する。
/// 数値列が2列未満の場合は `InsufficientColumns`、分散がゼロの列が
/// あれば `ConstantColumn` になる。
pub fn analyze(table: &Table, columns: &[String]) -> Result<CorrelationAnalysis> {
    if columns.len() < 2 {
        return Err(Error::InsufficientColumns {
            required: 2,
            found: columns.len(),
        });
    }

    // 定数列を先に検出して列名付きで報告する
    for name in columns {
        let values = table.numeric_values(name)?;
        if values.is_empty() {
            return Err(Error::EmptyColumn(name.clone()));
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        if values.iter().all(|v| (v - mean).abs() < f64::EPSILON) {
            return Err(Error::ConstantColumn(name.clone()));
        }
    }

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);

    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let (x, y) = paired_values(table, &columns[i], &columns[j])?;
            let coefficient = descriptive::correlation_impl(&x, &y)?;
            values[i][j] = coefficient;
            values[j][i] = coefficient;
            pairs.push(CorrPair {
                a: columns[i].clone(),
                b: columns[j].clone(),
                coefficient,
            });
        }
    }

    // 絶対値の降順。安定ソートなので同値のペアは生成順（元の列順）のまま。
    pairs.sort_by(|p, q| {
        q.coefficient
            .abs()
            .partial_cmp(&p.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(CorrelationAnalysis {
        matrix: CorrelationMatrix {
            columns: columns.to_vec(),
            values,
        },
        pairs,
    })
}

/// 2列の両方が非欠損である行の値の組を取り出す
pub(crate) fn paired_values(table: &Table, a: &str, b: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let col_a = table
        .column(a)
        .ok_or_else(|| Error::ColumnNotFound(a.to_string()))?;
    let col_b = table
        .column(b)
        .ok_or_else(|| Error::ColumnNotFound(b.to_string()))?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..table.row_count() {
        if let (Some(va), Some(vb)) = (col_a.as_f64(i), col_b.as_f64(i)) {
            x.push(va);
            y.push(vb);
        }
    }
    Ok((x, y))
}
