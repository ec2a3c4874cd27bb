// データ品質チェックモジュール
//
// 欠損値・重複行・負値・カテゴリ列の水準数を集計する。
// エラー条件はなく、空のTableに対してはすべてゼロの結果を返す。

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::table::Table;

/// カテゴリ列の集計結果
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalSummary {
    /// 非欠損の異なり値の数
    pub distinct: usize,
    /// 値ごとの出現回数（回数の降順、同数は値の昇順）
    pub value_counts: Vec<(String, usize)>,
}

/// データ品質の集計結果
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// 列ごとの欠損値数（列順）
    pub null_counts: Vec<(String, usize)>,
    /// 全列が一致する重複行の数
    pub duplicate_rows: usize,
    /// 数値列ごとの負値の数
    pub negative_counts: Vec<(String, usize)>,
    /// カテゴリ列ごとの集計
    pub categorical: Vec<(String, CategoricalSummary)>,
}

/// Tableの品質を評価する
pub fn assess(
    table: &Table,
    numeric_columns: &[String],
    categorical_columns: &[String],
) -> Result<QualityReport> {
    // 欠損値を列ごとに数える
    let mut null_counts = Vec::with_capacity(table.column_count());
    for name in table.column_names() {
        let column = table
            .column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
        null_counts.push((name.clone(), column.null_count()));
    }

    // 重複行の数 = 行数 - 異なり行数
    let mut seen = HashSet::with_capacity(table.row_count());
    for i in 0..table.row_count() {
        seen.insert(table.row_key(i));
    }
    let duplicate_rows = table.row_count() - seen.len();

    // 数値列の負値を数える
    let mut negative_counts = Vec::with_capacity(numeric_columns.len());
    for name in numeric_columns {
        let negatives = table
            .numeric_entries(name)?
            .iter()
            .filter(|(_, v)| *v < 0.0)
            .count();
        negative_counts.push((name.clone(), negatives));
    }

    // カテゴリ列の水準を集計する
    let mut categorical = Vec::with_capacity(categorical_columns.len());
    for name in categorical_columns {
        let column = table
            .column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for i in 0..table.row_count() {
            if !column.is_na(i) {
                *counts.entry(column.render(i)).or_insert(0) += 1;
            }
        }

        let distinct = counts.len();
        // 回数の降順に並べる。BTreeMapから取り出した時点で値の昇順なので、
        // 安定ソートにより同数の値は昇順のまま残る。
        let mut value_counts: Vec<(String, usize)> = counts.into_iter().collect();
        value_counts.sort_by(|a, b| b.1.cmp(&a.1));

        categorical.push((
            name.clone(),
            CategoricalSummary {
                distinct,
                value_counts,
            },
        ));
    }

    Ok(QualityReport {
        null_counts,
        duplicate_rows,
        negative_counts,
        categorical,
    })
}
