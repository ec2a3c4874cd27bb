// 順位抽出モジュール
//
// 指定した数値列の上位K行と下位K行を取り出す。下位側はゼロ値を
// 除外でき、ゼロ値・欠損値の件数も合わせて返す。

use serde::Serialize;

use crate::error::Result;
use crate::table::Table;

/// 上位・下位抽出のデフォルト件数
pub const DEFAULT_TOP_K: usize = 5;

/// 順位付けされた1行
#[derive(Debug, Clone, Serialize)]
pub struct RankedRow {
    /// 元のTable内の行番号
    pub row: usize,
    /// 表示ラベル（国名、路線名など）
    pub label: String,
    /// 対象列の値
    pub value: f64,
}

/// 順位抽出の結果
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    /// 対象の数値列
    pub column: String,
    /// 値の降順の上位K行
    pub top: Vec<RankedRow>,
    /// 値の昇順の下位K行（exclude_zero指定時はゼロ値を除外）
    pub bottom: Vec<RankedRow>,
    /// 下位側でゼロ値を除外したかどうか
    pub exclude_zero: bool,
    /// 値がちょうど0の行数
    pub zero_count: usize,
    /// 値が欠損している行数
    pub null_count: usize,
}

/// 指定列の上位・下位K行を抽出する
///
/// 同値の行は元の行順を保つ。絞り込み後にK行に満たない場合は
/// 該当する行をすべて返す（エラーにはしない）。
pub fn extract(
    table: &Table,
    column: &str,
    label_columns: &[String],
    k: usize,
    exclude_zero: bool,
) -> Result<RankReport> {
    let entries = table.numeric_entries(column)?;
    let null_count = table.row_count() - entries.len();
    let zero_count = entries.iter().filter(|(_, v)| *v == 0.0).count();

    // 上位: 値の降順。安定ソートで同値は行順のまま。
    let mut by_desc = entries.clone();
    by_desc.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top = ranked_rows(table, label_columns, by_desc.iter().take(k))?;

    // 下位: 値の昇順。exclude_zero指定時は正の値のみを対象にする。
    let mut by_asc: Vec<(usize, f64)> = if exclude_zero {
        entries.iter().copied().filter(|(_, v)| *v > 0.0).collect()
    } else {
        entries
    };
    by_asc.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    let bottom = ranked_rows(table, label_columns, by_asc.iter().take(k))?;

    Ok(RankReport {
        column: column.to_string(),
        top,
        bottom,
        exclude_zero,
        zero_count,
        null_count,
    })
}

/// （行番号, 値）の列にラベルを付ける
fn ranked_rows<'a, I>(
    table: &Table,
    label_columns: &[String],
    entries: I,
) -> Result<Vec<RankedRow>>
where
    I: Iterator<Item = &'a (usize, f64)>,
{
    let mut rows = Vec::new();
    for &(row, value) in entries {
        rows.push(RankedRow {
            row,
            label: table.label(label_columns, row)?,
            value,
        });
    }
    Ok(rows)
}
