use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::stats;
use crate::table::Table;

/// グループ化した結果を表す構造体
///
/// キー列の値ごとに行番号をまとめる。キーが欠損の行は "NA" グループに
/// 入るため、グループサイズの合計は常にTableの行数と一致する。
/// BTreeMapを使うため、グループはキーの自然順で列挙される。
#[derive(Debug)]
pub struct GroupBy<'a> {
    /// 元のTable
    source: &'a Table,

    /// グループ化に使用した列名
    by: String,

    /// グループ化された行番号
    groups: BTreeMap<String, Vec<usize>>,
}

/// 1グループ・1数値列の集計統計量
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    /// 非欠損データの件数
    pub count: usize,
    /// 平均値
    pub mean: f64,
    /// 中央値
    pub median: f64,
    /// 標準偏差（不偏推定量）
    pub std: f64,
    /// 最小値
    pub min: f64,
    /// 最大値
    pub max: f64,
}

/// グループ集計の結果
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// グループ化に使用した列名
    pub key: String,
    /// グループごとの行数
    pub sizes: BTreeMap<String, usize>,
    /// グループ → 数値列 → 集計統計量
    pub stats: BTreeMap<String, BTreeMap<String, GroupStats>>,
    /// 数値列ごとの平均値が最大のグループ（列, グループ, 平均値）
    pub max_mean: Vec<(String, String, f64)>,
}

impl<'a> GroupBy<'a> {
    /// 新しいグループを作成
    pub fn new(source: &'a Table, by: &str) -> Result<Self> {
        let column = source
            .column(by)
            .ok_or_else(|| Error::ColumnNotFound(by.to_string()))?;

        // グループを作成
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for i in 0..source.row_count() {
            groups.entry(column.render(i)).or_default().push(i);
        }

        Ok(GroupBy {
            source,
            by: by.to_string(),
            groups,
        })
    }

    /// グループ数を取得
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// 各グループのサイズを返す
    pub fn size(&self) -> BTreeMap<String, usize> {
        self.groups
            .iter()
            .map(|(k, indices)| (k.clone(), indices.len()))
            .collect()
    }

    /// 指定グループ・指定数値列の非欠損値を取得
    fn group_values(&self, indices: &[usize], column: &str) -> Result<Vec<f64>> {
        let col = self
            .source
            .column(column)
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;
        Ok(indices.iter().filter_map(|&i| col.as_f64(i)).collect())
    }

    /// 各グループ・各数値列の集計統計量を計算する
    ///
    /// 数値列に非欠損値を持たないグループはその列の集計から除外され、
    /// 平均値最大グループの決定にも参加しない。
    pub fn aggregate(&self, numeric_columns: &[String]) -> Result<GroupSummary> {
        let mut stats_map: BTreeMap<String, BTreeMap<String, GroupStats>> = BTreeMap::new();

        for (group, indices) in &self.groups {
            let mut column_stats = BTreeMap::new();
            for column in numeric_columns {
                let values = self.group_values(indices, column)?;
                if values.is_empty() {
                    continue;
                }
                let rec = stats::describe(&values)?;
                column_stats.insert(
                    column.clone(),
                    GroupStats {
                        count: rec.count,
                        mean: rec.mean,
                        median: rec.median,
                        std: rec.std,
                        min: rec.min,
                        max: rec.max,
                    },
                );
            }
            stats_map.insert(group.clone(), column_stats);
        }

        // 列ごとに平均値が最大のグループを決定する。
        // BTreeMapの自然順で走査し、厳密に大きい場合のみ更新するため、
        // 同値の場合はキー順で先のグループが選ばれる。
        let mut max_mean = Vec::with_capacity(numeric_columns.len());
        for column in numeric_columns {
            let mut best: Option<(&String, f64)> = None;
            for (group, column_stats) in &stats_map {
                if let Some(gs) = column_stats.get(column) {
                    match best {
                        Some((_, mean)) if gs.mean <= mean => {}
                        _ => best = Some((group, gs.mean)),
                    }
                }
            }
            if let Some((group, mean)) = best {
                max_mean.push((column.clone(), group.clone(), mean));
            }
        }

        Ok(GroupSummary {
            key: self.by.clone(),
            sizes: self.size(),
            stats: stats_map,
            max_mean,
        })
    }
}
