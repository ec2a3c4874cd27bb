use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::Series;

/// 列のデータ型
///
/// 読み込み時に一度だけ決定され、以後変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DType {
    /// 整数
    Int,
    /// 浮動小数点数
    Float,
    /// 文字列
    Str,
}

impl DType {
    /// 数値型かどうか
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int | DType::Float)
    }
}

/// 型付きの列データ
#[derive(Debug, Clone)]
pub enum Column {
    /// 整数列
    Int(Series<NA<i64>>),
    /// 浮動小数点数列
    Float(Series<NA<f64>>),
    /// 文字列列
    Str(Series<NA<String>>),
}

impl Column {
    /// 列の長さを取得
    pub fn len(&self) -> usize {
        match self {
            Column::Int(s) => s.len(),
            Column::Float(s) => s.len(),
            Column::Str(s) => s.len(),
        }
    }

    /// 列が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 列のデータ型を取得
    pub fn dtype(&self) -> DType {
        match self {
            Column::Int(_) => DType::Int,
            Column::Float(_) => DType::Float,
            Column::Str(_) => DType::Str,
        }
    }

    /// 指定位置が欠損値かどうか
    pub fn is_na(&self, pos: usize) -> bool {
        match self {
            Column::Int(s) => s.get(pos).map_or(true, |v| v.is_na()),
            Column::Float(s) => s.get(pos).map_or(true, |v| v.is_na()),
            Column::Str(s) => s.get(pos).map_or(true, |v| v.is_na()),
        }
    }

    /// 欠損値の個数を数える
    pub fn null_count(&self) -> usize {
        match self {
            Column::Int(s) => s.values().iter().filter(|v| v.is_na()).count(),
            Column::Float(s) => s.values().iter().filter(|v| v.is_na()).count(),
            Column::Str(s) => s.values().iter().filter(|v| v.is_na()).count(),
        }
    }

    /// 指定位置の値をf64として取得（文字列列や欠損値はNone）
    pub fn as_f64(&self, pos: usize) -> Option<f64> {
        match self {
            Column::Int(s) => s.get(pos).and_then(|v| v.value().map(|&x| x as f64)),
            Column::Float(s) => s.get(pos).and_then(|v| v.value().copied()),
            Column::Str(_) => None,
        }
    }

    /// 指定位置の値を表示用文字列にする（欠損値は "NA"）
    pub fn render(&self, pos: usize) -> String {
        match self {
            Column::Int(s) => s.get(pos).map_or_else(|| "NA".to_string(), |v| v.to_string()),
            Column::Float(s) => s.get(pos).map_or_else(|| "NA".to_string(), |v| v.to_string()),
            Column::Str(s) => s.get(pos).map_or_else(|| "NA".to_string(), |v| v.to_string()),
        }
    }

    /// 指定位置の値をCSVセル用文字列にする（欠損値は空文字列）
    pub fn csv_cell(&self, pos: usize) -> String {
        match self {
            Column::Int(s) => s
                .get(pos)
                .and_then(|v| v.value().map(|x| x.to_string()))
                .unwrap_or_default(),
            Column::Float(s) => s
                .get(pos)
                .and_then(|v| v.value().map(|x| x.to_string()))
                .unwrap_or_default(),
            Column::Str(s) => s
                .get(pos)
                .and_then(|v| v.value().cloned())
                .unwrap_or_default(),
        }
    }
}

/// Table構造体: 名前付き・型付きの列の集合
///
/// 列の集合と行数は読み込み後に固定される。解析の各ステージは
/// &Tableを受け取り、新しい結果を返すのみでTable自体を変更しない。
#[derive(Debug, Clone)]
pub struct Table {
    /// 列の順序を保持
    columns: Vec<String>,

    /// 列名から列データへのマッピング
    data: HashMap<String, Column>,

    /// 行数
    row_count: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// 空のTableを作成
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
            data: HashMap::new(),
            row_count: 0,
        }
    }

    /// 列を追加する
    ///
    /// 最初の列が行数を決める。2列目以降は行数の一致を検査する。
    pub fn add_column(&mut self, name: String, column: Column) -> Result<()> {
        if self.data.contains_key(&name) {
            return Err(Error::MalformedInput(format!(
                "列名が重複しています: {}",
                name
            )));
        }

        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::Consistency(format!(
                "列 '{}' の長さ ({}) が行数 ({}) と一致しません",
                name,
                column.len(),
                self.row_count
            )));
        }

        self.columns.push(name.clone());
        self.data.insert(name, column);
        Ok(())
    }

    /// 列名の一覧を取得（追加順）
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 列を取得
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.get(name)
    }

    /// 列のデータ型を取得
    pub fn dtype(&self, name: &str) -> Result<DType> {
        self.data
            .get(name)
            .map(|c| c.dtype())
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// 数値列を取得（存在しない・数値型でない場合はエラー）
    fn numeric_column(&self, name: &str) -> Result<&Column> {
        let column = self
            .data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;

        if !column.dtype().is_numeric() {
            return Err(Error::ColumnTypeMismatch {
                name: name.to_string(),
                expected: DType::Float,
                found: column.dtype(),
            });
        }

        Ok(column)
    }

    /// 数値列の非欠損値をf64の配列として取得
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.numeric_column(name)?;
        Ok((0..self.row_count)
            .filter_map(|i| column.as_f64(i))
            .collect())
    }

    /// 数値列の非欠損値を（行番号, 値）の組で取得
    pub fn numeric_entries(&self, name: &str) -> Result<Vec<(usize, f64)>> {
        let column = self.numeric_column(name)?;
        Ok((0..self.row_count)
            .filter_map(|i| column.as_f64(i).map(|v| (i, v)))
            .collect())
    }

    /// 指定セルの表示用文字列を取得
    pub fn render_cell(&self, name: &str, row: usize) -> Result<String> {
        let column = self
            .data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        Ok(column.render(row))
    }

    /// 行全体をキー文字列にする（重複行検出用）
    ///
    /// 全列の値を列順に連結する。区切りに制御文字を使い、値の連結による
    /// 偶然の一致を避ける。
    pub fn row_key(&self, row: usize) -> String {
        let mut key = String::new();
        for (i, name) in self.columns.iter().enumerate() {
            if i > 0 {
                key.push('\u{1f}');
            }
            if let Some(column) = self.data.get(name) {
                key.push_str(&column.render(row));
            }
        }
        key
    }

    /// 行の表示ラベルを作成する
    ///
    /// ラベル列が複数ある場合は " → " で連結する（出発地 → 到着地など）。
    pub fn label(&self, label_columns: &[String], row: usize) -> Result<String> {
        let mut parts = Vec::with_capacity(label_columns.len());
        for name in label_columns {
            parts.push(self.render_cell(name, row)?);
        }
        Ok(parts.join(" → "))
    }
}
