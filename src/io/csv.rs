use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::Series;
use crate::table::{Column, Table};

/// CSVファイルからTableを読み込む
///
/// 先頭行をヘッダーとして解釈し、列ごとにデータ型を推測する。
/// すべての非空セルが整数として解釈できれば整数列、すべて数値として
/// 解釈できれば浮動小数点数列、それ以外は文字列列になる。空セルは欠損値。
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();

    // 存在しないパスは独立したエラーとして報告する
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(Error::Io)?;

    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    // ヘッダー行を取得
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::MalformedInput(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // ヘッダーの重複を検査
    for (i, header) in headers.iter().enumerate() {
        if headers[..i].contains(header) {
            return Err(Error::MalformedInput(format!(
                "列名が重複しています: {}",
                header
            )));
        }
    }

    // データを列ごとに収集（空セルはNone）
    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        // 列数が揃っていない行はここでエラーになる
        let record = result.map_err(|e| Error::MalformedInput(e.to_string()))?;
        for (i, _) in headers.iter().enumerate() {
            let cell = record.get(i).unwrap_or("");
            if cell.is_empty() {
                raw_columns[i].push(None);
            } else {
                raw_columns[i].push(Some(cell.to_string()));
            }
        }
    }

    // 列をTableに追加
    let mut table = Table::new();
    for (header, raw) in headers.into_iter().zip(raw_columns) {
        let column = infer_column(&header, raw);
        table.add_column(header, column)?;
    }

    log::info!(
        "CSVファイルを読み込みました: {} ({}行, {}列)",
        path.display(),
        table.row_count(),
        table.column_count()
    );

    Ok(table)
}

/// 生の文字列セルから型付きの列を構築する
fn infer_column(name: &str, raw: Vec<Option<String>>) -> Column {
    // 整数として解釈できるか
    if raw
        .iter()
        .flatten()
        .all(|cell| cell.parse::<i64>().is_ok())
        && raw.iter().any(|cell| cell.is_some())
    {
        let values: Vec<NA<i64>> = raw
            .iter()
            .map(|cell| match cell {
                Some(c) => NA::Value(c.parse::<i64>().unwrap()),
                None => NA::NA,
            })
            .collect();
        return Column::Int(Series::new(values, Some(name.to_string())));
    }

    // 浮動小数点数として解釈できるか
    if raw
        .iter()
        .flatten()
        .all(|cell| cell.parse::<f64>().is_ok())
        && raw.iter().any(|cell| cell.is_some())
    {
        let values: Vec<NA<f64>> = raw
            .iter()
            .map(|cell| match cell {
                Some(c) => NA::Value(c.parse::<f64>().unwrap()),
                None => NA::NA,
            })
            .collect();
        return Column::Float(Series::new(values, Some(name.to_string())));
    }

    // それ以外は文字列列
    let values: Vec<NA<String>> = raw
        .into_iter()
        .map(|cell| match cell {
            Some(c) => NA::Value(c),
            None => NA::NA,
        })
        .collect();
    Column::Str(Series::new(values, Some(name.to_string())))
}

/// TableをCSVファイルに書き込む
///
/// 欠損値は空セルとして出力する。
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut wtr = Writer::from_writer(file);

    // ヘッダー行を書き込む
    wtr.write_record(table.column_names()).map_err(Error::Csv)?;

    // 各行のデータを書き込む
    for i in 0..table.row_count() {
        let mut row = Vec::with_capacity(table.column_count());
        for name in table.column_names() {
            if let Some(column) = table.column(name) {
                row.push(column.csv_cell(i));
            }
        }
        wtr.write_record(&row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}
