use std::fs;

use edars::io::{read_table, write_csv};
use edars::table::DType;
use edars::Error;

// CSVファイル操作のテスト (一時ディレクトリを利用)
#[test]
fn test_read_csv_with_type_inference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "name,count,ratio\nalpha,10,0.5\nbeta,20,1.5\ngamma,30,2.5\n",
    )
    .unwrap();

    let table = read_table(&path).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 3);

    // 列ごとに型が推測される
    assert_eq!(table.dtype("name").unwrap(), DType::Str);
    assert_eq!(table.dtype("count").unwrap(), DType::Int);
    assert_eq!(table.dtype("ratio").unwrap(), DType::Float);

    assert_eq!(table.numeric_values("count").unwrap(), vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_read_csv_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "a,b\n1,x\n,y\n3,\n").unwrap();

    let table = read_table(&path).unwrap();

    // 空セルは欠損値として数えられ、数値の取り出しから外れる
    assert_eq!(table.column("a").unwrap().null_count(), 1);
    assert_eq!(table.column("b").unwrap().null_count(), 1);
    assert_eq!(table.numeric_values("a").unwrap(), vec![1.0, 3.0]);
}

#[test]
fn test_read_csv_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_file.csv");

    let result = read_table(&path);
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_read_csv_inconsistent_columns() {
    // 列数の揃っていない行は形式エラーになる
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "a,b\n1,2\n3,4,5\n").unwrap();

    let result = read_table(&path);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[test]
fn test_read_csv_duplicate_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.csv");
    fs::write(&path, "a,a\n1,2\n").unwrap();

    let result = read_table(&path);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "city,pop\nTokyo,100\nOsaka,\n").unwrap();

    let table = read_table(&path).unwrap();

    // 書き出して読み直しても内容が保たれる
    let out_path = dir.path().join("out.csv");
    write_csv(&table, &out_path).unwrap();

    let reread = read_table(&out_path).unwrap();
    assert_eq!(reread.row_count(), 2);
    assert_eq!(reread.column_names(), table.column_names());
    assert_eq!(reread.column("pop").unwrap().null_count(), 1);
    assert_eq!(reread.render_cell("city", 0).unwrap(), "Tokyo");
}
