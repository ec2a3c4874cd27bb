use edars::na::NA;
use edars::quality;
use edars::series::Series;
use edars::table::{Column, Table};

fn sample_table() -> Table {
    let mut table = Table::new();
    table
        .add_column(
            "city".to_string(),
            Column::Str(Series::new(
                vec![
                    NA::Value("a".to_string()),
                    NA::Value("b".to_string()),
                    NA::Value("a".to_string()),
                    NA::Value("a".to_string()),
                ],
                None,
            )),
        )
        .unwrap();
    table
        .add_column(
            "value".to_string(),
            Column::Int(Series::new(
                vec![NA::Value(1), NA::Value(-2), NA::Value(1), NA::Value(1)],
                None,
            )),
        )
        .unwrap();
    table
}

#[test]
fn test_quality_no_missing_values() {
    // 欠損のないTableでは欠損数の合計は0
    let table = sample_table();
    let report = quality::assess(&table, &["value".to_string()], &["city".to_string()]).unwrap();

    let total_nulls: usize = report.null_counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total_nulls, 0);
}

#[test]
fn test_quality_duplicate_rows() {
    // 重複行数 = 行数 - 異なり行数（行1と行3が同一）
    let table = sample_table();
    let report = quality::assess(&table, &[], &[]).unwrap();
    assert_eq!(report.duplicate_rows, 1);
}

#[test]
fn test_quality_negative_counts() {
    let table = sample_table();
    let report = quality::assess(&table, &["value".to_string()], &[]).unwrap();
    assert_eq!(report.negative_counts, vec![("value".to_string(), 1)]);
}

#[test]
fn test_quality_categorical_counts() {
    let table = sample_table();
    let report = quality::assess(&table, &[], &["city".to_string()]).unwrap();

    let (name, summary) = &report.categorical[0];
    assert_eq!(name, "city");
    assert_eq!(summary.distinct, 2);
    // 出現回数の降順
    assert_eq!(summary.value_counts[0], ("a".to_string(), 3));
    assert_eq!(summary.value_counts[1], ("b".to_string(), 1));
}

#[test]
fn test_quality_counts_missing_cells() {
    let mut table = Table::new();
    table
        .add_column(
            "x".to_string(),
            Column::Float(Series::new(vec![NA::Value(1.0), NA::NA, NA::NA], None)),
        )
        .unwrap();

    let report = quality::assess(&table, &[], &[]).unwrap();
    assert_eq!(report.null_counts, vec![("x".to_string(), 2)]);
}

#[test]
fn test_quality_empty_table() {
    // 空のTableではすべての集計がゼロ
    let table = Table::new();
    let report = quality::assess(&table, &[], &[]).unwrap();

    assert!(report.null_counts.is_empty());
    assert_eq!(report.duplicate_rows, 0);
    assert!(report.negative_counts.is_empty());
    assert!(report.categorical.is_empty());
}
