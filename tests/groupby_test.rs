use edars::groupby::GroupBy;
use edars::na::NA;
use edars::series::Series;
use edars::table::{Column, Table};

fn table_with_groups(keys: &[&str], values: &[i64]) -> Table {
    let mut table = Table::new();
    table
        .add_column(
            "group".to_string(),
            Column::Str(Series::new(
                keys.iter().map(|k| NA::Value(k.to_string())).collect(),
                None,
            )),
        )
        .unwrap();
    table
        .add_column(
            "x".to_string(),
            Column::Int(Series::new(
                values.iter().map(|&v| NA::Value(v)).collect(),
                None,
            )),
        )
        .unwrap();
    table
}

#[test]
fn test_groupby_sizes_partition_rows() {
    // グループサイズの合計は常に行数と一致する
    let table = table_with_groups(&["a", "b", "a", "c", "b"], &[1, 2, 3, 4, 5]);
    let group_by = GroupBy::new(&table, "group").unwrap();

    assert_eq!(group_by.group_count(), 3);
    let total: usize = group_by.size().values().sum();
    assert_eq!(total, table.row_count());
}

#[test]
fn test_groupby_mean_and_max_mean_group() {
    // X=[1,1,5,5] を G=[a,a,b,b] でグループ化すると平均は1と5
    let table = table_with_groups(&["a", "a", "b", "b"], &[1, 1, 5, 5]);
    let summary = GroupBy::new(&table, "group")
        .unwrap()
        .aggregate(&["x".to_string()])
        .unwrap();

    let a_stats = &summary.stats["a"]["x"];
    let b_stats = &summary.stats["b"]["x"];
    assert!((a_stats.mean - 1.0).abs() < 1e-10);
    assert!((b_stats.mean - 5.0).abs() < 1e-10);

    // 平均最大のグループは "b"
    assert_eq!(summary.max_mean.len(), 1);
    assert_eq!(summary.max_mean[0].1, "b");
    assert!((summary.max_mean[0].2 - 5.0).abs() < 1e-10);
}

#[test]
fn test_groupby_max_mean_tie_prefers_sort_order() {
    // 平均が同じ場合はキーの自然順で先のグループが選ばれる
    let table = table_with_groups(&["b", "a"], &[3, 3]);
    let summary = GroupBy::new(&table, "group")
        .unwrap()
        .aggregate(&["x".to_string()])
        .unwrap();

    assert_eq!(summary.max_mean[0].1, "a");
}

#[test]
fn test_groupby_aggregate_statistics() {
    let table = table_with_groups(&["a", "a", "a"], &[2, 4, 6]);
    let summary = GroupBy::new(&table, "group")
        .unwrap()
        .aggregate(&["x".to_string()])
        .unwrap();

    let stats = &summary.stats["a"]["x"];
    assert_eq!(stats.count, 3);
    assert!((stats.mean - 4.0).abs() < 1e-10);
    assert!((stats.median - 4.0).abs() < 1e-10);
    assert!((stats.min - 2.0).abs() < 1e-10);
    assert!((stats.max - 6.0).abs() < 1e-10);
    assert!((stats.std - 2.0).abs() < 1e-10);
}

#[test]
fn test_groupby_missing_key_forms_na_group() {
    // キーが欠損の行は "NA" グループに入り、行数の合計は変わらない
    let mut table = Table::new();
    table
        .add_column(
            "group".to_string(),
            Column::Str(Series::new(
                vec![NA::Value("a".to_string()), NA::NA, NA::Value("a".to_string())],
                None,
            )),
        )
        .unwrap();
    table
        .add_column(
            "x".to_string(),
            Column::Int(Series::new(
                vec![NA::Value(1), NA::Value(2), NA::Value(3)],
                None,
            )),
        )
        .unwrap();

    let group_by = GroupBy::new(&table, "group").unwrap();
    let sizes = group_by.size();
    assert_eq!(sizes.get("NA"), Some(&1));
    let total: usize = sizes.values().sum();
    assert_eq!(total, 3);
}

#[test]
fn test_groupby_skips_groups_without_values() {
    // 数値が欠損しているグループは集計から除外され、最大平均にも出ない
    let mut table = Table::new();
    table
        .add_column(
            "group".to_string(),
            Column::Str(Series::new(
                vec![NA::Value("a".to_string()), NA::Value("b".to_string())],
                None,
            )),
        )
        .unwrap();
    table
        .add_column(
            "x".to_string(),
            Column::Int(Series::new(vec![NA::Value(1), NA::NA], None)),
        )
        .unwrap();

    let summary = GroupBy::new(&table, "group")
        .unwrap()
        .aggregate(&["x".to_string()])
        .unwrap();

    assert!(summary.stats["b"].get("x").is_none());
    assert_eq!(summary.max_mean[0].1, "a");
}

#[test]
fn test_groupby_unknown_key_column() {
    let table = table_with_groups(&["a"], &[1]);
    assert!(GroupBy::new(&table, "missing").is_err());
}
