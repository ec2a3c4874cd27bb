use edars::corr;
use edars::na::NA;
use edars::series::Series;
use edars::table::{Column, Table};
use edars::Error;

fn numeric_table(columns: &[(&str, Vec<f64>)]) -> Table {
    let mut table = Table::new();
    for (name, values) in columns {
        table
            .add_column(
                name.to_string(),
                Column::Float(Series::new(
                    values.iter().map(|&v| NA::Value(v)).collect(),
                    None,
                )),
            )
            .unwrap();
    }
    table
}

#[test]
fn test_correlation_matrix_properties() {
    let table = numeric_table(&[
        ("a", vec![1.0, 2.0, 3.0, 4.0]),
        ("b", vec![4.0, 3.0, 2.0, 1.0]),
        ("c", vec![1.0, 3.0, 2.0, 5.0]),
    ]);
    let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let analysis = corr::analyze(&table, &columns).unwrap();
    let matrix = &analysis.matrix;

    // 対角成分は1.0
    for name in &columns {
        assert!((matrix.get(name, name).unwrap() - 1.0).abs() < 1e-12);
    }

    // 対称性
    for x in &columns {
        for y in &columns {
            let xy = matrix.get(x, y).unwrap();
            let yx = matrix.get(y, x).unwrap();
            assert!((xy - yx).abs() < 1e-12);
        }
    }

    // 完全な負の相関
    assert!((matrix.get("a", "b").unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn test_correlation_pairs_sorted_by_strength() {
    let table = numeric_table(&[
        ("a", vec![1.0, 2.0, 3.0, 4.0]),
        ("b", vec![4.0, 3.0, 2.0, 1.0]),
        ("c", vec![1.0, 3.0, 2.0, 5.0]),
    ]);
    let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let analysis = corr::analyze(&table, &columns).unwrap();

    // 絶対値の降順に並ぶ
    let strengths: Vec<f64> = analysis
        .pairs
        .iter()
        .map(|p| p.coefficient.abs())
        .collect();
    for window in strengths.windows(2) {
        assert!(window[0] >= window[1]);
    }

    // 全ペア数は n(n-1)/2
    assert_eq!(analysis.pairs.len(), 3);

    // 最強ペアは a-b（|r| = 1）
    assert_eq!(analysis.pairs[0].a, "a");
    assert_eq!(analysis.pairs[0].b, "b");
}

#[test]
fn test_correlation_requires_two_columns() {
    let table = numeric_table(&[("a", vec![1.0, 2.0])]);
    let result = corr::analyze(&table, &["a".to_string()]);
    assert!(matches!(
        result,
        Err(Error::InsufficientColumns {
            required: 2,
            found: 1
        })
    ));
}

#[test]
fn test_correlation_rejects_constant_column() {
    let table = numeric_table(&[("a", vec![1.0, 2.0, 3.0]), ("b", vec![5.0, 5.0, 5.0])]);
    let result = corr::analyze(&table, &["a".to_string(), "b".to_string()]);
    assert!(matches!(result, Err(Error::ConstantColumn(name)) if name == "b"));
}

#[test]
fn test_correlation_pairwise_missing_values() {
    // 欠損のある行はそのペアの計算からだけ除外される
    let mut table = Table::new();
    table
        .add_column(
            "a".to_string(),
            Column::Float(Series::new(
                vec![NA::Value(1.0), NA::Value(2.0), NA::Value(3.0), NA::NA],
                None,
            )),
        )
        .unwrap();
    table
        .add_column(
            "b".to_string(),
            Column::Float(Series::new(
                vec![NA::Value(3.0), NA::Value(2.0), NA::Value(1.0), NA::Value(9.0)],
                None,
            )),
        )
        .unwrap();

    let analysis = corr::analyze(&table, &["a".to_string(), "b".to_string()]).unwrap();
    assert!((analysis.matrix.get("a", "b").unwrap() + 1.0).abs() < 1e-12);
}
