use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力データの形式が不正です: {0}")]
    MalformedInput(String),

    #[error("列に数値データがありません: {0}")]
    EmptyColumn(String),

    #[error("数値列が不足しています: 最低 {required} 列必要ですが {found} 列しかありません")]
    InsufficientColumns { required: usize, found: usize },

    #[error("列の分散がゼロのため相関を計算できません: {0}")]
    ConstantColumn(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列の型が一致しません: 列 {name}, 期待値 {expected:?}, 実際 {found:?}")]
    ColumnTypeMismatch {
        name: String,
        expected: crate::table::DType,
        found: crate::table::DType,
    },

    #[error("データ一貫性エラー: {0}")]
    Consistency(String),

    #[error("次元不一致エラー: {0}")]
    DimensionMismatch(String),

    #[error("空データエラー: {0}")]
    Empty(String),

    #[error("可視化エラー: {0}")]
    Visualization(String),

    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

// Plottersエラーの変換
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("プロット描画エラー: {}", err))
    }
}
