//! Module providing chart rendering functionality
//!
//! Charts are rendered to PNG files with plotters. All styling flows
//! through an explicit [`PlotSettings`] value passed down to the panel
//! primitives in [`charts`]; there is no process-wide styling state.

pub mod charts;

/// プロットの設定
///
/// 色・サイズ・グリッドなどの描画スタイルをまとめた設定オブジェクト。
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// グラフ全体の幅（ピクセル）
    pub width: u32,
    /// グラフ全体の高さ（ピクセル）
    pub height: u32,
    /// グリッドの表示
    pub show_grid: bool,
    /// ヒストグラムのビン数
    pub bins: usize,
    /// 色のパレット
    pub color_palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 1600,
            height: 1200,
            show_grid: true,
            bins: 20,
            color_palette: vec![
                (0, 123, 255),  // 青
                (255, 99, 71),  // 赤
                (46, 204, 113), // 緑
                (255, 193, 7),  // 黄
                (142, 68, 173), // 紫
                (52, 152, 219), // 水色
                (243, 156, 18), // オレンジ
                (211, 84, 0),   // 茶色
            ],
        }
    }
}

impl PlotSettings {
    /// パレットからインデックスに対応する色を取得（循環）
    pub fn color(&self, index: usize) -> (u8, u8, u8) {
        if self.color_palette.is_empty() {
            (0, 123, 255)
        } else {
            self.color_palette[index % self.color_palette.len()]
        }
    }
}
