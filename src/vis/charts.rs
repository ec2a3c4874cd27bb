//! Plottersを使用したパネル描画の実装
//!
//! このモジュールは1枚のグラフ画像を構成する個々のパネル
//! （ヒストグラム、棒グラフ、散布図、相関ヒートマップ）を描画します。
//! 複数パネルの組版（DrawingAreaの分割）と出力ファイルへの反映は
//! 呼び出し側が行います。

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::corr::CorrelationMatrix;
use crate::error::{Error, Result};
use crate::vis::PlotSettings;

/// ヒストグラムを描画する
pub fn draw_histogram<DB>(
    area: &DrawingArea<DB, Shift>,
    values: &[f64],
    title: &str,
    x_label: &str,
    settings: &PlotSettings,
    color_index: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if values.is_empty() {
        return Err(Error::Empty("プロットするデータがありません".to_string()));
    }

    let mut min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // 全データが同じ値の場合は範囲を広げてビンを成立させる
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let bins = settings.bins.max(1);
    let bin_width = (max - min) / bins as f64;

    // 各ビンの度数を数える（最大値は最後のビンに入れる）
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / bin_width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(min..max, 0.0..(max_count * 1.05).max(1.0))?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|v| format!("{:.1}", v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_desc(x_label)
            .y_desc("Frequency")
            .draw()?;
    }

    let rgb = settings.color(color_index);
    let color = RGBColor(rgb.0, rgb.1, rgb.2);

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let left = min + i as f64 * bin_width;
        let right = left + bin_width;
        Rectangle::new([(left, 0.0), (right, count as f64)], color.mix(0.7).filled())
    }))?;

    Ok(())
}

/// ラベル付き棒グラフを描画する
pub fn draw_bars<DB>(
    area: &DrawingArea<DB, Shift>,
    labels: &[String],
    heights: &[f64],
    title: &str,
    y_label: &str,
    settings: &PlotSettings,
    color_index: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if labels.len() != heights.len() {
        return Err(Error::DimensionMismatch(
            "ラベルと高さの数が一致しません".to_string(),
        ));
    }
    if labels.is_empty() {
        return Err(Error::Empty("プロットするデータがありません".to_string()));
    }

    let n = labels.len();
    let max_height = heights.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_height = heights.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_top = (max_height * 1.1).max(1.0);
    let y_bottom = min_height.min(0.0);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_bottom..y_top)?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .y_labels(8)
            .x_label_formatter(&|v| {
                let i = v.round();
                if (v - i).abs() < 0.25 && i >= 0.0 && (i as usize) < n {
                    // 都市名などの長いラベルは軸上で切り詰める
                    labels[i as usize].chars().take(12).collect()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|v| format!("{:.1}", v))
            .y_desc(y_label)
            .draw()?;
    }

    let rgb = settings.color(color_index);
    let color = RGBColor(rgb.0, rgb.1, rgb.2);

    chart.draw_series(heights.iter().enumerate().map(|(i, &h)| {
        Rectangle::new(
            [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, h)],
            color.filled(),
        )
    }))?;

    Ok(())
}

/// 散布図を描画する
pub fn draw_scatter<DB>(
    area: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    title: &str,
    x_label: &str,
    y_label: &str,
    settings: &PlotSettings,
    color_index: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(
            "XとYの長さが一致しません".to_string(),
        ));
    }
    if x.is_empty() {
        return Err(Error::Empty("プロットするデータがありません".to_string()));
    }

    // データの最小値と最大値を計算
    let x_min = x.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_min = y.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_max = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // マージン計算（定数データでも範囲が潰れないようにする）
    let x_margin = ((x_max - x_min) * 0.05).max(0.5);
    let y_margin = ((y_max - y_min) * 0.05).max(0.5);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (x_min - x_margin)..(x_max + x_margin),
            (y_min - y_margin)..(y_max + y_margin),
        )?;

    if settings.show_grid {
        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|v| format!("{:.1}", v))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()?;
    }

    let rgb = settings.color(color_index);
    let color = RGBColor(rgb.0, rgb.1, rgb.2);

    chart.draw_series(
        x.iter()
            .zip(y.iter())
            .map(|(&px, &py)| Circle::new((px, py), 3, color.mix(0.6).filled())),
    )?;

    Ok(())
}

/// 相関行列のヒートマップを描画する
///
/// 正の相関を赤、負の相関を青の濃淡で塗り、各セルに係数を表示する。
pub fn draw_heatmap<DB>(
    area: &DrawingArea<DB, Shift>,
    matrix: &CorrelationMatrix,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let columns = matrix.columns();
    let values = matrix.values();
    let n = columns.len();
    if n == 0 {
        return Err(Error::Empty("プロットするデータがありません".to_string()));
    }

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| axis_label(columns, *v))
        .y_label_formatter(&|v| axis_label_reversed(columns, *v))
        .draw()?;

    // セルの矩形（行0が最上段になるようy軸を反転して配置する）
    chart.draw_series((0..n).flat_map(move |i| {
        (0..n).map(move |j| {
            Rectangle::new(
                [
                    (j as f64, (n - 1 - i) as f64),
                    (j as f64 + 1.0, (n - i) as f64),
                ],
                diverging_color(values[i][j]).filled(),
            )
        })
    }))?;

    // セル中央に係数を表示する
    chart.draw_series((0..n).flat_map(move |i| {
        (0..n).map(move |j| {
            Text::new(
                format!("{:.2}", values[i][j]),
                (j as f64 + 0.3, (n - 1 - i) as f64 + 0.55),
                ("sans-serif", 14).into_font(),
            )
        })
    }))?;

    Ok(())
}

/// 軸ラベル位置に対応する列名を返す
fn axis_label(columns: &[String], v: f64) -> String {
    let i = v.floor();
    if i >= 0.0 && (i as usize) < columns.len() {
        columns[i as usize].clone()
    } else {
        String::new()
    }
}

/// y軸用: 反転配置に合わせた列名を返す
fn axis_label_reversed(columns: &[String], v: f64) -> String {
    let n = columns.len();
    let i = v.floor();
    if i >= 0.0 && (i as usize) < n {
        columns[n - 1 - i as usize].clone()
    } else {
        String::new()
    }
}

/// 相関係数を発散配色（青 - 白 - 赤）に変換する
fn diverging_color(c: f64) -> RGBColor {
    let t = c.clamp(-1.0, 1.0);
    let blend = |from: u8, to: u8, w: f64| -> u8 {
        (from as f64 + (to as f64 - from as f64) * w).round() as u8
    };
    if t >= 0.0 {
        // 白 → 赤
        RGBColor(255, blend(255, 99, t), blend(255, 71, t))
    } else {
        // 白 → 青
        RGBColor(blend(255, 0, -t), blend(255, 123, -t), 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_color_endpoints() {
        // 無相関は白、完全相関は端点色
        assert_eq!(diverging_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), RGBColor(255, 99, 71));
        assert_eq!(diverging_color(-1.0), RGBColor(0, 123, 255));
    }
}
