//! # 写出前的增强管线
//!
//! 一组固定顺序的纯 `Vec<Line> -> Vec<Line>` 处理步骤，
//! 逐项补偿各客户端渲染器的缺陷。顺序不可调换：
//! 透明度合法化先于多重阴影展开，阴影展开与暗色副本
//! 先于重叠行处理（后者要看到最终的行集合）。

mod darktext;
mod overlap;
mod shadows;
mod visual;

use subtitle_core::Line;

/// 对行列表施加全部渲染规避处理。整体满足幂等性：
/// 处理过的结果再处理一遍不会变化。
pub(crate) fn apply_enhancements(
    lines: Vec<Line>,
    video_width: i32,
    video_height: i32,
) -> Vec<Line> {
    let lines = visual::add_italic_prefetch(lines);
    let lines = visual::normalize_invisible_text(lines);
    let lines = visual::relocate_italic_boundary_spaces(lines);
    let lines = visual::prevent_background_box_clipping(lines);
    let lines = visual::harden_space_runs(lines);
    let lines = visual::legalize_color_alphas(lines);
    let lines = shadows::expand_multi_shadow_lines(lines);
    let lines = darktext::duplicate_dark_text_lines(lines);
    overlap::mitigate_position_flicker(lines, video_width, video_height)
}
