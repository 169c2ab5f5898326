//! # 视觉类渲染规避
//!
//! 针对各客户端渲染器缺陷的文本与颜色修正：斜体字体预载、
//! 透明文本归一化、阴影与背景框裁剪规避、空格硬化、透明度合法化。

use subtitle_core::{AnchorPoint, Color, Line, Section};

use super::darktext;
use crate::platform::{DEFAULT_SHADOW_RGB, ZERO_WIDTH_SPACE};

/// 文档用到斜体时在时间轴开头插入一条几乎不可见的斜体探针行，
/// 迫使客户端提前加载斜体字体，避免首次出现斜体时的跳变。
pub(super) fn add_italic_prefetch(mut lines: Vec<Line>) -> Vec<Line> {
    // 位置防抖排序可能把起始更早的行排到探针前面，所以全表扫描
    if lines.iter().any(is_italic_probe) {
        return lines;
    }
    let uses_italics = lines
        .iter()
        .any(|line| line.sections.iter().any(|section| section.italic));
    if !uses_italics {
        return lines;
    }

    let mut section = Section::new(ZERO_WIDTH_SPACE.to_string());
    section.italic = true;
    section.fore_color = Color::rgba(0, 0, 0, 0);
    section.back_color = Color::rgba(0, 0, 0, 0);

    let mut probe = Line::new(0, 100);
    probe.anchor = AnchorPoint::TopLeft;
    probe.position = Some((0, 0));
    probe.android_dark_text_hack_allowed = false;
    probe.sections = vec![section];

    lines.insert(0, probe);
    lines
}

fn is_italic_probe(line: &Line) -> bool {
    line.sections.len() == 1 && {
        let section = &line.sections[0];
        section.italic
            && section.fore_color.a == 0
            && !section.text.is_empty()
            && section.text.chars().all(|c| c == ZERO_WIDTH_SPACE)
    }
}

/// 前景透明度为 0 的分段统一成全透明黑。
///
/// 有的客户端不支持真正的透明，会把残留的颜色分量画出来。
/// 暗色文字补偿生成的副本行刻意携带提亮后的透明前景，跳过不动。
pub(super) fn normalize_invisible_text(mut lines: Vec<Line>) -> Vec<Line> {
    for index in 0..lines.len() {
        if index > 0 {
            let (head, tail) = lines.split_at(index);
            if darktext::is_transparent_twin(&head[index - 1], &tail[0]) {
                continue;
            }
        }
        for section in &mut lines[index].sections {
            if section.fore_color.a == 0 {
                section.fore_color = Color::rgba(0, 0, 0, 0);
            }
        }
    }
    lines
}

/// 斜体到非斜体的分段边界上，把斜体末尾的空格挪到下一段开头，
/// 给斜体阴影留出渲染空间。文本总量不变。
pub(super) fn relocate_italic_boundary_spaces(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        for index in 1..line.sections.len() {
            let (head, tail) = line.sections.split_at_mut(index);
            let previous = &mut head[index - 1];
            let current = &mut tail[0];
            if !previous.italic || current.italic {
                continue;
            }
            let trimmed_len = previous.text.trim_end_matches(' ').len();
            if trimmed_len < previous.text.len() {
                let spaces = previous.text.split_off(trimmed_len);
                current.text.insert_str(0, &spaces);
            }
        }
    }
    lines
}

/// 背景框共享边界恰好落在换行处时拼入零宽空格标记，
/// 防止背景框在该处失去共享的圆角边。
pub(super) fn prevent_background_box_clipping(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        for index in 1..line.sections.len() {
            let (head, tail) = line.sections.split_at_mut(index);
            let previous = &mut head[index - 1];
            let current = &mut tail[0];
            if !shares_background_box(previous, current) {
                continue;
            }
            if previous.text.ends_with('\n') {
                previous.text.push(ZERO_WIDTH_SPACE);
            } else if current.text.starts_with('\n') {
                current.text.insert(0, ZERO_WIDTH_SPACE);
            }
        }
    }
    lines
}

fn shares_background_box(previous: &Section, current: &Section) -> bool {
    previous.back_color.a > 0
        && previous.back_color == current.back_color
        && previous.font == current.font
        && previous.offset == current.offset
        && (previous.scale - current.scale).abs() < f32::EPSILON
}

/// 两个及以上的连续空格换成等长的不间断空格，浏览器会折叠可断空格。
pub(super) fn harden_space_runs(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        for section in &mut line.sections {
            if section.text.contains("  ") {
                section.text = harden_spaces(&section.text);
            }
        }
    }
    lines
}

fn harden_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == ' ' {
            run += 1;
            continue;
        }
        flush_space_run(&mut result, run);
        run = 0;
        result.push(c);
    }
    flush_space_run(&mut result, run);
    result
}

fn flush_space_run(result: &mut String, run: usize) {
    let filler = if run >= 2 { '\u{00A0}' } else { ' ' };
    for _ in 0..run {
        result.push(filler);
    }
}

/// 透明度合法化。
///
/// 平台会静默丢弃取值恰为最大值的透明度属性，回落到用户可配置的
/// 不可预测默认值，所以 255 一律降为 254。阴影没有线上透明度属性，
/// 统一写成完全不透明；默认灰阴影例外，跟随前景透明度，
/// 避免同一视觉效果分裂成多个画笔定义。
pub(super) fn legalize_color_alphas(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        for section in &mut line.sections {
            if section.fore_color.a == 255 {
                section.fore_color.a = 254;
            }
            if section.back_color.a == 255 {
                section.back_color.a = 254;
            }
            let fore_alpha = section.fore_color.a;
            for color in section.shadow_colors.values_mut() {
                let (r, g, b) = DEFAULT_SHADOW_RGB;
                color.a = if (color.r, color.g, color.b) == (r, g, b) {
                    fore_alpha
                } else {
                    255
                };
            }
        }
    }
    lines
}
