//! # 重叠行闪烁规避
//!
//! 同一渲染位置上时间重叠的行，若其中有只含单个分段的行，
//! 客户端在行数变化时会整体重排而闪烁。把单分段行一分为二
//! （或补一个零宽空格标记分段），使该位置上不存在孤立的单分段行。

use subtitle_core::{Line, is_tall_script_char};
use unicode_segmentation::UnicodeSegmentation;

use crate::platform::{ZERO_WIDTH_SPACE, resolve_position};

pub(super) fn mitigate_position_flicker(
    mut lines: Vec<Line>,
    video_width: i32,
    video_height: i32,
) -> Vec<Line> {
    lines.sort_by_key(|line| line.start_ms);
    for first in 0..lines.len() {
        for second in first + 1..lines.len() {
            if lines[second].start_ms >= lines[first].end_ms {
                break;
            }
            let same_position = resolve_position(&lines[first], video_width, video_height)
                == resolve_position(&lines[second], video_width, video_height);
            if !same_position {
                continue;
            }
            split_single_section_line(&mut lines[first]);
            split_single_section_line(&mut lines[second]);
        }
    }
    lines
}

fn split_single_section_line(line: &mut Line) {
    if line.sections.len() != 1 || line.sections[0].text.is_empty() {
        return;
    }
    match preferred_split_index(&line.sections[0].text) {
        Some(index) => {
            let mut second = line.sections[0].clone();
            second.text = line.sections[0].text.split_off(index);
            second.start_offset_ms = 0;
            line.sections.push(second);
        }
        None => {
            let mut marker = line.sections[0].clone();
            marker.text = ZERO_WIDTH_SPACE.to_string();
            marker.start_offset_ms = 0;
            line.sections.push(marker);
        }
    }
}

/// 选择拆分点：第一个高字形字素之后优先（两半都保有全高字形，
/// 背景框高度才对齐），其次第一个空格之后。两种拆法都会产生
/// 空的后半段时返回 `None`，调用方改为补标记分段。
fn preferred_split_index(text: &str) -> Option<usize> {
    for (offset, grapheme) in text.grapheme_indices(true) {
        if grapheme.chars().next().is_some_and(is_tall_script_char) {
            let end = offset + grapheme.len();
            if end < text.len() {
                return Some(end);
            }
            break;
        }
    }
    let end = text.find(' ')? + 1;
    (end < text.len()).then_some(end)
}
