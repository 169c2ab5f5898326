//! # YTT 解析器 - 正文处理模块
//!
//! 解析 `<body>` 中带时间戳的 `<p>` 段落元素：裸文本节点继承段落画笔，
//! `<s>` 子元素可以按编号覆盖画笔并携带起始偏移。
//! 段落收尾时还原写出器施加的各种渲染规避标记。

use std::str;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use tracing::{debug, warn};

use subtitle_core::{ConvertError, Document, Line, Section};

use super::state::{CurrentParagraph, OpenSpan, YttParserState};
use super::utils::get_int_attribute;
use crate::platform::ZERO_WIDTH_SPACE;

pub(super) fn handle_p_start(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut YttParserState,
) -> Result<(), ConvertError> {
    let start_ms = get_int_attribute::<i64>(e, reader, b"t")?.unwrap_or(0);
    let duration_ms = get_int_attribute::<i64>(e, reader, b"d")?.unwrap_or(0);

    let position = state.positions.resolve(get_int_attribute(e, reader, b"wp")?);
    let window_style = state
        .window_styles
        .resolve(get_int_attribute(e, reader, b"ws")?);
    let pen = state.pens.resolve(get_int_attribute(e, reader, b"p")?).0;

    state.current_p = Some(CurrentParagraph {
        start_ms,
        end_ms: start_ms + duration_ms,
        position,
        window_style,
        pen,
        sections: Vec::new(),
        open_span: None,
        text_buffer: String::new(),
    });
    state.in_p = true;
    Ok(())
}

/// 处理 `<p>` 内部的事件。
pub(super) fn handle_p_event(
    event: &Event<'_>,
    state: &mut YttParserState,
    reader: &Reader<&[u8]>,
    document: &mut Document,
) -> Result<(), ConvertError> {
    match event {
        Event::Start(e) if e.local_name().as_ref() == b"s" => {
            let pen = state.pens.resolve(get_int_attribute(e, reader, b"p")?).0;
            let start_offset_ms = get_int_attribute::<i64>(e, reader, b"t")?.unwrap_or(0);
            if let Some(paragraph) = state.current_p.as_mut() {
                flush_bare_text(paragraph);
                if paragraph.open_span.is_some() {
                    warn!("<s> 元素出现嵌套，外层元素被提前关闭");
                    close_span(paragraph);
                }
                paragraph.open_span = Some(OpenSpan {
                    pen,
                    start_offset_ms,
                });
            }
        }
        Event::Text(e) => {
            let text = e.xml_content()?;
            if let Some(paragraph) = state.current_p.as_mut() {
                paragraph.text_buffer.push_str(&text);
            }
        }
        Event::GeneralRef(e) => {
            if let Some(decoded) = resolve_entity(e.as_ref()) {
                if let Some(paragraph) = state.current_p.as_mut() {
                    paragraph.text_buffer.push(decoded);
                }
            } else {
                warn!("忽略了无法解析的 XML 实体引用");
            }
        }
        Event::End(e) => match e.local_name().as_ref() {
            b"s" => {
                if let Some(paragraph) = state.current_p.as_mut() {
                    close_span(paragraph);
                }
            }
            b"p" => finalize_paragraph(state, document),
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

/// 解析文本中的 XML 实体引用（预定义实体与数字实体）。
fn resolve_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => {
            let name = str::from_utf8(name).ok()?;
            let digits = name.strip_prefix('#')?;
            let (radix, digits) = digits
                .strip_prefix('x')
                .map_or((10, digits), |stripped| (16, stripped));
            char::from_u32(u32::from_str_radix(digits, radix).ok()?)
        }
    }
}

/// 把累积的裸文本落成一个继承段落画笔的分段。
fn flush_bare_text(paragraph: &mut CurrentParagraph) {
    if paragraph.text_buffer.is_empty() {
        return;
    }
    let mut section = paragraph.pen.clone();
    section.text = std::mem::take(&mut paragraph.text_buffer);
    paragraph.sections.push(section);
}

/// 关闭当前 `<s>` 元素，文本为空也要落段（可能只携带起始偏移）。
fn close_span(paragraph: &mut CurrentParagraph) {
    let Some(span) = paragraph.open_span.take() else {
        return;
    };
    let mut section = span.pen;
    section.text = std::mem::take(&mut paragraph.text_buffer);
    section.start_offset_ms = span.start_offset_ms;
    paragraph.sections.push(section);
}

/// `</p>`：收尾并把行加入文档。
fn finalize_paragraph(state: &mut YttParserState, document: &mut Document) {
    state.in_p = false;
    let Some(mut paragraph) = state.current_p.take() else {
        return;
    };
    flush_bare_text(&mut paragraph);

    let mut line = Line::new(paragraph.start_ms, paragraph.end_ms);
    line.anchor = paragraph.position.anchor;
    line.position = paragraph.position.pixel;
    line.vertical_text_type = paragraph.window_style.vertical_text_type;

    // 还原写出器为规避零起始缺陷施加的 1ms 平移（结束时间保持不变）
    if line.start_ms == 1 {
        line.start_ms = 0;
    }

    let mut sections = paragraph.sections;
    for section in &mut sections {
        section.text = section.text.replace("\r\n", "\n");
        section.text.retain(|c| c != ZERO_WIDTH_SPACE);
    }
    // 行高标记剥掉后变空的分段丢弃，除非它是段落的唯一内容
    line.sections = if sections.len() > 1 {
        sections
            .into_iter()
            .filter(|section| !(section.text.is_empty() && section.start_offset_ms == 0))
            .collect()
    } else {
        sections
    };

    document.lines.push(line);
}

/// 全部行读完后的文档级收尾。
pub(super) fn finalize_document(document: &mut Document) {
    discard_italic_prefetch_lines(document);
    reconstruct_dark_text_flags(document);
    for line in &mut document.lines {
        merge_adjacent_sections(line);
    }
}

/// 丢弃写出器注入的斜体字体预载行。
///
/// 该行只有一个全透明斜体分段，文本是纯零宽空格，剥除行高标记后
/// 为空，不携带字幕内容。留着它会让每次写出再叠加一条新的预载行。
fn discard_italic_prefetch_lines(document: &mut Document) {
    document.lines.retain(|line| {
        !(line.sections.len() == 1 && {
            let section = &line.sections[0];
            section.italic && section.fore_color.a == 0 && section.text.is_empty()
        })
    });
}

/// 从生成文件的模式中重建"Android 暗色文字"标志。
///
/// 带不透明暗色前景的行，若紧跟一条时间与文本完全一致的全透明行，
/// 则后者是写出器合成的副本，丢弃之；否则说明该行不适合再生成副本，
/// 清除其标志。该启发式只为与既有生成文件的往返保真而保留。
fn reconstruct_dark_text_flags(document: &mut Document) {
    let mut index = 0;
    while index < document.lines.len() {
        let has_dark_text = document.lines[index]
            .sections
            .iter()
            .any(|section| section.fore_color.a > 0 && section.fore_color.is_dark());
        if has_dark_text {
            let next_is_ghost = document
                .lines
                .get(index + 1)
                .is_some_and(|next| is_transparent_duplicate(&document.lines[index], next));
            if next_is_ghost {
                debug!("丢弃暗色文字补偿生成的透明副本行（起始 {}ms）",
                    document.lines[index].start_ms);
                document.lines.remove(index + 1);
            } else {
                document.lines[index].android_dark_text_hack_allowed = false;
            }
        }
        index += 1;
    }
}

fn is_transparent_duplicate(original: &Line, candidate: &Line) -> bool {
    candidate.start_ms == original.start_ms
        && candidate.end_ms == original.end_ms
        && !candidate.sections.is_empty()
        && candidate
            .sections
            .iter()
            .all(|section| section.fore_color.a == 0)
        && candidate.text() == original.text()
}

/// 合并行内相邻且样式完全一致的分段。
fn merge_adjacent_sections(line: &mut Line) {
    let sections = std::mem::take(&mut line.sections);
    let mut merged: Vec<Section> = Vec::with_capacity(sections.len());
    for section in sections {
        if let Some(last) = merged.last_mut() {
            if section.start_offset_ms == 0 && last.has_identical_formatting(&section) {
                last.text.push_str(&section.text);
                continue;
            }
        }
        merged.push(section);
    }
    line.sections = merged;
}
