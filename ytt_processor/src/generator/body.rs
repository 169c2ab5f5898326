//! # YTT 生成器 - 正文
//!
//! 把处理后的行写成 `<body>` 中的 `<p>` 段落。单分段且无起始偏移的行
//! 写成带 `p` 属性的内联文本；其余写成 `<s>` 子元素，并在第一个
//! 真实分段的元素后面补一个零宽空格文本节点，否则服务器会剥掉
//! 纯元素行第一个子元素上的画笔属性。

use quick_xml::{
    Writer,
    events::{BytesText, Event},
};
use subtitle_core::{ConvertError, Line, RubyPart, Section};

use super::tables::LineRefs;
use super::write_newline;
use crate::platform::ZERO_WIDTH_SPACE;

pub(super) fn write_body<W: std::io::Write>(
    writer: &mut Writer<W>,
    lines: &[Line],
    refs: &[LineRefs],
) -> Result<(), ConvertError> {
    writer
        .create_element("body")
        .write_inner_content(|writer| {
            write_newline(writer)?;
            for (line, line_refs) in lines.iter().zip(refs) {
                write_paragraph(writer, line, line_refs)
                    .map_err(std::io::Error::other)?;
                write_newline(writer)?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_paragraph<W: std::io::Write>(
    writer: &mut Writer<W>,
    line: &Line,
    refs: &LineRefs,
) -> Result<(), ConvertError> {
    let duration_ms = line.end_ms - line.start_ms;
    let mut attributes: Vec<(&str, String)> = vec![
        ("t", line.start_ms.to_string()),
        ("d", duration_ms.to_string()),
        ("wp", refs.wp.to_string()),
        ("ws", refs.ws.to_string()),
    ];
    let inline = line.sections.len() == 1 && line.sections[0].start_offset_ms == 0;
    if inline {
        attributes.push(("p", refs.pens[0].to_string()));
    }

    let mut element = writer.create_element("p");
    for (name, value) in &attributes {
        element = element.with_attribute((*name, value.as_str()));
    }

    if inline {
        let text = text_with_height_markers(&line.sections[0].text);
        element.write_text_content(BytesText::new(&text))?;
        return Ok(());
    }

    let marker_after = first_non_ruby_prefix_index(&line.sections);
    element.write_inner_content(|writer| {
        for (index, (section, pen)) in line.sections.iter().zip(&refs.pens).enumerate() {
            let pen_id = pen.to_string();
            let offset = section.start_offset_ms.to_string();
            let mut span = writer
                .create_element("s")
                .with_attribute(("p", pen_id.as_str()));
            if section.start_offset_ms != 0 {
                span = span.with_attribute(("t", offset.as_str()));
            }
            let text = text_with_height_markers(&section.text);
            span.write_text_content(BytesText::new(&text))?;
            if index == marker_after {
                writer.write_event(Event::Text(BytesText::new("\u{200B}")))?;
            }
        }
        Ok(())
    })?;
    Ok(())
}

/// 第一个不属于注音前缀（括号、上注、下注）的分段下标。
fn first_non_ruby_prefix_index(sections: &[Section]) -> usize {
    sections
        .iter()
        .position(|section| {
            !matches!(
                section.ruby_part,
                RubyPart::Parenthesis | RubyPart::RubyAbove | RubyPart::RubyBelow
            )
        })
        .unwrap_or(0)
}

/// 确保每个不含换行的连续文本段至少带一个零宽空格。
///
/// 带标记与不带标记的分段行高度量不同，卡拉OK逐行切换时
/// 行高不能可见地跳动，所以统一都带。
fn text_with_height_markers(text: &str) -> String {
    let runs: Vec<String> = text
        .split('\n')
        .map(|run| {
            if run.is_empty() || run.contains(ZERO_WIDTH_SPACE) {
                run.to_string()
            } else {
                format!("{ZERO_WIDTH_SPACE}{run}")
            }
        })
        .collect();
    runs.join("\n")
}
