//! # YTT 生成器 - 头部定义表
//!
//! 把去重后的位置、窗口样式和画笔表写成 `<head>` 中的
//! `<wp>`、`<ws>`、`<pen>` 定义，每条定义一行。

use quick_xml::Writer;
use subtitle_core::{Color, ConvertError, OffsetType};

use super::tables::{AttributeTables, PenKey};
use super::write_newline;

pub(super) fn write_head<W: std::io::Write>(
    writer: &mut Writer<W>,
    tables: &AttributeTables,
) -> Result<(), ConvertError> {
    writer
        .create_element("head")
        .write_inner_content(|writer| {
            write_newline(writer)?;
            for (id, position) in tables.positions.entries().iter().enumerate() {
                writer
                    .create_element("wp")
                    .with_attribute(("id", id.to_string().as_str()))
                    .with_attribute(("ap", position.ap.to_string().as_str()))
                    .with_attribute(("ah", position.ah.to_string().as_str()))
                    .with_attribute(("av", position.av.to_string().as_str()))
                    .write_empty()?;
                write_newline(writer)?;
            }
            for (id, style) in tables.window_styles.entries().iter().enumerate() {
                let mut element = writer
                    .create_element("ws")
                    .with_attribute(("id", id.to_string().as_str()))
                    .with_attribute(("ju", style.ju.to_string().as_str()));
                if let Some((pd, sd)) = style.direction {
                    element = element
                        .with_attribute(("pd", pd.to_string().as_str()))
                        .with_attribute(("sd", sd.to_string().as_str()));
                }
                element.write_empty()?;
                write_newline(writer)?;
            }
            for (id, pen) in tables.pens.entries().iter().enumerate() {
                write_pen(writer, id, pen)?;
                write_newline(writer)?;
            }
            Ok(())
        })?;
    Ok(())
}

/// 写一条 `<pen>` 定义。布尔与中性取值的属性省略，
/// 颜色和透明度永远写出（服务器会剥离缺省属性，留着才可控）。
fn write_pen<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: usize,
    pen: &PenKey,
) -> Result<(), ConvertError> {
    let mut attributes: Vec<(&str, String)> = vec![("id", id.to_string())];
    if pen.bold {
        attributes.push(("b", "1".to_string()));
    }
    if pen.italic {
        attributes.push(("i", "1".to_string()));
    }
    if pen.underline {
        attributes.push(("u", "1".to_string()));
    }
    if pen.font_style != 0 {
        attributes.push(("fs", pen.font_style.to_string()));
    }
    if pen.scale != 100 {
        attributes.push(("sz", pen.scale.to_string()));
    }
    if pen.offset != OffsetType::Regular {
        attributes.push(("of", pen.offset.id().to_string()));
    }
    if pen.ruby != 0 {
        attributes.push(("rb", pen.ruby.to_string()));
    }
    if pen.packed {
        attributes.push(("hg", "1".to_string()));
    }
    attributes.push(("fc", pen.fore.to_html()));
    attributes.push(("fo", pen.fore.a.to_string()));
    attributes.push(("bc", pen.back.to_html()));
    attributes.push(("bo", pen.back.a.to_string()));
    if let Some((shadow_type, (r, g, b))) = pen.shadow {
        attributes.push(("et", shadow_type.to_string()));
        attributes.push(("ec", Color::rgb(r, g, b).to_html()));
    }

    let mut element = writer.create_element("pen");
    for (name, value) in &attributes {
        element = element.with_attribute((*name, value.as_str()));
    }
    element.write_empty()?;
    Ok(())
}
