//! # YTT（YouTube `srv3` 计时文本）生成器
//!
//! 把文档模型序列化为平台 XML。写出前先跑一遍增强管线补偿
//! 各客户端的渲染缺陷，再把样式去重进索引属性表。
//! 输出必须在服务器端属性剥离后仍然可渲染，相关规避手段
//! 分散在各个子模块里。

mod body;
mod head;
mod tables;

use std::io::Cursor;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesText, Event},
};
use tracing::warn;

use subtitle_core::{ConvertError, Document, Line};

use crate::pipeline;

/// YTT 生成的主入口函数。
///
/// # 参数
/// * `document` - 待序列化的字幕文档，本身不会被修改，
///   增强管线在行列表的副本上运行。
///
/// # 返回
///
/// * `Ok(String)` - 成功生成的 YTT 字符串（UTF-8，元素间只用 LF 换行）。
///
/// # Errors
///
/// 如果某个分段在管线处理后仍携带多种阴影，返回
/// `ConvertError::InvariantViolation`；I/O 或编码问题返回对应变体。
pub fn generate_ytt(document: &Document) -> Result<String, ConvertError> {
    let lines = pipeline::apply_enhancements(
        document.lines.clone(),
        document.video_width,
        document.video_height,
    );
    let lines = sanitize_line_timings(lines);
    let (tables, refs) =
        tables::build_tables(&lines, document.video_width, document.video_height)?;

    let mut buffer = Vec::new();
    let mut writer = Writer::new(Cursor::new(&mut buffer));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_newline(&mut writer)?;
    writer
        .create_element("timedtext")
        .with_attribute(("format", "3"))
        .write_inner_content(|writer| {
            write_newline(writer)?;
            head::write_head(writer, &tables)?;
            write_newline(writer)?;
            body::write_body(writer, &lines, &refs)?;
            write_newline(writer)?;
            Ok(())
        })?;
    write_newline(&mut writer)?;

    String::from_utf8(buffer).map_err(ConvertError::FromUtf8)
}

/// 写出前的最后一道时间检查。
///
/// 没有分段的行不写；起始时间不为正的行平移到 1ms（有客户端
/// 不显示 0ms 起始的字幕），结束时间保持不变；平移后时长
/// 不为正的行丢弃。
fn sanitize_line_timings(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .filter_map(|mut line| {
            if line.sections.is_empty() {
                return None;
            }
            if line.start_ms <= 0 {
                line.start_ms = 1;
            }
            if line.end_ms <= line.start_ms {
                warn!("丢弃时长为非正值的行（起始 {}ms）", line.start_ms);
                return None;
            }
            Some(line)
        })
        .collect()
}

/// 元素之间的 LF 换行。段落内容里不插换行。
fn write_newline<W: std::io::Write>(writer: &mut Writer<W>) -> Result<(), ConvertError> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}
