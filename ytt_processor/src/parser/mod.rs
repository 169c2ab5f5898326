//! # YTT（YouTube `srv3` 计时文本）解析器
//!
//! 把平台专有的 XML 计时文本解析为与格式无关的文档模型，
//! 解析过程中解开索引属性表并还原写出器施加的渲染规避标记。

mod body;
mod head;
mod state;
mod utils;

use quick_xml::{Reader, events::Event};
use tracing::error;

use subtitle_core::{ConvertError, Document};

use self::state::YttParserState;

/// YTT 解析选项。
#[derive(Debug, Clone)]
pub struct YttParsingOptions {
    /// 参考画布宽度（像素）。YTT 文件自身不携带画布尺寸，
    /// 所有百分比坐标按该尺寸换算回像素。
    pub video_width: i32,
    /// 参考画布高度（像素）。
    pub video_height: i32,
}

impl Default for YttParsingOptions {
    fn default() -> Self {
        Self {
            video_width: Document::DEFAULT_WIDTH,
            video_height: Document::DEFAULT_HEIGHT,
        }
    }
}

/// 解析 YTT 格式的字幕文件。
///
/// # 参数
///
/// * `content` - YTT 文件内容字符串。
/// * `options` - 解析选项，目前只包含参考画布尺寸。
///
/// # Errors
///
/// * `ConvertError::Xml` - 输入不是合法的 XML。
/// * `ConvertError::ParseInt` / `ConvertError::InvalidColor` - 数值或颜色属性格式错误。
///
/// 缺失的元素和属性由默认值补齐；越界的表引用在局部回退到默认定义，
/// 不会产生错误。
pub fn parse_ytt(content: &str, options: &YttParsingOptions) -> Result<Document, ConvertError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut document = Document::new(options.video_width, options.video_height);
    document.lines.reserve(content.matches("<p").count());
    let mut state = YttParserState::new(options.video_width, options.video_height);
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                error!("YTT 解析错误，位置 {}: {}。无法继续解析", reader.error_position(), e);
                return Err(ConvertError::Xml(e));
            }
        };

        if event == Event::Eof {
            break;
        }

        if state.in_p {
            body::handle_p_event(&event, &mut state, &reader, &mut document)?;
        } else {
            handle_global_event(&event, &mut state, &reader)?;
        }

        buf.clear();
    }

    body::finalize_document(&mut document);
    Ok(document)
}

/// 处理 `<p>` 之外的全局事件。
fn handle_global_event(
    event: &Event<'_>,
    state: &mut YttParserState,
    reader: &Reader<&[u8]>,
) -> Result<(), ConvertError> {
    match event {
        Event::Start(e) => match e.local_name().as_ref() {
            b"head" => state.in_head = true,
            b"body" => state.in_body = true,
            b"wp" if state.in_head => head::handle_window_position(e, reader, state)?,
            b"ws" if state.in_head => head::handle_window_style(e, reader, state)?,
            b"pen" if state.in_head => head::handle_pen(e, reader, state)?,
            b"p" if state.in_body => body::handle_p_start(e, reader, state)?,
            _ => {}
        },
        Event::End(e) => match e.local_name().as_ref() {
            b"head" => state.in_head = false,
            b"body" => state.in_body = false,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtitle_core::{AnchorPoint, Color, ShadowType, VerticalTextType};

    fn parse(content: &str) -> Document {
        parse_ytt(content, &YttParsingOptions::default()).unwrap()
    }

    #[test]
    fn test_parse_minimal_document() {
        let document = parse(concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<timedtext format="3">"#,
            r#"<head><wp id="1" ap="7" ah="50" av="100"/><ws id="1" ju="2"/>"#,
            r##"<pen id="1" fc="#FFFFFF" fo="254" bc="#080808" bo="254"/></head>"##,
            "<body>\n",
            r#"<p t="5000" d="2000" wp="1" ws="1" p="1">&#8203;Hello</p>"#,
            "\n</body></timedtext>",
        ));

        assert_eq!(document.lines.len(), 1);
        let line = &document.lines[0];
        assert_eq!(line.start_ms, 5000);
        assert_eq!(line.end_ms, 7000);
        assert_eq!(line.anchor, AnchorPoint::BottomCenter);
        assert_eq!(line.sections.len(), 1);
        // 行高标记（零宽空格）在读入时剥除
        assert_eq!(line.sections[0].text, "Hello");
        assert_eq!(line.sections[0].fore_color, Color::rgba(255, 255, 255, 254));
        assert_eq!(line.sections[0].back_color, Color::rgba(8, 8, 8, 254));
    }

    #[test]
    fn test_sparse_and_out_of_range_references() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r#"<head><pen id="5" i="1"/><ws id="3" pd="2" sd="1"/></head>"#,
            r#"<body><p t="1000" d="1000" p="5" ws="3">a</p>"#,
            r#"<p t="2000" d="1000" p="9" ws="9" wp="4">b</p></body></timedtext>"#,
        ));

        assert_eq!(document.lines.len(), 2);
        assert!(document.lines[0].sections[0].italic);
        assert_eq!(
            document.lines[0].vertical_text_type,
            VerticalTextType::VerticalLtr
        );
        // 越界引用回退到默认值而不是报错
        assert!(!document.lines[1].sections[0].italic);
        assert_eq!(document.lines[1].vertical_text_type, VerticalTextType::None);
        assert_eq!(document.lines[1].position, None);
    }

    #[test]
    fn test_millisecond_shift_is_reversed() {
        let document = parse(concat!(
            r#"<timedtext format="3"><body>"#,
            r#"<p t="1" d="4999">Hello</p>"#,
            r#"</body></timedtext>"#,
        ));
        assert_eq!(document.lines[0].start_ms, 0);
        assert_eq!(document.lines[0].end_ms, 5000);
    }

    #[test]
    fn test_spans_and_marker_section_dropped() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r#"<head><pen id="1" b="1"/><pen id="2" i="1"/></head>"#,
            "<body>",
            "<p t=\"1000\" d=\"2000\"><s p=\"1\">\u{200B}ka</s>\u{200B}<s p=\"2\" t=\"500\">\u{200B}ra</s></p>",
            "</body></timedtext>",
        ));

        let line = &document.lines[0];
        // 第一个 <s> 后面的裸零宽空格文本节点被剥除后整段丢弃
        assert_eq!(line.sections.len(), 2);
        assert_eq!(line.sections[0].text, "ka");
        assert!(line.sections[0].bold);
        assert_eq!(line.sections[0].start_offset_ms, 0);
        assert_eq!(line.sections[1].text, "ra");
        assert!(line.sections[1].italic);
        assert_eq!(line.sections[1].start_offset_ms, 500);
    }

    #[test]
    fn test_adjacent_identical_sections_are_merged() {
        let document = parse(concat!(
            r#"<timedtext format="3"><head><pen id="1" b="1"/></head>"#,
            r#"<body><p t="1000" d="2000"><s p="1">foo</s><s p="1">bar</s></p>"#,
            r#"</body></timedtext>"#,
        ));
        let line = &document.lines[0];
        assert_eq!(line.sections.len(), 1);
        assert_eq!(line.sections[0].text, "foobar");
    }

    #[test]
    fn test_italic_prefetch_line_is_discarded() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r#"<head><wp id="1" ap="0" ah="0" av="0"/>"#,
            r#"<pen id="1" i="1" fo="0"/><pen id="2" i="1" fo="254"/></head>"#,
            "<body>",
            "<p t=\"1\" d=\"99\" wp=\"1\" p=\"1\">\u{200B}</p>",
            r#"<p t="1000" d="2000" p="2">slanted</p>"#,
            "</body></timedtext>",
        ));

        // 字体预载行剥除标记后没有内容，不进入文档
        assert_eq!(document.lines.len(), 1);
        assert_eq!(document.lines[0].text(), "slanted");
        assert!(document.lines[0].sections[0].italic);
    }

    #[test]
    fn test_dark_text_ghost_is_discarded() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r##"<head><pen id="1" fc="#101010" fo="254"/><pen id="2" fc="#AAAAAA" fo="0"/></head>"##,
            r#"<body><p t="1000" d="2000" p="1">dark</p>"#,
            r#"<p t="1000" d="2000" p="2">dark</p></body></timedtext>"#,
        ));

        assert_eq!(document.lines.len(), 1);
        assert!(document.lines[0].android_dark_text_hack_allowed);
    }

    #[test]
    fn test_dark_text_without_ghost_clears_flag() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r##"<head><pen id="1" fc="#101010" fo="254"/></head>"##,
            r#"<body><p t="1000" d="2000" p="1">dark</p></body></timedtext>"#,
        ));

        assert_eq!(document.lines.len(), 1);
        assert!(!document.lines[0].android_dark_text_hack_allowed);
    }

    #[test]
    fn test_pen_shadow_reconstruction() {
        let document = parse(concat!(
            r#"<timedtext format="3">"#,
            r##"<head><pen id="1" et="4" ec="#FF0000"/><pen id="2" et="1" fo="200"/></head>"##,
            r#"<body><p t="1000" d="1000" p="1">a</p>"#,
            r#"<p t="3000" d="1000" p="2">b</p></body></timedtext>"#,
        ));

        let first = &document.lines[0].sections[0];
        assert_eq!(
            first.shadow_colors.get(&ShadowType::SoftShadow),
            Some(&Color::rgb(255, 0, 0))
        );
        // 缺省阴影颜色是跟随前景透明度的默认灰
        let second = &document.lines[1].sections[0];
        assert_eq!(
            second.shadow_colors.get(&ShadowType::HardShadow),
            Some(&Color::rgba(0x22, 0x22, 0x22, 200))
        );
    }

    #[test]
    fn test_malformed_numeric_attribute_fails() {
        let result = parse_ytt(
            r#"<timedtext format="3"><body><p t="abc" d="1000">x</p></body></timedtext>"#,
            &YttParsingOptions::default(),
        );
        assert!(matches!(result, Err(ConvertError::ParseInt(_))));
    }

    #[test]
    fn test_ill_formed_xml_fails() {
        let result = parse_ytt(
            r#"<timedtext format="3"><body><p t="0" d="1">x</body>"#,
            &YttParsingOptions::default(),
        );
        assert!(matches!(result, Err(ConvertError::Xml(_))));
    }
}
