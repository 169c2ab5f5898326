//! # YTT Processor: A Parser and Generator for YouTube Timed-Text Subtitles
//!
//! This crate converts between the YouTube `srv3` timed-text XML format ("YTT")
//! and the format-independent subtitle document model from `subtitle_core`.
//! Correct output is defined by the quirks of three independently buggy
//! first-party renderers (desktop browser, Android app, iOS app) and by the
//! server-side attribute stripping the uploaded XML has to survive, so the
//! generator runs a fixed enhancement pipeline over the document before
//! serializing it.
//!
//! The two primary functions are:
//! - [`parse_ytt`]: Converts a YTT string into a [`Document`].
//! - [`generate_ytt`]: Creates a YTT string from a [`Document`].
//!
//! File-based convenience wrappers [`load_document`] and [`save_document`]
//! are provided for callers that work with paths.
//!
//! ## ⚠️ Important: Output Is Deliberately Odd
//!
//! The generated XML contains zero-width-space markers, alpha values capped
//! at 254, duplicated lines, and a 1 ms start-time shift. None of this is
//! accidental: each quirk works around a documented rendering or server
//! behavior, and the parser reverses all of them on the way back in.
//!
//! ## Examples
//!
//! ```rust
//! use subtitle_core::{Document, Line, Section};
//! use ytt_processor::{generate_ytt, parse_ytt, YttParsingOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut document = Document::new(1280, 720);
//!     let mut line = Line::new(5000, 10000);
//!     line.sections = vec![Section::new("Hello world")];
//!     document.lines.push(line);
//!
//!     let ytt = generate_ytt(&document)?;
//!     assert!(ytt.contains("<timedtext format=\"3\">"));
//!
//!     let parsed = parse_ytt(&ytt, &YttParsingOptions::default())?;
//!     assert_eq!(parsed.lines.len(), 1);
//!     assert_eq!(parsed.lines[0].start_ms, 5000);
//!     assert_eq!(parsed.lines[0].text(), "Hello world");
//!
//!     Ok(())
//! }
//! ```

pub mod generator;
pub mod parser;
mod pipeline;
mod platform;

use std::path::Path;

use subtitle_core::{ConvertError, Document};

pub use generator::generate_ytt;
pub use parser::{YttParsingOptions, parse_ytt};

/// 读取并解析一个 YTT 文件，使用默认的参考画布尺寸。
///
/// # Errors
///
/// 文件不可读返回 `ConvertError::Io`，内容不合法时返回解析错误。
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, ConvertError> {
    let content = std::fs::read_to_string(path)?;
    parse_ytt(&content, &YttParsingOptions::default())
}

/// 生成并写出一个 YTT 文件。
///
/// 先在内存里完整生成再一次性写盘，生成失败不会留下半截文件。
///
/// # Errors
///
/// 生成失败时返回相应的 `ConvertError`，写盘失败返回 `ConvertError::Io`。
pub fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<(), ConvertError> {
    let output = generate_ytt(document)?;
    std::fs::write(path, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtitle_core::{AnchorPoint, Color, Line, Section, ShadowType};

    #[test]
    fn test_write_read_round_trip() {
        // 已满足全部管线不变量的行：单一阴影、无最大透明度、无重叠
        let mut section = Section::new("こんにちは world");
        section.font = "Times New Roman".to_string();
        section.scale = 1.25;
        section.bold = true;
        section.fore_color = Color::rgba(255, 255, 255, 254);
        section.back_color = Color::rgba(8, 8, 8, 254);
        section
            .shadow_colors
            .insert(ShadowType::HardShadow, Color::rgba(0x10, 0x20, 0x30, 255));

        let mut line = Line::new(1000, 5000);
        line.anchor = AnchorPoint::BottomCenter;
        line.position = Some((640, 360));
        line.sections = vec![section];

        let mut document = Document::new(1280, 720);
        document.lines = vec![line];

        let ytt = generate_ytt(&document).unwrap();
        let parsed = parse_ytt(&ytt, &YttParsingOptions::default()).unwrap();

        assert_eq!(parsed, document);
    }

    #[test]
    fn test_round_trip_reverses_start_shift() {
        let mut line = Line::new(0, 5000);
        line.sections = vec![Section::new("early")];
        let mut document = Document::new(1280, 720);
        document.lines = vec![line];

        let ytt = generate_ytt(&document).unwrap();
        assert!(ytt.contains("t=\"1\" d=\"4999\""));

        let parsed = parse_ytt(&ytt, &YttParsingOptions::default()).unwrap();
        assert_eq!(parsed.lines[0].start_ms, 0);
        assert_eq!(parsed.lines[0].end_ms, 5000);
    }

    #[test]
    fn test_italic_document_is_stable_across_resaves() {
        // 字体预载行在读入时丢弃，写出时重新注入，
        // 反复保存再读取不会让文档膨胀
        let mut section = Section::new("slanted");
        section.italic = true;
        let mut line = Line::new(1000, 5000);
        line.sections = vec![section];
        let mut document = Document::new(1280, 720);
        document.lines = vec![line];

        let first = parse_ytt(&generate_ytt(&document).unwrap(), &YttParsingOptions::default())
            .unwrap();
        let second = parse_ytt(&generate_ytt(&first).unwrap(), &YttParsingOptions::default())
            .unwrap();

        assert_eq!(first.lines.len(), 1);
        assert_eq!(second, first);
    }

    #[test]
    fn test_round_trip_discards_dark_text_ghost() {
        let mut section = Section::new("dark words");
        section.fore_color = Color::rgba(16, 16, 16, 254);
        let mut line = Line::new(1000, 5000);
        line.sections = vec![section];
        let mut document = Document::new(1280, 720);
        document.lines = vec![line];

        let ytt = generate_ytt(&document).unwrap();
        // 写出侧生成了透明副本行
        assert!(ytt.match_indices("<p ").count() >= 2);

        let parsed = parse_ytt(&ytt, &YttParsingOptions::default()).unwrap();
        assert_eq!(parsed.lines.len(), 1);
        assert!(parsed.lines[0].android_dark_text_hack_allowed);
        assert_eq!(parsed.lines[0].text(), "dark words");
    }
}
