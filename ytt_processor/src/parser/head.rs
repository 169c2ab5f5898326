//! # YTT 解析器 - 头部定义表
//!
//! `<head>` 中的 `wp`（窗口位置）、`ws`（窗口样式）和 `pen`（画笔）
//! 定义进入稀疏编号表，供正文中的 `<p>`/`<s>` 元素按编号引用。

use quick_xml::{Reader, events::BytesStart};
use tracing::warn;

use subtitle_core::{AnchorPoint, Color, ConvertError, OffsetType, RubyPart, Section, ShadowType};

use super::state::{PenDef, PositionDef, WindowStyleDef, YttParserState};
use super::utils::{get_color_attribute, get_flag_attribute, get_int_attribute};
use crate::platform;

pub(super) fn handle_window_position(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut YttParserState,
) -> Result<(), ConvertError> {
    let Some(id) = get_int_attribute::<usize>(e, reader, b"id")? else {
        warn!("忽略缺少 id 的 <wp> 定义");
        return Ok(());
    };

    let anchor = get_int_attribute::<u8>(e, reader, b"ap")?
        .and_then(AnchorPoint::from_id)
        .unwrap_or_default();
    let ah = get_int_attribute::<i32>(e, reader, b"ah")?;
    let av = get_int_attribute::<i32>(e, reader, b"av")?;
    let pixel = match (ah, av) {
        (Some(ah), Some(av)) => Some((
            platform::pixel_from_platform_coord(ah, state.video_width),
            platform::pixel_from_platform_coord(av, state.video_height),
        )),
        _ => None,
    };

    state.positions.insert(id, PositionDef { anchor, pixel });
    Ok(())
}

pub(super) fn handle_window_style(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut YttParserState,
) -> Result<(), ConvertError> {
    let Some(id) = get_int_attribute::<usize>(e, reader, b"id")? else {
        warn!("忽略缺少 id 的 <ws> 定义");
        return Ok(());
    };

    let pd = get_int_attribute::<u8>(e, reader, b"pd")?.unwrap_or(0);
    let sd = get_int_attribute::<u8>(e, reader, b"sd")?.unwrap_or(0);
    state.window_styles.insert(id, WindowStyleDef {
        vertical_text_type: platform::vertical_type_from_attrs(pd, sd),
    });
    Ok(())
}

pub(super) fn handle_pen(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut YttParserState,
) -> Result<(), ConvertError> {
    let Some(id) = get_int_attribute::<usize>(e, reader, b"id")? else {
        warn!("忽略缺少 id 的 <pen> 定义");
        return Ok(());
    };

    let mut pen = Section::new("");

    if let Some(fs) = get_int_attribute::<u8>(e, reader, b"fs")? {
        pen.font = platform::font_name_from_style_id(fs).to_string();
    }
    if let Some(sz) = get_int_attribute::<i32>(e, reader, b"sz")? {
        pen.scale = platform::real_scale_from_platform(sz);
    }
    if let Some(of) = get_int_attribute::<u8>(e, reader, b"of")? {
        pen.offset = OffsetType::from_id(of).unwrap_or_default();
    }
    pen.bold = get_flag_attribute(e, reader, b"b")?;
    pen.italic = get_flag_attribute(e, reader, b"i")?;
    pen.underline = get_flag_attribute(e, reader, b"u")?;

    if let Some(color) = get_color_attribute(e, reader, b"fc")? {
        pen.fore_color = color.with_alpha(pen.fore_color.a);
    }
    if let Some(fo) = get_int_attribute::<u8>(e, reader, b"fo")? {
        pen.fore_color.a = fo;
    }
    if let Some(color) = get_color_attribute(e, reader, b"bc")? {
        pen.back_color = color.with_alpha(pen.back_color.a);
    }
    if let Some(bo) = get_int_attribute::<u8>(e, reader, b"bo")? {
        pen.back_color.a = bo;
    }

    if let Some(et) = get_int_attribute::<u8>(e, reader, b"et")? {
        if let Some(shadow_type) = ShadowType::from_id(et) {
            // 线格式不携带阴影透明度：显式颜色按合法化后的完全不透明还原，
            // 缺失颜色用跟随前景透明度的默认灰
            let color = match get_color_attribute(e, reader, b"ec")? {
                Some(color) => color.with_alpha(255),
                None => {
                    let (r, g, b) = platform::DEFAULT_SHADOW_RGB;
                    Color::rgba(r, g, b, pen.fore_color.a)
                }
            };
            pen.shadow_colors.insert(shadow_type, color);
        } else {
            warn!("画笔 {id} 带有未知的阴影类型编号 {et}，忽略");
        }
    }

    if let Some(rb) = get_int_attribute::<u8>(e, reader, b"rb")? {
        pen.ruby_part = RubyPart::from_id(rb).unwrap_or_default();
    }
    pen.packed = get_flag_attribute(e, reader, b"hg")?;

    state.pens.insert(id, PenDef(pen));
    Ok(())
}
