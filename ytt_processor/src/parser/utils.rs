//! # YTT 解析器的工具函数
//!
//! 属性提取辅助。按照格式约定，缺失的属性由调用方用默认值补齐，
//! 但存在却无法按数字解析的属性是硬错误。

use std::str::FromStr;

use quick_xml::{Reader, events::BytesStart};
use subtitle_core::{Color, ConvertError};

/// 获取字符串类型的属性值。
pub(super) fn get_string_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    name: &[u8],
) -> Result<Option<String>, ConvertError> {
    e.try_get_attribute(name)?
        .map(|attr| {
            let decoded = attr.decode_and_unescape_value(reader.decoder())?;
            Ok(decoded.into_owned())
        })
        .transpose()
}

/// 获取整数属性值。属性缺失返回 `None`，存在但不是合法整数则报错。
pub(super) fn get_int_attribute<T>(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    name: &[u8],
) -> Result<Option<T>, ConvertError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    get_string_attribute(e, reader, name)?
        .map(|value| value.trim().parse::<T>().map_err(ConvertError::from))
        .transpose()
}

/// 获取 `0`/`1` 形式的布尔属性值，缺失视为 `false`。
pub(super) fn get_flag_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    name: &[u8],
) -> Result<bool, ConvertError> {
    Ok(get_int_attribute::<u8>(e, reader, name)?.is_some_and(|value| value != 0))
}

/// 获取十六进制颜色属性值。
pub(super) fn get_color_attribute(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    name: &[u8],
) -> Result<Option<Color>, ConvertError> {
    get_string_attribute(e, reader, name)?
        .map(|value| Color::from_html(&value))
        .transpose()
}
