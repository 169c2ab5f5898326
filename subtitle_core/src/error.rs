use std::{io, num};

use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

/// 定义字幕转换和处理过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// XML 解析或生成错误，通常来自 `quick-xml` 库。
    #[error("XML 错误: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// XML 属性解析错误，通常来自 `quick-xml` 库。
    #[error("XML 属性错误: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// 整数属性解析错误。
    #[error("解析整数错误: {0}")]
    ParseInt(#[from] num::ParseIntError),
    /// 浮点数属性解析错误。
    #[error("解析浮点数错误: {0}")]
    ParseFloat(#[from] num::ParseFloatError),
    /// 无效的颜色值。
    #[error("无效的颜色值: {0}")]
    InvalidColor(String),
    /// 输入不符合预期的文档结构。
    #[error("无效的文档格式: {0}")]
    InvalidFormat(String),
    /// 内部不变量被破坏，说明增强管线存在缺陷，不可恢复。
    #[error("内部不变量被破坏: {0}")]
    InvariantViolation(String),
    /// 文件读写等 IO 错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
    /// 从字节序列转换为 UTF-8 字符串失败。
    #[error("UTF-8 转换错误: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
    /// XML 文本编码或解码错误。
    #[error("文本编码或解码错误: {0}")]
    Encoding(#[from] EncodingError),
}

impl From<ConvertError> for std::io::Error {
    fn from(err: ConvertError) -> Self {
        std::io::Error::other(err)
    }
}
