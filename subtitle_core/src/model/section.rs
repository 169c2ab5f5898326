//! # 行内样式分段

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::color::Color;

/// 阴影类型。
///
/// 枚举声明顺序即多阴影展开时的固定优先级（派生的 `Ord` 依赖该顺序），
/// 平台 `et` 编号与优先级无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum ShadowType {
    SoftShadow,
    HardShadow,
    Bevel,
    Glow,
}

impl ShadowType {
    /// 平台 `et` 属性编号。
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::HardShadow => 1,
            Self::Bevel => 2,
            Self::Glow => 3,
            Self::SoftShadow => 4,
        }
    }

    /// 从平台 `et` 编号解析阴影类型。
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::iter().find(|shadow| shadow.id() == id)
    }
}

/// 文本基线偏移方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetType {
    Subscript,
    #[default]
    Regular,
    Superscript,
}

impl OffsetType {
    /// 平台 `of` 属性编号。
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Subscript => 0,
            Self::Regular => 1,
            Self::Superscript => 2,
        }
    }

    /// 从平台 `of` 编号解析偏移方式。
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Subscript),
            1 => Some(Self::Regular),
            2 => Some(Self::Superscript),
            _ => None,
        }
    }
}

/// 注音（ruby）标注中的角色。平台编号不连续：3 未被使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RubyPart {
    #[default]
    None,
    /// 被注音的正文。
    Base,
    /// 括号（不支持注音的客户端显示为括号内文本）。
    Parenthesis,
    /// 注音显示在正文上方。
    RubyAbove,
    /// 注音显示在正文下方。
    RubyBelow,
}

impl RubyPart {
    /// 平台 `rb` 属性编号。
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Base => 1,
            Self::Parenthesis => 2,
            Self::RubyAbove => 4,
            Self::RubyBelow => 5,
        }
    }

    /// 从平台 `rb` 编号解析注音角色。
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::None),
            1 => Some(Self::Base),
            2 => Some(Self::Parenthesis),
            4 => Some(Self::RubyAbove),
            5 => Some(Self::RubyBelow),
            _ => None,
        }
    }
}

/// 行内一段连续的同样式文本。
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// 文本内容，可包含换行符。
    pub text: String,
    /// 相对行起始时间的偏移（毫秒），用于卡拉OK式逐段显示。
    pub start_offset_ms: i64,
    /// 字体名。
    pub font: String,
    /// 字号缩放，1.0 为 100%。
    pub scale: f32,
    /// 上下标偏移方式。
    pub offset: OffsetType,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// 前景色（含透明度）。
    pub fore_color: Color,
    /// 背景色。透明度 0 表示没有背景框。
    pub back_color: Color,
    /// 阴影类型到阴影颜色的映射。写出前最多允许保留一项。
    pub shadow_colors: BTreeMap<ShadowType, Color>,
    /// 注音角色。
    pub ruby_part: RubyPart,
    /// 紧排（去除字间距）标志。
    pub packed: bool,
}

impl Section {
    /// 创建一个使用默认样式的分段。
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_offset_ms: 0,
            font: "Roboto".to_string(),
            scale: 1.0,
            offset: OffsetType::default(),
            bold: false,
            italic: false,
            underline: false,
            fore_color: Color::rgb(255, 255, 255),
            back_color: Color::rgba(0, 0, 0, 0),
            shadow_colors: BTreeMap::new(),
            ruby_part: RubyPart::default(),
            packed: false,
        }
    }

    /// 两个分段除文本和起始偏移外的样式是否完全一致。
    #[must_use]
    pub fn has_identical_formatting(&self, other: &Self) -> bool {
        self.font == other.font
            && self.scale == other.scale
            && self.offset == other.offset
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.fore_color == other.fore_color
            && self.back_color == other.back_color
            && self.shadow_colors == other.shadow_colors
            && self.ruby_part == other.ruby_part
            && self.packed == other.packed
    }
}
