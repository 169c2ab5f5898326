//! # 字幕行及其定位属性

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::section::Section;

/// 九宫格锚点。平台编号按行优先排列为 0-8。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum AnchorPoint {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl AnchorPoint {
    /// 平台 `ap` 属性编号。
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// 从平台 `ap` 编号解析锚点，超出 0-8 时返回 `None`。
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::iter().find(|anchor| anchor.id() == id)
    }
}

/// 竖排文本方向。通过 `pd`（书写方向）与 `sd`（行进方向）两个属性编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalTextType {
    /// 常规横排。
    #[default]
    None,
    /// 竖排，列从右向左。
    VerticalRtl,
    /// 竖排，列从左向右。
    VerticalLtr,
    /// 逆时针旋转 90°，从左向右。
    RotatedLtr,
    /// 逆时针旋转 90°，从右向左。
    RotatedRtl,
}

/// 一条字幕行：时间区间、定位方式和一串样式分段。
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 起始时间（毫秒）。写出前允许为非正值，由写出器修正。
    pub start_ms: i64,
    /// 结束时间（毫秒）。`end > start` 在写出时强制，构造时不检查。
    pub end_ms: i64,
    /// 锚点。
    pub anchor: AnchorPoint,
    /// 绝对像素位置。`None` 表示使用该锚点的默认位置。
    pub position: Option<(i32, i32)>,
    /// 竖排方向。
    pub vertical_text_type: VerticalTextType,
    /// 行内的样式分段，按显示顺序排列，由行独占所有权。
    pub sections: Vec<Section>,
    /// 是否允许对该行使用"Android 暗色文字"复制补偿。
    pub android_dark_text_hack_allowed: bool,
}

impl Line {
    /// 创建一条空行，锚点与竖排方向取默认值。
    #[must_use]
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self {
            start_ms,
            end_ms,
            anchor: AnchorPoint::default(),
            position: None,
            vertical_text_type: VerticalTextType::default(),
            sections: Vec::new(),
            android_dark_text_hack_allowed: true,
        }
    }

    /// 所有分段拼接后的完整文本。
    #[must_use]
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(|section| section.text.as_str())
            .collect()
    }
}
