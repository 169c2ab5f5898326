//! # 与格式无关的字幕文档模型
//!
//! 所有编解码器共享的内存表示：文档拥有按插入顺序排列的行，
//! 行拥有各自的样式分段。位置换算统一以文档的参考画布尺寸为基准。

mod line;
mod section;

pub use line::{AnchorPoint, Line, VerticalTextType};
pub use section::{OffsetType, RubyPart, Section, ShadowType};

/// 一个完整的字幕文档。
///
/// 行的顺序是渲染插入顺序，不保证按时间排列。
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// 按插入顺序排列的字幕行。
    pub lines: Vec<Line>,
    /// 参考画布宽度（像素），所有位置换算以此为基准。
    pub video_width: i32,
    /// 参考画布高度（像素）。
    pub video_height: i32,
}

impl Document {
    /// 默认参考画布宽度。
    pub const DEFAULT_WIDTH: i32 = 1280;
    /// 默认参考画布高度。
    pub const DEFAULT_HEIGHT: i32 = 720;

    /// 创建一个指定画布尺寸的空文档。
    #[must_use]
    pub const fn new(video_width: i32, video_height: i32) -> Self {
        Self {
            lines: Vec::new(),
            video_width,
            video_height,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
