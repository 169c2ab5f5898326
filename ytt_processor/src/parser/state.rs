//! # 解析器的状态机和数据结构

use subtitle_core::{AnchorPoint, Section, VerticalTextType};
use tracing::warn;

/// 稀疏编号的定义表。
///
/// 头部定义可能乱序到达且编号有空洞，空洞用 `None` 占位；
/// 缺失或越界的引用回退到默认值，从不作为错误向上传播。
#[derive(Debug)]
pub(super) struct DefinitionArena<T> {
    slots: Vec<Option<T>>,
    kind: &'static str,
}

impl<T: Clone + Default> DefinitionArena<T> {
    pub(super) const fn new(kind: &'static str) -> Self {
        Self {
            slots: Vec::new(),
            kind,
        }
    }

    /// 登记一个定义，必要时扩容并以空洞填充中间编号。
    pub(super) fn insert(&mut self, id: usize, value: T) {
        if self.slots.len() <= id {
            self.slots.resize_with(id + 1, || None);
        }
        self.slots[id] = Some(value);
    }

    /// 解析一个引用。`None`（属性缺失）静默使用默认值，
    /// 越界或指向空洞的编号记录一条警告后使用默认值。
    pub(super) fn resolve(&self, id: Option<usize>) -> T {
        let Some(id) = id else {
            return T::default();
        };
        self.slots
            .get(id)
            .and_then(Option::as_ref)
            .cloned()
            .unwrap_or_else(|| {
                warn!("引用了未定义的{}编号 {id}，使用默认值", self.kind);
                T::default()
            })
    }
}

/// `<wp>` 定义解析后的结果。
#[derive(Debug, Clone, Default)]
pub(super) struct PositionDef {
    pub(super) anchor: AnchorPoint,
    /// 像素坐标；`None` 表示定义未给出坐标，使用锚点默认位置。
    pub(super) pixel: Option<(i32, i32)>,
}

/// `<ws>` 定义解析后的结果。对齐方式写出时由锚点推导，读入时忽略。
#[derive(Debug, Clone, Default)]
pub(super) struct WindowStyleDef {
    pub(super) vertical_text_type: VerticalTextType,
}

/// `<pen>` 定义即一个没有文本的分段原型。
#[derive(Debug, Clone)]
pub(super) struct PenDef(pub(super) Section);

impl Default for PenDef {
    fn default() -> Self {
        Self(Section::new(""))
    }
}

/// 当前打开的 `<s>` 子元素的上下文。
#[derive(Debug)]
pub(super) struct OpenSpan {
    pub(super) pen: Section,
    pub(super) start_offset_ms: i64,
}

/// 正在解析的 `<p>` 元素的累积数据。
#[derive(Debug)]
pub(super) struct CurrentParagraph {
    pub(super) start_ms: i64,
    pub(super) end_ms: i64,
    pub(super) position: PositionDef,
    pub(super) window_style: WindowStyleDef,
    pub(super) pen: Section,
    pub(super) sections: Vec<Section>,
    pub(super) open_span: Option<OpenSpan>,
    /// 当前文本段的累积缓冲，实体引用也拼接到这里。
    pub(super) text_buffer: String,
}

/// 主解析器状态机。
#[derive(Debug)]
pub(super) struct YttParserState {
    pub(super) video_width: i32,
    pub(super) video_height: i32,
    pub(super) in_head: bool,
    pub(super) in_body: bool,
    pub(super) in_p: bool,
    pub(super) positions: DefinitionArena<PositionDef>,
    pub(super) window_styles: DefinitionArena<WindowStyleDef>,
    pub(super) pens: DefinitionArena<PenDef>,
    pub(super) current_p: Option<CurrentParagraph>,
}

impl YttParserState {
    pub(super) const fn new(video_width: i32, video_height: i32) -> Self {
        Self {
            video_width,
            video_height,
            in_head: false,
            in_body: false,
            in_p: false,
            positions: DefinitionArena::new("位置 (wp) "),
            window_styles: DefinitionArena::new("窗口样式 (ws) "),
            pens: DefinitionArena::new("画笔 (pen) "),
            current_p: None,
        }
    }
}
