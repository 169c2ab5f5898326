//! # 写出侧的去重属性表
//!
//! 位置、窗口样式和画笔在整个文档范围内按归一化投影去重，
//! 相同的组合共享一个 XML 定义。每张表的 0 号位是一条
//! 合成的占位默认定义：有客户端会忽略第一条定义上的属性，
//! 真实定义从 1 号开始编号。

use std::collections::HashMap;
use std::hash::Hash;

use subtitle_core::{Color, ConvertError, Line, OffsetType, Section};

use crate::platform;

/// 保序去重表。0 号位的默认项不参与去重，真实键永远拿到 ≥1 的编号。
#[derive(Debug)]
pub(super) struct Table<K> {
    entries: Vec<K>,
    ids: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Table<K> {
    fn with_default(default: K) -> Self {
        Self {
            entries: vec![default],
            ids: HashMap::new(),
        }
    }

    fn intern(&mut self, key: K) -> usize {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.entries.len();
        self.entries.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    pub(super) fn entries(&self) -> &[K] {
        &self.entries
    }
}

/// 位置等价：锚点编号与取整后的平台坐标都相同。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct PositionKey {
    pub(super) ap: u8,
    pub(super) ah: i32,
    pub(super) av: i32,
}

impl Default for PositionKey {
    fn default() -> Self {
        Self {
            ap: 7,
            ah: 50,
            av: 100,
        }
    }
}

/// 窗口样式等价：对齐类别与竖排方向相同。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct WindowStyleKey {
    pub(super) ju: u8,
    /// `pd`/`sd` 属性对；横排不写这两个属性。
    pub(super) direction: Option<(u8, u8)>,
}

impl Default for WindowStyleKey {
    fn default() -> Self {
        Self {
            ju: 2,
            direction: None,
        }
    }
}

/// 画笔等价：全部渲染属性经过平台量化后相同。
/// 量化前不同但落到同一渲染效果的分段共享一支画笔。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct PenKey {
    pub(super) font_style: u8,
    pub(super) scale: i32,
    pub(super) offset: OffsetType,
    pub(super) bold: bool,
    pub(super) italic: bool,
    pub(super) underline: bool,
    pub(super) fore: Color,
    pub(super) back: Color,
    /// 阴影类型编号与颜色分量；线格式没有阴影透明度。
    pub(super) shadow: Option<(u8, (u8, u8, u8))>,
    pub(super) ruby: u8,
    pub(super) packed: bool,
}

impl Default for PenKey {
    fn default() -> Self {
        Self {
            font_style: 0,
            scale: 100,
            offset: OffsetType::Regular,
            bold: false,
            italic: false,
            underline: false,
            fore: Color::rgba(255, 255, 255, 254),
            back: Color::rgba(0, 0, 0, 0),
            shadow: None,
            ruby: 0,
            packed: false,
        }
    }
}

impl PenKey {
    pub(super) fn from_section(section: &Section) -> Result<Self, ConvertError> {
        if section.shadow_colors.len() > 1 {
            return Err(ConvertError::InvariantViolation(format!(
                "分段 {:?} 在写出时仍带有 {} 种阴影",
                section.text,
                section.shadow_colors.len()
            )));
        }
        let shadow = section
            .shadow_colors
            .iter()
            .next()
            .map(|(shadow_type, color)| (shadow_type.id(), (color.r, color.g, color.b)));
        Ok(Self {
            font_style: platform::font_style_id(&section.font),
            scale: platform::platform_scale_from_real(section.scale),
            offset: section.offset,
            bold: section.bold,
            italic: section.italic,
            underline: section.underline,
            fore: section.fore_color,
            back: section.back_color,
            shadow,
            ruby: section.ruby_part.id(),
            packed: section.packed,
        })
    }
}

#[derive(Debug)]
pub(super) struct AttributeTables {
    pub(super) positions: Table<PositionKey>,
    pub(super) window_styles: Table<WindowStyleKey>,
    pub(super) pens: Table<PenKey>,
}

/// 一条行在三张表中解析出的引用编号。
#[derive(Debug)]
pub(super) struct LineRefs {
    pub(super) wp: usize,
    pub(super) ws: usize,
    /// 与行内分段一一对应的画笔编号。
    pub(super) pens: Vec<usize>,
}

/// 扫描全部行，建表并记录每条行的引用编号。
pub(super) fn build_tables(
    lines: &[Line],
    video_width: i32,
    video_height: i32,
) -> Result<(AttributeTables, Vec<LineRefs>), ConvertError> {
    let mut tables = AttributeTables {
        positions: Table::with_default(PositionKey::default()),
        window_styles: Table::with_default(WindowStyleKey::default()),
        pens: Table::with_default(PenKey::default()),
    };
    let mut refs = Vec::with_capacity(lines.len());

    for line in lines {
        let (ap, ah, av) = platform::resolve_position(line, video_width, video_height);
        let wp = tables.positions.intern(PositionKey { ap, ah, av });
        let ws = tables.window_styles.intern(WindowStyleKey {
            ju: platform::justification_id(line.anchor),
            direction: platform::print_direction_attrs(line.vertical_text_type),
        });
        let pens = line
            .sections
            .iter()
            .map(|section| PenKey::from_section(section).map(|key| tables.pens.intern(key)))
            .collect::<Result<Vec<_>, _>>()?;
        refs.push(LineRefs { wp, ws, pens });
    }

    Ok((tables, refs))
}
