//! # 平台数值换算
//!
//! YTT 的坐标、字号和字体都经过目标平台自身的有损量化。
//! 这里集中放置读写两侧共用的换算函数，保证互为反函数。

use subtitle_core::{AnchorPoint, Line, VerticalTextType};

/// 写出器用来维持行高一致、规避服务器属性剥离的标记字符。
pub(crate) const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// 阴影的平台默认灰色。合法化时该颜色的透明度跟随前景透明度，
/// 避免为同一种渲染效果生成多余的画笔定义。
pub(crate) const DEFAULT_SHADOW_RGB: (u8, u8, u8) = (0x22, 0x22, 0x22);

/// 像素坐标换算为平台百分比坐标。
///
/// 平台实际显示的位置是 `2 + 0.96 × 指定值`（边缘规避平移），
/// 这里预先施加反变换，使显示位置与请求的像素位置一致。
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn platform_coord_from_pixel(pixel: i32, extent: i32) -> i32 {
    let percentage = f64::from(pixel) * 100.0 / f64::from(extent);
    let corrected = (percentage - 2.0) / 0.96;
    (corrected.round() as i32).clamp(0, 100)
}

/// 平台百分比坐标还原为像素坐标。
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn pixel_from_platform_coord(coord: i32, extent: i32) -> i32 {
    let percentage = 0.96 * f64::from(coord) + 2.0;
    (percentage / 100.0 * f64::from(extent)).round() as i32
}

/// 实数字号缩放换算为平台 `sz` 值。
///
/// 平台侧的解读是 `real = 1 + (sz/100 − 1)/4`，这里取其反函数；
/// 低于 0.75 的缩放在平台上无法表示，钳制到 0。
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn platform_scale_from_real(scale: f32) -> i32 {
    let expanded = (4.0f32.mul_add(scale - 1.0, 1.0)).max(0.0);
    f64::from(100.0 * expanded).round() as i32
}

/// 平台 `sz` 值还原为实数字号缩放。
#[allow(clippy::cast_precision_loss)]
pub(crate) fn real_scale_from_platform(sz: i32) -> f32 {
    1.0 + (sz as f32 / 100.0 - 1.0) / 4.0
}

/// 平台字体样式编号（`fs` 属性，0-7 固定查找表）。未知字体归入默认 0。
pub(crate) fn font_style_id(font: &str) -> u8 {
    match font.trim().to_ascii_lowercase().as_str() {
        "courier new" | "courier" | "nimbus mono l" | "cutive mono" => 1,
        "times new roman" | "georgia" | "cambria" | "pt serif caption" => 2,
        "deja vu sans mono" | "dejavu sans mono" | "lucida console" | "monaco" | "consolas" => 3,
        "roboto" | "arial" | "helvetica" | "verdana" | "pt sans caption" => 4,
        "comic sans ms" | "comic sans" => 5,
        "monotype corsiva" | "corsiva" | "urw chancery l" => 6,
        "carrois gothic sc" => 7,
        _ => 0,
    }
}

/// 平台字体样式编号对应的规范字体名。
pub(crate) const fn font_name_from_style_id(id: u8) -> &'static str {
    match id {
        1 => "Courier New",
        2 => "Times New Roman",
        3 => "Deja Vu Sans Mono",
        5 => "Comic Sans MS",
        6 => "Monotype Corsiva",
        7 => "Carrois Gothic SC",
        _ => "Roboto",
    }
}

/// 由锚点所在列推导文本对齐编号（`ju` 属性）：左 0、右 1、居中 2。
pub(crate) const fn justification_id(anchor: AnchorPoint) -> u8 {
    match anchor {
        AnchorPoint::TopLeft | AnchorPoint::MiddleLeft | AnchorPoint::BottomLeft => 0,
        AnchorPoint::TopRight | AnchorPoint::MiddleRight | AnchorPoint::BottomRight => 1,
        AnchorPoint::TopCenter | AnchorPoint::MiddleCenter | AnchorPoint::BottomCenter => 2,
    }
}

/// 竖排方向对应的 `pd`（书写方向）与 `sd`（行进方向）属性；横排不写这两个属性。
pub(crate) const fn print_direction_attrs(vertical: VerticalTextType) -> Option<(u8, u8)> {
    match vertical {
        VerticalTextType::None => None,
        VerticalTextType::VerticalRtl => Some((2, 0)),
        VerticalTextType::VerticalLtr => Some((2, 1)),
        VerticalTextType::RotatedLtr => Some((3, 0)),
        VerticalTextType::RotatedRtl => Some((3, 1)),
    }
}

/// 从 `pd`/`sd` 属性还原竖排方向。无法识别的组合按横排处理。
pub(crate) const fn vertical_type_from_attrs(pd: u8, sd: u8) -> VerticalTextType {
    match (pd, sd) {
        (2, 1) => VerticalTextType::VerticalLtr,
        (2, _) => VerticalTextType::VerticalRtl,
        (3, 1) => VerticalTextType::RotatedRtl,
        (3, _) => VerticalTextType::RotatedLtr,
        _ => VerticalTextType::None,
    }
}

/// 锚点的默认平台坐标（行没有显式位置时使用）。
pub(crate) const fn default_platform_coords(anchor: AnchorPoint) -> (i32, i32) {
    let ah = match anchor {
        AnchorPoint::TopLeft | AnchorPoint::MiddleLeft | AnchorPoint::BottomLeft => 0,
        AnchorPoint::TopCenter | AnchorPoint::MiddleCenter | AnchorPoint::BottomCenter => 50,
        _ => 100,
    };
    let av = match anchor {
        AnchorPoint::TopLeft | AnchorPoint::TopCenter | AnchorPoint::TopRight => 0,
        AnchorPoint::MiddleLeft | AnchorPoint::MiddleCenter | AnchorPoint::MiddleRight => 50,
        _ => 100,
    };
    (ah, av)
}

/// 行最终落到屏幕上的位置：锚点编号加上取整后的平台坐标。
/// 两条行在此投影下相等即视为位置等价。
pub(crate) fn resolve_position(line: &Line, video_width: i32, video_height: i32) -> (u8, i32, i32) {
    match line.position {
        Some((x, y)) => (
            line.anchor.id(),
            platform_coord_from_pixel(x, video_width),
            platform_coord_from_pixel(y, video_height),
        ),
        None => {
            let (ah, av) = default_platform_coords(line.anchor);
            (line.anchor.id(), ah, av)
        }
    }
}
