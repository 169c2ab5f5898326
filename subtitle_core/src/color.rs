//! # 颜色工具
//!
//! 提供带透明度的 RGB 颜色类型，以及感知亮度相关的辅助函数。
//! 暗色判定和提亮用于补偿 Android 客户端忽略透明度的渲染缺陷。

use crate::error::ConvertError;

/// 带透明度的 RGB 颜色。`a == 0` 表示完全透明（背景色时视为不存在）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// 创建一个不透明颜色。
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 创建一个带透明度的颜色。
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 返回替换透明度后的副本。
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// 解析 `#RRGGBB` 或 `RRGGBB` 形式的十六进制颜色。
    ///
    /// # Errors
    ///
    /// 输入不是 6 位十六进制数时返回 `ConvertError::InvalidColor`。
    pub fn from_html(value: &str) -> Result<Self, ConvertError> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidColor(value.to_string()));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self::rgb(r, g, b))
    }

    /// 格式化为 `#RRGGBB`。透明度单独通过 `fo`/`bo` 属性传输，从不写入。
    #[must_use]
    pub fn to_html(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// BT.709 加权的整数亮度，范围 0-255。
    #[must_use]
    pub fn luminance(self) -> u8 {
        let weighted = 2126 * u32::from(self.r) + 7152 * u32::from(self.g) + 722 * u32::from(self.b);
        u8::try_from(weighted / 10000).unwrap_or(255)
    }

    /// 颜色在感知上是否偏暗。
    #[must_use]
    pub fn is_dark(self) -> bool {
        self.luminance() < 64
    }

    /// 将颜色提亮到高亮度区间，保持各通道的相对大小，不改变透明度。
    #[must_use]
    pub const fn brightened(self) -> Self {
        Self {
            r: self.r / 3 + 170,
            g: self.g / 3 + 170,
            b: self.b / 3 + 170,
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html() {
        assert_eq!(Color::from_html("#FFFFFF").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::from_html("080808").unwrap(), Color::rgb(8, 8, 8));
        assert_eq!(Color::from_html("#1a2B3c").unwrap(), Color::rgb(0x1A, 0x2B, 0x3C));

        assert!(matches!(
            Color::from_html("#FFF"),
            Err(ConvertError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::from_html("#GGGGGG"),
            Err(ConvertError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::from_html(""),
            Err(ConvertError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_to_html() {
        assert_eq!(Color::rgb(255, 255, 255).to_html(), "#FFFFFF");
        assert_eq!(Color::rgba(8, 8, 8, 0).to_html(), "#080808");
        assert_eq!(Color::rgb(0x1A, 0x2B, 0x3C).to_html(), "#1A2B3C");
    }

    #[test]
    fn test_is_dark() {
        assert!(Color::rgb(0, 0, 0).is_dark());
        assert!(Color::rgb(0x22, 0x22, 0x22).is_dark());
        assert!(Color::rgb(0x80, 0, 0).is_dark()); // 深红
        assert!(!Color::rgb(255, 255, 255).is_dark());
        assert!(!Color::rgb(0, 255, 0).is_dark()); // 绿色通道权重高
        assert!(!Color::rgb(0x80, 0x80, 0x80).is_dark());
    }

    #[test]
    fn test_brightened() {
        let bright = Color::rgb(0, 0, 0).brightened();
        assert!(!bright.is_dark());
        assert_eq!(bright, Color::rgb(170, 170, 170));

        // 提亮保持透明度与通道顺序
        let c = Color::rgba(30, 60, 90, 7).brightened();
        assert_eq!(c.a, 7);
        assert!(c.r < c.g && c.g < c.b);
    }
}
