//! # 文字分类工具
//!
//! 用于判断字符是否属于"高字形"文字（CJK、假名、谚文等全角文字）。
//! 这类字符的字形高度与拉丁字母不同，背景框对齐需要据此选择断行位置。

/// 字符是否落在 CJK／假名／谚文／全角形式等高字形区段内。
#[must_use]
pub const fn is_tall_script_char(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'   // 谚文字母
        | '\u{2E80}'..='\u{303F}' // CJK 部首、康熙部首与标点
        | '\u{3040}'..='\u{30FF}' // 平假名、片假名
        | '\u{3130}'..='\u{318F}' // 谚文兼容字母
        | '\u{3400}'..='\u{4DBF}' // CJK 扩展 A
        | '\u{4E00}'..='\u{9FFF}' // CJK 统一表意文字
        | '\u{AC00}'..='\u{D7AF}' // 谚文音节
        | '\u{F900}'..='\u{FAFF}' // CJK 兼容表意文字
        | '\u{FF00}'..='\u{FFEF}' // 全角及半角形式
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_script_membership() {
        assert!(is_tall_script_char('你'));
        assert!(is_tall_script_char('漢'));
        assert!(is_tall_script_char('あ'));
        assert!(is_tall_script_char('カ'));
        assert!(is_tall_script_char('한'));
        assert!(is_tall_script_char('Ａ')); // 全角拉丁

        assert!(!is_tall_script_char('A'));
        assert!(!is_tall_script_char('1'));
        assert!(!is_tall_script_char(' '));
        assert!(!is_tall_script_char('é'));
        assert!(!is_tall_script_char('\u{200B}'));
    }
}
