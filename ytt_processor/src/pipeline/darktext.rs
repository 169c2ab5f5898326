//! # Android 暗色文字补偿
//!
//! Android 客户端忽略前景透明度。给暗色文字行紧跟着插入一条
//! 全透明、颜色提亮的副本：其他平台看不到副本，Android 上
//! 副本以亮色盖住暗色文字，两边都得到可读的结果。

use subtitle_core::Line;

pub(super) fn duplicate_dark_text_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut result = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();
    while let Some(line) = iter.next() {
        let needs_ghost = line.android_dark_text_hack_allowed
            && line
                .sections
                .iter()
                .any(|section| section.fore_color.a > 0 && section.fore_color.is_dark());
        // 已有副本跟随时不再生成，保证重复处理安全
        if needs_ghost && !iter.peek().is_some_and(|next| is_transparent_twin(&line, next)) {
            let ghost = make_ghost(&line);
            result.push(line);
            result.push(ghost);
        } else {
            result.push(line);
        }
    }
    result
}

/// 判断 `candidate` 是否是 `original` 的全透明副本：
/// 时间范围与文本一致且所有分段前景透明度为 0。
pub(super) fn is_transparent_twin(original: &Line, candidate: &Line) -> bool {
    candidate.start_ms == original.start_ms
        && candidate.end_ms == original.end_ms
        && !candidate.sections.is_empty()
        && candidate
            .sections
            .iter()
            .all(|section| section.fore_color.a == 0)
        && candidate.text() == original.text()
}

fn make_ghost(line: &Line) -> Line {
    let mut ghost = line.clone();
    ghost.android_dark_text_hack_allowed = false;
    for section in &mut ghost.sections {
        if section.fore_color.is_dark() {
            section.fore_color = section.fore_color.brightened();
        }
        section.fore_color.a = 0;
        section.back_color.a = 0;
        section.shadow_colors.clear();
    }
    ghost
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtitle_core::{Color, Section, ShadowType};

    fn dark_line() -> Line {
        let mut section = Section::new("dark");
        section.fore_color = Color::rgba(16, 16, 16, 254);
        section.back_color = Color::rgba(8, 8, 8, 254);
        section
            .shadow_colors
            .insert(ShadowType::HardShadow, Color::rgb(0, 0, 0));
        let mut line = Line::new(1000, 3000);
        line.sections = vec![section];
        line
    }

    #[test]
    fn test_dark_line_gets_transparent_ghost() {
        let lines = duplicate_dark_text_lines(vec![dark_line()]);
        assert_eq!(lines.len(), 2);

        let ghost = &lines[1];
        assert_eq!(ghost.start_ms, 1000);
        assert_eq!(ghost.end_ms, 3000);
        assert!(!ghost.android_dark_text_hack_allowed);
        let section = &ghost.sections[0];
        assert_eq!(section.text, "dark");
        assert_eq!(section.fore_color.a, 0);
        assert_eq!(section.back_color.a, 0);
        assert!(section.shadow_colors.is_empty());
        // 暗色被提亮，Android 上以亮色显示
        assert!(!section.fore_color.is_dark());
    }

    #[test]
    fn test_duplication_is_idempotent() {
        let once = duplicate_dark_text_lines(vec![dark_line()]);
        let twice = duplicate_dark_text_lines(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_disallowed_line_is_untouched() {
        let mut line = dark_line();
        line.android_dark_text_hack_allowed = false;
        let lines = duplicate_dark_text_lines(vec![line]);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_bright_line_is_untouched() {
        let mut line = Line::new(0, 1000);
        line.sections = vec![Section::new("bright")];
        let lines = duplicate_dark_text_lines(vec![line]);
        assert_eq!(lines.len(), 1);
    }
}
