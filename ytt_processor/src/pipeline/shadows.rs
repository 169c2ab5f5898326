//! # 多重阴影展开
//!
//! 目标格式的每个画笔只能携带一种阴影。使用了多种阴影的行
//! 在此拆成若干条堆叠的副本行，每条副本每个分段只保留一种阴影。

use subtitle_core::Line;

/// 按分段中阴影种类的最大数量拆行。
///
/// 第 k 条副本保留每个分段按优先级排序（软阴影、硬阴影、浮雕、辉光）
/// 的第 k 种阴影；k > 0 的副本清除背景色，避免背景框叠加加深。
pub(super) fn expand_multi_shadow_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut result = Vec::with_capacity(lines.len());
    for line in lines {
        let layer_count = line
            .sections
            .iter()
            .map(|section| section.shadow_colors.len())
            .max()
            .unwrap_or(0);
        if layer_count <= 1 {
            result.push(line);
            continue;
        }

        for layer in 0..layer_count {
            let mut clone = line.clone();
            for section in &mut clone.sections {
                let kept = section
                    .shadow_colors
                    .iter()
                    .nth(layer)
                    .map(|(shadow_type, color)| (*shadow_type, *color));
                section.shadow_colors = kept.into_iter().collect();
                if layer > 0 {
                    section.back_color.a = 0;
                }
            }
            result.push(clone);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtitle_core::{Color, Section, ShadowType};

    #[test]
    fn test_expansion_count_and_priority() {
        let mut section = Section::new("text");
        section.back_color = Color::rgba(8, 8, 8, 254);
        section.shadow_colors.insert(ShadowType::Glow, Color::rgb(1, 1, 1));
        section
            .shadow_colors
            .insert(ShadowType::SoftShadow, Color::rgb(2, 2, 2));
        section
            .shadow_colors
            .insert(ShadowType::Bevel, Color::rgb(3, 3, 3));
        let mut line = Line::new(0, 1000);
        line.sections = vec![section];

        let lines = expand_multi_shadow_lines(vec![line]);
        assert_eq!(lines.len(), 3);
        // 副本按固定优先级各保留一种阴影
        let kept: Vec<ShadowType> = lines
            .iter()
            .map(|line| *line.sections[0].shadow_colors.keys().next().unwrap())
            .collect();
        assert_eq!(
            kept,
            vec![ShadowType::SoftShadow, ShadowType::Bevel, ShadowType::Glow]
        );
        // 第一条之外的副本背景透明
        assert_eq!(lines[0].sections[0].back_color.a, 254);
        assert_eq!(lines[1].sections[0].back_color.a, 0);
        assert_eq!(lines[2].sections[0].back_color.a, 0);
        for line in &lines {
            assert!(line.sections.iter().all(|s| s.shadow_colors.len() <= 1));
        }
    }

    #[test]
    fn test_sections_with_fewer_shadows_run_out() {
        let mut rich = Section::new("rich");
        rich.shadow_colors
            .insert(ShadowType::HardShadow, Color::rgb(1, 1, 1));
        rich.shadow_colors.insert(ShadowType::Glow, Color::rgb(2, 2, 2));
        let mut poor = Section::new("poor");
        poor.shadow_colors
            .insert(ShadowType::Bevel, Color::rgb(3, 3, 3));
        let mut line = Line::new(0, 1000);
        line.sections = vec![rich, poor];

        let lines = expand_multi_shadow_lines(vec![line]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].sections[0].shadow_colors.len(), 1);
        // 阴影较少的分段在后续副本中不再携带阴影
        assert!(lines[1].sections[1].shadow_colors.is_empty());
    }

    #[test]
    fn test_single_shadow_line_untouched() {
        let mut section = Section::new("text");
        section
            .shadow_colors
            .insert(ShadowType::HardShadow, Color::rgb(1, 1, 1));
        let mut line = Line::new(0, 1000);
        line.sections = vec![section];

        let lines = expand_multi_shadow_lines(vec![line.clone()]);
        assert_eq!(lines, vec![line]);
    }
}
