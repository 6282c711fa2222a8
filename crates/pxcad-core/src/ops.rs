//! 场景级操作：批量裁剪与裁剪预览

use crate::clip::{clip, ClipAlgorithm};
use crate::geometry::{Line, Rect};
use crate::scene::Scene;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// 裁剪结果统计（只统计参与裁剪的线段）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSummary {
    pub kept: usize,
    pub removed: usize,
}

/// 参与裁剪的线段：空集合或 None 表示全部线段
fn is_candidate(selected: Option<&BTreeSet<usize>>, index: usize) -> bool {
    match selected {
        Some(set) if !set.is_empty() => set.contains(&index),
        _ => true,
    }
}

/// 破坏性地裁剪场景中的线段
///
/// 非候选线段原样保留并保持顺序；被完全裁掉的线段删除；其余线段替换端点、保留算法标记。
/// 线段列表整体替换，调用者之后需要清理或清空选择集。
pub fn clip_lines(
    scene: &mut Scene,
    rect: Rect,
    algorithm: ClipAlgorithm,
    selected: Option<&BTreeSet<usize>>,
) -> ClipSummary {
    let mut summary = ClipSummary::default();
    let mut lines: Vec<Line> = Vec::with_capacity(scene.lines.len());

    for (i, line) in scene.lines.iter().enumerate() {
        if !is_candidate(selected, i) {
            lines.push(*line);
            continue;
        }
        match clip(line.p0, line.p1, rect, algorithm) {
            Some((p0, p1)) => {
                lines.push(line.with_endpoints(p0, p1));
                summary.kept += 1;
            }
            None => {
                debug!("Line {} removed by {} clip", i, algorithm.id());
                summary.removed += 1;
            }
        }
    }

    scene.lines = lines;
    info!(
        "{} clip to {}: kept {}, removed {}",
        algorithm.id(),
        rect,
        summary.kept,
        summary.removed
    );
    summary
}

/// 非破坏性预览：返回候选线段裁剪后的结果，用于叠加绘制
pub fn preview_clip_lines(
    scene: &Scene,
    rect: Rect,
    algorithm: ClipAlgorithm,
    selected: Option<&BTreeSet<usize>>,
) -> Vec<Line> {
    scene
        .lines
        .iter()
        .enumerate()
        .filter(|(i, _)| is_candidate(selected, *i))
        .filter_map(|(_, line)| {
            clip(line.p0, line.p1, rect, algorithm).map(|(p0, p1)| line.with_endpoints(p0, p1))
        })
        .collect()
}

/// 裁剪当前选中的线段（无选中时裁剪全部），然后清空线段选择
pub fn clip_selected_lines(
    scene: &mut Scene,
    selection: &mut Selection,
    rect: Rect,
    algorithm: ClipAlgorithm,
) -> ClipSummary {
    let summary = clip_lines(scene, rect, algorithm, Some(&selection.lines));
    selection.lines.clear();
    selection.sanitize(scene);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, LineAlgorithm, Point};

    fn line(x0: i32, y0: i32, x1: i32, y1: i32, algo: LineAlgorithm) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1), algo)
    }

    /// 5 条线段：2 条完全在外，3 条穿过窗口
    fn five_lines() -> Scene {
        let mut scene = Scene::new();
        scene.add_line(line(-10, 5, 20, 5, LineAlgorithm::Dda));
        scene.add_line(line(100, 100, 200, 200, LineAlgorithm::Bresenham));
        scene.add_line(line(5, -10, 5, 30, LineAlgorithm::Bresenham));
        scene.add_line(line(-50, -50, -20, -20, LineAlgorithm::Dda));
        scene.add_line(line(0, 0, 20, 20, LineAlgorithm::Dda));
        scene.add_circle(Circle::new(Point::new(500, 500), 3));
        scene
    }

    #[test]
    fn test_clip_all_counts() {
        for algo in [ClipAlgorithm::CohenSutherland, ClipAlgorithm::LiangBarsky] {
            let mut scene = five_lines();
            let summary = clip_lines(&mut scene, Rect::new(0, 0, 10, 10), algo, None);
            assert_eq!(summary, ClipSummary { kept: 3, removed: 2 });
            assert_eq!(scene.lines.len(), 3);
            assert_eq!(scene.lines[0].p0, Point::new(0, 5));
            assert_eq!(scene.lines[0].p1, Point::new(10, 5));
            assert_eq!(scene.lines[0].algo(), LineAlgorithm::Dda);
            assert_eq!(scene.lines[1].p0, Point::new(5, 0));
            assert_eq!(scene.lines[1].algo(), LineAlgorithm::Bresenham);
            assert_eq!(scene.lines[2].p1, Point::new(10, 10));
            // 圆不受影响
            assert_eq!(scene.circles.len(), 1);
        }
    }

    #[test]
    fn test_clip_only_selected() {
        let mut scene = five_lines();
        let selected: BTreeSet<usize> = [1, 4].into_iter().collect();
        let summary = clip_lines(&mut scene, Rect::new(0, 0, 10, 10), ClipAlgorithm::LiangBarsky, Some(&selected));
        assert_eq!(summary, ClipSummary { kept: 1, removed: 1 });
        assert_eq!(scene.lines.len(), 4);
        // 非候选线段顺序不变
        assert_eq!(scene.lines[0].p0, Point::new(-10, 5));
        assert_eq!(scene.lines[2].p0, Point::new(-50, -50));
        assert_eq!(scene.lines[3].p1, Point::new(10, 10));
    }

    #[test]
    fn test_empty_selection_means_all() {
        let mut scene = five_lines();
        let empty = BTreeSet::new();
        let summary = clip_lines(&mut scene, Rect::new(0, 0, 10, 10), ClipAlgorithm::CohenSutherland, Some(&empty));
        assert_eq!(summary.kept + summary.removed, 5);
    }

    #[test]
    fn test_preview_is_non_destructive() {
        let scene = five_lines();
        let preview = preview_clip_lines(&scene, Rect::new(0, 0, 10, 10), ClipAlgorithm::CohenSutherland, None);
        assert_eq!(preview.len(), 3);
        assert_eq!(scene, five_lines());
    }

    #[test]
    fn test_clip_selected_clears_line_selection() {
        let mut scene = five_lines();
        let mut sel = Selection::select_all(&scene);
        let summary = clip_selected_lines(&mut scene, &mut sel, Rect::new(0, 0, 10, 10), ClipAlgorithm::LiangBarsky);
        assert_eq!(summary.removed, 2);
        assert!(sel.lines.is_empty());
        assert_eq!(sel.circles.len(), 1);
    }
}
