use crate::core::{Category, CombinationShape, MatchResult, Recipe};
use serde::Serialize;

pub const DEFAULT_TOLERANCE_MINUTES: u32 = 10;
pub const MAX_RESULTS: usize = 50;

/// 閉區間 `[target - tolerance, target + tolerance]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub min: u32,
    pub max: u32,
}

impl TimeWindow {
    pub fn around(target: u32, tolerance: u32) -> Self {
        Self {
            min: target.saturating_sub(tolerance),
            max: target.saturating_add(tolerance),
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.min <= minutes && minutes <= self.max
    }
}

/// 列舉符合形狀與時間區間的食譜組合，依接近目標排序後截斷
#[derive(Debug, Clone)]
pub struct CombinationMatcher {
    max_results: usize,
}

impl Default for CombinationMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CombinationMatcher {
    pub fn new() -> Self {
        Self {
            max_results: MAX_RESULTS,
        }
    }

    /// 上限固定在 1..=50 之間
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            max_results: max_results.clamp(1, MAX_RESULTS),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn find_matches(
        &self,
        recipes: &[Recipe],
        target_minutes: u32,
        tolerance_minutes: u32,
        shape: &CombinationShape,
    ) -> Vec<MatchResult> {
        let window = TimeWindow::around(target_minutes, tolerance_minutes);
        let label = shape.label();

        let mut matches = match *shape {
            CombinationShape::Single(a) => Self::singles(recipes, a, window, &label),
            CombinationShape::Pairing(a, b) => Self::pairings(recipes, (a, b), window, &label),
            CombinationShape::Set(a, b, c) => Self::sets(recipes, (a, b, c), window, &label),
        };
        let found = matches.len();

        // 穩定排序：差距相同時保留列舉順序
        matches.sort_by_key(|m| m.deviation_from(target_minutes));
        matches.truncate(self.max_results);

        tracing::debug!(
            "Shape {} over {} recipes, window [{}, {}]: {} combination(s) found, {} kept",
            label,
            recipes.len(),
            window.min,
            window.max,
            found,
            matches.len()
        );

        matches
    }

    fn in_category(recipes: &[Recipe], category: Category) -> Vec<&Recipe> {
        recipes.iter().filter(|r| r.category == category).collect()
    }

    fn singles(recipes: &[Recipe], a: Category, window: TimeWindow, label: &str) -> Vec<MatchResult> {
        Self::in_category(recipes, a)
            .into_iter()
            .filter(|r| window.contains(r.total_time()))
            .map(|r| MatchResult::new(vec![r.clone()], label))
            .collect()
    }

    // 兩個角色各自掃描：A == B 時 (x, y) 與 (y, x) 都會產生
    fn pairings(
        recipes: &[Recipe],
        (a, b): (Category, Category),
        window: TimeWindow,
        label: &str,
    ) -> Vec<MatchResult> {
        let firsts = Self::in_category(recipes, a);
        let seconds = Self::in_category(recipes, b);

        let mut matches = Vec::new();
        for r1 in &firsts {
            for r2 in &seconds {
                if r1.id == r2.id {
                    continue;
                }
                let sum = r1.total_time().saturating_add(r2.total_time());
                if window.contains(sum) {
                    matches.push(MatchResult::new(vec![(*r1).clone(), (*r2).clone()], label));
                }
            }
        }
        matches
    }

    fn sets(
        recipes: &[Recipe],
        (a, b, c): (Category, Category, Category),
        window: TimeWindow,
        label: &str,
    ) -> Vec<MatchResult> {
        let firsts = Self::in_category(recipes, a);
        let seconds = Self::in_category(recipes, b);
        let thirds = Self::in_category(recipes, c);

        let mut matches = Vec::new();
        for r1 in &firsts {
            for r2 in &seconds {
                if r1.id == r2.id {
                    continue;
                }
                let partial = r1.total_time().saturating_add(r2.total_time());
                if partial > window.max {
                    continue;
                }
                for r3 in &thirds {
                    if r3.id == r1.id || r3.id == r2.id {
                        continue;
                    }
                    let sum = partial.saturating_add(r3.total_time());
                    if window.contains(sum) {
                        matches.push(MatchResult::new(
                            vec![(*r1).clone(), (*r2).clone(), (*r3).clone()],
                            label,
                        ));
                    }
                }
            }
        }
        matches
    }
}
