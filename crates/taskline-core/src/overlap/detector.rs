//! Collection-wide overlap detection.

use serde::{Deserialize, Serialize};

use super::{DateRange, OverlapWarnings, Scheduled};

/// How the detector pairs up items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Compare every dated item with every other one.
    #[default]
    Pairwise,
    /// Sort by start date and only compare ranges still open at each start.
    SweepLine,
}

impl DetectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pairwise => "pairwise",
            Self::SweepLine => "sweep_line",
        }
    }
}

/// Stateless detector; every call recomputes from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapDetector {
    strategy: DetectionStrategy,
}

impl OverlapDetector {
    /// Create a detector using pairwise comparison
    pub fn new() -> Self {
        Self {
            strategy: DetectionStrategy::Pairwise,
        }
    }

    pub fn with_strategy(mut self, strategy: DetectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> DetectionStrategy {
        self.strategy
    }

    /// Build the warning map for `items`.
    ///
    /// Both strategies produce the same map: one entry per conflicting item in
    /// input order, each listing its partners in input order.
    pub fn compute<T: Scheduled>(&self, items: &[T]) -> OverlapWarnings<T::Id> {
        let dated: Vec<(usize, DateRange)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.date_range().map(|r| (i, r)))
            .collect();

        let partners = match self.strategy {
            DetectionStrategy::Pairwise => pairwise(items, &dated),
            DetectionStrategy::SweepLine => sweep_line(items, dated.clone()),
        };

        let mut warnings = OverlapWarnings::default();
        for (i, item) in items.iter().enumerate() {
            let ids = partners[i].iter().map(|&j| items[j].id().clone()).collect();
            warnings.insert(item.id().clone(), ids);
        }

        tracing::debug!(
            strategy = self.strategy.as_str(),
            items = items.len(),
            dated = dated.len(),
            conflicting = warnings.len(),
            "computed overlap warnings"
        );
        warnings
    }
}

/// Partner indices per item, ascending.
fn pairwise<T: Scheduled>(items: &[T], dated: &[(usize, DateRange)]) -> Vec<Vec<usize>> {
    let mut partners = vec![Vec::new(); items.len()];
    for &(i, range_i) in dated {
        for &(j, range_j) in dated {
            if i != j && items[i].id() != items[j].id() && range_i.overlaps(&range_j) {
                partners[i].push(j);
            }
        }
    }
    partners
}

fn sweep_line<T: Scheduled>(items: &[T], mut dated: Vec<(usize, DateRange)>) -> Vec<Vec<usize>> {
    dated.sort_by_key(|&(i, r)| (r.start, i));

    let mut partners = vec![Vec::new(); items.len()];
    let mut open: Vec<(usize, DateRange)> = Vec::new();
    for &(j, range_j) in &dated {
        // Starts only grow from here, so a range ending earlier is done for good.
        open.retain(|(_, range_i)| range_i.end >= range_j.start);
        for &(i, range_i) in &open {
            // range_i.start <= range_j.start already holds; a degenerate
            // range_j still needs the other half of the test.
            if range_i.start <= range_j.end && items[i].id() != items[j].id() {
                partners[i].push(j);
                partners[j].push(i);
            }
        }
        open.push((j, range_j));
    }

    for list in &mut partners {
        list.sort_unstable();
    }
    partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn task(id: &str, start: &str, end: &str) -> Task {
        Task::new(id, id).with_dates(start, end)
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", "2024-01-01", "2024-01-10"),
            task("b", "2024-01-10", "2024-01-12"),
            Task::new("u", "undated"),
            task("c", "2024-01-03", "2024-01-04"),
            task("d", "2024-02-01", "2024-02-03"),
            task("e", "2024-01-12", "2024-01-11"),
        ]
    }

    #[test]
    fn strategies_agree_on_sample() {
        let items = sample();
        let pairwise = OverlapDetector::new().compute(&items);
        let sweep = OverlapDetector::new()
            .with_strategy(DetectionStrategy::SweepLine)
            .compute(&items);
        assert_eq!(pairwise, sweep);
        assert!(pairwise.iter().eq(sweep.iter()));
    }

    #[test]
    fn sweep_lists_partners_in_input_order() {
        let items = sample();
        let sweep = OverlapDetector::new()
            .with_strategy(DetectionStrategy::SweepLine)
            .compute(&items);
        let a: Vec<&str> = sweep
            .get(&"a".to_string())
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(a, vec!["b", "c"]);
    }

    #[test]
    fn duplicate_ids_never_conflict_with_each_other() {
        let items = vec![
            task("a", "2024-01-01", "2024-01-05"),
            task("a", "2024-01-02", "2024-01-03"),
        ];
        for strategy in [DetectionStrategy::Pairwise, DetectionStrategy::SweepLine] {
            let warnings = OverlapDetector::new().with_strategy(strategy).compute(&items);
            assert!(warnings.is_empty(), "{strategy:?}");
        }
    }

    #[test]
    fn strategy_serializes_snake_case() {
        let json = serde_json::to_string(&DetectionStrategy::SweepLine).unwrap();
        assert_eq!(json, "\"sweep_line\"");
        assert_eq!(DetectionStrategy::default(), DetectionStrategy::Pairwise);
    }
}
