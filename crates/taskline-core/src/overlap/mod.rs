//! Task date-overlap detection.
//!
//! Two tasks conflict when their inclusive date ranges share at least one
//! calendar day. Items without a complete, parseable schedule are ignored on
//! both sides of every comparison; detection never fails.
//!
//! - [`dates_overlap`] / [`DateRange::overlaps`]: closed-interval test
//! - [`items_overlap`]: the same test applied to two scheduled items
//! - [`find_conflicts`]: ids of every other item one item conflicts with
//! - [`compute_warnings`]: sparse, symmetric warning map for a collection

mod detector;
mod warnings;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

pub use detector::{DetectionStrategy, OverlapDetector};
pub use warnings::OverlapWarnings;

/// Anything with an identity and an optional calendar-date schedule.
pub trait Scheduled {
    /// Identifier, unique within a collection passed to the detector.
    type Id: Clone + Eq + Hash;

    fn id(&self) -> &Self::Id;

    /// Inclusive first day, if present and valid.
    fn start_date(&self) -> Option<NaiveDate>;

    /// Inclusive last day, if present and valid.
    fn end_date(&self) -> Option<NaiveDate>;

    /// The item's range, only when both ends are known.
    fn date_range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date()?, self.end_date()?))
    }
}

/// Closed calendar-date range `[start, end]`.
///
/// Not validated: a range whose end precedes its start is compared as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Closed-interval intersection. Ranges touching on a single day overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Overlap predicate over four optional dates; any missing date means `false`.
pub fn dates_overlap(
    start_a: Option<NaiveDate>,
    end_a: Option<NaiveDate>,
    start_b: Option<NaiveDate>,
    end_b: Option<NaiveDate>,
) -> bool {
    match (start_a, end_a, start_b, end_b) {
        (Some(sa), Some(ea), Some(sb), Some(eb)) => {
            DateRange::new(sa, ea).overlaps(&DateRange::new(sb, eb))
        }
        _ => false,
    }
}

/// Check whether two scheduled items overlap.
pub fn items_overlap<T: Scheduled>(a: &T, b: &T) -> bool {
    let Some(range_a) = a.date_range() else {
        return false;
    };
    let Some(range_b) = b.date_range() else {
        return false;
    };
    range_a.overlaps(&range_b)
}

/// Ids of every other item in `all` whose schedule overlaps `item`, in input order.
///
/// Returns an empty list when `item` has no complete schedule. Identity is by id.
pub fn find_conflicts<T: Scheduled>(item: &T, all: &[T]) -> Vec<T::Id> {
    let Some(target) = item.date_range() else {
        return Vec::new();
    };

    all.iter()
        .filter(|other| other.id() != item.id())
        .filter(|other| other.date_range().is_some_and(|r| target.overlaps(&r)))
        .map(|other| other.id().clone())
        .collect()
}

/// Whether `item` conflicts with anything else in `all`.
pub fn has_conflicts<T: Scheduled>(item: &T, all: &[T]) -> bool {
    !find_conflicts(item, all).is_empty()
}

/// Warning map for a whole collection using the default pairwise detector.
pub fn compute_warnings<T: Scheduled>(all: &[T]) -> OverlapWarnings<T::Id> {
    OverlapDetector::new().compute(all)
}
