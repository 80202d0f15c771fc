use itertools::Itertools;

use crate::{core::reading::Reading, quantity::energy::KilowattHours};

/// Chronologically ordered readings, in input order.
pub type Series = Vec<Reading>;

impl<T> TotalUsage for T where T: ?Sized {}

pub trait TotalUsage {
    fn total_usage<'a>(self) -> KilowattHours
    where
        Self: Sized + IntoIterator<Item = &'a Reading>,
    {
        self.into_iter().map(|reading| reading.usage).sum()
    }
}

impl<T> TopIndices for T where T: ?Sized {}

pub trait TopIndices {
    /// Indices of the `n` largest values, largest first.
    ///
    /// Equal values keep their original order.
    fn top_indices<V>(self, n: usize) -> Vec<usize>
    where
        Self: Sized + IntoIterator<Item = V>,
        V: Ord,
    {
        self.into_iter()
            .enumerate()
            .sorted_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs))
            .take(n)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Indices of the candidate slots ordered by the lowest current usage first.
///
/// Equal usages keep their original order.
pub fn lowest_first(
    usages: &[KilowattHours],
    candidates: impl IntoIterator<Item = usize>,
) -> Vec<usize> {
    candidates.into_iter().sorted_by_key(|index| usages[*index]).collect()
}
