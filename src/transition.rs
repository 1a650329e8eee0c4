//! Make/break computation between two usage snapshots.
//!
//! A snapshot is a fixed-capacity array of the usages asserted at one instant,
//! ending at the first terminator entry or at capacity. Diffing two of them
//! yields the usages that were released ("break") and the ones that were newly
//! pressed ("make"), each in the order they appear in their source snapshot.
//! Nothing here allocates or fails; the scans are quadratic, which is fine for
//! the handful of usages a device reports at once.

use arrayvec::ArrayVec;

use crate::types::{Usage, UsageAndPage};

/// An element of a usage snapshot.
pub trait SnapshotEntry: Copy + Default + PartialEq {
    /// True for the end-of-list marker.
    fn is_terminator(&self) -> bool;
}

impl SnapshotEntry for Usage {
    fn is_terminator(&self) -> bool {
        *self == 0
    }
}

impl SnapshotEntry for UsageAndPage {
    fn is_terminator(&self) -> bool {
        self.usage == 0 && self.usage_page == 0
    }
}

/// The live prefix of a snapshot buffer.
#[derive(Clone, Copy)]
pub struct UsageSnapshot<'a, T> {
    entries: &'a [T],
}

impl<'a, T: SnapshotEntry> UsageSnapshot<'a, T> {
    pub fn new(buffer: &'a [T]) -> Self {
        let len = buffer
            .iter()
            .position(T::is_terminator)
            .unwrap_or(buffer.len());
        Self {
            entries: &buffer[..len],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.entries
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Entries of `self` that `other` does not hold, in order.
    fn missing_from<const N: usize>(&self, other: &UsageSnapshot<'_, T>) -> ArrayVec<T, N> {
        let mut missing = ArrayVec::new();
        for entry in self.entries {
            if !other.contains(entry) {
                // `self` never holds more than N entries
                missing.push(*entry);
            }
        }
        missing
    }
}

/// Result of diffing two snapshots of capacity `N`.
#[derive(Clone)]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
pub struct Transition<T, const N: usize> {
    breaks: ArrayVec<T, N>,
    makes: ArrayVec<T, N>,
}

impl<T: SnapshotEntry, const N: usize> Transition<T, N> {
    pub fn between(previous: &[T; N], current: &[T; N]) -> Self {
        let previous = UsageSnapshot::new(previous);
        let current = UsageSnapshot::new(current);

        Self {
            breaks: previous.missing_from(&current),
            makes: current.missing_from(&previous),
        }
    }

    /// Entries released since the previous snapshot.
    pub fn breaks(&self) -> &[T] {
        &self.breaks
    }

    /// Entries asserted since the previous snapshot.
    pub fn makes(&self) -> &[T] {
        &self.makes
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty() && self.makes.is_empty()
    }

    pub fn break_list(&self) -> [T; N] {
        zero_filled(&self.breaks)
    }

    pub fn make_list(&self) -> [T; N] {
        zero_filled(&self.makes)
    }

    /// Writes both lists into caller buffers, zero-filling past the produced
    /// entries.
    pub fn write_into(&self, break_list: &mut [T; N], make_list: &mut [T; N]) {
        fill(break_list, &self.breaks);
        fill(make_list, &self.makes);
    }
}

fn zero_filled<T: SnapshotEntry, const N: usize>(entries: &[T]) -> [T; N] {
    let mut list = [T::default(); N];
    fill(&mut list, entries);
    list
}

fn fill<T: SnapshotEntry>(list: &mut [T], entries: &[T]) {
    let (head, tail) = list.split_at_mut(entries.len());
    head.copy_from_slice(entries);
    tail.fill(T::default());
}

pub fn usage_list_difference<const N: usize>(
    previous: &[Usage; N],
    current: &[Usage; N],
) -> Transition<Usage, N> {
    Transition::between(previous, current)
}

pub fn usage_and_page_list_difference<const N: usize>(
    previous: &[UsageAndPage; N],
    current: &[UsageAndPage; N],
) -> Transition<UsageAndPage, N> {
    Transition::between(previous, current)
}
