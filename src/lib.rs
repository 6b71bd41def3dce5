//! # vosetables
//!
//! O(1) weighted index sampling from a *fixed* discrete distribution, via
//! [Vose's Alias Method](https://en.wikipedia.org/wiki/Alias_method):
//! an O(n) build turns a weight slice into a probability/alias table, and
//! every draw afterwards is one array lookup plus one comparison. If you
//! sample the same distribution many times, this beats repeated O(log n)
//! cumulative-sum scans.
//!
//! The entry points, from low level to high:
//!
//! 1. **Validated weights + table** with [`validate`] and
//!    [`AliasTable::build`] — the core: you hold the indices.
//! 2. **Ad-hoc pairs** with [`WeightedTable::from_pairs`] — items carried
//!    alongside the table.
//! 3. **Compile-time enums** with the [`WeightedEnum`] derive macro (from
//!    the companion `vosetables_macros` crate).
//!
//! ## Quick start (core)
//!
//! ```rust,ignore
//! use vosetables::{AliasTable, BuildOptions, validate};
//!
//! # fn main() -> Result<(), vosetables::WeightError> {
//! let weights = [1.0, 2.0, 3.0, 4.0];
//! let table: AliasTable = AliasTable::build(validate(&weights)?, BuildOptions::default())?;
//!
//! let mut rng = rand::rng();
//! let i = table.sample_index(&mut rng); // 0..4, weighted 10/20/30/40%
//! # Ok(()) }
//! ```
//!
//! ## Quick start (pairs)
//!
//! ```rust,ignore
//! use vosetables::WeightedTable;
//!
//! # fn main() {
//! let table = WeightedTable::from_pairs([
//!     ("common", 60.0),
//!     ("uncommon", 30.0),
//!     ("rare", 9.0),
//!     ("legendary", 1.0),
//! ]).unwrap();
//!
//! let mut rng = rand::rng();
//! let tier = table.sample(&mut rng); // &str
//! println!("you got: {tier}");
//! # }
//! ```
//!
//! ## Build knobs
//!
//! [`BuildOptions`] lets hot callers shave the O(n) build: `pre_normalized`
//! skips the compensated summation, `pre_scaled` skips scaling entirely,
//! and `can_mutate` (together with [`validate_mut`]) reuses the caller's
//! buffer as scratch instead of allocating. [`ValidatedWeights::assume_valid`]
//! skips validation for pre-known-good data.
//!
//! ## Performance
//! * **Build**: O(n), one pass of compensated (Kahan) summation plus the
//!   light/heavy redistribution loop.
//! * **Sample**: O(1) per draw (2 random numbers, 1 branch), no allocation.
//! * **Space**: flat `f64` + index vectors, or 64-byte packed blocks with
//!   [`PackedAliasTable`] for one-cache-line draws.
//!
//! ## Gotchas
//! * Weights must be **non-negative** with at least one positive entry;
//!   a NaN survives validation but fails the build's sum check.
//! * This is for *fixed* distributions. If you mutate weights, rebuild.
//! * A built table is immutable and `Sync`; share it freely, but give each
//!   thread its own `Rng`.
//!
//! `rand` integration uses the modern `Rng::random()` / `random_range()` APIs

mod error;
mod packed;
mod sampler;
mod staticdt;
pub mod sum;
mod uniform;
mod vose;
mod weights;

/// A minimal interface for “index samplers”.
/// Implemented by `AliasTable` / `PackedAliasTable` (weighted) and
/// `UniformSampler` (equal odds).
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

pub use error::WeightError;
pub use packed::PackedAliasTable;
pub use sampler::UniformSampler;
pub use staticdt::StaticTable;
pub use uniform::{UniformEnum, UniformTable};
pub use vose::AliasTable;
pub use weights::{AliasIndex, BuildOptions, ValidatedWeights, validate, validate_mut};

use rand::Rng;

/// A generic weighted table: associates items with weights and samples them
/// through an internal [`AliasTable`].
///
/// Build it from any iterator of `(item, weight)` where `weight >= 0`.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    alias: AliasTable,
    items: Vec<T>,
}

pub use vosetables_macros::UniformEnum;
/// Derive macro imported from `vosetables_macros`.
/// See the crate-level example for usage.
pub use vosetables_macros::WeightedEnum;

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its weight is exposed via [`WeightedEnum::ENTRIES`],
/// which enables building a ready-to-sample [`WeightedTable`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(variant, weight)` pairs for the enum.
    const ENTRIES: &'static [(Self, f64)];

    /// Convenience constructor that builds a [`WeightedTable`] from the
    /// enum entries.
    ///
    /// # Errors
    /// See [`WeightedTable::from_pairs`] and [`WeightError`]: zero length,
    /// negative weight, non-finite or zero total weight will error.
    fn weighted_table() -> Result<WeightedTable<Self>, WeightError>
    where
        Self: Copy,
    {
        WeightedTable::from_pairs(Self::ENTRIES.iter().copied())
    }
}

impl<T> WeightedTable<T> {
    /// Build from any `(item, weight)` iterator.
    ///
    /// # Errors
    /// * [`WeightError::Empty`] if there are no items.
    /// * [`WeightError::Negative`] if any weight is negative.
    /// * [`WeightError::NoPositive`] if all weights are zero.
    /// * [`WeightError::InvalidSum`] if the total is zero or not finite.
    ///
    /// # Complexity
    /// O(n) time / O(n) space.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        for (t, w) in pairs {
            items.push(t);
            weights.push(w);
        }
        let alias = AliasTable::build(validate(&weights)?, BuildOptions::default())?;
        Ok(Self { alias, items })
    }

    /// Sample an item **by reference** (no `Clone` bound).
    ///
    /// # Panics
    /// Never panics for a well-constructed table.
    ///
    /// # Examples
    /// ```rust,ignore
    /// # use vosetables::WeightedTable;
    /// # let table = WeightedTable::from_pairs([("a", 1.0), ("b", 3.0)]).unwrap();
    /// let mut rng = rand::rng();
    /// let s = table.sample(&mut rng); // &str
    /// ```
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        let idx = self.alias.sample_index(rng);
        &self.items[idx]
    }

    /// Sample an item **by value** (clones the chosen element).
    ///
    /// Prefer [`sample`](Self::sample) if you don’t need ownership.
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.items[self.alias.sample_index(rng)].clone()
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.alias.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_pairs() {
        let wt = WeightedTable::from_pairs([("a", 1.0), ("b", 3.0)]).unwrap();
        let mut rng = rand::rng();
        let _ = wt.sample(&mut rng);
    }

    #[test]
    fn pairs_route_through_validation() {
        assert!(matches!(
            WeightedTable::<&str>::from_pairs([]),
            Err(WeightError::Empty)
        ));
        assert!(matches!(
            WeightedTable::from_pairs([("a", -1.0), ("b", 2.0)]),
            Err(WeightError::Negative { index: 0, .. })
        ));
        assert!(matches!(
            WeightedTable::from_pairs([("a", 0.0), ("b", 0.0)]),
            Err(WeightError::NoPositive)
        ));
    }
}
