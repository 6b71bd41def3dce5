//! Cache-line packed table storage.
//!
//! The flat [`AliasTable`](crate::AliasTable) keeps probabilities and aliases
//! in two parallel vectors, so one draw touches two lines. Here each bucket's
//! `(prob, alias)` pair lives in the same 64-byte block, trading a div/mod
//! per access for one-line draws. A table always owns at least one full
//! block, which is wasteful for many tiny distributions; this layout is for
//! few, reasonably large ones.

use rand::Rng;

use crate::error::WeightError;
use crate::vose::{Slots, redistribute, scale_to_len, working_buffer};
use crate::weights::{BuildOptions, ValidatedWeights};

const LINE_BYTES: usize = 64;

/// Pairs per block: as many as fit one cache line.
const LANES: usize = LINE_BYTES / (size_of::<f64>() + size_of::<u32>());

#[derive(Debug, Clone, Copy)]
#[repr(C, align(64))]
struct Block {
    prob: [f64; LANES],
    alias: [u32; LANES],
}

const EMPTY_BLOCK: Block = Block {
    prob: [0.0; LANES],
    alias: [0; LANES],
};

/// [`AliasTable`](crate::AliasTable) semantics over block-grouped storage.
///
/// Bucket `i` lives in block `i / LANES`, lane `i % LANES`. Built by the
/// same redistribution loop as the flat table; draws are distribution- and
/// seed-identical to a flat table built from the same weights.
#[derive(Debug, Clone)]
pub struct PackedAliasTable {
    blocks: Vec<Block>,
    len: usize,
}

impl Slots for PackedAliasTable {
    #[inline]
    fn set_prob(&mut self, i: usize, p: f64) {
        self.blocks[i / LANES].prob[i % LANES] = p;
    }
    #[inline]
    fn set_alias(&mut self, i: usize, a: usize) {
        self.blocks[i / LANES].alias[i % LANES] = a as u32;
    }
}

impl PackedAliasTable {
    /// Construct a packed table from validated weights. O(n).
    ///
    /// Aliases are stored as `u32` (hence the `ValidatedWeights<u32>`
    /// proof); five pairs share each 64-byte block.
    ///
    /// # Errors
    /// Same contract as [`AliasTable::build`](crate::AliasTable::build).
    pub fn build(
        weights: ValidatedWeights<'_, u32>,
        options: BuildOptions,
    ) -> Result<Self, WeightError> {
        let n = weights.len();
        let mut working = working_buffer(weights, &options)?;
        let scaled = working.as_mut_slice();
        scale_to_len(scaled, &options)?;

        let mut table = Self::with_len(n)?;
        redistribute(&mut table, scaled)?;
        Ok(table)
    }

    fn with_len(n: usize) -> Result<Self, WeightError> {
        let mut blocks = Vec::new();
        blocks.try_reserve_exact(n.div_ceil(LANES))?;
        blocks.resize(n.div_ceil(LANES), EMPTY_BLOCK);

        let mut table = Self { blocks, len: n };
        for i in 0..n {
            table.set_alias(i, i);
        }
        Ok(table)
    }

    /// Draw a single weighted index in O(1). Same comparison policy as the
    /// flat table: keep bucket `i` when `u < prob[i]`.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.random_range(0..self.len);
        let block = &self.blocks[i / LANES];
        let lane = i % LANES;
        let u: f64 = rng.random();
        if u < block.prob[lane] {
            i
        } else {
            block.alias[lane] as usize
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AliasTable;
    use crate::vose::assert_frequencies;
    use crate::weights::validate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn block_geometry() {
        assert_eq!(LANES, 5);
        assert_eq!(size_of::<Block>(), LINE_BYTES);
        assert_eq!(align_of::<Block>(), LINE_BYTES);
    }

    #[test]
    fn matches_flat_table_draw_for_draw() {
        // Same weights, same seed: the two layouts must agree exactly, since
        // they run the same build arithmetic and consume the rng identically.
        let weights: Vec<f64> = (1..=23).map(|i| i as f64).collect();
        let flat =
            AliasTable::<u32>::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();
        let packed =
            PackedAliasTable::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();

        let mut a = StdRng::seed_from_u64(555);
        let mut b = StdRng::seed_from_u64(555);
        for _ in 0..10_000 {
            assert_eq!(flat.sample_index(&mut a), packed.sample_index(&mut b));
        }
    }

    #[test]
    fn roughly_matches_distribution() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let table =
            PackedAliasTable::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();
        assert_frequencies(&table, &weights, 42, 0.01);
    }

    #[test]
    fn spans_partial_final_block() {
        // 7 buckets: one full block plus a 2-lane remainder.
        let weights = [4.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let table =
            PackedAliasTable::build(validate(&weights).unwrap(), BuildOptions::default()).unwrap();
        assert_eq!(table.blocks.len(), 2);
        assert_frequencies(&table, &weights, 11, 0.01);
    }

    #[test]
    fn tiny_table_still_owns_one_block() {
        let table =
            PackedAliasTable::build(validate(&[1.0]).unwrap(), BuildOptions::default()).unwrap();
        assert_eq!(table.blocks.len(), 1);
        let mut rng = rand::rng();
        for _ in 0..100 {
            assert_eq!(table.sample_index(&mut rng), 0);
        }
    }
}
