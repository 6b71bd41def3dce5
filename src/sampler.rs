use rand::Rng;

use crate::packed::PackedAliasTable;
use crate::vose::AliasTable;
use crate::weights::AliasIndex;
use crate::{IndexSampler, error::WeightError};

/// Uniform index sampler: picks an index in `0..n` with equal probability.
#[derive(Debug, Clone, Copy)]
pub struct UniformSampler {
    n: usize,
}

impl UniformSampler {
    pub fn new(n: usize) -> Result<Self, WeightError> {
        if n == 0 {
            return Err(WeightError::Empty);
        }
        Ok(Self { n })
    }
}

impl IndexSampler for UniformSampler {
    #[inline]
    fn len(&self) -> usize {
        self.n
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n)
    }
}

/// The weighted samplers; wire them into the trait.
impl<A: AliasIndex> IndexSampler for AliasTable<A> {
    #[inline]
    fn len(&self) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        AliasTable::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        AliasTable::sample_index(self, rng)
    }
}

impl IndexSampler for PackedAliasTable {
    #[inline]
    fn len(&self) -> usize {
        PackedAliasTable::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        PackedAliasTable::sample_index(self, rng)
    }
}
