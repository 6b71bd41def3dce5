//! Vose's Alias Method for O(1) sampling from a discrete distribution.

use rand::Rng;

use crate::error::WeightError;
use crate::sum::kahan_sum_lanes;
use crate::weights::{AliasIndex, BuildOptions, ValidatedWeights, WeightsRef};

/// Residues this close to 1 stay on the heavy list and get forced to exactly
/// 1.0 in the drain, instead of churning through the light list.
const NEAR_ONE: f64 = 1.0 - 1e-15;

/// Per-index write access to a table under construction. Lets the builder
/// run unchanged over flat and packed storage.
pub(crate) trait Slots {
    fn set_prob(&mut self, i: usize, p: f64);
    fn set_alias(&mut self, i: usize, a: usize);
}

/// The working copy of the weights: the caller's own buffer when it granted
/// mutation rights, an owned scratch copy otherwise.
pub(crate) enum Working<'a> {
    Scratch(Vec<f64>),
    InPlace(&'a mut [f64]),
}

impl Working<'_> {
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Working::Scratch(v) => v,
            Working::InPlace(s) => s,
        }
    }
}

/// Pick or allocate the buffer the redistribution loop is allowed to chew on.
pub(crate) fn working_buffer<'a, A: AliasIndex>(
    weights: ValidatedWeights<'a, A>,
    options: &BuildOptions,
) -> Result<Working<'a>, WeightError> {
    match weights.weights {
        WeightsRef::Mut(buf) if options.can_mutate => Ok(Working::InPlace(buf)),
        WeightsRef::Mut(buf) => Ok(Working::Scratch(copy_of(buf)?)),
        WeightsRef::Shared(buf) => Ok(Working::Scratch(copy_of(buf)?)),
    }
}

fn copy_of(weights: &[f64]) -> Result<Vec<f64>, WeightError> {
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(weights.len())?;
    scratch.extend_from_slice(weights);
    Ok(scratch)
}

/// Scale `p` in place so it sums to `p.len()`, honoring the skip flags.
///
/// # Errors
/// [`WeightError::InvalidSum`] if the compensated sum comes out non-positive
/// or non-finite (a NaN entry, or rounding collapse of a degenerate slice).
pub(crate) fn scale_to_len(p: &mut [f64], options: &BuildOptions) -> Result<(), WeightError> {
    if options.pre_scaled {
        return Ok(());
    }
    let mut scalar = p.len() as f64;
    if !options.pre_normalized {
        let total = kahan_sum_lanes(p);
        if !total.is_finite() || total <= 0.0 {
            return Err(WeightError::InvalidSum { total });
        }
        scalar /= total;
    }
    for w in p.iter_mut() {
        *w *= scalar;
    }
    Ok(())
}

/// The Vose loop: resolve one light bucket per iteration by pairing it with
/// a heavy donor, then drain whatever is left to probability 1.
///
/// `scaled` must sum to `scaled.len()` (up to rounding). Leftover light
/// indices after the pairing loop are a rounding artifact; forcing them to
/// 1.0 is required, the mass they are missing no longer exists.
pub(crate) fn redistribute<S: Slots>(slots: &mut S, scaled: &mut [f64]) -> Result<(), WeightError> {
    let n = scaled.len();
    let mut light: Vec<usize> = Vec::new();
    light.try_reserve_exact(n)?;
    let mut heavy: Vec<usize> = Vec::new();
    heavy.try_reserve_exact(n)?;

    for (i, &p) in scaled.iter().enumerate() {
        if p < 1.0 {
            light.push(i);
        } else {
            heavy.push(i);
        }
    }

    loop {
        match (light.pop(), heavy.pop()) {
            (Some(l), Some(g)) => {
                // Bucket l is resolved: keep l with chance scaled[l], else
                // redirect to g. The donated excess keeps the ledger at n.
                // Rounding can leave a light residue a few ulps below zero.
                slots.set_prob(l, scaled[l].max(0.0));
                slots.set_alias(l, g);

                scaled[g] = (scaled[g] + scaled[l]) - 1.0;

                if scaled[g] < NEAR_ONE {
                    light.push(g);
                } else {
                    heavy.push(g);
                }
            }
            (Some(i), None) | (None, Some(i)) => slots.set_prob(i, 1.0),
            (None, None) => break,
        }
    }
    Ok(())
}

/// Alias table over `n` buckets: `prob[i]` is the chance a draw landing on
/// bucket `i` keeps outcome `i`; otherwise it redirects to `alias[i]`.
///
/// Built once from [`ValidatedWeights`], immutable afterwards; rebuilding
/// means constructing a new table. Sampling is a shared borrow, so one table
/// can serve any number of threads as long as each brings its own `Rng`.
#[derive(Debug, Clone)]
pub struct AliasTable<A: AliasIndex = u32> {
    prob: Vec<f64>,
    alias: Vec<A>,
}

impl<A: AliasIndex> Slots for AliasTable<A> {
    #[inline]
    fn set_prob(&mut self, i: usize, p: f64) {
        self.prob[i] = p;
    }
    #[inline]
    fn set_alias(&mut self, i: usize, a: usize) {
        self.alias[i] = A::from_usize(a);
    }
}

impl<A: AliasIndex> AliasTable<A> {
    /// Construct a table from validated weights. O(n).
    ///
    /// # Errors
    /// * [`WeightError::InvalidSum`] if the weight sum is non-positive or
    ///   non-finite (only reachable through NaN entries or an
    ///   `assume_valid` claim that was false).
    /// * [`WeightError::Alloc`] if backing storage can't be reserved; no
    ///   partial table is returned.
    pub fn build(
        weights: ValidatedWeights<'_, A>,
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

    /// All-zero probabilities, identity aliases. Identity matters: buckets
    /// the drain leaves untouched must still redirect somewhere valid.
    fn with_len(n: usize) -> Result<Self, WeightError> {
        let mut prob = Vec::new();
        prob.try_reserve_exact(n)?;
        prob.resize(n, 0.0);

        let mut alias = Vec::new();
        alias.try_reserve_exact(n)?;
        alias.extend((0..n).map(A::from_usize));

        Ok(Self { prob, alias })
    }

    /// Draw a single weighted index in O(1): one uniform bucket, one uniform
    /// real, one comparison. Keeps the bucket when `u < prob[i]` (strictly
    /// less; the boundary event has probability zero either way).
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.random_range(0..self.prob.len());
        let u: f64 = rng.random();
        if u < self.prob[i] {
            i
        } else {
            self.alias[i].to_usize()
        }
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_counts<S, R>(sampler: &S, rng: &mut R, draws: usize) -> Vec<usize>
where
    S: crate::IndexSampler,
    R: Rng + ?Sized,
{
    let mut counts = vec![0usize; sampler.len()];
    for _ in 0..draws {
        counts[sampler.sample_index(rng)] += 1;
    }
    counts
}

#[cfg(test)]
pub(crate) fn assert_frequencies<S: crate::IndexSampler>(
    sampler: &S,
    weights: &[f64],
    seed: u64,
    tolerance: f64,
) {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let draws = 100_000;
    let mut rng = StdRng::seed_from_u64(seed);
    let counts = sample_counts(sampler, &mut rng, draws);

    let sum_w: f64 = weights.iter().sum();
    for (i, &c) in counts.iter().enumerate() {
        let p = weights[i] / sum_w;
        let emp = c as f64 / draws as f64;
        assert!(
            (emp - p).abs() < tolerance,
            "i={i} emp={emp} p={p} seed={seed}"
        );
    }
}
