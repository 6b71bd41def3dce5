//! Compensated (Kahan) summation for the builder's scaling step.
//!
//! Naive left-to-right addition loses low-order bits on every add; over a
//! long weight slice that error lands directly in the normalization scalar.
//! Kahan's trick keeps a running compensation term holding the bits the last
//! addition dropped.

/// Sum `xs` with a single compensated accumulator.
pub fn kahan_sum(xs: &[f64]) -> f64 {
    let mut total = 0.0f64;
    let mut comp = 0.0f64;
    for &x in xs {
        let y = x - comp;
        let t = total + y;
        comp = (t - total) - y;
        total = t;
    }
    total
}

const LANES: usize = 4;

/// Sum `xs` with [`LANES`] independent compensated accumulators.
///
/// Each lane runs the same recurrence as [`kahan_sum`] over a strided
/// sub-sequence, so the loop body has no cross-iteration dependency chain and
/// auto-vectorizes. Lane totals (compensations included) and the tail are
/// reduced through the scalar accumulator; the result agrees with
/// [`kahan_sum`] to within floating tolerance.
pub fn kahan_sum_lanes(xs: &[f64]) -> f64 {
    let mut totals = [0.0f64; LANES];
    let mut comps = [0.0f64; LANES];

    let mut chunks = xs.chunks_exact(LANES);
    for chunk in &mut chunks {
        for (lane, &x) in chunk.iter().enumerate() {
            let y = x - comps[lane];
            let t = totals[lane] + y;
            comps[lane] = (t - totals[lane]) - y;
            totals[lane] = t;
        }
    }

    let mut total = 0.0f64;
    let mut comp = 0.0f64;
    for x in totals
        .into_iter()
        .chain(comps.into_iter().map(|c| -c))
        .chain(chunks.remainder().iter().copied())
    {
        let y = x - comp;
        let t = total + y;
        comp = (t - total) - y;
        total = t;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_cancelled_low_bits() {
        // 1.0 vanishes entirely under naive accumulation next to 1e16.
        let xs = [1e16, 1.0, 1.0, 1.0, 1.0, -1e16];
        assert_eq!(kahan_sum(&xs), 4.0);
        assert_eq!(kahan_sum_lanes(&xs), 4.0);
    }

    #[test]
    fn lanes_agree_with_scalar() {
        // Lengths straddling the chunk boundary, values spanning magnitudes.
        for n in [1usize, 3, 4, 5, 8, 17, 1000] {
            let xs: Vec<f64> = (0..n).map(|i| 1.0 / (i as f64 + 1.0)).collect();
            let a = kahan_sum(&xs);
            let b = kahan_sum_lanes(&xs);
            assert!((a - b).abs() <= 1e-12 * a.abs().max(1.0), "n={n} {a} {b}");
        }
    }

    #[test]
    fn empty_and_singleton() {
        assert_eq!(kahan_sum(&[]), 0.0);
        assert_eq!(kahan_sum_lanes(&[]), 0.0);
        assert_eq!(kahan_sum_lanes(&[2.5]), 2.5);
    }
}
