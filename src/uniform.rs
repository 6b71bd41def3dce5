use crate::StaticTable;
use crate::error::WeightError;
use crate::sampler::UniformSampler;
use rand::Rng;

/// A compact uniform table: all items are equally likely.
/// Space: just the items (no alias/prob arrays).
#[derive(Debug, Clone)]
pub struct UniformTable<T> {
    items: Vec<T>,
}

impl<T> UniformTable<T> {
    /// Build from any iterator of items. Errors if empty.
    pub fn from_items<I>(items: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(WeightError::Empty);
        }
        Ok(Self { items })
    }

    /// Convenience for arrays.
    pub fn from_array<const N: usize>(items: [T; N]) -> Result<Self, WeightError>
    where
        T: Clone,
    {
        if N == 0 {
            return Err(WeightError::Empty);
        }
        Ok(Self {
            items: items.to_vec(),
        })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sample **by reference**.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        let i = rng.random_range(0..self.items.len());
        &self.items[i]
    }

    /// Sample **by value** (clones).
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.items[rng.random_range(0..self.items.len())].clone()
    }

    /// Expose items if you need them.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

/// Trait implemented by the `UniformEnum` derive macro.
///
/// Exposes the variants as a static slice and provides a zero-storage
/// uniform table over them.
pub trait UniformEnum: Sized + 'static {
    /// All variants in declaration order.
    const VARS: &'static [Self];

    /// Zero-alloc, zero-clone uniform table backed by `UniformSampler` and a
    /// `&'static [Self]`. Requires `Copy` so we can offer `.sample_owned()`.
    fn uniform_table() -> Result<StaticTable<UniformSampler, Self>, WeightError>
    where
        Self: Copy + 'static,
    {
        let sampler = UniformSampler::new(Self::VARS.len())?;
        Ok(StaticTable::new(sampler, Self::VARS))
    }

    /// If you explicitly want an owning Vec-backed table (allocates),
    /// use this. Handy if you don't have `'static` or don't want `Copy`.
    fn uniform_table_stateful() -> Result<UniformTable<Self>, WeightError>
    where
        Self: Clone,
    {
        // build from the static slice into a Vec
        UniformTable::from_items(Self::VARS.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticTable;

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(
            UniformTable::<u8>::from_items([]),
            Err(WeightError::Empty)
        ));
        assert!(matches!(
            UniformSampler::new(0),
            Err(WeightError::Empty)
        ));
    }

    #[test]
    fn covers_all_items() {
        let table = UniformTable::from_array(["a", "b", "c"]).unwrap();
        let mut rng = rand::rng();
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let s = table.sample(&mut rng);
            seen[["a", "b", "c"].iter().position(|x| x == s).unwrap()] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn static_table_over_uniform_sampler() {
        static COLORS: [&str; 4] = ["red", "green", "blue", "yellow"];
        let table = StaticTable::new(UniformSampler::new(COLORS.len()).unwrap(), &COLORS);
        assert_eq!(table.len(), 4);
        let mut rng = rand::rng();
        for _ in 0..100 {
            assert!(COLORS.contains(table.sample(&mut rng)));
        }
    }
}
