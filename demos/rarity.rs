use std::collections::HashMap;
use vosetables::{UniformEnum, WeightedEnum, WeightedTable};

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, WeightedEnum)]
enum Rarity {
    #[probability(1/1000)]
    Mythic,
    #[probability(1/100)]
    Legendary,
    #[probability(20/100)]
    Uncommon,
    #[probability(50/100)]
    Common,
}

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, UniformEnum)]
enum LegendaryLoot {
    Thunderfury,
    Sulfuras,
    Atiesh,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build straight from the enums:
    let rarity = Rarity::weighted_table()?; // uses the macro-provided ENTRIES
    let legendaries = LegendaryLoot::uniform_table()?; // StaticTable<UniformSampler, _>

    // Or, if you want to mix arbitrary items with weights:
    let _custom: WeightedTable<&'static str> =
        WeightedTable::from_pairs([("sword", 1.0), ("shield", 3.0)])?;

    let mut rng = rand::rng();
    let mut rarity_hist: HashMap<Rarity, u64> = HashMap::default();
    let mut leg_hist: HashMap<LegendaryLoot, u64> = HashMap::default();

    for _ in 0..2_000_000 {
        let r = *rarity.sample(&mut rng);
        *rarity_hist.entry(r).or_default() += 1;

        if matches!(r, Rarity::Legendary | Rarity::Mythic) {
            *leg_hist.entry(legendaries.sample_owned(&mut rng)).or_default() += 1;
        }
    }

    println!("Rarity:");
    let mut v: Vec<_> = rarity_hist.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (k, c) in v {
        println!("{c:>7} {k:?}");
    }

    println!("\nLegendary Loot (only when legendary):");
    let mut v: Vec<_> = leg_hist.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (k, c) in v {
        println!("{c:>7} {k:?}");
    }

    Ok(())
}
