use vosetables::{AliasTable, BuildOptions, validate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A die loaded proportionally to its face value.
    let weights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let table: AliasTable = AliasTable::build(validate(&weights)?, BuildOptions::default())?;

    let mut rng = rand::rng();
    let draws = 1_000_000;
    let mut counts = [0u64; 6];
    for _ in 0..draws {
        counts[table.sample_index(&mut rng)] += 1;
    }

    let total: f64 = weights.iter().sum();
    println!("face  expected  observed");
    for (i, &c) in counts.iter().enumerate() {
        let expected = weights[i] / total;
        let observed = c as f64 / draws as f64;
        println!("{:>4}  {expected:>8.4}  {observed:>8.4}", i + 1);
    }

    Ok(())
}
