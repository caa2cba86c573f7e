//! weightpick CLI: draw from, pop from, simulate and check weighted pools.
//!
//! Commands:
//! - `draw`: select entries with replacement
//! - `pop`: select entries without replacement
//! - `simulate`: run many draws in parallel and compare frequencies to weights
//! - `check`: validate a pool file and print its probability table
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use weightpick_core::simulate::DEFAULT_CHUNK;
use weightpick_core::{
    simulate, FrequencyReport, Pool, SeedHierarchy, UniformSource, WeightedBag,
};

#[derive(Parser)]
#[command(
    name = "weightpick",
    about = "Probability-weighted selection from TOML pools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select entries with replacement.
    Draw {
        /// Path to a TOML pool file.
        #[arg(long)]
        pool: PathBuf,

        /// Number of selections.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Master seed. Overrides the pool file's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of one name per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Select entries without replacement.
    Pop {
        /// Path to a TOML pool file.
        #[arg(long)]
        pool: PathBuf,

        /// Number of entries to remove (at most the pool size).
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Master seed. Overrides the pool file's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of one name per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run many draws in parallel and compare observed to expected frequencies.
    Simulate {
        /// Path to a TOML pool file.
        #[arg(long)]
        pool: PathBuf,

        /// Total number of draws.
        #[arg(long, default_value_t = 1_000_000)]
        draws: u64,

        /// Master seed. Overrides the pool file's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Draws per parallel chunk.
        #[arg(long, default_value_t = DEFAULT_CHUNK)]
        chunk: usize,

        /// Also write the frequency table to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Validate a pool file and print its probability table.
    Check {
        /// Path to a TOML pool file.
        #[arg(long)]
        pool: PathBuf,
    },
}

/// One line of `draw`/`pop` JSON output.
#[derive(Serialize)]
struct PickRecord<'a> {
    name: &'a str,
    index: usize,
}

#[derive(Serialize)]
struct PickOutput<'a> {
    seed: u64,
    picks: Vec<PickRecord<'a>>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Draw {
            pool,
            count,
            seed,
            json,
        } => run_draw(&pool, count, seed, json),
        Commands::Pop {
            pool,
            count,
            seed,
            json,
        } => run_pop(&pool, count, seed, json),
        Commands::Simulate {
            pool,
            draws,
            seed,
            chunk,
            csv,
        } => run_simulate(&pool, draws, seed, chunk, csv.as_deref()),
        Commands::Check { pool } => run_check(&pool),
    }
}

/// Master seed precedence: `--seed` flag, then the pool file, then OS entropy.
fn resolve_seed(flag: Option<u64>, file: Option<u64>) -> SeedHierarchy {
    match flag.or(file) {
        Some(s) => SeedHierarchy::new(s),
        None => SeedHierarchy::from_entropy(),
    }
}

fn load(path: &Path, seed: Option<u64>) -> Result<(WeightedBag<String>, SeedHierarchy)> {
    let pool =
        Pool::from_file(path).with_context(|| format!("loading pool {}", path.display()))?;
    let seeds = resolve_seed(seed, pool.seed);
    log::info!(
        "pool {} ({} entries, seed {})",
        path.display(),
        pool.entries.len(),
        seeds.master_seed()
    );
    Ok((pool.into_bag()?, seeds))
}

fn run_draw(path: &Path, count: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let (bag, seeds) = load(path, seed)?;
    let mut rng = seeds.rng_for("draw", 0);

    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = bag.draw(&mut rng)?;
        picks.push(PickRecord {
            name: pick.item,
            index: pick.index,
        });
    }

    print_picks(seeds.master_seed(), picks, json)
}

fn run_pop(path: &Path, count: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let (bag, seeds) = load(path, seed)?;
    let mut rng = seeds.rng_for("pop", 0);
    let popped = pop_entries(bag, count, &mut rng)?;

    let picks = popped
        .iter()
        .map(|(name, index)| PickRecord {
            name,
            index: *index,
        })
        .collect();
    print_picks(seeds.master_seed(), picks, json)
}

/// Pop `count` names, each paired with its index in the pool file rather
/// than in the shrinking bag.
fn pop_entries<S>(
    mut bag: WeightedBag<String>,
    count: usize,
    source: &mut S,
) -> Result<Vec<(String, usize)>>
where
    S: UniformSource + ?Sized,
{
    if count > bag.len() {
        bail!(
            "cannot pop {count} entries from a pool of {} without replacement",
            bag.len()
        );
    }

    let names: Vec<String> = bag.items().to_vec();
    let mut popped = Vec::with_capacity(count);
    for _ in 0..count {
        let name = bag.pop(source)?.item;
        let index = names
            .iter()
            .position(|n| *n == name)
            .context("popped entry missing from pool")?;
        popped.push((name, index));
    }
    Ok(popped)
}

fn print_picks(seed: u64, picks: Vec<PickRecord<'_>>, json: bool) -> Result<()> {
    if json {
        let output = PickOutput { seed, picks };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for pick in &picks {
            println!("{}", pick.name);
        }
    }
    Ok(())
}

fn run_simulate(
    path: &Path,
    draws: u64,
    seed: Option<u64>,
    chunk: usize,
    csv_path: Option<&Path>,
) -> Result<()> {
    let (bag, seeds) = load(path, seed)?;
    let report = simulate(&bag, draws, &seeds, chunk)?;

    print_report(&bag, &report);

    if let Some(out) = csv_path {
        write_csv(&bag, &report, out)?;
        println!("Frequencies written to: {}", out.display());
    }
    Ok(())
}

fn print_report(bag: &WeightedBag<String>, report: &FrequencyReport) {
    println!("Draws: {}  Seed: {}", report.draws, report.master_seed);
    println!();
    println!(
        "{:<20} {:>12} {:>10} {:>10}",
        "Entry", "Count", "Observed", "Expected"
    );
    println!("{}", "-".repeat(55));
    for (row, name) in report.rows.iter().zip(bag.items()) {
        println!(
            "{:<20} {:>12} {:>10.5} {:>10.5}",
            name, row.count, row.observed, row.expected
        );
    }
    println!();
    println!("Max deviation: {:.6}", report.max_deviation());
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    index: usize,
    count: u64,
    observed: f64,
    expected: f64,
}

fn write_csv(bag: &WeightedBag<String>, report: &FrequencyReport, out: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(out).with_context(|| format!("creating {}", out.display()))?;
    for (row, name) in report.rows.iter().zip(bag.items()) {
        writer.serialize(CsvRow {
            name,
            index: row.index,
            count: row.count,
            observed: row.observed,
            expected: row.expected,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let pool =
        Pool::from_file(path).with_context(|| format!("loading pool {}", path.display()))?;
    let seed = pool.seed;
    let bag = pool.into_bag()?;
    let total = bag.total_weight();

    println!("Pool: {}", path.display());
    println!("Entries: {}", bag.len());
    println!("Total weight: {total}");
    match seed {
        Some(s) => println!("Seed: {s}"),
        None => println!("Seed: (none, draws use OS entropy)"),
    }
    if total == 0.0 {
        println!("Warning: all weights are zero; every draw selects the last entry");
    }
    println!();
    println!("{:<5} {:<20} {:>10} {:>12}", "#", "Entry", "Weight", "Probability");
    println!("{}", "-".repeat(50));
    for (index, (name, weight)) in bag.iter().enumerate() {
        let p = bag.probability(index).unwrap_or(0.0);
        println!("{index:<5} {name:<20} {weight:>10} {p:>12.6}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use weightpick_core::ScriptedDraws;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_draw_flags() {
        let cli = Cli::try_parse_from([
            "weightpick", "draw", "--pool", "loot.toml", "--count", "3", "--seed", "9", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Draw {
                pool,
                count,
                seed,
                json,
            } => {
                assert_eq!(pool, PathBuf::from("loot.toml"));
                assert_eq!(count, 3);
                assert_eq!(seed, Some(9));
                assert!(json);
            }
            _ => panic!("expected draw"),
        }
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::try_parse_from(["weightpick", "simulate", "--pool", "loot.toml"]).unwrap();
        match cli.command {
            Commands::Simulate {
                draws, chunk, csv, ..
            } => {
                assert_eq!(draws, 1_000_000);
                assert_eq!(chunk, DEFAULT_CHUNK);
                assert!(csv.is_none());
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn pool_is_required() {
        assert!(Cli::try_parse_from(["weightpick", "check"]).is_err());
    }

    // ── Seed precedence and pops ─────────────────────────────────

    const LOOT: &str = r#"
seed = 2024

[[entries]]
name = "copper"
weight = 60.0

[[entries]]
name = "silver"
weight = 30.0

[[entries]]
name = "gold"
weight = 9.0

[[entries]]
name = "relic"
weight = 1.0
"#;

    fn write_pool(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn seed_flag_beats_file_beats_entropy() {
        assert_eq!(resolve_seed(Some(7), Some(2024)).master_seed(), 7);
        assert_eq!(resolve_seed(None, Some(2024)).master_seed(), 2024);
        assert_eq!(resolve_seed(Some(7), None).master_seed(), 7);

        let a = resolve_seed(None, None).master_seed();
        let b = resolve_seed(None, None).master_seed();
        assert_ne!(a, b, "entropy seeds should differ between runs");
    }

    #[test]
    fn load_uses_file_seed_unless_flag_given() {
        let file = write_pool(LOOT);
        let (_, seeds) = load(file.path(), None).unwrap();
        assert_eq!(seeds.master_seed(), 2024);

        let (_, seeds) = load(file.path(), Some(9)).unwrap();
        assert_eq!(seeds.master_seed(), 9);
    }

    #[test]
    fn pop_more_than_pool_size_is_an_error() {
        let file = write_pool(LOOT);
        let (bag, seeds) = load(file.path(), None).unwrap();
        let mut rng = seeds.rng_for("pop", 0);
        let err = pop_entries(bag, 5, &mut rng).unwrap_err();
        assert!(err.to_string().contains("cannot pop 5 entries"), "{err}");
    }

    #[test]
    fn popped_indices_follow_pool_file_order() {
        let file = write_pool(LOOT);
        let file_order = ["copper", "silver", "gold", "relic"];

        // Pop relic first, then whatever sits last: indices must not shift.
        let (bag, _) = load(file.path(), None).unwrap();
        let mut src = ScriptedDraws::new(vec![0.9999, 0.9999, 0.0, 0.0]);
        let popped = pop_entries(bag, 4, &mut src).unwrap();
        let expected: Vec<(String, usize)> = vec![
            ("relic".into(), 3),
            ("gold".into(), 2),
            ("copper".into(), 0),
            ("silver".into(), 1),
        ];
        assert_eq!(popped, expected);

        let (bag, seeds) = load(file.path(), None).unwrap();
        let mut rng = seeds.rng_for("pop", 0);
        let popped = pop_entries(bag, 4, &mut rng).unwrap();
        let mut seen: Vec<usize> = popped.iter().map(|(_, i)| *i).collect();
        for (name, index) in &popped {
            assert_eq!(file_order[*index], name);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
