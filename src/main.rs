//! libevolve CLI - Run a demo optimization problem from JSON configuration.

use std::path::PathBuf;
use std::time::Instant;

use libevolve::{
    compute::evolution::{BooleanParameter, EvolutionEngine, FloatParameter, Parameter},
    schema::{GaConfig, Gene, ObjectiveWeights},
};

const ONE_MAX_BITS: usize = 32;
const SPHERE_DIMENSIONS: usize = 5;

type Objective = fn(&[Gene]) -> Result<f64, String>;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <one-max|sphere> [config.json]", args[0]);
        eprintln!();
        eprintln!("Run a demo genetic algorithm problem.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  one-max      Maximize the number of set bits in a {ONE_MAX_BITS}-bit string");
        eprintln!("  sphere       Minimize the sum of squares over {SPHERE_DIMENSIONS} variables");
        eprintln!("  config.json  Path to GA configuration file (default: built-in)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config = match args.get(2) {
        Some(path) => GaConfig::load(PathBuf::from(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => GaConfig::default(),
    };

    let (parameters, weights, fitness) = match args[1].as_str() {
        "one-max" => (one_max_parameters(), ObjectiveWeights::maximize(), one_max as Objective),
        "sphere" => (sphere_parameters(), ObjectiveWeights::minimize(), sphere as Objective),
        other => {
            eprintln!("Unknown problem: {}", other);
            std::process::exit(1);
        }
    };

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    println!("libevolve: {}", args[1]);
    println!("=========={}", "=".repeat(args[1].len()));
    println!("Parameters: {}", parameters.len());
    println!("Population: {}", engine.config().population_size);
    println!("Generations: {}", engine.config().nb_generations);
    println!("Crossover: {:?}", engine.config().crossover);
    println!("Seed: {}", engine.seed());
    println!();

    let start = Instant::now();
    let result = engine
        .run_with_callback(&parameters, &fitness, &weights, |report| {
            println!(
                "  Gen {:>4}: evals={:>4} mean={:>10.4} max={:>10.4} std={:.4}",
                report.stats.generation,
                report.stats.evaluations,
                report.stats.mean_fitness,
                report.stats.max_fitness,
                report.stats.std_fitness
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });
    let elapsed = start.elapsed();

    println!();
    println!("Best individual {}:", result.best.id);
    println!("  Genes: {}", format_genes(&result.best.genes));
    println!("  Fitness: {:?}", result.best_fitness);
    println!("Lineage: {} individuals", result.lineage.len());
    println!("Time: {:.3}s", elapsed.as_secs_f32());
}

fn one_max_parameters() -> Vec<Box<dyn Parameter>> {
    (0..ONE_MAX_BITS)
        .map(|i| Box::new(BooleanParameter::new(format!("bit{i}"))) as Box<dyn Parameter>)
        .collect()
}

fn sphere_parameters() -> Vec<Box<dyn Parameter>> {
    (0..SPHERE_DIMENSIONS)
        .filter_map(|i| FloatParameter::new(format!("x{i}"), -5.12, 5.12).ok())
        .map(|p| Box::new(p) as Box<dyn Parameter>)
        .collect()
}

fn one_max(genes: &[Gene]) -> Result<f64, String> {
    Ok(genes.iter().filter(|g| g.as_bool() == Some(true)).count() as f64)
}

fn sphere(genes: &[Gene]) -> Result<f64, String> {
    genes
        .iter()
        .map(|g| g.as_f64().ok_or_else(|| format!("expected a numeric gene, got {g}")))
        .map(|x| x.map(|x| x * x))
        .sum()
}

fn format_genes(genes: &[Gene]) -> String {
    genes
        .iter()
        .map(|g| match g {
            Gene::Float(x) => format!("{x:.4}"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_example_config() {
    let config = GaConfig::default().with_seed(42);

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
