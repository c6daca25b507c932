//! Benchmarks for the evolution engine.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use libevolve::{
    compute::evolution::{BooleanParameter, EvolutionEngine, FloatParameter, Parameter},
    schema::{CrossoverMethod, GaConfig, Gene, ObjectiveWeights},
};

fn one_max(genes: &[Gene]) -> Result<f64, String> {
    Ok(genes.iter().filter(|g| g.as_bool() == Some(true)).count() as f64)
}

fn sphere(genes: &[Gene]) -> Result<f64, String> {
    Ok(genes.iter().filter_map(Gene::as_f64).map(|x| x * x).sum())
}

fn bench_population_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_max_population");

    let parameters: Vec<Box<dyn Parameter>> = (0..64)
        .map(|i| Box::new(BooleanParameter::new(format!("bit{i}"))) as Box<dyn Parameter>)
        .collect();
    let weights = ObjectiveWeights::maximize();

    for population_size in [16, 64, 256] {
        let config = GaConfig {
            population_size,
            nb_generations: 20,
            ..Default::default()
        }
        .with_seed(42);

        group.bench_with_input(
            BenchmarkId::from_parameter(population_size),
            &population_size,
            |b, _| {
                b.iter(|| {
                    let mut engine = EvolutionEngine::new(config.clone()).unwrap();
                    black_box(engine.evolve(&parameters, &one_max, &weights).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_crossover_method(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_crossover");

    let parameters: Vec<Box<dyn Parameter>> = (0..32)
        .map(|i| {
            Box::new(FloatParameter::new(format!("x{i}"), -5.12, 5.12).unwrap())
                as Box<dyn Parameter>
        })
        .collect();
    let weights = ObjectiveWeights::minimize();

    for (name, crossover) in [
        ("one_point", CrossoverMethod::OnePoint),
        ("two_point", CrossoverMethod::TwoPoint),
        (
            "uniform",
            CrossoverMethod::Uniform {
                swap_probability: 0.5,
            },
        ),
    ] {
        let config = GaConfig {
            population_size: 64,
            nb_generations: 20,
            crossover,
            ..Default::default()
        }
        .with_seed(42);

        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| {
                let mut engine = EvolutionEngine::new(config.clone()).unwrap();
                black_box(engine.evolve(&parameters, &sphere, &weights).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_population_size, bench_crossover_method);
criterion_main!(benches);
