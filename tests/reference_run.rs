//! End-to-end run on the 8-city reference instance.

use tsp_anneal::anneal::{AnnealConfig, AnnealRunner, GenerationReport};
use tsp_anneal::tsp::{evaluate, Fitness, TspInstance};

#[derive(Default)]
struct Recorder {
    generations: Vec<usize>,
    temperatures: Vec<f64>,
    sizes: Vec<usize>,
    invalid_tours: usize,
}

#[test]
fn reference_run_emits_every_generation() {
    let instance = TspInstance::reference();
    let config = AnnealConfig::default()
        .with_population_size(10)
        .with_max_generations(24)
        .with_initial_temperature(10_000.0)
        .with_cooling_ratio(0.9)
        .with_min_temperature(1_000.0)
        .with_accept_threshold(0.5)
        .with_seed(2024);

    let mut rec = Recorder::default();
    let mut observer = |r: &GenerationReport<'_>| {
        rec.generations.push(r.generation);
        rec.temperatures.push(r.temperature);
        rec.sizes.push(r.population.len());
        for ind in r.population {
            if !ind.tour().is_valid_for(&instance) {
                rec.invalid_tours += 1;
            }
            let recomputed = evaluate(ind.tour(), instance.matrix());
            assert_eq!(recomputed, ind.fitness());
            let uses_missing = ind
                .tour()
                .edges()
                .any(|(a, b)| instance.matrix().cost(a, b).is_none());
            assert_eq!(uses_missing, recomputed.is_infeasible());
        }
    };

    let result = AnnealRunner::run_with_observer(&instance, &config, &mut observer).unwrap();

    // The floor stops the run before the 24-generation cap: the truncated
    // temperature sequence is 10000, 9000, ..., 1212, 1090, then 981.
    assert_eq!(result.generations, 22);
    assert!(result.generations <= 24);
    assert_eq!(rec.generations, (0..=22).collect::<Vec<_>>());
    assert!(rec.sizes.iter().all(|&n| n == 10));
    assert_eq!(rec.invalid_tours, 0);

    let temps = &result.temperature_history;
    assert_eq!(&rec.temperatures[1..], temps.as_slice());
    assert_eq!(temps.first(), Some(&10_000.0));
    for w in temps.windows(2) {
        assert!(w[1] < w[0]);
    }
    assert!(temps.iter().all(|&t| t > 1_000.0));
    assert!(result.final_temperature < 1_000.0);

    for ind in &result.population {
        if ind.fitness() != Fitness::Infeasible {
            for (a, b) in ind.tour().edges() {
                assert!(instance.matrix().cost(a, b).is_some());
            }
        }
    }
}

#[test]
fn reference_run_finds_a_feasible_tour() {
    let instance = TspInstance::reference();
    for seed in 0..5 {
        let config = AnnealConfig::default().with_seed(seed);
        let result = AnnealRunner::run(&instance, &config).unwrap();
        assert!(
            result.best_fitness.cost().is_some(),
            "seed {seed}: no feasible tour seen"
        );
        assert_eq!(
            evaluate(result.best.tour(), instance.matrix()),
            result.best_fitness
        );
    }
}
