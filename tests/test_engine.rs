use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use microga::{
    Crossover, EngineOptions, EvolutionEngine, GeneticError, Mutation, OnePointCrossover,
    QualityFunction, RandomNumberGenerator, RankSelection, RouletteSelection, TournamentSelection,
};

/// Individuals are fixed-length bitstrings; quality counts the one-bits.
struct CountOnes;

impl QualityFunction<Vec<u8>> for CountOnes {
    fn quality(&self, individual: &Vec<u8>) -> f64 {
        individual.iter().filter(|&&bit| bit == 1).count() as f64
    }
}

/// Counts evaluations so tests can verify how often the engine re-evaluates.
struct CountingQuality {
    evaluations: Arc<AtomicUsize>,
}

impl QualityFunction<Vec<u8>> for CountingQuality {
    fn quality(&self, individual: &Vec<u8>) -> f64 {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        individual.iter().filter(|&&bit| bit == 1).count() as f64
    }
}

struct FlipBit;

impl Mutation<Vec<u8>> for FlipBit {
    fn mutate(&self, mut individual: Vec<u8>, rng: &mut RandomNumberGenerator) -> Vec<u8> {
        let index = rng.gen_range(0..individual.len());
        individual[index] ^= 1;
        individual
    }
}

/// Mutation wrapper that records how often the engine invoked it.
struct CountingMutation {
    calls: Arc<AtomicUsize>,
}

impl Mutation<Vec<u8>> for CountingMutation {
    fn mutate(&self, individual: Vec<u8>, rng: &mut RandomNumberGenerator) -> Vec<u8> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        FlipBit.mutate(individual, rng)
    }
}

/// Crossover wrapper that records how often the engine invoked it.
struct CountingCrossover {
    calls: Arc<AtomicUsize>,
}

impl Crossover<Vec<u8>> for CountingCrossover {
    fn crossover(
        &self,
        parent1: &Vec<u8>,
        parent2: &Vec<u8>,
        rng: &mut RandomNumberGenerator,
    ) -> (Vec<u8>, Vec<u8>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OnePointCrossover.crossover(parent1, parent2, rng)
    }
}

/// A small population with varied quality: 0, 2, 4, 6, and 8 one-bits.
fn sample_population() -> Vec<Vec<u8>> {
    (0..5)
        .map(|i| {
            let mut bits = vec![0u8; 8];
            for bit in bits.iter_mut().take(i * 2) {
                *bit = 1;
            }
            bits
        })
        .collect()
}

#[test]
fn test_initialize_with_empty_population_fails() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_selection(TournamentSelection::default())
        .build()
        .unwrap();

    let result = engine.initialize(Vec::new());
    assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
}

#[test]
fn test_advancing_before_initialize_fails() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_selection(TournamentSelection::default())
        .build()
        .unwrap();

    assert!(matches!(
        engine.advance_one_generation(),
        Err(GeneticError::NotInitialized)
    ));
    assert!(matches!(
        engine.run_for_generations(3),
        Err(GeneticError::NotInitialized)
    ));
    assert!(matches!(
        engine.run_until_threshold(1.0, 3),
        Err(GeneticError::NotInitialized)
    ));
}

#[test]
fn test_builder_requires_quality_and_selection() {
    let missing_quality = EvolutionEngine::<Vec<u8>>::builder()
        .with_selection(TournamentSelection::default())
        .build();
    assert!(matches!(
        missing_quality,
        Err(GeneticError::Configuration(_))
    ));

    let missing_selection = EvolutionEngine::<Vec<u8>>::builder()
        .with_quality(CountOnes)
        .build();
    assert!(matches!(
        missing_selection,
        Err(GeneticError::Configuration(_))
    ));
}

#[test]
fn test_population_and_qualities_stay_aligned() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_crossover(OnePointCrossover)
        .with_mutation(FlipBit)
        .with_selection(TournamentSelection::new(3, 0.9).unwrap())
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();

    for generation in 1..=10 {
        engine.advance_one_generation().unwrap();

        let population = engine.population().unwrap();
        let qualities = engine.qualities().unwrap();
        assert_eq!(population.len(), 5);
        assert_eq!(qualities.len(), 5);
        assert_eq!(engine.generation(), generation);

        let max = qualities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (_, best_quality) = engine.best().unwrap();
        assert_eq!(best_quality, max);

        for (individual, &quality) in population.iter().zip(qualities) {
            assert_eq!(CountOnes.quality(individual), quality);
        }
    }
}

#[test]
fn test_run_for_zero_generations_returns_initial_best() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_selection(RouletteSelection::new())
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();

    let result = engine.run_for_generations(0).unwrap();
    assert_eq!(result.quality, 8.0);
    assert_eq!(result.best, vec![1u8; 8]);
    assert_eq!(engine.generation(), 0);
}

#[test]
fn test_threshold_met_at_initialization_skips_advancement() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountingQuality {
            evaluations: Arc::clone(&evaluations),
        })
        .with_selection(TournamentSelection::default())
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();
    assert_eq!(evaluations.load(Ordering::SeqCst), 5);

    // The initial best (8 one-bits) already meets the threshold.
    let result = engine.run_until_threshold(8.0, 100).unwrap();
    assert_eq!(result.generations, 0);
    assert_eq!(result.quality, 8.0);
    // No generation advanced, so nothing was re-evaluated.
    assert_eq!(evaluations.load(Ordering::SeqCst), 5);
}

#[test]
fn test_threshold_run_stops_at_generation_budget() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_mutation(FlipBit)
        .with_selection(TournamentSelection::new(3, 0.9).unwrap())
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();

    // Unreachable threshold: an 8-bit individual caps out at quality 8.
    let result = engine.run_until_threshold(100.0, 4).unwrap();
    assert_eq!(result.generations, 4);
    assert!(result.quality < 100.0);
}

#[test]
fn test_full_elitism_is_a_pure_carry_over() {
    let mutation_calls = Arc::new(AtomicUsize::new(0));
    let crossover_calls = Arc::new(AtomicUsize::new(0));

    let options = EngineOptions::builder()
        .crossover_chance(1.0)
        .mutation_chance(1.0)
        .elitist_fraction(1.0)
        .build()
        .unwrap();

    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_crossover(CountingCrossover {
            calls: Arc::clone(&crossover_calls),
        })
        .with_mutation(CountingMutation {
            calls: Arc::clone(&mutation_calls),
        })
        .with_selection(TournamentSelection::default())
        .with_options(options)
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();

    let mut before: Vec<f64> = engine.qualities().unwrap().to_vec();
    engine.advance_one_generation().unwrap();
    let mut after: Vec<f64> = engine.qualities().unwrap().to_vec();

    before.sort_by(|a, b| a.partial_cmp(b).unwrap());
    after.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(before, after);

    assert_eq!(mutation_calls.load(Ordering::SeqCst), 0);
    assert_eq!(crossover_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_odd_population_with_certain_crossover_keeps_size() {
    let options = EngineOptions::builder()
        .crossover_chance(1.0)
        .mutation_chance(0.0)
        .build()
        .unwrap();

    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_crossover(OnePointCrossover)
        .with_selection(TournamentSelection::new(2, 0.9).unwrap())
        .with_options(options)
        .with_seed(42)
        .build()
        .unwrap();

    // 5 individuals: the last slot must be filled by the single-parent path.
    engine.initialize(sample_population()).unwrap();

    for _ in 0..10 {
        engine.advance_one_generation().unwrap();
        assert_eq!(engine.population().unwrap().len(), 5);
    }
}

#[test]
fn test_crossover_chance_without_capability_is_ignored() {
    let options = EngineOptions::builder()
        .crossover_chance(1.0)
        .mutation_chance(1.0)
        .build()
        .unwrap();

    // Neither crossover nor mutation configured; both chances are ignored.
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_selection(TournamentSelection::default())
        .with_options(options)
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();
    engine.advance_one_generation().unwrap();

    assert_eq!(engine.population().unwrap().len(), 5);
}

#[test]
fn test_single_individual_population() {
    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_crossover(OnePointCrossover)
        .with_mutation(FlipBit)
        .with_selection(RouletteSelection::new())
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(vec![vec![1u8, 0, 1, 0]]).unwrap();
    engine.advance_one_generation().unwrap();

    assert_eq!(engine.population().unwrap().len(), 1);
}

#[test]
fn test_observer_receives_generation_summaries() {
    let summaries: Arc<Mutex<Vec<(usize, f64, f64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&summaries);

    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_mutation(FlipBit)
        .with_selection(TournamentSelection::new(2, 0.9).unwrap())
        .with_observer(move |summary: microga::GenerationSummary<'_, Vec<u8>>| {
            sink.lock().unwrap().push((
                summary.generation,
                summary.best_quality,
                summary.mean_quality,
            ));
        })
        .with_seed(42)
        .build()
        .unwrap();

    engine.initialize(sample_population()).unwrap();
    engine.run_for_generations(3).unwrap();

    let seen = summaries.lock().unwrap();
    let generations: Vec<usize> = seen.iter().map(|&(generation, _, _)| generation).collect();
    assert_eq!(generations, vec![0, 1, 2, 3]);

    for &(_, best_quality, mean_quality) in seen.iter() {
        assert!(mean_quality <= best_quality);
    }
}

#[test]
fn test_non_finite_quality_aborts_initialization() {
    struct BadQuality;

    impl QualityFunction<Vec<u8>> for BadQuality {
        fn quality(&self, _individual: &Vec<u8>) -> f64 {
            f64::NAN
        }
    }

    let mut engine = EvolutionEngine::builder()
        .with_quality(BadQuality)
        .with_selection(TournamentSelection::default())
        .build()
        .unwrap();

    let result = engine.initialize(sample_population());
    assert!(matches!(result, Err(GeneticError::FitnessCalculation(_))));

    // Nothing was committed, so the engine is still uninitialized.
    assert!(matches!(
        engine.advance_one_generation(),
        Err(GeneticError::NotInitialized)
    ));
}

#[test]
fn test_evolution_improves_count_ones() {
    let options = EngineOptions::builder()
        .crossover_chance(0.7)
        .mutation_chance(0.3)
        .elitist_fraction(0.1)
        .build()
        .unwrap();

    let mut engine = EvolutionEngine::builder()
        .with_quality(CountOnes)
        .with_crossover(OnePointCrossover)
        .with_mutation(FlipBit)
        .with_selection(TournamentSelection::new(3, 0.9).unwrap())
        .with_options(options)
        .with_seed(42)
        .build()
        .unwrap();

    // 30 individuals of 20 bits, alternating patterns: initial best is 10.
    let population: Vec<Vec<u8>> = (0..30)
        .map(|i| (0..20).map(|j| ((i + j) % 2) as u8).collect())
        .collect();

    engine.initialize(population).unwrap();
    let (_, initial_quality) = engine.best().unwrap();
    assert_eq!(initial_quality, 10.0);

    let result = engine.run_for_generations(40).unwrap();

    // Elitism keeps the best individual, so quality can only climb.
    assert!(result.quality >= initial_quality);
    assert_eq!(result.quality, engine.best().unwrap().1);
    assert_eq!(engine.generation(), 40);
}

#[test]
fn test_sequential_evaluation_matches_parallel() {
    let population = sample_population();

    let mut results = Vec::new();
    for parallel in [true, false] {
        let options = EngineOptions::builder()
            .parallel_evaluation(parallel)
            .build()
            .unwrap();

        let mut engine = EvolutionEngine::builder()
            .with_quality(CountOnes)
            .with_selection(RankSelection::with_p(0.9).unwrap())
            .with_options(options)
            .with_seed(42)
            .build()
            .unwrap();

        engine.initialize(population.clone()).unwrap();
        results.push(engine.qualities().unwrap().to_vec());
    }

    assert_eq!(results[0], results[1]);
}
