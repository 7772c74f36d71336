//! Swap-neighbourhood hill climbing over a fixed iteration budget.
//!
//! A run starts from a uniformly random permutation, repeatedly swaps two random
//! positions of the best route so far and keeps the swap only when it is strictly
//! cheaper. Worse candidates are never accepted.

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    Coordinate, Error, OptimizedRoute, Result, RouteMetrics,
    geometry::{CoordinateLookup, RouteGeometry},
    options::OptimizerOptions,
    random::RandomSource,
};

const ERR_EMPTY_INPUT: &str = "at least one point is required to build a route";
const ERR_NO_RESULTS: &str = "no optimizer run produced a route";

#[derive(Clone, Debug)]
struct ClimbResult {
    order: Vec<usize>,
    cost: f64,
    initial_cost: f64,
    improvements: usize,
}

/// Orders `names` to approximately minimise the great-circle path length.
///
/// `lookup` must know every name; a missing one surfaces as
/// [`Error::LookupInconsistency`]. With `options.restarts > 1` independent runs are
/// spread over the rayon pool, each seeded from `rng`, and the cheapest route wins.
#[poi_route_derive::timer("optimizer")]
pub fn optimize_route<L, R>(
    names: &[String],
    lookup: &L,
    options: &OptimizerOptions,
    rng: &mut R,
) -> Result<OptimizedRoute>
where
    L: CoordinateLookup + ?Sized,
    R: RandomSource + ?Sized,
{
    options.validate()?;
    if names.is_empty() {
        return Err(Error::invalid_input(ERR_EMPTY_INPUT));
    }
    let mut seen = HashSet::with_capacity(names.len());
    if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(Error::invalid_input(format!("duplicate point name: {dup}")));
    }

    let points = RouteGeometry::resolve(names, lookup)?;
    log::debug!(
        "optimizer: start n={} iterations={} restarts={}",
        points.len(),
        options.iterations,
        options.restarts
    );

    let best = if options.restarts == 1 {
        climb(&points, options.iterations, rng)
    } else {
        let seeds: Vec<u64> = (0..options.restarts).map(|_| rng.next_seed()).collect();
        seeds
            .into_par_iter()
            .map(|seed| climb(&points, options.iterations, &mut StdRng::seed_from_u64(seed)))
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .ok_or_else(|| Error::other(ERR_NO_RESULTS))?
    };

    let ordered: Vec<Coordinate> = best.order.iter().map(|&idx| points[idx]).collect();
    let metrics = RouteMetrics::from_points(&ordered);
    log::info!(
        "optimizer: done n={} iterations={} restarts={} improvements={} initial_km={:.2} cost_km={:.2} legs={} longest_km={:.2} avg_km={:.2}",
        points.len(),
        options.iterations,
        options.restarts,
        best.improvements,
        best.initial_cost,
        metrics.total_km,
        metrics.legs,
        metrics.longest_km,
        metrics.average_km
    );

    Ok(OptimizedRoute::new(
        best.order.iter().map(|&idx| names[idx].clone()).collect(),
        best.cost,
        best.initial_cost,
        best.improvements,
    ))
}

fn climb<R: RandomSource + ?Sized>(points: &[Coordinate], iterations: usize, rng: &mut R) -> ClimbResult {
    let mut best: Vec<usize> = (0..points.len()).collect();
    rng.shuffle(&mut best);
    let initial_cost = RouteGeometry::ordered_length(points, &best);

    let mut result = ClimbResult {
        order: Vec::new(),
        cost: initial_cost,
        initial_cost,
        improvements: 0,
    };
    if best.len() < 2 {
        result.order = best;
        return result;
    }

    let mut candidate = best.clone();
    for _ in 0..iterations {
        let (i, j) = rng.index_pair(best.len());
        candidate.copy_from_slice(&best);
        candidate.swap(i, j);

        let cost = RouteGeometry::ordered_length(points, &candidate);
        if cost < result.cost {
            std::mem::swap(&mut best, &mut candidate);
            result.cost = cost;
            result.improvements += 1;
        }
    }

    result.order = best;
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::{ERR_EMPTY_INPUT, ERR_NO_RESULTS, climb, optimize_route};
    use crate::{
        Coordinate, Error, PointRegistry, RouteMetrics,
        geometry::{CoordinateLookup, RouteGeometry},
        options::OptimizerOptions,
        random::RandomSource,
    };

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    fn line_lookup(n: usize) -> (Vec<String>, HashMap<String, Coordinate>) {
        let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
        let lookup = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Coordinate::new(0.0, i as f64)))
            .collect();
        (names, lookup)
    }

    /// Replays fixed moves so the accept rule can be checked by hand.
    struct Scripted {
        start: Vec<usize>,
        pairs: Vec<(usize, usize)>,
    }

    impl RandomSource for Scripted {
        fn shuffle(&mut self, order: &mut [usize]) {
            order.copy_from_slice(&self.start);
        }

        fn index_pair(&mut self, _len: usize) -> (usize, usize) {
            self.pairs.remove(0)
        }

        fn next_seed(&mut self) -> u64 {
            0
        }
    }

    #[test]
    fn default_seeds_route_visits_every_point_once() {
        let registry = PointRegistry::default();
        let view = registry.merged_view();
        let names = view.names();
        let mut rng = StdRng::seed_from_u64(12_345);

        let route = optimize_route(&names, &view, &OptimizerOptions::default(), &mut rng)
            .expect("optimize");

        assert_eq!(route.names.len(), 10);
        assert_eq!(sorted(route.names.clone()), sorted(names));
        assert!(route.cost_km >= 0.0);
        assert!(route.cost_km <= route.initial_cost_km);
        let rescored = RouteGeometry::route_cost(&route.names, &view).expect("rescore");
        assert!((rescored - route.cost_km).abs() < 1e-6);
    }

    #[test]
    fn cost_never_exceeds_initial_shuffle() {
        let (names, lookup) = line_lookup(12);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = OptimizerOptions {
                iterations: 50,
                restarts: 1,
            };
            let route = optimize_route(&names, &lookup, &options, &mut rng).expect("optimize");
            assert!(route.cost_km <= route.initial_cost_km);
            assert_eq!(sorted(route.names), sorted(names.clone()));
        }
    }

    #[test]
    fn single_point_is_trivial() {
        let (names, lookup) = line_lookup(1);
        let mut rng = StdRng::seed_from_u64(1);
        let route =
            optimize_route(&names, &lookup, &OptimizerOptions::default(), &mut rng).expect("one");

        assert_eq!(route.names, vec!["P0".to_owned()]);
        assert_eq!(route.cost_km, 0.0);
        assert_eq!(route.improvements, 0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let lookup: HashMap<String, Coordinate> = HashMap::new();
        let mut rng = StdRng::seed_from_u64(1);
        let err = optimize_route(&[], &lookup, &OptimizerOptions::default(), &mut rng)
            .expect_err("empty input");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (_, lookup) = line_lookup(3);
        let names = vec!["P0".to_owned(), "P1".to_owned(), "P0".to_owned()];
        let mut rng = StdRng::seed_from_u64(1);
        let err = optimize_route(&names, &lookup, &OptimizerOptions::default(), &mut rng)
            .expect_err("duplicates");
        assert!(err.to_string().contains("duplicate point name: P0"));
    }

    #[test]
    fn missing_coordinate_propagates() {
        let (mut names, lookup) = line_lookup(3);
        names.push("Ghost".to_owned());
        let mut rng = StdRng::seed_from_u64(1);
        let err = optimize_route(&names, &lookup, &OptimizerOptions::default(), &mut rng)
            .expect_err("ghost");
        assert!(matches!(err, Error::LookupInconsistency(name) if name == "Ghost"));
    }

    #[test]
    fn same_seed_reproduces_route() {
        let registry = PointRegistry::default();
        let view = registry.merged_view();
        let names = view.names();
        let options = OptimizerOptions::default();

        let a = optimize_route(&names, &view, &options, &mut StdRng::seed_from_u64(5))
            .expect("first");
        let b = optimize_route(&names, &view, &options, &mut StdRng::seed_from_u64(5))
            .expect("second");
        assert_eq!(a, b);
    }

    #[test]
    fn collinear_route_is_never_shorter_than_the_span() {
        let (names, lookup) = line_lookup(6);
        let mut rng = StdRng::seed_from_u64(2024);
        let options = OptimizerOptions {
            iterations: 5_000,
            restarts: 4,
        };
        let route = optimize_route(&names, &lookup, &options, &mut rng).expect("optimize");

        let straight = RouteGeometry::route_cost(&names, &lookup).expect("straight");
        assert!(route.cost_km >= straight - 1e-6);
        assert!(route.cost_km <= route.initial_cost_km);
    }

    #[test]
    fn restarts_keep_every_name() {
        let registry = PointRegistry::default();
        registry.add("Extra", 18.0, -97.0).expect("add");
        let view = registry.merged_view();
        let names = view.names();
        let options = OptimizerOptions {
            iterations: 200,
            restarts: 3,
        };

        let route = optimize_route(&names, &view, &options, &mut StdRng::seed_from_u64(9))
            .expect("optimize");
        assert_eq!(sorted(route.names), sorted(names));
    }

    #[test]
    fn zero_iteration_budget_is_rejected() {
        let (names, lookup) = line_lookup(3);
        let options = OptimizerOptions {
            iterations: 0,
            restarts: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(optimize_route(&names, &lookup, &options, &mut rng).is_err());
    }

    #[test]
    fn only_strict_improvements_are_accepted() {
        // Points on a line at lon 0, 1, 2; order [0, 2, 1] costs 3 units, [0, 1, 2] costs 2.
        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ];
        let mut source = Scripted {
            start: vec![0, 2, 1],
            // One improving swap followed by a worsening one.
            pairs: vec![(1, 2), (0, 1)],
        };

        let result = climb(&points, 2, &mut source);
        assert_eq!(result.order, vec![0, 1, 2]);
        assert_eq!(result.improvements, 1);
        assert!(result.cost < result.initial_cost);
    }

    #[test]
    fn leg_metrics_of_optimized_route_sum_to_its_cost() {
        let registry = PointRegistry::default();
        let view = registry.merged_view();
        let names = view.names();
        let mut rng = StdRng::seed_from_u64(77);

        let route = optimize_route(&names, &view, &OptimizerOptions::default(), &mut rng)
            .expect("optimize");
        let ordered: Vec<Coordinate> = route
            .names
            .iter()
            .map(|name| view.coordinate(name).expect("known name"))
            .collect();
        let metrics = RouteMetrics::from_points(&ordered);

        assert_eq!(metrics.legs, names.len() - 1);
        assert!((metrics.total_km - route.cost_km).abs() < 1e-6);
        assert!(metrics.longest_km <= metrics.total_km);
    }

    #[test]
    fn error_messages_are_lowercase() {
        for msg in [ERR_EMPTY_INPUT, ERR_NO_RESULTS] {
            assert!(msg.starts_with(|c: char| c.is_ascii_lowercase()), "{msg}");
        }
    }
}
