use poi_route_derive::New;

use crate::Coordinate;

/// Visiting order produced by the optimizer.
#[derive(Clone, Debug, PartialEq, New)]
pub struct OptimizedRoute {
    pub names: Vec<String>,
    pub cost_km: f64,
    /// Cost of the starting shuffle of the winning run.
    pub initial_cost_km: f64,
    pub improvements: usize,
}

impl OptimizedRoute {
    /// Cost rounded to two decimals, as reported to clients.
    pub fn rounded_cost_km(&self) -> f64 {
        (self.cost_km * 100.0).round() / 100.0
    }
}

#[derive(Debug, Default, PartialEq, New)]
pub struct RouteMetrics {
    pub legs: usize,
    pub total_km: f64,
    pub longest_km: f64,
    pub average_km: f64,
}

impl RouteMetrics {
    /// Leg statistics for an open path over `points`. Fewer than two points give no legs.
    #[must_use]
    pub fn from_points(points: &[Coordinate]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }

        let distances: Vec<f64> = points.windows(2).map(|w| w[0].dist_km(&w[1])).collect();
        let legs = distances.len();
        let total_km: f64 = distances.iter().sum();
        let longest_km = distances.iter().copied().fold(0.0_f64, f64::max);
        let average_km = total_km / legs as f64;

        Self::new(legs, total_km, longest_km, average_km)
    }
}

#[cfg(test)]
mod tests {
    use super::{OptimizedRoute, RouteMetrics};
    use crate::Coordinate;

    #[test]
    fn rounded_cost_keeps_two_decimals() {
        let route = OptimizedRoute::new(vec!["A".into()], 1234.5678, 2000.0, 3);
        assert_eq!(route.rounded_cost_km(), 1234.57);
    }

    #[test]
    fn metrics_for_short_paths_are_empty() {
        assert_eq!(RouteMetrics::from_points(&[]), RouteMetrics::default());
        assert_eq!(
            RouteMetrics::from_points(&[Coordinate::new(1.0, 1.0)]),
            RouteMetrics::default()
        );
    }

    #[test]
    fn metrics_summarise_each_leg() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 3.0),
        ];
        let short = points[0].dist_km(&points[1]);
        let long = points[1].dist_km(&points[2]);

        let metrics = RouteMetrics::from_points(&points);
        assert_eq!(metrics.legs, 2);
        assert!((metrics.total_km - (short + long)).abs() < 1e-9);
        assert!((metrics.longest_km - long).abs() < 1e-9);
        assert!((metrics.average_km - (short + long) / 2.0).abs() < 1e-9);
    }
}
