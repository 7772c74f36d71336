use std::{collections::HashMap, hash::BuildHasher};

use crate::{Coordinate, Error, Result};

/// Name -> coordinate resolution used to score routes.
pub trait CoordinateLookup {
    fn coordinate(&self, name: &str) -> Option<Coordinate>;
}

impl<S: BuildHasher> CoordinateLookup for HashMap<String, Coordinate, S> {
    fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.get(name).copied()
    }
}

pub struct RouteGeometry;

impl RouteGeometry {
    /// Sum of great-circle distances over consecutive names (open path, no wrap edge).
    pub fn route_cost<N, L>(route: &[N], lookup: &L) -> Result<f64>
    where
        N: AsRef<str>,
        L: CoordinateLookup + ?Sized,
    {
        let points = Self::resolve(route, lookup)?;
        Ok(Self::path_length(&points))
    }

    /// Resolves every name, failing on the first one the lookup does not know.
    pub(crate) fn resolve<N, L>(route: &[N], lookup: &L) -> Result<Vec<Coordinate>>
    where
        N: AsRef<str>,
        L: CoordinateLookup + ?Sized,
    {
        route
            .iter()
            .map(|name| {
                let name = name.as_ref();
                lookup
                    .coordinate(name)
                    .ok_or_else(|| Error::LookupInconsistency(name.to_owned()))
            })
            .collect()
    }

    pub(crate) fn path_length(points: &[Coordinate]) -> f64 {
        points.windows(2).map(|w| w[0].dist_km(&w[1])).sum()
    }

    /// Path length of `points` visited in `order`.
    #[inline]
    pub(crate) fn ordered_length(points: &[Coordinate], order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|w| points[w[0]].dist_km(&points[w[1]]))
            .sum()
    }
}
