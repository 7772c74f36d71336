//! Great-circle route planning over a small set of named points.
//! Includes the point registry, the route cost function and a hill-climbing optimizer.

mod algo;
pub mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod node;
mod registry;
mod route;

pub use algo::{hill_climb, random};
pub use geo::geometry;
pub use io::{degrees, options};

pub use algo::hill_climb::optimize_route;
pub use algo::random::RandomSource;
pub use error::{Error, Result};
pub use geo::geometry::{CoordinateLookup, RouteGeometry};
pub use io::degrees::Degrees;
pub use io::options::{LogOptions, OptimizerOptions, ServerOptions};
pub use node::Coordinate;
pub use registry::{MergedView, Point, PointRegistry};
pub use route::{OptimizedRoute, RouteMetrics};
