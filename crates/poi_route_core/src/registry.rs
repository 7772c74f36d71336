//! Named points: an immutable seed set plus a user-editable overlay.
//!
//! Lookups check the overlay first and fall back to the seeds, so a user point
//! shadows a seed point of the same name without ever modifying it.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    Coordinate, Error, Result, constants::SEED_POINTS, geometry::CoordinateLookup,
    io::degrees::Degrees,
};

const ERR_EMPTY_NAME: &str = "name is required";

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Point {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// Process-wide point store. Every operation is atomic with respect to the others.
#[derive(Debug)]
pub struct PointRegistry {
    seeds: Vec<Point>,
    user: RwLock<Vec<Point>>,
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self::with_default_seeds()
    }
}

impl PointRegistry {
    /// Builds a registry over `seeds`. A repeated seed name keeps its first
    /// position and its last value.
    pub fn new(seeds: impl IntoIterator<Item = Point>) -> Self {
        let mut unique: Vec<Point> = Vec::new();
        for point in seeds {
            match unique.iter_mut().find(|p| p.name == point.name) {
                Some(existing) => existing.coordinate = point.coordinate,
                None => unique.push(point),
            }
        }

        Self {
            seeds: unique,
            user: RwLock::new(Vec::new()),
        }
    }

    pub fn with_default_seeds() -> Self {
        Self::new(
            SEED_POINTS
                .iter()
                .map(|&(name, lat, lon)| Point::new(name, Coordinate::new(lat, lon))),
        )
    }

    pub fn list_seed_names(&self) -> Vec<String> {
        self.seeds.iter().map(|p| p.name.clone()).collect()
    }

    pub fn list_user_names(&self) -> Vec<String> {
        names_of(&self.read_user())
    }

    pub fn contains_user(&self, name: &str) -> bool {
        self.read_user().iter().any(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Result<Coordinate> {
        self.coordinate(name).ok_or_else(|| Error::not_found(name))
    }

    /// Inserts or overwrites a user point and returns the user names afterwards.
    pub fn add(
        &self,
        name: &str,
        lat: impl Into<Degrees>,
        lon: impl Into<Degrees>,
    ) -> Result<Vec<String>> {
        if name.is_empty() {
            return Err(Error::invalid_input(ERR_EMPTY_NAME));
        }
        let coordinate = parse_coordinate(&lat.into(), &lon.into())?;

        let mut user = self.write_user();
        match user.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.coordinate = coordinate,
            None => user.push(Point::new(name, coordinate)),
        }
        log::debug!("registry: add name={name} coord={coordinate}");
        Ok(names_of(&user))
    }

    /// Updates an existing user point. Seed points cannot be edited.
    pub fn edit(&self, name: &str, lat: impl Into<Degrees>, lon: impl Into<Degrees>) -> Result<()> {
        let (lat, lon) = (lat.into(), lon.into());

        let mut user = self.write_user();
        let Some(existing) = user.iter_mut().find(|p| p.name == name) else {
            return Err(Error::not_found(name));
        };
        existing.coordinate = parse_coordinate(&lat, &lon)?;
        log::debug!("registry: edit name={name} coord={}", existing.coordinate);
        Ok(())
    }

    /// Removes a user point and returns the user names afterwards. Seed points cannot be deleted.
    pub fn delete(&self, name: &str) -> Result<Vec<String>> {
        let mut user = self.write_user();
        let Some(pos) = user.iter().position(|p| p.name == name) else {
            return Err(Error::not_found(name));
        };
        user.remove(pos);
        log::debug!("registry: delete name={name}");
        Ok(names_of(&user))
    }

    /// Snapshot of seeds and user points, user values winning on name collisions.
    pub fn merged_view(&self) -> MergedView {
        let user = self.read_user();
        let mut points: Vec<Point> = self
            .seeds
            .iter()
            .map(|seed| {
                user.iter()
                    .find(|p| p.name == seed.name)
                    .unwrap_or(seed)
                    .clone()
            })
            .collect();
        points.extend(
            user.iter()
                .filter(|p| !self.seeds.iter().any(|s| s.name == p.name))
                .cloned(),
        );
        MergedView::new(points)
    }

    fn read_user(&self) -> RwLockReadGuard<'_, Vec<Point>> {
        self.user.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_user(&self) -> RwLockWriteGuard<'_, Vec<Point>> {
        self.user.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CoordinateLookup for PointRegistry {
    fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.read_user()
            .iter()
            .chain(self.seeds.iter())
            .find(|p| p.name == name)
            .map(|p| p.coordinate)
    }
}

/// Read-only, ordered union of seed and user points taken at one instant.
#[derive(Clone, Debug, Default)]
pub struct MergedView {
    points: Vec<Point>,
    index: HashMap<String, usize>,
}

impl MergedView {
    fn new(points: Vec<Point>) -> Self {
        let index = points
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.name.clone(), idx))
            .collect();
        Self { points, index }
    }

    pub fn names(&self) -> Vec<String> {
        names_of(&self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl CoordinateLookup for MergedView {
    fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.index.get(name).map(|&idx| self.points[idx].coordinate)
    }
}

fn names_of(points: &[Point]) -> Vec<String> {
    points.iter().map(|p| p.name.clone()).collect()
}

fn parse_coordinate(lat: &Degrees, lon: &Degrees) -> Result<Coordinate> {
    let coordinate = Coordinate::new(lat.to_f64("lat")?, lon.to_f64("lon")?);
    if !coordinate.is_valid() {
        return Err(Error::invalid_input(format!(
            "coordinate out of range: {coordinate} (lat must be within [-90, 90], lon within [-180, 180])"
        )));
    }
    Ok(coordinate)
}
