use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A location in campus map pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub cost: f64,
}

/// Shortest path as returned by `findPath`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub start: Point,
    pub path: Vec<Segment>,
}

impl PathResult {
    /// `start` followed by the end of every segment.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.path.iter().map(|s| s.end))
            .collect()
    }

    /// Where the path ends; the start itself for an empty path.
    pub fn destination(&self) -> Point {
        self.path.last().map_or(self.start, |s| s.end)
    }

    pub fn total_cost(&self) -> f64 {
        // Folding from +0.0 keeps an empty path at 0 rather than -0.
        self.path.iter().fold(0.0, |acc, s| acc + s.cost)
    }
}

/// Short building name to long display name, as returned by `listBuilding`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingCatalog(BTreeMap<String, String>);

impl BuildingCatalog {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.0.contains_key(short_name)
    }

    pub fn long_name(&self, short_name: &str) -> Option<&str> {
        self.0.get(short_name).map(String::as_str)
    }

    /// `(short, long)` pairs sorted by short name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for BuildingCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
