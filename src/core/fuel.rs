//! Fuel classes, the catalog that names them, and the vehicles that need them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

/// A fuel grade, identified by its position in the [`FuelCatalog`].
///
/// Every vehicle and every station carries exactly one class. Classes are
/// cheap to copy and compare; their display name lives in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelClass(usize);

impl FuelClass {
    /// Class with the given catalog index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this class in its catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FuelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fuel#{}", self.0)
    }
}

/// Ordered set of fuel names; the position of a name is its [`FuelClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelCatalog {
    names: Vec<String>,
}

impl FuelCatalog {
    /// Build a catalog from names in class order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve a fuel name to its class.
    #[must_use]
    pub fn class_of(&self, name: &str) -> Option<FuelClass> {
        self.names.iter().position(|n| n == name).map(FuelClass)
    }

    /// Display name of a class, if it belongs to this catalog.
    #[must_use]
    pub fn name(&self, class: FuelClass) -> Option<&str> {
        self.names.get(class.0).map(String::as_str)
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the catalog defines no class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All classes in catalog order.
    pub fn classes(&self) -> impl Iterator<Item = FuelClass> + '_ {
        (0..self.names.len()).map(FuelClass)
    }
}

/// A vehicle waiting for fuel. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier, unique within a run.
    pub id: u64,
    /// Fuel the vehicle needs.
    pub fuel: FuelClass,
    /// Arrival time in milliseconds since epoch.
    pub arrived_at_ms: u64,
}

impl Vehicle {
    /// A vehicle arriving now.
    #[must_use]
    pub fn arriving(id: u64, fuel: FuelClass) -> Self {
        Self {
            id,
            fuel,
            arrived_at_ms: now_ms(),
        }
    }
}
