//! Attribute domains and their priority order.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element category of a geometry component that attribute values are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeDomain {
    /// Mesh vertices, point cloud points, curve control points.
    Point,
    /// Mesh edges.
    Edge,
    /// Mesh faces (polygons).
    Face,
    /// Mesh face corners (loops).
    Corner,
    /// Whole curves (splines).
    Curve,
    /// Instances.
    Instance,
}

impl AttributeDomain {
    /// All domains, in declaration order.
    pub const ALL: [AttributeDomain; 6] = [
        AttributeDomain::Point,
        AttributeDomain::Edge,
        AttributeDomain::Face,
        AttributeDomain::Corner,
        AttributeDomain::Curve,
        AttributeDomain::Instance,
    ];

    /// Priority used when several inputs disagree on a domain.
    ///
    /// Higher wins. Corner data carries the most detail, so it ranks first.
    pub fn priority(self) -> u8 {
        match self {
            AttributeDomain::Instance => 0,
            AttributeDomain::Curve => 1,
            AttributeDomain::Face => 2,
            AttributeDomain::Edge => 3,
            AttributeDomain::Point => 4,
            AttributeDomain::Corner => 5,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            AttributeDomain::Point => "Point",
            AttributeDomain::Edge => "Edge",
            AttributeDomain::Face => "Face",
            AttributeDomain::Corner => "Face Corner",
            AttributeDomain::Curve => "Spline",
            AttributeDomain::Instance => "Instance",
        }
    }
}

impl fmt::Display for AttributeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the domain with the highest [priority](AttributeDomain::priority),
/// or `None` when `domains` is empty.
pub fn highest_priority_domain(
    domains: impl IntoIterator<Item = AttributeDomain>,
) -> Option<AttributeDomain> {
    domains.into_iter().max_by_key(|d| d.priority())
}
