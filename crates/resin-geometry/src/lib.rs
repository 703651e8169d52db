//! Geometry components for resin.
//!
//! A [`GeometrySet`] is the value that flows between geometry nodes. It holds
//! at most one component of each [`ComponentType`]:
//!
//! - [`Mesh`] (from `rhizome-resin-mesh`)
//! - [`PointCloud`]
//! - [`Instances`]
//! - [`Volume`]
//! - [`Curve`]
//!
//! Every component implements [`GeometryComponent`], which answers domain
//! sizes and attribute queries.
//!
//! ```
//! use rhizome_resin_core::{AttributeDomain, AttributeType};
//! use rhizome_resin_geometry::{ComponentType, GeometryComponent, GeometrySet};
//! use rhizome_resin_mesh::uv_sphere;
//!
//! let set = GeometrySet::from_mesh(uv_sphere(1.0, 8, 4));
//! let mesh = set.component(ComponentType::Mesh).unwrap();
//! let positions = mesh
//!     .attribute_try_get_for_read("position", AttributeDomain::Point, AttributeType::Float3)
//!     .unwrap();
//! assert_eq!(positions.len(), mesh.attribute_domain_size(AttributeDomain::Point));
//! ```

mod component;
mod curve;
mod instances;
mod point_cloud;
mod set;
mod volume;

pub use component::{ComponentType, GeometryComponent};
pub use curve::{CYCLIC, Curve, TILT};
pub use instances::{Instance, Instances};
pub use point_cloud::PointCloud;
pub use rhizome_resin_mesh::Mesh;
pub use set::GeometrySet;
pub use volume::{Volume, VolumeGrid};
