//! Geometry node execution for resin.
//!
//! A node type implements [`GeoNode`]: it declares its sockets through a
//! [`NodeDeclarationBuilder`] and evaluates through [`GeoNodeExecParams`],
//! which hands out each input once, accepts each output once, resolves
//! attribute inputs against geometry components, and collects diagnostics.
//!
//! ```
//! use std::collections::BTreeMap;
//! use rhizome_resin_nodes::{EvalOptions, GeoLogger, NodeRef, SocketValue, execute_node};
//! use rhizome_resin_nodes::nodes::MeshUvSphere;
//!
//! let node = MeshUvSphere;
//! let node_ref = NodeRef::new("UV Sphere", &node);
//! let inputs = BTreeMap::from([("Segments".to_string(), SocketValue::Int(2))]);
//! let logger = GeoLogger::new();
//!
//! let outputs = execute_node(&node, &node_ref, inputs, &EvalOptions::default(), Some(&logger));
//! assert!(matches!(&outputs["Mesh"], SocketValue::Geometry(g) if g.is_empty()));
//! assert_eq!(logger.warnings()[0].message, "Segments must be at least 3");
//! ```

mod error;
mod exec;
mod log;
mod node;
pub mod nodes;
mod params;
mod registry;
mod socket;
mod value;

pub use error::AccessError;
pub use exec::{EvalOptions, execute_node};
pub use log::{GeoLogger, LocalLogger, NodeWarning, NodeWarningType};
pub use node::{GeoNode, NodeRef};
pub use params::GeoNodeExecParams;
pub use registry::{NodeFactory, NodeTypeRegistry};
pub use socket::{
    GeometryDeclaration, NodeDeclaration, NodeDeclarationBuilder, Socket, SocketDeclaration,
};
pub use value::{SocketData, SocketType, SocketValue};
