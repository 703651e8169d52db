//! Core attribute types for resin geometry.
//!
//! This crate provides the data layer shared by every geometry component:
//!
//! - [`AttributeStore`] - Named, domain-tagged attribute columns
//! - [`AttributeDomain`] - Element categories and their priority order
//! - [`AttributeValue`] / [`AttributeType`] - Typed single values
//! - [`VArray`] / [`GVArray`] - Read-only column views (broadcast or borrowed)
//! - [`conversions`] - The implicit conversion table between attribute types
//! - Built-in attribute traits ([`HasPositions`], [`HasNormals`])

mod attributes;
pub mod conversions;
mod domain;
mod error;
mod store;
mod value;
mod varray;

pub use attributes::{HasNormals, HasPositions, POSITION, RADIUS};
pub use domain::{AttributeDomain, highest_priority_domain};
pub use error::{AttributeError, TypeError};
pub use glam;
pub use store::{
    Attribute, AttributeData, AttributeMetaData, AttributeRef, AttributeSlice, AttributeStore,
};
pub use value::{AttributeScalar, AttributeType, AttributeValue};
pub use varray::{GVArray, VArray};
