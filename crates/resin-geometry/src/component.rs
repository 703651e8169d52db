//! The component interface shared by every geometry type.

use std::fmt;

use rhizome_resin_core::{
    AttributeData, AttributeDomain, AttributeError, AttributeMetaData, AttributeRef,
    AttributeSlice, AttributeStore, AttributeType, GVArray, POSITION,
};
use rhizome_resin_mesh::Mesh;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a geometry component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComponentType {
    /// Polygon mesh.
    Mesh,
    /// Unconnected points.
    PointCloud,
    /// References to other geometry with transforms.
    Instances,
    /// Volume grids.
    Volume,
    /// Curves.
    Curve,
}

impl ComponentType {
    /// All component types, in geometry set order.
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Mesh,
        ComponentType::PointCloud,
        ComponentType::Instances,
        ComponentType::Volume,
        ComponentType::Curve,
    ];

    /// User-facing name.
    pub fn name(self) -> &'static str {
        match self {
            ComponentType::Mesh => "Mesh",
            ComponentType::PointCloud => "Point Cloud",
            ComponentType::Instances => "Instances",
            ComponentType::Volume => "Volume",
            ComponentType::Curve => "Curve",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece of geometry that stores attributes on one or more domains.
///
/// Built-in attributes (such as `position`) live in the component's own
/// fields and are exposed through [`builtin_attribute`](Self::builtin_attribute);
/// everything else lives in its [`AttributeStore`].
pub trait GeometryComponent: fmt::Debug + Send + Sync {
    /// The kind of this component.
    fn component_type(&self) -> ComponentType;

    /// Domains this component has elements on.
    fn domains(&self) -> &'static [AttributeDomain];

    /// Element count of a domain. Domains the component lacks have size 0.
    fn attribute_domain_size(&self, domain: AttributeDomain) -> usize;

    /// Returns true if the component has no elements at all.
    fn is_empty(&self) -> bool;

    /// Custom attributes.
    fn attributes(&self) -> &AttributeStore;

    /// Mutable custom attributes.
    fn attributes_mut(&mut self) -> &mut AttributeStore;

    /// Looks up a built-in attribute.
    fn builtin_attribute(&self, _name: &str) -> Option<AttributeRef<'_>> {
        None
    }

    /// Returns true if `name` is reserved for a built-in attribute.
    fn is_builtin_attribute(&self, name: &str) -> bool {
        self.builtin_attribute(name).is_some()
    }

    /// Converts a column between domains.
    ///
    /// The default only supports the identity; components with
    /// connectivity override it to interpolate.
    fn adapt_domain(
        &self,
        data: AttributeSlice<'_>,
        from: AttributeDomain,
        to: AttributeDomain,
    ) -> Option<AttributeData> {
        (from == to).then(|| data.to_data())
    }

    /// Domain and type of a built-in or custom attribute.
    fn attribute_get_meta_data(&self, name: &str) -> Option<AttributeMetaData> {
        if let Some(builtin) = self.builtin_attribute(name) {
            return Some(AttributeMetaData {
                domain: builtin.domain,
                data_type: builtin.data.data_type(),
            });
        }
        self.attributes().meta_data(name)
    }

    /// Reads an attribute on `domain` as `data_type`.
    ///
    /// The stored column is borrowed when domain and type already match;
    /// otherwise it is adapted and converted into an owned column. Returns
    /// `None` if the attribute does not exist or cannot be moved to `domain`.
    fn attribute_try_get_for_read(
        &self,
        name: &str,
        domain: AttributeDomain,
        data_type: AttributeType,
    ) -> Option<GVArray<'_>> {
        let attribute = self
            .builtin_attribute(name)
            .or_else(|| self.attributes().get(name))?;

        let array = if attribute.domain == domain {
            GVArray::from_slice(attribute.data)
        } else {
            GVArray::from_data(self.adapt_domain(attribute.data, attribute.domain, domain)?)
        };
        Some(array.convert(data_type))
    }

    /// Writes a custom attribute, replacing any attribute with the same name.
    fn attribute_write(
        &mut self,
        name: &str,
        domain: AttributeDomain,
        data: AttributeData,
    ) -> Result<(), AttributeError> {
        if self.is_builtin_attribute(name) {
            return Err(AttributeError::BuiltinName(name.to_string()));
        }
        if !self.domains().contains(&domain) {
            return Err(AttributeError::UnsupportedDomain(domain));
        }
        let size = self.attribute_domain_size(domain);
        self.attributes_mut()
            .insert_checked(name, domain, data, size)
            .map(|_| ())
    }

    /// Creates a zero-filled custom attribute.
    fn attribute_try_create(
        &mut self,
        name: &str,
        domain: AttributeDomain,
        data_type: AttributeType,
    ) -> Result<(), AttributeError> {
        let size = self.attribute_domain_size(domain);
        self.attribute_write(name, domain, AttributeData::new(data_type, size))
    }
}

impl GeometryComponent for Mesh {
    fn component_type(&self) -> ComponentType {
        ComponentType::Mesh
    }

    fn domains(&self) -> &'static [AttributeDomain] {
        &[
            AttributeDomain::Point,
            AttributeDomain::Edge,
            AttributeDomain::Face,
            AttributeDomain::Corner,
        ]
    }

    fn attribute_domain_size(&self, domain: AttributeDomain) -> usize {
        self.domain_size(domain)
    }

    fn is_empty(&self) -> bool {
        Mesh::is_empty(self)
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    fn builtin_attribute(&self, name: &str) -> Option<AttributeRef<'_>> {
        (name == POSITION).then(|| AttributeRef {
            domain: AttributeDomain::Point,
            data: AttributeSlice::Float3(&self.positions),
        })
    }

    fn adapt_domain(
        &self,
        data: AttributeSlice<'_>,
        from: AttributeDomain,
        to: AttributeDomain,
    ) -> Option<AttributeData> {
        Mesh::adapt_domain(self, data, from, to)
    }
}
