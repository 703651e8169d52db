//! Instances component.

use glam::Mat4;
use rhizome_resin_core::{AttributeDomain, AttributeStore};

use crate::component::{ComponentType, GeometryComponent};
use crate::set::GeometrySet;

/// One placed copy of a referenced geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// Placement of the copy.
    pub transform: Mat4,
    /// Index into [`Instances::references`].
    pub reference: u32,
}

/// Transformed references to other geometry, without realizing it.
#[derive(Debug, Clone, Default)]
pub struct Instances {
    /// Placed copies.
    pub instances: Vec<Instance>,
    /// Geometry the instances refer to.
    pub references: Vec<GeometrySet>,
    /// Custom per-instance attributes.
    pub attributes: AttributeStore,
}

impl Instances {
    /// Creates an empty component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers geometry that instances can refer to.
    pub fn add_reference(&mut self, geometry: GeometrySet) -> u32 {
        self.references.push(geometry);
        self.references.len() as u32 - 1
    }

    /// Places a copy of a registered reference.
    pub fn add_instance(&mut self, reference: u32, transform: Mat4) {
        debug_assert!((reference as usize) < self.references.len());
        self.instances.push(Instance {
            transform,
            reference,
        });
    }

    /// Number of placed copies.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Geometry placed by an instance.
    pub fn geometry(&self, instance: usize) -> Option<&GeometrySet> {
        let reference = self.instances.get(instance)?.reference;
        self.references.get(reference as usize)
    }
}

impl GeometryComponent for Instances {
    fn component_type(&self) -> ComponentType {
        ComponentType::Instances
    }

    fn domains(&self) -> &'static [AttributeDomain] {
        &[AttributeDomain::Instance]
    }

    fn attribute_domain_size(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Instance => self.len(),
            _ => 0,
        }
    }

    fn is_empty(&self) -> bool {
        Instances::is_empty(self)
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }
}
