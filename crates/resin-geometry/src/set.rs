//! A geometry value: at most one component of each type.

use std::sync::Arc;

use rhizome_resin_mesh::Mesh;

use crate::component::{ComponentType, GeometryComponent};
use crate::curve::Curve;
use crate::instances::Instances;
use crate::point_cloud::PointCloud;
use crate::volume::Volume;

/// Zero or more geometry components, one slot per [`ComponentType`].
///
/// Components are shared behind [`Arc`]; cloning a set is cheap and mutable
/// access copies a component only if another set still references it.
#[derive(Debug, Clone, Default)]
pub struct GeometrySet {
    mesh: Option<Arc<Mesh>>,
    point_cloud: Option<Arc<PointCloud>>,
    instances: Option<Arc<Instances>>,
    volume: Option<Arc<Volume>>,
    curve: Option<Arc<Curve>>,
}

macro_rules! component_slot {
    ($field:ident: $ty:ty, $from:ident, $get_mut:ident, $replace:ident, $take:ident) => {
        /// Creates a set holding only this component.
        pub fn $from(component: $ty) -> Self {
            let mut set = Self::default();
            set.$replace(component);
            set
        }

        /// Borrows the component, if present.
        pub fn $field(&self) -> Option<&$ty> {
            self.$field.as_deref()
        }

        /// Mutably borrows the component, copying it if it is shared.
        pub fn $get_mut(&mut self) -> Option<&mut $ty> {
            self.$field.as_mut().map(Arc::make_mut)
        }

        /// Stores the component, replacing any previous one.
        pub fn $replace(&mut self, component: $ty) {
            self.$field = Some(Arc::new(component));
        }

        /// Removes the component and returns it.
        pub fn $take(&mut self) -> Option<$ty> {
            self.$field
                .take()
                .map(|c| Arc::try_unwrap(c).unwrap_or_else(|shared| (*shared).clone()))
        }
    };
}

impl GeometrySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    component_slot!(mesh: Mesh, from_mesh, mesh_mut, replace_mesh, take_mesh);
    component_slot!(
        point_cloud: PointCloud,
        from_point_cloud,
        point_cloud_mut,
        replace_point_cloud,
        take_point_cloud
    );
    component_slot!(
        instances: Instances,
        from_instances,
        instances_mut,
        replace_instances,
        take_instances
    );
    component_slot!(volume: Volume, from_volume, volume_mut, replace_volume, take_volume);
    component_slot!(curve: Curve, from_curve, curve_mut, replace_curve, take_curve);

    /// Borrows a component through the shared interface.
    pub fn component(&self, component_type: ComponentType) -> Option<&dyn GeometryComponent> {
        match component_type {
            ComponentType::Mesh => self.mesh().map(|c| c as &dyn GeometryComponent),
            ComponentType::PointCloud => self.point_cloud().map(|c| c as &dyn GeometryComponent),
            ComponentType::Instances => self.instances().map(|c| c as &dyn GeometryComponent),
            ComponentType::Volume => self.volume().map(|c| c as &dyn GeometryComponent),
            ComponentType::Curve => self.curve().map(|c| c as &dyn GeometryComponent),
        }
    }

    /// Returns true if a component of this type is present, even if empty.
    pub fn has(&self, component_type: ComponentType) -> bool {
        self.component(component_type).is_some()
    }

    /// Removes a component of the given type.
    pub fn remove(&mut self, component_type: ComponentType) {
        match component_type {
            ComponentType::Mesh => self.mesh = None,
            ComponentType::PointCloud => self.point_cloud = None,
            ComponentType::Instances => self.instances = None,
            ComponentType::Volume => self.volume = None,
            ComponentType::Curve => self.curve = None,
        }
    }

    /// Returns true if at least one instance is placed.
    pub fn has_instances(&self) -> bool {
        self.instances().is_some_and(|i| !i.is_empty())
    }

    /// Returns true if any component other than instances is present.
    pub fn has_realized_data(&self) -> bool {
        ComponentType::ALL
            .into_iter()
            .filter(|&t| t != ComponentType::Instances)
            .any(|t| self.has(t))
    }

    /// Returns true if no component is present.
    pub fn is_empty(&self) -> bool {
        !ComponentType::ALL.into_iter().any(|t| self.has(t))
    }

    /// Types of the present components, in [`ComponentType::ALL`] order.
    pub fn gather_component_types(
        &self,
        include_instances: bool,
        ignore_empty: bool,
    ) -> Vec<ComponentType> {
        ComponentType::ALL
            .into_iter()
            .filter(|&t| include_instances || t != ComponentType::Instances)
            .filter(|&t| {
                self.component(t)
                    .is_some_and(|c| !(ignore_empty && c.is_empty()))
            })
            .collect()
    }

    /// Iterates over the present components.
    pub fn components(&self) -> impl Iterator<Item = &dyn GeometryComponent> {
        ComponentType::ALL
            .into_iter()
            .filter_map(|t| self.component(t))
    }

    /// Calls `f` on this set, then on every instanced geometry recursively.
    pub fn modify_geometry_sets(&mut self, f: &mut dyn FnMut(&mut GeometrySet)) {
        f(self);
        if !self.has_instances() {
            return;
        }
        if let Some(instances) = self.instances_mut() {
            for reference in &mut instances.references {
                reference.modify_geometry_sets(f);
            }
        }
    }
}

impl From<Mesh> for GeometrySet {
    fn from(mesh: Mesh) -> Self {
        Self::from_mesh(mesh)
    }
}

impl From<PointCloud> for GeometrySet {
    fn from(point_cloud: PointCloud) -> Self {
        Self::from_point_cloud(point_cloud)
    }
}

impl From<Curve> for GeometrySet {
    fn from(curve: Curve) -> Self {
        Self::from_curve(curve)
    }
}
