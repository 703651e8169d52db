//! Socket declarations and instantiated sockets.

use rhizome_resin_geometry::ComponentType;

use crate::value::{SocketData, SocketType, SocketValue};

/// Extra constraints of a geometry socket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryDeclaration {
    /// Instances are ignored by the node.
    pub only_realized_data: bool,
    /// Everything but instances is ignored by the node.
    pub only_instances: bool,
    /// Component types the node handles. Empty means all.
    pub supported_types: Vec<ComponentType>,
}

/// Static description of one input or output of a node type.
#[derive(Debug, Clone)]
pub struct SocketDeclaration {
    /// Display name.
    pub name: String,
    /// Identifier, unique among a node's inputs (or outputs).
    pub identifier: String,
    /// Value kind.
    pub socket_type: SocketType,
    /// Value used when the socket is not connected.
    pub default_value: SocketValue,
    /// Soft minimum for numeric sockets.
    pub min: Option<f32>,
    /// Soft maximum for numeric sockets.
    pub max: Option<f32>,
    /// Tooltip.
    pub description: String,
    /// Present on geometry sockets only.
    pub geometry: Option<GeometryDeclaration>,
}

impl SocketDeclaration {
    /// Declares a socket whose identifier equals its name.
    pub fn new(name: &str, socket_type: SocketType) -> Self {
        Self {
            name: name.to_string(),
            identifier: name.to_string(),
            socket_type,
            default_value: SocketValue::default_for(socket_type),
            min: None,
            max: None,
            description: String::new(),
            geometry: (socket_type == SocketType::Geometry).then(GeometryDeclaration::default),
        }
    }

    /// Sets the default value.
    pub fn default_value(&mut self, value: impl SocketData) -> &mut Self {
        let value = value.into_socket_value();
        debug_assert_eq!(value.socket_type(), self.socket_type);
        self.default_value = value;
        self
    }

    /// Sets the soft minimum.
    pub fn min(&mut self, min: f32) -> &mut Self {
        self.min = Some(min);
        self
    }

    /// Sets the soft maximum.
    pub fn max(&mut self, max: f32) -> &mut Self {
        self.max = Some(max);
        self
    }

    /// Sets the tooltip.
    pub fn description(&mut self, description: &str) -> &mut Self {
        self.description = description.to_string();
        self
    }

    /// Marks that instances are ignored. Geometry sockets only.
    pub fn only_realized_data(&mut self) -> &mut Self {
        if let Some(geometry) = &mut self.geometry {
            geometry.only_realized_data = true;
        }
        self
    }

    /// Marks that realized data is ignored. Geometry sockets only.
    pub fn only_instances(&mut self) -> &mut Self {
        if let Some(geometry) = &mut self.geometry {
            geometry.only_instances = true;
        }
        self
    }

    /// Restricts the accepted component types. Geometry sockets only.
    pub fn supported_type(&mut self, component_type: ComponentType) -> &mut Self {
        if let Some(geometry) = &mut self.geometry {
            geometry.supported_types.push(component_type);
        }
        self
    }
}

/// Inputs and outputs of a node type.
#[derive(Debug, Clone, Default)]
pub struct NodeDeclaration {
    /// Input sockets, in display order.
    pub inputs: Vec<SocketDeclaration>,
    /// Output sockets, in display order.
    pub outputs: Vec<SocketDeclaration>,
}

/// Collects socket declarations of a node type.
///
/// ```
/// use rhizome_resin_nodes::NodeDeclarationBuilder;
/// use rhizome_resin_geometry::GeometrySet;
///
/// let mut b = NodeDeclarationBuilder::new();
/// b.add_input::<i32>("Count").default_value(10).min(1.0);
/// b.add_output::<GeometrySet>("Mesh");
/// let declaration = b.build();
/// assert_eq!(declaration.inputs[0].identifier, "Count");
/// ```
#[derive(Debug, Default)]
pub struct NodeDeclarationBuilder {
    declaration: NodeDeclaration,
}

impl NodeDeclarationBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an input of type `T`.
    pub fn add_input<T: SocketData>(&mut self, name: &str) -> &mut SocketDeclaration {
        let inputs = &mut self.declaration.inputs;
        debug_assert!(inputs.iter().all(|s| s.identifier != name));
        inputs.push(SocketDeclaration::new(name, T::SOCKET_TYPE));
        let last = inputs.len() - 1;
        &mut inputs[last]
    }

    /// Declares an output of type `T`.
    pub fn add_output<T: SocketData>(&mut self, name: &str) -> &mut SocketDeclaration {
        let outputs = &mut self.declaration.outputs;
        debug_assert!(outputs.iter().all(|s| s.identifier != name));
        outputs.push(SocketDeclaration::new(name, T::SOCKET_TYPE));
        let last = outputs.len() - 1;
        &mut outputs[last]
    }

    /// Finishes the declaration.
    pub fn build(self) -> NodeDeclaration {
        self.declaration
    }
}

/// A socket of one node instance.
#[derive(Debug, Clone)]
pub struct Socket {
    /// Identifier from the declaration.
    pub identifier: String,
    /// Name from the declaration.
    pub name: String,
    /// Display label, if it differs from the name.
    pub label: Option<String>,
    /// Value kind.
    pub socket_type: SocketType,
    /// Whether the socket is currently enabled.
    pub available: bool,
}

impl Socket {
    /// Instantiates a declared socket, enabled.
    pub fn from_declaration(declaration: &SocketDeclaration) -> Self {
        Self {
            identifier: declaration.identifier.clone(),
            name: declaration.name.clone(),
            label: None,
            socket_type: declaration.socket_type,
            available: true,
        }
    }

    /// Label if set, otherwise the name.
    pub fn label_or_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
