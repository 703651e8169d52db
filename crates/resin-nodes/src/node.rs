//! Node types and node instances.

use crate::params::GeoNodeExecParams;
use crate::socket::{NodeDeclaration, NodeDeclarationBuilder, Socket};

/// A geometry node type.
///
/// Settings that are not sockets (modes, enums) live in the implementing
/// struct; sockets are described by [`declare`](Self::declare).
pub trait GeoNode: Send + Sync {
    /// Stable identifier of the node type, used by the registry.
    fn type_name(&self) -> &'static str;

    /// Default display label.
    fn label(&self) -> &'static str;

    /// Declares the node's sockets.
    fn declare(&self, b: &mut NodeDeclarationBuilder);

    /// Enables or disables sockets according to the node's settings.
    fn update_availability(&self, _node: &mut NodeRef) {}

    /// Evaluates the node once.
    fn execute(&self, params: &mut GeoNodeExecParams<'_>);
}

/// A node instance: its name and sockets, as seen by one evaluation.
#[derive(Debug, Clone)]
pub struct NodeRef {
    name: String,
    label: Option<String>,
    declaration: NodeDeclaration,
    /// Input sockets, in declaration order.
    pub inputs: Vec<Socket>,
    /// Output sockets, in declaration order.
    pub outputs: Vec<Socket>,
}

impl NodeRef {
    /// Instantiates a node type under a unique name.
    pub fn new(name: impl Into<String>, node: &dyn GeoNode) -> Self {
        let mut builder = NodeDeclarationBuilder::new();
        node.declare(&mut builder);
        let declaration = builder.build();

        let mut node_ref = Self {
            name: name.into(),
            label: None,
            inputs: declaration.inputs.iter().map(Socket::from_declaration).collect(),
            outputs: declaration.outputs.iter().map(Socket::from_declaration).collect(),
            declaration,
        };
        node.update_availability(&mut node_ref);
        node_ref
    }

    /// Unique node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a custom label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Custom label if set, otherwise the name.
    pub fn label_or_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The declaration the sockets were built from.
    pub fn declaration(&self) -> &NodeDeclaration {
        &self.declaration
    }

    /// Finds an input by identifier.
    pub fn input(&self, identifier: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.identifier == identifier)
    }

    /// Finds an output by identifier.
    pub fn output(&self, identifier: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.identifier == identifier)
    }

    /// Mutable access to an input by identifier.
    pub fn input_mut(&mut self, identifier: &str) -> Option<&mut Socket> {
        self.inputs.iter_mut().find(|s| s.identifier == identifier)
    }

    /// Enables or disables an input.
    pub fn set_input_available(&mut self, identifier: &str, available: bool) {
        if let Some(socket) = self.input_mut(identifier) {
            socket.available = available;
        }
    }

    /// Identifiers of the enabled inputs.
    pub fn available_inputs(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .filter(|s| s.available)
            .map(|s| s.identifier.as_str())
    }

    /// Identifiers of the enabled outputs.
    pub fn available_outputs(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .filter(|s| s.available)
            .map(|s| s.identifier.as_str())
    }
}
