//! Parameter access for one node evaluation.
//!
//! [`GeoNodeExecParams`] owns the input and output slots of a single
//! evaluation. Inputs are `Option` cells that become `None` once extracted;
//! outputs start as `None` and can be set exactly once. Accessing a socket
//! that does not exist, is disabled, was already used, or has another type is
//! a bug in the node: the trapping accessors log it and panic in debug builds,
//! and fall back to a default value in release builds. The `try_*` variants
//! return the [`AccessError`] instead.

use glam::{Vec3, Vec4};
use rhizome_resin_core::{
    AttributeDomain, AttributeScalar, AttributeType, AttributeValue, GVArray, VArray,
    conversions, highest_priority_domain,
};
use rhizome_resin_geometry::{ComponentType, GeometryComponent, GeometrySet};

use crate::error::{AccessError, quote_identifiers};
use crate::log::{LocalLogger, NodeWarningType};
use crate::node::NodeRef;
use crate::socket::Socket;
use crate::value::{SocketData, SocketType, SocketValue};

/// Inputs, outputs and diagnostics of one node evaluation.
pub struct GeoNodeExecParams<'a> {
    node: &'a NodeRef,
    inputs: Vec<Option<SocketValue>>,
    outputs: Vec<Option<SocketValue>>,
    required_outputs: Vec<bool>,
    logger: Option<&'a mut LocalLogger>,
}

impl<'a> GeoNodeExecParams<'a> {
    /// Creates the slots of one evaluation.
    ///
    /// `inputs` holds one cell per input socket of `node`, in order. Disabled
    /// sockets may be `None`. All outputs start out required.
    pub fn new(
        node: &'a NodeRef,
        inputs: Vec<Option<SocketValue>>,
        logger: Option<&'a mut LocalLogger>,
    ) -> Self {
        debug_assert_eq!(inputs.len(), node.inputs.len());
        Self {
            node,
            inputs,
            outputs: vec![None; node.outputs.len()],
            required_outputs: vec![true; node.outputs.len()],
            logger,
        }
    }

    /// The node being evaluated.
    pub fn node(&self) -> &'a NodeRef {
        self.node
    }

    /// Marks whether anything consumes an output.
    pub fn set_output_required(&mut self, identifier: &str, required: bool) {
        if let Some(index) = self.output_index(identifier) {
            self.required_outputs[index] = required;
        }
    }

    /// Returns the output slots, in socket order.
    pub fn into_outputs(self) -> Vec<Option<SocketValue>> {
        self.outputs
    }

    // ------------------------------------------------------------------
    // Access guard
    // ------------------------------------------------------------------

    /// Moves an input value out of its slot.
    pub fn try_extract_input<T: SocketData>(&mut self, identifier: &str) -> Result<T, AccessError> {
        let index = self.check_input_access(identifier, Some(T::SOCKET_TYPE))?;
        let value = self.inputs[index]
            .take()
            .ok_or_else(|| AccessError::InputConsumed(identifier.to_string()))?;
        T::from_socket_value(value).map_err(|value| AccessError::InputTypeMismatch {
            identifier: identifier.to_string(),
            requested: T::SOCKET_TYPE,
            expected: value.socket_type(),
        })
    }

    /// Moves an input value out of its slot, trapping on misuse.
    pub fn extract_input<T: SocketData>(&mut self, identifier: &str) -> T {
        self.try_extract_input(identifier)
            .unwrap_or_else(|error| self.fault(error))
    }

    /// Copies an input value, leaving it in its slot.
    pub fn try_get_input<T: SocketData>(&self, identifier: &str) -> Result<T, AccessError> {
        let index = self.check_input_access(identifier, Some(T::SOCKET_TYPE))?;
        self.inputs[index]
            .as_ref()
            .and_then(T::peek)
            .ok_or_else(|| AccessError::InputConsumed(identifier.to_string()))
    }

    /// Copies an input value, trapping on misuse.
    pub fn get_input<T: SocketData>(&self, identifier: &str) -> T {
        self.try_get_input(identifier)
            .unwrap_or_else(|error| self.fault(error))
    }

    /// Stores an output value.
    pub fn try_set_output<T: SocketData>(
        &mut self,
        identifier: &str,
        value: T,
    ) -> Result<(), AccessError> {
        let index = self.check_output_access(identifier, T::SOCKET_TYPE)?;
        self.outputs[index] = Some(value.into_socket_value());
        Ok(())
    }

    /// Stores an output value, trapping on misuse.
    pub fn set_output<T: SocketData>(&mut self, identifier: &str, value: T) {
        if let Err(error) = self.try_set_output(identifier, value) {
            self.report_fault(&error);
        }
    }

    /// Returns true if anything consumes this output.
    ///
    /// Nodes use this to skip work for outputs nobody reads.
    pub fn output_is_required(&self, identifier: &str) -> bool {
        self.output_index(identifier)
            .is_some_and(|index| self.required_outputs[index])
    }

    fn check_input_access(
        &self,
        identifier: &str,
        requested: Option<SocketType>,
    ) -> Result<usize, AccessError> {
        let Some(index) = self
            .node
            .inputs
            .iter()
            .position(|s| s.identifier == identifier)
        else {
            return Err(AccessError::UnknownInput {
                identifier: identifier.to_string(),
                available: quote_identifiers(self.node.available_inputs()),
            });
        };
        let socket = &self.node.inputs[index];
        if !socket.available {
            return Err(AccessError::DisabledInput(identifier.to_string()));
        }
        if self.inputs[index].is_none() {
            return Err(AccessError::InputConsumed(identifier.to_string()));
        }
        match requested {
            Some(requested) if requested != socket.socket_type => {
                Err(AccessError::InputTypeMismatch {
                    identifier: identifier.to_string(),
                    requested,
                    expected: socket.socket_type,
                })
            }
            _ => Ok(index),
        }
    }

    fn check_output_access(
        &self,
        identifier: &str,
        provided: SocketType,
    ) -> Result<usize, AccessError> {
        let Some(index) = self.output_index(identifier) else {
            return Err(AccessError::UnknownOutput {
                identifier: identifier.to_string(),
                available: quote_identifiers(self.node.available_outputs()),
            });
        };
        let socket = &self.node.outputs[index];
        if !socket.available {
            return Err(AccessError::DisabledOutput(identifier.to_string()));
        }
        if self.outputs[index].is_some() {
            return Err(AccessError::OutputAlreadySet(identifier.to_string()));
        }
        if provided != socket.socket_type {
            return Err(AccessError::OutputTypeMismatch {
                identifier: identifier.to_string(),
                provided,
                expected: socket.socket_type,
            });
        }
        Ok(index)
    }

    fn output_index(&self, identifier: &str) -> Option<usize> {
        self.node
            .outputs
            .iter()
            .position(|s| s.identifier == identifier)
    }

    fn report_fault(&self, error: &AccessError) {
        tracing::error!(node = self.node.name(), %error, "invalid socket access");
        if cfg!(debug_assertions) {
            panic!("{}: {error}", self.node.name());
        }
    }

    fn fault<T: Default>(&self, error: AccessError) -> T {
        self.report_fault(&error);
        T::default()
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Adds a diagnostic for this node. Does nothing without a logger.
    pub fn error_message_add(&mut self, warning_type: NodeWarningType, message: impl Into<String>) {
        let node = self.node;
        if let Some(logger) = self.logger.as_deref_mut() {
            logger.log_node_warning(node.name(), warning_type, message);
        }
    }

    /// Name under which this node's anonymous attributes are shown.
    pub fn attribute_producer_name(&self) -> String {
        format!("{} node", self.node.label_or_name())
    }

    // ------------------------------------------------------------------
    // Geometry compatibility
    // ------------------------------------------------------------------

    /// Reports parts of `geometry` the input socket declares it will ignore.
    ///
    /// Never modifies the geometry. Sockets without a geometry declaration
    /// are skipped.
    pub fn check_input_geometry_set(&mut self, identifier: &str, geometry: &GeometrySet) {
        let node = self.node;
        let Some(declaration) = node
            .declaration()
            .inputs
            .iter()
            .find(|d| d.identifier == identifier)
        else {
            self.report_fault(&AccessError::UnknownInput {
                identifier: identifier.to_string(),
                available: quote_identifiers(node.available_inputs()),
            });
            return;
        };
        let Some(geometry_declaration) = &declaration.geometry else {
            return;
        };

        if geometry_declaration.only_realized_data && geometry.has_instances() {
            self.error_message_add(
                NodeWarningType::Info,
                "Instances in input geometry are ignored",
            );
        }
        if geometry_declaration.only_instances && geometry.has_realized_data() {
            self.error_message_add(
                NodeWarningType::Info,
                "Realized data in input geometry is ignored",
            );
        }

        let supported = &geometry_declaration.supported_types;
        if supported.is_empty() {
            return;
        }
        for component_type in geometry.gather_component_types(true, true) {
            if component_type == ComponentType::Instances || supported.contains(&component_type) {
                continue;
            }
            self.error_message_add(
                NodeWarningType::Error,
                format!("Input geometry has unsupported type: {}", component_type.name()),
            );
        }
    }

    // ------------------------------------------------------------------
    // Attribute inputs
    // ------------------------------------------------------------------

    /// Finds an enabled input by name.
    fn find_available_socket(&self, name: &str) -> Option<&'a Socket> {
        let node: &'a NodeRef = self.node;
        node.inputs.iter().find(|s| s.available && s.name == name)
    }

    /// Resolves the input named `name` to a column on `domain` of `component`.
    ///
    /// A string input names an attribute, read with domain adaptation and
    /// type conversion. A numeric, vector or color input is converted and
    /// broadcast. Without an enabled input of that name, or when the named
    /// attribute does not exist, the result is `default` (or the zero value
    /// of `data_type`) broadcast over the domain. A missing attribute adds an
    /// error diagnostic unless the name is empty or the domain has no
    /// elements.
    pub fn get_input_attribute<'c>(
        &mut self,
        name: &str,
        component: &'c dyn GeometryComponent,
        domain: AttributeDomain,
        data_type: AttributeType,
        default: Option<AttributeValue>,
    ) -> GVArray<'c> {
        let domain_size = component.attribute_domain_size(domain);
        let default = default
            .map(|value| conversions::convert(value, data_type))
            .unwrap_or_else(|| AttributeValue::zero(data_type));

        let Some(socket) = self.find_available_socket(name) else {
            return GVArray::single(default, domain_size);
        };
        let identifier = socket.identifier.as_str();

        let literal = match socket.socket_type {
            SocketType::String => {
                let attribute_name: String = self.get_input(identifier);
                if let Some(attribute) =
                    component.attribute_try_get_for_read(&attribute_name, domain, data_type)
                {
                    return attribute;
                }
                if !attribute_name.is_empty() && domain_size != 0 {
                    self.error_message_add(
                        NodeWarningType::Error,
                        format!("No attribute with name \"{attribute_name}\""),
                    );
                }
                return GVArray::single(default, domain_size);
            }
            SocketType::Float => AttributeValue::Float(self.get_input::<f32>(identifier)),
            SocketType::Int => AttributeValue::Int(self.get_input::<i32>(identifier)),
            SocketType::Vector => AttributeValue::Float3(self.get_input::<Vec3>(identifier)),
            SocketType::Color => AttributeValue::Color(self.get_input::<Vec4>(identifier)),
            socket_type @ (SocketType::Bool | SocketType::Geometry) => {
                self.report_fault(&AccessError::UnsupportedSocketType {
                    identifier: identifier.to_string(),
                    socket_type,
                    operation: "get_input_attribute",
                });
                return GVArray::single(default, domain_size);
            }
        };
        GVArray::single(conversions::convert(literal, data_type), domain_size)
    }

    /// Typed form of [`get_input_attribute`](Self::get_input_attribute).
    pub fn get_input_attribute_typed<'c, T: AttributeScalar>(
        &mut self,
        name: &str,
        component: &'c dyn GeometryComponent,
        domain: AttributeDomain,
        default: T,
    ) -> VArray<'c, T> {
        self.get_input_attribute(name, component, domain, T::TYPE, Some(default.into_value()))
            .into_typed()
    }

    /// The data type the input named `name` provides.
    ///
    /// For a string input this is the stored type of the named attribute,
    /// or `default_type` if it does not exist.
    pub fn get_input_attribute_data_type(
        &self,
        name: &str,
        component: &dyn GeometryComponent,
        default_type: AttributeType,
    ) -> AttributeType {
        let Some(socket) = self.find_available_socket(name) else {
            return default_type;
        };
        match socket.socket_type {
            SocketType::String => {
                let attribute_name: String = self.get_input(&socket.identifier);
                component
                    .attribute_get_meta_data(&attribute_name)
                    .map_or(default_type, |meta| meta.data_type)
            }
            SocketType::Float => AttributeType::Float,
            SocketType::Vector => AttributeType::Float3,
            SocketType::Color => AttributeType::Color,
            SocketType::Bool => AttributeType::Bool,
            socket_type @ (SocketType::Int | SocketType::Geometry) => {
                self.report_fault(&AccessError::UnsupportedSocketType {
                    identifier: socket.identifier.clone(),
                    socket_type,
                    operation: "get_input_attribute_data_type",
                });
                default_type
            }
        }
    }

    /// The highest-priority domain among attributes named by string inputs.
    ///
    /// Inputs that are missing, are not strings, or name no existing
    /// attribute are skipped. Returns `default` if none remain.
    pub fn get_highest_priority_input_domain(
        &self,
        names: &[&str],
        component: &dyn GeometryComponent,
        default: AttributeDomain,
    ) -> AttributeDomain {
        let domains = names
            .iter()
            .filter_map(|name| self.find_available_socket(name))
            .filter(|socket| socket.socket_type == SocketType::String)
            .filter_map(|socket| {
                let attribute_name: String = self.get_input(&socket.identifier);
                component
                    .attribute_get_meta_data(&attribute_name)
                    .map(|meta| meta.domain)
            });
        highest_priority_domain(domains).unwrap_or(default)
    }
}
