//! Evaluating a single node.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::log::GeoLogger;
use crate::node::{GeoNode, NodeRef};
use crate::params::GeoNodeExecParams;
use crate::value::SocketValue;

/// Options for [`execute_node`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalOptions {
    /// Collect node diagnostics into the logger.
    pub log_diagnostics: bool,
    /// Identifiers of the outputs anything consumes. `None` means all.
    pub required_outputs: Option<Vec<String>>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            log_diagnostics: true,
            required_outputs: None,
        }
    }
}

impl EvalOptions {
    /// Only the given outputs are consumed.
    pub fn with_required_outputs<'a>(mut self, outputs: impl IntoIterator<Item = &'a str>) -> Self {
        self.required_outputs = Some(outputs.into_iter().map(str::to_string).collect());
        self
    }
}

/// Runs `node` once and returns its enabled outputs by identifier.
///
/// `inputs` holds the values of connected inputs by identifier. Enabled
/// inputs without a value get their declared default; values of another kind
/// are converted the way links convert them. Outputs the node did not set
/// get the default value of their kind. Diagnostics end up in `logger`.
#[instrument(skip_all, fields(node = node_ref.name(), node_type = node.type_name()))]
pub fn execute_node(
    node: &dyn GeoNode,
    node_ref: &NodeRef,
    mut inputs: BTreeMap<String, SocketValue>,
    options: &EvalOptions,
    logger: Option<&GeoLogger>,
) -> BTreeMap<String, SocketValue> {
    let slots: Vec<Option<SocketValue>> = node_ref
        .inputs
        .iter()
        .zip(&node_ref.declaration().inputs)
        .map(|(socket, declaration)| {
            if !socket.available {
                return None;
            }
            let Some(value) = inputs.remove(&socket.identifier) else {
                return Some(declaration.default_value.clone());
            };
            let from = value.socket_type();
            Some(value.convert(socket.socket_type).unwrap_or_else(|| {
                warn!(
                    input = %socket.identifier,
                    %from,
                    to = %socket.socket_type,
                    "cannot convert linked value; using the default"
                );
                declaration.default_value.clone()
            }))
        })
        .collect();
    for identifier in inputs.keys() {
        warn!(input = %identifier, "ignoring value for an unknown or disabled input");
    }

    let mut local = logger
        .filter(|_| options.log_diagnostics)
        .map(GeoLogger::local);

    let outputs = {
        let mut params = GeoNodeExecParams::new(node_ref, slots, local.as_mut());
        if let Some(required) = &options.required_outputs {
            for socket in &node_ref.outputs {
                let is_required = required.contains(&socket.identifier);
                params.set_output_required(&socket.identifier, is_required);
            }
        }
        debug!("executing node");
        node.execute(&mut params);
        params.into_outputs()
    };

    let required = |identifier: &String| {
        options
            .required_outputs
            .as_ref()
            .is_none_or(|required| required.contains(identifier))
    };
    let results = node_ref
        .outputs
        .iter()
        .zip(outputs)
        .filter(|(socket, _)| socket.available)
        .map(|(socket, value)| {
            let value = value.unwrap_or_else(|| {
                if required(&socket.identifier) {
                    warn!(output = %socket.identifier, "output was not set; using the default");
                }
                SocketValue::default_for(socket.socket_type)
            });
            (socket.identifier.clone(), value)
        })
        .collect();

    if let (Some(logger), Some(local)) = (logger, local) {
        logger.merge(local);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NodeWarningType;
    use crate::nodes::{CurveStar, MeshUvSphere};
    use rhizome_resin_geometry::GeometrySet;

    fn run(
        node: &dyn GeoNode,
        inputs: &[(&str, SocketValue)],
        options: &EvalOptions,
        logger: Option<&GeoLogger>,
    ) -> BTreeMap<String, SocketValue> {
        let node_ref = NodeRef::new("node", node);
        let inputs = inputs
            .iter()
            .map(|(id, value)| (id.to_string(), value.clone()))
            .collect();
        execute_node(node, &node_ref, inputs, options, logger)
    }

    fn mesh_of(outputs: &BTreeMap<String, SocketValue>) -> Option<GeometrySet> {
        match outputs.get("Mesh") {
            Some(SocketValue::Geometry(geometry)) => Some(geometry.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_fill_unconnected_inputs() {
        let outputs = run(&MeshUvSphere, &[], &EvalOptions::default(), None);
        let geometry = mesh_of(&outputs).unwrap();
        let mesh = geometry.mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 32 * 15 + 2);
    }

    #[test]
    fn test_linked_values_convert() {
        let outputs = run(
            &MeshUvSphere,
            &[("Segments", SocketValue::Float(4.7)), ("Rings", SocketValue::Bool(true))],
            &EvalOptions::default(),
            None,
        );
        // 4.7 truncates to 4; a single ring is rejected.
        let geometry = mesh_of(&outputs).unwrap();
        assert!(geometry.is_empty());
    }

    #[test]
    fn test_unconvertible_value_uses_default() {
        let outputs = run(
            &MeshUvSphere,
            &[("Segments", SocketValue::String("many".into()))],
            &EvalOptions::default(),
            None,
        );
        let geometry = mesh_of(&outputs).unwrap();
        assert_eq!(geometry.mesh().unwrap().vertex_count(), 32 * 15 + 2);
    }

    #[test]
    fn test_diagnostics_merge() {
        let logger = GeoLogger::new();
        run(
            &MeshUvSphere,
            &[("Segments", SocketValue::Int(2)), ("Rings", SocketValue::Int(1))],
            &EvalOptions::default(),
            Some(&logger),
        );
        let warnings = logger.warnings_for("node");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.warning_type == NodeWarningType::Info));

        let silent = EvalOptions {
            log_diagnostics: false,
            ..EvalOptions::default()
        };
        logger.clear();
        run(&MeshUvSphere, &[("Rings", SocketValue::Int(0))], &silent, Some(&logger));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_unrequired_outputs_get_defaults() {
        let options = EvalOptions::default().with_required_outputs(["Curve"]);
        let outputs = run(&CurveStar, &[], &options, None);
        assert!(matches!(
            outputs.get("Outer Points"),
            Some(SocketValue::String(s)) if s.is_empty()
        ));
        assert!(matches!(
            outputs.get("Curve"),
            Some(SocketValue::Geometry(g)) if g.curve().is_some()
        ));
    }
}
