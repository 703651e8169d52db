//! Diagnostics collected while evaluating nodes.
//!
//! Each evaluation writes into its own [`LocalLogger`]; finished local logs
//! are merged into a shared [`GeoLogger`], so evaluations on different
//! threads never contend while running.

use std::fmt;

use parking_lot::Mutex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a node diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeWarningType {
    /// Informational, such as ignored input.
    Info,
    /// Suspicious but usable input.
    Warning,
    /// The node could not do what was asked and used a fallback.
    Error,
}

impl fmt::Display for NodeWarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeWarningType::Info => "info",
            NodeWarningType::Warning => "warning",
            NodeWarningType::Error => "error",
        })
    }
}

/// A diagnostic attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeWarning {
    /// Name of the node that emitted it.
    pub node: String,
    /// Severity.
    pub warning_type: NodeWarningType,
    /// Message shown to the user.
    pub message: String,
}

/// Diagnostics of one evaluation.
#[derive(Debug, Default)]
pub struct LocalLogger {
    warnings: Vec<NodeWarning>,
}

impl LocalLogger {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn log_node_warning(
        &mut self,
        node: &str,
        warning_type: NodeWarningType,
        message: impl Into<String>,
    ) {
        let message = message.into();
        tracing::debug!(node, %warning_type, %message, "node warning");
        self.warnings.push(NodeWarning {
            node: node.to_string(),
            warning_type,
            message,
        });
    }

    /// Diagnostics logged so far.
    pub fn warnings(&self) -> &[NodeWarning] {
        &self.warnings
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Diagnostics of a whole evaluation pass.
#[derive(Debug, Default)]
pub struct GeoLogger {
    warnings: Mutex<Vec<NodeWarning>>,
}

impl GeoLogger {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a local log for one evaluation.
    pub fn local(&self) -> LocalLogger {
        LocalLogger::new()
    }

    /// Moves the diagnostics of a finished evaluation into this log.
    pub fn merge(&self, local: LocalLogger) {
        if local.is_empty() {
            return;
        }
        self.warnings.lock().extend(local.warnings);
    }

    /// Copies all diagnostics.
    pub fn warnings(&self) -> Vec<NodeWarning> {
        self.warnings.lock().clone()
    }

    /// Copies the diagnostics of one node.
    pub fn warnings_for(&self, node: &str) -> Vec<NodeWarning> {
        self.warnings
            .lock()
            .iter()
            .filter(|w| w.node == node)
            .cloned()
            .collect()
    }

    /// Discards all diagnostics.
    pub fn clear(&self) {
        self.warnings.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_local_logger() {
        let mut local = LocalLogger::new();
        assert!(local.is_empty());
        local.log_node_warning("UV Sphere", NodeWarningType::Info, "Segments must be at least 3");
        assert_eq!(local.len(), 1);
        assert_eq!(local.warnings()[0].warning_type, NodeWarningType::Info);
    }

    #[test]
    fn test_merge_from_threads() {
        let logger = Arc::new(GeoLogger::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    let mut local = logger.local();
                    local.log_node_warning(&format!("node{i}"), NodeWarningType::Error, "failed");
                    local.log_node_warning(&format!("node{i}"), NodeWarningType::Info, "ignored");
                    logger.merge(local);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(logger.warnings().len(), 8);
        assert_eq!(logger.warnings_for("node2").len(), 2);
        logger.clear();
        assert!(logger.warnings().is_empty());
    }
}
