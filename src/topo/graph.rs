use std::collections::HashMap;

use crate::errors::WiringError;
use crate::topo::component::{Component, PortRole};

pub type NodeId = usize;

/// A named connection endpoint on a specific node. Fixed ports carry their
/// declared name; crossbar slots carry indexed names such as `cpu_side[3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node: NodeId,
    pub port: String,
}

#[derive(Debug)]
struct PortDef {
    name: String,
    role: PortRole,
}

#[derive(Debug)]
struct TopoNode {
    name: String,
    component: Component,
    ports: Vec<PortDef>,
}

/// One initiator-to-target connection.
#[derive(Debug, Clone)]
pub struct Binding {
    pub initiator: PortRef,
    pub target: PortRef,
}

/// Arena of components plus the bindings between their ports. Nodes are
/// created during assembly and mutated only while wiring; `check_complete`
/// freezes the graph by proving every port is bound exactly once.
#[derive(Debug, Default)]
pub struct Topology {
    nodes: Vec<TopoNode>,
    bindings: Vec<Binding>,
    bound: HashMap<(NodeId, String), usize>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>, component: Component) -> NodeId {
        let ports = component
            .ports()
            .iter()
            .map(|&(name, role)| PortDef {
                name: name.to_string(),
                role,
            })
            .collect();
        let id = self.nodes.len();
        self.nodes.push(TopoNode {
            name: name.into(),
            component,
            ports,
        });
        id
    }

    pub fn component(&self, id: NodeId) -> &Component {
        &self.nodes[id].component
    }

    pub fn component_mut(&mut self, id: NodeId) -> &mut Component {
        &mut self.nodes[id].component
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        &self.nodes[id].name
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Component)> {
        self.nodes.iter().enumerate().map(|(id, n)| (id, &n.component))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_bindings(&self) -> usize {
        self.bindings.len()
    }

    /// Look up a port by its conventional name, resolving any adapter-level
    /// renaming. The returned `PortRef` names the real port.
    pub fn port(&self, node: NodeId, name: &str) -> Result<PortRef, WiringError> {
        let n = &self.nodes[node];
        let resolved = n.component.resolve_port(name);
        if n.ports.iter().any(|p| p.name == resolved) {
            Ok(PortRef {
                node,
                port: resolved.to_string(),
            })
        } else {
            Err(WiringError::UnknownPort(format!("{}.{}", n.name, name)))
        }
    }

    /// Allocate a fresh fan-in slot (target role) on a crossbar.
    pub fn target_slot(&mut self, bus: NodeId) -> PortRef {
        self.bus_slot(bus, PortRole::Target)
    }

    /// Allocate a fresh fan-out slot (initiator role) on a crossbar.
    pub fn initiator_slot(&mut self, bus: NodeId) -> PortRef {
        self.bus_slot(bus, PortRole::Initiator)
    }

    fn bus_slot(&mut self, bus: NodeId, role: PortRole) -> PortRef {
        let n = &mut self.nodes[bus];
        assert!(
            matches!(n.component, Component::Crossbar { .. }),
            "port slots are only allocated on crossbars"
        );
        let idx = n.ports.iter().filter(|p| p.role == role).count();
        let name = match role {
            PortRole::Target => format!("cpu_side[{idx}]"),
            PortRole::Initiator => format!("mem_side[{idx}]"),
        };
        n.ports.push(PortDef {
            name: name.clone(),
            role,
        });
        PortRef { node: bus, port: name }
    }

    fn port_role(&self, port: &PortRef) -> Result<PortRole, WiringError> {
        self.nodes[port.node]
            .ports
            .iter()
            .find(|p| p.name == port.port)
            .map(|p| p.role)
            .ok_or_else(|| WiringError::UnknownPort(self.port_label(port)))
    }

    fn port_label(&self, port: &PortRef) -> String {
        format!("{}.{}", self.nodes[port.node].name, port.port)
    }

    /// Bind two ports of opposite roles. Order of the arguments does not
    /// matter; a port that already participates in a binding is rejected.
    pub fn bind(&mut self, a: PortRef, b: PortRef) -> Result<(), WiringError> {
        let role_a = self.port_role(&a)?;
        let role_b = self.port_role(&b)?;
        let (initiator, target) = match (role_a, role_b) {
            (PortRole::Initiator, PortRole::Target) => (a, b),
            (PortRole::Target, PortRole::Initiator) => (b, a),
            _ => {
                return Err(WiringError::RoleMismatch {
                    a: self.port_label(&a),
                    b: self.port_label(&b),
                    role: role_a.to_string(),
                })
            }
        };
        for endpoint in [&initiator, &target] {
            if self
                .bound
                .contains_key(&(endpoint.node, endpoint.port.clone()))
            {
                return Err(WiringError::AlreadyBound(self.port_label(endpoint)));
            }
        }
        let idx = self.bindings.len();
        self.bound
            .insert((initiator.node, initiator.port.clone()), idx);
        self.bound.insert((target.node, target.port.clone()), idx);
        self.bindings.push(Binding { initiator, target });
        Ok(())
    }

    /// The port bound to `name` on `node`, if any. Resolves adapter renaming
    /// the same way `port` does, so reads and writes see the same endpoint.
    pub fn peer(&self, node: NodeId, name: &str) -> Option<&PortRef> {
        let port = self.port(node, name).ok()?;
        let idx = self.bound.get(&(port.node, port.port.clone()))?;
        let binding = &self.bindings[*idx];
        Some(if binding.initiator == port {
            &binding.target
        } else {
            &binding.initiator
        })
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Every declared port of every node must be bound. Double-binding is
    /// impossible by construction, so passing this sweep means bound exactly
    /// once.
    pub fn check_complete(&self) -> Result<(), WiringError> {
        for (id, node) in self.nodes.iter().enumerate() {
            for port in &node.ports {
                if !self.bound.contains_key(&(id, port.name.clone())) {
                    return Err(WiringError::Unbound(format!("{}.{}", node.name, port.name)));
                }
            }
        }
        Ok(())
    }
}
