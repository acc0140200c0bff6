//! Dependency graph of a circuit's operations.
//!
//! Every node is an operation. An edge `a -> b` labelled with a wire means
//! `b` is the next operation after `a` to touch that wire. Operations are
//! only ever appended, so node insertion order is already a valid execution
//! order; the graph records which operations are independent.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A quantum or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    Qubit(QubitId),
    Clbit(ClbitId),
}

/// Operation graph plus the last operation seen on each wire.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
    num_qubits: u32,
    num_clbits: u32,
    last_on_wire: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    /// An empty graph with no wires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next qubit wire.
    pub fn add_qubit(&mut self) -> QubitId {
        self.num_qubits += 1;
        QubitId(self.num_qubits - 1)
    }

    /// Allocate the next classical wire.
    pub fn add_clbit(&mut self) -> ClbitId {
        self.num_clbits += 1;
        ClbitId(self.num_clbits - 1)
    }

    fn check(&self, inst: &Instruction) -> IrResult<()> {
        let op = inst.name();

        match &inst.kind {
            InstructionKind::Gate(gate) if gate.num_qubits() as usize != inst.qubits.len() => {
                return Err(IrError::WrongArity {
                    op,
                    expected: gate.num_qubits(),
                    got: inst.qubits.len(),
                });
            }
            InstructionKind::Measure if inst.qubits.len() != inst.clbits.len() => {
                return Err(IrError::MeasureShape {
                    qubits: inst.qubits.len(),
                    clbits: inst.clbits.len(),
                });
            }
            _ => {}
        }

        let mut seen = FxHashSet::default();
        for &qubit in &inst.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::UnknownQubit { qubit, op });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, op });
            }
        }
        if let Some(&clbit) = inst.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(IrError::UnknownClbit { clbit, op });
        }
        Ok(())
    }

    /// Validate `inst` and append it after the last operation on each of
    /// its wires.
    pub fn apply(&mut self, inst: Instruction) -> IrResult<NodeIndex> {
        self.check(&inst)?;

        let wires: Vec<WireId> = inst
            .qubits
            .iter()
            .map(|&q| WireId::Qubit(q))
            .chain(inst.clbits.iter().map(|&c| WireId::Clbit(c)))
            .collect();

        let node = self.graph.add_node(inst);
        for wire in wires {
            if let Some(prev) = self.last_on_wire.insert(wire, node) {
                if !self.graph.contains_edge(prev, node) {
                    self.graph.add_edge(prev, node, wire);
                }
            }
        }
        Ok(node)
    }

    /// Operations in a valid execution order: the order they were applied.
    pub fn topological_ops(&self) -> Vec<&Instruction> {
        self.graph.node_weights().collect()
    }

    /// Number of allocated qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of allocated classical bits.
    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Length of the longest dependency chain.
    pub fn depth(&self) -> usize {
        // Insertion order is topological, so one forward pass suffices.
        let mut layer = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            let below = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|p| layer[p.index()])
                .max()
                .unwrap_or(0);
            layer[node.index()] = below + 1;
        }
        layer.into_iter().max().unwrap_or(0)
    }
}
