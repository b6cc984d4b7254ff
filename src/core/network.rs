//! Fixed-size gate network with an upper-triangular connection matrix.
//!
//! Gates are stored in evaluation order. The first `inputs_count` slots are
//! input gates: gate `i` applies its kind directly to external input `i`.
//! Every other gate reduces the values of its connected predecessors through
//! the algebra's combination rule and runs its kind on the result. Because
//! connections only ever point forward, index order is a topological order
//! and a single left-to-right sweep evaluates the whole network.

use core::fmt;

use thiserror::Error;

use crate::algebra::Algebra;
use crate::prng::Prng;

/// Networks use one `u64` bitmap row per gate.
pub const MAX_GATES: usize = 64;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("network expects {expected} external inputs, got {got}")]
    InputArity { expected: usize, got: usize },
    #[error("cannot extract {outputs} outputs from a {gates}-gate network")]
    OutputArity { gates: usize, outputs: usize },
}

/// Undo record for a single mutation; strictly cheaper than cloning the
/// network because every move touches one gate or one connection bit.
pub enum Undo<A: Algebra> {
    Connection { from: usize, to: usize },
    Gate { index: usize, prior: A::Gate },
}

pub struct Network<A: Algebra> {
    gates: Vec<A::Gate>,
    /// Bit `i` of `incoming[j]` set means gate `i` feeds gate `j` (i < j).
    incoming: Vec<u64>,
    inputs_count: usize,
    outputs_count: usize,
}

impl<A: Algebra> Clone for Network<A> {
    fn clone(&self) -> Self {
        Self {
            gates: self.gates.clone(),
            incoming: self.incoming.clone(),
            inputs_count: self.inputs_count,
            outputs_count: self.outputs_count,
        }
    }
}

impl<A: Algebra> PartialEq for Network<A> {
    fn eq(&self, other: &Self) -> bool {
        self.gates == other.gates
            && self.incoming == other.incoming
            && self.inputs_count == other.inputs_count
            && self.outputs_count == other.outputs_count
    }
}

impl<A: Algebra> fmt::Debug for Network<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("algebra", &A::NAME)
            .field("gates", &self.gates)
            .field("incoming", &self.incoming)
            .field("inputs_count", &self.inputs_count)
            .field("outputs_count", &self.outputs_count)
            .finish()
    }
}

impl<A: Algebra> Network<A> {
    /// Random network: uniform gate kinds and each forward connection
    /// present with probability 1/2.
    ///
    /// `inputs` may exceed `n`; the surplus external inputs are then simply
    /// unobserved (a 1-gate network given a 2-input target sees only the
    /// first input). `outputs` must fit in the gate array.
    pub fn random(n: usize, inputs: usize, outputs: usize, rng: &mut Prng) -> Self {
        assert!(n >= 1 && n <= MAX_GATES, "gate count out of range");
        assert!(inputs >= 1, "need at least one external input");
        assert!(outputs >= 1 && outputs <= n, "outputs must fit in the network");

        let gates = (0..n).map(|_| A::random_gate(rng)).collect();
        let mut incoming = vec![0u64; n];
        for (j, row) in incoming.iter_mut().enumerate() {
            for i in 0..j {
                if rng.next_bool() {
                    *row |= 1 << i;
                }
            }
        }

        Self {
            gates,
            incoming,
            inputs_count: inputs,
            outputs_count: outputs,
        }
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn inputs_count(&self) -> usize {
        self.inputs_count
    }

    pub fn outputs_count(&self) -> usize {
        self.outputs_count
    }

    pub fn gate(&self, index: usize) -> &A::Gate {
        &self.gates[index]
    }

    pub fn gate_mut(&mut self, index: usize) -> &mut A::Gate {
        &mut self.gates[index]
    }

    pub fn connected(&self, from: usize, to: usize) -> bool {
        from < to && self.incoming[to] & (1 << from) != 0
    }

    pub fn set_connection(&mut self, from: usize, to: usize, on: bool) {
        assert!(from < to, "connections must point forward");
        if on {
            self.incoming[to] |= 1 << from;
        } else {
            self.incoming[to] &= !(1 << from);
        }
    }

    /// Restore every gate's memory cell to its configured initial value.
    /// Fitness functions call this between independent truth-table rows;
    /// stream targets call it once per test sequence.
    pub fn reset_memory(&mut self) {
        for g in &mut self.gates {
            A::reset_memory(g);
        }
    }

    /// Single-output forward pass: the value of the last gate.
    pub fn forward(&mut self, inputs: &[A::Value]) -> Result<A::Value, EvalError> {
        let values = self.pass(inputs)?;
        Ok(values[values.len() - 1])
    }

    /// Multi-output forward pass: the last `outputs.len()` gates in order.
    pub fn forward_multi(
        &mut self,
        inputs: &[A::Value],
        outputs: &mut [A::Value],
    ) -> Result<(), EvalError> {
        let n = self.gates.len();
        if outputs.len() > n {
            return Err(EvalError::OutputArity {
                gates: n,
                outputs: outputs.len(),
            });
        }
        let values = self.pass(inputs)?;
        outputs.copy_from_slice(&values[n - outputs.len()..]);
        Ok(())
    }

    fn pass(&mut self, inputs: &[A::Value]) -> Result<Vec<A::Value>, EvalError> {
        if inputs.len() != self.inputs_count {
            return Err(EvalError::InputArity {
                expected: self.inputs_count,
                got: inputs.len(),
            });
        }

        for g in &mut self.gates {
            A::begin_pass(g);
        }

        let n = self.gates.len();
        let mut values: Vec<A::Value> = Vec::with_capacity(n);
        let mut preds: Vec<A::Value> = Vec::with_capacity(n);

        for i in 0..n {
            let v = if i < self.inputs_count {
                A::eval(&mut self.gates[i], inputs[i])
            } else {
                preds.clear();
                let row = self.incoming[i];
                for (j, &value) in values.iter().enumerate() {
                    if row & (1 << j) != 0 {
                        preds.push(value);
                    }
                }
                let input = A::combine(&self.gates[i], &preds);
                A::eval(&mut self.gates[i], input)
            };
            values.push(v);
        }

        Ok(values)
    }

    /// Apply exactly one random local change and return its undo record.
    ///
    /// Moves are drawn uniformly from those applicable: connection flip
    /// (needs at least two gates), kind change, parameter perturbation, and
    /// memory redraw (memory-carrying algebras only).
    pub fn mutate(&mut self, rng: &mut Prng) -> Undo<A> {
        let n = self.gates.len();
        let mut moves = 2; // kind change + parameter perturbation
        let conn_move = n >= 2;
        if conn_move {
            moves += 1;
        }
        if A::HAS_MEMORY {
            moves += 1;
        }

        let mut choice = rng.gen_range_usize(0, moves);
        if conn_move {
            if choice == 0 {
                let from = rng.gen_range_usize(0, n - 1);
                let to = from + 1 + rng.gen_range_usize(0, n - 1 - from);
                self.incoming[to] ^= 1 << from;
                return Undo::Connection { from, to };
            }
            choice -= 1;
        }

        let index = rng.gen_range_usize(0, n);
        let prior = self.gates[index].clone();
        match choice {
            0 => A::set_random_kind(&mut self.gates[index], rng),
            1 => A::perturb_param(&mut self.gates[index], rng),
            _ => A::redraw_memory(&mut self.gates[index], rng),
        }
        Undo::Gate { index, prior }
    }

    pub fn revert(&mut self, undo: Undo<A>) {
        match undo {
            Undo::Connection { from, to } => {
                self.incoming[to] ^= 1 << from;
            }
            Undo::Gate { index, prior } => {
                self.gates[index] = prior;
            }
        }
    }

    /// One line per gate: kind, tunables and input wiring.
    pub fn describe(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::new();
        for (i, g) in self.gates.iter().enumerate() {
            let _ = write!(out, "Gate {i}: {}", A::describe(g));
            if i < self.inputs_count {
                let _ = writeln!(out, " <- input {i}");
                continue;
            }
            let row = self.incoming[i];
            if row == 0 {
                let _ = writeln!(out, " <- none");
            } else {
                let _ = write!(out, " <-");
                for j in 0..i {
                    if row & (1 << j) != 0 {
                        let _ = write!(out, " {j}");
                    }
                }
                let _ = writeln!(out);
            }
        }
        out
    }

    /// Compact one-line form for small solved networks: the kind labels in
    /// evaluation order.
    pub fn brief(&self) -> String {
        self.gates
            .iter()
            .map(|g| A::describe(g))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Invariant check used by tests and debug assertions: every connection
    /// points strictly forward and fits the gate array.
    pub fn connections_are_forward(&self) -> bool {
        self.incoming.iter().enumerate().all(|(j, &row)| {
            if j == 0 {
                row == 0
            } else {
                row >> j == 0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{Binary, BinaryKind};
    use crate::quaternary::{Quaternary, QuaternaryKind};

    #[test]
    fn random_networks_keep_connections_forward() {
        let mut rng = Prng::new(21);
        for n in 1..=8 {
            let net = Network::<Binary>::random(n, n.min(2), 1, &mut rng);
            assert!(net.connections_are_forward());
        }
    }

    #[test]
    fn mutation_preserves_forward_invariant() {
        let mut rng = Prng::new(22);
        let mut net = Network::<Binary>::random(8, 2, 1, &mut rng);
        for _ in 0..2000 {
            net.mutate(&mut rng);
            assert!(net.connections_are_forward());
        }
    }

    #[test]
    fn mutate_then_revert_is_identity() {
        let mut rng = Prng::new(23);
        let mut net = Network::<Quaternary>::random(6, 2, 1, &mut rng);
        for _ in 0..500 {
            let snapshot = net.clone();
            let undo = net.mutate(&mut rng);
            net.revert(undo);
            assert_eq!(net, snapshot);
        }
    }

    #[test]
    fn input_arity_is_checked() {
        let mut rng = Prng::new(24);
        let mut net = Network::<Binary>::random(4, 2, 1, &mut rng);
        let err = net.forward(&[1]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::InputArity {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn forward_is_pure_without_memory_kinds() {
        let mut rng = Prng::new(25);
        let mut net = Network::<Binary>::random(6, 2, 1, &mut rng);
        for i in 0..net.len() {
            net.gate_mut(i).kind = BinaryKind::Pass;
        }
        let a = net.forward(&[1, 0]).unwrap();
        let b = net.forward(&[1, 0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn multi_output_reads_the_last_gates() {
        let mut rng = Prng::new(26);
        let mut net = Network::<Binary>::random(4, 2, 3, &mut rng);
        // All PASS with threshold 1 and no connections: hidden gates see 0.
        for i in 0..net.len() {
            *net.gate_mut(i) = crate::binary::BinaryGate::new(BinaryKind::Pass, 1);
        }
        for j in 1..net.len() {
            for i in 0..j {
                net.set_connection(i, j, false);
            }
        }
        let mut out = [9u8; 3];
        net.forward_multi(&[1, 1], &mut out).unwrap();
        // Outputs are gates 1, 2, 3: input gate 1 passes its external input,
        // the unconnected hidden gates fall back to zero.
        assert_eq!(out, [1, 0, 0]);
    }

    #[test]
    fn surplus_external_inputs_are_tolerated() {
        let mut rng = Prng::new(27);
        let mut net = Network::<Quaternary>::random(1, 2, 1, &mut rng);
        *net.gate_mut(0) = crate::quaternary::QuaternaryGate::new(QuaternaryKind::Complement);
        assert_eq!(net.forward(&[0, 0]).unwrap(), 3);
        assert_eq!(net.forward(&[2, 0]).unwrap(), 1);
    }

    #[test]
    fn describe_lists_wiring() {
        let mut rng = Prng::new(28);
        let mut net = Network::<Binary>::random(3, 2, 1, &mut rng);
        net.set_connection(0, 2, true);
        net.set_connection(1, 2, false);
        let text = net.describe();
        assert!(text.contains("Gate 0"));
        assert!(text.contains("<- input 0"));
        assert!(text.lines().nth(2).unwrap().contains("<- 0"));
    }
}
