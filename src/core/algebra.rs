use core::fmt;

use crate::prng::Prng;

/// Capability bundle describing one gate algebra.
///
/// The five algebras (binary, ternary, quaternary, analog, superposition)
/// share the network scaffolding, the mutator and the hill climber; they
/// differ only in value domain, gate kinds and how a hidden gate reduces the
/// values of its predecessors to a single input. Implementors are zero-sized
/// marker types; all state lives in `Self::Gate`.
pub trait Algebra {
    /// The value domain V that flows along connections.
    type Value: Copy + PartialEq + Default + fmt::Debug;

    /// One gate: kind tag, kind-specific tunables and an optional memory cell.
    type Gate: Clone + PartialEq + fmt::Debug;

    const NAME: &'static str;

    /// Whether gates of this algebra carry a mutable memory cell. Controls
    /// whether the memory-redraw move is in the mutator's move set.
    const HAS_MEMORY: bool;

    /// A gate with uniformly drawn kind and freshly drawn tunables.
    fn random_gate(rng: &mut Prng) -> Self::Gate;

    /// Replace the gate's kind with a uniformly drawn valid kind.
    fn set_random_kind(gate: &mut Self::Gate, rng: &mut Prng);

    /// Adjust one tunable parameter, staying within the algebra's bounds.
    fn perturb_param(gate: &mut Self::Gate, rng: &mut Prng);

    /// Redraw the gate's initial memory cell from V.
    fn redraw_memory(gate: &mut Self::Gate, rng: &mut Prng);

    /// Restore the runtime memory cell to its configured initial value.
    fn reset_memory(gate: &mut Self::Gate);

    /// Hook run on every gate before a forward pass starts.
    fn begin_pass(_gate: &mut Self::Gate) {}

    /// Reduce predecessor values to the single input of a hidden gate.
    ///
    /// An empty predecessor set yields the domain's zero element; the same
    /// policy applies to every algebra.
    fn combine(gate: &Self::Gate, preds: &[Self::Value]) -> Self::Value;

    /// Evaluate the gate's kind on one input, updating memory as specified.
    fn eval(gate: &mut Self::Gate, input: Self::Value) -> Self::Value;

    /// Short printable form of a gate, e.g. `XOR_MEM(th=1)`.
    fn describe(gate: &Self::Gate) -> String;
}
