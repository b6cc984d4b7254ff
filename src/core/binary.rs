//! Strict binary gate algebra: V = {0, 1}.
//!
//! A hidden gate sums its predecessor bits and compares the sum against its
//! integer threshold; the thresholded bit is then run through the gate's
//! kind. Memory-carrying kinds make sequence detection possible.

use crate::algebra::Algebra;
use crate::prng::Prng;

pub type Bit = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryKind {
    /// Identity.
    Pass,
    /// Logical negation.
    Not,
    /// Store the input and return it.
    Memory,
    /// Return input XOR the stored bit.
    XorMemory,
}

impl BinaryKind {
    pub fn label(self) -> &'static str {
        match self {
            BinaryKind::Pass => "PASS",
            BinaryKind::Not => "NOT",
            BinaryKind::Memory => "MEM",
            BinaryKind::XorMemory => "XOR_MEM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryGate {
    pub kind: BinaryKind,
    /// Activation threshold for the predecessor sum; 0 or 1.
    pub threshold: u8,
    memory: Bit,
    memory_init: Bit,
}

impl BinaryGate {
    pub fn new(kind: BinaryKind, threshold: u8) -> Self {
        Self {
            kind,
            threshold,
            memory: 0,
            memory_init: 0,
        }
    }

    pub fn memory(&self) -> Bit {
        self.memory
    }
}

/// Marker type for the binary algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binary;

impl Algebra for Binary {
    type Value = Bit;
    type Gate = BinaryGate;

    const NAME: &'static str = "binary";
    const HAS_MEMORY: bool = true;

    fn random_gate(rng: &mut Prng) -> BinaryGate {
        let kind = match rng.gen_range_usize(0, 4) {
            0 => BinaryKind::Pass,
            1 => BinaryKind::Not,
            2 => BinaryKind::Memory,
            _ => BinaryKind::XorMemory,
        };
        BinaryGate::new(kind, rng.gen_range_usize(0, 2) as u8)
    }

    fn set_random_kind(gate: &mut BinaryGate, rng: &mut Prng) {
        gate.kind = Self::random_gate(rng).kind;
    }

    fn perturb_param(gate: &mut BinaryGate, _rng: &mut Prng) {
        gate.threshold ^= 1;
    }

    fn redraw_memory(gate: &mut BinaryGate, rng: &mut Prng) {
        let bit = rng.gen_range_usize(0, 2) as Bit;
        gate.memory_init = bit;
        gate.memory = bit;
    }

    fn reset_memory(gate: &mut BinaryGate) {
        gate.memory = gate.memory_init;
    }

    fn combine(gate: &BinaryGate, preds: &[Bit]) -> Bit {
        if preds.is_empty() {
            return 0;
        }
        let sum: u32 = preds.iter().map(|&b| b as u32).sum();
        if sum >= gate.threshold as u32 {
            1
        } else {
            0
        }
    }

    fn eval(gate: &mut BinaryGate, input: Bit) -> Bit {
        match gate.kind {
            BinaryKind::Pass => input,
            BinaryKind::Not => input ^ 1,
            BinaryKind::Memory => {
                gate.memory = input;
                input
            }
            BinaryKind::XorMemory => input ^ gate.memory,
        }
    }

    fn describe(gate: &BinaryGate) -> String {
        format!("{}(th={})", gate.kind.label(), gate.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_behave_as_documented() {
        let mut pass = BinaryGate::new(BinaryKind::Pass, 1);
        assert_eq!(Binary::eval(&mut pass, 1), 1);
        assert_eq!(Binary::eval(&mut pass, 0), 0);

        let mut not = BinaryGate::new(BinaryKind::Not, 1);
        assert_eq!(Binary::eval(&mut not, 1), 0);
        assert_eq!(Binary::eval(&mut not, 0), 1);

        let mut mem = BinaryGate::new(BinaryKind::Memory, 1);
        assert_eq!(Binary::eval(&mut mem, 1), 1);
        assert_eq!(mem.memory(), 1);

        // XOR-with-memory sees whatever was stored last.
        let mut xm = BinaryGate::new(BinaryKind::XorMemory, 1);
        assert_eq!(Binary::eval(&mut xm, 1), 1);
        Binary::redraw_memory(&mut xm, &mut Prng::new(3));
        let m = xm.memory();
        assert_eq!(Binary::eval(&mut xm, 1), 1 ^ m);
    }

    #[test]
    fn combine_thresholds_predecessor_sum() {
        let g = BinaryGate::new(BinaryKind::Pass, 1);
        assert_eq!(Binary::combine(&g, &[0, 0]), 0);
        assert_eq!(Binary::combine(&g, &[0, 1]), 1);
        assert_eq!(Binary::combine(&g, &[1, 1]), 1);

        let g2 = BinaryGate::new(BinaryKind::Pass, 0);
        // Threshold 0 fires even on an all-zero sum.
        assert_eq!(Binary::combine(&g2, &[0]), 1);
    }

    #[test]
    fn empty_predecessors_yield_zero() {
        // Fallback bypasses the threshold entirely.
        let g = BinaryGate::new(BinaryKind::Pass, 0);
        assert_eq!(Binary::combine(&g, &[]), 0);
    }

    #[test]
    fn reset_restores_initial_memory() {
        let mut g = BinaryGate::new(BinaryKind::Memory, 1);
        Binary::eval(&mut g, 1);
        assert_eq!(g.memory(), 1);
        Binary::reset_memory(&mut g);
        assert_eq!(g.memory(), 0);
    }
}
