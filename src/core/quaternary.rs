//! Quaternary gate algebra: V = {0, 1, 2, 3}, read as DNA bases A, T, G, C.
//!
//! The primitives mirror nucleic-acid chemistry: complement (A<->T, G<->C),
//! binding affinity, transcription (base addition mod 4) and enzyme-like
//! catalysis keyed on the memory cell. Predecessors combine by sum mod 4.

use crate::algebra::Algebra;
use crate::prng::Prng;

pub type Base = u8;

pub const BASE_NAMES: [char; 4] = ['A', 'T', 'G', 'C'];

/// DNA complement-like involution: 3 - x. Watson-Crick pairing proper is
/// encoded by the affinity table in [`bind`].
pub fn complement(x: Base) -> Base {
    3 - x
}

pub fn rotate(x: Base) -> Base {
    (x + 1) % 4
}

/// Pairing affinity: A-T and G-C pairs bind strongly (3), self-pairs weakly
/// (1), everything else not at all (0).
pub fn bind(a: Base, b: Base) -> Base {
    match (a, b) {
        (0, 1) | (1, 0) | (2, 3) | (3, 2) => 3,
        _ if a == b => 1,
        _ => 0,
    }
}

pub fn transcribe(a: Base, b: Base) -> Base {
    (a + b) % 4
}

/// The memory base selects which transform is applied to the input.
pub fn catalyze(mem: Base, x: Base) -> Base {
    match mem {
        0 => x,
        1 => complement(x),
        2 => rotate(x),
        _ => (x + 2) % 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuaternaryKind {
    Identity,
    Complement,
    Memory,
    Rotate,
    /// Pairing affinity of input against memory.
    BindMemory,
    /// (input + memory) mod 4.
    TranscribeMemory,
    /// Memory-selected transform of the input.
    CatalyzeMemory,
    /// Two stored states swap on match; other inputs pass through.
    Swap,
}

impl QuaternaryKind {
    pub fn label(self) -> &'static str {
        match self {
            QuaternaryKind::Identity => "ID",
            QuaternaryKind::Complement => "COMP",
            QuaternaryKind::Memory => "MEM",
            QuaternaryKind::Rotate => "ROT",
            QuaternaryKind::BindMemory => "BIND",
            QuaternaryKind::TranscribeMemory => "TRANS",
            QuaternaryKind::CatalyzeMemory => "CAT",
            QuaternaryKind::Swap => "THRESH",
        }
    }
}

const KINDS: [QuaternaryKind; 8] = [
    QuaternaryKind::Identity,
    QuaternaryKind::Complement,
    QuaternaryKind::Memory,
    QuaternaryKind::Rotate,
    QuaternaryKind::BindMemory,
    QuaternaryKind::TranscribeMemory,
    QuaternaryKind::CatalyzeMemory,
    QuaternaryKind::Swap,
];

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuaternaryGate {
    pub kind: QuaternaryKind,
    pub state1: Base,
    pub state2: Base,
    memory: Base,
    memory_init: Base,
}

impl QuaternaryGate {
    pub fn new(kind: QuaternaryKind) -> Self {
        Self {
            kind,
            state1: 0,
            state2: 0,
            memory: 0,
            memory_init: 0,
        }
    }

    pub fn memory(&self) -> Base {
        self.memory
    }

    pub fn with_memory(mut self, m: Base) -> Self {
        self.memory = m;
        self.memory_init = m;
        self
    }
}

/// Marker type for the quaternary algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quaternary;

impl Algebra for Quaternary {
    type Value = Base;
    type Gate = QuaternaryGate;

    const NAME: &'static str = "quaternary";
    const HAS_MEMORY: bool = true;

    fn random_gate(rng: &mut Prng) -> QuaternaryGate {
        let mut g = QuaternaryGate::new(KINDS[rng.gen_range_usize(0, KINDS.len())]);
        g.state1 = rng.gen_range_usize(0, 4) as Base;
        g.state2 = rng.gen_range_usize(0, 4) as Base;
        let m = rng.gen_range_usize(0, 4) as Base;
        g.memory = m;
        g.memory_init = m;
        g
    }

    fn set_random_kind(gate: &mut QuaternaryGate, rng: &mut Prng) {
        gate.kind = KINDS[rng.gen_range_usize(0, KINDS.len())];
    }

    fn perturb_param(gate: &mut QuaternaryGate, rng: &mut Prng) {
        gate.state1 = rng.gen_range_usize(0, 4) as Base;
        gate.state2 = rng.gen_range_usize(0, 4) as Base;
    }

    fn redraw_memory(gate: &mut QuaternaryGate, rng: &mut Prng) {
        let m = rng.gen_range_usize(0, 4) as Base;
        gate.memory_init = m;
        gate.memory = m;
    }

    fn reset_memory(gate: &mut QuaternaryGate) {
        gate.memory = gate.memory_init;
    }

    fn combine(_gate: &QuaternaryGate, preds: &[Base]) -> Base {
        if preds.is_empty() {
            return 0;
        }
        let sum: u32 = preds.iter().map(|&b| b as u32).sum();
        (sum % 4) as Base
    }

    fn eval(gate: &mut QuaternaryGate, input: Base) -> Base {
        match gate.kind {
            QuaternaryKind::Identity => input,
            QuaternaryKind::Complement => complement(input),
            QuaternaryKind::Memory => {
                gate.memory = input;
                input
            }
            QuaternaryKind::Rotate => rotate(input),
            QuaternaryKind::BindMemory => bind(input, gate.memory),
            QuaternaryKind::TranscribeMemory => transcribe(input, gate.memory),
            QuaternaryKind::CatalyzeMemory => catalyze(gate.memory, input),
            QuaternaryKind::Swap => {
                if input == gate.state1 {
                    gate.state2
                } else if input == gate.state2 {
                    gate.state1
                } else {
                    input
                }
            }
        }
    }

    fn describe(gate: &QuaternaryGate) -> String {
        match gate.kind {
            QuaternaryKind::Swap => format!(
                "{}({}<->{})",
                gate.kind.label(),
                BASE_NAMES[gate.state1 as usize],
                BASE_NAMES[gate.state2 as usize]
            ),
            _ => gate.kind.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_is_involutive() {
        for x in 0..4u8 {
            assert_eq!(complement(complement(x)), x);
        }
        assert_eq!(complement(0), 3);
        assert_eq!(complement(1), 2);
    }

    #[test]
    fn binding_affinity_table() {
        // Strong Watson-Crick pairs.
        assert_eq!(bind(0, 1), 3);
        assert_eq!(bind(1, 0), 3);
        assert_eq!(bind(2, 3), 3);
        assert_eq!(bind(3, 2), 3);
        // Weak self-pairs.
        for x in 0..4u8 {
            assert_eq!(bind(x, x), 1);
        }
        // No affinity otherwise.
        assert_eq!(bind(0, 2), 0);
        assert_eq!(bind(1, 3), 0);
    }

    #[test]
    fn catalysis_selects_transform() {
        assert_eq!(catalyze(0, 2), 2);
        assert_eq!(catalyze(1, 0), 3);
        assert_eq!(catalyze(2, 3), 0);
        assert_eq!(catalyze(3, 1), 3);
    }

    #[test]
    fn swap_gate_swaps_only_its_states() {
        let mut g = QuaternaryGate::new(QuaternaryKind::Swap);
        g.state1 = 0;
        g.state2 = 3;
        assert_eq!(Quaternary::eval(&mut g, 0), 3);
        assert_eq!(Quaternary::eval(&mut g, 3), 0);
        assert_eq!(Quaternary::eval(&mut g, 1), 1);
        assert_eq!(Quaternary::eval(&mut g, 2), 2);
    }

    #[test]
    fn combine_sums_mod_4() {
        let g = QuaternaryGate::new(QuaternaryKind::Identity);
        assert_eq!(Quaternary::combine(&g, &[3, 3]), 2);
        assert_eq!(Quaternary::combine(&g, &[1, 2]), 3);
        assert_eq!(Quaternary::combine(&g, &[]), 0);
    }
}
