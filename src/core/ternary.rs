//! Balanced ternary gate algebra: V = {-1, 0, +1}.
//!
//! Predecessor values are summed and sign-compressed back into the domain.
//! MIN/MAX against memory play the role of AND/OR; consensus-style targets
//! fall out of the balanced representation naturally.

use crate::algebra::Algebra;
use crate::prng::Prng;

pub type Trit = i8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TernaryKind {
    Pass,
    Negate,
    Memory,
    /// input * memory
    MulMemory,
    /// min(input, memory)
    MinMemory,
    /// max(input, memory)
    MaxMemory,
    /// Two integer cutoffs partition the input into -1 / 0 / +1.
    Threshold,
    /// -1 -> 0 -> +1 -> -1
    Cycle,
}

impl TernaryKind {
    pub fn label(self) -> &'static str {
        match self {
            TernaryKind::Pass => "PASS",
            TernaryKind::Negate => "NEG",
            TernaryKind::Memory => "MEM",
            TernaryKind::MulMemory => "MUL_MEM",
            TernaryKind::MinMemory => "MIN_MEM",
            TernaryKind::MaxMemory => "MAX_MEM",
            TernaryKind::Threshold => "THRESH",
            TernaryKind::Cycle => "CYCLE",
        }
    }
}

const KINDS: [TernaryKind; 8] = [
    TernaryKind::Pass,
    TernaryKind::Negate,
    TernaryKind::Memory,
    TernaryKind::MulMemory,
    TernaryKind::MinMemory,
    TernaryKind::MaxMemory,
    TernaryKind::Threshold,
    TernaryKind::Cycle,
];

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TernaryGate {
    pub kind: TernaryKind,
    /// Inputs strictly below this become -1.
    pub threshold_low: i8,
    /// Inputs strictly above this become +1.
    pub threshold_high: i8,
    memory: Trit,
    memory_init: Trit,
}

impl TernaryGate {
    pub fn new(kind: TernaryKind) -> Self {
        Self {
            kind,
            threshold_low: -1,
            threshold_high: 1,
            memory: 0,
            memory_init: 0,
        }
    }

    pub fn memory(&self) -> Trit {
        self.memory
    }

    pub fn with_memory(mut self, m: Trit) -> Self {
        self.memory = m;
        self.memory_init = m;
        self
    }
}

/// Marker type for the balanced ternary algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ternary;

impl Algebra for Ternary {
    type Value = Trit;
    type Gate = TernaryGate;

    const NAME: &'static str = "ternary";
    const HAS_MEMORY: bool = true;

    fn random_gate(rng: &mut Prng) -> TernaryGate {
        TernaryGate::new(KINDS[rng.gen_range_usize(0, KINDS.len())])
    }

    fn set_random_kind(gate: &mut TernaryGate, rng: &mut Prng) {
        gate.kind = KINDS[rng.gen_range_usize(0, KINDS.len())];
    }

    fn perturb_param(gate: &mut TernaryGate, rng: &mut Prng) {
        let a = rng.gen_range_i32(-1, 1) as i8;
        let b = rng.gen_range_i32(-1, 1) as i8;
        gate.threshold_low = a.min(b);
        gate.threshold_high = a.max(b);
    }

    fn redraw_memory(gate: &mut TernaryGate, rng: &mut Prng) {
        let m = rng.gen_range_i32(-1, 1) as Trit;
        gate.memory_init = m;
        gate.memory = m;
    }

    fn reset_memory(gate: &mut TernaryGate) {
        gate.memory = gate.memory_init;
    }

    fn combine(_gate: &TernaryGate, preds: &[Trit]) -> Trit {
        if preds.is_empty() {
            return 0;
        }
        let sum: i32 = preds.iter().map(|&t| t as i32).sum();
        sum.signum() as Trit
    }

    fn eval(gate: &mut TernaryGate, input: Trit) -> Trit {
        match gate.kind {
            TernaryKind::Pass => input,
            TernaryKind::Negate => -input,
            TernaryKind::Memory => {
                gate.memory = input;
                input
            }
            TernaryKind::MulMemory => input * gate.memory,
            TernaryKind::MinMemory => input.min(gate.memory),
            TernaryKind::MaxMemory => input.max(gate.memory),
            TernaryKind::Threshold => {
                if input < gate.threshold_low {
                    -1
                } else if input > gate.threshold_high {
                    1
                } else {
                    0
                }
            }
            TernaryKind::Cycle => match input {
                -1 => 0,
                0 => 1,
                _ => -1,
            },
        }
    }

    fn describe(gate: &TernaryGate) -> String {
        match gate.kind {
            TernaryKind::Threshold => format!(
                "{}({}..{})",
                gate.kind.label(),
                gate.threshold_low,
                gate.threshold_high
            ),
            _ => gate.kind.label().to_string(),
        }
    }
}
