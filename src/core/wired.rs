//! Explicitly wired two-input boolean networks.
//!
//! Unlike [`Network`](crate::network::Network), which sums whatever
//! predecessors happen to be connected, a wired gate names its two sources
//! exactly: the external inputs A and B, or an earlier gate's output. This
//! is the smallest search space in which a single gate can express XOR
//! outright, so the evolver finds minimal circuits like `XOR(A,B)`.

use core::fmt;

use crate::prng::Prng;

/// Where a wired gate reads a value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Src {
    A,
    B,
    Gate(usize),
}

impl fmt::Display for Src {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Src::A => write!(f, "A"),
            Src::B => write!(f, "B"),
            Src::Gate(i) => write!(f, "G{i}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WiredKind {
    And,
    Or,
    Not,
    Xor,
    Pass,
}

impl WiredKind {
    pub fn label(self) -> &'static str {
        match self {
            WiredKind::And => "AND",
            WiredKind::Or => "OR",
            WiredKind::Not => "NOT",
            WiredKind::Xor => "XOR",
            WiredKind::Pass => "PASS",
        }
    }

    /// NOT and PASS read only their first input.
    pub fn is_unary(self) -> bool {
        matches!(self, WiredKind::Not | WiredKind::Pass)
    }
}

const KINDS: [WiredKind; 5] = [
    WiredKind::And,
    WiredKind::Or,
    WiredKind::Not,
    WiredKind::Xor,
    WiredKind::Pass,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WiredGate {
    pub kind: WiredKind,
    pub in1: Src,
    pub in2: Src,
}

impl WiredGate {
    pub fn eval(self, a: u8, b: u8, values: &[u8]) -> u8 {
        let read = |s: Src| match s {
            Src::A => a,
            Src::B => b,
            Src::Gate(i) => values[i],
        };
        let x = read(self.in1);
        let y = read(self.in2);
        match self.kind {
            WiredKind::And => x & y,
            WiredKind::Or => x | y,
            WiredKind::Not => x ^ 1,
            WiredKind::Xor => x ^ y,
            WiredKind::Pass => x,
        }
    }
}

/// The output is the last gate's value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WiredNetwork {
    gates: Vec<WiredGate>,
}

/// Undo record for [`WiredNetwork::mutate`].
#[derive(Debug, Clone, Copy)]
pub struct WiredUndo {
    index: usize,
    prior: WiredGate,
}

fn random_src(upto: usize, rng: &mut Prng) -> Src {
    // A, B, or any earlier gate.
    match rng.gen_range_usize(0, upto + 2) {
        0 => Src::A,
        1 => Src::B,
        k => Src::Gate(k - 2),
    }
}

impl WiredNetwork {
    /// Gate 0 always reads the external inputs directly; later gates may
    /// read A, B or any earlier gate.
    pub fn random(n: usize, rng: &mut Prng) -> Self {
        assert!(n >= 1, "need at least one gate");
        let gates = (0..n)
            .map(|i| {
                let kind = KINDS[rng.gen_range_usize(0, KINDS.len())];
                if i == 0 {
                    WiredGate {
                        kind,
                        in1: Src::A,
                        in2: Src::B,
                    }
                } else {
                    WiredGate {
                        kind,
                        in1: random_src(i, rng),
                        in2: random_src(i, rng),
                    }
                }
            })
            .collect();
        Self { gates }
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn forward(&self, a: u8, b: u8) -> u8 {
        let mut values = Vec::with_capacity(self.gates.len());
        for g in &self.gates {
            let v = g.eval(a, b, &values);
            values.push(v);
        }
        values[values.len() - 1]
    }

    /// Change one gate's kind or rewire one of its inputs. Gate 0 keeps its
    /// fixed A/B wiring and only ever changes kind.
    pub fn mutate(&mut self, rng: &mut Prng) -> WiredUndo {
        let index = rng.gen_range_usize(0, self.gates.len());
        let prior = self.gates[index];
        let g = &mut self.gates[index];
        let rewirable = index > 0;
        match rng.gen_range_usize(0, if rewirable { 3 } else { 1 }) {
            0 => g.kind = KINDS[rng.gen_range_usize(0, KINDS.len())],
            1 => g.in1 = random_src(index, rng),
            _ => g.in2 = random_src(index, rng),
        }
        WiredUndo { index, prior }
    }

    pub fn revert(&mut self, undo: WiredUndo) {
        self.gates[undo.index] = undo.prior;
    }

    /// `XOR(A,B)`-style rendering of every gate, unary kinds with a single
    /// argument.
    pub fn describe(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::new();
        for (i, g) in self.gates.iter().enumerate() {
            if g.kind.is_unary() {
                let _ = writeln!(out, "Gate {i}: {}({})", g.kind.label(), g.in1);
            } else {
                let _ = writeln!(out, "Gate {i}: {}({},{})", g.kind.label(), g.in1, g.in2);
            }
        }
        out
    }
}
