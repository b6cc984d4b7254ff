//! Quantum-inspired superposition algebra.
//!
//! Each gate carries a unit-norm complex state vector of length
//! [`STATES`]. Gate kinds rotate, mix or phase-shift that vector as a
//! function of the scalar input; the value that flows to successors is the
//! measurement of the state, a probability-weighted index expectation in
//! [0, 1]. State vectors are reinitialized to the uniform superposition at
//! the start of every forward pass, so the algebra is memoryless between
//! passes.

use crate::algebra::Algebra;
use crate::prng::Prng;

pub const STATES: usize = 4;

/// Below this L2 norm the state is considered collapsed and is
/// reinitialized to the uniform superposition instead of renormalized.
const NORM_FLOOR: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuperKind {
    /// Rotate component i by input * weight * (i + 1).
    Rotation,
    /// Fixed mixing matrix: H[i][j] = 1/sqrt(2) when i == j or (i ^ j) == 1.
    Hadamard,
    /// Phase-shift component i by input * weight * i.
    Phase,
    /// Preserve amplitudes, shift every phase by input * weight.
    Interference,
}

impl SuperKind {
    pub fn label(self) -> &'static str {
        match self {
            SuperKind::Rotation => "ROT",
            SuperKind::Hadamard => "HAD",
            SuperKind::Phase => "PHASE",
            SuperKind::Interference => "INTF",
        }
    }
}

const KINDS: [SuperKind; 4] = [
    SuperKind::Rotation,
    SuperKind::Hadamard,
    SuperKind::Phase,
    SuperKind::Interference,
];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuperGate {
    pub kind: SuperKind,
    pub weight: f32,
    re: [f32; STATES],
    im: [f32; STATES],
}

impl SuperGate {
    pub fn new(kind: SuperKind, weight: f32) -> Self {
        let mut g = Self {
            kind,
            weight,
            re: [0.0; STATES],
            im: [0.0; STATES],
        };
        g.init_superposition();
        g
    }

    /// Uniform superposition with evenly spread phases.
    fn init_superposition(&mut self) {
        let inv = 1.0 / (STATES as f32).sqrt();
        for i in 0..STATES {
            let angle = 2.0 * core::f32::consts::PI * i as f32 / STATES as f32;
            self.re[i] = angle.cos() * inv;
            self.im[i] = angle.sin() * inv;
        }
    }

    fn renormalize(&mut self) {
        let norm = self.norm();
        if norm < NORM_FLOOR {
            self.init_superposition();
            return;
        }
        for i in 0..STATES {
            self.re[i] /= norm;
            self.im[i] /= norm;
        }
    }

    pub fn norm(&self) -> f32 {
        let mut sq = 0.0;
        for i in 0..STATES {
            sq += self.re[i] * self.re[i] + self.im[i] * self.im[i];
        }
        sq.sqrt()
    }

    /// Collapse the state to a scalar in [0, 1]: the probability-weighted
    /// index expectation over |psi_i|^2.
    pub fn measure(&self) -> f32 {
        let mut probs = [0.0f32; STATES];
        let mut total = 0.0;
        for i in 0..STATES {
            probs[i] = self.re[i] * self.re[i] + self.im[i] * self.im[i];
            total += probs[i];
        }
        if total <= 0.0 {
            return 0.0;
        }
        let mut expected = 0.0;
        for (i, p) in probs.iter().enumerate() {
            expected += i as f32 * p / total;
        }
        expected / (STATES - 1) as f32
    }

    #[cfg(test)]
    pub(crate) fn zero_state_for_test(&mut self) {
        self.re = [0.0; STATES];
        self.im = [0.0; STATES];
    }
}

/// Marker type for the superposition algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superposition;

impl Algebra for Superposition {
    type Value = f32;
    type Gate = SuperGate;

    const NAME: &'static str = "superposition";
    const HAS_MEMORY: bool = false;

    fn random_gate(rng: &mut Prng) -> SuperGate {
        SuperGate::new(
            KINDS[rng.gen_range_usize(0, KINDS.len())],
            rng.gen_range_f32(0.0, 2.0),
        )
    }

    fn set_random_kind(gate: &mut SuperGate, rng: &mut Prng) {
        gate.kind = KINDS[rng.gen_range_usize(0, KINDS.len())];
    }

    fn perturb_param(gate: &mut SuperGate, rng: &mut Prng) {
        gate.weight += rng.gen_range_f32(-1.0, 1.0);
    }

    fn redraw_memory(_gate: &mut SuperGate, _rng: &mut Prng) {}

    fn reset_memory(_gate: &mut SuperGate) {}

    fn begin_pass(gate: &mut SuperGate) {
        gate.init_superposition();
    }

    fn combine(_gate: &SuperGate, preds: &[f32]) -> f32 {
        preds.iter().sum()
    }

    fn eval(gate: &mut SuperGate, input: f32) -> f32 {
        let mut re = [0.0f32; STATES];
        let mut im = [0.0f32; STATES];

        match gate.kind {
            SuperKind::Rotation => {
                for i in 0..STATES {
                    let angle = input * gate.weight * (i + 1) as f32;
                    let (s, c) = angle.sin_cos();
                    re[i] = gate.re[i] * c - gate.im[i] * s;
                    im[i] = gate.re[i] * s + gate.im[i] * c;
                }
            }
            SuperKind::Hadamard => {
                let h = 1.0 / 2.0f32.sqrt();
                for i in 0..STATES {
                    for j in 0..STATES {
                        if i == j || (i ^ j) == 1 {
                            re[i] += h * gate.re[j];
                            im[i] += h * gate.im[j];
                        }
                    }
                }
            }
            SuperKind::Phase => {
                for i in 0..STATES {
                    let phase = input * gate.weight * i as f32;
                    let (s, c) = phase.sin_cos();
                    re[i] = gate.re[i] * c - gate.im[i] * s;
                    im[i] = gate.re[i] * s + gate.im[i] * c;
                }
            }
            SuperKind::Interference => {
                for i in 0..STATES {
                    let amp = (gate.re[i] * gate.re[i] + gate.im[i] * gate.im[i]).sqrt();
                    let phase = gate.im[i].atan2(gate.re[i]) + input * gate.weight;
                    re[i] = amp * phase.cos();
                    im[i] = amp * phase.sin();
                }
            }
        }

        gate.re = re;
        gate.im = im;
        gate.renormalize();
        gate.measure()
    }

    fn describe(gate: &SuperGate) -> String {
        format!("{}(w={:+.2})", gate.kind.label(), gate.weight)
    }
}
