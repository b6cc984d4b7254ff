//! Continuous gate algebra: V is real, typically squashed into [0, 1] or
//! [-1, 1] by sigmoid/tanh kinds. Every gate carries a weight and a bias;
//! the memory kind is a leaky integrator. Predecessor values combine by
//! averaging, which keeps magnitudes bounded as fan-in grows.

use core::f32::consts::PI;

use crate::algebra::Algebra;
use crate::prng::Prng;

pub const WEIGHT_BOUND: f32 = 2.0;
pub const BIAS_BOUND: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalogKind {
    /// weight * x + bias
    Identity,
    /// 2 * weight * x + bias
    Amplify,
    /// sigmoid(weight * x + bias)
    Sigmoid,
    /// Step on weight * x + bias > 0.5
    Threshold,
    /// Leaky integrator: m <- 0.9 m + 0.1 x, then weight * m + bias.
    Memory,
    /// tanh(weight * x + bias)
    Tanh,
    /// sin(pi * weight * x + bias)
    Sine,
}

impl AnalogKind {
    pub fn label(self) -> &'static str {
        match self {
            AnalogKind::Identity => "ID",
            AnalogKind::Amplify => "AMP",
            AnalogKind::Sigmoid => "SIG",
            AnalogKind::Threshold => "THRESH",
            AnalogKind::Memory => "MEM",
            AnalogKind::Tanh => "TANH",
            AnalogKind::Sine => "SINE",
        }
    }
}

const KINDS: [AnalogKind; 7] = [
    AnalogKind::Identity,
    AnalogKind::Amplify,
    AnalogKind::Sigmoid,
    AnalogKind::Threshold,
    AnalogKind::Memory,
    AnalogKind::Tanh,
    AnalogKind::Sine,
];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalogGate {
    pub kind: AnalogKind,
    pub weight: f32,
    pub bias: f32,
    memory: f32,
}

impl AnalogGate {
    pub fn new(kind: AnalogKind, weight: f32, bias: f32) -> Self {
        Self {
            kind,
            weight,
            bias,
            memory: 0.0,
        }
    }

    pub fn memory(&self) -> f32 {
        self.memory
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Marker type for the analog algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analog;

impl Algebra for Analog {
    type Value = f32;
    type Gate = AnalogGate;

    const NAME: &'static str = "analog";
    const HAS_MEMORY: bool = true;

    fn random_gate(rng: &mut Prng) -> AnalogGate {
        AnalogGate::new(
            KINDS[rng.gen_range_usize(0, KINDS.len())],
            rng.gen_range_f32(-1.0, 1.0),
            rng.gen_range_f32(-0.5, 0.5),
        )
    }

    fn set_random_kind(gate: &mut AnalogGate, rng: &mut Prng) {
        gate.kind = KINDS[rng.gen_range_usize(0, KINDS.len())];
    }

    fn perturb_param(gate: &mut AnalogGate, rng: &mut Prng) {
        if rng.next_bool() {
            gate.weight =
                (gate.weight + rng.gen_range_f32(-0.25, 0.25)).clamp(-WEIGHT_BOUND, WEIGHT_BOUND);
        } else {
            gate.bias = (gate.bias + rng.gen_range_f32(-0.1, 0.1)).clamp(-BIAS_BOUND, BIAS_BOUND);
        }
    }

    fn redraw_memory(gate: &mut AnalogGate, _rng: &mut Prng) {
        // The integrator always restarts from rest.
        gate.memory = 0.0;
    }

    fn reset_memory(gate: &mut AnalogGate) {
        gate.memory = 0.0;
    }

    fn combine(_gate: &AnalogGate, preds: &[f32]) -> f32 {
        if preds.is_empty() {
            return 0.0;
        }
        preds.iter().sum::<f32>() / preds.len() as f32
    }

    fn eval(gate: &mut AnalogGate, input: f32) -> f32 {
        match gate.kind {
            AnalogKind::Identity => gate.weight * input + gate.bias,
            AnalogKind::Amplify => 2.0 * gate.weight * input + gate.bias,
            AnalogKind::Sigmoid => sigmoid(gate.weight * input + gate.bias),
            AnalogKind::Threshold => {
                if gate.weight * input + gate.bias > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            AnalogKind::Memory => {
                gate.memory = gate.memory * 0.9 + input * 0.1;
                gate.weight * gate.memory + gate.bias
            }
            AnalogKind::Tanh => (gate.weight * input + gate.bias).tanh(),
            AnalogKind::Sine => (PI * gate.weight * input + gate.bias).sin(),
        }
    }

    fn describe(gate: &AnalogGate) -> String {
        format!(
            "{}(w={:+.2},b={:+.2})",
            gate.kind.label(),
            gate.weight,
            gate.bias
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_a_step() {
        let mut g = AnalogGate::new(AnalogKind::Threshold, 1.0, 0.0);
        assert_eq!(Analog::eval(&mut g, 0.4), 0.0);
        assert_eq!(Analog::eval(&mut g, 0.6), 1.0);
    }

    #[test]
    fn sigmoid_squashes_into_unit_interval() {
        let mut g = AnalogGate::new(AnalogKind::Sigmoid, 2.0, 0.0);
        for x in [-10.0, -1.0, 0.0, 1.0, 10.0] {
            let y = Analog::eval(&mut g, x);
            assert!((0.0..=1.0).contains(&y));
        }
        assert!(Analog::eval(&mut g, 5.0) > Analog::eval(&mut g, -5.0));
    }

    #[test]
    fn memory_is_a_leaky_integrator() {
        let mut g = AnalogGate::new(AnalogKind::Memory, 1.0, 0.0);
        // Repeated ones converge toward weight * 1.0.
        for _ in 0..200 {
            Analog::eval(&mut g, 1.0);
        }
        assert!((g.memory() - 1.0).abs() < 1e-3);
        Analog::reset_memory(&mut g);
        assert_eq!(g.memory(), 0.0);
    }

    #[test]
    fn perturbation_respects_bounds() {
        let mut rng = Prng::new(5);
        let mut g = AnalogGate::new(AnalogKind::Identity, 1.9, 0.9);
        for _ in 0..500 {
            Analog::perturb_param(&mut g, &mut rng);
            assert!(g.weight.abs() <= WEIGHT_BOUND);
            assert!(g.bias.abs() <= BIAS_BOUND);
        }
    }

    #[test]
    fn combine_averages() {
        let g = AnalogGate::new(AnalogKind::Identity, 1.0, 0.0);
        assert_eq!(Analog::combine(&g, &[1.0, 0.0]), 0.5);
        assert_eq!(Analog::combine(&g, &[]), 0.0);
    }
}
