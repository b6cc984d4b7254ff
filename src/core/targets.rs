//! Fitness targets: named truth tables and stream tasks per algebra.
//!
//! Every scoring function restores gate memory before each independent
//! truth-table row (or before each test sequence for streamed tasks), so a
//! score depends only on the network's configuration and mutations can be
//! reverted without residue.

use crate::analog::Analog;
use crate::binary::Binary;
use crate::network::{EvalError, Network};
use crate::quaternary::{bind, complement, transcribe, Quaternary};
use crate::superpos::Superposition;
use crate::ternary::Ternary;
use crate::wired::WiredNetwork;

/// A named task for candidate `N`: arity, perfect score, and the scoring
/// function itself. `fail_note` is printed by the harness when the task is
/// known to be out of reach at small sizes.
pub struct Target<N> {
    pub name: &'static str,
    pub inputs: usize,
    pub outputs: usize,
    pub max_score: f32,
    pub score: fn(&mut N) -> Result<f32, EvalError>,
    pub fail_note: Option<&'static str>,
}

impl<N> Target<N> {
    const fn new(
        name: &'static str,
        inputs: usize,
        outputs: usize,
        max_score: f32,
        score: fn(&mut N) -> Result<f32, EvalError>,
    ) -> Self {
        Self {
            name,
            inputs,
            outputs,
            max_score,
            score,
            fail_note: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Binary

type BinNet = Network<Binary>;

fn score_bits(net: &mut BinNet, rows: &[(&[u8], u8)]) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for (inputs, want) in rows {
        net.reset_memory();
        if net.forward(inputs)? == *want {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

fn score_binary_xor(net: &mut BinNet) -> Result<f32, EvalError> {
    score_bits(
        net,
        &[(&[0, 0], 0), (&[0, 1], 1), (&[1, 0], 1), (&[1, 1], 0)],
    )
}

fn score_binary_and(net: &mut BinNet) -> Result<f32, EvalError> {
    score_bits(
        net,
        &[(&[0, 0], 0), (&[0, 1], 0), (&[1, 0], 0), (&[1, 1], 1)],
    )
}

fn score_binary_or(net: &mut BinNet) -> Result<f32, EvalError> {
    score_bits(
        net,
        &[(&[0, 0], 0), (&[0, 1], 1), (&[1, 0], 1), (&[1, 1], 1)],
    )
}

fn score_binary_not(net: &mut BinNet) -> Result<f32, EvalError> {
    score_bits(net, &[(&[0], 1), (&[1], 0)])
}

fn score_binary_parity3(net: &mut BinNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for bits in 0..8u8 {
        let row = [bits >> 2 & 1, bits >> 1 & 1, bits & 1];
        let want = row[0] ^ row[1] ^ row[2];
        net.reset_memory();
        if net.forward(&row)? == want {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

/// Full 2-bit addition: inputs a1 a0 b1 b0, outputs carry s1 s0. A row only
/// scores when all three output bits are right.
fn score_binary_add2(net: &mut BinNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in 0..4u8 {
        for b in 0..4u8 {
            let row = [a >> 1, a & 1, b >> 1, b & 1];
            let sum = a + b;
            let want = [sum >> 2 & 1, sum >> 1 & 1, sum & 1];
            net.reset_memory();
            let mut out = [0u8; 3];
            net.forward_multi(&row, &mut out)?;
            if out == want {
                hits += 1;
            }
        }
    }
    Ok(hits as f32)
}

/// Detect the pattern 101 in a bit stream: the output must be 1 at exactly
/// the timesteps where the last three bits read 101, and 0 everywhere else.
/// One point per fully correct sequence.
fn score_binary_seq101(net: &mut BinNet) -> Result<f32, EvalError> {
    const STREAMS: [[u8; 8]; 6] = [
        [1, 0, 1, 0, 0, 0, 0, 0],
        [0, 1, 0, 1, 0, 0, 0, 0],
        [1, 1, 0, 1, 1, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [1, 0, 1, 0, 1, 0, 1, 0],
        [1, 1, 1, 1, 1, 1, 1, 1],
    ];

    let mut hits = 0u32;
    for stream in &STREAMS {
        net.reset_memory();
        let mut correct = true;
        for (t, &bit) in stream.iter().enumerate() {
            let want =
                u8::from(t >= 2 && stream[t - 2] == 1 && stream[t - 1] == 0 && stream[t] == 1);
            if net.forward(&[bit])? != want {
                correct = false;
            }
        }
        if correct {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

pub fn binary_targets() -> Vec<Target<BinNet>> {
    vec![
        Target::new("XOR", 2, 1, 4.0, score_binary_xor),
        Target::new("AND", 2, 1, 4.0, score_binary_and),
        Target::new("OR", 2, 1, 4.0, score_binary_or),
        Target::new("NOT", 1, 1, 2.0, score_binary_not),
        Target::new("3-bit Parity", 3, 1, 8.0, score_binary_parity3),
        Target {
            fail_note: Some("gates insufficient for full 2-bit addition"),
            ..Target::new("2-bit Addition", 4, 3, 16.0, score_binary_add2)
        },
        Target::new("Sequence 101", 1, 1, 6.0, score_binary_seq101),
    ]
}

// ---------------------------------------------------------------------------
// Wired binary

fn score_wired_table(net: &mut WiredNetwork, table: fn(u8, u8) -> u8) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in 0..2u8 {
        for b in 0..2u8 {
            if net.forward(a, b) == table(a, b) {
                hits += 1;
            }
        }
    }
    Ok(hits as f32)
}

fn score_wired_and(net: &mut WiredNetwork) -> Result<f32, EvalError> {
    score_wired_table(net, |a, b| a & b)
}

fn score_wired_or(net: &mut WiredNetwork) -> Result<f32, EvalError> {
    score_wired_table(net, |a, b| a | b)
}

fn score_wired_xor(net: &mut WiredNetwork) -> Result<f32, EvalError> {
    score_wired_table(net, |a, b| a ^ b)
}

fn score_wired_not(net: &mut WiredNetwork) -> Result<f32, EvalError> {
    // Unary: B is held at 0.
    let mut hits = 0u32;
    for a in 0..2u8 {
        if net.forward(a, 0) == a ^ 1 {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

pub fn wired_targets() -> Vec<Target<WiredNetwork>> {
    vec![
        Target::new("AND", 2, 1, 4.0, score_wired_and),
        Target::new("OR", 2, 1, 4.0, score_wired_or),
        Target::new("XOR", 2, 1, 4.0, score_wired_xor),
        Target::new("NOT", 1, 1, 2.0, score_wired_not),
    ]
}

// ---------------------------------------------------------------------------
// Ternary

type TriNet = Network<Ternary>;

const TRITS: [i8; 3] = [-1, 0, 1];

fn score_trit_pairs(net: &mut TriNet, table: fn(i8, i8) -> i8) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in TRITS {
        for b in TRITS {
            net.reset_memory();
            if net.forward(&[a, b])? == table(a, b) {
                hits += 1;
            }
        }
    }
    Ok(hits as f32)
}

fn score_ternary_min(net: &mut TriNet) -> Result<f32, EvalError> {
    score_trit_pairs(net, |a, b| a.min(b))
}

fn score_ternary_max(net: &mut TriNet) -> Result<f32, EvalError> {
    score_trit_pairs(net, |a, b| a.max(b))
}

fn score_ternary_mul(net: &mut TriNet) -> Result<f32, EvalError> {
    score_trit_pairs(net, |a, b| a * b)
}

/// Majority vote: when at least two inputs agree the output is that value,
/// otherwise 0. The two-input network votes in two stages,
/// net(net(a, b), c), with memory persisting across the two calls so the
/// first stage can leave state for the second.
fn score_ternary_consensus(net: &mut TriNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in TRITS {
        for b in TRITS {
            for c in TRITS {
                let want = if a == b || a == c {
                    a
                } else if b == c {
                    b
                } else {
                    0
                };
                net.reset_memory();
                let ab = net.forward(&[a, b])?;
                if net.forward(&[ab, c])? == want {
                    hits += 1;
                }
            }
        }
    }
    Ok(hits as f32)
}

pub fn ternary_targets() -> Vec<Target<TriNet>> {
    vec![
        Target::new("MIN", 2, 1, 9.0, score_ternary_min),
        Target::new("MAX", 2, 1, 9.0, score_ternary_max),
        Target::new("MUL", 2, 1, 9.0, score_ternary_mul),
        Target::new("Consensus", 2, 1, 27.0, score_ternary_consensus),
    ]
}

// ---------------------------------------------------------------------------
// Quaternary

type QuatNet = Network<Quaternary>;

fn score_base_pairs(net: &mut QuatNet, table: fn(u8, u8) -> u8) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in 0..4u8 {
        for b in 0..4u8 {
            net.reset_memory();
            if net.forward(&[a, b])? == table(a, b) {
                hits += 1;
            }
        }
    }
    Ok(hits as f32)
}

fn score_quaternary_complement(net: &mut QuatNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for a in 0..4u8 {
        net.reset_memory();
        if net.forward(&[a, 0])? == complement(a) {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

fn score_quaternary_binding(net: &mut QuatNet) -> Result<f32, EvalError> {
    score_base_pairs(net, bind)
}

fn score_quaternary_transcription(net: &mut QuatNet) -> Result<f32, EvalError> {
    score_base_pairs(net, transcribe)
}

/// Recognize the motif ATGC: feed each base together with the running
/// result, expect a strong final value only for the exact motif.
fn score_quaternary_pattern(net: &mut QuatNet) -> Result<f32, EvalError> {
    const SEQUENCES: [([u8; 4], u8); 6] = [
        ([0, 1, 2, 3], 3), // ATGC
        ([0, 0, 0, 0], 0), // AAAA
        ([1, 1, 1, 1], 0), // TTTT
        ([2, 2, 2, 2], 0), // GGGG
        ([3, 3, 3, 3], 0), // CCCC
        ([0, 1, 2, 0], 1), // ATGA, near miss
    ];

    let mut hits = 0u32;
    for (seq, want) in &SEQUENCES {
        net.reset_memory();
        let mut result = 0u8;
        for &base in seq {
            result = net.forward(&[base, result])?;
        }
        if result == *want {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

pub fn quaternary_targets() -> Vec<Target<QuatNet>> {
    vec![
        Target::new("Complement", 2, 1, 4.0, score_quaternary_complement),
        Target::new("Binding", 2, 1, 16.0, score_quaternary_binding),
        Target::new("Transcription", 2, 1, 16.0, score_quaternary_transcription),
        Target::new("Pattern ATGC", 2, 1, 6.0, score_quaternary_pattern),
    ]
}

// ---------------------------------------------------------------------------
// Analog

type AnaNet = Network<Analog>;

const XOR_ROWS: [([f32; 2], f32); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

/// A row counts when the output lands within 0.3 of the target level.
fn score_analog_xor(net: &mut AnaNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for (row, want) in &XOR_ROWS {
        net.reset_memory();
        if (net.forward(row)? - want).abs() < 0.3 {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

/// Graded 4-bit parity: each row contributes 1 - |target - output|, so
/// partial credit guides the climb through the continuous space.
fn score_analog_parity4(net: &mut AnaNet) -> Result<f32, EvalError> {
    let mut score = 0.0f32;
    for bits in 0..16u8 {
        let row = [
            (bits >> 3 & 1) as f32,
            (bits >> 2 & 1) as f32,
            (bits >> 1 & 1) as f32,
            (bits & 1) as f32,
        ];
        let want = (bits.count_ones() % 2) as f32;
        net.reset_memory();
        let out = net.forward(&row)?;
        score += (1.0 - (want - out).abs()).max(0.0);
    }
    Ok(score)
}

pub fn analog_targets() -> Vec<Target<AnaNet>> {
    vec![
        Target::new("Analog XOR", 2, 1, 4.0, score_analog_xor),
        Target::new("4-bit Parity", 4, 1, 16.0, score_analog_parity4),
    ]
}

// ---------------------------------------------------------------------------
// Superposition

type SuperNet = Network<Superposition>;

/// The measured expectation is binarized at 0.5.
fn score_super_xor(net: &mut SuperNet) -> Result<f32, EvalError> {
    let mut hits = 0u32;
    for (row, want) in &XOR_ROWS {
        let out = net.forward(row)?;
        let bit = if out > 0.5 { 1.0 } else { 0.0 };
        if bit == *want {
            hits += 1;
        }
    }
    Ok(hits as f32)
}

pub fn super_targets() -> Vec<Target<SuperNet>> {
    vec![Target::new("XOR", 2, 1, 4.0, score_super_xor)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climb::hill_climb;
    use crate::prng::Prng;

    #[test]
    fn target_tables_are_complete() {
        assert_eq!(binary_targets().len(), 7);
        assert_eq!(wired_targets().len(), 4);
        assert_eq!(ternary_targets().len(), 4);
        assert_eq!(quaternary_targets().len(), 4);
        assert_eq!(analog_targets().len(), 2);
        assert_eq!(super_targets().len(), 1);
    }

    #[test]
    fn addition_rows_decode_correctly() {
        // 3 + 2 = 5 = 0b101.
        let a = 3u8;
        let b = 2u8;
        let sum = a + b;
        assert_eq!([sum >> 2 & 1, sum >> 1 & 1, sum & 1], [1, 0, 1]);
    }

    #[test]
    fn seq101_expectation_marks_completing_timesteps() {
        let stream = [1u8, 0, 1, 0, 1, 0, 1, 0];
        let mut marks = Vec::new();
        for t in 0..stream.len() {
            let want =
                u8::from(t >= 2 && stream[t - 2] == 1 && stream[t - 1] == 0 && stream[t] == 1);
            marks.push(want);
        }
        assert_eq!(marks, [0, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn consensus_expectation_is_majority() {
        let want = |a: i8, b: i8, c: i8| {
            if a == b || a == c {
                a
            } else if b == c {
                b
            } else {
                0
            }
        };
        assert_eq!(want(1, 1, -1), 1);
        assert_eq!(want(-1, -1, -1), -1);
        assert_eq!(want(1, -1, 1), 1);
        assert_eq!(want(0, 0, 1), 0);
        // All three distinct: no pair agrees.
        assert_eq!(want(1, 0, -1), 0);
    }

    #[test]
    fn evolves_binary_xor_at_eight_gates() {
        let target = binary_targets().into_iter().find(|t| t.name == "XOR").unwrap();
        let mut solved = false;
        for seed in 1..=5u64 {
            let mut rng = Prng::new(seed);
            let net = Network::<Binary>::random(8, target.inputs, target.outputs, &mut rng);
            let out =
                hill_climb(net, target.max_score, 20_000, &mut rng, target.score, |_, _| {})
                    .unwrap();
            if out.solved {
                solved = true;
                break;
            }
        }
        assert!(solved, "no seed in 1..=5 evolved XOR within 20000 generations");
    }

    #[test]
    fn evolves_quaternary_complement_with_one_gate() {
        // With one gate the task reduces to finding the COMP kind, which
        // scores a perfect 4 regardless of the gate's tunables.
        let target = quaternary_targets()
            .into_iter()
            .find(|t| t.name == "Complement")
            .unwrap();
        let mut rng = Prng::new(7);
        let net = Network::<Quaternary>::random(1, target.inputs, target.outputs, &mut rng);
        let out = hill_climb(net, target.max_score, 5_000, &mut rng, target.score, |_, _| {})
            .unwrap();
        assert!(out.solved);
    }
}
