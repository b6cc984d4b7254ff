//! Greedy hill climbing over mutable candidates.
//!
//! One mutation per generation, scored against a fitness function. A
//! proposal is kept when its score is at least the current score; plateaus
//! are walkable, only strict regressions are reverted. The climber tracks
//! the best candidate seen and stops early once the maximum score is
//! reached.

use tracing::debug;

use crate::algebra::Algebra;
use crate::network::{Network, Undo};
use crate::prng::Prng;
use crate::wired::{WiredNetwork, WiredUndo};

/// Anything the climber can mutate in place and roll back.
pub trait Candidate: Clone {
    type Undo;

    fn propose(&mut self, rng: &mut Prng) -> Self::Undo;
    fn revert(&mut self, undo: Self::Undo);
}

impl<A: Algebra> Candidate for Network<A> {
    type Undo = Undo<A>;

    fn propose(&mut self, rng: &mut Prng) -> Undo<A> {
        self.mutate(rng)
    }

    fn revert(&mut self, undo: Undo<A>) {
        Network::revert(self, undo);
    }
}

impl Candidate for WiredNetwork {
    type Undo = WiredUndo;

    fn propose(&mut self, rng: &mut Prng) -> WiredUndo {
        self.mutate(rng)
    }

    fn revert(&mut self, undo: WiredUndo) {
        WiredNetwork::revert(self, undo);
    }
}

pub struct Outcome<C> {
    pub best: C,
    pub best_score: f32,
    pub solved: bool,
    /// Generation at which the maximum score was first reached.
    pub solved_at: Option<u32>,
}

/// Scores compare with a small tolerance so float fitness sums do not miss
/// the solved threshold by rounding noise.
const SCORE_EPS: f32 = 1e-6;

/// Run the climber for up to `generations` proposals.
///
/// `score` evaluates the candidate's fitness; errors abort the climb.
/// `on_improve` fires whenever the best score strictly increases, with the
/// generation number and the new best score.
pub fn hill_climb<C, E>(
    mut candidate: C,
    max_score: f32,
    generations: u32,
    rng: &mut Prng,
    mut score: impl FnMut(&mut C) -> Result<f32, E>,
    mut on_improve: impl FnMut(u32, f32),
) -> Result<Outcome<C>, E>
where
    C: Candidate,
{
    let mut current = score(&mut candidate)?;
    let mut best = candidate.clone();
    let mut best_score = current;
    let mut solved_at = if best_score >= max_score - SCORE_EPS {
        Some(0)
    } else {
        None
    };

    if solved_at.is_none() {
        for gen in 1..=generations {
            let undo = candidate.propose(rng);
            let proposed = score(&mut candidate)?;
            if proposed < current {
                candidate.revert(undo);
                continue;
            }
            current = proposed;
            if current > best_score {
                best_score = current;
                best = candidate.clone();
                debug!(gen, score = best_score, "fitness improved");
                on_improve(gen, best_score);
            }
            if best_score >= max_score - SCORE_EPS {
                solved_at = Some(gen);
                break;
            }
        }
    }

    Ok(Outcome {
        best,
        best_score,
        solved: solved_at.is_some(),
        solved_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor_score(net: &mut WiredNetwork) -> Result<f32, core::convert::Infallible> {
        let mut hits = 0;
        for a in 0..2u8 {
            for b in 0..2u8 {
                if net.forward(a, b) == a ^ b {
                    hits += 1;
                }
            }
        }
        Ok(hits as f32)
    }

    #[test]
    fn climbs_to_a_single_gate_xor() {
        // A one-gate wired network is forced to read A and B, so the only
        // thing evolution has to find is the XOR kind. Any seed works.
        let mut rng = Prng::new(3);
        let net = WiredNetwork::random(1, &mut rng);
        let out = hill_climb(net, 4.0, 10_000, &mut rng, xor_score, |_, _| {}).unwrap();
        assert!(out.solved);
        assert_eq!(out.best_score, 4.0);
        assert!(out.best.describe().contains("XOR(A,B)"));
    }

    #[test]
    fn already_solved_candidates_stop_at_generation_zero() {
        let mut rng = Prng::new(4);
        loop {
            let net = WiredNetwork::random(1, &mut rng);
            let mut probe = net.clone();
            if xor_score(&mut probe).unwrap() == 4.0 {
                let out = hill_climb(net, 4.0, 100, &mut rng, xor_score, |_, _| {
                    panic!("no improvement expected")
                })
                .unwrap();
                assert_eq!(out.solved_at, Some(0));
                break;
            }
        }
    }

    #[test]
    fn improvement_callback_sees_increasing_scores() {
        let mut rng = Prng::new(5);
        let net = WiredNetwork::random(3, &mut rng);
        let mut last = f32::MIN;
        let out = hill_climb(net, 4.0, 20_000, &mut rng, xor_score, |_, score| {
            assert!(score > last);
            last = score;
        })
        .unwrap();
        assert!(out.best_score >= 0.0);
    }
}
