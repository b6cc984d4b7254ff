//! Benchmark harness: evolve every target of a suite across a range of
//! network sizes and print a SOLVED/FAILED report per size.
//!
//! Two modes. The default matrix mode sweeps gate counts and prints one
//! line per target. Focused mode (a target filter is set) runs the matching
//! targets only and narrates the climb: every improvement, the final
//! wiring, and a closing verdict.

use hashbrown::HashMap;
use thiserror::Error;
use tracing::info;

use crate::algebra::Algebra;
use crate::analog::Analog;
use crate::binary::Binary;
use crate::climb::{hill_climb, Candidate, Outcome};
use crate::network::{EvalError, Network};
use crate::prng::Prng;
use crate::quaternary::Quaternary;
use crate::superpos::Superposition;
use crate::targets::{
    analog_targets, binary_targets, quaternary_targets, super_targets, ternary_targets,
    wired_targets, Target,
};
use crate::ternary::Ternary;
use crate::wired::WiredNetwork;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("no target matches filter {0:?}")]
    UnknownTarget(String),
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchConfig {
    pub seed: u64,
    pub generations: u32,
    /// Run a single network size instead of the 1..=8 sweep.
    pub gates: Option<usize>,
    /// Case-insensitive substring filter; enables focused mode.
    pub target: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            generations: 20_000,
            gates: None,
            target: None,
        }
    }
}

/// One (suite, target, size) result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport {
    pub suite: &'static str,
    pub target: String,
    pub gates: usize,
    pub score: f32,
    pub max_score: f32,
    pub solved: bool,
    pub solved_at: Option<u32>,
}

pub type SuiteFn = fn(&BenchConfig, &mut Prng) -> Result<Vec<RunReport>, BenchError>;

/// Name -> runner registry used by the CLI.
pub fn suites() -> HashMap<&'static str, SuiteFn> {
    let mut map: HashMap<&'static str, SuiteFn> = HashMap::new();
    map.insert("binary", run_binary);
    map.insert("wired", run_wired);
    map.insert("ternary", run_ternary);
    map.insert("quaternary", run_quaternary);
    map.insert("analog", run_analog);
    map.insert("superposition", run_super);
    map.insert("all", run_all);
    map
}

/// Candidates the harness can spawn at a given size and pretty-print.
trait Evolvable: Candidate {
    fn spawn(n: usize, inputs: usize, outputs: usize, rng: &mut Prng) -> Self;
    fn describe(&self) -> String;
    fn brief(&self) -> String;
}

impl<A: Algebra> Evolvable for Network<A> {
    fn spawn(n: usize, inputs: usize, outputs: usize, rng: &mut Prng) -> Self {
        Network::random(n, inputs, outputs, rng)
    }

    fn describe(&self) -> String {
        Network::describe(self)
    }

    fn brief(&self) -> String {
        Network::brief(self)
    }
}

impl Evolvable for WiredNetwork {
    fn spawn(n: usize, _inputs: usize, _outputs: usize, rng: &mut Prng) -> Self {
        WiredNetwork::random(n, rng)
    }

    fn describe(&self) -> String {
        WiredNetwork::describe(self)
    }

    fn brief(&self) -> String {
        self.describe()
            .lines()
            .map(|line| line.split(": ").nth(1).unwrap_or(line))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn fmt_score(x: f32) -> String {
    if x.fract().abs() < 1e-6 {
        format!("{}", x as i64)
    } else {
        format!("{x:.1}")
    }
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => name.to_lowercase().contains(&f.to_lowercase()),
    }
}

fn sizes(cfg: &BenchConfig) -> std::ops::RangeInclusive<usize> {
    match cfg.gates {
        Some(n) => n..=n,
        None => 1..=8,
    }
}

fn climb_target<C: Evolvable>(
    target: &Target<C>,
    n: usize,
    cfg: &BenchConfig,
    rng: &mut Prng,
    focused: bool,
) -> Result<Outcome<C>, BenchError> {
    let net = C::spawn(n, target.inputs, target.outputs, rng);
    let max = target.max_score;
    let out = hill_climb(net, max, cfg.generations, rng, target.score, |gen, score| {
        if focused {
            println!("Generation {gen}: Score {}/{}", fmt_score(score), fmt_score(max));
        }
    })?;
    Ok(out)
}

fn report<C>(suite: &'static str, target: &Target<C>, n: usize, out: &Outcome<C>) -> RunReport {
    RunReport {
        suite,
        target: target.name.to_string(),
        gates: n,
        score: out.best_score,
        max_score: target.max_score,
        solved: out.solved,
        solved_at: out.solved_at,
    }
}

/// Matrix sweep of every matching target across the configured sizes.
fn sweep<C: Evolvable>(
    suite: &'static str,
    targets: &[Target<C>],
    cfg: &BenchConfig,
    rng: &mut Prng,
) -> Result<Vec<RunReport>, BenchError> {
    let filter = cfg.target.as_deref();
    let focused = filter.is_some();
    let mut reports = Vec::new();

    for n in sizes(cfg) {
        let runnable: Vec<&Target<C>> = targets
            .iter()
            .filter(|t| matches_filter(t.name, filter) && n >= t.outputs)
            .collect();
        if runnable.is_empty() {
            continue;
        }

        println!();
        println!("=== {suite} suite, N={n} ===");
        for target in runnable {
            let out = climb_target(target, n, cfg, rng, focused)?;
            let status = if out.solved { "SOLVED" } else { "FAILED" };
            println!(
                "  {}: {} ({}/{})",
                target.name,
                status,
                fmt_score(out.best_score),
                fmt_score(target.max_score)
            );
            if out.solved && n <= 3 {
                println!("    {}", out.best.brief());
            }
            if focused {
                if out.solved {
                    println!("Solved {}!", target.name);
                } else if let Some(note) = target.fail_note {
                    println!("Note: {n} {note}");
                }
                println!("{}", out.best.describe());
            } else if !out.solved {
                if let Some(note) = target.fail_note {
                    println!("    Note: {n} {note}");
                }
            }
            info!(
                suite,
                target = target.name,
                gates = n,
                score = out.best_score,
                solved = out.solved,
                "run complete"
            );
            reports.push(report(suite, target, n, &out));
        }
    }

    if focused && reports.is_empty() {
        return Err(BenchError::UnknownTarget(
            cfg.target.clone().unwrap_or_default(),
        ));
    }
    Ok(reports)
}

pub fn run_binary(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let reports = sweep("binary", &binary_targets(), cfg, rng)?;
    if cfg.target.is_none() {
        println!();
        println!("Insight: thresholded sums give OR for free; XOR and addition only");
        println!("emerge once NOT gates compose into NOR logic.");
    }
    Ok(reports)
}

pub fn run_wired(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let reports = sweep("wired", &wired_targets(), cfg, rng)?;
    if cfg.target.is_none() {
        println!();
        println!("Insight: with explicit wiring a single gate already expresses XOR(A,B).");
    }
    Ok(reports)
}

pub fn run_ternary(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let reports = sweep("ternary", &ternary_targets(), cfg, rng)?;
    if cfg.target.is_none() {
        println!();
        println!("Insight: balanced ternary sums vote; consensus is the hard target");
        println!("because sign compression discards disagreement early.");
    }
    Ok(reports)
}

pub fn run_quaternary(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let reports = sweep("quaternary", &quaternary_targets(), cfg, rng)?;
    if cfg.target.is_none() {
        println!();
        println!("Insight: complement is a one-gate task; binding and transcription need");
        println!("memory bases tuned by evolution.");
    }
    Ok(reports)
}

/// Gate count for the analog parity showcase.
const ANALOG_PARITY_GATES: usize = 16;

pub fn run_analog(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let targets = analog_targets();
    let (xor, parity): (Vec<_>, Vec<_>) = targets
        .into_iter()
        .partition(|t| t.name == "Analog XOR");

    let mut reports = sweep("analog", &xor, cfg, rng)?;

    // Parity runs once at a fixed larger size; the sweep sizes are too small
    // for a graded 16-row surface.
    for target in &parity {
        if !matches_filter(target.name, cfg.target.as_deref()) {
            continue;
        }
        let n = cfg.gates.unwrap_or(ANALOG_PARITY_GATES);
        println!();
        println!("=== analog suite, {} at N={n} ===", target.name);
        let out = climb_target(target, n, cfg, rng, cfg.target.is_some())?;
        let status = if out.solved { "SOLVED" } else { "FAILED" };
        println!(
            "  {}: {} ({}/{})",
            target.name,
            status,
            fmt_score(out.best_score),
            fmt_score(target.max_score)
        );
        println!("{}", out.best.describe());
        reports.push(report("analog", target, n, &out));
    }

    if cfg.target.is_some() && reports.is_empty() {
        return Err(BenchError::UnknownTarget(
            cfg.target.clone().unwrap_or_default(),
        ));
    }
    if cfg.target.is_none() {
        println!();
        println!("Insight: a sine gate over the averaged inputs solves XOR in three");
        println!("gates; graded parity rewards partial credit all the way up.");
    }
    Ok(reports)
}

pub fn run_super(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let reports = sweep("superposition", &super_targets(), cfg, rng)?;

    // Diagnostic only: visualize how the measured output varies over the
    // input plane for an evolved network at the largest size.
    if cfg.target.is_none() {
        let targets = super_targets();
        if let Some(target) = targets.first() {
            let n = cfg.gates.unwrap_or(8);
            let out = climb_target(target, n, cfg, rng, false)?;
            let mut net = out.best;
            println!();
            println!("Interference map (N={n}, output over the input plane):");
            print!("     ");
            for xi in 0..=10 {
                print!(" x={:.1}", xi as f32 / 10.0);
            }
            println!();
            for yi in 0..=10 {
                let y = yi as f32 / 10.0;
                print!("y={y:.1}");
                for xi in 0..=10 {
                    let x = xi as f32 / 10.0;
                    let v = net.forward(&[x, y])?;
                    print!(" {v:.3}");
                }
                println!();
            }
        }
    }
    Ok(reports)
}

pub fn run_all(cfg: &BenchConfig, rng: &mut Prng) -> Result<Vec<RunReport>, BenchError> {
    let mut reports = Vec::new();
    reports.extend(run_binary(cfg, rng)?);
    reports.extend(run_wired(cfg, rng)?);
    reports.extend(run_ternary(cfg, rng)?);
    reports.extend(run_quaternary(cfg, rng)?);
    reports.extend(run_analog(cfg, rng)?);
    reports.extend(run_super(cfg, rng)?);

    let solved = reports.iter().filter(|r| r.solved).count();
    println!();
    println!("Overall: {solved}/{} runs solved", reports.len());
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> BenchConfig {
        BenchConfig {
            seed: 1,
            generations: 50,
            gates: Some(2),
            target: None,
        }
    }

    #[test]
    fn wired_suite_produces_one_report_per_target() {
        let cfg = tiny_config();
        let mut rng = Prng::new(cfg.seed);
        let reports = run_wired(&cfg, &mut rng).unwrap();
        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|r| r.suite == "wired" && r.gates == 2));
    }

    #[test]
    fn size_sweep_skips_targets_that_need_more_outputs() {
        // 2-bit addition has three outputs and cannot run on two gates.
        let cfg = tiny_config();
        let mut rng = Prng::new(cfg.seed);
        let reports = run_binary(&cfg, &mut rng).unwrap();
        assert!(reports.iter().all(|r| r.target != "2-bit Addition"));
    }

    #[test]
    fn target_filter_is_case_insensitive_substring() {
        let cfg = BenchConfig {
            target: Some("xor".into()),
            ..tiny_config()
        };
        let mut rng = Prng::new(cfg.seed);
        let reports = run_wired(&cfg, &mut rng).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].target, "XOR");
    }

    #[test]
    fn unknown_target_is_an_error() {
        let cfg = BenchConfig {
            target: Some("no-such-task".into()),
            ..tiny_config()
        };
        let mut rng = Prng::new(cfg.seed);
        let err = run_wired(&cfg, &mut rng).unwrap_err();
        assert!(matches!(err, BenchError::UnknownTarget(_)));
    }

    #[test]
    fn registry_knows_every_suite() {
        let map = suites();
        for name in [
            "binary",
            "wired",
            "ternary",
            "quaternary",
            "analog",
            "superposition",
            "all",
        ] {
            assert!(map.contains_key(name), "missing suite {name}");
        }
    }
}
