//! Command-line entry point for the gate evolution benchmarks.
//!
//! Usage: gaia-gates [SUITE] [--seed N] [--generations N] [--gates N]
//!                   [--target NAME]
//!
//! SUITE is one of: binary, wired, ternary, quaternary, analog,
//! superposition, all (default: all).

use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use gaia_gates::bench::{suites, BenchConfig};
use gaia_gates::prng::Prng;

fn print_help() {
    println!("gaia-gates: evolve gate networks against fitness targets");
    println!();
    println!("Usage: gaia-gates [SUITE] [OPTIONS]");
    println!();
    println!("Suites:");
    println!("  binary        thresholded bit gates (default sweep N=1..8)");
    println!("  wired         explicitly wired two-input boolean gates");
    println!("  ternary       balanced ternary gates");
    println!("  quaternary    DNA-base gates");
    println!("  analog        continuous gates");
    println!("  superposition quantum-inspired gates");
    println!("  all           every suite in order (default)");
    println!();
    println!("Options:");
    println!("  --seed N         PRNG seed (default: wall clock)");
    println!("  --generations N  mutation budget per run (default: 20000)");
    println!("  --gates N        fix the network size instead of sweeping 1..8");
    println!("  --target NAME    focus on targets whose name contains NAME");
    println!("  --help           this text");
}

fn parse_args() -> Result<(String, BenchConfig), String> {
    let mut suite = String::from("all");
    let mut cfg = BenchConfig::default();
    cfg.seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64 ^ d.as_secs())
        .unwrap_or(1);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--seed" => {
                let v = args.next().ok_or("--seed needs a value")?;
                cfg.seed = v.parse().map_err(|_| format!("bad seed: {v}"))?;
            }
            "--generations" => {
                let v = args.next().ok_or("--generations needs a value")?;
                cfg.generations = v.parse().map_err(|_| format!("bad generation count: {v}"))?;
            }
            "--gates" => {
                let v = args.next().ok_or("--gates needs a value")?;
                let n: usize = v.parse().map_err(|_| format!("bad gate count: {v}"))?;
                if n == 0 || n > 64 {
                    return Err(format!("gate count must be in 1..=64, got {n}"));
                }
                cfg.gates = Some(n);
            }
            "--target" => {
                cfg.target = Some(args.next().ok_or("--target needs a value")?);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                suite = other.to_string();
            }
        }
    }
    Ok((suite, cfg))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let (suite, cfg) = match parse_args() {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("try --help");
            process::exit(2);
        }
    };

    let registry = suites();
    let Some(run) = registry.get(suite.as_str()) else {
        eprintln!("error: unknown suite {suite:?}");
        eprintln!("try --help");
        process::exit(2);
    };

    println!("Seed: {}", cfg.seed);
    let mut rng = Prng::new(cfg.seed);
    run(&cfg, &mut rng)?;
    Ok(())
}
