use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gaia_gates::binary::Binary;
use gaia_gates::climb::hill_climb;
use gaia_gates::network::Network;
use gaia_gates::prng::Prng;
use gaia_gates::superpos::Superposition;
use gaia_gates::targets::{binary_targets, ternary_targets};
use gaia_gates::ternary::Ternary;

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");

    for n in [4usize, 8, 16] {
        let mut rng = Prng::new(1);
        let mut net = Network::<Binary>::random(n, 2, 1, &mut rng);
        group.bench_with_input(BenchmarkId::new("binary_xor_rows", n), &n, |b, _| {
            b.iter(|| {
                let mut acc = 0u32;
                for a in 0..2u8 {
                    for bit in 0..2u8 {
                        net.reset_memory();
                        acc += net.forward(black_box(&[a, bit])).unwrap() as u32;
                    }
                }
                acc
            })
        });
    }

    let mut rng = Prng::new(2);
    let mut net = Network::<Superposition>::random(8, 2, 1, &mut rng);
    group.bench_function("superposition", |b| {
        b.iter(|| net.forward(black_box(&[0.3, 0.7])).unwrap())
    });

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let consensus = ternary_targets()
        .into_iter()
        .find(|t| t.name == "Consensus")
        .unwrap();
    let mut rng = Prng::new(3);
    let mut net = Network::<Ternary>::random(6, consensus.inputs, consensus.outputs, &mut rng);
    group.bench_function("ternary_consensus", |b| {
        b.iter(|| (consensus.score)(black_box(&mut net)).unwrap())
    });

    group.finish();
}

fn bench_climb(c: &mut Criterion) {
    let xor = binary_targets()
        .into_iter()
        .find(|t| t.name == "XOR")
        .unwrap();
    c.bench_function("climb_binary_xor_500_gens", |b| {
        b.iter(|| {
            let mut rng = Prng::new(black_box(4));
            let net = Network::<Binary>::random(8, xor.inputs, xor.outputs, &mut rng);
            hill_climb(net, xor.max_score, 500, &mut rng, xor.score, |_, _| {})
                .unwrap()
                .best_score
        })
    });
}

criterion_group!(benches, bench_forward, bench_scoring, bench_climb);
criterion_main!(benches);
