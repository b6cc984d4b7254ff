//! Evolved gate networks.
//!
//! Tiny fixed-size networks of primitive gates are randomly mutated under a
//! greedy hill-climbing loop until they compute a toy target function (XOR,
//! parity, consensus, DNA-style operations, ...). Five gate algebras share
//! the scaffolding and differ only in value domain and primitive set.

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/algebra.rs"]
pub mod algebra;

#[path = "core/binary.rs"]
pub mod binary;

#[path = "core/ternary.rs"]
pub mod ternary;

#[path = "core/quaternary.rs"]
pub mod quaternary;

#[path = "core/analog.rs"]
pub mod analog;

#[path = "core/superpos.rs"]
pub mod superpos;

#[path = "core/network.rs"]
pub mod network;

#[path = "core/wired.rs"]
pub mod wired;

#[path = "core/climb.rs"]
pub mod climb;

#[path = "core/targets.rs"]
pub mod targets;

pub mod bench;
