//! Benchmark universe and peer-scope resolution.
//!
//! A security's percentile ranks are only meaningful relative to a
//! comparison group. This module owns the two scopes the engine supports:
//! the whole universe, and the constituents of the subject's assigned
//! benchmark. Scope selection is an injected strategy so every metric of a
//! security ranks against the same peer set.

pub mod benchmark;
pub mod scope;

pub use benchmark::BenchmarkWeights;
pub use scope::{BenchmarkScope, PeerScope, PeerSet, ScopeMode, UniverseScope};
