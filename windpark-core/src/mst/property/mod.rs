//! Property-based tests for the Kruskal spanning topology.
//!
//! Checks the engine against an independent Prim oracle and validates the
//! structural invariants of every result: acyclicity, `|V| - c` edges and
//! the admission threshold.

mod oracle;
mod strategies;
mod structural;
mod types;
