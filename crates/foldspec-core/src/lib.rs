//! # Foldspec Core Library
//!
//! A compiler that turns molecular sequence files plus post-translational-modification
//! (PTM) and ligand directives into deterministic, collision-resistant job names,
//! structured job documents consumed by the downstream inference tool, and entries in
//! a shared append-only job ledger.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers, from stateless foundations up to the
//! user-facing entry point:
//!
//! - **[`core`]: The Foundation.** Stateless data models (sequence inputs, the job
//!   document, resolved ligands), raw file readers for sequence and small-molecule
//!   files, and the chain-identifier allocator.
//!
//! - **[`compiler`]: The Logic Core.** Directive parsing and resolution (PTMs and
//!   ligands), job-name synthesis, job materialization, and the ledger writer. All
//!   validation lives here; nothing touches the filesystem until a variant has fully
//!   validated.
//!
//! - **[`workflows`]: The Public API.** Ties the layers together: loads every input
//!   once, resolves directives once, and materializes one job document per produced
//!   variant. This is the entry point used by the CLI.

pub mod compiler;
pub mod core;
pub mod workflows;
