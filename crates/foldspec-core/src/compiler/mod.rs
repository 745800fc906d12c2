pub mod config;
pub mod error;
pub mod ledger;
pub mod ligand;
pub mod loader;
pub mod materialize;
pub mod naming;
pub mod ptm;
