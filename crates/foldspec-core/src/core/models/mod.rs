pub mod job;
pub mod ligand;
pub mod sequence;
