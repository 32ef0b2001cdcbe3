// handlers/mod.rs - 2-Tier Handler Architecture
//
// Public (bootstrap, credential present but unverified) → Protected (verified)

pub mod protected;
pub mod public;
