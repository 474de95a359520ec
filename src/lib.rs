//! gf-push: track font families through the Google Fonts release pipeline
//!
//! Push items are canonicalised repository paths grouped by category. They
//! are read from and written to plain-text manifests (`to_sandbox.txt`,
//! `to_production.txt`) and synced with the "traffic jam" project board.

pub mod cli;
pub mod core;
pub mod logging;
