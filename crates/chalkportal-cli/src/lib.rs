//! # Chalkportal CLI
//!
//! Helpers behind the `chalkportal-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use chalkportal_cli::seeder::{seed_classrooms, SeedConfig};
//!
//! let summary = seed_classrooms(&state.store, SeedConfig::new(3)).await?;
//! println!("{} classes, {} students", summary.classes, summary.students);
//! ```

pub mod args;
pub mod seeder;
