//! # Campus seeder
//!
//! Fills a Firebase project with synthetic data for the campus ride-sharing
//! and errand app, for manual testing and demos:
//!
//! - 20 **users** (students and the odd admin, each in a hostel)
//! - 10 active **rides** departing within the 24 hours starting tomorrow
//! - 5 open, urgent errand **requests**
//!
//! The seeder signs in as an end user (see [`auth`]), so Firestore security
//! rules apply to its writes exactly as they would to the app's. Records are
//! generated by [`seed`] and written through [`firestore`].
//!
//! Runs are not idempotent: every run adds new documents.

pub mod auth;
pub mod config;
pub mod error;
pub mod firestore;
pub mod seed;
pub mod seeder;
mod utils;

pub use config::SeederConfig;
pub use seeder::{run, seed_database, SeedSummary};
