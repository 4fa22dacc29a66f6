//! Shared building blocks for `sweepr`.
//!
//! Holds the value types every other crate agrees on: the [`candidate::Candidate`]
//! code, the [`keyspace::Keyspace`] generator, the validated scan
//! [`target::TargetId`] and [`target::UrlTemplate`], the run [`config::Config`]
//! and the error taxonomy.

pub mod candidate;
pub mod config;
pub mod error;
pub mod keyspace;
pub mod log;
pub mod target;

pub use candidate::Candidate;
pub use config::Config;
pub use error::SweepError;
pub use keyspace::Keyspace;
pub use target::{TargetId, UrlTemplate};
