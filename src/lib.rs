//! # jdlink-check
//!
//! Checks that javadoc links still resolve against a set of Java source jars.
//!
//! ## Architecture
//!
//! - **generics**: Strips `<...>` type parameters from links and source lines
//! - **link**: Dump records and link decomposition into package / class / member
//! - **archive**: Source jar access and package / class file lookup
//! - **matcher**: Line-scan heuristic that locates field and method declarations
//! - **dump**: Javadoc dump file parsing
//! - **report**: Text and JSON reporting of unresolved links
//! - **resolve**: Per-record resolution and the full run
//! - **cli** / **config**: Command line and run configuration
//! - **error**: Configuration, archive and dump error types

pub mod archive;
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod generics;
pub mod link;
pub mod matcher;
pub mod report;
pub mod resolve;
