//! branchbound core - types and traits shared by every branchbound crate
//!
//! This crate provides the fundamental abstractions of the search engine:
//! - [`Sense`] for direction-aware comparison of bounds and values
//! - [`Problem`], the contract every optimization problem implements
//! - [`Node`] and [`Restrictions`], the structurally shared search-tree nodes
//! - [`Relaxation`] and [`OracleStatus`] for results of the bound oracle

pub mod error;
pub mod node;
pub mod problem;
pub mod relaxation;
pub mod restriction;
pub mod sense;

pub use error::{BranchError, OracleError};
pub use node::Node;
pub use problem::Problem;
pub use relaxation::{Candidate, OracleStatus, Relaxation};
pub use restriction::Restrictions;
pub use sense::Sense;
