//! The cleaning pipeline: a fixed sequence of togglable stages that turns a
//! raw row set into a cleaned copy plus a [`CleaningReport`].
//!
//! Stage order is part of the contract. Duplicates go first so later stages
//! never count the same row twice, filling runs before the empty-row sweep
//! so a fillable row survives, and normalization runs last on the final
//! row set.
//!
//! [`CleaningReport`]: crate::types::CleaningReport

mod executor;
mod stages;

pub use executor::CleaningPipeline;
