//! # tinydash core
//!
//! The two stages of a run:
//!
//! * **[`discovery`]**: probe a range with nmap and classify what answered.
//! * **[`emitter`]**: turn the classified hosts into compose and dashboard files.
//!
//! The [`scanner`] module holds the nmap adapter and its report reader.

pub mod discovery;
pub mod emitter;
pub mod scanner;
