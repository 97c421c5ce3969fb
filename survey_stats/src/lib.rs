//! Statistics over fixed-schema survey exports.
//!
//! Responses are parsed into [`Record`]s grouped in a [`Collection`], pruned
//! of incomplete or careless answers with [`prune`], and then queried for the
//! share of respondents giving each answer.
//!
//! ```
//! use std::sync::Arc;
//! use survey_stats::*;
//!
//! let schema = Arc::new(Schema::new(&["id", "q1"]));
//! let options = ReadOptions { metadata_lines: 0, ..ReadOptions::default() };
//! let responses = parse_survey("a\t1,2\nb\t2\nc\t\n", schema, &options)?;
//! assert_eq!(responses.percentage("q1", "2")?, 100.0);
//! assert_eq!(responses.count("q1", "")?, 1);
//! # Ok::<(), SurveyError>(())
//! ```

mod collection;
mod errors;
mod prune;
mod record;
mod store;

pub mod names;
pub mod similarity;

pub use crate::collection::*;
pub use crate::errors::*;
pub use crate::prune::*;
pub use crate::record::*;
pub use crate::store::*;
