//! filtrapx - extract and filter person records from messy text exports.
//!
//! The library holds the extraction engine ([`pipeline::Engine`]) and the
//! pieces around it: input loading, configuration, filtering and report
//! rendering. The `filtrapx` binary wires them to the command line.

pub mod age;
pub mod cli;
pub mod config;
pub mod extract;
pub mod files;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod record;

pub use config::Config;
pub use extract::{detect_and_extract, ExtractContext, Format};
pub use files::{Document, InputSpec, SourceError};
pub use filter::{FilterCriteria, NameMode};
pub use normalize::Normalizer;
pub use output::OutputFormat;
pub use pipeline::{BatchOutcome, Engine};
pub use record::{Gender, Record};
