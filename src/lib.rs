//! Flowscript - numbered flow statements and the `apply` combinator
//!
//! A flow script is a header line followed by newline-terminated
//! statements, each a directed edge between two numbered steps:
//!
//! ```text
//! flowchart
//! a0 --x--> b0:y
//! ```
//!
//! Scripts parse into a [`Flowchart`], reduce to a list of
//! [`CompactEdge`]s, and two scripts combine with [`apply`], which repeats
//! both edge lists, shifting every step index by one per round.
//!
//! # Example
//!
//! ```rust
//! use flowscript::{compact, parse};
//!
//! let chart = parse("flowchart\nload0 --read--> store0:done\n").unwrap();
//! let edges = compact(&chart);
//! assert_eq!(edges[0].to_string(), "load0 -> store0");
//! ```

pub mod compact;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod output;
pub mod parser;

pub use compact::{compact, increment, CompactEdge, CompactStep};
pub use config::{Config, ConfigError, OutputFormat};
pub use error::{ParseError, Position};
pub use interpreter::{apply, ApplyError, Interpreter, Script};
pub use output::render_edges;
pub use parser::{parse, Flowchart, FlowStatement, FlowStatements, FlowStep};
