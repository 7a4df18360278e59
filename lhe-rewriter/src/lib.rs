//! LHE Rewriter Library
//!
//! A small, reusable library that rewrites the generator weight (XWGTUP) of
//! every event in a Les Houches event file with the first weight listed in
//! that event's `<weights>` / `<rwgt>` block.
//!
//! # Architecture
//!
//! The library is a single streaming pass:
//! - Lines outside `<event>` records are copied through unchanged
//! - Each event record is buffered until its `</event>` line
//! - The first value inside the weights block is captured, either bare or
//!   wrapped in a `<wgt ...>` tag
//! - Field 2 of the event header line is replaced and the record is written
//!
//! Malformed records abort the run with a [`FormatError`] naming the event.
//!
//! The library does NOT:
//! - Parse command-line arguments
//! - Set up logging
//! - Print per-event diagnostics (it reports them through a callback)
//!
//! All of that lives in the application layer (lhe-rewriter-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use lhe_rewriter::{derive_output_path, rewrite_file, OutputNaming, RewriterConfig};
//! use std::path::Path;
//!
//! let input = Path::new("pwgevents.lhe");
//! let output = derive_output_path(input, &OutputNaming::default()).unwrap();
//!
//! let stats = rewrite_file(input, &output, RewriterConfig::new(), |replacement| {
//!     println!("{}", replacement);
//! })
//! .unwrap();
//!
//! println!("Rewrote {} events", stats.events);
//! ```

// Public modules
pub mod config;
pub mod markup;
pub mod output_path;
pub mod rewriter;
pub mod types;

// Re-export main types for convenience
pub use config::{OutputNaming, RewriterConfig};
pub use output_path::derive_output_path;
pub use rewriter::{rewrite_file, rewrite_stream, EventRewriter};
pub use types::{FormatError, Replacement, Result, RewriteError, RewriteStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
