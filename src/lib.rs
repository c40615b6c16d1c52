//! Split a stylesheet into one file per `@media` condition.
//!
//! ```text
//! CSS text → parse → split into buckets → plan files → write concurrently
//! ```
//!
//! The unconditioned remainder is written as the primary file and also
//! returned to the caller as the residual stylesheet.

pub mod bucket;
pub mod config;
pub mod css;
pub mod emit;
pub mod logging;
pub mod writer;

pub use bucket::{split, Bucket, BucketKey, Buckets, Split};
pub use css::Stylesheet;
pub use emit::{EmitError, EmitOptions, EmitReport};
pub use writer::{MediaQueryWriter, Processed};
