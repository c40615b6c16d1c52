//! Shared test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SOURCE: &str = include_str!("../fixtures/source.css");

/// `SOURCE` with every media block removed.
pub const RESIDUAL: &str = ".a {\n    color: red;\n}\n\n.c {\n    color: green;\n}\n";

pub const RESULT_NONE: &str = "/*!mq|none*/.a{color:red;}.c{color:green;}";
pub const RESULT_600PX: &str = "/*!mq|(max-width: 600px)*/.b{color:blue;}.e{margin:0;}";
pub const RESULT_200PX: &str = "/*!mq|(max-width: 200px)*/.d{color:black;}";

/// `.a`, `.d` top-level; `(max-width:600px)` twice, `(min-width:1px)` once,
/// no whitespace between at-rule preludes and `{`.
pub const MINIFIED: &str = include_str!("../fixtures/minified.css");

pub fn read(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read '{}': {}", path.display(), e))
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn out_dir(root: &Path) -> PathBuf {
    root.join("__output").join("css")
}
