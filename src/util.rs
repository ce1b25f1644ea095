#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, path::PathBuf};

use anyhow::{Context, Result};
use which::which;

/// Finds and returns the path to the g++ binary
pub fn gxx_path() -> Result<OsString> {
    which("g++")
        .map(PathBuf::into_os_string)
        .context("Cannot find a C++ compiler on path (g++)")
}

/// Finds and returns the path to the gcc binary
pub fn gcc_path() -> Result<OsString> {
    which("gcc")
        .map(PathBuf::into_os_string)
        .context("Cannot find a C compiler on path (gcc)")
}

/// Finds and returns the path to the python interpreter
pub fn python_path() -> Result<OsString> {
    which("python")
        .or_else(|_| which("python3"))
        .map(PathBuf::into_os_string)
        .context("Cannot find a Python interpreter on path (python/python3)")
}

/// Finds and returns the path to javac binary
pub fn javac_path() -> Result<OsString> {
    which("javac")
        .map(PathBuf::into_os_string)
        .context("Cannot find a Java Compiler on path (javac)")
}
