#![allow(dead_code)]
use serde_json::{json, Value};
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A wrapper around a temporary project directory.
pub struct TestProject {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    /// The project root that diagnostics are reported relative to.
    pub root: PathBuf,
}

impl TestProject {
    /// Create an empty project with the given name.
    pub fn new(project_name: &str) -> IoResult<Self> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join(project_name);
        fs::create_dir_all(&root)?;
        Ok(TestProject { temp_dir, root })
    }

    /// Returns a reference to the project root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a source file below the root and return its absolute path.
    pub fn write_source(&self, relative: &str, contents: &str) -> IoResult<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a stats JSON dump into the project and return its path.
    pub fn write_stats(&self, stats: &Value) -> IoResult<PathBuf> {
        let path = self.root.join("stats.json");
        fs::write(&path, serde_json::to_string_pretty(stats)?)?;
        Ok(path)
    }
}

/// A diagnostic record attached to `resource`.
pub fn record(name: &str, resource: &Path, message: &str) -> Value {
    json!({
        "name": name,
        "module": {"resource": resource.to_string_lossy()},
        "message": message,
    })
}

/// A record that carries a precise location.
pub fn located_record(resource: &Path, line: u64, column: u64, message: &str) -> Value {
    json!({
        "name": "ModuleParseError",
        "module": {"resource": resource.to_string_lossy()},
        "error": {"error": {"loc": {"line": line, "column": column}}},
        "message": message,
    })
}

pub fn stats(errors: Vec<Value>, warnings: Vec<Value>) -> Value {
    json!({"compilation": {"errors": errors, "warnings": warnings}})
}
