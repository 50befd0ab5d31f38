// fpbench - Floating-point arithmetic benchmark pipeline
//
// Copyright (c) 2025 fpbench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single benchmark task execution.
//!
//! A task invokes the externally built benchmark executable once, captures
//! its standard output, parses it as CSV, persists the parsed rows verbatim
//! into the cache directory, and hands the rows back to the dispatcher.
//! Tasks share no mutable state: each writes its own uniquely named cache
//! file.

use crate::error::{BenchError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Specification of one benchmark task.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Zero-based iteration index; names the raw cache file.
    pub task_id: usize,
    /// Directory receiving `raw_task_<id>.csv`.
    pub cache_dir: PathBuf,
}

impl TaskSpec {
    /// Create a new task specification.
    pub fn new(task_id: usize, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            task_id,
            cache_dir: cache_dir.into(),
        }
    }

    /// Path of the raw cache file this task writes.
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(format!("raw_task_{}.csv", self.task_id))
    }
}

/// One completed task's captured output.
///
/// Records are kept as raw strings; numeric parsing happens at aggregation
/// time so a contract violation surfaces once, for the whole batch, with
/// full context. Immutable after capture.
#[derive(Debug, Clone)]
pub struct RawRun {
    /// The task that produced this run.
    pub task_id: usize,
    /// Ordered CSV records; the first is the header row.
    pub records: Vec<Vec<String>>,
}

impl RawRun {
    /// The header row, if any output was produced.
    pub fn header(&self) -> Option<&[String]> {
        self.records.first().map(Vec::as_slice)
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.records.get(1..).unwrap_or_default()
    }
}

/// Executes the benchmark executable and captures its output.
#[derive(Debug, Clone)]
pub struct BenchRunner {
    executable: PathBuf,
}

impl BenchRunner {
    /// Create a runner for the executable at the given path.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the benchmark executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run one benchmark task to completion.
    ///
    /// Invokes the executable with no arguments and blocks until it exits.
    /// On success the parsed rows are written verbatim to the task's cache
    /// file and returned.
    ///
    /// # Errors
    ///
    /// * `Executable` if the binary cannot be spawned or exits non-zero; no
    ///   cache file is written in that case.
    /// * `Csv` if standard output is not well-formed CSV or the cache file
    ///   cannot be written.
    pub fn run_task(&self, spec: &TaskSpec) -> Result<RawRun> {
        let output = Command::new(&self.executable)
            .output()
            .map_err(|e| BenchError::executable(&self.executable, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BenchError::executable(
                &self.executable,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        let records = parse_records(&output.stdout)?;
        write_records(&spec.cache_file(), &records)?;

        Ok(RawRun {
            task_id: spec.task_id,
            records,
        })
    }
}

/// Parse captured stdout as headerless-row CSV with whitespace trimming.
fn parse_records(stdout: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(stdout);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(records)
}

/// Persist parsed records verbatim as a CSV cache file.
fn write_records(path: &Path, records: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush().map_err(|e| BenchError::io_error(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_trims_whitespace() {
        let stdout = b"op, native, mpfr\nadd, 1.0, 2.0\n";
        let records = parse_records(stdout).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["op", "native", "mpfr"]);
        assert_eq!(records[1], vec!["add", "1.0", "2.0"]);
    }

    #[test]
    fn test_parse_records_empty_output() {
        let records = parse_records(b"").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_cache_file_name() {
        let spec = TaskSpec::new(7, "out/cache");
        assert!(spec.cache_file().ends_with("raw_task_7.csv"));
    }

    #[test]
    fn test_raw_run_accessors() {
        let run = RawRun {
            task_id: 0,
            records: vec![
                vec!["op".to_string(), "native".to_string()],
                vec!["add".to_string(), "1.5".to_string()],
            ],
        };
        assert_eq!(run.header().unwrap()[0], "op");
        assert_eq!(run.data_rows().len(), 1);
    }

    #[test]
    fn test_raw_run_empty() {
        let run = RawRun {
            task_id: 0,
            records: Vec::new(),
        };
        assert!(run.header().is_none());
        assert!(run.data_rows().is_empty());
    }

    #[test]
    fn test_run_task_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let runner = BenchRunner::new(dir.path().join("does-not-exist"));
        let err = runner
            .run_task(&TaskSpec::new(0, dir.path()))
            .unwrap_err();
        assert!(matches!(err, BenchError::Executable { .. }));
        // No cache file for a failed task
        assert!(!dir.path().join("raw_task_0.csv").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_task_captures_and_caches_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("fake-ops.sh");
        std::fs::write(&bin, "#!/bin/sh\necho 'op, native, mpfr'\necho 'add, 1, 2'\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = BenchRunner::new(&bin);
        let spec = TaskSpec::new(3, dir.path());
        let run = runner.run_task(&spec).unwrap();

        assert_eq!(run.task_id, 3);
        assert_eq!(run.header().unwrap()[1], "native");
        assert_eq!(run.data_rows()[0][2], "2");

        let cached = std::fs::read_to_string(spec.cache_file()).unwrap();
        assert!(cached.starts_with("op,native,mpfr"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_task_nonzero_exit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("failing-ops.sh");
        std::fs::write(&bin, "#!/bin/sh\necho 'broken' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = BenchRunner::new(&bin);
        let err = runner
            .run_task(&TaskSpec::new(0, dir.path()))
            .unwrap_err();
        match err {
            BenchError::Executable { detail, .. } => assert!(detail.contains("broken")),
            other => panic!("expected Executable error, got {other:?}"),
        }
    }
}
