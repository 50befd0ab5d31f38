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

//! Cached intermediate-result store.
//!
//! Persists the two derived metric tables so reporting and plotting can be
//! re-run without re-executing benchmarks. Writes overwrite wholesale; the
//! store runs strictly after the parallel phase joins, so it never has
//! concurrent writers.

use crate::error::{BenchError, Result};
use crate::metrics::MetricTable;
use std::fs;
use std::path::{Path, PathBuf};

/// Cache artifact holding the mean runtimes.
pub const AVERAGE_RUNTIMES_FILE: &str = "average_runtimes.json";

/// Cache artifact holding the mean overhead ratios.
pub const AVERAGE_OVERHEADS_FILE: &str = "average_overheads.json";

/// Reads and writes the serialized metric tables in a cache directory.
#[derive(Debug, Clone)]
pub struct ResultStore {
    cache_dir: PathBuf,
}

impl ResultStore {
    /// Create a store over the given cache directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// The cache directory this store operates on.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Persist both tables, overwriting any prior versions.
    pub fn save(&self, runtimes: &MetricTable, overheads: &MetricTable) -> Result<()> {
        self.write_table(AVERAGE_RUNTIMES_FILE, runtimes)?;
        self.write_table(AVERAGE_OVERHEADS_FILE, overheads)
    }

    /// Load the mean-runtime table.
    ///
    /// # Errors
    ///
    /// `CacheMissing` if no run has populated the cache yet.
    pub fn load_runtimes(&self) -> Result<MetricTable> {
        self.read_table(AVERAGE_RUNTIMES_FILE)
    }

    /// Load the overhead table.
    ///
    /// # Errors
    ///
    /// `CacheMissing` if no run has populated the cache yet.
    pub fn load_overheads(&self) -> Result<MetricTable> {
        self.read_table(AVERAGE_OVERHEADS_FILE)
    }

    fn write_table(&self, name: &str, table: &MetricTable) -> Result<()> {
        let path = self.cache_dir.join(name);
        let json = serde_json::to_string_pretty(table)?;
        fs::write(&path, json).map_err(|e| BenchError::io_error(&path, e))
    }

    fn read_table(&self, name: &str) -> Result<MetricTable> {
        let path = self.cache_dir.join(name);
        if !path.exists() {
            return Err(BenchError::CacheMissing { path });
        }
        let json = fs::read_to_string(&path).map_err(|e| BenchError::io_error(&path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}
