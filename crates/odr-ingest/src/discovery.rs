//! Source table discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use odr_model::SourceTable;

use crate::error::{IngestError, Result};

/// Resolved file path of every source table.
#[derive(Debug, Clone, Default)]
pub struct TablePaths {
    paths: BTreeMap<SourceTable, PathBuf>,
}

impl TablePaths {
    pub fn get(&self, table: SourceTable) -> Option<&Path> {
        self.paths.get(&table).map(PathBuf::as_path)
    }

    /// Path of a table that `discover_tables` resolved.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` if the table was not resolved.
    pub fn require(&self, table: SourceTable, dir: &Path) -> Result<&Path> {
        self.get(table).ok_or_else(|| IngestError::TableNotFound {
            table: table.file_stem().to_string(),
            dir: dir.to_path_buf(),
        })
    }
}

/// Resolve a table to `<dir>/<stem>`, falling back to `<dir>/<stem>.csv`.
pub fn resolve_table(dir: &Path, table: SourceTable) -> Result<PathBuf> {
    let stem = table.file_stem();
    let bare = dir.join(stem);
    if bare.is_file() {
        return Ok(bare);
    }
    let with_ext = dir.join(format!("{stem}.csv"));
    if with_ext.is_file() {
        return Ok(with_ext);
    }
    Err(IngestError::TableNotFound {
        table: stem.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Resolve all five source tables in `dir`.
pub fn discover_tables(dir: &Path) -> Result<TablePaths> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut paths = BTreeMap::new();
    for table in SourceTable::ALL {
        let path = resolve_table(dir, table)?;
        tracing::debug!(table = %table, path = %path.display(), "resolved table");
        paths.insert(table, path);
    }
    Ok(TablePaths { paths })
}
