use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

use super::record::Record;

/// Name used when the requested catalog name is blank.
pub const DEFAULT_CATALOG_NAME: &str = "catalogo";

const CATALOG_EXTENSION: &str = "txt";

/// A named catalog backed by `<base_dir>/<name>.txt`.
///
/// Nothing is cached: every operation opens the file, does one pass and
/// closes it again.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    path: PathBuf,
}

impl Catalog {
    /// Open (or prepare) the catalog `name` under `base_dir`.
    ///
    /// `base_dir` is created right away so later writes never fail on a
    /// missing parent. The file itself is only created on the first add.
    pub fn new(name: &str, base_dir: &Path) -> Result<Self, CatalogError> {
        let name = match name.trim() {
            "" => DEFAULT_CATALOG_NAME.to_string(),
            n => n.to_string(),
        };

        fs::create_dir_all(base_dir).map_err(|e| CatalogError::io(base_dir, e))?;
        let path = base_dir.join(format!("{name}.{CATALOG_EXTENSION}"));

        Ok(Self { name, path })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record` unless a record with the same title (ignoring case)
    /// is already stored. Returns whether the record was written.
    pub fn add(&self, record: &Record) -> Result<bool, CatalogError> {
        let existing: HashSet<String> = self
            .records()?
            .map(|r| r.map(|r| r.title_key()))
            .collect::<Result<_, _>>()?;

        if existing.contains(&record.title_key()) {
            log::debug!("{}: '{}' already present", self.name, record.title());
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| CatalogError::io(&self.path, e))?;
        writeln!(file, "{}", record.to_line()).map_err(|e| CatalogError::io(&self.path, e))?;

        log::debug!("{}: added '{}'", self.name, record.title());
        Ok(true)
    }

    /// Stream the stored records in file order.
    ///
    /// Each call reopens the file, so the sequence can be restarted by
    /// calling again. A missing file yields nothing.
    pub fn records(&self) -> Result<Records, CatalogError> {
        let lines = match File::open(&self.path) {
            Ok(f) => Some(BufReader::new(f).lines()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(CatalogError::io(&self.path, e)),
        };

        Ok(Records {
            path: self.path.clone(),
            lines,
        })
    }

    /// All records, sorted by title ignoring case.
    pub fn list(&self) -> Result<Vec<Record>, CatalogError> {
        let mut records = self.records()?.collect::<Result<Vec<_>, _>>()?;
        records.sort_by_cached_key(Record::title_key);
        Ok(records)
    }

    /// Remove the backing file. Returns `false` when there was nothing to
    /// remove.
    pub fn delete_all(&self) -> Result<bool, CatalogError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("{}: removed {}", self.name, self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CatalogError::io(&self.path, e)),
        }
    }

    /// Create the backing file empty. Returns `false` when it already exists.
    pub fn create_empty(&self) -> Result<bool, CatalogError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(CatalogError::io(&self.path, e)),
        }
    }

    /// Rewrite the whole file with `records`, one line each.
    pub fn replace_all(&self, records: &[Record]) -> Result<(), CatalogError> {
        let file = File::create(&self.path).map_err(|e| CatalogError::io(&self.path, e))?;
        let mut out = BufWriter::new(file);
        for record in records {
            writeln!(out, "{}", record.to_line()).map_err(|e| CatalogError::io(&self.path, e))?;
        }
        out.flush().map_err(|e| CatalogError::io(&self.path, e))?;

        log::debug!("{}: rewrote {} record(s)", self.name, records.len());
        Ok(())
    }
}

/// Finite iterator over the records of one catalog file.
///
/// Blank lines are skipped. A line whose title is empty is skipped with a
/// warning instead of failing the whole read.
pub struct Records {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
}

impl Iterator for Records {
    type Item = Result<Record, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines.as_mut()?;
        loop {
            let line = match lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(CatalogError::io(&self.path, e))),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Record::from_line(line) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    log::warn!("{}: skipping line {line:?}: {e}", self.path.display());
                }
            }
        }
    }
}
