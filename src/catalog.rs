//! Movie catalogs persisted as line-delimited text files.
//!
//! A `Record` is one movie entry and knows how to serialize itself to a
//! single line. A `Catalog` owns one `<base_dir>/<name>.txt` file and
//! exposes add, list and delete operations over it; the file is read
//! fresh on every call.

mod discover;
mod record;
mod store;

pub use discover::list_catalogs;
pub use record::*;
pub use store::*;

#[cfg(test)]
mod tests;
