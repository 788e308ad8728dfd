//! Fingerprint of a fetched sheet.

use sha2::{Digest, Sha256};

use crate::models::RawTable;

const UNIT_SEPARATOR: &[u8] = b"\x1f";
const RECORD_SEPARATOR: &[u8] = b"\x1e";

/// Calculate the SHA-256 checksum of a table's headers and cells.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn table_checksum(table: &RawTable) -> String {
    let mut hasher = Sha256::new();
    for row in std::iter::once(&table.headers).chain(table.rows.iter()) {
        for cell in row {
            hasher.update(cell.as_bytes());
            hasher.update(UNIT_SEPARATOR);
        }
        hasher.update(RECORD_SEPARATOR);
    }
    hex::encode(hasher.finalize())
}
