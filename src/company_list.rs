//! Loading the plain-text company list (one name per line).

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Read a company list file: one name per line, trimmed, blank lines
/// skipped, case-insensitive de-duplication preserving first-seen order.
pub fn read_company_list(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;

    let mut seen = HashSet::new();
    let mut companies = Vec::new();

    for line in content.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            companies.push(name.to_string());
        } else {
            debug!("skipping duplicate company entry '{}'", name);
        }
    }

    Ok(companies)
}
