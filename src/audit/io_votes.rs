// Primitives for reading vote logs from disk.

use std::path::Path;

use crate::audit::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Reads all the lines of the log. The analysis itself never touches the disk.
pub fn read_vote_lines(path: &str) -> AuditResult<Vec<String>> {
    info!("Attempting to read vote log {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningInputSnafu { path })?;
    let lines: Vec<String> = contents.lines().map(|l| l.to_string()).collect();
    debug!("read_vote_lines: {} lines in {:?}", lines.len(), path);
    Ok(lines)
}
