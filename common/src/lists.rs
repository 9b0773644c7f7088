use std::path::Path;

/// Reads a domain or IP list: one entry per line, `#` starts a comment line.
///
/// A missing file is an empty list.
pub fn load_entries(path: &Path) -> std::io::Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents: String = std::fs::read_to_string(path)?;
    Ok(parse_entries(&contents))
}

pub fn parse_entries(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
