//! Version table rendering for logs
//!
//! Versions are printed newest first as a JSON-style array, five per row,
//! with each column padded to its widest entry.

use crate::domain::HasVersion;

/// Number of versions per row
const COLUMNS: usize = 5;

/// Renders a block describing the given versions
///
/// The input is not reordered; a sorted copy is rendered.
pub fn format_versions<T: HasVersion>(id: &str, description: &str, versions: &[T]) -> String {
    let mut sorted: Vec<&T> = versions.iter().collect();
    sorted.sort_by(|a, b| b.version().cmp(a.version()));
    let strings: Vec<String> = sorted.iter().map(|v| v.version().to_string()).collect();

    let mut max_width = [0usize; COLUMNS];
    for (i, s) in strings.iter().enumerate() {
        max_width[i % COLUMNS] = max_width[i % COLUMNS].max(s.len());
    }

    let mut out = format!(
        "Found {} versions of {} {}\n[\n  ",
        strings.len(),
        id,
        description
    );
    let last = strings.len().saturating_sub(1);
    for (i, s) in strings.iter().enumerate() {
        out.push('"');
        out.push_str(s);
        out.push('"');
        if i == last {
            continue;
        }
        out.push(',');
        if (i + 1) % COLUMNS == 0 {
            out.push_str("\n  ");
        } else {
            let padding = 1 + max_width[i % COLUMNS] - s.len();
            out.push_str(&" ".repeat(padding));
        }
    }
    out.push_str("\n]\n");
    out
}

/// Emits the version table at INFO level
pub fn log_all_versions<T: HasVersion>(id: &str, description: &str, versions: &[T]) {
    tracing::info!("{}", format_versions(id, description, versions));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemanticVersion;

    fn versions(list: &[&str]) -> Vec<SemanticVersion> {
        list.iter()
            .map(|s| SemanticVersion::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn test_format_block_table() {
        let input = versions(&[
            "888.777.666",
            "1.0.0",
            "1.0.1",
            "1.0.2",
            "1.0.3",
            "1.0.4",
            "1.0.5",
            "1.0.6",
            "1.0.7",
            "1.0.8",
            "1.0.9",
            "1.10.0",
            "2.0.0",
            "2.0.1",
            "2.0.2",
            "2.0.3",
            "2.0.4",
            "2.0.5",
            "2.0.6",
            "2.0.7",
            "2.0.8",
            "2.0.9",
            "2.10.0",
        ]);

        let expected = concat!(
            "Found 23 versions of dep-id description\n",
            "[\n",
            "  \"888.777.666\", \"2.10.0\", \"2.0.9\",  \"2.0.8\", \"2.0.7\",\n",
            "  \"2.0.6\",       \"2.0.5\",  \"2.0.4\",  \"2.0.3\", \"2.0.2\",\n",
            "  \"2.0.1\",       \"2.0.0\",  \"1.10.0\", \"1.0.9\", \"1.0.8\",\n",
            "  \"1.0.7\",       \"1.0.6\",  \"1.0.5\",  \"1.0.4\", \"1.0.3\",\n",
            "  \"1.0.2\",       \"1.0.1\",  \"1.0.0\"\n",
            "]\n",
        );

        assert_eq!(format_versions("dep-id", "description", &input), expected);
    }

    #[test]
    fn test_format_short_list() {
        let input = versions(&["1.0.0", "1.5.0", "1.4.0"]);
        assert_eq!(
            format_versions("fake-dependency-id", "as new versions", &input),
            "Found 3 versions of fake-dependency-id as new versions\n[\n  \"1.5.0\", \"1.4.0\", \"1.0.0\"\n]\n"
        );
    }

    #[test]
    fn test_format_exactly_one_row() {
        let input = versions(&["1.0.0", "1.1.0", "1.2.0", "1.3.0", "1.4.0"]);
        assert_eq!(
            format_versions("id", "from upstream", &input),
            "Found 5 versions of id from upstream\n[\n  \"1.4.0\", \"1.3.0\", \"1.2.0\", \"1.1.0\", \"1.0.0\"\n]\n"
        );
    }

    #[test]
    fn test_format_empty() {
        let input: Vec<SemanticVersion> = Vec::new();
        assert_eq!(
            format_versions("id", "as new versions", &input),
            "Found 0 versions of id as new versions\n[\n  \n]\n"
        );
    }

    #[test]
    fn test_format_does_not_reorder_input() {
        let input = versions(&["1.0.0", "2.0.0"]);
        let _ = format_versions("id", "x", &input);
        assert_eq!(input[0].to_string(), "1.0.0");
    }
}
