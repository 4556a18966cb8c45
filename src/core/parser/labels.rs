use tracing::debug;

/// Row lookup by the text of a label column.
///
/// Labels are lowercased once when the index is built; lookups are
/// case-insensitive "starts with" matches and the first matching row wins.
pub struct LabelIndex {
    labels: Vec<String>,
}

impl LabelIndex {
    pub fn new(rows: &[Vec<String>], label_col: usize) -> Self {
        let labels = rows
            .iter()
            .map(|row| {
                row.get(label_col)
                    .map(|s| s.trim().to_lowercase())
                    .unwrap_or_default()
            })
            .collect();
        Self { labels }
    }

    pub fn find(&self, label: &str) -> Option<usize> {
        self.find_from(label, 0)
    }

    /// First row at or after `offset` whose label starts with `label`.
    pub fn find_from(&self, label: &str, offset: usize) -> Option<usize> {
        let needle = label.trim().to_lowercase();
        let found = self
            .labels
            .iter()
            .enumerate()
            .skip(offset)
            .find(|(_, l)| l.starts_with(&needle))
            .map(|(i, _)| i);
        if found.is_none() {
            debug!("Label '{}' not found from row {}", label, offset);
        }
        found
    }

    /// The lowercased label of `row`, `""` when the row has none.
    pub fn label(&self, row: usize) -> &str {
        self.labels.get(row).map_or("", |s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
