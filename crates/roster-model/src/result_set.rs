use crate::record::Record;

/// Records extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceGroup {
    /// Source identifier, the originating file name.
    pub source: String,
    pub records: Vec<Record>,
}

/// Per-run collection of records grouped by source, in insertion order.
///
/// Groups are never empty: sources that produced no records are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResultSet {
    groups: Vec<SourceGroup>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source's records. Returns `false` (and stores nothing) when
    /// `records` is empty. A repeated source keeps its position and takes the
    /// new records.
    pub fn insert(&mut self, source: impl Into<String>, records: Vec<Record>) -> bool {
        if records.is_empty() {
            return false;
        }
        let source = source.into();
        match self.groups.iter_mut().find(|group| group.source == source) {
            Some(group) => group.records = records,
            None => self.groups.push(SourceGroup { source, records }),
        }
        true
    }

    pub fn get(&self, source: &str) -> Option<&[Record]> {
        self.groups
            .iter()
            .find(|group| group.source == source)
            .map(|group| group.records.as_slice())
    }

    pub fn groups(&self) -> &[SourceGroup] {
        &self.groups
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }
}

impl IntoIterator for ResultSet {
    type Item = SourceGroup;
    type IntoIter = std::vec::IntoIter<SourceGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
