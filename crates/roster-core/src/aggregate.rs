//! Grouping of per-source records and assembly of the consolidated sheet rows.

use roster_model::{OutputLayout, OutputRow, Record, ResultSet};

use crate::layout::{header_row, to_row};

/// Collects per-source records into a [`ResultSet`], in iteration order.
///
/// Sources with no records are left out.
pub fn aggregate<I, S>(sources: I) -> ResultSet
where
    I: IntoIterator<Item = (S, Vec<Record>)>,
    S: Into<String>,
{
    let mut result_set = ResultSet::new();
    for (source, records) in sources {
        result_set.insert(source, records);
    }
    result_set
}

/// Rows of the consolidated sheet.
///
/// An optional header row comes first; then, per source, one row carrying
/// only the source identifier followed by that source's data rows.
pub fn build_rows(result_set: &ResultSet, layout: &OutputLayout) -> Vec<OutputRow> {
    let mut rows = Vec::with_capacity(result_set.len() + result_set.record_count() + 1);
    if layout.include_header {
        rows.push(header_row(layout));
    }
    for group in result_set.groups() {
        rows.push(OutputRow::label(group.source.clone()));
        rows.extend(group.records.iter().map(|record| to_row(record, layout)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use roster_model::fields;

    use super::*;

    fn person(name: &str) -> Record {
        [(fields::NAME, name)].into_iter().collect()
    }

    #[test]
    fn empty_sources_leave_no_group() {
        let set = aggregate(vec![
            ("empty.xlsx", Vec::new()),
            ("two.xlsx", vec![person("甲"), person("乙")]),
        ]);
        assert_eq!(set.len(), 1);

        let rows = build_rows(&set, &OutputLayout::expert_roster());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], OutputRow::label("two.xlsx"));
        assert_eq!(rows[1].get(1), Some("甲"));
        assert_eq!(rows[2].get(1), Some("乙"));
    }

    #[test]
    fn header_precedes_first_group() {
        let set = aggregate([("a.xlsx", vec![person("甲")])]);
        let layout = OutputLayout::expert_roster().with_header(true);
        let rows = build_rows(&set, &layout);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get(1), Some(fields::NAME));
        assert_eq!(rows[1], OutputRow::label("a.xlsx"));
    }

    #[test]
    fn nothing_extracted_means_no_rows() {
        let set = aggregate(Vec::<(String, Vec<Record>)>::new());
        assert!(build_rows(&set, &OutputLayout::expert_roster()).is_empty());
    }
}
