//! Anchor-based record extraction.
//!
//! A form sheet holds one block per person. Each block starts at a merged cell
//! whose text is the anchor label; every field of the block sits at a fixed
//! offset from that cell. Extraction never sorts: records come out in the
//! order the sheet lists its merged regions.

use roster_model::{CellGrid, CellRef, FormConfig, LayoutDescriptor, Record};
use tracing::{debug, trace};

use crate::id_number::IdDerived;
use crate::text::{normalize, normalize_cell};

/// Merged-region anchors whose normalized text equals `label`.
pub fn find_anchors<G: CellGrid + ?Sized>(grid: &G, label: &str) -> Vec<CellRef> {
    let label = normalize(label);
    grid.merged_anchors()
        .iter()
        .copied()
        .filter(|anchor| normalize_cell(&grid.cell(*anchor)) == label)
        .collect()
}

/// Reads every layout field relative to `anchor`.
///
/// Offsets that land outside the sheet read as empty.
pub fn read_record<G: CellGrid + ?Sized>(
    grid: &G,
    anchor: CellRef,
    layout: &LayoutDescriptor,
) -> Record {
    let mut record = Record::new();
    for entry in layout.iter() {
        let value = anchor
            .offset(entry.row_offset, entry.col_offset)
            .map(|at| normalize_cell(&grid.cell(at)))
            .unwrap_or_default();
        record.insert(entry.field.clone(), value);
    }
    record
}

/// Adds document type, nationality, sex and birth date from the ID field.
pub fn enrich(record: &mut Record, form: &FormConfig) {
    let derived = IdDerived::decode(record.value(&form.id_field));
    let names = &form.derived;
    record.insert(names.document_type.clone(), derived.document_type);
    record.insert(names.nationality.clone(), derived.nationality);
    record.insert(names.sex.clone(), derived.sex);
    record.insert(names.birth_date.clone(), derived.birth_date);
}

/// Extracts records from a grid using one form configuration.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    form: FormConfig,
}

impl RecordExtractor {
    pub fn new(form: FormConfig) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &FormConfig {
        &self.form
    }

    /// All valid, enriched records in anchor discovery order.
    ///
    /// Anchors whose name cell is empty are label matches without a person
    /// behind them and are dropped.
    pub fn extract<G: CellGrid + ?Sized>(&self, grid: &G) -> Vec<Record> {
        let anchors = find_anchors(grid, &self.form.anchor_label);
        debug!(anchor_count = anchors.len(), "anchors found");
        let mut records = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let mut record = read_record(grid, anchor, &self.form.layout);
            if !record.has_value(&self.form.name_field) {
                debug!(anchor = %anchor, "anchor without name skipped");
                continue;
            }
            enrich(&mut record, &self.form);
            trace!(anchor = %anchor, fields = record.len(), "record extracted");
            records.push(record);
        }
        records
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(FormConfig::expert_form())
    }
}

#[cfg(test)]
mod tests {
    use roster_model::{FieldOffset, MemoryGrid, fields};

    use super::*;

    fn block(grid: MemoryGrid, row: u32, col: u32, name: &str, id: &str) -> MemoryGrid {
        grid.with_merged(row, col, "专家姓名")
            .with_cell(row + 2, col, name)
            .with_cell(row + 1, col + 1, id)
            .with_cell(row + 3, col + 1, "工商银行")
            .with_cell(row + 3, col + 3, "6222 0000 1111")
            .with_cell(row + 3, col + 5, "13800138000")
    }

    #[test]
    fn anchor_label_is_compared_normalized() {
        let grid = MemoryGrid::new()
            .with_merged(1, 1, " 专家\n姓名 ")
            .with_merged(1, 5, "专家姓名：")
            .with_merged(3, 1, "专家姓名");
        let anchors = find_anchors(&grid, "专家姓名");
        assert_eq!(anchors, vec![CellRef::new(1, 1), CellRef::new(3, 1)]);
    }

    #[test]
    fn plain_cells_are_not_anchors() {
        let grid = MemoryGrid::new().with_cell(1, 1, "专家姓名");
        assert!(find_anchors(&grid, "专家姓名").is_empty());
    }

    #[test]
    fn reads_expert_form_block() {
        let grid = block(MemoryGrid::new(), 5, 2, " 张三 ", "110101199003070512");
        let records = RecordExtractor::default().extract(&grid);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.value(fields::NAME), "张三");
        assert_eq!(record.value(fields::ID_NUMBER), "110101199003070512");
        assert_eq!(record.value(fields::BANK), "工商银行");
        assert_eq!(record.value(fields::BANK_ACCOUNT), "622200001111");
        assert_eq!(record.value(fields::PHONE), "13800138000");
        assert_eq!(record.value(fields::DOCUMENT_TYPE), "居民身份证");
        assert_eq!(record.value(fields::NATIONALITY), "中国");
        assert_eq!(record.value(fields::SEX), "男");
        assert_eq!(record.value(fields::BIRTH_DATE), "1990/3/7");
    }

    #[test]
    fn negative_offsets_off_sheet_read_empty() {
        let form = FormConfig {
            layout: LayoutDescriptor::new(vec![
                FieldOffset::new(fields::NAME, 0, 1),
                FieldOffset::new(fields::ID_NUMBER, -3, 0),
            ]),
            ..FormConfig::expert_form()
        };
        let grid = MemoryGrid::new()
            .with_merged(1, 1, "专家姓名")
            .with_cell(1, 2, "李四");
        let records = RecordExtractor::new(form).extract(&grid);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(fields::ID_NUMBER), "");
        assert_eq!(records[0].value(fields::SEX), "");
    }
}
