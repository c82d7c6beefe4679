//! End-to-end runs over a temporary folder of registration workbooks.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use roster_cli::config::RosterConfig;
use roster_cli::pipeline::{SourceStatus, discover, extract_all, write_output};
use roster_core::RecordExtractor;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;

fn write_form(dir: &Path, file: &str, experts: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let merge = Format::new();
    let mut top = 1;
    for (name, id) in experts {
        sheet
            .merge_range(top, 0, top, 1, "专家姓名", &merge)
            .expect("anchor merge");
        sheet.write_string(top + 1, 1, *id).expect("id");
        sheet.write_string(top + 2, 0, *name).expect("name");
        sheet.write_string(top + 3, 1, "工商银行").expect("bank");
        sheet.write_string(top + 3, 3, "622200001111").expect("account");
        sheet.write_string(top + 3, 5, "13800138000").expect("phone");
        top += 6;
    }
    workbook.save(&path).expect("save form");
    path
}

fn sheet_text(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open output");
    let range = workbook.worksheet_range(sheet).expect("read sheet");
    let (height, width) = range.get_size();
    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| match range.get_value((row as u32, col as u32)) {
                    Some(Data::String(s)) => s.clone(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect()
}

struct Folder {
    dir: TempDir,
}

impl Folder {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        write_form(dir.path(), "a.xlsx", &[("张三", "110101199003070512")]);
        write_form(
            dir.path(),
            "b.xlsx",
            &[("李四", "11010119851225002X"), ("王五", "1234")],
        );
        write_form(dir.path(), "empty.xlsx", &[]);
        std::fs::write(dir.path().join("broken.xlsx"), b"not a workbook").expect("stub");
        std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("notes");
        std::fs::write(dir.path().join("~$a.xlsx"), b"lock").expect("lock");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn output(&self) -> PathBuf {
        self.path().join("output.xlsx")
    }
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn discovery_skips_non_workbooks_and_output() {
    let folder = Folder::new();
    write_form(folder.path(), "output.xlsx", &[("旧", "110101199003070512")]);

    let paths = discover(folder.path(), &folder.output()).unwrap();

    assert_eq!(
        file_names(&paths),
        vec!["a.xlsx", "b.xlsx", "broken.xlsx", "empty.xlsx"]
    );
}

#[test]
fn output_elsewhere_does_not_hide_same_named_source() {
    let folder = Folder::new();
    let elsewhere = TempDir::new().expect("output dir");

    let paths = discover(folder.path(), &elsewhere.path().join("a.xlsx")).unwrap();

    assert_eq!(
        file_names(&paths),
        vec!["a.xlsx", "b.xlsx", "broken.xlsx", "empty.xlsx"]
    );
}

#[test]
fn output_reached_through_another_path_is_still_excluded() {
    let folder = Folder::new();
    std::fs::create_dir(folder.path().join("sub")).expect("subdir");
    let roundabout = folder.path().join("sub").join("..").join("a.xlsx");

    let paths = discover(folder.path(), &roundabout).unwrap();

    assert_eq!(
        file_names(&paths),
        vec!["b.xlsx", "broken.xlsx", "empty.xlsx"]
    );
}

#[test]
fn consolidates_readable_sources_and_reports_failures() {
    let folder = Folder::new();
    let config = RosterConfig::default();
    let paths = discover(folder.path(), &folder.output()).unwrap();
    let batch = extract_all(&paths, &RecordExtractor::new(config.form.clone()));

    let statuses: Vec<(&str, usize, bool)> = batch
        .sources
        .iter()
        .map(|o| (o.source.as_str(), o.records(), o.is_failed()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("a.xlsx", 1, false),
            ("b.xlsx", 2, false),
            ("broken.xlsx", 0, true),
            ("empty.xlsx", 0, false),
        ]
    );
    assert!(matches!(
        batch.sources[2].status,
        SourceStatus::Failed { ref reason } if reason.contains("broken.xlsx")
    ));

    let rows = write_output(
        &folder.output(),
        &config.sheet_name,
        &batch.result_set,
        &config.output,
    )
    .unwrap();
    assert_eq!(rows, 5);

    let sheet = sheet_text(&folder.output(), "人员信息");
    assert_eq!(sheet.len(), 5);
    assert_eq!(sheet[0][0], "a.xlsx");
    assert_eq!(sheet[1][1], "张三");
    assert_eq!(sheet[1][2], "居民身份证");
    assert_eq!(sheet[1][3], "110101199003070512");
    assert_eq!(sheet[1][4], "中国");
    assert_eq!(sheet[1][5], "男");
    assert_eq!(sheet[1][6], "1990/3/7");
    assert_eq!(sheet[1][10], "13800138000");
    assert_eq!(sheet[1][43], "工商银行");
    assert_eq!(sheet[1][44], "622200001111");
    assert_eq!(sheet[2][0], "b.xlsx");
    assert_eq!(sheet[3][1], "李四");
    assert_eq!(sheet[3][5], "女");
    assert_eq!(sheet[3][6], "1985/12/25");
    assert_eq!(sheet[4][1], "王五");
    assert_eq!(sheet[4][2], "?");
    assert_eq!(sheet[4][5], "?");
}

#[test]
fn rerun_does_not_read_previous_output() {
    let folder = Folder::new();
    let config = RosterConfig::default();
    let extractor = RecordExtractor::new(config.form.clone());

    for _ in 0..2 {
        let paths = discover(folder.path(), &folder.output()).unwrap();
        let batch = extract_all(&paths, &extractor);
        write_output(
            &folder.output(),
            &config.sheet_name,
            &batch.result_set,
            &config.output,
        )
        .unwrap();
    }

    let sheet = sheet_text(&folder.output(), "人员信息");
    let labels: Vec<&str> = sheet
        .iter()
        .filter(|row| !row[0].is_empty())
        .map(|row| row[0].as_str())
        .collect();
    assert_eq!(labels, vec!["a.xlsx", "b.xlsx"]);
}

#[test]
fn header_and_zero_based_layout_from_config() {
    let folder = Folder::new();
    let config = RosterConfig::from_json_str(
        r#"{
            "sheet_name": "Experts",
            "output": {
                "base": "zero",
                "include_header": true,
                "columns": [
                    {"field": "专家姓名", "column": 1},
                    {"field": "性别", "column": 2}
                ]
            }
        }"#,
    )
    .unwrap();
    let paths = vec![folder.path().join("a.xlsx")];
    let batch = extract_all(&paths, &RecordExtractor::new(config.form.clone()));
    write_output(
        &folder.output(),
        &config.sheet_name,
        &batch.result_set,
        &config.output,
    )
    .unwrap();

    let sheet = sheet_text(&folder.output(), "Experts");
    assert_eq!(sheet[0], vec!["", "专家姓名", "性别"]);
    assert_eq!(sheet[1], vec!["a.xlsx", "", ""]);
    assert_eq!(sheet[2], vec!["", "张三", "男"]);
}

#[test]
fn missing_source_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let error = discover(&missing, &missing.join("output.xlsx")).unwrap_err();
    assert!(format!("{error:#}").contains("nope"));
}
