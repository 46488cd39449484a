#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Generated files read back to what was written.

mod common;

use common::{NO_FILE_CHECK, TestContextBuilder};
use pyphot_file::generate::{PyphotFileContents, make_pyphot_file};
use pyphot_file::parse::ParseOptions;
use pyphot_file::parse::block::DataFormat;
use pyphot_file::parse::table::DataTable;

#[test]
fn raw_list_round_trip() {
    let ctx = TestContextBuilder::new()
        .with_raw_frames(&["a.fits", "b.fits"])
        .build();
    let raw = ctx.raw_dir();
    let contents = PyphotFileContents {
        data_files: vec!["a.fits".to_string(), "b.fits".to_string()],
        setup_lines: Some(vec!["Setup A:".to_string(), "Setup B:".to_string()]),
        paths: Some(vec![raw.clone()]),
        ..PyphotFileContents::new("lbc_r")
    };
    make_pyphot_file(&ctx.path("lbc_r.pyphot"), &contents).expect("write");

    let parsed = ctx
        .parse(
            "lbc_r.pyphot",
            ParseOptions {
                file_check: true,
                runtime: true,
            },
        )
        .expect("parse");
    assert_eq!(parsed.cfg_lines, vec!["[rdx]", "camera = lbc_r"]);
    assert_eq!(parsed.setups, vec!["A", "B"]);
    assert_eq!(parsed.data.files(), [raw.join("a.fits"), raw.join("b.fits")]);
}

#[test]
fn table_round_trip_without_file_check() {
    let ctx = TestContextBuilder::new().build();
    let table = DataTable::from_rows(
        vec!["filename".into(), "frametype".into()],
        vec![
            vec!["sci1.fits".into(), "science".into()],
            vec!["flat1.fits".into(), "pixelflat".into()],
        ],
    )
    .expect("table");
    let contents = PyphotFileContents {
        setup_mode: true,
        setup_lines: Some(vec!["Setup A:".to_string()]),
        sorted_files: Some(table.to_lines()),
        paths: Some(vec!["/nonexistent/raw".into()]),
        ..PyphotFileContents::new("lbc_b")
    };
    make_pyphot_file(&ctx.path("lbc_b_A.pyphot"), &contents).expect("write");

    let parsed = ctx.parse("lbc_b_A.pyphot", NO_FILE_CHECK).expect("parse");
    assert_eq!(
        parsed.cfg_lines,
        vec!["[rdx]", "camera = lbc_b", "setup = True"]
    );
    assert_eq!(parsed.setups, vec!["A"]);
    assert_eq!(parsed.data.format(), DataFormat::Table);
    let names: Vec<_> = parsed
        .data
        .files()
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["sci1.fits", "flat1.fits"]);
    assert_eq!(parsed.data.table(), Some(&table));
}

#[test]
fn explicit_cfg_lines_survive() {
    let ctx = TestContextBuilder::new().build();
    let cfg = vec![
        "[rdx]".to_string(),
        "    camera = lbc_b".to_string(),
        "[baseprocess]".to_string(),
        "    [[scienceframe]]".to_string(),
        "        exprng = None, 600".to_string(),
    ];
    let contents = PyphotFileContents {
        cfg_lines: Some(cfg.clone()),
        ..PyphotFileContents::new("lbc_b")
    };
    make_pyphot_file(&ctx.path("run.pyphot"), &contents).expect("write");
    let lines = pyphot_file::parse_cfg_lines(&ctx.path("run.pyphot")).expect("cfg lines");
    let trimmed: Vec<&str> = cfg.iter().map(|l| l.trim()).collect();
    assert_eq!(lines, trimmed);
}
