use googletest::prelude::*;
use test_casing::test_casing;

use super::*;
use crate::{
    rules::{Annotation, BlankLine, Header, LineRule, NumberedRow, PrefixedRow},
    table::Row,
};

const HEADER: &str = "#Event,Entries,Heats,Est. Start,Actual Start";

fn default_extractor() -> Extractor {
    Extractor::new(&RuleConfig::default()).expect("default config should be valid")
}

fn header_row() -> Row {
    Row::from(["#Event", "Entries", "Heats", "Est. Start", "Actual Start"])
}

fn table_of(rows: &[&[&str]]) -> Table {
    rows.iter().map(|r| r.iter().copied()).into()
}

#[gtest]
#[test_log::test]
fn extracts_schedule_with_break_and_region_exit() {
    let lines = [
        HEADER,
        "1,100m Dash,12,2,09:00,09:05",
        "Scheduled Break: Lunch, 12:30",
        "2,200m Dash,8,1,10:00,",
        "",
        "3,400m Dash,6,1,11:00,",
    ];

    let table = default_extractor().extract(lines);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["1", "100m Dash", "12", "2", "09:00", "09:05"],
            &["", "Scheduled Break: Lunch, 12:30", "", "", "12:30", ""],
            &["2", "200m Dash", "8", "1", "10:00", ""],
        ]))
    );
}

#[gtest]
fn blank_line_before_later_rows_excludes_them() {
    let lines = [
        HEADER,
        "1,100m Dash,12,2,09:00,09:05",
        "Scheduled Break: Lunch, 12:30",
        "",
        "2,200m Dash,8,1,10:00,",
        "3,400m Dash,6,1,11:00,",
    ];

    let table = default_extractor().extract(lines);

    expect_that!(table.len(), eq(3));
    expect_that!(table.header(), some(eq(&header_row())));
    expect_that!(
        table[2],
        eq(&Row::from(["", "Scheduled Break: Lunch, 12:30", "", "", "12:30", ""]))
    );
}

#[gtest]
fn exit_on_blank_line() {
    let table = default_extractor().extract([HEADER, "1,A,B,C,D", "", "2,X,Y,Z,W"]);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["1", "A", "B", "C", "D"],
        ]))
    );
}

#[gtest]
fn whitespace_only_line_closes_region() {
    let table = default_extractor().extract([HEADER, "1,A", "   \t ", "2,B"]);
    expect_that!(table.len(), eq(2));
}

#[gtest]
fn rows_before_header_are_ignored() {
    let table = default_extractor().extract(["1,early,row", "68,early", HEADER, "2,late,row"]);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["2", "late", "row"],
        ]))
    );
}

#[gtest]
fn header_is_captured_once() {
    let second_header = "#Event,Entries,Heats,Est. Start,Actual Start,Notes";
    let table = default_extractor().extract([
        HEADER,
        "1,A",
        second_header,
        "2,B",
        "",
        second_header,
        "3,C",
    ]);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["1", "A"],
            &["2", "B"],
        ]))
    );
}

#[gtest]
fn header_requires_marker_and_every_substring() {
    let extractor = default_extractor();

    let missing_marker = extractor.extract(["Event,Entries,Heats,Est. Start,Actual Start", "1,A"]);
    expect_that!(missing_marker.len(), eq(0));

    let missing_column = extractor.extract(["#Event,Entries,Heats,Est. Start", "1,A"]);
    expect_that!(missing_column.len(), eq(0));
}

#[gtest]
fn surrounding_whitespace_is_ignored() {
    let table = default_extractor().extract([
        format!("   {HEADER}  "),
        "\t 1 , A ,B  ".to_string(),
    ]);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["1", "A", "B"],
        ]))
    );
}

#[gtest]
fn unmatched_lines_inside_region_are_dropped_without_closing_it() {
    let table = default_extractor().extract([
        HEADER,
        "1,A",
        "Page 2 of 3",
        "continued from previous",
        "2,B",
    ]);

    expect_that!(table.len(), eq(3));
    expect_that!(table[2], eq(&Row::from(["2", "B"])));
}

#[gtest]
fn secondary_prefix_rows_are_split() {
    let table = default_extractor().extract([HEADER, "68 Relay,4,1,15:00,"]);

    expect_that!(
        table[1],
        eq(&Row::from(["68 Relay", "4", "1", "15:00", ""]))
    );
}

#[gtest]
fn annotation_without_delimiter_repeats_line_as_tail() {
    let table = default_extractor().extract([HEADER, "Scheduled Break: Awards"]);

    expect_that!(
        table[1],
        eq(&Row::from([
            "",
            "Scheduled Break: Awards",
            "",
            "",
            "Scheduled Break: Awards",
            ""
        ]))
    );
}

#[gtest]
fn tables_may_be_ragged() {
    let table = default_extractor().extract([
        HEADER,
        "1,A",
        "2,A,B,C,D,E,F,G",
        "Scheduled Break: Lunch, 12:30",
    ]);

    let lens: Vec<usize> = table.iter().map(|row| row.len()).collect();
    expect_that!(lens, eq(&vec![5, 2, 8, 6]));
    expect_that!(table.is_ragged(), eq(true));
}

#[gtest]
fn extraction_is_repeatable() {
    let extractor = default_extractor();
    let lines = [HEADER, "1,A", "", "2,B"];

    let first = extractor.extract(lines);
    let second = extractor.extract(lines);

    expect_that!(first, eq(&second));
    expect_that!(first.len(), eq(2));
}

#[gtest]
fn no_header_yields_empty_table() {
    let table = default_extractor().extract(["1,A", "", "Scheduled Break: Lunch, 12:30"]);
    expect_that!(table.is_empty(), eq(true));
}

#[gtest]
fn extract_text_splits_lines() {
    let text = format!("{HEADER}\r\n1,A\r\n\r\n2,B\r\n");
    let table = default_extractor().extract_text(&text);
    expect_that!(table.len(), eq(2));
}

#[gtest]
fn rule_order_decides_between_overlapping_rules() {
    // "68,..." satisfies both NumberedRow and PrefixedRow. With an annotation
    // marker of "68" ahead of both, the annotation wins.
    let cfg = RuleConfig {
        rules: vec![
            LineRule::Header(Header {
                marker: '#',
                required: vec![],
            }),
            LineRule::Annotation(Annotation {
                marker: "68".into(),
                width: 3,
                text_column: 0,
                tail_column: 2,
            }),
            LineRule::NumberedRow(NumberedRow {}),
            LineRule::PrefixedRow(PrefixedRow {
                prefix: "68".into(),
            }),
            LineRule::BlankLine(BlankLine {}),
        ],
        ..RuleConfig::default()
    };

    let table = Extractor::new(&cfg)
        .expect("should be valid")
        .extract(["#a,b", "68,x,y", "7,x,y"]);

    expect_that!(
        table,
        eq(&table_of(&[&["#a", "b"], &["68,x,y", "", "y"], &["7", "x", "y"]]))
    );
}

#[gtest]
fn without_blank_line_rule_region_never_closes() {
    let cfg = RuleConfig {
        rules: vec![
            LineRule::Header(Header {
                marker: '#',
                required: vec![],
            }),
            LineRule::NumberedRow(NumberedRow {}),
        ],
        ..RuleConfig::default()
    };

    let table = Extractor::new(&cfg)
        .expect("should be valid")
        .extract(["#a,b", "1,x", "", "2,y"]);

    expect_that!(table.len(), eq(3));
}

#[gtest]
fn custom_delimiter_applies_to_all_rules() {
    let cfg = RuleConfig {
        delimiter: "|".into(),
        ..RuleConfig::default()
    };

    let table = Extractor::new(&cfg).expect("should be valid").extract([
        "#Event|Entries|Heats|Est. Start|Actual Start",
        "1 | 100m Dash | 12",
        "1,100m Dash,12",
        "Scheduled Break: Lunch | 12:30",
    ]);

    expect_that!(
        table,
        eq(&table_of(&[
            &["#Event", "Entries", "Heats", "Est. Start", "Actual Start"],
            &["1", "100m Dash", "12"],
            &["", "Scheduled Break: Lunch | 12:30", "", "", "12:30", ""],
        ]))
    );
}

#[gtest]
fn extract_reports_configuration_errors() {
    let cfg = RuleConfig {
        delimiter: String::new(),
        ..RuleConfig::default()
    };

    expect_that!(
        extract([HEADER], &cfg),
        err(eq(&ConfigError::EmptyDelimiter))
    );
}

#[gtest]
fn extract_with_valid_config() {
    let table = extract([HEADER, "1,A"], &RuleConfig::default()).expect("should extract");
    expect_that!(table.len(), eq(2));
}

#[gtest]
fn finds_title_when_configured() {
    let extractor = default_extractor();
    let lines = ["Session Report Spring Open Page 1", HEADER];
    expect_that!(extractor.find_title(lines), some(eq("Spring Open")));

    let no_title = Extractor::new(&RuleConfig {
        title: None,
        ..RuleConfig::default()
    })
    .expect("should be valid");
    expect_that!(no_title.find_title(lines), none());
}

#[gtest]
fn extractor_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Extractor>();

    let extractor = default_extractor();
    let tables: Vec<Table> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let extractor = &extractor;
                s.spawn(move || {
                    let row = format!("{i},lane");
                    extractor.extract([HEADER, row.as_str()])
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect()
    });

    for (i, table) in tables.iter().enumerate() {
        expect_that!(table.len(), eq(2));
        expect_that!(table[1], eq(&Row::from([i.to_string(), "lane".to_string()])));
    }
}

struct DataRowCase {
    line: &'static str,
    captured: bool,
}

impl std::fmt::Debug for DataRowCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.line)
    }
}

const DATA_ROW_CASES: &[DataRowCase] = &[
    DataRowCase {
        line: "1,A",
        captured: true,
    },
    DataRowCase {
        line: "123 ,A",
        captured: true,
    },
    DataRowCase {
        line: "12a,A",
        captured: false,
    },
    DataRowCase {
        line: "A1,A",
        captured: false,
    },
    DataRowCase {
        line: "1 A,B",
        captured: false,
    },
    DataRowCase {
        line: "1",
        captured: false,
    },
];

#[test_casing(6, DATA_ROW_CASES)]
fn numbered_row_recognition(case: &DataRowCase) {
    let table = default_extractor().extract([HEADER, case.line]);
    let want = if case.captured { 2 } else { 1 };
    assert_that!(table.len(), eq(want));
}
