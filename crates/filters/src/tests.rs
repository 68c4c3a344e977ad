use super::*;
use item::{Item, ItemStat};
use std::path::Path;
use std::time::{Duration, SystemTime};

fn text_item(relative: &str, body: &str) -> Item {
    Item::new(format!("/base/{relative}"), relative).with_contents(body)
}

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

fn options(options: ConditionOptions) -> Condition {
    Condition::from(options)
}

#[test]
fn literal_conditions_ignore_the_item() {
    let item = text_item("a.txt", "x");
    assert!(evaluate(&item, &Condition::from(true)));
    assert!(!evaluate(&item, &Condition::from(false)));
    assert!(Condition::default().matches(&item));
}

#[test]
fn unconstrained_options_match_everything() {
    let opts = ConditionOptions::new();
    assert!(opts.is_unconstrained());
    assert!(evaluate(&Item::directory("/base/dir", "dir"), &options(opts)));
}

#[test]
fn extensions_accept_entries_with_or_without_dot() {
    let condition = options(ConditionOptions::new().with_extensions([".txt", "md"]));
    assert!(evaluate(&text_item("a.txt", ""), &condition));
    assert!(evaluate(&text_item("b.md", ""), &condition));
    assert!(!evaluate(&text_item("c.rs", ""), &condition));
}

#[test]
fn extensions_are_case_sensitive_and_use_last_dot() {
    let condition = options(ConditionOptions::new().with_extensions(["gz"]));
    assert!(evaluate(&text_item("logs.tar.gz", ""), &condition));
    assert!(!evaluate(&text_item("LOGS.GZ", ""), &condition));
}

#[test]
fn dotless_names_match_empty_extension_entry() {
    let condition = options(ConditionOptions::new().with_extensions([""]));
    assert!(evaluate(&text_item("Makefile", ""), &condition));
    assert!(!evaluate(&text_item("main.c", ""), &condition));
}

#[test]
fn names_contains_needs_any_substring() {
    let condition = options(ConditionOptions::new().with_names_contains(["test", "bench"]));
    assert!(evaluate(&text_item("src/parser_test.rs", ""), &condition));
    assert!(!evaluate(&text_item("tests/parser.rs", ""), &condition));
}

#[test]
fn names_equals_compares_base_name_only() {
    let condition = options(ConditionOptions::new().with_names_equals(["index.html"]));
    assert!(evaluate(&text_item("site/index.html", ""), &condition));
    assert!(!evaluate(&text_item("site/index.htm", ""), &condition));
}

#[test]
fn size_bounds_are_inclusive() {
    let condition = options(ConditionOptions::new().with_min_size(3).with_max_size(5));
    assert!(!evaluate(&text_item("a", "ab"), &condition));
    assert!(evaluate(&text_item("a", "abc"), &condition));
    assert!(evaluate(&text_item("a", "abcde"), &condition));
    assert!(!evaluate(&text_item("a", "abcdef"), &condition));
}

#[test]
fn inverted_size_range_never_matches() {
    let condition = options(ConditionOptions::new().with_min_size(100).with_max_size(50));
    for len in [0, 50, 75, 100, 200] {
        let item = text_item("a", &"x".repeat(len));
        assert!(!evaluate(&item, &condition), "len {len} matched");
    }
}

#[test]
fn zero_size_bound_is_a_real_constraint() {
    let condition = options(ConditionOptions::new().with_max_size(0));
    assert!(evaluate(&text_item("empty", ""), &condition));
    assert!(!evaluate(&text_item("full", "x"), &condition));
}

#[test]
fn modification_bounds_are_inclusive() {
    let item = text_item("a", "").with_stat(ItemStat::at(0, at(1_000)));
    let exact_after = options(ConditionOptions::new().with_modified_after(at(1_000)));
    let exact_before = options(ConditionOptions::new().with_modified_before(at(1_000)));
    let later = options(ConditionOptions::new().with_modified_after(at(1_001)));
    let earlier = options(ConditionOptions::new().with_modified_before(at(999)));

    assert!(evaluate(&item, &exact_after));
    assert!(evaluate(&item, &exact_before));
    assert!(!evaluate(&item, &later));
    assert!(!evaluate(&item, &earlier));
}

#[test]
fn creation_bounds_use_created_time() {
    let stat = ItemStat {
        size: 0,
        modified: at(5_000),
        created: at(1_000),
    };
    let item = text_item("a", "").with_stat(stat);
    let window = options(
        ConditionOptions::new()
            .with_created_after(at(500))
            .with_created_before(at(2_000)),
    );
    assert!(evaluate(&item, &window));
    assert!(!evaluate(
        &item,
        &options(ConditionOptions::new().with_created_after(at(2_000)))
    ));
}

#[test]
fn contains_content_decodes_lossily() {
    let item = Item::new("/base/bin", "bin").with_contents(vec![0xff, b'o', b'k', 0xfe]);
    assert!(evaluate(&item, &options(ConditionOptions::new().with_contains_content("ok"))));
    assert!(!evaluate(&item, &options(ConditionOptions::new().with_contains_content("no"))));
}

#[test]
fn content_dimensions_fail_without_buffer() {
    let dir = Item::directory("/base/dir", "dir");
    assert!(!evaluate(&dir, &options(ConditionOptions::new().with_contains_content(""))));
    assert!(!evaluate(&dir, &options(ConditionOptions::new().with_line_count(1))));
}

#[test]
fn path_contains_uses_relative_path() {
    let item = text_item("docs/guide.md", "");
    assert!(evaluate(&item, &options(ConditionOptions::new().with_path_contains("docs/"))));
    assert!(!evaluate(&item, &options(ConditionOptions::new().with_path_contains("base"))));
}

#[test]
fn line_count_counts_newline_segments() {
    let condition = options(ConditionOptions::new().with_line_count(3));
    assert!(evaluate(&text_item("a", "one\ntwo\nthree"), &condition));
    assert!(evaluate(&text_item("a", "one\ntwo\n"), &condition));
    assert!(!evaluate(&text_item("a", "one\ntwo"), &condition));
}

#[test]
fn size_in_kb_uses_exact_equality() {
    let exact = text_item("a", &"x".repeat(1024));
    let half = text_item("a", &"x".repeat(512));
    let nearly = text_item("a", &"x".repeat(1023));

    assert!(evaluate(&exact, &options(ConditionOptions::new().with_size_in_kb(1.0))));
    assert!(evaluate(&half, &options(ConditionOptions::new().with_size_in_kb(0.5))));
    assert!(!evaluate(&nearly, &options(ConditionOptions::new().with_size_in_kb(1.0))));
}

#[test]
fn custom_filter_runs_last() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let condition = options(
        ConditionOptions::new()
            .with_extensions(["txt"])
            .with_custom(move |item| {
                seen.fetch_add(1, Ordering::SeqCst);
                item.content_len() > 1
            }),
    );

    assert!(!evaluate(&text_item("a.md", "long"), &condition));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(evaluate(&text_item("a.txt", "long"), &condition));
    assert!(!evaluate(&text_item("a.txt", "x"), &condition));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn first_failure_names_earliest_dimension() {
    let opts = ConditionOptions::new()
        .with_extensions(["txt"])
        .with_min_size(100)
        .with_path_contains("nowhere");
    let item = text_item("a.txt", "short");
    assert_eq!(first_failure(&item, &opts), Some(Dimension::MinSize));
    assert_eq!(first_failure(&text_item("a.md", ""), &opts), Some(Dimension::Extensions));
}

#[test]
fn dimension_table_ends_with_custom() {
    assert_eq!(Dimension::ALL.last(), Some(&Dimension::Custom));
    assert_eq!(Dimension::ALL[0].to_string(), "extensions");
}

#[test]
fn exclude_list_mixes_substrings_and_globs() {
    let list = ExcludeList::new(["node_modules", "*.log", "build/**"]).unwrap();
    assert_eq!(list.patterns().len(), 3);
    assert!(list.excludes(Path::new("app/node_modules/pkg/index.js")));
    assert!(list.excludes(Path::new("debug.log")));
    assert!(list.excludes(Path::new("deep/dir/trace.log")));
    assert!(list.excludes(Path::new("build/out/app")));
    assert!(!list.excludes(Path::new("src/build/app")));
    assert!(!list.excludes(Path::new("src/main.rs")));
}

#[test]
fn empty_exclude_list_excludes_nothing() {
    let list = ExcludeList::default();
    assert!(list.is_empty());
    assert!(!list.excludes(Path::new("anything")));
}

#[test]
fn invalid_glob_is_rejected() {
    let error = ExcludeList::new(["src/["]).unwrap_err();
    assert!(matches!(error, FilterError::InvalidGlob { ref pattern, .. } if pattern == "src/["));
}
