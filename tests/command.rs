// tests/command.rs

use fswatch::exec::{CommandLine, render, split_command};

fn events(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn renders_and_splits_default_template() {
    let rendered = render("echo {Path} {Events}", "/tmp", &events(&["evt"]));
    assert_eq!(rendered, "echo /tmp evt");

    let line = CommandLine::parse(&rendered).expect("non-empty command");
    assert_eq!(line.program, "echo");
    assert_eq!(line.args, vec!["/tmp", "evt"]);
    assert_eq!(line.to_string(), "echo /tmp evt");
}

#[test]
fn events_are_joined_with_commas() {
    let rendered = render("notify --on={Events}", "x", &events(&["create", "write"]));
    assert_eq!(rendered, "notify --on=create,write");
}

#[test]
fn every_placeholder_occurrence_is_replaced() {
    let rendered = render("cp {Path} {Path}.bak # {Events}/{Events}", "a.txt", &events(&["write"]));
    assert_eq!(rendered, "cp a.txt a.txt.bak # write/write");
}

#[test]
fn placeholder_text_inside_the_path_is_substituted_too() {
    let rendered = render("echo {Path}", "/odd/{Events}", &events(&["create"]));
    assert_eq!(rendered, "echo /odd/create");
}

#[test]
fn quoted_spans_do_not_split_and_keep_their_quotes() {
    assert_eq!(
        split_command(r#"sh -c "echo a b""#),
        vec!["sh", "-c", r#""echo a b""#]
    );
    assert_eq!(
        split_command("grep 'two words' file"),
        vec!["grep", "'two words'", "file"]
    );
}

#[test]
fn either_quote_character_toggles_quoting() {
    assert_eq!(split_command(r#"a 'b "c' d"#), vec!["a", r#"'b "c' d"#]);
}

#[test]
fn runs_of_whitespace_collapse() {
    assert_eq!(split_command("  ls \t -l\n  /tmp  "), vec!["ls", "-l", "/tmp"]);
}

#[test]
fn blank_command_has_no_program() {
    assert!(split_command("").is_empty());
    assert!(CommandLine::parse("").is_none());
    assert!(CommandLine::parse("   \t ").is_none());
}
