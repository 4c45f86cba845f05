//! Integration tests for the front end.
//!
//! These tests drive the complete pipeline, source text through
//! tokenization and parsing, and check the JSON the command line writes.

use pretty_assertions::assert_eq;
use proclang::{
    ast::{ast::Node, statements::Stmt},
    errors::errors::Stage,
    parse, tokenize, Diagnostics,
};
use serde_json::Value;

const PROGRAM: &str = r#"# Inventory handling
enum Category { Tool, Food, Misc }

public stock: Map<String, Number> = { "hammer": 2, "apple": 10, };
private limit: Number | Null = 0x40;

#< restocks an item and
   reports the new level >#
proc restock(@logged, @retries=3, item: String, amount: Number = 1) -> Number {
    temp current: Number = stock.get(item) + amount * 2 ** 2;
    notify(item, level = current);
}

on_restock(item) {
    log("restocked " + item, !quiet && -amount < limit);
}
"#;

fn run(source: &str) -> (proclang::ast::ast::Program, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let program = parse(tokens, &mut diagnostics);
    (program, diagnostics)
}

#[test]
fn test_valid_program_has_no_errors() {
    let (program, diagnostics) = run(PROGRAM);

    assert!(
        !diagnostics.has_errors(),
        "{}",
        diagnostics.render(PROGRAM, "inventory.proc")
    );
    assert!(!program.contains_error());

    let kinds: Vec<&str> = program
        .body
        .iter()
        .map(|stmt| match stmt {
            Stmt::EnumDeclaration(_) => "enum",
            Stmt::VariableDeclaration(_) => "variable",
            Stmt::ProcedureDeclaration(_) => "procedure",
            Stmt::HandlerDeclaration(_) => "handler",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["enum", "variable", "variable", "procedure", "handler"]
    );
    assert_eq!(program.comments.len(), 2);
}

#[test]
fn test_program_serializes_with_variant_tags() {
    let (program, _) = run(PROGRAM);
    let json: Value = serde_json::to_value(&program).unwrap();

    assert_eq!(json["body"][0]["type"], "EnumDeclaration");
    assert_eq!(json["body"][0]["members"][2], "Misc");
    assert_eq!(json["body"][1]["access"], "Public");
    assert_eq!(json["body"][2]["assigned_value"]["value"]["kind"], "Number");
    assert_eq!(json["body"][2]["assigned_value"]["value"]["value"], 64.0);
    assert_eq!(json["body"][3]["decorators"][1]["name"], "retries");
    assert_eq!(json["comments"][0]["text"], "Inventory handling");
}

#[test]
fn test_tokens_serialize() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("a >= 1", &mut diagnostics);
    let json: Value = serde_json::to_value(&tokens).unwrap();

    assert_eq!(json[1]["type"], "Unit");
    assert_eq!(json[1]["kind"], "GreaterEquals");
    assert_eq!(json[2]["value"], "1");
    assert_eq!(json[2]["span"]["start"]["column"], 6);
    assert_eq!(json[3]["kind"], "Eof");
}

#[test]
fn test_errors_from_both_stages_are_collected() {
    let source = "temp a: Number = \"open;\nproc f(x: Number y: Number) -> Number {}\n";
    let (_, diagnostics) = run(source);

    assert_eq!(diagnostics.from_stage(Stage::Lexer).count(), 1);
    assert!(diagnostics.from_stage(Stage::Parser).count() >= 1);
}

#[test]
fn test_recovery_continues_after_bad_statement() {
    let source = "temp a: Number = 1 +;\n) enum E { A }\ntemp b: Number = 2;";
    let (program, diagnostics) = run(source);

    assert_eq!(diagnostics.len(), 2);
    assert!(program
        .body
        .iter()
        .any(|stmt| matches!(stmt, Stmt::EnumDeclaration(e) if e.name == "E")));
    assert!(matches!(
        program.body.last(),
        Some(Stmt::VariableDeclaration(v)) if v.identifier == "b"
    ));
}

#[test]
fn test_rendered_diagnostic() {
    let source = "temp a: Number = 1;\nproc f(x: Number y: Number) -> Number {}";
    let (_, diagnostics) = run(source);

    let rendered = diagnostics.render(source, "main.proc");
    assert_eq!(
        rendered.lines().collect::<Vec<_>>(),
        vec![
            "Error[parser]: expected ',' or ')', found \"y\"",
            "-> main.proc:2:18",
            "  |",
            "2 | proc f(x: Number y: Number) -> Number {}",
            "  |                  ^",
        ]
    );
}

#[test]
fn test_pipeline_is_deterministic() {
    let (first, first_diagnostics) = run(PROGRAM);
    let (second, second_diagnostics) = run(PROGRAM);

    assert_eq!(first, second);
    assert_eq!(first_diagnostics.len(), second_diagnostics.len());
}
