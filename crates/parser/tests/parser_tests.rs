//! Integration tests for the Pratt parser: precedence, statement shapes,
//! the for-loop probe, ambiguity guards, and error accumulation.

use std::collections::HashSet;

use singlish_parser::ast::*;
use singlish_parser::{lex, Dictionary, Parser};

fn parse_with(dict: &Dictionary, source: &str) -> Program {
    let keywords: HashSet<String> = dict.surface_keys().map(str::to_owned).collect();
    let (tokens, diagnostics) = lex(source, &keywords);
    assert!(diagnostics.is_empty(), "lex diagnostics: {diagnostics:?}");

    let mut parser = Parser::new(tokens, dict);
    let program = parser.parse_program();
    assert!(!parser.has_errors(), "parse errors: {:?}", parser.errors());
    program
}

fn parse_allowing_errors(dict: &Dictionary, source: &str) -> (Program, Vec<String>) {
    let keywords: HashSet<String> = dict.surface_keys().map(str::to_owned).collect();
    let (tokens, diagnostics) = lex(source, &keywords);
    assert!(diagnostics.is_empty(), "lex diagnostics: {diagnostics:?}");

    let mut parser = Parser::new(tokens, dict);
    let program = parser.parse_program();
    let messages = parser
        .errors()
        .iter()
        .map(|diag| diag.message.clone())
        .collect();
    (program, messages)
}

fn first_expr(program: &Program) -> &Expr {
    match &program.statements[0] {
        Stmt::Expr(stmt) => &stmt.expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn precedence_nests_products_under_sums() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "x = 1 + 2 * 3");
    assert_eq!(first_expr(&program).to_string(), "(x = (1 + (2 * 3)))");

    let program = parse_with(&dict, "y = (1 + 2) * 3");
    assert_eq!(first_expr(&program).to_string(), "(y = ((1 + 2) * 3))");
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "a + b * c < d");
    assert_eq!(first_expr(&program).to_string(), "((a + (b * c)) < d)");
}

#[test]
fn keyword_aliases_for_logic_operators() {
    let dict = Dictionary::with_defaults();
    // `somemore` is && and binds tighter than `or` (||).
    let program = parse_with(&dict, "a or b somemore c");
    assert_eq!(first_expr(&program).to_string(), "(a || (b && c))");
}

#[test]
fn assignment_binds_loosest() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "x := a < b");
    assert_eq!(first_expr(&program).to_string(), "(x := (a < b))");

    let program = parse_with(&dict, "x += 1 + 2");
    assert_eq!(first_expr(&program).to_string(), "(x += (1 + 2))");
}

#[test]
fn let_with_pointer_type() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "kampung main\ngot x ki nombor");

    match &program.statements[1] {
        Stmt::Let(stmt) => {
            assert_eq!(stmt.names.len(), 1);
            assert_eq!(stmt.names[0].value, "x");
            assert_eq!(stmt.ty.as_ref().unwrap().value, "*int");
            assert!(stmt.value.is_none());
        }
        other => panic!("expected let statement, got {other:?}"),
    }
}

#[test]
fn let_with_map_and_chan_types() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "got m menu[tar]nombor\ngot c lobang<nombor>");

    match &program.statements[0] {
        Stmt::Let(stmt) => assert_eq!(stmt.ty.as_ref().unwrap().value, "map[string]int"),
        other => panic!("expected let statement, got {other:?}"),
    }
    match &program.statements[1] {
        Stmt::Let(stmt) => assert_eq!(stmt.ty.as_ref().unwrap().value, "chan int"),
        other => panic!("expected let statement, got {other:?}"),
    }
}

#[test]
fn range_form_binds_two_variables() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "loop k, v = all m { gong(k) }");

    match &program.statements[0] {
        Stmt::For(stmt) => match &stmt.header {
            ForHeader::Range {
                key,
                value,
                iterable,
            } => {
                assert_eq!(key.as_ref().unwrap().value, "k");
                assert_eq!(value.as_ref().unwrap().value, "v");
                assert_eq!(iterable.to_string(), "m");
                assert_eq!(stmt.body.statements.len(), 1);
            }
            other => panic!("expected range header, got {other:?}"),
        },
        other => panic!("expected for statement, got {other:?}"),
    }
}

#[test]
fn c_style_for_keeps_init_condition_post() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "loop got i = 0; i < 3; i++ { gong(i) }");

    match &program.statements[0] {
        Stmt::For(stmt) => match &stmt.header {
            ForHeader::CStyle {
                init,
                condition,
                post,
            } => {
                assert!(matches!(init.as_deref(), Some(Stmt::Let(_))));
                assert_eq!(condition.as_ref().unwrap().to_string(), "(i < 3)");
                match post.as_deref() {
                    Some(Stmt::Expr(stmt)) => {
                        assert!(matches!(stmt.expr, Expr::IncDec(_)));
                    }
                    other => panic!("expected inc/dec post, got {other:?}"),
                }
            }
            other => panic!("expected C-style header, got {other:?}"),
        },
        other => panic!("expected for statement, got {other:?}"),
    }
}

#[test]
fn while_and_infinite_loops() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "loop x < 3 { gong(x) }\nloop { gong(1) }");

    match &program.statements[0] {
        Stmt::For(stmt) => assert!(matches!(stmt.header, ForHeader::While(_))),
        other => panic!("expected for statement, got {other:?}"),
    }
    match &program.statements[1] {
        Stmt::For(stmt) => assert!(matches!(stmt.header, ForHeader::Loop)),
        other => panic!("expected for statement, got {other:?}"),
    }
}

#[test]
fn else_if_chains_nest() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "nasi x < 1 { } den nasi x < 2 { } den { }");

    match &program.statements[0] {
        Stmt::If(stmt) => match stmt.alternative.as_deref() {
            Some(Stmt::If(nested)) => {
                assert!(matches!(nested.alternative.as_deref(), Some(Stmt::Block(_))));
            }
            other => panic!("expected nested if, got {other:?}"),
        },
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn brace_after_condition_opens_the_body() {
    let dict = Dictionary::with_defaults();
    // `x` is the whole condition; `{` starts the block even though a
    // composite literal would otherwise parse.
    let program = parse_with(&dict, "nasi x { y = Foo{1} }");

    match &program.statements[0] {
        Stmt::If(stmt) => {
            assert!(matches!(stmt.condition, Expr::Ident(_)));
            assert_eq!(stmt.consequence.statements.len(), 1);
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn index_and_slice_forms() {
    let dict = Dictionary::with_defaults();

    let program = parse_with(&dict, "a[1]");
    assert!(matches!(first_expr(&program), Expr::Index(_)));

    for (source, rendered) in [
        ("a[1:2]", "(a[1:2])"),
        ("a[:2]", "(a[:2])"),
        ("a[1:]", "(a[1:])"),
        ("a[:]", "(a[:])"),
    ] {
        let program = parse_with(&dict, source);
        match first_expr(&program) {
            Expr::Slice(_) => {}
            other => panic!("expected slice for {source}, got {other:?}"),
        }
        assert_eq!(first_expr(&program).to_string(), rendered);
    }
}

#[test]
fn type_assertion_after_dot_paren() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "x.(nombor)");

    match first_expr(&program) {
        Expr::TypeAssert(assert) => {
            assert_eq!(assert.ty.to_string(), "int");
        }
        other => panic!("expected type assertion, got {other:?}"),
    }
}

#[test]
fn struct_fields_carry_types_and_tags() {
    let dict = Dictionary::with_defaults();
    let source = "pattern Config barang {\n\tHost tar \"json:\\\"host\\\"\"\n\tPort nombor \"json:\\\"port\\\"\"\n}";
    let program = parse_with(&dict, source);

    match &program.statements[0] {
        Stmt::Type(stmt) => {
            assert_eq!(stmt.name.value, "Config");
            assert!(!stmt.is_alias);
            match &stmt.value {
                Expr::Struct(lit) => {
                    assert_eq!(lit.fields.len(), 2);
                    assert_eq!(lit.fields[0].name.as_ref().unwrap().value, "Host");
                    assert_eq!(lit.fields[0].ty.as_ref().unwrap().to_string(), "string");
                    assert_eq!(
                        lit.fields[0].tag.as_ref().unwrap().value,
                        "\"json:\\\"host\\\"\""
                    );
                    assert_eq!(lit.fields[1].name.as_ref().unwrap().value, "Port");
                    assert_eq!(lit.fields[1].ty.as_ref().unwrap().to_string(), "int");
                }
                other => panic!("expected struct literal, got {other:?}"),
            }
        }
        other => panic!("expected type statement, got {other:?}"),
    }
}

#[test]
fn type_alias_records_the_equals_sign() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "pattern ID = nombor");

    match &program.statements[0] {
        Stmt::Type(stmt) => {
            assert!(stmt.is_alias);
            assert_eq!(stmt.value.to_string(), "int");
        }
        other => panic!("expected type statement, got {other:?}"),
    }
}

#[test]
fn receiver_methods_parse() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "action (s ki Server) Start() { }");

    match &program.statements[0] {
        Stmt::Function(stmt) => {
            let receiver = stmt.receiver.as_ref().unwrap();
            assert_eq!(receiver.name.as_ref().unwrap().value, "s");
            assert_eq!(receiver.ty.as_ref().unwrap().to_string(), "*Server");
            assert_eq!(stmt.name.value, "Start");
        }
        other => panic!("expected function statement, got {other:?}"),
    }
}

#[test]
fn grouped_parameters_back_fill_their_type() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "action add(a, b nombor) nombor { balek a + b }");

    match &program.statements[0] {
        Stmt::Function(stmt) => {
            assert_eq!(stmt.params.len(), 2);
            assert_eq!(stmt.params[0].ty.as_ref().unwrap().to_string(), "int");
            assert_eq!(stmt.params[1].ty.as_ref().unwrap().to_string(), "int");
            assert_eq!(stmt.ret.as_ref().unwrap().to_string(), "int");
        }
        other => panic!("expected function statement, got {other:?}"),
    }
}

#[test]
fn lone_parameter_without_type_is_an_unnamed_type() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "action log(tar) { }");

    match &program.statements[0] {
        Stmt::Function(stmt) => {
            assert_eq!(stmt.params.len(), 1);
            assert!(stmt.params[0].name.is_none());
            assert_eq!(stmt.params[0].ty.as_ref().unwrap().to_string(), "tar");
        }
        other => panic!("expected function statement, got {other:?}"),
    }
}

#[test]
fn grouped_return_types_keep_their_text() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "action open(name tar) (tar, salah) { balek name, kosong }");

    match &program.statements[0] {
        Stmt::Function(stmt) => {
            assert_eq!(stmt.ret.as_ref().unwrap().to_string(), "(string, error)");
        }
        other => panic!("expected function statement, got {other:?}"),
    }
}

#[test]
fn switch_cases_and_default() {
    let dict = Dictionary::with_defaults();
    let source = "see_how x {\nsay 1, 2:\ngong(1)\nanyhow:\ngong(2)\n}";
    let program = parse_with(&dict, source);

    match &program.statements[0] {
        Stmt::Switch(stmt) => {
            assert!(stmt.scrutinee.is_some());
            assert_eq!(stmt.cases.len(), 2);
            assert_eq!(stmt.cases[0].values.len(), 2);
            assert!(!stmt.cases[0].is_default);
            assert_eq!(stmt.cases[0].body.statements.len(), 1);
            assert!(stmt.cases[1].is_default);
        }
        other => panic!("expected switch statement, got {other:?}"),
    }
}

#[test]
fn select_cases_cover_send_and_receive() {
    let dict = Dictionary::with_defaults();
    let source = "tikam {\nsay x := catch c:\ngong(x)\nsay ch <- 1:\ngong(1)\nanyhow:\ngong(0)\n}";
    let program = parse_with(&dict, source);

    match &program.statements[0] {
        Stmt::Select(stmt) => {
            assert_eq!(stmt.cases.len(), 3);

            match stmt.cases[0].comm.as_deref() {
                Some(Stmt::Expr(comm)) => {
                    assert_eq!(comm.expr.to_string(), "(x := (<-c))");
                }
                other => panic!("expected comm clause, got {other:?}"),
            }
            match stmt.cases[1].comm.as_deref() {
                Some(Stmt::Expr(comm)) => {
                    assert_eq!(comm.expr.to_string(), "(ch <- 1)");
                }
                other => panic!("expected comm clause, got {other:?}"),
            }
            assert!(stmt.cases[2].is_default);
        }
        other => panic!("expected select statement, got {other:?}"),
    }
}

#[test]
fn grouped_imports_collect_every_path() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "kampung main\ndapao (\n\"fmt\"\n\"os\"\n)");

    match &program.statements[1] {
        Stmt::Import(stmt) => {
            let paths: Vec<&str> = stmt.paths.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(paths, vec!["\"fmt\"", "\"os\""]);
        }
        other => panic!("expected import statement, got {other:?}"),
    }
}

#[test]
fn channel_send_sugar_parses_as_dot_receive() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "ch.pass(42)");

    match first_expr(&program) {
        Expr::Infix(infix) => {
            assert_eq!(infix.operator, ".");
            assert!(matches!(infix.right.as_ref(), Expr::Prefix(p) if p.operator == "<-"));
        }
        other => panic!("expected dot infix, got {other:?}"),
    }
}

#[test]
fn misplaced_package_statement_is_diagnosed() {
    let dict = Dictionary::with_defaults();
    let (_, messages) = parse_allowing_errors(&dict, "gong(1)\nkampung main");
    assert!(
        messages
            .iter()
            .any(|m| m.contains("package statement must be the first statement")),
        "{messages:?}"
    );

    let (_, messages) = parse_allowing_errors(&dict, "kampung main\nkampung other");
    assert!(
        messages.iter().any(|m| m.contains("duplicate package")),
        "{messages:?}"
    );
}

#[test]
fn go_requires_a_call() {
    let dict = Dictionary::with_defaults();
    let (program, messages) = parse_allowing_errors(&dict, "chiong x");
    assert!(program.statements.is_empty());
    assert!(
        messages
            .iter()
            .any(|m| m.contains("expected function call after go")),
        "{messages:?}"
    );
}

#[test]
fn errors_accumulate_and_parsing_continues() {
    let dict = Dictionary::with_defaults();
    let (program, messages) = parse_allowing_errors(&dict, "got = 5\ngot x = 1");

    assert!(!messages.is_empty());
    assert!(
        messages[0].contains("expected next token to be identifier"),
        "{messages:?}"
    );
    // The second declaration still parses.
    assert!(program
        .statements
        .iter()
        .any(|stmt| matches!(stmt, Stmt::Let(s) if s.names.first().is_some_and(|n| n.value == "x"))));
}

#[test]
fn integer_overflow_is_reported() {
    let dict = Dictionary::with_defaults();
    let (_, messages) = parse_allowing_errors(&dict, "got x = 99999999999999999999");
    assert!(
        messages
            .iter()
            .any(|m| m.contains("as integer")),
        "{messages:?}"
    );
}

#[test]
fn variadic_call_argument_keeps_its_text() {
    let dict = Dictionary::with_defaults();
    let program = parse_with(&dict, "sum(xs...)");

    match first_expr(&program) {
        Expr::Call(call) => {
            assert_eq!(call.arguments[0].to_string(), "xs...");
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn surface_and_canonical_sources_yield_the_same_tree_shape() {
    let dict = Dictionary::with_defaults();
    let surface = parse_with(&dict, "kampung main\nnasi can { balek }");
    let canonical = parse_with(&dict, "package main\nif true { return }");

    assert_eq!(surface.statements.len(), canonical.statements.len());
    assert_eq!(
        surface.statements[1].to_string(),
        canonical.statements[1].to_string()
    );
}
