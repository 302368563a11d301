//! End-to-end transpilation tests. Output bytes are the contract, so most
//! assertions compare exact strings.

use singlish_codegen::transpile;
use singlish_parser::Dictionary;

fn dict(entries: &[(&str, &str)]) -> Dictionary {
    Dictionary::from_pairs(entries.iter().copied())
}

#[test]
fn package_and_implicit_fmt_import() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\ngong(\"Hello\")", &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfmt.Println(\"Hello\")\n"
    );
}

#[test]
fn precedence_is_made_explicit() {
    let dict = dict(&[("kampung", "package"), ("dun_var", "var")]);
    let source = "kampung main\ndun_var x = 1 + 2 * 3;\ndun_var y = (1 + 2) * 3;";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nvar x = (1 + (2 * 3))\nvar y = ((1 + 2) * 3)\n"
    );
}

#[test]
fn pointer_type_via_ki() {
    let dict = dict(&[("kampung", "package"), ("tahan", "var"), ("nombor", "int")]);
    let got = transpile("kampung main\ntahan x ki nombor", &dict).unwrap();
    assert_eq!(got, "package main\n\nvar x *int\n");
}

#[test]
fn struct_fields_keep_their_tags() {
    let dict = dict(&[
        ("kampung", "package"),
        ("pattern", "type"),
        ("susun", "struct"),
        ("tar", "string"),
        ("nombor", "int"),
    ]);
    let source = "kampung main\npattern Config susun {\n\tHost tar \"json:\\\"host\\\"\"\n\tPort nombor \"json:\\\"port\\\"\"\n}";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\ntype Config struct {\n\tHost string \"json:\\\"host\\\"\"\n\tPort int \"json:\\\"port\\\"\"\n}\n"
    );
}

#[test]
fn unterminated_string_is_a_single_diagnostic() {
    let dict = Dictionary::with_defaults();
    let err = transpile("gong(\"hi\n", &dict).unwrap_err();

    assert_eq!(err.diagnostics.len(), 1);
    let diag = &err.diagnostics[0];
    assert_eq!(diag.message, "unterminated string literal");
    assert_eq!((diag.line, diag.column), (1, 6));
}

#[test]
fn range_form_with_two_variables() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\nloop k, v = all m { gong(k) }", &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfor k, v := range m {\n\tfmt.Println(k)\n}\n"
    );
}

#[test]
fn c_style_for_init_normalizes_to_short_declaration() {
    let dict = dict(&[
        ("kampung", "package"),
        ("loop", "for"),
        ("tahan", "var"),
        ("gong", "fmt.Println"),
    ]);
    let source = "kampung main\nloop tahan i = 0; i < 3; i++ { gong(i) }";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfor i := 0; i < 3; i++ {\n\tfmt.Println(i)\n}\n"
    );
    assert!(!got.contains("var"));
}

#[test]
fn missing_package_synthesizes_main() {
    let dict = Dictionary::with_defaults();
    let got = transpile("balek 5;", &dict).unwrap();
    assert_eq!(got, "package main\n\nreturn 5\n");
}

#[test]
fn explicit_import_is_not_duplicated() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\ndapao \"fmt\"\ngong(\"hi\")", &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfmt.Println(\"hi\")\n"
    );
}

#[test]
fn imports_are_sorted() {
    let dict = Dictionary::with_defaults();
    let got = transpile(
        "kampung main\ndapao \"os\"\ndapao \"errors\"\ngong(\"hi\")",
        &dict,
    )
    .unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"errors\"\n\t\"fmt\"\n\t\"os\"\n)\n\nfmt.Println(\"hi\")\n"
    );
}

#[test]
fn no_fmt_import_when_unused() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main", &dict).unwrap();
    assert_eq!(got, "package main\n\n");
    assert!(!got.contains("import"));
}

#[test]
fn function_with_alias_name_and_body() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\naction boss() {\ngong(\"hi\")\n}", &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n"
    );
}

#[test]
fn receiver_method_emission() {
    let dict = Dictionary::with_defaults();
    let got = transpile(
        "kampung main\naction (s ki Server) Addr() tar {\nbalek s.host\n}",
        &dict,
    )
    .unwrap();
    assert_eq!(
        got,
        "package main\n\nfunc (s *Server) Addr() string {\n\treturn s.host\n}\n"
    );
}

#[test]
fn channel_send_sugar_rewrites_to_a_send() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\nch.pass(42)", &dict).unwrap();
    assert_eq!(got, "package main\n\nch <- 42\n");
}

#[test]
fn go_and_defer_take_calls() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\nchiong worker()\nnanti cleanup()", &dict).unwrap();
    assert_eq!(got, "package main\n\ngo worker()\ndefer cleanup()\n");
}

#[test]
fn go_without_a_call_fails() {
    let dict = Dictionary::with_defaults();
    let err = transpile("kampung main\nchiong x", &dict).unwrap_err();
    assert!(err.diagnostics[0]
        .message
        .contains("expected function call after go"));
}

#[test]
fn switch_with_cases_and_default() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\nsee_how x {\nsay 1, 2:\ngong(1)\nanyhow:\ngong(2)\n}";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nswitch x {\ncase 1, 2:\n\tfmt.Println(1)\ndefault:\n\tfmt.Println(2)\n}\n"
    );
}

#[test]
fn select_with_receive_send_and_default() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\ntikam {\nsay x := catch c:\ngong(x)\nsay ch <- 1:\ngong(1)\nanyhow:\ngong(0)\n}";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nselect {\ncase x := (<-c):\n\tfmt.Println(x)\ncase ch <- 1:\n\tfmt.Println(1)\ndefault:\n\tfmt.Println(0)\n}\n"
    );
}

#[test]
fn slice_expressions_round_trip() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\ngot s = a[1:2]\ngot t = a[:]\ngot u = a[2:]\ngot w = a[:3]";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nvar s = a[1:2]\nvar t = a[:]\nvar u = a[2:]\nvar w = a[:3]\n"
    );
}

#[test]
fn type_alias_and_definition_differ() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\npattern ID = nombor\npattern Age nombor", &dict).unwrap();
    assert_eq!(got, "package main\n\ntype ID = int\ntype Age int\n");
}

#[test]
fn interface_type_emission() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\npattern Writer kaki {\nWrite(p tar) nombor\n}";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\ntype Writer interface {\n\tWrite(p string) int\n}\n"
    );
}

#[test]
fn function_literal_assignment() {
    let dict = Dictionary::with_defaults();
    let got = transpile(
        "kampung main\ngot f = action(x nombor) nombor { balek x }",
        &dict,
    )
    .unwrap();
    assert_eq!(
        got,
        "package main\n\nvar f = func(x int) int {\n\treturn x\n}\n"
    );
}

#[test]
fn composite_literals_and_key_values() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\ngot p = Point{X: 1, Y: 2}", &dict).unwrap();
    assert_eq!(got, "package main\n\nvar p = Point{X: 1, Y: 2}\n");
}

#[test]
fn variadic_arguments_keep_the_ellipsis() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\nsum(xs...)", &dict).unwrap();
    assert_eq!(got, "package main\n\nsum(xs...)\n");
}

#[test]
fn type_assertion_emission() {
    let dict = Dictionary::with_defaults();
    let got = transpile("kampung main\ngot n = v.(nombor)", &dict).unwrap();
    assert_eq!(got, "package main\n\nvar n = v.(int)\n");
}

#[test]
fn if_else_chains() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\nnasi x < 1 {\ngong(1)\n} den nasi x < 2 {\ngong(2)\n} den {\ngong(3)\n}";
    let got = transpile(source, &dict).unwrap();
    assert_eq!(
        got,
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nif x < 1 {\n\tfmt.Println(1)\n} else if x < 2 {\n\tfmt.Println(2)\n} else {\n\tfmt.Println(3)\n}\n"
    );
}

#[test]
fn surface_and_canonical_sources_produce_identical_output() {
    let dict = Dictionary::with_defaults();
    let surface = transpile("kampung main\nnasi can {\nbalek\n}", &dict).unwrap();
    let canonical = transpile("package main\nif true {\nreturn\n}", &dict).unwrap();
    assert_eq!(surface, canonical);
    assert_eq!(surface, "package main\n\nif true {\n\treturn\n}\n");
}

#[test]
fn transpilation_is_deterministic() {
    let dict = Dictionary::with_defaults();
    let source = "kampung main\ndapao \"os\"\nloop k, v = all m { gong(k) }";
    let first = transpile(source, &dict).unwrap();
    let second = transpile(source, &dict).unwrap();
    assert_eq!(first, second);
}

#[test]
fn transpile_error_display_counts_the_rest() {
    let dict = Dictionary::with_defaults();
    let err = transpile("got = 1\ngot = 2", &dict).unwrap_err();
    assert!(err.diagnostics.len() > 1);
    let display = err.to_string();
    assert!(display.contains("more errors"), "{display}");
}
