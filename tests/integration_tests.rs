// tests/integration_tests.rs
//
// End-to-end compilation: query string in, query tree out.

use cardq::{
    BooleanKind, DiagnosticKind, FieldOperation, Reducer, RuleKind, SearchField, SearchItem,
    compile, compile_with_diagnostics, parse_tree,
};

fn field(field: SearchField, operation: FieldOperation, value: &str) -> SearchItem {
    SearchItem::field(field, operation, value)
}

fn eq(f: SearchField, value: &str) -> SearchItem {
    field(f, FieldOperation::Eq, value)
}

fn name(value: &str) -> SearchItem {
    eq(SearchField::Name, value)
}

fn and(children: Vec<SearchItem>) -> SearchItem {
    SearchItem::Boolean {
        kind: BooleanKind::And,
        children,
    }
}

fn or(children: Vec<SearchItem>) -> SearchItem {
    SearchItem::Boolean {
        kind: BooleanKind::Or,
        children,
    }
}

fn not(child: SearchItem) -> SearchItem {
    SearchItem::Not {
        child: Box::new(child),
    }
}

const QUERIES: &[&str] = &[
    "blood",
    "t:flame",
    "t:flame OR t:stun",
    "t:flame AND t:stun",
    "blood r:stun",
    "NOT t:flame",
    "t:flame OR NOT t:stun",
    "\"Destroy all cards\"",
    "blood OR (r:stun a:enchantress)",
    "(a b) c",
    "(a OR b) OR c",
    "NOT a b",
    "-(t:flame OR t:stun) f>=2",
    "a b c OR d e OR f",
    "t: OR zz:x",
    "r!='draw a card' artist<\"Q\"",
    "((((deep))))",
    "Urza's tower",
    "name:Jace's -t:flame t:-flame",
];

// ============================================================================
// Bare Terms
// ============================================================================

#[test]
fn test_bare_words_search_name() {
    for w in ["blood", "Éclair", "half-elf", "2/2", "-5"] {
        assert_eq!(compile(w).unwrap(), name(w), "Failed for input: {}", w);
    }
}

#[test]
fn test_quoted_phrase_is_stripped() {
    assert_eq!(
        compile("\"Destroy all cards\"").unwrap(),
        name("Destroy all cards")
    );
    assert_eq!(compile("'Shadow Rift'").unwrap(), name("Shadow Rift"));
}

#[test]
fn test_possessive_name_is_one_word() {
    assert_eq!(
        compile("Urza's tower").unwrap(),
        and(vec![name("Urza's"), name("tower")])
    );
}

#[test]
fn test_quoted_keyword_is_a_term() {
    assert_eq!(compile("\"or\"").unwrap(), name("or"));
}

// ============================================================================
// Field Predicates
// ============================================================================

#[test]
fn test_field_predicate() {
    assert_eq!(compile("t:flame").unwrap(), eq(SearchField::Type, "flame"));
}

#[test]
fn test_field_aliases() {
    let cases = vec![
        ("a:enchantress", SearchField::Archetype),
        ("class:enchantress", SearchField::Archetype),
        ("artist:enchantress", SearchField::Artist),
        ("ft:enchantress", SearchField::Flavor),
        ("format:enchantress", SearchField::Format),
        ("o:enchantress", SearchField::Rules),
        ("TYPE:enchantress", SearchField::Type),
    ];

    for (input, expected) in cases {
        assert_eq!(
            compile(input).unwrap(),
            eq(expected, "enchantress"),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_comparison_operators() {
    let cases = vec![
        ("f>=2", FieldOperation::Gte),
        ("f<=2", FieldOperation::Lte),
        ("f!=2", FieldOperation::Neq),
        ("f>2", FieldOperation::Gt),
        ("f<2", FieldOperation::Lt),
        ("f=2", FieldOperation::Eq),
        ("f:2", FieldOperation::Eq),
    ];

    for (input, expected) in cases {
        assert_eq!(
            compile(input).unwrap(),
            field(SearchField::Format, expected, "2"),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_quoted_field_value() {
    assert_eq!(
        compile("r:\"draw a card\"").unwrap(),
        eq(SearchField::Rules, "draw a card")
    );
}

#[test]
fn test_minus_after_operator_is_part_of_value() {
    assert_eq!(compile("t:-flame").unwrap(), eq(SearchField::Type, "-flame"));
    assert_eq!(
        compile("t:-flame -t:stun").unwrap(),
        and(vec![
            eq(SearchField::Type, "-flame"),
            not(eq(SearchField::Type, "stun")),
        ])
    );
}

#[test]
fn test_unknown_field_degrades() {
    assert_eq!(
        compile("cmc<=3").unwrap(),
        field(SearchField::Unknown, FieldOperation::Lte, "3")
    );
}

#[test]
fn test_missing_value_defaults() {
    assert_eq!(
        compile("t:").unwrap(),
        eq(SearchField::Type, "Unknown Value")
    );
    assert_eq!(
        compile("t: OR zz:x").unwrap(),
        or(vec![
            eq(SearchField::Type, "Unknown Value"),
            eq(SearchField::Unknown, "x"),
        ])
    );
}

// ============================================================================
// Boolean Structure
// ============================================================================

#[test]
fn test_or() {
    assert_eq!(
        compile("t:flame OR t:stun").unwrap(),
        or(vec![eq(SearchField::Type, "flame"), eq(SearchField::Type, "stun")])
    );
}

#[test]
fn test_explicit_and() {
    assert_eq!(
        compile("t:flame AND t:stun").unwrap(),
        and(vec![eq(SearchField::Type, "flame"), eq(SearchField::Type, "stun")])
    );
}

#[test]
fn test_implicit_and() {
    assert_eq!(
        compile("blood r:stun").unwrap(),
        and(vec![name("blood"), eq(SearchField::Rules, "stun")])
    );
}

#[test]
fn test_implicit_and_matches_explicit() {
    assert_eq!(
        compile("blood r:stun").unwrap(),
        compile("blood AND r:stun").unwrap()
    );
}

#[test]
fn test_negation() {
    assert_eq!(
        compile("NOT t:flame").unwrap(),
        not(eq(SearchField::Type, "flame"))
    );
    assert_eq!(
        compile("-t:flame").unwrap(),
        compile("NOT t:flame").unwrap()
    );
}

#[test]
fn test_or_with_negation() {
    assert_eq!(
        compile("t:flame OR NOT t:stun").unwrap(),
        or(vec![
            eq(SearchField::Type, "flame"),
            not(eq(SearchField::Type, "stun"))
        ])
    );
}

#[test]
fn test_group_inside_or() {
    assert_eq!(
        compile("blood OR (r:stun a:enchantress)").unwrap(),
        or(vec![
            name("blood"),
            and(vec![
                eq(SearchField::Rules, "stun"),
                eq(SearchField::Archetype, "enchantress")
            ])
        ])
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        compile("a b c OR d e OR f").unwrap(),
        or(vec![
            and(vec![name("a"), name("b"), name("c")]),
            and(vec![name("d"), name("e")]),
            name("f"),
        ])
    );
}

#[test]
fn test_redundant_parentheses_collapse() {
    assert_eq!(compile("((((deep))))").unwrap(), name("deep"));
    assert_eq!(compile("(a OR b)").unwrap(), or(vec![name("a"), name("b")]));
}

#[test]
fn test_negated_group() {
    assert_eq!(
        compile("-(t:flame OR t:stun)").unwrap(),
        not(or(vec![
            eq(SearchField::Type, "flame"),
            eq(SearchField::Type, "stun")
        ]))
    );
}

// ============================================================================
// Group or Negation Followed by a Sibling
// ============================================================================

#[test]
fn test_group_then_term_is_flattened_in_order() {
    let compilation = compile_with_diagnostics("(a b) c").unwrap();
    assert_eq!(
        compilation.item,
        and(vec![and(vec![name("a"), name("b")]), name("c")])
    );
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(
        compilation.diagnostics[0].kind,
        DiagnosticKind::AmbiguousAggregation
    );
    assert_eq!(compilation.diagnostics[0].rule, RuleKind::AndExpression);
}

#[test]
fn test_nested_or_is_not_merged() {
    let compilation = compile_with_diagnostics("(a OR b) OR c").unwrap();
    assert_eq!(
        compilation.item,
        or(vec![or(vec![name("a"), name("b")]), name("c")])
    );
    assert_eq!(compilation.diagnostics[0].rule, RuleKind::OrExpression);
}

#[test]
fn test_negation_then_term() {
    let compilation = compile_with_diagnostics("NOT a b").unwrap();
    assert_eq!(compilation.item, and(vec![not(name("a")), name("b")]));
    assert_eq!(compilation.diagnostics.len(), 1);
}

#[test]
fn test_term_then_group_needs_no_diagnostic() {
    let compilation = compile_with_diagnostics("c (a b)").unwrap();
    assert_eq!(
        compilation.item,
        and(vec![name("c"), and(vec![name("a"), name("b")])])
    );
    assert!(compilation.diagnostics.is_empty());
}

#[test]
fn test_once_grouped_later_siblings_append() {
    let compilation = compile_with_diagnostics("(a OR b) c d").unwrap();
    assert_eq!(
        compilation.item,
        and(vec![or(vec![name("a"), name("b")]), name("c"), name("d")])
    );
    assert_eq!(compilation.diagnostics.len(), 1);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_output_is_well_formed() {
    for query in QUERIES {
        let item = compile(query).unwrap();
        assert!(item.is_well_formed(), "Failed for input: {} => {:?}", query, item);
    }
}

#[test]
fn test_reduction_is_idempotent() {
    for query in QUERIES {
        let tree = parse_tree(query).unwrap();
        let mut reducer = Reducer::new();
        let first = reducer.reduce(&tree);
        let second = reducer.reduce(&tree);
        assert_eq!(first, second, "Failed for input: {}", query);
        assert_eq!(first, Reducer::new().reduce(&tree));
    }
}

#[test]
fn test_canonical_text_recompiles_to_same_tree() {
    for query in QUERIES {
        let item = compile(query).unwrap();
        let canonical = item.to_string();
        assert_eq!(
            compile(&canonical).unwrap(),
            item,
            "Failed for input: {} (canonical: {})",
            query,
            canonical
        );
    }
}

#[test]
fn test_canonical_text() {
    let cases = vec![
        ("blood r:stun", "blood AND r:stun"),
        ("-t:flame", "NOT t:flame"),
        ("class:x", "a:x"),
        ("\"Destroy all cards\"", "\"Destroy all cards\""),
        ("cmc<=3", "?<=3"),
        ("Urza's tower", "Urza's AND tower"),
        ("t:-flame", "t:\"-flame\""),
    ];

    for (input, expected) in cases {
        assert_eq!(compile(input).unwrap().to_string(), expected, "Failed for input: {}", input);
    }
}
