//! End-to-end properties of the token pipeline

use ldl_tokens::{
    detect_format, generate, generate_named, merge_documents, parse, parse_document, to_json, validate,
    ColorToken, ColorValue, GeneratorError, GeneratorOptions, InputFormat, IssueCode, LdlError, OutputFormat,
    Severity, TokenCategory, TokenDocument, TokenSet,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn sample_document() -> TokenDocument {
    let mut dark = TokenSet::new();
    dark.colors.insert("primary", ColorToken::literal("#99aaff"));
    dark.colors.insert("surface", ColorToken::literal("#111111"));

    let mut doc = TokenDocument::new()
        .with_name("Acme")
        .with_color(
            "primary",
            ColorToken::with_foreground(ColorValue::literal("#3366ff"), ColorToken::literal("#ffffff")),
        )
        .with_color("surface", ColorToken::literal("#ffffff"))
        .with_color("link", ColorToken::reference("primary"))
        .with_token(TokenCategory::FontFamilies, "sans", "Inter, sans-serif")
        .with_token(TokenCategory::FontSizes, "sm", "0.875rem")
        .with_token(TokenCategory::FontWeights, "bold", "700")
        .with_token(TokenCategory::LineHeights, "normal", "1.5")
        .with_token(TokenCategory::Spacing, "1", "4px")
        .with_token(TokenCategory::Radii, "md", "6px")
        .with_token(TokenCategory::Shadows, "sm", "0 1px 2px #0000001a")
        .with_token(TokenCategory::Durations, "fast", "150ms")
        .with_token(TokenCategory::Easing, "standard", "cubic-bezier(0.4, 0, 0.2, 1)")
        .with_mode("dark", dark);
    doc.description = Some("Brand tokens".to_string());
    doc
}

#[test]
fn json_output_round_trips() {
    let doc = sample_document();
    let json = to_json(&doc).unwrap();

    let parsed = parse(&json, None).unwrap();
    assert_eq!(parsed.format, InputFormat::Ldl);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.document, doc);
    assert_eq!(to_json(&parsed.document).unwrap(), json);
}

#[test]
fn alias_shaped_literal_cannot_pass_as_valid() {
    let doc = TokenDocument::new()
        .with_color("brand", ColorToken::literal("#3366ff"))
        .with_color("accent", ColorToken::literal("{brand}"));
    assert!(!validate(&doc).valid);

    // Once written as a reference it is valid and survives the round trip.
    let fixed = TokenDocument::new()
        .with_color("brand", ColorToken::literal("#3366ff"))
        .with_color("accent", ColorToken::reference("brand"));
    assert!(validate(&fixed).valid);
    let parsed = parse(&to_json(&fixed).unwrap(), None).unwrap();
    assert_eq!(parsed.document, fixed);
}

#[test]
fn dtcg_output_round_trips() {
    let doc = sample_document();
    let exported = generate(&doc, OutputFormat::Dtcg, &GeneratorOptions::default()).unwrap();

    let parsed = parse(&exported.code, None).unwrap();
    assert_eq!(parsed.format, InputFormat::Dtcg);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.document, doc);
}

#[test]
fn detection_is_deterministic() {
    let inputs = [
        json!({"version": "1.0", "colors": {"primary": "#3366ff"}}),
        json!({"color": {"primary": {"$value": "#3366ff", "$type": "color"}}}),
        json!({"color": {"primary": {"value": "#3366ff", "type": "color"}}}),
        json!({"hello": "world"}),
    ];
    let expected = [
        InputFormat::Ldl,
        InputFormat::Dtcg,
        InputFormat::TokensStudio,
        InputFormat::Unknown,
    ];
    for (input, format) in inputs.iter().zip(expected) {
        assert_eq!(detect_format(input), format);
        assert_eq!(detect_format(input), detect_format(input));
    }
}

#[test]
fn empty_document_is_valid_and_generates() {
    let doc = TokenDocument::new();
    let result = validate(&doc);
    assert!(result.valid);
    assert!(result.issues.is_empty());

    for format in OutputFormat::all() {
        assert!(generate(&doc, *format, &GeneratorOptions::default()).is_ok());
    }
}

#[test]
fn duplicate_names_are_errors() {
    let mut doc = TokenDocument::new();
    doc.tokens.colors.push("primary", ColorToken::literal("#3366ff"));
    doc.tokens.colors.push("primary", ColorToken::literal("#ff3366"));

    let result = validate(&doc);
    assert!(!result.valid);
    assert_eq!(result.issues.len(), 1);
    let issue = &result.issues[0];
    assert_eq!(issue.code, IssueCode::DuplicateName);
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.path, "colors.primary");
}

#[test]
fn unresolved_foreground_reference_is_an_error() {
    let doc = TokenDocument::new().with_color(
        "primary",
        ColorToken::with_foreground(ColorValue::literal("#3366ff"), ColorToken::reference("missing")),
    );

    let errors = ldl_tokens::get_errors(&doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, IssueCode::UnresolvedReference);
    assert_eq!(errors[0].path, "colors.primary.foreground");
}

#[test]
fn dtcg_color_converts_and_generates_css() {
    let input = json!({"color": {"primary": {"$value": "#3366ff", "$type": "color"}}});
    let doc = parse_document(&input, None).unwrap();
    assert_eq!(
        doc.tokens.colors.get("primary"),
        Some(&ColorToken::literal("#3366ff"))
    );

    let options = GeneratorOptions::default().without_header();
    let css = generate(&doc, OutputFormat::Css, &options).unwrap();
    assert_eq!(css.code, ":root {\n  --ldl-color-primary: #3366ff;\n}\n");
    assert_eq!(css.filename, "tokens.css");
}

#[test]
fn figma_modes_reach_css_rules() {
    let input = json!({
        "meta": {
            "variableCollections": {
                "VariableCollectionId:1": {
                    "id": "VariableCollectionId:1",
                    "modes": [{"modeId": "1:0", "name": "Light"}, {"modeId": "1:1", "name": "Dark"}],
                    "defaultModeId": "1:0"
                }
            },
            "variables": {
                "VariableID:1": {
                    "name": "color/surface",
                    "resolvedType": "COLOR",
                    "variableCollectionId": "VariableCollectionId:1",
                    "valuesByMode": {
                        "1:0": {"r": 1, "g": 1, "b": 1, "a": 1},
                        "1:1": {"r": 0, "g": 0, "b": 0, "a": 1}
                    }
                }
            }
        }
    });
    let parsed = parse(&input, None).unwrap();
    assert_eq!(parsed.format, InputFormat::FigmaVariables);

    let options = GeneratorOptions::default().without_header();
    let css = generate(&parsed.document, OutputFormat::Css, &options).unwrap();
    assert_eq!(
        css.code,
        ":root {\n  --ldl-color-surface: #ffffff;\n}\n\n[data-theme=\"Dark\"] {\n  --ldl-color-surface: #000000;\n}\n"
    );
}

#[test]
fn generation_is_deterministic() {
    let doc = sample_document();
    let options = GeneratorOptions::default();
    for format in OutputFormat::all() {
        let first = generate(&doc, *format, &options).unwrap();
        let second = generate(&doc, *format, &options).unwrap();
        assert_eq!(first, second, "{format} output differs between runs");
    }
}

#[test]
fn later_documents_win_when_merging() {
    let base = sample_document();
    let overlay = TokenDocument::new()
        .with_color("surface", ColorToken::literal("#fafafa"))
        .with_token(TokenCategory::Spacing, "2", "8px");

    let merged = merge_documents(&base, [&overlay]);
    assert_eq!(merged.tokens.resolve_color("surface"), Some("#fafafa"));
    assert_eq!(merged.tokens.resolve_color("link"), Some("#3366ff"));
    assert_eq!(merged.tokens.spacing.names().collect::<Vec<_>>(), vec!["1", "2"]);
    assert_eq!(merged.modes, base.modes);
    assert!(validate(&merged).valid);
}

#[test]
fn unsupported_format_is_an_error() {
    let doc = sample_document();
    let err = generate_named(&doc, "xml", &GeneratorOptions::default()).unwrap_err();
    assert!(matches!(err, GeneratorError::UnsupportedFormat(ref name) if name == "xml"));
}

fn export_css(input: &str) -> Result<String, LdlError> {
    let document = parse_document(input, None)?;
    let options = GeneratorOptions::default().without_header();
    Ok(generate_named(&document, "css", &options)?.code)
}

#[test]
fn library_errors_share_one_type() {
    let css = export_css(r##"{"colors": {"primary": "#3366ff"}}"##).unwrap();
    assert_eq!(css, ":root {\n  --ldl-color-primary: #3366ff;\n}\n");

    let err = export_css("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, LdlError::Parse(_)), "{err:?}");
}

#[test]
fn validation_issues_serialize_for_tooling() {
    let doc = TokenDocument::new().with_token(TokenCategory::Spacing, "1", "4");
    let result = validate(&doc);
    assert!(result.valid);
    let issues: Value = serde_json::to_value(&result.issues).unwrap();
    assert_eq!(
        issues,
        json!([{
            "severity": "warning",
            "path": "spacing.1",
            "message": "`4` has no unit, expected a length unit",
            "code": "missing-unit"
        }])
    );
}

#[test]
fn core_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenDocument>();
    assert_send_sync::<GeneratorOptions>();
    assert_send_sync::<ldl_tokens::ValidationResult>();
    assert_send_sync::<ldl_tokens::ParseResult>();
}
