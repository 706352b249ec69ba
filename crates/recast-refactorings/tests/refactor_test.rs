//! End-to-end tests: parse a buffer, pick a refactoring from the registry,
//! commit it and check the buffer text and selection

use recast_core::{EditError, EditSession, EditorOptions, Selection, TextBuffer};
use recast_refactorings::{RefactoringContext, RefactoringRegistry};
use recast_syntax::parse;

/// Run refactoring `name` with the caret on the first occurrence of `caret_at`
fn run_at_caret(buffer: &mut TextBuffer, name: &str, caret_at: &str) -> Result<bool, EditError> {
    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let tree = parse(buffer.text());
    let caret = buffer.text().find(caret_at).expect("caret marker in source");
    let ctx = RefactoringContext::at_caret(&tree, &options, caret);
    let refactoring = registry.get(name).expect("registered refactoring");
    refactoring.refactor(&ctx, buffer)
}

fn run_with_selection(
    buffer: &mut TextBuffer,
    name: &str,
    selection: Selection,
) -> Result<bool, EditError> {
    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let tree = parse(buffer.text());
    let ctx = RefactoringContext::with_selection(&tree, &options, selection);
    assert!(registry.get(name).unwrap().accept(&ctx));
    registry.get(name).unwrap().refactor(&ctx, buffer)
}

#[test]
fn test_make_public_replaces_and_selects_keyword() {
    let mut buffer = TextBuffer::new("class C\n{\n    private void M() { }\n}\n");
    assert_eq!(run_at_caret(&mut buffer, "make_public", "M()"), Ok(true));
    assert_eq!(buffer.text(), "class C\n{\n    public void M() { }\n}\n");
    assert_eq!(buffer.selected_text(), "public");
    assert_eq!(buffer.caret(), buffer.selection().start);
    assert_eq!(buffer.version(), 1);
}

#[test]
fn test_make_private_inserts_and_puts_caret_after_keyword() {
    let mut buffer = TextBuffer::new("class C { int count; }");
    assert_eq!(run_at_caret(&mut buffer, "make_private", "count"), Ok(true));
    assert_eq!(buffer.text(), "class C { private int count; }");
    assert_eq!(buffer.selected_text(), "private");
    assert_eq!(buffer.caret(), buffer.selection().end);
}

#[test]
fn test_duplicate_accessibility_repaired() {
    let mut buffer = TextBuffer::new("class C { public internal static void M() { } }");
    assert_eq!(run_at_caret(&mut buffer, "make_protected", "M("), Ok(true));
    assert_eq!(buffer.text(), "class C { protected static void M() { } }");

    // The repaired list now offers every other accessibility
    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let tree = parse(buffer.text());
    let caret = buffer.text().find("M(").unwrap();
    let ctx = RefactoringContext::at_caret(&tree, &options, caret);
    let names: Vec<_> = registry.applicable(&ctx).iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["make_public", "make_internal", "make_private"]);
}

#[test]
fn test_seal_class_then_protected_no_longer_offered() {
    let mut buffer = TextBuffer::new("public class Node\n{\n    private int _value;\n}\n");
    assert_eq!(run_at_caret(&mut buffer, "seal_class", "Node"), Ok(true));
    assert_eq!(buffer.text(), "public sealed class Node\n{\n    private int _value;\n}\n");
    assert_eq!(buffer.selected_text(), "sealed");

    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let tree = parse(buffer.text());
    let caret = buffer.text().find("_value").unwrap();
    let ctx = RefactoringContext::at_caret(&tree, &options, caret);
    assert!(!registry.get("make_protected").unwrap().accept(&ctx));
    assert!(!registry.get("seal_class").unwrap().accept(&RefactoringContext::at_caret(
        &tree,
        &options,
        buffer.text().find("Node").unwrap(),
    )));
}

#[test]
fn test_wrap_in_region_selects_region_name() {
    let source = "class C\n{\n    int a;\n    int b;\n}\n";
    let mut buffer = TextBuffer::new(source);
    let start = source.find("    int a").unwrap();
    let end = source.find('}').unwrap();
    assert_eq!(
        run_with_selection(&mut buffer, "wrap_in_region", Selection::stream(start, end)),
        Ok(true)
    );
    assert_eq!(
        buffer.text(),
        "class C\n{\n    #region RegionName\n    int a;\n    int b;\n    #endregion\n}\n"
    );
    assert_eq!(buffer.selected_text(), "RegionName");
}

#[test]
fn test_wrap_in_if_uses_configured_condition() {
    let options = EditorOptions::parse("[wrap]\nif_condition = \"TRACE\"\n").unwrap();
    let registry = RefactoringRegistry::new(&options);
    let source = "Log();\n";
    let mut buffer = TextBuffer::new(source);
    let tree = parse(source);
    let selection = Selection::stream(0, source.len());
    let ctx = RefactoringContext::with_selection(&tree, &options, selection);

    let wrap = registry.get("wrap_in_if").unwrap();
    assert_eq!(wrap.refactor(&ctx, &mut buffer), Ok(true));
    assert_eq!(buffer.text(), "#if TRACE\nLog();\n#endif\n");
    assert_eq!(buffer.selected_text(), "TRACE");
}

#[test]
fn test_read_only_buffer_is_left_untouched() {
    let source = "class C { private void M() { } }";
    let mut buffer = TextBuffer::new(source);
    buffer.set_read_only(true);
    buffer.set_selection(Selection::caret(3));

    assert_eq!(run_at_caret(&mut buffer, "make_public", "M("), Err(EditError::ReadOnly));
    assert_eq!(buffer.text(), source);
    assert_eq!(buffer.selection(), Selection::caret(3));
    assert_eq!(buffer.version(), 0);
}

#[test]
fn test_nothing_to_do_reports_false() {
    let source = "class C { void M() { } }";
    let mut buffer = TextBuffer::new(source);
    assert_eq!(run_at_caret(&mut buffer, "seal_class", "M("), Ok(false));
    assert_eq!(buffer.text(), source);
    assert_eq!(buffer.version(), 0);
}

#[test]
fn test_rejected_context_leaves_buffer_untouched() {
    let source = "abstract class C { }";
    let mut buffer = TextBuffer::new(source);
    assert_eq!(run_at_caret(&mut buffer, "seal_class", "C {"), Ok(false));
    assert_eq!(run_at_caret(&mut buffer, "make_private", "C {"), Ok(false));
    assert_eq!(buffer.text(), source);

    let source = "foo(); bar();\n";
    let mut buffer = TextBuffer::new(source);
    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let tree = parse(source);
    let ctx = RefactoringContext::with_selection(&tree, &options, Selection::stream(3, 5));
    let wrap = registry.get("wrap_in_region").unwrap();
    assert!(!wrap.accept(&ctx));
    assert_eq!(wrap.refactor(&ctx, &mut buffer), Ok(false));
    assert_eq!(buffer.text(), source);
    assert_eq!(buffer.version(), 0);
}

#[test]
fn test_applicable_lists_in_registration_order() {
    let options = EditorOptions::default();
    let registry = RefactoringRegistry::new(&options);
    let source = "namespace App\n{\n    class Worker\n    {\n        void Run() { }\n    }\n}\n";
    let tree = parse(source);

    let caret = source.find("Worker").unwrap();
    let ctx = RefactoringContext::at_caret(&tree, &options, caret);
    let names: Vec<_> = registry.applicable(&ctx).iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["seal_class", "make_public", "make_internal"]);

    let caret = source.find("Run").unwrap();
    let ctx = RefactoringContext::at_caret(&tree, &options, caret);
    let names: Vec<_> = registry.applicable(&ctx).iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["make_public", "make_protected", "make_internal", "make_private"]
    );
}
