use recast_core::{NodeKind, Span, SyntaxContext, TokenKind, TriviaKind};
use recast_syntax::parse;

fn modifier_kinds(tree: &recast_syntax::SyntaxTree, node: recast_core::NodeId) -> Vec<TokenKind> {
    tree.modifiers(node).iter().map(|t| t.kind).collect()
}

#[test]
fn test_class_members() {
    let source = r#"
namespace App
{
    public sealed class Service : IService
    {
        private readonly int _count = 1, _other;
        public Service(int count) : base() { _count = count; }
        protected virtual string Name { get; set; } = "x";
        internal void Run<T>(T value) where T : class { }
        public int this[int i] => i;
        public event EventHandler Changed;
        ~Service() { }
        public static Service operator +(Service a, Service b) => a;
    }
}
"#;
    let tree = parse(source);

    let class = tree.find(NodeKind::Class, "Service").unwrap();
    assert_eq!(modifier_kinds(&tree, class), vec![TokenKind::Public, TokenKind::Sealed]);
    assert_eq!(tree.keyword(class).unwrap().text(source), "class");
    let namespace = tree.parent(class).unwrap();
    assert_eq!(tree.kind(namespace), NodeKind::Namespace);
    assert_eq!(tree.parent(namespace), Some(tree.root()));

    let kinds: Vec<NodeKind> = tree.children(class).iter().map(|n| tree.kind(*n)).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Field,
            NodeKind::Constructor,
            NodeKind::Property,
            NodeKind::Method,
            NodeKind::Indexer,
            NodeKind::EventField,
            NodeKind::Destructor,
            NodeKind::Operator,
        ]
    );

    let other = tree.find(NodeKind::VariableDeclarator, "_other").unwrap();
    let declaration = tree.parent(other).unwrap();
    assert_eq!(tree.kind(declaration), NodeKind::VariableDeclaration);
    assert_eq!(tree.children(declaration).len(), 2);
    let field = tree.parent(declaration).unwrap();
    assert_eq!(modifier_kinds(&tree, field), vec![TokenKind::Private, TokenKind::Readonly]);

    let run = tree.find(NodeKind::Method, "Run").unwrap();
    assert_eq!(modifier_kinds(&tree, run), vec![TokenKind::Internal]);
    assert!(tree.find(NodeKind::Property, "Name").is_some());
    assert!(tree.find(NodeKind::Constructor, "Service").is_some());
}

#[test]
fn test_enum_members_and_nested_types() {
    let source = concat!(
        "enum Color { Red, Green = 2, [Obsolete] Blue }\n",
        "class Outer { class Inner { } struct S { } }\n"
    );
    let tree = parse(source);

    let color = tree.find(NodeKind::Enum, "Color").unwrap();
    let members: Vec<&str> = tree
        .children(color)
        .iter()
        .filter_map(|n| tree.name(*n))
        .collect();
    assert_eq!(members, vec!["Red", "Green", "Blue"]);

    let blue = tree.find(NodeKind::EnumMember, "Blue").unwrap();
    assert_eq!(tree.first_token(blue).unwrap().text(source), "Blue");
    assert_eq!(&source[tree.span(blue).start..tree.span(blue).end], "[Obsolete] Blue");

    let inner = tree.find(NodeKind::Class, "Inner").unwrap();
    let outer = tree.find(NodeKind::Class, "Outer").unwrap();
    assert_eq!(tree.parent(inner), Some(outer));
    assert_eq!(tree.kind(tree.find(NodeKind::Struct, "S").unwrap()), NodeKind::Struct);
}

#[test]
fn test_attributes_precede_first_token() {
    let source = "class C {\n    [Obsolete(\"x\")]\n    static void M() { }\n}";
    let tree = parse(source);
    let method = tree.find(NodeKind::Method, "M").unwrap();
    assert_eq!(tree.first_token(method).unwrap().text(source), "static");
    assert!(source[tree.span(method).start..].starts_with("[Obsolete"));
}

#[test]
fn test_node_at_prefers_innermost() {
    let source = "class C { int x = 1; void M() { var y = 2; } }";
    let tree = parse(source);

    let at_x = tree.node_at(source.find("x =").unwrap()).unwrap();
    assert_eq!(tree.kind(at_x), NodeKind::VariableDeclarator);

    let in_body = tree.node_at(source.find("var").unwrap()).unwrap();
    assert_eq!(tree.kind(in_body), NodeKind::Method);

    let on_class = tree.node_at(source.find("class").unwrap()).unwrap();
    assert_eq!(tree.kind(on_class), NodeKind::Class);
}

#[test]
fn test_top_level_and_file_scoped_namespace() {
    let source = concat!(
        "namespace App;\n\n",
        "public record Point(int X, int Y);\n",
        "interface IShape { double Area(); }\n"
    );
    let tree = parse(source);
    let point = tree.find(NodeKind::Record, "Point").unwrap();
    assert_eq!(tree.kind(tree.parent(point).unwrap()), NodeKind::Namespace);
    assert!(tree.find(NodeKind::Method, "Area").is_some());
}

#[test]
fn test_trivia_classification() {
    let source = "class C\n{\n    /* a\n       b */\n    int x; // c\n}\n";
    let tree = parse(source);

    assert_eq!(tree.trivia_at(0), TriviaKind::None);
    assert_eq!(tree.trivia_at(7), TriviaKind::EndOfLine);
    assert_eq!(tree.trivia_at(10), TriviaKind::Whitespace);
    assert_eq!(tree.trivia_at(source.find("a\n").unwrap()), TriviaKind::Other);
    assert_eq!(tree.trivia_at(source.find("// c").unwrap() + 2), TriviaKind::Other);
    assert_eq!(tree.trivia_at(source.len()), TriviaKind::None);
}

#[test]
fn test_splits_token() {
    let source = "var s = @\"one\ntwo\";";
    let tree = parse(source);
    let line_end = source.find('\n').unwrap();
    assert!(tree.splits_token(line_end));
    assert!(tree.splits_token(1));
    assert!(!tree.splits_token(0));
    assert!(!tree.splits_token(3));
    assert!(!tree.splits_token(source.len()));
}

#[test]
fn test_token_spans_cover_keywords() {
    let source = "public public void M(){}";
    let tree = parse(source);
    let method = tree.find(NodeKind::Method, "M").unwrap();
    let modifiers = tree.modifiers(method);
    assert_eq!(modifiers.len(), 2);
    assert_eq!(modifiers[1].span, Span::new(7, 13));
    assert_eq!(modifiers[0].trailing[0].kind, TriviaKind::Whitespace);
}
