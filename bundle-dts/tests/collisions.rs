mod common;

use bundle_dts::CollisionsResolver;
use common::empty_interface;
use semantic_dts::Modifiers;
use semantic_dts::NamespaceForm;
use semantic_dts::ProgramBuilder;
use semantic_dts::StatementKind;
use semantic_dts::SymbolFlags;

#[test]
fn first_registration_keeps_bare_name() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let (_, first) = empty_interface(&mut b, m, "Foo", Modifiers::default());
  let (_, second) = empty_interface(&mut b, m, "Foo", Modifiers::default());
  let (_, third) = empty_interface(&mut b, m, "Foo", Modifiers::default());
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  assert_eq!(resolver.register_top_level(first, "Foo"), Some("Foo".to_string()));
  assert_eq!(
    resolver.register_top_level(second, "Foo"),
    Some("Foo$1".to_string())
  );
  assert_eq!(
    resolver.register_top_level(third, "Foo"),
    Some("Foo$2".to_string())
  );
  // re-registration reuses the assigned name
  assert_eq!(resolver.register_top_level(second, "Foo"), Some("Foo$1".to_string()));
  assert_eq!(resolver.names_for_symbol(second), ["Foo$1".to_string()]);
}

#[test]
fn default_hint_is_remapped() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let sym = b.symbol("default", SymbolFlags::FUNCTION);
  let st = b.statement(m, StatementKind::Function, Modifiers::export_default(), Some(("default", sym)));
  b.text(st, "(): void;");
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  assert_eq!(
    resolver.register_top_level(sym, "default"),
    Some("_default".to_string())
  );
}

#[test]
fn unsupported_symbols_are_never_renamed() {
  let mut b = ProgramBuilder::new();
  b.module("main.d.ts");
  let property = b.symbol("prop", SymbolFlags::PROPERTY);
  let global = b.global_scope_symbol();
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  assert_eq!(resolver.register_top_level(property, "prop"), None);
  assert_eq!(resolver.register_top_level(global, "global"), None);
  assert!(resolver.names_for_symbol(property).is_empty());
}

#[test]
fn alias_registers_under_its_target() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let (_, target) = empty_interface(&mut b, m, "Foo", Modifiers::exported());
  let alias = b.alias_symbol("Renamed", target);
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  assert_eq!(resolver.register_top_level(target, "Foo"), Some("Foo".to_string()));
  // aliases collapse onto the declaring symbol's name set
  assert_eq!(
    resolver.register_top_level(alias, "Renamed"),
    Some("Renamed".to_string())
  );
  assert_eq!(
    resolver.names_for_symbol(alias),
    ["Foo".to_string(), "Renamed".to_string()]
  );
}

#[test]
fn renamed_reference_is_rewritten_with_suffix_preference() {
  let mut b = ProgramBuilder::new();
  let a = b.module("a.d.ts");
  let (_, foo_a) = empty_interface(&mut b, a, "Foo", Modifiers::exported());
  let m = b.module("main.d.ts");
  let (_, foo_main) = empty_interface(&mut b, m, "Foo", Modifiers::default());
  let user_sym = b.symbol("User", SymbolFlags::INTERFACE);
  let user = b.statement(m, StatementKind::Interface, Modifiers::exported(), Some(("User", user_sym)));
  b.text(user, " {\n\tfoo: ");
  let reference = b.reference(user, "Foo", foo_main);
  b.text(user, ";\n}");
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  resolver.register_top_level(foo_a, "Foo");
  resolver.register_top_level(foo_main, "Foo");
  let resolved = resolver.resolve_reference(program.reference(reference));
  assert_eq!(resolved, Some("Foo$1".to_string()));
}

#[test]
fn same_scope_references_stay_unchanged() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let ns_sym = b.symbol("NS", SymbolFlags::NAMESPACE_MODULE);
  let ns = b.statement(
    m,
    StatementKind::Namespace {
      form: NamespaceForm::Namespace,
    },
    Modifiers::declared(),
    Some(("NS", ns_sym)),
  );
  let inner_sym = b.symbol("Inner", SymbolFlags::INTERFACE);
  let inner = b.nested(ns, StatementKind::Interface, Modifiers::default(), Some(("Inner", inner_sym)));
  b.text(inner, " {\n}");
  let user_sym = b.symbol("User", SymbolFlags::INTERFACE);
  let user = b.nested(ns, StatementKind::Interface, Modifiers::default(), Some(("User", user_sym)));
  b.text(user, " {\n\tx: ");
  let reference = b.reference(user, "Inner", inner_sym);
  b.text(user, ";\n}");
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  resolver.register_top_level(ns_sym, "NS");
  let resolved = resolver.resolve_reference(program.reference(reference));
  assert_eq!(resolved, Some("Inner".to_string()));
}

#[test]
fn qualified_reference_rewrites_only_the_head() {
  let mut b = ProgramBuilder::new();
  let a = b.module("a.d.ts");
  let ns_a = b.symbol("NS", SymbolFlags::NAMESPACE_MODULE);
  b.statement(
    a,
    StatementKind::Namespace {
      form: NamespaceForm::Namespace,
    },
    Modifiers::declared(),
    Some(("NS", ns_a)),
  );
  let m = b.module("main.d.ts");
  let ns_main = b.symbol("NS", SymbolFlags::NAMESPACE_MODULE);
  let ns_stmt = b.statement(
    m,
    StatementKind::Namespace {
      form: NamespaceForm::Namespace,
    },
    Modifiers::declared(),
    Some(("NS", ns_main)),
  );
  let inner_sym = b.symbol("Inner", SymbolFlags::INTERFACE);
  let inner = b.nested(ns_stmt, StatementKind::Interface, Modifiers::default(), Some(("Inner", inner_sym)));
  b.text(inner, " {\n}");
  let user_sym = b.symbol("User", SymbolFlags::TYPE_ALIAS);
  let user = b.statement(m, StatementKind::TypeAlias, Modifiers::exported(), Some(("User", user_sym)));
  b.text(user, " = ");
  let reference = b.qualified_reference(user, "NS.Inner", Some(ns_main), Some(inner_sym));
  b.text(user, ";");
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  resolver.register_top_level(ns_a, "NS");
  resolver.register_top_level(ns_main, "NS");
  let resolved = resolver.resolve_reference(program.reference(reference));
  assert_eq!(resolved, Some("NS$1.Inner".to_string()));
}

#[test]
fn unregistered_head_falls_back_to_target_names() {
  let mut b = ProgramBuilder::new();
  let y = b.module("y.d.ts");
  let y_sym = b.module_symbol(y, SymbolFlags::VALUE_MODULE);
  let (_, member) = empty_interface(&mut b, y, "Member", Modifiers::exported());
  let m = b.module("main.d.ts");
  let alias = b.alias_symbol("ns", y_sym);
  b.import_namespace(m, ("./y", Some(y)), "ns", alias);
  let user_sym = b.symbol("User", SymbolFlags::TYPE_ALIAS);
  let user = b.statement(m, StatementKind::TypeAlias, Modifiers::exported(), Some(("User", user_sym)));
  b.text(user, " = ");
  let reference = b.qualified_reference(user, "ns.Member", Some(alias), Some(member));
  b.text(user, ";");
  let program = b.finish();

  let mut resolver = CollisionsResolver::new(&program);
  resolver.register_top_level(member, "Member");
  let resolved = resolver.resolve_reference(program.reference(reference));
  assert_eq!(resolved, Some("Member".to_string()));
}
