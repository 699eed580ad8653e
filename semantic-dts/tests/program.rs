use semantic_dts::ExportKind;
use semantic_dts::Modifiers;
use semantic_dts::ProgramBuilder;
use semantic_dts::StatementKind;
use semantic_dts::SymbolFlags;
use semantic_dts::Token;

#[test]
fn modules_are_indexed_by_file_name() {
  let mut b = ProgramBuilder::new();
  let dep = b.module("dep.d.ts");
  let entry = b.module("main.d.ts");
  let program = b.finish();

  assert_eq!(program.module_by_file_name("dep.d.ts"), Some(dep));
  assert_eq!(program.module_by_file_name("main.d.ts"), Some(entry));
  assert_eq!(program.module_by_file_name("other.d.ts"), None);
  assert_eq!(program.module_ids().collect::<Vec<_>>(), vec![dep, entry]);
}

#[test]
fn alias_chains_resolve_to_the_declaring_symbol() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let target = b.symbol("Foo", SymbolFlags::INTERFACE);
  let st = b.statement(m, StatementKind::Interface, Modifiers::exported(), Some(("Foo", target)));
  b.text(st, " {\n}");
  let first = b.alias_symbol("Renamed", target);
  let second = b.alias_symbol("RenamedAgain", first);
  let program = b.finish();

  assert_eq!(program.resolve_alias(second), target);
  assert_eq!(program.resolve_alias(first), target);
  assert_eq!(program.resolve_alias(target), target);
}

#[test]
fn merged_symbols_split_while_plain_symbols_are_their_own_constituent() {
  let mut b = ProgramBuilder::new();
  b.module("main.d.ts");
  let iface = b.symbol("Thing", SymbolFlags::INTERFACE);
  let ns = b.symbol("Thing", SymbolFlags::NAMESPACE_MODULE);
  let merged = b.merged_symbol("Thing", SymbolFlags::INTERFACE, &[iface, ns]);
  let program = b.finish();

  assert_eq!(program.split_symbol(merged), vec![iface, ns]);
  assert_eq!(program.split_symbol(iface), vec![iface]);
}

#[test]
fn statements_record_declarations_and_token_streams() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let sym = b.symbol("Foo", SymbolFlags::INTERFACE);
  let st = b.statement(m, StatementKind::Interface, Modifiers::exported(), Some(("Foo", sym)));
  b.text(st, " {\n\tbar: ");
  let reference = b.reference(st, "Bar", sym);
  b.text(st, ";\n}");
  b.export(m, "Foo", sym, ExportKind::Local);
  let program = b.finish();

  assert_eq!(program.declarations_of(sym), [st]);
  let stmt = program.statement(st);
  assert_eq!(stmt.tokens.len(), 3);
  assert!(matches!(stmt.tokens[1], Token::Ref(id) if id == reference));
  assert_eq!(program.reference(reference).written(), "Bar");
  assert_eq!(program.exports_of(m).len(), 1);
  assert_eq!(program.exports_of(m)[0].kind, ExportKind::Local);
}

#[test]
fn qualified_references_keep_their_written_parts() {
  let mut b = ProgramBuilder::new();
  let m = b.module("main.d.ts");
  let ns = b.symbol("NS", SymbolFlags::NAMESPACE_MODULE);
  let inner = b.symbol("Inner", SymbolFlags::INTERFACE);
  let user = b.symbol("User", SymbolFlags::TYPE_ALIAS);
  let st = b.statement(m, StatementKind::TypeAlias, Modifiers::exported(), Some(("User", user)));
  b.text(st, " = ");
  let reference = b.qualified_reference(st, "NS.Inner", Some(ns), Some(inner));
  b.text(st, ";");
  let program = b.finish();

  let data = program.reference(reference);
  assert_eq!(data.parts, ["NS", "Inner"]);
  assert_eq!(data.written(), "NS.Inner");
  assert_eq!(data.head_symbol, Some(ns));
  assert_eq!(data.target_symbol, Some(inner));
}
