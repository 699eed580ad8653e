use semantic_dts::Modifiers;
use semantic_dts::ModuleId;
use semantic_dts::ProgramBuilder;
use semantic_dts::StatementId;
use semantic_dts::StatementKind;
use semantic_dts::SymbolFlags;
use semantic_dts::SymbolId;
use similar::ChangeTag;
use similar::TextDiff;

pub fn assert_text_eq(expected: &str, actual: &str) {
  if expected == actual {
    return;
  }
  let mut msg = String::from("bundle text mismatch, got:\n");
  let diff = TextDiff::from_lines(expected, actual);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
  }
  panic!("{}", msg);
}

/// `interface <name> {\n}` with no members.
pub fn empty_interface(
  builder: &mut ProgramBuilder,
  module: ModuleId,
  name: &str,
  modifiers: Modifiers,
) -> (StatementId, SymbolId) {
  let symbol = builder.symbol(name, SymbolFlags::INTERFACE);
  let statement = builder.statement(module, StatementKind::Interface, modifiers, Some((name, symbol)));
  builder.text(statement, " {\n}");
  (statement, symbol)
}

/// `interface <name> {\n\t<field>: <referenced>;\n}` referencing another
/// symbol by its written name.
pub fn interface_with_field(
  builder: &mut ProgramBuilder,
  module: ModuleId,
  name: &str,
  modifiers: Modifiers,
  field: &str,
  written: &str,
  referenced: SymbolId,
) -> (StatementId, SymbolId) {
  let symbol = builder.symbol(name, SymbolFlags::INTERFACE);
  let statement = builder.statement(module, StatementKind::Interface, modifiers, Some((name, symbol)));
  builder.text(statement, &format!(" {{\n\t{field}: "));
  builder.reference(statement, written, referenced);
  builder.text(statement, ";\n}");
  (statement, symbol)
}
