//! Post-collection safety check: every retained declaration that would also
//! exist at JavaScript runtime (classes, non-const enums, functions,
//! variables) must be exported from the entry, otherwise consumers can import
//! a name that does not exist in the compiled output.

use crate::collector::CollectedStatement;
use crate::error::BundleError;
use crate::error::OffendingStatement;
use crate::error::RuntimeStatementKind;
use semantic_dts::ModuleId;
use semantic_dts::Program;
use semantic_dts::StatementKind;
use semantic_dts::SymbolId;

pub fn ensure_runtime_statements_exported(
  program: &Program,
  entry: ModuleId,
  statements: &[CollectedStatement],
) -> Result<(), BundleError> {
  let mut offenders = Vec::new();
  for collected in statements {
    let CollectedStatement::Statement { id, .. } = collected else {
      continue;
    };
    let stmt = program.statement(*id);
    let kind = match stmt.kind {
      StatementKind::Class => RuntimeStatementKind::Class,
      StatementKind::Enum { is_const: false } => RuntimeStatementKind::Enum,
      StatementKind::Function => RuntimeStatementKind::Function,
      StatementKind::Variable { .. } => RuntimeStatementKind::Variable,
      _ => continue,
    };
    let (Some(name), Some(symbol)) = (&stmt.name, stmt.name_symbol) else {
      continue;
    };
    if is_exported_from_entry(program, entry, symbol) {
      continue;
    }
    offenders.push(OffendingStatement {
      name: name.clone(),
      kind,
      module: program.module(stmt.module).file_name.clone(),
    });
  }
  if offenders.is_empty() {
    Ok(())
  } else {
    Err(BundleError::NonExportedRuntimeStatements(offenders))
  }
}

fn is_exported_from_entry(program: &Program, entry: ModuleId, symbol: SymbolId) -> bool {
  program.exports_of(entry).iter().any(|row| {
    let resolved = program.resolve_alias(row.symbol);
    resolved == symbol || program.split_symbol(resolved).contains(&symbol)
  })
}
