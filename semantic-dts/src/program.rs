use crate::ModuleId;
use crate::RefData;
use crate::RefId;
use crate::StatementData;
use crate::StatementId;
use crate::SymbolData;
use crate::SymbolId;
use ahash::HashMap;

/// How a module export reaches consumers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportKind {
  /// `export` on the declaration or an export list entry.
  Local,
  /// `export default ...`
  Default,
  /// `export = ...` (legacy single-export assignment)
  ExportEquals,
}

/// One row of a module's export table, in declaration order.
#[derive(Clone, Debug)]
pub struct ModuleExport {
  /// The outward-facing name (`default` for default exports).
  pub name: String,
  /// The exported symbol. May still be an alias; consumers de-alias via
  /// [`Program::resolve_alias`].
  pub symbol: SymbolId,
  pub kind: ExportKind,
}

/// A source unit.
#[derive(Clone, Debug)]
pub struct ModuleData {
  pub file_name: String,
  /// Top-level statements in source order.
  pub statements: Vec<StatementId>,
  /// Export table, ordered.
  pub exports: Vec<ModuleExport>,
  /// The module's own symbol, when it has one (ambient modules, modules
  /// consumed through namespace imports).
  pub symbol: Option<SymbolId>,
  /// True for compiler default-library files, which never contribute output.
  pub is_default_lib: bool,
}

/// Immutable program produced by a Semantic Model Provider. Modules are held
/// in dependency order (dependencies first, entry points last); all arenas
/// are append-only and IDs stay valid for the program's lifetime.
#[derive(Clone, Debug, Default)]
pub struct Program {
  pub(crate) modules: Vec<ModuleData>,
  pub(crate) statements: Vec<StatementData>,
  pub(crate) symbols: Vec<SymbolData>,
  pub(crate) refs: Vec<RefData>,
  pub(crate) modules_by_file_name: HashMap<String, ModuleId>,
}

impl Program {
  pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> {
    (0..self.modules.len() as u32).map(ModuleId)
  }

  pub fn module(&self, id: ModuleId) -> &ModuleData {
    &self.modules[id.0 as usize]
  }

  pub fn statement(&self, id: StatementId) -> &StatementData {
    &self.statements[id.0 as usize]
  }

  pub fn symbol(&self, id: SymbolId) -> &SymbolData {
    &self.symbols[id.0 as usize]
  }

  pub fn reference(&self, id: RefId) -> &RefData {
    &self.refs[id.0 as usize]
  }

  pub fn module_by_file_name(&self, file_name: &str) -> Option<ModuleId> {
    self.modules_by_file_name.get(file_name).copied()
  }

  /// Ordered export table of a module.
  pub fn exports_of(&self, module: ModuleId) -> &[ModuleExport] {
    &self.module(module).exports
  }

  /// Physical declaration sites of a symbol.
  pub fn declarations_of(&self, symbol: SymbolId) -> &[StatementId] {
    &self.symbol(symbol).declarations
  }

  /// Follows alias targets to the canonical declaring symbol. Alias chains
  /// are finite by construction (the builder rejects self-aliases), but a
  /// visited guard keeps malformed inputs from looping.
  pub fn resolve_alias(&self, symbol: SymbolId) -> SymbolId {
    let mut current = symbol;
    let mut hops = 0usize;
    while let Some(target) = self.symbol(current).alias_target {
      hops += 1;
      if target == current || hops > self.symbols.len() {
        break;
      }
      current = target;
    }
    current
  }

  /// Splits a transient (merged) symbol back into its per-declaration
  /// constituents; ordinary symbols are their own single constituent.
  pub fn split_symbol(&self, symbol: SymbolId) -> Vec<SymbolId> {
    let data = self.symbol(symbol);
    if data.components.is_empty() {
      vec![symbol]
    } else {
      data.components.clone()
    }
  }
}
