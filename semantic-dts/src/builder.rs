use crate::program::ExportKind;
use crate::program::ModuleData;
use crate::program::ModuleExport;
use crate::program::Program;
use crate::statement::ExportEntry;
use crate::statement::ImportClause;
use crate::statement::ImportSpecifier;
use crate::statement::Modifiers;
use crate::statement::ModuleSpecifier;
use crate::statement::StatementData;
use crate::statement::StatementKind;
use crate::statement::Token;
use crate::symbol::SymbolData;
use crate::symbol::SymbolFlags;
use crate::ModuleId;
use crate::RefData;
use crate::RefId;
use crate::StatementId;
use crate::SymbolId;

/// Incremental [`Program`] constructor used by Semantic Model Providers and
/// test fixtures. Arenas are append-only; every method hands back the ID of
/// what it created and IDs never move.
#[derive(Default)]
pub struct ProgramBuilder {
  program: Program,
}

impl ProgramBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a module. Modules must be added in dependency order
  /// (dependencies first, entry points last).
  pub fn module(&mut self, file_name: &str) -> ModuleId {
    let id = ModuleId(self.program.modules.len() as u32);
    self.program.modules.push(ModuleData {
      file_name: file_name.to_string(),
      statements: Vec::new(),
      exports: Vec::new(),
      symbol: None,
      is_default_lib: false,
    });
    self
      .program
      .modules_by_file_name
      .insert(file_name.to_string(), id);
    id
  }

  pub fn mark_default_lib(&mut self, module: ModuleId) {
    self.program.modules[module.0 as usize].is_default_lib = true;
  }

  /// Creates the module's own symbol (named after its file) and attaches it.
  pub fn module_symbol(&mut self, module: ModuleId, flags: SymbolFlags) -> SymbolId {
    let name = self.program.module(module).file_name.clone();
    let sym = self.symbol(&name, flags);
    self.program.modules[module.0 as usize].symbol = Some(sym);
    sym
  }

  pub fn symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
    let id = SymbolId(self.program.symbols.len() as u32);
    self.program.symbols.push(SymbolData {
      name: name.to_string(),
      flags,
      declarations: Vec::new(),
      alias_target: None,
      components: Vec::new(),
      is_global_scope: false,
    });
    id
  }

  /// Creates an alias (import/export binding) symbol resolving to `target`.
  pub fn alias_symbol(&mut self, name: &str, target: SymbolId) -> SymbolId {
    let id = self.symbol(name, SymbolFlags::ALIAS);
    assert_ne!(id, target, "alias cannot target itself");
    self.program.symbols[id.0 as usize].alias_target = Some(target);
    id
  }

  /// Creates a transient symbol merging the given per-declaration
  /// constituents.
  pub fn merged_symbol(
    &mut self,
    name: &str,
    flags: SymbolFlags,
    components: &[SymbolId],
  ) -> SymbolId {
    let id = self.symbol(name, flags);
    self.program.symbols[id.0 as usize].components = components.to_vec();
    id
  }

  /// Creates the synthetic `declare global` scope symbol.
  pub fn global_scope_symbol(&mut self) -> SymbolId {
    let id = self.symbol("global", SymbolFlags::NAMESPACE_MODULE);
    self.program.symbols[id.0 as usize].is_global_scope = true;
    id
  }

  /// Appends a row to a module's export table.
  pub fn export(&mut self, module: ModuleId, name: &str, symbol: SymbolId, kind: ExportKind) {
    self.program.modules[module.0 as usize]
      .exports
      .push(ModuleExport {
        name: name.to_string(),
        symbol,
        kind,
      });
  }

  /// Appends a top-level statement to a module.
  pub fn statement(
    &mut self,
    module: ModuleId,
    kind: StatementKind,
    modifiers: Modifiers,
    name: Option<(&str, SymbolId)>,
  ) -> StatementId {
    let id = self.push_statement(module, None, kind, modifiers, name);
    self.program.modules[module.0 as usize].statements.push(id);
    id
  }

  /// Appends a statement nested inside a namespace-like statement.
  pub fn nested(
    &mut self,
    parent: StatementId,
    kind: StatementKind,
    modifiers: Modifiers,
    name: Option<(&str, SymbolId)>,
  ) -> StatementId {
    let module = self.program.statement(parent).module;
    let id = self.push_statement(module, Some(parent), kind, modifiers, name);
    self.program.statements[parent.0 as usize].children.push(id);
    id
  }

  fn push_statement(
    &mut self,
    module: ModuleId,
    parent: Option<StatementId>,
    kind: StatementKind,
    modifiers: Modifiers,
    name: Option<(&str, SymbolId)>,
  ) -> StatementId {
    let id = StatementId(self.program.statements.len() as u32);
    let (name, name_symbol) = match name {
      Some((text, sym)) => {
        self.program.symbols[sym.0 as usize].declarations.push(id);
        (Some(text.to_string()), Some(sym))
      }
      None => (None, None),
    };
    self.program.statements.push(StatementData {
      module,
      parent,
      kind,
      modifiers,
      name,
      name_symbol,
      tokens: Vec::new(),
      children: Vec::new(),
    });
    id
  }

  /// Appends literal text to a statement's token stream.
  pub fn text(&mut self, statement: StatementId, text: &str) {
    self.program.statements[statement.0 as usize]
      .tokens
      .push(Token::Text(text.to_string()));
  }

  /// Appends a plain identifier reference resolving to `symbol`.
  pub fn reference(&mut self, statement: StatementId, written: &str, symbol: SymbolId) -> RefId {
    self.push_reference(statement, written, Some(symbol), Some(symbol))
  }

  /// Appends a dotted qualified-name reference. `head` is the symbol of the
  /// leftmost segment, `target` the symbol of the whole name.
  pub fn qualified_reference(
    &mut self,
    statement: StatementId,
    written: &str,
    head: Option<SymbolId>,
    target: Option<SymbolId>,
  ) -> RefId {
    self.push_reference(statement, written, head, target)
  }

  /// Appends an identifier occurrence with no resolvable symbol (e.g. a
  /// destructured parameter property name).
  pub fn unresolved_reference(&mut self, statement: StatementId, written: &str) -> RefId {
    self.push_reference(statement, written, None, None)
  }

  fn push_reference(
    &mut self,
    statement: StatementId,
    written: &str,
    head: Option<SymbolId>,
    target: Option<SymbolId>,
  ) -> RefId {
    let id = RefId(self.program.refs.len() as u32);
    self.program.refs.push(RefData {
      parts: written.split('.').map(str::to_string).collect(),
      head_symbol: head,
      target_symbol: target,
      enclosing: statement,
    });
    self.program.statements[statement.0 as usize]
      .tokens
      .push(Token::Ref(id));
    id
  }

  pub fn import_named(
    &mut self,
    module: ModuleId,
    from: (&str, Option<ModuleId>),
    specifiers: Vec<ImportSpecifier>,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ImportDecl {
        clause: ImportClause::Named(specifiers),
        from: specifier(from),
      },
      Modifiers::default(),
      None,
    )
  }

  pub fn import_namespace(
    &mut self,
    module: ModuleId,
    from: (&str, Option<ModuleId>),
    local: &str,
    symbol: SymbolId,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ImportDecl {
        clause: ImportClause::Namespace {
          local: local.to_string(),
          symbol,
        },
        from: specifier(from),
      },
      Modifiers::default(),
      None,
    )
  }

  pub fn import_default(
    &mut self,
    module: ModuleId,
    from: (&str, Option<ModuleId>),
    local: &str,
    symbol: SymbolId,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ImportDecl {
        clause: ImportClause::Default {
          local: local.to_string(),
          symbol,
        },
        from: specifier(from),
      },
      Modifiers::default(),
      None,
    )
  }

  pub fn import_equals(
    &mut self,
    module: ModuleId,
    from: (&str, Option<ModuleId>),
    local: &str,
    symbol: SymbolId,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ImportDecl {
        clause: ImportClause::Require {
          local: local.to_string(),
          symbol,
        },
        from: specifier(from),
      },
      Modifiers::default(),
      None,
    )
  }

  pub fn export_list(
    &mut self,
    module: ModuleId,
    from: Option<(&str, Option<ModuleId>)>,
    entries: Vec<ExportEntry>,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ExportList {
        entries,
        from: from.map(specifier),
      },
      Modifiers::exported(),
      None,
    )
  }

  pub fn export_star(&mut self, module: ModuleId, from: (&str, Option<ModuleId>)) -> StatementId {
    self.statement(
      module,
      StatementKind::ExportStar {
        from: specifier(from),
      },
      Modifiers::exported(),
      None,
    )
  }

  pub fn export_star_as(
    &mut self,
    module: ModuleId,
    from: (&str, Option<ModuleId>),
    name: &str,
    binding: SymbolId,
  ) -> StatementId {
    self.statement(
      module,
      StatementKind::ExportStarAs {
        name: name.to_string(),
        binding,
        from: specifier(from),
      },
      Modifiers::exported(),
      None,
    )
  }

  pub fn finish(self) -> Program {
    self.program
  }
}

fn specifier((text, resolved): (&str, Option<ModuleId>)) -> ModuleSpecifier {
  ModuleSpecifier {
    text: text.to_string(),
    resolved,
  }
}
