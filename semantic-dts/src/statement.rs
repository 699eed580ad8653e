use crate::ModuleId;
use crate::RefId;
use crate::StatementId;
use crate::SymbolId;

/// Declaration keyword of a variable statement.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VariableKeyword {
  Var,
  Let,
  Const,
}

impl VariableKeyword {
  pub fn as_str(self) -> &'static str {
    match self {
      VariableKeyword::Var => "var",
      VariableKeyword::Let => "let",
      VariableKeyword::Const => "const",
    }
  }
}

/// Shape of a namespace-like declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NamespaceForm {
  /// `namespace Name { ... }`
  Namespace,
  /// `module Name { ... }` (identifier form)
  Module,
  /// `declare module "specifier" { ... }` — an ambient module declaration or
  /// augmentation. `augmented` is the module it augments when the specifier
  /// resolves inside the program.
  QuotedModule {
    specifier: String,
    augmented: Option<ModuleId>,
  },
  /// `declare global { ... }`
  Global,
}

/// A module specifier appearing in an import/export statement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleSpecifier {
  /// The specifier text as written (`'./foo'`, `'fake-package'`).
  pub text: String,
  /// The module it resolves to, when it resolves inside the program. For
  /// import/export targets the provider resolves this to the module's file;
  /// classification happens on that file name.
  pub resolved: Option<ModuleId>,
}

/// One binding of a named import list (`import { name as local }`).
#[derive(Clone, Debug)]
pub struct ImportSpecifier {
  /// The exported name in the source module.
  pub name: String,
  /// The local binding name (equal to `name` when no alias was written).
  pub local: String,
  /// The local alias symbol.
  pub symbol: SymbolId,
}

/// Import clause of an import declaration.
#[derive(Clone, Debug)]
pub enum ImportClause {
  Named(Vec<ImportSpecifier>),
  /// `import * as local from ...`
  Namespace { local: String, symbol: SymbolId },
  /// `import local from ...`
  Default { local: String, symbol: SymbolId },
  /// `import local = require(...)`
  Require { local: String, symbol: SymbolId },
}

/// One entry of an export list (`export { name as exported }`).
#[derive(Clone, Debug)]
pub struct ExportEntry {
  /// The local/source name being exported.
  pub name: String,
  /// The outward-facing name (equal to `name` when no alias was written).
  pub exported: String,
  /// The export-binding alias symbol created for this entry, when the
  /// provider materializes one (always present for re-export lists).
  pub binding: Option<SymbolId>,
}

/// Kinds of top-level (and namespace-nested) statements.
#[derive(Clone, Debug)]
pub enum StatementKind {
  Interface,
  TypeAlias,
  Class,
  Enum { is_const: bool },
  Function,
  Variable { keyword: VariableKeyword },
  Namespace { form: NamespaceForm },
  ImportDecl { clause: ImportClause, from: ModuleSpecifier },
  ExportList {
    entries: Vec<ExportEntry>,
    from: Option<ModuleSpecifier>,
  },
  /// `export * from ...`
  ExportStar { from: ModuleSpecifier },
  /// `export * as name from ...`
  ExportStarAs {
    name: String,
    binding: SymbolId,
    from: ModuleSpecifier,
  },
  /// `export default <expr>;` or `export = <expr>;` — the expression lives in
  /// the statement's token stream.
  ExportAssignment { is_equals: bool },
}

/// Modifier keywords carried by the statement in its source form. The output
/// emitter normalizes these; they are inputs, not decisions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Modifiers {
  pub export: bool,
  pub default: bool,
  pub declare: bool,
}

impl Modifiers {
  pub fn exported() -> Modifiers {
    Modifiers {
      export: true,
      ..Modifiers::default()
    }
  }

  pub fn declared() -> Modifiers {
    Modifiers {
      declare: true,
      ..Modifiers::default()
    }
  }

  pub fn export_default() -> Modifiers {
    Modifiers {
      export: true,
      default: true,
      declare: false,
    }
  }
}

/// A fragment of a statement's rendered body. The statement head (modifiers,
/// declaration keyword, declared name) is rendered from structure; tokens
/// carry everything after the declared name, with identifier occurrences
/// recorded as [`Token::Ref`] so they can be rewritten on output.
#[derive(Clone, Debug)]
pub enum Token {
  Text(String),
  Ref(RefId),
}

/// A top-level or namespace-nested statement.
#[derive(Clone, Debug)]
pub struct StatementData {
  pub module: ModuleId,
  /// Enclosing namespace-like statement, when nested.
  pub parent: Option<StatementId>,
  pub kind: StatementKind,
  pub modifiers: Modifiers,
  /// Declared name, for named declarations.
  pub name: Option<String>,
  /// Symbol of the declared name.
  pub name_symbol: Option<SymbolId>,
  /// Body fragments following the declared name.
  pub tokens: Vec<Token>,
  /// Nested statements, for namespace-like kinds.
  pub children: Vec<StatementId>,
}

impl StatementData {
  /// True for import declarations and pure export lists/stars, which carry no
  /// declaration content of their own.
  pub fn is_import_or_export_form(&self) -> bool {
    matches!(
      self.kind,
      StatementKind::ImportDecl { .. }
        | StatementKind::ExportList { .. }
        | StatementKind::ExportStar { .. }
        | StatementKind::ExportStarAs { .. }
    )
  }

  /// True for declarations that own a name subject to collision resolution.
  pub fn is_named_declaration(&self) -> bool {
    matches!(
      self.kind,
      StatementKind::Interface
        | StatementKind::TypeAlias
        | StatementKind::Class
        | StatementKind::Enum { .. }
        | StatementKind::Function
        | StatementKind::Variable { .. }
        | StatementKind::Namespace {
          form: NamespaceForm::Namespace | NamespaceForm::Module
        }
    )
  }
}
