//! Declaration-level semantic model consumed by `bundle-dts`.
//!
//! A Semantic Model Provider (a compiler front end, a language service, or a
//! test fixture) resolves source text into an immutable [`Program`]: a set of
//! modules in dependency order, each holding an ordered list of top-level
//! declaration statements and an export table, plus the symbols that
//! identifiers bind to after alias resolution. The bundler never sees source
//! text; it sees statements as token streams whose identifier occurrences are
//! pre-resolved [`RefData`] records.
//!
//! All IDs are cheap `Copy` newtypes indexing append-only arenas owned by the
//! [`Program`]. Construct programs with [`ProgramBuilder`].

use serde::Deserialize;
use serde::Serialize;

mod builder;
mod program;
mod statement;
mod symbol;

pub use builder::ProgramBuilder;
pub use program::ExportKind;
pub use program::ModuleData;
pub use program::ModuleExport;
pub use program::Program;
pub use statement::ExportEntry;
pub use statement::ImportClause;
pub use statement::ImportSpecifier;
pub use statement::Modifiers;
pub use statement::ModuleSpecifier;
pub use statement::NamespaceForm;
pub use statement::StatementData;
pub use statement::StatementKind;
pub use statement::Token;
pub use statement::VariableKeyword;
pub use symbol::SymbolData;
pub use symbol::SymbolFlags;

/// Identifies a module (source unit) within a [`Program`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// Identifies a declaration statement within a [`Program`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId(pub u32);

/// Identity of a named binding after alias resolution. Two references that
/// denote the same declaration resolve to the same `SymbolId`; a single
/// symbol may own several physical declaration sites (declaration merging).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// Identifies one identifier (or dotted qualified-name) occurrence inside a
/// statement's token stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RefId(pub u32);

/// One identifier or qualified-name occurrence, as recorded by the provider.
#[derive(Clone, Debug)]
pub struct RefData {
  /// Dotted segments exactly as written (`["Ns", "Inner"]` for `Ns.Inner`).
  pub parts: Vec<String>,
  /// Symbol bound at the leftmost segment. May still be an alias; consumers
  /// de-alias via [`Program::resolve_alias`].
  pub head_symbol: Option<SymbolId>,
  /// Symbol bound at the full qualified name. Equal to `head_symbol` for
  /// plain identifiers.
  pub target_symbol: Option<SymbolId>,
  /// The statement whose token stream contains this reference.
  pub enclosing: StatementId,
}

impl RefData {
  /// The reference exactly as written in the source.
  pub fn written(&self) -> String {
    self.parts.join(".")
  }
}
