use crate::StatementId;
use crate::SymbolId;
use serde::Deserialize;
use serde::Serialize;
use std::ops::BitOr;

/// Bit set describing what a symbol means. A symbol may carry several bits at
/// once when declarations merge (e.g. a `const` and an `interface` sharing a
/// name).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SymbolFlags(pub u32);

impl SymbolFlags {
  pub const NONE: SymbolFlags = SymbolFlags(0);
  pub const ALIAS: SymbolFlags = SymbolFlags(1 << 0);
  pub const BLOCK_SCOPED_VARIABLE: SymbolFlags = SymbolFlags(1 << 1);
  pub const FUNCTION_SCOPED_VARIABLE: SymbolFlags = SymbolFlags(1 << 2);
  pub const CLASS: SymbolFlags = SymbolFlags(1 << 3);
  pub const REGULAR_ENUM: SymbolFlags = SymbolFlags(1 << 4);
  pub const CONST_ENUM: SymbolFlags = SymbolFlags(1 << 5);
  pub const FUNCTION: SymbolFlags = SymbolFlags(1 << 6);
  pub const INTERFACE: SymbolFlags = SymbolFlags(1 << 7);
  pub const NAMESPACE_MODULE: SymbolFlags = SymbolFlags(1 << 8);
  pub const VALUE_MODULE: SymbolFlags = SymbolFlags(1 << 9);
  pub const TYPE_ALIAS: SymbolFlags = SymbolFlags(1 << 10);
  pub const PROPERTY: SymbolFlags = SymbolFlags(1 << 11);

  pub const ENUM: SymbolFlags = SymbolFlags(Self::REGULAR_ENUM.0 | Self::CONST_ENUM.0);
  pub const MODULE: SymbolFlags = SymbolFlags(Self::NAMESPACE_MODULE.0 | Self::VALUE_MODULE.0);

  /// True when any bit of `other` is set on `self`.
  pub fn intersects(self, other: SymbolFlags) -> bool {
    self.0 & other.0 != 0
  }

  /// True when every bit of `other` is set on `self`.
  pub fn contains(self, other: SymbolFlags) -> bool {
    self.0 & other.0 == other.0
  }
}

impl BitOr for SymbolFlags {
  type Output = SymbolFlags;

  fn bitor(self, rhs: SymbolFlags) -> SymbolFlags {
    SymbolFlags(self.0 | rhs.0)
  }
}

/// A named binding resolved by the Semantic Model Provider.
#[derive(Clone, Debug)]
pub struct SymbolData {
  pub name: String,
  pub flags: SymbolFlags,
  /// Physical declaration sites, in source order. Empty for symbols declared
  /// outside the program (e.g. members of an imported package).
  pub declarations: Vec<StatementId>,
  /// For alias symbols (import/export bindings), the symbol they resolve to.
  pub alias_target: Option<SymbolId>,
  /// For transient symbols created by declaration merging, the per-site
  /// constituent symbols. Empty for ordinary symbols.
  pub components: Vec<SymbolId>,
  /// True only for the synthetic `declare global` scope symbol. There is
  /// exactly one global scope; it is never renamed.
  pub is_global_scope: bool,
}
