//! Collision-free naming of top-level declarations.
//!
//! Every declaration hoisted to the output's top level registers its symbol
//! under a preferred name; the first registration of a name wins it verbatim,
//! later colliding symbols receive a `$N` suffix. References inside retained
//! statement bodies are then rewritten to the registered names, with scope
//! awareness so that references resolved within the same namespace body stay
//! untouched.

use ahash::HashMap;
use ahash::HashMapExt;
use semantic_dts::Program;
use semantic_dts::RefData;
use semantic_dts::StatementId;
use semantic_dts::StatementKind;
use semantic_dts::SymbolFlags;
use semantic_dts::SymbolId;
use tracing::debug;

// Symbols whose declarations can legally be renamed in the output. Function
// scoped variables (parameters, locals) are deliberately absent.
const RENAMING_SUPPORTED: SymbolFlags = SymbolFlags(
  SymbolFlags::ALIAS.0
    | SymbolFlags::BLOCK_SCOPED_VARIABLE.0
    | SymbolFlags::CLASS.0
    | SymbolFlags::ENUM.0
    | SymbolFlags::FUNCTION.0
    | SymbolFlags::INTERFACE.0
    | SymbolFlags::NAMESPACE_MODULE.0
    | SymbolFlags::TYPE_ALIAS.0
    | SymbolFlags::VALUE_MODULE.0,
);

/// Registry of output names. One instance lives for a whole bundling run and
/// is shared across entry points, so names stay stable between outputs.
pub struct CollisionsResolver<'p> {
  program: &'p Program,
  collisions: HashMap<String, Vec<SymbolId>>,
  generated_names: HashMap<SymbolId, Vec<String>>,
}

impl<'p> CollisionsResolver<'p> {
  pub fn new(program: &'p Program) -> CollisionsResolver<'p> {
    CollisionsResolver {
      program,
      collisions: HashMap::new(),
      generated_names: HashMap::new(),
    }
  }

  /// Registers `symbol` as a top-level output declaration that prefers to be
  /// named `preferred`. Returns the name it actually received, or `None` when
  /// the symbol cannot be renamed (its references will keep their source
  /// text).
  pub fn register_top_level(&mut self, symbol: SymbolId, preferred: &str) -> Option<String> {
    let symbol = self.program.resolve_alias(symbol);
    let data = self.program.symbol(symbol);
    if !data.flags.intersects(RENAMING_SUPPORTED) {
      debug!(name = preferred, "symbol does not support renaming");
      return None;
    }
    if data.is_global_scope {
      return None;
    }
    // `export default` declarations have no identifier of their own
    let name = if preferred == "default" {
      "_default"
    } else {
      preferred
    };
    let group = self.collisions.entry(name.to_string()).or_default();
    let index = match group.iter().position(|&s| s == symbol) {
      Some(index) => index,
      None => {
        group.push(symbol);
        group.len() - 1
      }
    };
    let new_name = if index == 0 {
      name.to_string()
    } else {
      format!("{name}${index}")
    };
    let names = self.generated_names.entry(symbol).or_default();
    if !names.contains(&new_name) {
      names.push(new_name.clone());
    }
    Some(new_name)
  }

  /// All names a symbol was registered under, in registration order. Empty
  /// when the symbol never made it to the top level.
  pub fn names_for_symbol(&self, symbol: SymbolId) -> &[String] {
    let symbol = self.program.resolve_alias(symbol);
    self
      .generated_names
      .get(&symbol)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  /// Rewrites one reference to its registered output name. `None` means the
  /// source text is already correct and should be left alone.
  pub fn resolve_reference(&self, reference: &RefData) -> Option<String> {
    if reference.parts.len() > 1 {
      self.resolve_referenced_qualified_name(reference)
    } else {
      self.resolve_referenced_identifier(reference)
    }
  }

  fn resolve_referenced_identifier(&self, reference: &RefData) -> Option<String> {
    let symbol = reference.target_symbol?;
    self.resolve_name(symbol, &reference.written(), reference.enclosing)
  }

  fn resolve_referenced_qualified_name(&self, reference: &RefData) -> Option<String> {
    let resolved_head = reference
      .head_symbol
      .and_then(|head| self.resolve_name(head, &reference.parts[0], reference.enclosing));
    match resolved_head {
      Some(head) => {
        let mut parts = reference.parts.clone();
        parts[0] = head;
        Some(parts.join("."))
      }
      None => {
        // a namespace import flattened away: fall back to the target's own
        // registered name
        let target = self.program.resolve_alias(reference.target_symbol?);
        self.generated_names.get(&target)?.first().cloned()
      }
    }
  }

  /// Core renaming decision for a reference to `symbol`, written as `written`
  /// at `location`.
  fn resolve_name(&self, symbol: SymbolId, written: &str, location: StatementId) -> Option<String> {
    let program = self.program;
    let symbol = program.resolve_alias(symbol);
    let symbol_scope = program
      .symbol(symbol)
      .declarations
      .first()
      .map(|&decl| self.statement_scope(decl))
      .unwrap_or_default();
    let current_scope = self.statement_scope(location);

    // a reference resolved inside the same namespace body is already correct
    if !symbol_scope.is_empty()
      && !current_scope.is_empty()
      && symbol_scope.first() == current_scope.first()
    {
      return Some(written.to_string());
    }

    let top_symbol = symbol_scope.first().copied().unwrap_or(symbol);
    let names = self.generated_names.get(&top_symbol)?;
    let top_name = if symbol_scope.is_empty() {
      written
    } else {
      program.symbol(top_symbol).name.as_str()
    };
    let new_top_name = if names.iter().any(|n| n == top_name) {
      top_name.to_string()
    } else {
      let prefix = format!("{top_name}$");
      names
        .iter()
        .find(|n| n.starts_with(&prefix))
        .unwrap_or(names.first()?)
        .clone()
    };

    if symbol_scope.is_empty() {
      return Some(new_top_name);
    }
    let mut parts: Vec<&str> = symbol_scope[1..]
      .iter()
      .map(|&s| program.symbol(s).name.as_str())
      .collect();
    parts.insert(0, &new_top_name);
    parts.push(written);
    Some(parts.join("."))
  }

  /// Namespace chain enclosing a statement, outermost first. Empty for a
  /// statement that already lives at module top level.
  fn statement_scope(&self, statement: StatementId) -> Vec<SymbolId> {
    let program = self.program;
    let mut scope = Vec::new();
    let mut current = program.statement(statement).parent;
    while let Some(parent) = current {
      let stmt = program.statement(parent);
      if matches!(stmt.kind, StatementKind::Namespace { .. }) {
        if let Some(symbol) = stmt.name_symbol {
          scope.push(symbol);
        }
      }
      current = stmt.parent;
    }
    scope.reverse();
    scope
  }
}
