//! Symbol usage graph and reachability queries.
//!
//! One pass over every module's declarations builds a child → parents
//! adjacency map: an edge from symbol `C` to symbol `P` means "`P`'s
//! declaration references `C`". Reachability from an entry export is then a
//! transitive-closure query over that map, and decides which declarations
//! survive into the bundle.

use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use semantic_dts::ImportClause;
use semantic_dts::NamespaceForm;
use semantic_dts::Program;
use semantic_dts::StatementId;
use semantic_dts::StatementKind;
use semantic_dts::SymbolId;
use semantic_dts::Token;
use std::cell::RefCell;

/// Child → parents adjacency over symbols, plus a positive-result memo for
/// reachability queries. Built once per bundling invocation and shared across
/// entry points; append-only while building.
pub struct UsageGraph {
  parents: HashMap<SymbolId, HashSet<SymbolId>>,
  // Only confirmed positives are cached: a negative reached through an
  // already-visited node is not provably final for independent queries.
  memo: RefCell<HashSet<(SymbolId, SymbolId)>>,
}

impl UsageGraph {
  /// Walks every module of the program and records usage edges.
  pub fn build(program: &Program) -> UsageGraph {
    let mut builder = UsageGraphBuilder {
      program,
      parents: HashMap::new(),
    };
    for module in program.module_ids() {
      for &statement in &program.module(module).statements {
        builder.visit_top_level(statement);
      }
    }
    UsageGraph {
      parents: builder.parents,
      memo: RefCell::new(HashSet::new()),
    }
  }

  /// Direct users of `symbol`, or `None` when no usage was ever recorded.
  pub fn users_of(&self, symbol: SymbolId) -> Option<&HashSet<SymbolId>> {
    self.parents.get(&symbol)
  }

  /// True iff `to` is reachable from `from` over child → parent edges, or
  /// the two are identical. Cycle-safe via an explicit stack and per-query
  /// visited set.
  pub fn is_used_by(&self, from: SymbolId, to: SymbolId) -> bool {
    if from == to {
      return true;
    }
    if self.memo.borrow().contains(&(from, to)) {
      return true;
    }
    let mut visited = HashSet::new();
    visited.insert(from);
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
      let Some(parents) = self.parents.get(&current) else {
        continue;
      };
      for &parent in parents {
        if parent == to || self.memo.borrow().contains(&(parent, to)) {
          self.memo.borrow_mut().insert((from, to));
          return true;
        }
        if visited.insert(parent) {
          stack.push(parent);
        }
      }
    }
    false
  }
}

struct UsageGraphBuilder<'p> {
  program: &'p Program,
  parents: HashMap<SymbolId, HashSet<SymbolId>>,
}

impl<'p> UsageGraphBuilder<'p> {
  fn visit_top_level(&mut self, statement: StatementId) {
    let program = self.program;
    let stmt = program.statement(statement);
    match &stmt.kind {
      StatementKind::ImportDecl { clause, from } => {
        // `import * as ns` ties the namespace binding to the module it
        // wraps; consuming the namespace consumes the module
        if let ImportClause::Namespace { symbol, .. } = clause {
          if let Some(module) = from.resolved {
            if let Some(module_symbol) = program.module(module).symbol {
              self.add_edge(module_symbol, *symbol);
            }
          }
        }
      }
      StatementKind::ExportList { entries, from } => {
        // re-export lists link each underlying symbol to its export binding
        if from.is_some() {
          for entry in entries {
            if let Some(binding) = entry.binding {
              let target = program.resolve_alias(binding);
              if target != binding {
                self.add_edge(target, binding);
              }
            }
          }
        }
      }
      StatementKind::ExportStar { .. } => {}
      StatementKind::ExportStarAs { binding, from, .. } => {
        // consuming the namespace transitively consumes everything the
        // wrapped module exports
        if let Some(module) = from.resolved {
          let module_symbol = program.module(module).symbol;
          if let Some(module_symbol) = module_symbol {
            self.add_edge(module_symbol, *binding);
          }
          for export in program.exports_of(module) {
            let target = program.resolve_alias(export.symbol);
            self.add_edge(target, *binding);
            if let Some(module_symbol) = module_symbol {
              self.add_edge(target, module_symbol);
            }
          }
        }
      }
      StatementKind::ExportAssignment { is_equals } => {
        if *is_equals {
          self.visit_export_equals(statement);
        }
      }
      StatementKind::Namespace {
        form: NamespaceForm::QuotedModule { .. },
      } => self.visit_ambient_module(statement),
      StatementKind::Namespace {
        form: NamespaceForm::Global,
      } => self.visit_global_block(statement),
      _ => {
        if let Some(symbol) = stmt.name_symbol {
          self.walk(statement, symbol);
        }
      }
    }
  }

  /// Visits a `declare module "..."` block. Importing anything declared
  /// inside requires acknowledging the block itself, so the block's symbol is
  /// used by each inner declaration.
  fn visit_ambient_module(&mut self, statement: StatementId) {
    let program = self.program;
    let stmt = program.statement(statement);
    let block_symbol = stmt.name_symbol;
    for &child in &stmt.children {
      match program.statement(child).name_symbol {
        Some(child_symbol) => {
          if let Some(block) = block_symbol {
            self.add_edge(block, child_symbol);
          }
          self.walk(child, child_symbol);
        }
        None => {
          if let Some(block) = block_symbol {
            self.walk(child, block);
          }
        }
      }
    }
  }

  /// Visits a `declare global` block; members are used by the global scope
  /// symbol so the block's dependencies stay reachable when it is inlined.
  fn visit_global_block(&mut self, statement: StatementId) {
    let program = self.program;
    let stmt = program.statement(statement);
    let global_symbol = stmt.name_symbol;
    for &child in &stmt.children {
      match program.statement(child).name_symbol {
        Some(child_symbol) => {
          if let Some(global) = global_symbol {
            self.add_edge(child_symbol, global);
          }
          self.walk(child, child_symbol);
        }
        None => {
          if let Some(global) = global_symbol {
            self.walk(child, global);
          }
        }
      }
    }
  }

  /// `export = ns` where `ns` is a namespace block declared in the module:
  /// every member of the block is used by the namespace's own symbol, so
  /// importing any member also requires the umbrella namespace.
  fn visit_export_equals(&mut self, statement: StatementId) {
    let program = self.program;
    let stmt = program.statement(statement);
    for token in &stmt.tokens {
      let Token::Ref(reference) = token else {
        continue;
      };
      let Some(target) = program.reference(*reference).target_symbol else {
        continue;
      };
      let target = program.resolve_alias(target);
      if !program
        .symbol(target)
        .flags
        .intersects(semantic_dts::SymbolFlags::MODULE)
      {
        continue;
      }
      for &declaration in program.declarations_of(target) {
        let decl = program.statement(declaration);
        if !matches!(decl.kind, StatementKind::Namespace { .. }) {
          continue;
        }
        for &member in &decl.children {
          if let Some(member_symbol) = program.statement(member).name_symbol {
            self.add_edge(member_symbol, target);
          }
        }
      }
    }
  }

  /// Recursively records edges for every reference inside `statement`, with
  /// `parent` as the using symbol. Descending into a nested named declaration
  /// switches the parent to the nested declaration's own symbol and marks the
  /// nested symbol as used by the enclosing one (the enclosing declaration
  /// emits its members with it).
  fn walk(&mut self, statement: StatementId, parent: SymbolId) {
    let program = self.program;
    let stmt = program.statement(statement);
    for token in &stmt.tokens {
      let Token::Ref(reference) = token else {
        continue;
      };
      let reference = program.reference(*reference);
      for symbol in [reference.head_symbol, reference.target_symbol]
        .into_iter()
        .flatten()
      {
        let symbol = program.resolve_alias(symbol);
        self.add_edge(symbol, parent);
      }
    }
    for &child in &stmt.children {
      match program.statement(child).name_symbol {
        Some(child_symbol) => {
          self.add_edge(child_symbol, parent);
          self.walk(child, child_symbol);
        }
        None => self.walk(child, parent),
      }
    }
  }

  /// Records `child` as used by `parent`. Merged (transient) symbols are
  /// split back into their per-declaration constituents first; self-edges are
  /// suppressed but still materialize the child's node.
  fn add_edge(&mut self, child: SymbolId, parent: SymbolId) {
    let program = self.program;
    for c in program.split_symbol(child) {
      for p in program.split_symbol(parent) {
        let set = self.parents.entry(c).or_default();
        if c != p {
          set.insert(p);
        }
      }
    }
  }
}
