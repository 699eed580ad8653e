//! Statement collector: walks every module in dependency order and decides,
//! per statement, whether it is inlined into the output, turned into an
//! import from an external library, covered by a types directive, or dropped.

use crate::collisions::CollisionsResolver;
use crate::error::BundleError;
use crate::module_info::module_info;
use crate::module_info::ModuleInfo;
use crate::options::GenerationOptions;
use crate::usage::UsageGraph;
use ahash::HashSet;
use ahash::HashSetExt;
use semantic_dts::ExportKind;
use semantic_dts::ImportClause;
use semantic_dts::ModuleId;
use semantic_dts::ModuleSpecifier;
use semantic_dts::NamespaceForm;
use semantic_dts::Program;
use semantic_dts::StatementId;
use semantic_dts::StatementKind;
use semantic_dts::SymbolId;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Import bindings collected for one external library, separated by style.
/// Sets keep the rendered lines deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryImports {
  /// `import * as X from '...';` locals.
  pub namespace_imports: BTreeSet<String>,
  /// `import X from '...';` locals.
  pub default_imports: BTreeSet<String>,
  /// `import { name as local }` pairs; `(name, name)` when unaliased.
  pub named_imports: BTreeSet<(String, String)>,
  /// `import X = require('...');` locals.
  pub require_imports: BTreeSet<String>,
}

/// One row of the trailing `export { ... };` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamedExport {
  /// Final (possibly suffixed) name of the declaration in the output.
  pub local: String,
  /// Outward-facing export name.
  pub exported: String,
}

/// Export treatment of one retained statement, decided during collection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportDecision {
  /// No export keyword; exposure (if any) goes through the trailing list.
  None,
  /// Prefix with `export` even though the final exposure decision was made
  /// against the entry's export table, not the source modifiers.
  Export,
  /// Entry-module statement kept with its source modifiers.
  KeepSource,
}

/// A statement retained for output.
#[derive(Clone, Debug)]
pub enum CollectedStatement {
  Statement {
    id: StatementId,
    export: ExportDecision,
  },
  /// Synthesized namespace for `export * as NS from './inlined'`; the
  /// wrapped module's exports are flattened to top level, so the namespace
  /// re-exports their final names as `(local, exported)` pairs, preserving
  /// the outward member names when a local was renamed.
  StarNamespace {
    name: String,
    members: Vec<(String, String)>,
    module: ModuleId,
  },
}

impl CollectedStatement {
  pub fn module(&self, program: &Program) -> ModuleId {
    match self {
      CollectedStatement::Statement { id, .. } => program.statement(*id).module,
      CollectedStatement::StarNamespace { module, .. } => *module,
    }
  }
}

/// Everything one entry point contributes to its artifact.
#[derive(Clone, Debug, Default)]
pub struct CollectedOutput {
  pub statements: Vec<CollectedStatement>,
  /// Library name to collected bindings, ordered by library name.
  pub imports: BTreeMap<String, LibraryImports>,
  pub types_references: BTreeSet<String>,
  /// Entries of the trailing `export { ... };` list, unsorted; the emitter
  /// orders them by local name.
  pub renamed_exports: Vec<RenamedExport>,
}

/// Per-invocation collector. The usage graph and collision resolver are
/// shared across entry points so a symbol keeps one name in every artifact.
pub struct StatementCollector<'a, 'p> {
  program: &'p Program,
  options: &'a GenerationOptions,
  graph: &'a UsageGraph,
  resolver: &'a mut CollisionsResolver<'p>,
  infos: Vec<ModuleInfo>,
}

impl<'a, 'p> StatementCollector<'a, 'p> {
  pub fn new(
    program: &'p Program,
    options: &'a GenerationOptions,
    graph: &'a UsageGraph,
    resolver: &'a mut CollisionsResolver<'p>,
  ) -> StatementCollector<'a, 'p> {
    let criteria = options.criteria();
    let infos = program
      .module_ids()
      .map(|module| module_info(&program.module(module).file_name, &criteria))
      .collect();
    StatementCollector {
      program,
      options,
      graph,
      resolver,
      infos,
    }
  }

  pub fn collect(&mut self, entry: ModuleId) -> Result<CollectedOutput, BundleError> {
    let program = self.program;
    let roots = self.roots_for(entry);
    let mut out = CollectedOutput::default();
    // symbols whose statements carry the export keyword themselves
    let mut exported_with_keyword: HashSet<SymbolId> = HashSet::new();
    // export names already handled by pass-through re-export statements
    let mut pass_through: HashSet<String> = HashSet::new();
    let mut default_covered = false;

    for module_id in program.module_ids() {
      let module = program.module(module_id);
      if module.is_default_lib {
        continue;
      }
      let info = self.infos[module_id.0 as usize].clone();

      for &statement in &module.statements {
        let stmt = program.statement(statement);

        // ambient quoted modules follow the classification of the module
        // they augment, not of the file they were written in
        if let StatementKind::Namespace {
          form: NamespaceForm::QuotedModule { augmented, .. },
        } = &stmt.kind
        {
          let effective = match augmented {
            Some(target) => &self.infos[target.0 as usize],
            None => &info,
          };
          if matches!(effective, ModuleInfo::Inlined { .. })
            && stmt.name_symbol.is_some_and(|sym| self.is_used(&roots, sym))
          {
            out.statements.push(CollectedStatement::Statement {
              id: statement,
              export: ExportDecision::None,
            });
          }
          continue;
        }

        match &info {
          ModuleInfo::ModulesOnly => continue,
          ModuleInfo::ReferencedAsTypes { types_library_name } => {
            if stmt.name_symbol.is_some_and(|sym| self.is_used(&roots, sym)) {
              record_types_reference(&mut out, types_library_name);
              // one directive covers the whole library
              break;
            }
          }
          ModuleInfo::Imported { library_name } => {
            self.collect_imported_module_statement(statement, library_name, &roots, &mut out);
          }
          ModuleInfo::Inlined { .. } => match &stmt.kind {
            StatementKind::ImportDecl { clause, from } => {
              self.collect_import(clause, from, &roots, &mut out);
            }
            StatementKind::ExportList {
              entries,
              from: Some(from),
            } if module_id == entry && self.resolves_to_imported(from) => {
              for row in entries {
                pass_through.insert(row.exported.clone());
              }
              out.statements.push(CollectedStatement::Statement {
                id: statement,
                export: ExportDecision::KeepSource,
              });
            }
            StatementKind::ExportStar { from }
              if module_id == entry && self.resolves_to_imported(from) =>
            {
              out.statements.push(CollectedStatement::Statement {
                id: statement,
                export: ExportDecision::KeepSource,
              });
            }
            StatementKind::ExportStarAs { name, binding, from } => {
              if self.resolves_to_imported(from) {
                if module_id == entry {
                  pass_through.insert(name.clone());
                  out.statements.push(CollectedStatement::Statement {
                    id: statement,
                    export: ExportDecision::KeepSource,
                  });
                }
              } else if let Some(target) = from.resolved {
                // intermediate modules synthesize namespaces too; the entry
                // may expose their binding through a re-export chain
                if !self.is_used(&roots, *binding) {
                  continue;
                }
                let ns = self
                  .resolver
                  .register_top_level(*binding, name)
                  .unwrap_or_else(|| name.clone());
                let members = self.star_namespace_members(target);
                out.statements.push(CollectedStatement::StarNamespace {
                  name: ns,
                  members,
                  module: module_id,
                });
              }
            }
            StatementKind::ExportAssignment { is_equals } => {
              if module_id != entry {
                continue;
              }
              out.statements.push(CollectedStatement::Statement {
                id: statement,
                export: ExportDecision::KeepSource,
              });
              if !is_equals {
                default_covered = true;
              }
            }
            StatementKind::Namespace {
              form: NamespaceForm::Global,
            } => {
              // global augmentations are observable side effects; usage does
              // not gate them
              if self.options.inline_declare_global {
                out.statements.push(CollectedStatement::Statement {
                  id: statement,
                  export: ExportDecision::KeepSource,
                });
              }
            }
            _ if !stmt.is_named_declaration() => continue,
            _ => {
              let (Some(declared), Some(symbol)) = (stmt.name.clone(), stmt.name_symbol) else {
                // unnamed `export default class/function`
                if module_id == entry && stmt.modifiers.default {
                  out.statements.push(CollectedStatement::Statement {
                    id: statement,
                    export: ExportDecision::KeepSource,
                  });
                  default_covered = true;
                }
                continue;
              };
              if !self.is_used(&roots, symbol) {
                debug!(
                  name = declared.as_str(),
                  file = module.file_name.as_str(),
                  "skip unused statement"
                );
                continue;
              }
              if self.options.fail_on_class && matches!(stmt.kind, StatementKind::Class) {
                return Err(BundleError::ClassEmitted {
                  name: declared,
                  module: module.file_name.clone(),
                });
              }
              let final_name = self
                .resolver
                .register_top_level(symbol, &declared)
                .unwrap_or_else(|| declared.clone());
              let export = if module_id == entry && final_name == declared {
                if stmt.modifiers.export {
                  exported_with_keyword.insert(symbol);
                  if stmt.modifiers.default {
                    default_covered = true;
                  }
                }
                ExportDecision::KeepSource
              } else if stmt.modifiers.export
                && !stmt.modifiers.default
                && self.entry_exports_as(entry, symbol, &final_name)
              {
                exported_with_keyword.insert(symbol);
                ExportDecision::Export
              } else {
                ExportDecision::None
              };
              out.statements.push(CollectedStatement::Statement {
                id: statement,
                export,
              });
            }
          },
        }
      }
    }

    for row in program.exports_of(entry) {
      match row.kind {
        ExportKind::ExportEquals => continue,
        ExportKind::Default if default_covered => continue,
        _ => {}
      }
      if pass_through.contains(&row.name) {
        continue;
      }
      let symbol = program.resolve_alias(row.symbol);
      let Some(local) = self.output_name_for(symbol, &row.name) else {
        warn!(
          name = row.name.as_str(),
          "entry export was not retained under any name"
        );
        continue;
      };
      let covered = program
        .split_symbol(symbol)
        .iter()
        .any(|part| exported_with_keyword.contains(part));
      match row.kind {
        ExportKind::Default => out.renamed_exports.push(RenamedExport {
          local,
          exported: "default".to_string(),
        }),
        ExportKind::Local => {
          if covered && local == row.name {
            continue;
          }
          out.renamed_exports.push(RenamedExport {
            local,
            exported: row.name.clone(),
          });
        }
        ExportKind::ExportEquals => {}
      }
    }

    crate::checks::ensure_runtime_statements_exported(program, entry, &out.statements)?;
    Ok(out)
  }

  /// De-aliased (and split) entry exports, plus the synthetic global scope
  /// symbols of inlined modules when global inlining is on.
  fn roots_for(&self, entry: ModuleId) -> Vec<SymbolId> {
    let program = self.program;
    let mut roots = Vec::new();
    for row in program.exports_of(entry) {
      let symbol = program.resolve_alias(row.symbol);
      roots.extend(program.split_symbol(symbol));
    }
    if self.options.inline_declare_global {
      for module_id in program.module_ids() {
        if !matches!(self.infos[module_id.0 as usize], ModuleInfo::Inlined { .. }) {
          continue;
        }
        for &statement in &program.module(module_id).statements {
          let stmt = program.statement(statement);
          if matches!(
            stmt.kind,
            StatementKind::Namespace {
              form: NamespaceForm::Global
            }
          ) {
            roots.extend(stmt.name_symbol);
          }
        }
      }
    }
    roots
  }

  fn is_used(&self, roots: &[SymbolId], symbol: SymbolId) -> bool {
    let symbol = self.program.resolve_alias(symbol);
    self
      .program
      .split_symbol(symbol)
      .into_iter()
      .any(|part| roots.iter().any(|&root| self.graph.is_used_by(part, root)))
  }

  /// True when the entry's export table exposes `symbol` under exactly
  /// `name` via a plain named export.
  fn entry_exports_as(&self, entry: ModuleId, symbol: SymbolId, name: &str) -> bool {
    let program = self.program;
    program.exports_of(entry).iter().any(|row| {
      if row.kind != ExportKind::Local || row.name != name {
        return false;
      }
      let resolved = program.resolve_alias(row.symbol);
      resolved == symbol || program.split_symbol(resolved).contains(&symbol)
    })
  }

  /// Statements inside a module that stays external as an importable
  /// library. Used named declarations become named imports; a legacy
  /// `export =` of a namespace exposes that namespace's members the same way.
  fn collect_imported_module_statement(
    &mut self,
    statement: StatementId,
    library_name: &str,
    roots: &[SymbolId],
    out: &mut CollectedOutput,
  ) {
    let program = self.program;
    let stmt = program.statement(statement);
    match &stmt.kind {
      StatementKind::ExportAssignment { is_equals: true } => {
        for member in self.export_equals_members(statement) {
          let (name, symbol) = member;
          if !self.is_used(roots, symbol) {
            continue;
          }
          let local = self
            .resolver
            .register_top_level(symbol, &name)
            .unwrap_or_else(|| name.clone());
          add_named_import(out, library_name, &name, &local);
        }
      }
      _ if stmt.is_import_or_export_form() => {}
      _ => {
        let (Some(name), Some(symbol)) = (stmt.name.clone(), stmt.name_symbol) else {
          return;
        };
        if !self.is_used(roots, symbol) {
          return;
        }
        let local = self
          .resolver
          .register_top_level(symbol, &name)
          .unwrap_or_else(|| name.clone());
        info!(
          name = name.as_str(),
          library = library_name,
          "add import for library"
        );
        add_named_import(out, library_name, &name, &local);
      }
    }
  }

  /// Named members of the namespace targeted by an `export =` statement.
  fn export_equals_members(&self, statement: StatementId) -> Vec<(String, SymbolId)> {
    let program = self.program;
    let stmt = program.statement(statement);
    let mut members = Vec::new();
    for token in &stmt.tokens {
      let semantic_dts::Token::Ref(reference) = token else {
        continue;
      };
      let Some(target) = program.reference(*reference).target_symbol else {
        continue;
      };
      let target = program.resolve_alias(target);
      for &declaration in program.declarations_of(target) {
        let decl = program.statement(declaration);
        if !matches!(decl.kind, StatementKind::Namespace { .. }) {
          continue;
        }
        for &child in &decl.children {
          let child_stmt = program.statement(child);
          if let (Some(name), Some(symbol)) = (&child_stmt.name, child_stmt.name_symbol) {
            members.push((name.clone(), symbol));
          }
        }
      }
    }
    members
  }

  /// Import declaration inside an inlined module: bindings whose targets are
  /// reachable from a root export land in the import table under the target
  /// library, registering their locals for collision-safe aliasing.
  fn collect_import(
    &mut self,
    clause: &ImportClause,
    from: &ModuleSpecifier,
    roots: &[SymbolId],
    out: &mut CollectedOutput,
  ) {
    let Some(info) = self.import_target_info(from) else {
      return;
    };
    match info {
      ModuleInfo::Imported { library_name } => match clause {
        ImportClause::Named(specifiers) => {
          for specifier in specifiers {
            if !self.is_used(roots, specifier.symbol) {
              debug!(local = specifier.local.as_str(), "skip unused import");
              continue;
            }
            let local = self
              .resolver
              .register_top_level(specifier.symbol, &specifier.local)
              .unwrap_or_else(|| specifier.local.clone());
            add_named_import(out, &library_name, &specifier.name, &local);
          }
        }
        ImportClause::Namespace { local, symbol } => {
          if !self.is_used(roots, *symbol) {
            return;
          }
          self.resolver.register_top_level(*symbol, local);
          // aliases of one module collapse onto its first registered name
          let canonical = self
            .resolver
            .names_for_symbol(*symbol)
            .first()
            .cloned()
            .unwrap_or_else(|| local.clone());
          out
            .imports
            .entry(library_name)
            .or_default()
            .namespace_imports
            .insert(canonical);
        }
        ImportClause::Default { local, symbol } => {
          if !self.is_used(roots, *symbol) {
            return;
          }
          let local = self
            .resolver
            .register_top_level(*symbol, local)
            .unwrap_or_else(|| local.clone());
          out
            .imports
            .entry(library_name)
            .or_default()
            .default_imports
            .insert(local);
        }
        ImportClause::Require { local, symbol } => {
          if !self.is_used(roots, *symbol) {
            return;
          }
          let local = self
            .resolver
            .register_top_level(*symbol, local)
            .unwrap_or_else(|| local.clone());
          out
            .imports
            .entry(library_name)
            .or_default()
            .require_imports
            .insert(local);
        }
      },
      ModuleInfo::ReferencedAsTypes { types_library_name } => {
        let used = match clause {
          ImportClause::Named(specifiers) => specifiers
            .iter()
            .any(|specifier| self.is_used(roots, specifier.symbol)),
          ImportClause::Namespace { symbol, .. }
          | ImportClause::Default { symbol, .. }
          | ImportClause::Require { symbol, .. } => self.is_used(roots, *symbol),
        };
        if used {
          record_types_reference(out, &types_library_name);
        }
      }
      ModuleInfo::Inlined { .. } | ModuleInfo::ModulesOnly => {}
    }
  }

  /// Classification of an import/export target. Specifiers that do not
  /// resolve inside the program are classified through a synthetic
  /// `node_modules` path; relative ones that fail to resolve are dropped.
  fn import_target_info(&self, from: &ModuleSpecifier) -> Option<ModuleInfo> {
    if let Some(module) = from.resolved {
      return Some(self.infos[module.0 as usize].clone());
    }
    if from.text.starts_with('.') {
      debug!(specifier = from.text.as_str(), "unresolved relative import");
      return None;
    }
    let synthetic = format!("node_modules/{}/index.d.ts", from.text);
    Some(module_info(&synthetic, &self.options.criteria()))
  }

  fn resolves_to_imported(&self, from: &ModuleSpecifier) -> bool {
    matches!(
      self.import_target_info(from),
      Some(ModuleInfo::Imported { .. })
    )
  }

  /// `(local, exported)` member pairs of a synthesized star-export
  /// namespace: the final flattened name of each export of the inlined
  /// module, paired with the name the module exported it under.
  fn star_namespace_members(&self, module: ModuleId) -> Vec<(String, String)> {
    let program = self.program;
    let mut members = Vec::new();
    for row in program.exports_of(module) {
      let symbol = program.resolve_alias(row.symbol);
      if let Some(local) = self.output_name_for(symbol, &row.name) {
        members.push((local, row.name.clone()));
      }
    }
    members
  }

  /// The registered output name of a symbol, preferring `preferred` (or a
  /// `preferred$N` variant) among the names it received. `None` when the
  /// symbol never reached the top level.
  fn output_name_for(&self, symbol: SymbolId, preferred: &str) -> Option<String> {
    let program = self.program;
    let mut names: Vec<&String> = Vec::new();
    for part in program.split_symbol(symbol) {
      names.extend(self.resolver.names_for_symbol(part));
    }
    if names.is_empty() {
      return None;
    }
    if names.iter().any(|name| *name == preferred) {
      return Some(preferred.to_string());
    }
    let prefix = format!("{preferred}$");
    names
      .iter()
      .find(|name| name.starts_with(&prefix))
      .or(names.first())
      .map(|name| (*name).clone())
  }
}

fn add_named_import(out: &mut CollectedOutput, library: &str, name: &str, local: &str) {
  out
    .imports
    .entry(library.to_string())
    .or_default()
    .named_imports
    .insert((name.to_string(), local.to_string()));
}

fn record_types_reference(out: &mut CollectedOutput, library: &str) {
  if out.types_references.insert(library.to_string()) {
    info!(
      library = library,
      "library will be added via reference directive"
    );
  }
}
