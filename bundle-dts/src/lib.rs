//! Bundles a program of TypeScript declaration modules into one
//! self-contained `.d.ts` artifact per entry point.
//!
//! The pipeline: classify every module (inline, import, types directive, or
//! ambient-only), build a symbol usage graph, keep only declarations
//! reachable from the entry's exports, rename colliding top-level names with
//! `$N` suffixes, and render the surviving statements with consolidated
//! imports and a trailing re-export list. The semantic model itself (modules,
//! statements, symbols, references) comes from the `semantic-dts` crate; this
//! crate never parses source text.

mod checks;
mod collector;
mod collisions;
mod error;
mod module_info;
mod options;
mod output;
mod usage;

pub use collector::CollectedOutput;
pub use collector::CollectedStatement;
pub use collector::ExportDecision;
pub use collector::LibraryImports;
pub use collector::RenamedExport;
pub use collector::StatementCollector;
pub use collisions::CollisionsResolver;
pub use error::BundleError;
pub use error::OffendingStatement;
pub use error::RuntimeStatementKind;
pub use module_info::library_name;
pub use module_info::module_info;
pub use module_info::types_library_name;
pub use module_info::ModuleCriteria;
pub use module_info::ModuleInfo;
pub use options::GenerationOptions;
pub use output::generate_output;
pub use output::OutputParams;
pub use usage::UsageGraph;

use semantic_dts::Program;
use tracing::info;

/// Re-checks an emitted artifact, returning diagnostics. Implementations
/// typically hand the text back to a TypeScript checker.
pub trait Verifier {
  fn check(&self, file_name: &str, text: &str) -> Vec<String>;
}

/// Generates one artifact per entry file name, in the given order.
///
/// The usage graph and collision resolver are built once and shared across
/// entries, so a symbol that appears in several artifacts keeps the same
/// final name in all of them.
pub fn generate_dts_bundle(
  program: &Program,
  entries: &[&str],
  options: &GenerationOptions,
) -> Result<Vec<String>, BundleError> {
  if entries.is_empty() {
    return Err(BundleError::NoEntryPoints);
  }
  let mut entry_modules = Vec::with_capacity(entries.len());
  for &file_name in entries {
    let module = program
      .module_by_file_name(file_name)
      .ok_or_else(|| BundleError::EntryFileNotFound {
        file_name: file_name.to_string(),
      })?;
    entry_modules.push(module);
  }

  let graph = UsageGraph::build(program);
  let mut resolver = CollisionsResolver::new(program);
  let mut artifacts = Vec::with_capacity(entries.len());
  for (&file_name, &entry) in entries.iter().zip(entry_modules.iter()) {
    info!(file = file_name, "processing entry");
    let collected =
      StatementCollector::new(program, options, &graph, &mut resolver).collect(entry)?;
    let params = OutputParams {
      program,
      resolver: &resolver,
      collected: &collected,
    };
    artifacts.push(generate_output(&params, options));
  }
  Ok(artifacts)
}

/// Like [`generate_dts_bundle`], then runs every artifact through `verifier`.
/// Any diagnostic aborts the invocation.
pub fn generate_dts_bundle_verified(
  program: &Program,
  entries: &[&str],
  options: &GenerationOptions,
  verifier: &dyn Verifier,
) -> Result<Vec<String>, BundleError> {
  let artifacts = generate_dts_bundle(program, entries, options)?;
  for (&file_name, text) in entries.iter().zip(artifacts.iter()) {
    let diagnostics = verifier.check(file_name, text);
    if !diagnostics.is_empty() {
      return Err(BundleError::Verification {
        file_name: file_name.to_string(),
        diagnostics,
      });
    }
  }
  Ok(artifacts)
}
