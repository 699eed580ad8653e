use crate::module_info::ModuleCriteria;
use serde::Deserialize;
use serde::Serialize;

/// Options of one bundling invocation. The classifier criteria, the output
/// shape toggles, and the policies all live here; the configuration-file and
/// CLI layers that populate this struct are external collaborators.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
  /// Libraries whose declarations are copied inline into the output.
  pub inlined_libraries: Vec<String>,
  /// Libraries that may be referenced via import statements. `None` means
  /// unrestricted.
  pub imported_libraries: Option<Vec<String>>,
  /// `@types` packages that may be referenced via
  /// `/// <reference types="..." />` directives. `None` means unrestricted.
  pub allowed_types_libraries: Option<Vec<String>>,
  /// Extra directories treated as if they were `node_modules/@types`.
  pub type_roots: Option<Vec<String>>,
  /// Copy `declare global` blocks of inlined modules into the output.
  pub inline_declare_global: bool,
  /// Sort output statements by their rendered text.
  pub sort_output: bool,
  /// Fail the run when a class declaration would be emitted.
  pub fail_on_class: bool,
  /// Prefix each module's contribution with a `// File:` banner. Ignored
  /// when `sort_output` is on (sorting scrambles module grouping).
  pub output_file_names: bool,
  /// Emit an `export as namespace <name>;` trailer for UMD consumers.
  pub umd_module_name: Option<String>,
}

impl GenerationOptions {
  /// Classifier criteria view over these options.
  pub fn criteria(&self) -> ModuleCriteria<'_> {
    ModuleCriteria {
      inlined_libraries: &self.inlined_libraries,
      imported_libraries: self.imported_libraries.as_deref(),
      allowed_types_libraries: self.allowed_types_libraries.as_deref(),
      type_roots: self.type_roots.as_deref(),
    }
  }
}
