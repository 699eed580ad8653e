//! Module classifier: decides, per source module, whether its declarations
//! are copied inline, referenced via an import, referenced via a types
//! directive, or kept only for ambient-module lookups.

/// Classification of one module. Pure output of [`module_info`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ModuleInfo {
  /// Declarations are copied into the output.
  Inlined { is_external: bool },
  /// Used declarations become import statements from this library.
  Imported { library_name: String },
  /// The whole module is covered by a `/// <reference types="..." />`
  /// directive.
  ReferencedAsTypes { types_library_name: String },
  /// Kept available for ambient-module lookups only; never contributes
  /// top-level output.
  ModulesOnly,
}

impl ModuleInfo {
  pub fn is_external(&self) -> bool {
    !matches!(self, ModuleInfo::Inlined { is_external: false })
  }
}

/// Classifier criteria. `None` allow-lists are unrestricted.
#[derive(Clone, Copy, Debug)]
pub struct ModuleCriteria<'a> {
  pub inlined_libraries: &'a [String],
  pub imported_libraries: Option<&'a [String]>,
  pub allowed_types_libraries: Option<&'a [String]>,
  pub type_roots: Option<&'a [String]>,
}

/// Classifies a module by its file name. Deterministic and side-effect free.
pub fn module_info(file_name: &str, criteria: &ModuleCriteria) -> ModuleInfo {
  module_info_impl(file_name, file_name, criteria)
}

fn module_info_impl(
  current_path: &str,
  original_file_name: &str,
  criteria: &ModuleCriteria,
) -> ModuleInfo {
  let npm_library_name = match library_name(current_path) {
    Some(name) => name,
    None => {
      if let Some(roots) = criteria.type_roots {
        for root in roots {
          if let Some(relative) = path_relative_to(root, original_file_name) {
            // a module under a type root behaves like a library from
            // node_modules/@types
            let remapped = format!("node_modules/@types/{relative}");
            return module_info_impl(&remapped, original_file_name, criteria);
          }
        }
      }
      return ModuleInfo::Inlined { is_external: false };
    }
  };

  let types_library_name = types_library_name(npm_library_name);

  if should_library_be_inlined(npm_library_name, types_library_name, criteria.inlined_libraries) {
    return ModuleInfo::Inlined { is_external: true };
  }

  if should_library_be_imported(
    npm_library_name,
    types_library_name,
    criteria.imported_libraries,
  ) {
    return ModuleInfo::Imported {
      library_name: types_library_name.unwrap_or(npm_library_name).to_string(),
    };
  }

  if let Some(types_name) = types_library_name {
    if is_library_allowed(types_name, criteria.allowed_types_libraries) {
      return ModuleInfo::ReferencedAsTypes {
        types_library_name: types_name.to_string(),
      };
    }
  }

  ModuleInfo::ModulesOnly
}

fn should_library_be_inlined(
  npm_library_name: &str,
  types_library_name: Option<&str>,
  inlined_libraries: &[String],
) -> bool {
  is_library_listed(npm_library_name, inlined_libraries)
    || types_library_name.is_some_and(|name| is_library_listed(name, inlined_libraries))
}

fn should_library_be_imported(
  npm_library_name: &str,
  types_library_name: Option<&str>,
  imported_libraries: Option<&[String]>,
) -> bool {
  // an npm package can be imported only when it is not from @types
  let npm_importable =
    types_library_name.is_none() && is_library_allowed(npm_library_name, imported_libraries);

  // a package from @types can be imported only when listed explicitly
  let types_importable = imported_libraries.is_some()
    && types_library_name.is_some_and(|name| is_library_allowed(name, imported_libraries));

  npm_importable || types_importable
}

fn is_library_allowed(library_name: &str, allowed: Option<&[String]>) -> bool {
  allowed.is_none_or(|list| is_library_listed(library_name, list))
}

fn is_library_listed(library_name: &str, list: &[String]) -> bool {
  list.iter().any(|allowed| allowed == library_name)
}

/// Extracts the dependency-library name from a path under `node_modules/`,
/// handling scoped packages. `None` for paths outside any dependency root.
pub fn library_name(file_name: &str) -> Option<&str> {
  const FOLDER: &str = "node_modules/";
  let start = file_name.rfind(FOLDER)? + FOLDER.len();
  let rest = &file_name[start..];
  let first_slash = rest.find('/')?;
  let first = &rest[..first_slash];
  if first.is_empty() {
    return None;
  }
  if !first.starts_with('@') {
    return Some(first);
  }
  let tail = &rest[first_slash + 1..];
  let second_slash = tail.find('/')?;
  if second_slash == 0 {
    return None;
  }
  Some(&rest[..first_slash + 1 + second_slash])
}

/// The package name a `@types/...` library provides declarations for.
pub fn types_library_name(library_name: &str) -> Option<&str> {
  library_name.strip_prefix("@types/")
}

// Containment check on normalized slash paths. The original computes a
// relative path and rejects anything escaping the root; providers hand us
// already-normalized module file names, so prefix matching suffices.
fn path_relative_to<'a>(root: &str, file_name: &'a str) -> Option<&'a str> {
  let root = root.strip_suffix('/').unwrap_or(root);
  let rest = file_name.strip_prefix(root)?;
  let rest = rest.strip_prefix('/')?;
  if rest.is_empty() {
    None
  } else {
    Some(rest)
  }
}
