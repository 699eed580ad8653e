use bundle_dts::library_name;
use bundle_dts::module_info;
use bundle_dts::types_library_name;
use bundle_dts::ModuleCriteria;
use bundle_dts::ModuleInfo;

fn unrestricted() -> ModuleCriteria<'static> {
  ModuleCriteria {
    inlined_libraries: &[],
    imported_libraries: None,
    allowed_types_libraries: None,
    type_roots: None,
  }
}

#[test]
fn local_file_is_inlined() {
  let info = module_info("src/main.d.ts", &unrestricted());
  assert_eq!(info, ModuleInfo::Inlined { is_external: false });
  assert!(!info.is_external());
}

#[test]
fn npm_package_is_imported_when_unrestricted() {
  let info = module_info("node_modules/pkg/index.d.ts", &unrestricted());
  assert_eq!(
    info,
    ModuleInfo::Imported {
      library_name: "pkg".to_string()
    }
  );
  assert!(info.is_external());
}

#[test]
fn scoped_package_name_includes_scope() {
  assert_eq!(
    library_name("node_modules/@scope/pkg/lib/index.d.ts"),
    Some("@scope/pkg")
  );
  assert_eq!(library_name("node_modules/pkg/index.d.ts"), Some("pkg"));
  assert_eq!(library_name("src/app/index.d.ts"), None);
  // the innermost node_modules wins for nested installations
  assert_eq!(
    library_name("node_modules/a/node_modules/b/index.d.ts"),
    Some("b")
  );
}

#[test]
fn types_library_name_strips_prefix() {
  assert_eq!(types_library_name("@types/node"), Some("node"));
  assert_eq!(types_library_name("@scope/pkg"), None);
  assert_eq!(types_library_name("pkg"), None);
}

#[test]
fn inlined_list_beats_import() {
  let inlined = vec!["pkg".to_string()];
  let criteria = ModuleCriteria {
    inlined_libraries: &inlined,
    imported_libraries: None,
    allowed_types_libraries: None,
    type_roots: None,
  };
  assert_eq!(
    module_info("node_modules/pkg/index.d.ts", &criteria),
    ModuleInfo::Inlined { is_external: true }
  );
}

#[test]
fn types_package_is_referenced_not_imported_by_default() {
  let info = module_info("node_modules/@types/node/fs.d.ts", &unrestricted());
  assert_eq!(
    info,
    ModuleInfo::ReferencedAsTypes {
      types_library_name: "node".to_string()
    }
  );
}

#[test]
fn types_package_is_imported_only_when_listed() {
  let imported = vec!["node".to_string()];
  let criteria = ModuleCriteria {
    inlined_libraries: &[],
    imported_libraries: Some(&imported),
    allowed_types_libraries: None,
    type_roots: None,
  };
  assert_eq!(
    module_info("node_modules/@types/node/fs.d.ts", &criteria),
    ModuleInfo::Imported {
      library_name: "node".to_string()
    }
  );
}

#[test]
fn unlisted_package_with_import_allow_list_falls_back() {
  let imported = vec!["allowed".to_string()];
  let criteria = ModuleCriteria {
    inlined_libraries: &[],
    imported_libraries: Some(&imported),
    allowed_types_libraries: None,
    type_roots: None,
  };
  // a plain npm package neither importable nor a @types package
  assert_eq!(
    module_info("node_modules/other/index.d.ts", &criteria),
    ModuleInfo::ModulesOnly
  );
}

#[test]
fn disallowed_types_library_is_modules_only() {
  let allowed = vec!["node".to_string()];
  let imported: Vec<String> = Vec::new();
  let criteria = ModuleCriteria {
    inlined_libraries: &[],
    imported_libraries: Some(&imported),
    allowed_types_libraries: Some(&allowed),
    type_roots: None,
  };
  assert_eq!(
    module_info("node_modules/@types/jest/index.d.ts", &criteria),
    ModuleInfo::ModulesOnly
  );
}

#[test]
fn type_root_behaves_like_types_package() {
  let roots = vec!["typings".to_string()];
  let criteria = ModuleCriteria {
    inlined_libraries: &[],
    imported_libraries: None,
    allowed_types_libraries: None,
    type_roots: Some(&roots),
  };
  assert_eq!(
    module_info("typings/custom/index.d.ts", &criteria),
    ModuleInfo::ReferencedAsTypes {
      types_library_name: "custom".to_string()
    }
  );
  // files outside every type root stay ordinary local files
  assert_eq!(
    module_info("src/custom/index.d.ts", &criteria),
    ModuleInfo::Inlined { is_external: false }
  );
}

#[test]
fn classification_is_idempotent() {
  let criteria = unrestricted();
  for file in [
    "src/main.d.ts",
    "node_modules/pkg/index.d.ts",
    "node_modules/@types/node/fs.d.ts",
  ] {
    assert_eq!(module_info(file, &criteria), module_info(file, &criteria));
  }
}
