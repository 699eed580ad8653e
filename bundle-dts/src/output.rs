//! Renders a [`CollectedOutput`] into the final declaration artifact.
//!
//! Section order: reference directives, consolidated imports, statements,
//! trailing re-export list, optional UMD namespace trailer, and a closing
//! `export {};` marker so the artifact is always treated as a module.

use crate::collector::CollectedOutput;
use crate::collector::CollectedStatement;
use crate::collector::ExportDecision;
use crate::collector::LibraryImports;
use crate::collisions::CollisionsResolver;
use crate::options::GenerationOptions;
use itertools::Itertools;
use semantic_dts::NamespaceForm;
use semantic_dts::Program;
use semantic_dts::StatementData;
use semantic_dts::StatementId;
use semantic_dts::StatementKind;
use semantic_dts::Token;

pub struct OutputParams<'a, 'p> {
  pub program: &'p Program,
  pub resolver: &'a CollisionsResolver<'p>,
  pub collected: &'a CollectedOutput,
}

pub fn generate_output(params: &OutputParams, options: &GenerationOptions) -> String {
  let collected = params.collected;
  let mut result = String::new();

  if !collected.types_references.is_empty() {
    let directives = collected
      .types_references
      .iter()
      .map(|library| format!("/// <reference types=\"{library}\" />"))
      .join("\n");
    result.push_str(&directives);
    result.push_str("\n\n");
  }

  if !collected.imports.is_empty() {
    let imports = collected
      .imports
      .iter()
      .flat_map(|(library, imports)| import_lines(library, imports))
      .join("\n");
    result.push_str(&imports);
    result.push_str("\n\n");
  }

  let body = if options.sort_output {
    let mut rendered: Vec<String> = collected
      .statements
      .iter()
      .map(|statement| render_collected(params, statement))
      .collect();
    rendered.sort();
    rendered.join("\n")
  } else {
    let mut lines: Vec<String> = Vec::new();
    let mut last_file: Option<&str> = None;
    for statement in &collected.statements {
      if options.output_file_names {
        let file = &params
          .program
          .module(statement.module(params.program))
          .file_name;
        if last_file != Some(file.as_str()) {
          lines.push(format!("// File: {file}"));
          last_file = Some(file.as_str());
        }
      }
      lines.push(render_collected(params, statement));
    }
    lines.join("\n")
  };
  result.push_str(&body);

  if !collected.renamed_exports.is_empty() {
    let rows = collected
      .renamed_exports
      .iter()
      .sorted_by(|a, b| a.local.cmp(&b.local))
      .map(|row| {
        if row.local == row.exported {
          format!("\t{},", row.local)
        } else {
          format!("\t{} as {},", row.local, row.exported)
        }
      })
      .join("\n");
    result.push_str(&format!("\n\nexport {{\n{rows}\n}};"));
  }

  if let Some(umd) = &options.umd_module_name {
    result.push_str(&format!("\n\nexport as namespace {umd};"));
  }

  result.push_str("\n\nexport {};\n");
  result
}

fn import_lines(library: &str, imports: &LibraryImports) -> Vec<String> {
  let mut lines = Vec::new();
  for local in &imports.namespace_imports {
    lines.push(format!("import * as {local} from '{library}';"));
  }
  for local in &imports.default_imports {
    lines.push(format!("import {local} from '{library}';"));
  }
  if !imports.named_imports.is_empty() {
    let list = imports
      .named_imports
      .iter()
      .map(|(name, local)| {
        if name == local {
          name.clone()
        } else {
          format!("{name} as {local}")
        }
      })
      .join(", ");
    lines.push(format!("import {{ {list} }} from '{library}';"));
  }
  for local in &imports.require_imports {
    lines.push(format!("import {local} = require('{library}');"));
  }
  lines
}

fn render_collected(params: &OutputParams, collected: &CollectedStatement) -> String {
  match collected {
    CollectedStatement::Statement { id, export } => render_statement(params, *id, *export),
    CollectedStatement::StarNamespace { name, members, .. } => {
      if members.is_empty() {
        format!("declare namespace {name} {{\n}}")
      } else {
        let list = members
          .iter()
          .map(|(local, exported)| {
            if local == exported {
              local.clone()
            } else {
              format!("{local} as {exported}")
            }
          })
          .join(", ");
        format!("declare namespace {name} {{\n\texport {{ {list} }};\n}}")
      }
    }
  }
}

fn render_statement(params: &OutputParams, id: StatementId, export: ExportDecision) -> String {
  let stmt = params.program.statement(id);
  match &stmt.kind {
    StatementKind::ExportList { entries, from } => {
      let list = entries
        .iter()
        .map(|entry| {
          if entry.name == entry.exported {
            entry.name.clone()
          } else {
            format!("{} as {}", entry.name, entry.exported)
          }
        })
        .join(", ");
      match from {
        Some(from) => format!("export {{ {list} }} from '{}';", from.text),
        None => format!("export {{ {list} }};"),
      }
    }
    StatementKind::ExportStar { from } => format!("export * from '{}';", from.text),
    StatementKind::ExportStarAs { name, from, .. } => {
      format!("export * as {name} from '{}';", from.text)
    }
    StatementKind::ExportAssignment { is_equals } => {
      let keyword = if *is_equals {
        "export = "
      } else {
        "export default "
      };
      format!("{keyword}{};", render_tokens(params, stmt))
    }
    _ => render_declaration(params, stmt, export),
  }
}

fn render_declaration(params: &OutputParams, stmt: &StatementData, export: ExportDecision) -> String {
  let default_kept =
    matches!(export, ExportDecision::KeepSource) && stmt.modifiers.export && stmt.modifiers.default;

  let mut head = String::new();
  match export {
    ExportDecision::KeepSource => {
      if stmt.modifiers.export {
        head.push_str("export ");
        if stmt.modifiers.default {
          head.push_str("default ");
        }
      }
    }
    ExportDecision::Export => head.push_str("export "),
    ExportDecision::None => {}
  }
  if !default_kept && needs_declare(&stmt.kind) {
    head.push_str("declare ");
  }
  head.push_str(keyword(&stmt.kind));

  if let StatementKind::Namespace { form } = &stmt.kind {
    match form {
      NamespaceForm::QuotedModule { specifier, .. } => {
        head.push_str(&format!(" \"{specifier}\""));
      }
      NamespaceForm::Global => {}
      NamespaceForm::Namespace | NamespaceForm::Module => {
        if let Some(name) = final_statement_name(params, stmt) {
          head.push(' ');
          head.push_str(&name);
        }
      }
    }
    return render_body(&head, &render_children(params, stmt));
  }

  if let Some(name) = final_statement_name(params, stmt) {
    head.push(' ');
    head.push_str(&name);
  }
  head.push_str(&render_tokens(params, stmt));
  head
}

/// Renders a nested member of a namespace body. Members of an ambient
/// namespace are implicitly exported, so modifiers are stripped.
fn render_member(params: &OutputParams, id: StatementId) -> String {
  let stmt = params.program.statement(id);
  if let StatementKind::Namespace { form } = &stmt.kind {
    let mut head = keyword(&stmt.kind).to_string();
    if let NamespaceForm::QuotedModule { specifier, .. } = form {
      head.push_str(&format!(" \"{specifier}\""));
    } else if let Some(name) = &stmt.name {
      head.push(' ');
      head.push_str(name);
    }
    return render_body(&head, &render_children(params, stmt));
  }
  let mut text = keyword(&stmt.kind).to_string();
  if let Some(name) = &stmt.name {
    text.push(' ');
    text.push_str(name);
  }
  text.push_str(&render_tokens(params, stmt));
  text
}

fn render_body(head: &str, children: &str) -> String {
  if children.is_empty() {
    format!("{head} {{\n}}")
  } else {
    format!("{head} {{\n{}\n}}", indent(children))
  }
}

fn render_children(params: &OutputParams, stmt: &StatementData) -> String {
  stmt
    .children
    .iter()
    .map(|&child| render_member(params, child))
    .join("\n")
}

fn render_tokens(params: &OutputParams, stmt: &StatementData) -> String {
  let mut text = String::new();
  for token in &stmt.tokens {
    match token {
      Token::Text(fragment) => text.push_str(fragment),
      Token::Ref(id) => {
        let reference = params.program.reference(*id);
        match params.resolver.resolve_reference(reference) {
          Some(resolved) => text.push_str(&resolved),
          None => text.push_str(&reference.written()),
        }
      }
    }
  }
  text
}

/// The name a top-level declaration was registered under, preferring the
/// declared spelling when it survived.
fn final_statement_name(params: &OutputParams, stmt: &StatementData) -> Option<String> {
  let declared = stmt.name.as_ref()?;
  let Some(symbol) = stmt.name_symbol else {
    return Some(declared.clone());
  };
  let names = params.resolver.names_for_symbol(symbol);
  if names.is_empty() || names.iter().any(|name| name == declared) {
    return Some(declared.clone());
  }
  let prefix = format!("{declared}$");
  Some(
    names
      .iter()
      .find(|name| name.starts_with(&prefix))
      .unwrap_or(&names[0])
      .clone(),
  )
}

fn needs_declare(kind: &StatementKind) -> bool {
  matches!(
    kind,
    StatementKind::Class
      | StatementKind::Enum { .. }
      | StatementKind::Function
      | StatementKind::Variable { .. }
      | StatementKind::Namespace { .. }
  )
}

fn keyword(kind: &StatementKind) -> &'static str {
  match kind {
    StatementKind::Interface => "interface",
    StatementKind::TypeAlias => "type",
    StatementKind::Class => "class",
    StatementKind::Enum { is_const: false } => "enum",
    StatementKind::Enum { is_const: true } => "const enum",
    StatementKind::Function => "function",
    StatementKind::Variable { keyword } => keyword.as_str(),
    StatementKind::Namespace { form } => match form {
      NamespaceForm::Namespace => "namespace",
      NamespaceForm::Module | NamespaceForm::QuotedModule { .. } => "module",
      NamespaceForm::Global => "global",
    },
    StatementKind::ImportDecl { .. }
    | StatementKind::ExportList { .. }
    | StatementKind::ExportStar { .. }
    | StatementKind::ExportStarAs { .. }
    | StatementKind::ExportAssignment { .. } => "",
  }
}

fn indent(text: &str) -> String {
  text
    .lines()
    .map(|line| {
      if line.is_empty() {
        String::new()
      } else {
        format!("\t{line}")
      }
    })
    .join("\n")
}
