use std::error::Error;
use std::fmt;

/// Kind of a declaration that survives into compiled JavaScript output.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RuntimeStatementKind {
  Class,
  Enum,
  Function,
  Variable,
}

impl RuntimeStatementKind {
  pub fn as_str(self) -> &'static str {
    match self {
      RuntimeStatementKind::Class => "class",
      RuntimeStatementKind::Enum => "enum",
      RuntimeStatementKind::Function => "function",
      RuntimeStatementKind::Variable => "variable",
    }
  }
}

/// A retained declaration that would exist at runtime but is not exported at
/// the value level from the entry module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffendingStatement {
  pub name: String,
  pub kind: RuntimeStatementKind,
  pub module: String,
}

impl fmt::Display for OffendingStatement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "\"{}\" {} from {}",
      self.name,
      self.kind.as_str(),
      self.module
    )
  }
}

/// Terminal failures of a bundling run. All of these abort the invocation;
/// there is no partial-success mode.
#[derive(Clone, Debug)]
pub enum BundleError {
  /// No entry points were requested.
  NoEntryPoints,
  /// A requested entry file is not a module of the program.
  EntryFileNotFound { file_name: String },
  /// A class declaration was retained while the fail-on-class policy is on.
  ClassEmitted { name: String, module: String },
  /// Retained runtime declarations are not exported at the value level.
  NonExportedRuntimeStatements(Vec<OffendingStatement>),
  /// Re-checking an emitted artifact produced diagnostics.
  Verification {
    file_name: String,
    diagnostics: Vec<String>,
  },
}

impl fmt::Display for BundleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BundleError::NoEntryPoints => write!(f, "no entry points were provided"),
      BundleError::EntryFileNotFound { file_name } => {
        write!(f, "file \"{file_name}\" does not exist in the program")
      }
      BundleError::ClassEmitted { name, module } => {
        write!(f, "class was found in generated dts: {name} from {module}")
      }
      BundleError::NonExportedRuntimeStatements(offenders) => {
        writeln!(
          f,
          "generated dts contains {} non-exported declaration(s), which should be either exported or removed to avoid runtime errors:",
          offenders.len()
        )?;
        for offender in offenders {
          writeln!(f, "{offender}")?;
        }
        Ok(())
      }
      BundleError::Verification {
        file_name,
        diagnostics,
      } => {
        writeln!(f, "generated dts for \"{file_name}\" compiled with errors:")?;
        for diagnostic in diagnostics {
          writeln!(f, "{diagnostic}")?;
        }
        Ok(())
      }
    }
  }
}

impl Error for BundleError {}
