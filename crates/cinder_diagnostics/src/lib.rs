pub mod diagnostic_report;
pub mod message;

use cinder_type::span::Span;
use colored::*;
use diagnostic_report::Diagnostic;

/// Prints a diagnostic to stderr. `path` names the input the spans refer to.
///
/// ```text
/// error[C0103] type mismatch: Cannot assign a value of type 'str' to 'a', which has type 'int'
///   --> rebind.json:2:1
///    | rebind.json:1:1: First bound here with type 'int'
///   = note: ...
/// ```
pub fn render(
  diag: &Diagnostic,
  path: &str,
) {
  eprintln!("{}", format_header(diag));
  eprintln!("{:2}{} {}", "", "-->".blue().bold(), location(path, diag.span).bold());

  for related in &diag.related {
    eprintln!(
      "{:3}{} {}: {}",
      "",
      "|".blue().bold(),
      location(path, related.span),
      related.message
    );
  }

  for note in &diag.notes {
    eprintln!("{:2}{} {}", "", "= note:".cyan().bold(), note);
  }

  eprintln!();
}

fn format_header(diag: &Diagnostic) -> String {
  format!(
    "{}{} {}: {}",
    "error".red().bold(),
    format!("[{}]", diag.code).red().bold(),
    diag.kind,
    diag.message.bold()
  )
}

fn location(
  path: &str,
  span: Span,
) -> String {
  if span.is_unknown() {
    return path.to_string();
  }
  format!("{}:{}:{}", path, span.line, span.column)
}
