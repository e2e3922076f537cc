/// Append-only list of output lines with a current indentation depth.
///
/// Lines are indented when appended and never touched again.
#[derive(Debug, Clone, Default)]
pub struct EmissionBuffer {
  lines: Vec<String>,
  depth: usize,
  indent_width: usize,
}

impl EmissionBuffer {
  pub fn new(indent_width: usize) -> Self {
    Self::with_depth(indent_width, 0)
  }

  pub fn with_depth(
    indent_width: usize,
    depth: usize,
  ) -> Self {
    Self {
      lines: Vec::new(),
      depth,
      indent_width,
    }
  }

  pub fn push_line(
    &mut self,
    line: impl AsRef<str>,
  ) {
    let line = line.as_ref();
    if line.is_empty() {
      self.lines.push(String::new());
      return;
    }

    self
      .lines
      .push(format!("{:width$}{}", "", line, width = self.depth * self.indent_width));
  }

  pub fn indent(&mut self) {
    self.depth += 1;
  }

  pub fn dedent(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  /// Appends `header {` and indents.
  pub fn open_block(
    &mut self,
    header: impl AsRef<str>,
  ) {
    self.push_line(format!("{} {{", header.as_ref()));
    self.indent();
  }

  /// Dedents and appends `}`.
  pub fn close_block(&mut self) {
    self.dedent();
    self.push_line("}");
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn into_lines(self) -> Vec<String> {
    self.lines
  }
}
