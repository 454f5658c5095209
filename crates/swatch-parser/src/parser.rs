//! Group-aware structural parser.
//!
//! Walks the classified lines with a stack of open groups. Each assignment
//! is prefixed with the open groups' names, its literal is parsed against
//! what the file has assigned so far overlaid on the caller's
//! [`Bindings`], and the result is appended to a [`Stylesheet`].
//!
//! A failed assignment is reported and skipped, so every problem in the file
//! surfaces in one [`ParseError`].

use log::{debug, trace};

use swatch_core::identifier::{Id, KeyPath};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    functions::FunctionTable,
    literal::LiteralParser,
    resolve::{Bindings, Scope},
    span::Span,
    stylesheet::{Assignment, Stylesheet},
    tokens::{Line, LineKind},
};

/// An open group: its full path and the line that opened it.
struct OpenGroup {
    path: KeyPath,
    opened: Span,
}

struct StructureParser<'a> {
    bindings: &'a dyn Bindings,
    functions: &'a FunctionTable,
    groups: Vec<OpenGroup>,
    sheet: Stylesheet,
    diagnostics: DiagnosticCollector,
}

impl<'a> StructureParser<'a> {
    fn new(bindings: &'a dyn Bindings, functions: &'a FunctionTable) -> Self {
        Self {
            bindings,
            functions,
            groups: Vec::new(),
            sheet: Stylesheet::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn current_group(&self) -> Option<&KeyPath> {
        self.groups.last().map(|group| &group.path)
    }

    /// Full path of `key` inside the current group.
    fn qualify(&self, key: &str) -> KeyPath {
        let id = Id::new(key);
        match self.current_group() {
            Some(group) => group.join(id),
            None => KeyPath::new(id),
        }
    }

    fn line(&mut self, line: &Line<'_>) {
        match &line.kind {
            LineKind::GroupOpen { name } => {
                let path = self.qualify(name.inner());
                trace!(group:% = path, line = line.number; "Opened group");
                self.groups.push(OpenGroup {
                    path,
                    opened: line.span,
                });
            }
            LineKind::GroupClose => {
                if self.groups.pop().is_none() {
                    self.diagnostics.emit(
                        Diagnostic::error("unbalanced `}`")
                            .with_code(ErrorCode::E004)
                            .with_label(line.span, "no group is open here")
                            .with_help("remove the brace or open a group with `name {`"),
                    );
                }
            }
            LineKind::Assignment { key, literal } => {
                let path = self.qualify(key.inner());
                let parsed = {
                    let scope = Scope::new(&self.sheet, self.bindings, self.current_group());
                    LiteralParser::new(&scope, self.functions).parse(literal.clone())
                };

                match parsed {
                    Ok(value) => {
                        trace!(path:% = path, value:% = value, line = line.number; "Parsed assignment");
                        let assignment = Assignment::new(path.clone(), value, line.span);
                        if let Some(previous) = self.sheet.push(assignment) {
                            self.diagnostics.emit(
                                Diagnostic::warning(format!("`{path}` is assigned more than once"))
                                    .with_label(line.span, "this value wins")
                                    .with_secondary_label(previous.span(), "previous value"),
                            );
                        }
                    }
                    Err(diagnostic) => self.diagnostics.emit(diagnostic),
                }
            }
        }
    }

    fn finish(mut self) -> Result<Stylesheet, ParseError> {
        for group in std::mem::take(&mut self.groups) {
            self.diagnostics.emit(
                Diagnostic::error(format!("group `{}` is never closed", group.path))
                    .with_code(ErrorCode::E005)
                    .with_label(group.opened, "opened here")
                    .with_help("add a `}` line to close the group"),
            );
        }

        let warnings = self.diagnostics.finish()?;
        self.sheet.set_warnings(warnings);
        Ok(self.sheet)
    }
}

/// Build a stylesheet from classified lines.
///
/// Variables see this file's earlier assignments first, then `bindings`.
pub fn build_stylesheet(
    lines: &[Line<'_>],
    bindings: &dyn Bindings,
    functions: &FunctionTable,
) -> Result<Stylesheet, ParseError> {
    let mut parser = StructureParser::new(bindings, functions);
    for line in lines {
        parser.line(line);
    }
    let sheet = parser.finish()?;
    debug!(assignments = sheet.len(), warnings = sheet.warnings().len(); "Stylesheet built");
    Ok(sheet)
}
