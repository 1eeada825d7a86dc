//! Import specifier extraction from TypeScript/JavaScript source text.

use regex::Regex;

/// Extracts raw module specifiers (`'./note.service'`, `'@nestjs/common'`)
/// from source text.
///
/// Recognised forms:
/// - `import x from '...'`, `import type { X } from '...'`, multi-line named imports
/// - `import '...'` (side effect)
/// - `export * from '...'`, `export { x } from '...'`
/// - `require('...')` and `import('...')` with a string literal argument
///
/// Comments are skipped; comment markers inside string literals are not
/// treated as comments.
#[derive(Debug, Clone)]
pub struct ImportScanner {
    static_form: Regex,
    call_form: Regex,
}

impl ImportScanner {
    /// Compiles the scanner's expressions.
    ///
    /// # Errors
    ///
    /// Returns error if an expression fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            static_form: Regex::new(
                r#"(?m)^\s*(?:import|export)\s+(?:type\s+)?(?:[\w*{}\s,$]+?\s+from\s+)?['"]([^'"\n]+)['"]"#,
            )?,
            call_form: Regex::new(r#"\b(?:require|import)\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#)?,
        })
    }

    /// Returns specifiers in source order, duplicates included.
    #[must_use]
    pub fn scan(&self, source: &str) -> Vec<String> {
        let stripped = strip_comments(source);

        let mut found: Vec<(usize, String)> = self
            .static_form
            .captures_iter(&stripped)
            .chain(self.call_form.captures_iter(&stripped))
            .filter_map(|c| c.get(1))
            .map(|m| (m.start(), m.as_str().to_string()))
            .collect();
        found.sort_by_key(|(offset, _)| *offset);
        found.into_iter().map(|(_, spec)| spec).collect()
    }
}

/// Removes `//` and `/* */` comments outside string and template literals.
///
/// Line breaks are kept so line-anchored patterns still see the original
/// line structure.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                // Plain quotes cannot span lines; recover from a stray one.
                '\n' if q != '`' => quote = None,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                out.push(' ');
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            ('\'' | '"' | '`', _) => {
                quote = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Whether a specifier is relative to the importing file.
#[must_use]
pub fn is_relative(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}
