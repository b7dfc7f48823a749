use crate::language;
use crate::language::limits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenErrorKind {
    Config,
    Budget,
}

#[derive(Debug, Clone)]
pub struct GenError {
    pub kind: GenErrorKind,
    pub message: String,
}

impl GenError {
    pub fn new(kind: GenErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// The two historical generator variants, selectable side by side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// One ascending index list per invocation.
    Ascending,
    /// Bound constant first, then invocations carrying both traversal orders.
    #[default]
    Bidirectional,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Ascending => "ascending",
            Mode::Bidirectional => "bidirectional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "ascending" => Some(Mode::Ascending),
            "bidirectional" => Some(Mode::Bidirectional),
            _ => None,
        }
    }

    /// True if this mode declares the bound constant ahead of the body.
    pub fn declares_bound(self) -> bool {
        matches!(self, Mode::Bidirectional)
    }

    /// True if invocations carry the reverse traversal order.
    pub fn emits_reverse(self) -> bool {
        matches!(self, Mode::Bidirectional)
    }
}

#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub mode: Mode,
    pub max_elements: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            max_elements: limits::DEFAULT_MAX_ELEMENTS,
        }
    }
}

/// One macro invocation covering arity `n`, without the line terminator.
pub fn emit_invocation_line(n: usize, mode: Mode) -> String {
    let mut line = String::new();
    line.push_str(language::MACRO_NAME);
    line.push_str("!(");
    line.push_str(&n.to_string());
    line.push_str("; ");
    for k in 0..n {
        if k > 0 {
            line.push_str(", ");
        }
        line.push_str(language::PLACEHOLDER_PREFIX);
        line.push_str(&k.to_string());
    }
    line.push_str("; ");
    for k in 0..n {
        if k > 0 {
            line.push_str(", ");
        }
        line.push_str(&k.to_string());
    }
    if mode.emits_reverse() {
        // n-1 down through 1, then the unconditional trailing 0; at n == 1
        // only the 0 remains.
        line.push_str("; ");
        for k in (0..n).rev() {
            if k + 1 < n {
                line.push_str(", ");
            }
            line.push_str(&k.to_string());
        }
    }
    line.push_str(");");
    line
}

struct Emitter<'a> {
    options: &'a EmitOptions,
    out: String,
}

impl<'a> Emitter<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn push_char(&mut self, c: char) {
        self.out.push(c);
    }

    fn emit_bound_const(&mut self) {
        self.push_str("pub const ");
        self.push_str(language::MAX_ELEMENTS_CONST);
        self.push_str(": usize = ");
        self.push_str(&self.options.max_elements.to_string());
        self.push_str(";");
        self.push_char('\n');
    }

    fn emit_module(mut self) -> Result<String, GenError> {
        if self.options.mode.declares_bound() {
            self.emit_bound_const();
        }
        for n in 1..=self.options.max_elements {
            let line = emit_invocation_line(n, self.options.mode);
            self.push_str(&line);
            self.push_char('\n');
        }

        let max_source_bytes = limits::max_source_bytes();
        if self.out.len() > max_source_bytes {
            return Err(GenError::new(
                GenErrorKind::Budget,
                format!(
                    "emitted source is {} bytes which exceeds max_source_bytes {}",
                    self.out.len(),
                    max_source_bytes
                ),
            ));
        }
        Ok(self.out)
    }
}

/// Emits the complete generated module text for `options`.
///
/// All-or-nothing: the text is fully built and checked against the budget
/// before the caller gets a single byte to write.
pub fn emit_viewtuple_source(options: &EmitOptions) -> Result<String, GenError> {
    if options.max_elements == 0 {
        return Err(GenError::new(
            GenErrorKind::Config,
            "max elements must be positive".to_string(),
        ));
    }
    let max_elements = limits::max_elements();
    if options.max_elements > max_elements {
        return Err(GenError::new(
            GenErrorKind::Budget,
            format!(
                "max elements {} exceeds limit {}",
                options.max_elements, max_elements
            ),
        ));
    }
    Emitter::new(options).emit_module()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings_round_trip() {
        for mode in [Mode::Ascending, Mode::Bidirectional] {
            assert_eq!(Mode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::parse("descending"), None);
    }

    #[test]
    fn default_options_match_the_checked_in_form() {
        let options = EmitOptions::default();
        assert_eq!(options.mode, Mode::Bidirectional);
        assert_eq!(options.max_elements, limits::DEFAULT_MAX_ELEMENTS);
    }

    #[test]
    fn zero_bound_is_a_config_error() {
        let options = EmitOptions {
            mode: Mode::Ascending,
            max_elements: 0,
        };
        let err = emit_viewtuple_source(&options).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::Config);
    }

    #[test]
    fn bound_over_limit_is_a_budget_error() {
        let options = EmitOptions {
            mode: Mode::Bidirectional,
            max_elements: limits::MAX_ELEMENTS + 1,
        };
        let err = emit_viewtuple_source(&options).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::Budget);
    }

    #[test]
    fn ascending_mode_emits_no_bound_const() {
        let options = EmitOptions {
            mode: Mode::Ascending,
            max_elements: 2,
        };
        let src = emit_viewtuple_source(&options).expect("emit must succeed");
        assert!(!src.contains(language::MAX_ELEMENTS_CONST));
    }
}
