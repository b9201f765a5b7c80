/// How bound-value placeholders are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every value.
    #[default]
    Question,
    /// `$1`, `$2`, ... numbered by bound-value position (PostgreSQL).
    Numbered,
}

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Compiler configuration.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Placeholder syntax. Default is [`PlaceholderStyle::Question`].
    pub placeholder: PlaceholderStyle,
    /// Maximum fragment/condition nesting before compilation is refused.
    pub max_depth: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Question,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder syntax.
    pub fn with_placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    /// Set the nesting limit.
    ///
    /// Deeper trees fail with [`CompileError::TooDeep`](crate::CompileError::TooDeep).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
