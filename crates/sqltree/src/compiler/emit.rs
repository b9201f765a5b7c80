//! Token buffer threaded through a single compilation.

use super::config::{CompilerConfig, PlaceholderStyle};
use super::CompiledQuery;
use crate::component::{FragmentKind, QueryComponent};
use crate::error::{CompileError, CompileResult};
use crate::param::ParamList;
use crate::value::SqlValue;

pub(super) struct Emitter<'c> {
    config: &'c CompilerConfig,
    tokens: Vec<String>,
    params: ParamList,
    depth: usize,
}

impl<'c> Emitter<'c> {
    pub(super) fn new(config: &'c CompilerConfig) -> Self {
        Self {
            config,
            tokens: Vec::new(),
            params: ParamList::new(),
            depth: 0,
        }
    }

    pub(super) fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Record a bound value and emit its placeholder.
    pub(super) fn bind(&mut self, value: &SqlValue) {
        let idx = self.params.push(value.clone());
        let placeholder = match self.config.placeholder {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Numbered => format!("${idx}"),
        };
        self.tokens.push(placeholder);
    }

    /// Append `AS alias` when an alias is present.
    pub(super) fn alias(&mut self, alias: Option<&str>) {
        if let Some(alias) = alias {
            self.push("AS");
            self.push(alias);
        }
    }

    /// Emit `items` with `divider` between consecutive entries, never around them.
    pub(super) fn separated<T>(
        &mut self,
        items: &[T],
        divider: &str,
        mut emit: impl FnMut(&mut Self, &T) -> CompileResult<()>,
    ) -> CompileResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(divider);
            }
            emit(self, item)?;
        }
        Ok(())
    }

    pub(super) fn descend(&mut self) -> CompileResult<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(CompileError::TooDeep(self.config.max_depth));
        }
        Ok(())
    }

    pub(super) fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Reject a fragment that cannot appear in `context`.
    ///
    /// Raw `sql` is accepted everywhere. A `parts` list must be non-empty and
    /// every child, nested lists included, must itself fit `context`.
    pub(super) fn expect(
        &self,
        component: &QueryComponent,
        context: &'static str,
        allowed: &[FragmentKind],
    ) -> CompileResult<()> {
        let mut pending = vec![component];
        while let Some(component) = pending.pop() {
            match component {
                QueryComponent::Sql(_) => {}
                QueryComponent::Parts(parts) if parts.is_empty() => {
                    return Err(CompileError::EmptyList("parts"));
                }
                QueryComponent::Parts(parts) => pending.extend(parts.iter().rev()),
                other => {
                    let kind = other.kind();
                    if !allowed.contains(&kind) {
                        return Err(CompileError::malformed(context, kind));
                    }
                }
            }
        }
        Ok(())
    }

    pub(super) fn finish(self) -> CompiledQuery {
        CompiledQuery {
            tokens: self.tokens,
            params: self.params,
        }
    }
}
