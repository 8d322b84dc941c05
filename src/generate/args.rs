use std::fmt;

/// One command-line token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// Emitted as-is.
    Plain(String),
    /// Wrapped in double quotes when rendered for a shell (filter graphs, stream specifiers).
    Quoted(String),
}

impl Arg {
    /// Token value as the process receives it, without shell quoting.
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(v) | Self::Quoted(v) => v,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(v) => f.write_str(v),
            Self::Quoted(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A complete, validated engine command line (without the program name).
///
/// `Display` yields the shell form, every token preceded by one space:
/// ` -y -video_size 1920x1080 ... -f mtl_st20p -`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    args: Vec<Arg>,
}

impl Pipeline {
    /// Tokens in emission order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Unquoted arguments suitable for [`std::process::Command::args`].
    pub fn argv(&self) -> Vec<String> {
        self.args.iter().map(|a| a.value().to_string()).collect()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no token was emitted.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Local accumulator for one generation run. Dropped on every error path.
#[derive(Debug, Default)]
pub(crate) struct ArgsBuilder {
    args: Vec<Arg>,
}

impl ArgsBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn plain(&mut self, value: impl Into<String>) -> &mut Self {
        self.args.push(Arg::Plain(value.into()));
        self
    }

    pub(crate) fn quoted(&mut self, value: impl Into<String>) -> &mut Self {
        self.args.push(Arg::Quoted(value.into()));
        self
    }

    pub(crate) fn opt(&mut self, flag: &str, value: impl fmt::Display) -> &mut Self {
        self.plain(flag).plain(value.to_string())
    }

    pub(crate) fn opt_quoted(&mut self, flag: &str, value: impl fmt::Display) -> &mut Self {
        self.plain(flag).quoted(value.to_string())
    }

    pub(crate) fn finish(self) -> Pipeline {
        Pipeline { args: self.args }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/args.rs"]
mod tests;
