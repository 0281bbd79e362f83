//! Compilation options.

/// Configuration for tag compilation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether statically derivable tags are resolved before cells are allocated
    pub(crate) optimise: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { optimise: true }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether tags are resolved against the match boundaries.
    ///
    /// When disabled, every tag that is not a fixed offset of an earlier
    /// tag gets its own memory cell.
    pub fn optimise(mut self, value: bool) -> Self {
        self.optimise = value;
        self
    }

    pub fn is_optimising(&self) -> bool {
        self.optimise
    }
}
