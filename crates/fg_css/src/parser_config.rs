use fg_shared::char_stream::Location;

/// ParserConfig holds the configuration for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Location holds the start position of the given element in the data source
    pub location: Location,
    /// Optional source filename or url
    pub source: Option<String>,
    /// Ignore errors and continue parsing
    pub ignore_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            location: Location::default(),
            source: None,
            ignore_errors: false,
        }
    }
}
