use std::fmt;

/// View resolver configuration error
///
/// Returned by the resolver constructors when the configuration is
/// invalid. A resolver can never be built into an invalid state;
/// misconfiguration fails here rather than on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverConfigError {
    /// The suffix appended to logical view names is empty or blank.
    EmptySuffix,
    /// The key used to look up the logical view name is empty or blank.
    EmptyViewNameKey,
    /// The logical-name to view-identifier table is empty.
    EmptyViewMappings,
}

impl fmt::Display for ResolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverConfigError::EmptySuffix => {
                write!(f, "view resolver configuration error: the suffix is required")
            }
            ResolverConfigError::EmptyViewNameKey => {
                write!(
                    f,
                    "view resolver configuration error: the view name key is required"
                )
            }
            ResolverConfigError::EmptyViewMappings => {
                write!(
                    f,
                    "view resolver configuration error: the view mappings are required"
                )
            }
        }
    }
}

impl std::error::Error for ResolverConfigError {}
