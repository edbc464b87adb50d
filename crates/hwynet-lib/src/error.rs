use thiserror::Error;

/// Convenient result alias for the hwynet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a line of the canonical text format cannot be parsed.
    /// Line numbers are 1-based; the rest of the input is not consumed.
    #[error("malformed input on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// Raised when a place name could not be resolved to a vertex.
    #[error("unknown place: {name}{}", format_suggestions(.suggestions))]
    UnknownPlace {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a shortest-path query names an origin that is not a
    /// vertex of the graph.
    #[error("place {name} is not a vertex of the graph")]
    PlaceNotInGraph { name: String },

    /// Raised when no route exists between two places.
    #[error("no route found between {from} and {to}")]
    RouteNotFound { from: String, to: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
