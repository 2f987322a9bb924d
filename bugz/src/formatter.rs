use bugz_core::{Record, transport::TransportError};
use colored::*;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// The export maps of the entities returned by a command.
pub struct EntityList(pub Vec<Record>);

/// A one-line confirmation of a successful change.
pub struct Done(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<Record> for FormattedString {
    fn from(record: Record) -> Self {
        FormattedString::from(serde_json::Value::Object(record))
    }
}

impl From<EntityList> for FormattedString {
    fn from(EntityList(entities): EntityList) -> Self {
        if entities.is_empty() {
            return FormattedString("No results found.".yellow().to_string());
        }

        let values = entities.into_iter().map(serde_json::Value::Object).collect();
        FormattedString::from(serde_json::Value::Array(values))
    }
}

impl From<Done> for FormattedString {
    fn from(Done(message): Done) -> Self {
        FormattedString(message.green().to_string())
    }
}

impl From<TransportError> for FormattedString {
    fn from(err: TransportError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

// Top level command failures, printed with their whole cause chain
impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        FormattedString(format!("{}\n\n'{:#}'", "Request Failed:".red().bold(), err))
    }
}
