//! Record actions exposed for every record type

use std::fmt;

/// One of the four operations available on a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create a new record
    Create,
    /// Partially update an existing record
    Update,
    /// Delete a record by primary key
    Delete,
    /// Show a record by primary key
    Detail,
}

impl Action {
    /// All actions in CLI order
    pub const ALL: [Action; 4] = [Action::Create, Action::Update, Action::Delete, Action::Detail];

    /// Subcommand name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Detail => "detail",
        }
    }

    /// Capitalized verb used in help text
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Update => "Update",
            Action::Delete => "Delete",
            Action::Detail => "Detail",
        }
    }

    /// Look up an action by subcommand name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Whether fields register as required for this action.
    ///
    /// Updates are partial, so nothing but the primary key is required.
    pub fn requires_fields(&self) -> bool {
        !matches!(self, Action::Update)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
