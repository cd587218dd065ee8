//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Side effects requested by [`crate::update::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Re-render the text pane and preview
    Redraw,
    /// Write the session to its store
    PersistSession,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Redraw and save, the result of every committed change
    pub fn commit() -> Self {
        Cmd::batch(vec![Cmd::Redraw, Cmd::PersistSession])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            Cmd::PersistSession => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if this command writes the session
    pub fn needs_persist(&self) -> bool {
        match self {
            Cmd::Redraw => false,
            Cmd::PersistSession => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_persist()),
        }
    }
}
