// Command handlers for the stencil CLI

pub mod case;
pub mod render;

pub use case::CaseCommand;
pub use render::RenderCommand;

use crate::error::CliResult;

/// Trait for command handlers
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CliResult<()>;
}
