use clap::{Args, Subcommand};

pub mod ls;
pub mod pull;
pub mod push;

use crate::cli::op::Op;

crate::command_enum! {
    (Pull, pull::Pull),
    (Push, push::Push),
    (Ls, ls::Ls),
}

// Rename the generated Command to NotesCommand for clarity
pub type NotesCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Notes {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[async_trait::async_trait]
impl Op for Notes {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
