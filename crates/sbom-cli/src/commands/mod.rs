//! Command dispatch.

mod create;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Create {
            input,
            strategy,
            scope,
            project_name,
            output,
            base_url,
        } => {
            create::exec(create::CreateArgs {
                input,
                strategy,
                scope,
                project_name,
                output,
                base_url,
            })
            .await
        }
    }
}
