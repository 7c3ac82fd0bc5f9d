use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => super::search::handle(&args, ctx, flags).await,
        Commands::Item(args) => super::item::handle(&args, ctx, flags).await,
        Commands::Browse(args) => super::browse::handle(&args, ctx, flags).await,
    }
}
