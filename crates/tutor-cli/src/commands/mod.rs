pub mod evaluate;
pub mod shared;
pub mod tags;

use tutor_config::TutorConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &TutorConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Evaluate(args) => evaluate::handle(&args, config, flags).await,
        Commands::Tags(args) => tags::handle(&args, config, flags).await,
    }
}
