use clap::Parser;
use miette::Result;
use gfpush::cli::{Cli, Commands};

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    gfpush::logging::init(cli.global.verbose);

    let global = &cli.global;
    match cli.command {
        Commands::Normalize(args) => gfpush::cli::commands::normalize::run(args, global),
        Commands::Show(args) => gfpush::cli::commands::show::run(args, global),
        Commands::Check(args) => gfpush::cli::commands::check::run(args, global),
        Commands::Merge(args) => gfpush::cli::commands::merge::run_merge(args, global),
        Commands::Diff(args) => gfpush::cli::commands::merge::run_diff(args, global),
        Commands::Sync(args) => gfpush::cli::commands::sync::run(args, global),
        Commands::Bump(args) => gfpush::cli::commands::board::run_bump(args, global),
        Commands::Block(args) => gfpush::cli::commands::board::run_block(args, global),
        Commands::SetStatus(args) => gfpush::cli::commands::board::run_set_status(args, global),
        Commands::Completions(args) => gfpush::cli::commands::completions::run(args),
    }
}
