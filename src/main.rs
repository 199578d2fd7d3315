use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;
use tripta::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
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
    let global = cli.global.clone();

    let default_filter = if global.verbose {
        "tripta=debug"
    } else if global.quiet {
        "tripta=error"
    } else {
        "tripta=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::List(args) => tripta::cli::commands::list::run(args, &global),
        Commands::Show(args) => tripta::cli::commands::show::run(args, &global),
        Commands::Sizes(args) => tripta::cli::commands::sizes::run(args, &global),
        Commands::Codes(args) => tripta::cli::commands::codes::run(args, &global),
        Commands::Pair(args) => tripta::cli::commands::pair::run(args, &global),
        Commands::Status(args) => tripta::cli::commands::status::run(args, &global),
        Commands::Check(args) => tripta::cli::commands::check::run(args, &global),
        Commands::Generate(args) => tripta::cli::commands::generate::run(args, &global),
        Commands::Config(cmd) => tripta::cli::commands::config::run(cmd, &global),
    }
}
