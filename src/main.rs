use bizconnect::cli::{Cli, Commands};
use bizconnect::core::logging::init_logging;
use bizconnect::forms::FormKind;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;
    init_logging(global.verbose);

    match cli.command {
        Commands::Register(args) => {
            bizconnect::cli::commands::form::run(FormKind::Registration, args, &global)
        }
        Commands::Project(args) => {
            bizconnect::cli::commands::form::run(FormKind::Project, args, &global)
        }
        Commands::Checkout(args) => {
            bizconnect::cli::commands::form::run(FormKind::Checkout, args, &global)
        }
        Commands::Contact(args) => {
            bizconnect::cli::commands::form::run(FormKind::Contact, args, &global)
        }
        Commands::Feedback(args) => {
            bizconnect::cli::commands::form::run(FormKind::Feedback, args, &global)
        }
        Commands::Forms(args) => bizconnect::cli::commands::forms::run(args, &global),
        Commands::Vendors(args) => bizconnect::cli::commands::vendors::run(args, &global),
        Commands::Onboarding(args) => bizconnect::cli::commands::onboarding::run(args, &global),
        Commands::Config(cmd) => bizconnect::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => bizconnect::cli::commands::completions::run(args),
    }
}
