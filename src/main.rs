use clap::Parser;
use tracing_subscriber::EnvFilter;

use passvault::cli::{commands, Cli, Commands};
use passvault::config::Settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            passvault::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Add {
            ref name,
            ref username,
            ref email,
            ref website,
            ref description,
            ref collection,
            ref autofill,
        } => commands::add::execute(
            &cli,
            &settings,
            name,
            username,
            email,
            website,
            description,
            collection,
            autofill,
        ),
        Commands::Get {
            ref name,
            show,
            copy,
        } => commands::get::execute(&cli, &settings, name, show, copy),
        Commands::Edit {
            ref name,
            ref collection,
            ref username,
            ref email,
            ref website,
            ref description,
            ref autofill,
            password,
        } => commands::edit::execute(
            &cli,
            &settings,
            name,
            collection.as_deref(),
            username.as_deref(),
            email.as_deref(),
            website.as_deref(),
            description.as_deref(),
            autofill.as_deref(),
            password,
        ),
        Commands::List { ref collection } => commands::list::execute(&cli, &settings, collection),
        Commands::Remove { ref name, force } => {
            commands::remove::execute(&cli, &settings, name, force)
        }
        Commands::Collection { ref action } => {
            commands::collection::execute(&cli, &settings, action)
        }
        #[cfg(feature = "audit-log")]
        Commands::Audit { last } => commands::audit_cmd::execute(&settings, last),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
