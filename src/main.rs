use clap::Parser;
use secvault::cli::{commands, output, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add => commands::add::execute(&cli),
        Commands::List => commands::list::execute(&cli),
        Commands::Get { ref id } => commands::get::execute(&cli, id),
        Commands::Remove { ref id } => commands::remove::execute(&cli, id),
        Commands::ChangePassword => commands::change_password::execute(&cli),
        Commands::Delete { force } => commands::delete::execute(&cli, force),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
