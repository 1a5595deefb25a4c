use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = soundcheck_cli::Cli::parse();

    let result = match cli.command {
        soundcheck_cli::Command::Migrate(args) => {
            soundcheck_cli::migrate::run(&args, cli.database_url.as_deref()).await
        }
        soundcheck_cli::Command::Status(args) => {
            soundcheck_cli::status::run(&args, cli.database_url.as_deref()).await
        }
    };

    if let Err(err) = result {
        soundcheck_cli::error_view::print(&err);
        std::process::exit(err.exit_code());
    }
}
