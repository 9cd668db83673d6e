// botenv - provision and launch the bots project
// Main CLI entry point

use botenv::cli::{Cli, CliDispatcher};
use botenv::utils::error::UserError;
use botenv::utils::logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match CliDispatcher::execute(cli).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            let user_error = UserError::from_botenv_error(&err);
            user_error.print();
            process::exit(user_error.exit_code);
        }
    }
}
