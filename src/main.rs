use run_plan::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments; usage errors exit here
    let cli_args = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    // Process the command
    match cli::process_command(cli_args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
