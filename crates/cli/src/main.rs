use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    gearcart_cli::run().await
}
