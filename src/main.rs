//! serverless-openapi CLI binary

use anyhow::Result;

use serverless_openapi::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so generated documents can be piped from stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "serverless_openapi=info,sls_openapi_spec=info,sls_openapi_events=info".into()
            }),
        )
        .init();

    let matches = CliApp::app().get_matches();

    CliApp::run(&matches).await
}
