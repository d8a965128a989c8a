// AWS Lambda binary entry point for the data source sync trigger
//
// Build with: cargo build -p kendra-sync-lambda --release
// The binary must be named `bootstrap` for the provided.al2023 runtime.

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    kendra_sync_lambda::run().await
}
