//! Celo node plugin binary.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    celo_node_commands::run().await
}
