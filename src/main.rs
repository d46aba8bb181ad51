use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    totsylist::run().await
}
