use async_trait::async_trait;
use std::time::Duration;
use tictac_fetch::{FetchController, FetchError, FetchStatus, Fetcher};

/// Pretend remote lookup: known names resolve, everything else is missing.
struct Catalog;

#[async_trait]
impl Fetcher for Catalog {
    type Output = u32;

    async fn fetch(&self, name: &str) -> Result<u32, FetchError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        match name {
            "pikachu" => Ok(25),
            "mew" => Ok(151),
            _ => Err(FetchError::not_found(name)),
        }
    }
}

fn describe(status: &FetchStatus<u32>) -> String {
    match status {
        FetchStatus::Idle => "Submit a name".to_string(),
        FetchStatus::Pending { name } => format!("Loading {}...", name),
        FetchStatus::Resolved { name, data } => format!("{} is #{}", name, data),
        FetchStatus::Rejected { error, .. } => format!("There was an error: {}", error),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let controller = FetchController::new(Catalog);
    println!("{}", describe(&controller.status()));

    // The second request supersedes the first before it settles
    controller.request("pikachu");
    controller.request("mew");
    println!("{}", describe(&controller.status()));
    println!("{}", describe(&controller.settled().await));

    controller.request("missingno");
    println!("{}", describe(&controller.settled().await));

    // "Try again" clears the name, then the user submits a new one
    controller.reset();
    println!("{}", describe(&controller.status()));
    controller.request("pikachu");
    println!("{}", describe(&controller.settled().await));

    Ok(())
}
