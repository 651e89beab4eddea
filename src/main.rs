use color_eyre::eyre::Result;
use database::Storage;
use env_logger::Env;
use log::info;
use std::env;
use std::net::SocketAddr;
use web::{AppData, SportdeskServer};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| String::from("sqlite::memory:"));
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| String::from("0.0.0.0:18000"))
        .parse()?;

    let storage = Storage::connect(&database_url).await?;
    storage.migrate().await?;

    if env::var("SEED").map(|v| v != "0").unwrap_or(true) {
        let report = storage.seed().await?;
        info!(
            "seeded taxonomies: {} sports, {} age groups",
            report.sports, report.age_groups
        );
    }

    info!("storage ready: {}", database_url);

    let data = AppData::new(storage);

    SportdeskServer::new(data, bind_addr).run().await;

    Ok(())
}
