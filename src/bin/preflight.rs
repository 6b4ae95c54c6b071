use product_catalog::infra::config;
use product_catalog::PostgresProductStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let max_connections = config::db_max_connections()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  DB_MAX_CONNECTIONS={}", max_connections);

    let store = PostgresProductStore::connect(&database_url, max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to DATABASE_URL: {}", e))?;
    println!("  Database reachable; products table present.");

    let count = store.count().await?;
    println!("  Stored products: {}", count);

    println!("> Preflight OK.");
    Ok(())
}
