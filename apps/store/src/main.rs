use retrogo_store::config::StoreConfig;
use retrogo_store::domain::schema::RELATIONS;
use retrogo_store::infrastructure::database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = StoreConfig::from_env()?;

    let pool = database::connect(&config).await?;
    database::migrate(&pool).await?;

    for relation in RELATIONS.iter() {
        tracing::info!(
            relation = relation.name,
            child = relation.child.table(),
            parent = relation.parent.table(),
            on_delete = relation.on_delete.sql(),
            "Relation in place"
        );
    }

    pool.close().await;
    Ok(())
}
