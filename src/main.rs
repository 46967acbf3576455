use tracing::info;

use lorepo::{Config, Database, Repository, TypeRegistry};

fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = lorepo::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        lorepo::logging::init_console_only(&config.logging.level);
    }

    info!("lorepo - Learning Object Repository");

    let _db = match Database::open(&config.database.path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let repository = match Repository::new(&config.repository.root, &config.repository.base_url) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("Failed to initialize repository: {e}");
            std::process::exit(1);
        }
    };

    let registry = TypeRegistry::with_defaults();

    info!(
        "Repository at {:?}, serving {}",
        repository.root(),
        config.repository.base_url
    );
    info!("Registered resource types: {:?}", registry.names());
}
