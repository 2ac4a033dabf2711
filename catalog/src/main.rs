#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use catalog::config::CatalogConfig;
use catalog::store::{MemoryStore, load_seed_file, sample_items};
use catalog::{Catalog, Disambiguation, Item, SearchField};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from environment variables
    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: seed_file={:?}, load_sample_data={}",
        config.seed_file,
        config.load_sample_data
    );

    let items = match &config.seed_file {
        Some(path) => load_seed_file(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load seed file {}: {e}", path.display());
            std::process::exit(1);
        }),
        None if config.load_sample_data => sample_items(),
        None => Vec::new(),
    };

    let catalog = Catalog::open(MemoryStore::with_items(items)).unwrap_or_else(|e| {
        tracing::error!("Failed to open catalog: {e}");
        std::process::exit(1);
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => print_items(&catalog.list()),
        [command, keyword] if command == "find" => match catalog.disambiguate(keyword) {
            Disambiguation::NoMatch => println!("no title matches '{keyword}'"),
            Disambiguation::Unique(item) => print_items(&[item]),
            Disambiguation::Ambiguous(ranked) => {
                for (ordinal, item) in ranked.iter().enumerate() {
                    println!("{}. {}", ordinal + 1, format_item(item));
                }
            }
        },
        [field, keyword] => match field.parse::<SearchField>() {
            Ok(field) => print_items(&catalog.search(field, keyword)),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(2);
            }
        },
        _ => {
            eprintln!("usage: catalog [title|author|genre <keyword>] | [find <keyword>]");
            std::process::exit(2);
        }
    }
}

fn print_items(items: &[&Item]) {
    for item in items {
        println!("{}", format_item(item));
    }
}

fn format_item(item: &Item) -> String {
    format!("{}\t{}\t{}\t{}", item.id, item.title, item.author, item.genre)
}
