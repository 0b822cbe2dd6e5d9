//! Autocomp CLI - run the search server, query it, and manage content directories

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use autocomp_client::AutocompClient;
use autocomp_search::{
    build_search_index_with_report, DocKind, SearchConfig, SearchFilters, SearchQuery, SortOrder,
};
use autocomp_store::sample::{sample_articles, sample_taxonomy};
use autocomp_store::{LocalContentStore, StoreError};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVER: &str = "http://127.0.0.1:9877";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("autocomp=info".parse()?))
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "help" | "--help" | "-h" => print_help(),
        "init" => {
            if args.len() < 3 {
                eprintln!("Usage: autocomp init <dir>");
                return Ok(());
            }
            init(&args[2]).await?;
        }
        "seed" => {
            if args.len() < 3 {
                eprintln!("Usage: autocomp seed <dir>");
                return Ok(());
            }
            seed(&args[2]).await?;
        }
        "server" => run_server(content_dir(args.get(2))).await?,
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: autocomp search <query> [--kind k] [--pillar p] [--section s] [--cluster c] [--year y] [--sort s] [--page n] [--limit n]");
                return Ok(());
            }
            search(parse_search_args(&args[2..])?).await?;
        }
        "suggest" => {
            if args.len() < 3 {
                eprintln!("Usage: autocomp suggest <text> [limit]");
                return Ok(());
            }
            let limit = args.get(3).map(|l| l.parse::<usize>()).transpose()?;
            suggest(&args[2], limit).await?;
        }
        "reindex" => reindex().await?,
        "status" => status().await?,
        "index" => index(content_dir(args.get(2))).await?,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Autocomp CLI - search for auto comparison content

USAGE:
    autocomp <COMMAND> [OPTIONS]

COMMANDS:
    help            Show this help message
    init <dir>      Create an empty content directory
    seed <dir>      Write the sample corpus into a content directory
    server [dir]    Serve a content directory over JSON-RPC
    search <query>  Search (flags: --kind --pillar --section --cluster --year --sort --page --limit)
    suggest <text>  Typeahead suggestions
    reindex         Force the server to rebuild its index
    status          Show the server's index state
    index [dir]     Build the index offline and print it as JSON

ENVIRONMENT:
    AUTOCOMP_SERVER        Server URL (default {DEFAULT_SERVER})
    AUTOCOMP_CONTENT_DIR   Content directory when none is given
    AUTOCOMP_INDEX_TTL_SECS, AUTOCOMP_DEFAULT_LIMIT, AUTOCOMP_MAX_LIMIT

EXAMPLES:
    autocomp seed ./content
    autocomp server ./content
    autocomp search "honda accord"
    autocomp search sedans --sort newest --limit 2
    autocomp suggest "electric suv" 3
"#
    );
}

fn content_dir(arg: Option<&String>) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| std::env::var("AUTOCOMP_CONTENT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("content"))
}

/// Split `search` arguments into query words and flags
fn parse_search_args(args: &[String]) -> Result<SearchQuery> {
    let mut words = Vec::new();
    let mut filters = SearchFilters::default();
    let mut query = SearchQuery::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            words.push(arg.as_str());
            continue;
        }

        let value = iter
            .next()
            .ok_or_else(|| anyhow!("Missing value for {}", arg))?;

        match arg.as_str() {
            "--kind" => filters.kind.push(value.parse::<DocKind>()?),
            "--pillar" => filters.pillar = Some(value.clone()),
            "--section" => filters.section = Some(value.clone()),
            "--cluster" => filters.cluster = Some(value.clone()),
            "--year" => filters.year = Some(value.parse()?),
            "--sort" => query.sort = Some(value.parse::<SortOrder>()?),
            "--page" => query.page = Some(value.parse()?),
            "--limit" => query.limit = Some(value.parse()?),
            other => bail!("Unknown search flag: {}", other),
        }
    }

    query.q = words.join(" ");
    Ok(query.with_filters(filters))
}

async fn init(path: &str) -> Result<()> {
    let store = LocalContentStore::create(path).await?;
    println!("Created content directory: {}", store.path.display());
    Ok(())
}

async fn seed(path: &str) -> Result<()> {
    let store = open_or_create(Path::new(path)).await?;

    let articles = sample_articles();
    for article in &articles {
        store.save_article(article).await?;
    }
    store.save_taxonomy(&sample_taxonomy()).await?;

    println!(
        "Seeded {} with {} articles",
        store.path.display(),
        articles.len()
    );
    Ok(())
}

async fn open_or_create(path: &Path) -> Result<LocalContentStore> {
    match LocalContentStore::open(path).await {
        Ok(store) => Ok(store),
        Err(StoreError::InvalidPath(_)) if !path.exists() => {
            Ok(LocalContentStore::create(path).await?)
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_server(content_dir: PathBuf) -> Result<()> {
    use autocomp_server::{run_server, ServerConfig};

    let config = ServerConfig {
        content_dir,
        search: SearchConfig::from_env(),
        ..ServerConfig::default()
    };

    println!(
        "Serving {} on {}...",
        config.content_dir.display(),
        config.addr
    );
    run_server(config).await?;
    Ok(())
}

async fn search(query: SearchQuery) -> Result<()> {
    let client = connect().await?;
    let response = client.search(query).await?;

    println!(
        "{} results for '{}' (page {}, {}ms)",
        response.total, response.query, response.page, response.took_ms
    );
    for result in &response.results {
        println!(
            "  {:>7.2}  {:<8} {}  {}",
            result.score, result.doc.kind, result.doc.title, result.doc.url
        );
    }
    Ok(())
}

async fn suggest(text: &str, limit: Option<usize>) -> Result<()> {
    let client = connect().await?;
    let response = client.suggest(text, limit).await?;

    if response.suggestions.is_empty() {
        println!("No suggestions");
    }
    for suggestion in &response.suggestions {
        println!("  {}  {}", suggestion.title, suggestion.url);
    }
    Ok(())
}

async fn reindex() -> Result<()> {
    let client = connect().await?;
    let response = client.reindex().await?;
    println!(
        "Reindexed {} documents in {}ms",
        response.documents, response.took_ms
    );
    Ok(())
}

async fn status() -> Result<()> {
    let client = connect().await?;
    let status = client.status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn index(content_dir: PathBuf) -> Result<()> {
    let store = LocalContentStore::open(&content_dir).await?;
    let (docs, report) =
        tokio::task::spawn_blocking(move || build_search_index_with_report(&store)).await??;

    if !report.is_clean() {
        info!("Index report: {:?}", report);
    }
    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}

async fn connect() -> Result<AutocompClient> {
    let url = std::env::var("AUTOCOMP_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
    let client = AutocompClient::connect(&url).await?;
    Ok(client)
}
