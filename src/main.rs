mod cli;

use marquee::{config, listing, Card, Marquee};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "marquee=trace,marquee_common=debug".to_string()
        } else {
            "marquee=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::NowScreening { hide_user, json } => {
            now_screening(cli.config.as_deref(), hide_user, json)
        }
        Commands::OnDemand { count, json } => on_demand(cli.config.as_deref(), count, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("marquee {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn now_screening(config_path: Option<&Path>, hide_user: bool, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let marquee = Marquee::from_config(&config)?;

    let mut filters = config.now_screening.clone();
    filters.hide_user |= hide_user;

    let rt = tokio::runtime::Runtime::new()?;
    let cards = rt.block_on(marquee.list_now_screening(&filters));
    tracing::info!("{} active session(s)", cards.len());

    print_cards(&cards, json)
}

fn on_demand(config_path: Option<&Path>, count: Option<String>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let marquee = Marquee::from_config(&config)?;

    let count = match count {
        Some(raw) => listing::parse_count(Some(&raw)),
        None => listing::clamp_count(Some(config.on_demand.count)),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let cards = rt.block_on(marquee.list_on_demand(Some(count as i64), &config.on_demand.filters));
    tracing::info!("{} on-demand card(s)", cards.len());

    print_cards(&cards, json)
}

fn print_cards(cards: &[Card], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("Nothing to show.");
        return Ok(());
    }

    for card in cards {
        let mut line = match (&card.series_title, card.season, card.episode) {
            (Some(series), Some(s), Some(e)) => format!("{} S{:02}E{:02} {}", series, s, e, card.title),
            _ => card.title.clone(),
        };
        if line.is_empty() {
            line = "(idle)".to_string();
        }
        if card.runtime_ms.is_some() {
            line.push_str(&format!(" [{}%]", card.percent()));
        }
        if let Some(name) = card.player.as_ref().and_then(|p| p.name.as_deref()) {
            line.push_str(&format!(" on {}", name));
        }
        println!("{}", line);
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            match &config.provider {
                Some(provider) => {
                    println!("  Provider: {} at {}", provider.kind, provider.url);
                    println!(
                        "  Resume user: {}",
                        provider.user_id.as_deref().unwrap_or("(none, recently added only)")
                    );
                    println!("  Timeout: {}s", provider.timeout_secs);
                }
                None => println!("  Provider: (not configured)"),
            }
            println!("  Hide user: {}", config.now_screening.hide_user);
            println!(
                "  On-demand count: {}",
                listing::clamp_count(Some(config.on_demand.count))
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!(
                "  On-demand count: {}",
                listing::clamp_count(Some(config.on_demand.count))
            );
        }
    }

    Ok(())
}
