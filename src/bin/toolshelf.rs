//! Command-line front end for the tool catalogue.
//!
//! Loads the catalogue (built-in, `--catalogue PATH` or `TOOLSHELF_CATALOGUE`),
//! runs one query and prints the result as text or, with `--json`, as a single
//! compact JSON document on stdout. Lookups that find nothing exit 1.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use toolshelf::{
    Category, CatalogueService, DEFAULT_LANDING_CATEGORIES, DEFAULT_LANDING_TOOLS,
    ListingRequest, Tool, load_catalogue, open_service, resolve_catalogue_path,
};

/// Browse and query the tool catalogue
#[derive(Parser, Debug)]
#[command(name = "toolshelf")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Catalogue file to use instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    catalogue: Option<PathBuf>,

    /// Print compact JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every category and its tools
    List,

    /// Show one tool
    Show {
        /// Tool id, e.g. budget-calculator
        id: String,
    },

    /// Show one category with its tools
    Category {
        /// Category id, e.g. planning
        id: String,
    },

    /// Search tool names, descriptions and tags
    Search {
        /// Search text; blank lists everything
        query: String,

        /// Only keep this category ("all" keeps every category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the landing-page selection and featured tools
    Featured {
        /// Number of leading categories to sample
        #[arg(long, default_value_t = DEFAULT_LANDING_CATEGORIES)]
        categories: usize,

        /// Number of leading tools taken from each sampled category
        #[arg(long, default_value_t = DEFAULT_LANDING_TOOLS)]
        tools: usize,
    },

    /// Print catalogue counts
    Stats,

    /// Validate a catalogue file and print a summary
    Validate {
        /// Catalogue to validate; defaults to the resolved catalogue
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("toolshelf: {err:#}");
        std::process::exit(1);
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => {
            let service = load_service(cli)?;
            print_categories(cli, service.list_categories())
        }
        Commands::Show { id } => show_tool(cli, &load_service(cli)?, id),
        Commands::Category { id } => {
            let service = load_service(cli)?;
            match service.tools_by_category(id) {
                Some(category) => print_categories(cli, std::slice::from_ref(category)),
                None => bail!("category not found: {id}"),
            }
        }
        Commands::Search { query, category } => {
            let service = load_service(cli)?;
            let request = ListingRequest::new(Some(query.as_str()), category.as_deref());
            let results = request.resolve(&service);
            if results.is_empty() && !cli.json {
                println!("no matching tools");
                return Ok(());
            }
            print_categories(cli, &results)
        }
        Commands::Featured { categories, tools } => {
            let service = load_service(cli)?;
            let landing = service.landing_tools(*categories, *tools);
            let featured = service.featured_tools();
            if cli.json {
                return print_json(&FeaturedView {
                    landing: &landing,
                    featured: &featured,
                });
            }
            println!("landing:");
            for tool in &landing {
                println!("  {}", tool_line(tool));
            }
            println!("featured:");
            for tool in &featured {
                println!("  {}", tool_line(tool));
            }
            Ok(())
        }
        Commands::Stats => {
            let stats = load_service(cli)?.stats();
            if cli.json {
                return print_json(&stats);
            }
            println!("categories:  {}", stats.categories);
            println!("tools:       {}", stats.tools);
            println!("available:   {}", stats.available);
            println!("coming soon: {}", stats.coming_soon);
            println!("featured:    {}", stats.featured);
            Ok(())
        }
        Commands::Validate { path } => {
            validate(cli, path.as_deref().or(cli.catalogue.as_deref()))
        }
    }
}

fn load_service(cli: &Cli) -> Result<CatalogueService> {
    let service = open_service(cli.catalogue.as_deref())?;
    info!("catalogue ready: {:?}", service.stats());
    Ok(service)
}

#[derive(Serialize)]
struct FeaturedView<'a> {
    landing: &'a [&'a Tool],
    featured: &'a [&'a Tool],
}

fn validate(cli: &Cli, explicit: Option<&std::path::Path>) -> Result<()> {
    let path = resolve_catalogue_path(explicit);
    let index = load_catalogue(path.as_deref())?;
    let source = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in catalogue".to_string());
    let service = CatalogueService::new(index);
    let stats = service.stats();
    if cli.json {
        return print_json(&serde_json::json!({
            "source": source,
            "schema_version": service.index().schema_version(),
            "stats": stats,
        }));
    }
    println!(
        "{source}: ok ({}, {} categories, {} tools)",
        service.index().schema_version(),
        stats.categories,
        stats.tools
    );
    Ok(())
}

fn show_tool(cli: &Cli, service: &CatalogueService, id: &str) -> Result<()> {
    let detail = service.detail(id);
    let Some(tool) = detail.tool() else {
        bail!("tool not found: {id}");
    };
    if cli.json {
        return print_json(&detail);
    }
    println!("{} {} [{}]", tool.icon, tool.name, tool.id);
    println!("  {}", tool.description);
    println!("  category: {}", tool.category);
    println!("  path:     {}", tool.path);
    if !tool.tags.is_empty() {
        println!("  tags:     {}", tool.tags.join(", "));
    }
    println!("  status:   {}", tool.availability().as_str());
    Ok(())
}

fn print_categories(cli: &Cli, categories: &[Category]) -> Result<()> {
    if cli.json {
        return print_json(&categories);
    }
    for category in categories {
        println!("{} {} [{}]", category.icon, category.name, category.id);
        if let Some(description) = &category.description {
            println!("  {description}");
        }
        for tool in &category.tools {
            println!("  - {}", tool_line(tool));
        }
    }
    Ok(())
}

fn tool_line(tool: &Tool) -> String {
    let mut line = format!("{} {} ({})", tool.icon, tool.name, tool.id);
    if tool.featured {
        line.push_str(" *featured*");
    }
    if tool.is_coming_soon {
        line.push_str(" [coming soon]");
    }
    line
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let compact = serde_json::to_string(value)?;
    println!("{compact}");
    Ok(())
}
