use clap::{Parser, Subcommand};
use narrascope_cli::{CliContext, commands, logging, readline};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let mut ctx = CliContext::load();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "narrascope console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search collected coverage
    Search {
        #[arg(short, long)]
        query: String,
    },
    /// Compare media coverage against the intended message
    Compare {
        #[arg(short, long)]
        truth: String,
        #[arg(short, long)]
        media: String,
    },
    /// Ask the knowledge base a question
    Ask {
        #[arg(short, long)]
        question: String,
    },
    /// Analyze perception trend for keywords
    Trend {
        #[arg(short, long)]
        keywords: String,
        #[arg(short, long)]
        days: Option<u32>,
        #[arg(short, long)]
        granularity: Option<u32>,
    },
    Config,
    SetUrl {
        #[arg(short, long)]
        url: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "narrascope".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Search { query }) => commands::search(query, ctx).await,
        Some(Commands::Compare { truth, media }) => commands::compare(truth, media, ctx).await,
        Some(Commands::Ask { question }) => commands::ask(question, ctx).await,
        Some(Commands::Trend {
            keywords,
            days,
            granularity,
        }) => commands::trend(keywords, *days, *granularity, ctx).await,
        Some(Commands::Config) => commands::show_config(ctx),
        Some(Commands::SetUrl { url }) => commands::set_url(url, ctx),
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
