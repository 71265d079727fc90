use std::io::Write;

use narrascope_core::Panel;
use narrascope_types::Mode;

use crate::context::CliContext;
use crate::render;

pub async fn search(query: &str, ctx: &mut CliContext) {
    ctx.search.set_query(query);
    ctx.search.submit(&ctx.client).await;
    println!("{}", render::search_panel(&ctx.search));
}

pub async fn compare(truth: &str, media: &str, ctx: &mut CliContext) {
    let panel = &mut ctx.compare_query;
    panel.set_mode(Mode::Compare);
    panel.intended_truth = truth.to_string();
    panel.media_text = media.to_string();
    panel.submit(&ctx.client).await;
    println!("{}", render::compare_query_panel(panel));
}

pub async fn ask(question: &str, ctx: &mut CliContext) {
    let panel = &mut ctx.compare_query;
    panel.set_mode(Mode::Query);
    panel.question = question.to_string();
    panel.submit(&ctx.client).await;
    println!("{}", render::compare_query_panel(panel));
}

pub async fn trend(
    keywords: &str,
    days: Option<u32>,
    granularity: Option<u32>,
    ctx: &mut CliContext,
) {
    let trend = &mut ctx.trend;
    trend.set_keywords(keywords);
    if let Some(days) = days {
        trend.time_period_days = days;
    }
    if let Some(granularity) = granularity {
        trend.granularity_days = granularity;
    }
    trend.submit(&ctx.client).await;
    println!("{}", render::trend_panel(trend));
}

pub fn show_config(ctx: &CliContext) {
    let config = &ctx.config;
    println!("{:<24} {}", "Analysis service", config.base_url);
    println!("{:<24} {} days", "Trend period", config.trend_period_days);
    println!("{:<24} {} days", "Trend granularity", config.trend_granularity_days);
}

pub fn set_url(url: &str, ctx: &mut CliContext) {
    if url == ctx.config.base_url {
        println!("Analysis service already configured to {}", url);
        return;
    }

    match ctx.set_base_url(url) {
        Ok(()) => println!("Analysis service set to {}", ctx.config.base_url),
        Err(err) => println!("Update failed: {err}"),
    }
}

pub fn exit() -> Result<(), String> {
    writeln!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
