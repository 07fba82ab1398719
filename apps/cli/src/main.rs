use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    config::validate_api_base_url, load_settings, ApplyOutcome, CatalogController,
    HttpArtworkFetcher, ViewState,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "artwork-cli", about = "Print one page of the Art Institute artworks listing")]
struct Args {
    /// Page to show; clamped to the available range.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
    /// Mark the first n rows of the page as selected.
    #[arg(long)]
    select_first: Option<i64>,
    #[arg(long)]
    api_base: Option<String>,
    /// Print the rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load viewer settings")?;
    if let Some(api_base) = args.api_base {
        validate_api_base_url(&api_base)?;
        settings.api_base_url = api_base;
    }
    tracing::debug!(api_base_url = %settings.api_base_url, page = args.page, "loading artworks");
    let fetcher = HttpArtworkFetcher::new(&settings);
    let mut controller = CatalogController::default();

    // The page count is only known after the first response.
    load(&mut controller, &fetcher, 1).await?;
    if args.page != 1 {
        load(&mut controller, &fetcher, args.page).await?;
    }
    controller.apply_custom_select(args.select_first);

    let view = controller.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else {
        print!("{}", render_page(&view));
    }
    Ok(())
}

async fn load(
    controller: &mut CatalogController,
    fetcher: &HttpArtworkFetcher,
    page: i64,
) -> Result<()> {
    match controller.load_page_with(fetcher, page).await {
        ApplyOutcome::Applied => Ok(()),
        ApplyOutcome::Failed | ApplyOutcome::Stale => {
            let reason = controller
                .last_error()
                .map(|failure| format!("page {}: {}", failure.page, failure.message))
                .unwrap_or_else(|| "request superseded".to_string());
            Err(anyhow!("failed to load artworks {reason}"))
        }
    }
}

fn render_page(view: &ViewState) -> String {
    let mut out = String::new();
    for row in &view.rows {
        let marker = if view.is_selected(row.id) { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{marker} {:>7}  {}  |  {}  |  {}  |  {}",
            row.id,
            row.display_title(),
            row.display_place_of_origin(),
            row.display_artist().replace('\n', " / "),
            row.display_dates(),
        );
    }

    let window: Vec<String> = view
        .page_window
        .iter()
        .map(|page| {
            if *page == view.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "pages: {}  (page {} of {}, {} artworks)",
        window.join(" "),
        view.page,
        view.total_pages,
        view.total_records
    );
    let _ = writeln!(out, "Selected IDs: {}", view.selected_count);
    out
}
