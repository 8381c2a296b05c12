use clap::Parser;
use doc_scrape::config::load_env_file;
use doc_scrape::{CrawlConfig, OutputMode, Renderer, RendererConfig, WebDriverRenderer};
use std::path::PathBuf;
use std::process::ExitCode;

mod args;
use args::{Args, normalize_legacy_flags};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("doc_scrape=info"))
        .init();

    // Parse command-line arguments
    let args = Args::parse_from(normalize_legacy_flags(std::env::args()));

    if let Err(e) = load_env_file(args.env_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let renderer_config = match RendererConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Starting to scrape documentation from {}", config.start_url);

    let mut renderer = match WebDriverRenderer::launch(renderer_config).await {
        Ok(renderer) => renderer,
        Err(e) => {
            ::log::error!("Failed to start browser: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    match doc_scrape::run(&config, &mut renderer).await {
        Ok(written) => report(&config, &written),
        Err(e) => ::log::error!("An error occurred during scraping: {}", e),
    }
    ::log::info!(
        "Finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    // Always release the browser, even after a failed run
    if let Err(e) = renderer.close().await {
        ::log::warn!("Failed to shut down browser: {}", e);
    }

    ExitCode::SUCCESS
}

fn report(config: &CrawlConfig, written: &[PathBuf]) {
    match (config.output, written.first()) {
        (OutputMode::SplitPerSection, _) => println!(
            "Scraping completed. Individual section files saved in '{}'.",
            config.output_dir.display()
        ),
        (_, Some(path)) => println!("Scraping completed. Data saved to '{}'.", path.display()),
        (_, None) => println!("Scraping completed. Nothing could be extracted from {}.", config.start_url),
    }
}
