//! Batch download example
//!
//! This example demonstrates the core functionality of yt-batch-dl:
//! - Creating a downloader instance (yt-dlp is located automatically)
//! - Subscribing to events
//! - Downloading a link or a `.txt` list of links
//! - Extracting a playlist into batch files
//! - Stopping cleanly on Ctrl+C
//!
//! ```bash
//! cargo run --example batch_download -- download <link-or-file.txt> [dest] [best|720p|480p|audio]
//! cargo run --example batch_download -- extract <playlist-url> [dest]
//! ```

use yt_batch_dl::{
    BatchDownloader, Config, DownloadJob, DownloadOptions, Event, ExtractJob, LogLevel, Quality,
    resolve_input, run_until_signal,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, input) = match (args.first(), args.get(1)) {
        (Some(mode), Some(input)) => (mode.as_str(), input.as_str()),
        _ => {
            eprintln!("usage: batch_download <download|extract> <link-or-file> [dest] [quality]");
            std::process::exit(2);
        }
    };
    let dest = args.get(2).cloned().unwrap_or_else(|| "downloads".to_string());

    // Optional config.json in the working directory
    let config = if std::path::Path::new("config.json").is_file() {
        Config::from_json_file("config.json")?
    } else {
        Config::default()
    };
    let downloader = BatchDownloader::new(config)?;

    // Subscribe to events
    let mut events = downloader.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Log { level, message, .. } => match level {
                    LogLevel::Output => println!("  {}", message),
                    LogLevel::Info => println!("✓ {}", message),
                    LogLevel::Warn => println!("! {}", message),
                    LogLevel::Error => eprintln!("✗ {}", message),
                },
                Event::Progress { item, percent, .. } => {
                    println!("  link {}: {}%", item + 1, percent);
                }
                Event::Finished { summary, .. } => {
                    println!(
                        "Done: {} succeeded, {} failed, {} of {} attempted ({:?})",
                        summary.succeeded,
                        summary.failed,
                        summary.attempted,
                        summary.total,
                        summary.outcome
                    );
                }
                Event::ExtractFinished { files, .. } => {
                    println!("Wrote {} batch file(s)", files.len());
                }
            }
        }
    });

    match mode {
        "download" => {
            let quality: Quality = args
                .get(3)
                .map(|q| q.parse::<Quality>())
                .transpose()?
                .unwrap_or(Quality::P720);
            let urls = resolve_input(input)?;
            println!("Downloading {} link(s) at {} into {}", urls.len(), quality, dest);

            let job = DownloadJob::new(urls, &dest)
                .with_quality(quality)
                .with_options(DownloadOptions {
                    numbering: true,
                    ..Default::default()
                });
            let handle = downloader.start_download(job)?;

            // Ctrl+C stops the current yt-dlp process and skips the rest
            if run_until_signal(&handle).await {
                println!("Stopping...");
            }
            handle.join().await?;
        }
        "extract" => {
            let handle = downloader.start_extract(ExtractJob::new(input, &dest))?;
            for batch in handle.join().await? {
                println!("  {} ({} links)", batch.path.display(), batch.len());
            }
        }
        other => {
            eprintln!("unknown mode: {}", other);
            std::process::exit(2);
        }
    }

    // Let the event printer drain
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    Ok(())
}
