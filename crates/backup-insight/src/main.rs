mod bootstrap;
mod report;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use insight_core::notify::{LogSink, NoticeSink};
use insight_core::settings::Settings;
use insight_core::time_utils::resolve_timezone;
use insight_data::stats::summarize;
use insight_runtime::pipeline::parse_batch;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    tracing::info!("backup-insight v{} starting", env!("CARGO_PKG_VERSION"));

    let files = bootstrap::collect_input_files(&settings.paths);
    let kind = bootstrap::resolve_kind(&settings, &files);
    let tz = resolve_timezone(&settings.timezone);

    tracing::info!(
        kind = kind.label(),
        files = files.len(),
        timezone = %tz,
        "starting ingestion"
    );

    let sink: Arc<dyn NoticeSink> = Arc::new(LogSink);
    let quiet = settings.quiet;
    let mut on_progress = move |p: insight_data::batch::BatchProgress| {
        if !quiet {
            eprintln!("[{:>3}%] {}/{} {}", p.percentage, p.current, p.total, p.file_name);
        }
    };

    let result = parse_batch(&files, kind, settings.chunk_size, &mut on_progress, sink).await?;
    let stats = summarize(&result.records);

    match settings.output.as_str() {
        "json" => println!("{}", report::render_json(&result, &stats)?),
        _ => print!("{}", report::render_text(&result, &stats, tz)),
    }

    Ok(())
}
