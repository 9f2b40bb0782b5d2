mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{ChunkArgs, Cli, Commands, PlanArgs, ProbeArgs, SplitArgs};
use media_splitter::{ChunkPlan, MediaSplitter, PlanMode, SplitConfig, SplitReport, SplitRequest};
use std::path::Path;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = SplitConfig::default().with_transcoder_path(&cli.ffmpeg);

    let result = match &cli.command {
        Commands::Split(args) => handle_split_command(args, config).await,
        Commands::Plan(args) => handle_plan_command(args, config).await,
        Commands::Probe(args) => handle_probe_command(args, config).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn build_request(args: &ChunkArgs) -> SplitRequest {
    let mode = match (args.start_offset, args.start_index) {
        (Some(start_secs), _) => PlanMode::FromOffset {
            start_secs,
            max_chunks: args.count,
        },
        (None, Some(start_index)) => PlanMode::FromIndex {
            start_index,
            max_chunks: args.count,
        },
        // A bare --count takes the first N chunks of the full split
        (None, None) if args.count.is_some() => PlanMode::FromIndex {
            start_index: 0,
            max_chunks: args.count,
        },
        (None, None) => PlanMode::Full,
    };

    SplitRequest::new(&args.input, &args.output, args.seconds)
        .create_dir_if_missing(args.create_dir)
        .with_mode(mode)
}

async fn handle_split_command(args: &SplitArgs, config: SplitConfig) -> anyhow::Result<()> {
    let config = config
        .with_audio_codec(&args.codec)
        .with_max_concurrent_chunks(args.max_concurrent);
    let splitter = MediaSplitter::new(config);
    let request = build_request(&args.chunks);

    info!(
        "Splitting '{}' into {}s chunks",
        request.input_path.display(),
        request.seconds_per_chunk
    );

    let (plan, paths) = splitter.split_with_plan(&request).await?;

    info!("Created {} chunk files:", paths.len());
    for path in &paths {
        info!("  - {}", path.display());
    }

    if let Some(json_path) = &args.chunks.json_output {
        write_report(json_path, &request, &plan, true).await?;
    }

    Ok(())
}

async fn handle_plan_command(args: &PlanArgs, config: SplitConfig) -> anyhow::Result<()> {
    let splitter = MediaSplitter::new(config);
    let request = build_request(&args.chunks);
    let plan = splitter.plan(&request).await?;

    println!("\n=== Plan for '{}' ===", request.input_path.display());
    println!("Total duration: {}s", plan.total_duration_secs);
    println!("Chunk length: {}s", plan.seconds_per_chunk);
    println!("Chunks: {}", plan.len());
    for chunk in &plan.chunks {
        println!(
            "  Chunk {:>4}: start {:>10.3}s  -> {}",
            chunk.index,
            chunk.start_secs,
            chunk.output_path.display()
        );
    }

    if let Some(json_path) = &args.chunks.json_output {
        write_report(json_path, &request, &plan, false).await?;
    }

    Ok(())
}

async fn handle_probe_command(args: &ProbeArgs, config: SplitConfig) -> anyhow::Result<()> {
    let splitter = MediaSplitter::new(config);
    let probe = splitter.probe(&args.input).await?;

    println!("{}: {}s", probe.input_file_name, probe.total_duration_secs);
    Ok(())
}

async fn write_report(
    json_path: &Path,
    request: &SplitRequest,
    plan: &ChunkPlan,
    completed: bool,
) -> anyhow::Result<()> {
    let report = SplitReport {
        input: request.input_path.to_string_lossy().to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        total_duration_secs: plan.total_duration_secs,
        seconds_per_chunk: plan.seconds_per_chunk,
        chunks: plan.chunks.clone(),
        completed,
    };

    let json_content =
        serde_json::to_string_pretty(&report).context("Failed to serialize chunk report")?;

    tokio::fs::write(json_path, json_content)
        .await
        .context("Failed to write JSON report file")?;

    info!("Report written to: {}", json_path.display());
    Ok(())
}
