//! voiceflow CLI entry point.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use voiceflow::backend::{Backend, create_backend};
use voiceflow::cli::{Args, SynthesisJob};
use voiceflow::engine::{PassageRequest, Pipeline};
use voiceflow::text::VoiceMap;

fn main() -> Result<()> {
    let args = Args::parse();

    let backend = create_backend(args.engine, &args.host);
    let pipeline = Pipeline::new(backend);

    // Utility commands first
    if args.health {
        return health_check(&pipeline, &args);
    }

    if args.stdin {
        return run_stdin_job(&pipeline, &args);
    }

    let Some(passage_path) = args.passage.clone() else {
        eprintln!("No action specified. Use -p to synthesize a passage or --stdin for job mode.");
        eprintln!("Run with --help for usage information.");
        return Ok(());
    };

    run_passage(&pipeline, &args, passage_path)
}

fn health_check<B: Backend>(pipeline: &Pipeline<B>, args: &Args) -> Result<()> {
    let health = pipeline
        .health_check()
        .with_context(|| format!("Backend {} is not reachable", args.engine.name()))?;

    println!("Backend: {}", args.engine.name());
    println!("  Status: {}", health.status);
    println!("  Model: {}", health.model);
    if let Some(device) = &health.device {
        println!("  Device: {device}");
    }

    Ok(())
}

fn run_stdin_job<B: Backend>(pipeline: &Pipeline<B>, args: &Args) -> Result<()> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read job from stdin")?;

    if line.trim().is_empty() {
        bail!("No job received on stdin");
    }

    let job = SynthesisJob::from_json_line(&line).context("Invalid synthesis job")?;

    if args.verbose {
        println!("Synthesizing job:");
        println!("  Language: {}", job.lang);
        if let Some(speaker) = &job.speaker {
            println!("  Speaker: {}", speaker.display());
        }
    }

    let written = pipeline.run_job(&job).context("Synthesis failed")?;
    println!("Audio saved to: {}", written.display());

    Ok(())
}

fn run_passage<B: Backend>(
    pipeline: &Pipeline<B>,
    args: &Args,
    passage_path: PathBuf,
) -> Result<()> {
    if args.engine.supports_cloning() && args.speaker.is_none() {
        eprintln!(
            "Note: no speaker sample given; {} will use its default voice.",
            args.engine.name()
        );
    }

    let voice_map = match args.voice_map_json().context("Failed to read voice map")? {
        Some(json) => VoiceMap::parse_lenient(&json),
        None => VoiceMap::default(),
    };

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => default_output_dir()?,
    };

    let request = PassageRequest {
        passage_path,
        speaker: args.speaker.clone(),
        output_dir,
        voice_map,
        default_lang: args.lang.clone(),
        speed: args.speed,
    };

    println!("Synthesizing passage with {}...", args.engine.name());
    if args.verbose {
        println!("  Passage: {}", request.passage_path.display());
        if let Some(speaker) = &request.speaker {
            println!("  Speaker: {}", speaker.display());
        }
        println!("  Output dir: {}", request.output_dir.display());
        println!("  Voice map entries: {}", request.voice_map.len());
        println!("  Speed: {:.1}x", request.speed);
    }

    let report = pipeline
        .run_passage(&request)
        .context("Passage synthesis failed")?;

    println!("Synthesized {} paragraph(s):", report.segments.len());
    if args.verbose {
        for segment in &report.segments {
            println!("  {}", segment.display());
        }
    }
    println!("Final combined audio: {}", report.final_path.display());
    println!(
        "  Samples: {} (finished {})",
        report.total_samples,
        report.completed_at.to_rfc3339()
    );

    Ok(())
}

fn default_output_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".voiceflow").join("out"))
}
