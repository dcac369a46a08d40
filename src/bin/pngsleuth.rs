use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::{Parser, Subcommand};
use pngsleuth::{
  analysis::{analyze_batch, BatchFile, PngReport},
  lsb::{ChannelBitStreams, ChannelSelection},
  png::{human_file_size, FileIdentity, TextDecodeOptions, TextPayloads},
  Channel, SleuthResult,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Look for data hidden inside of PNG files", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Show the header info, text chunks, and trailing data of PNG files.
  Inspect {
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Print one JSON document instead of a text report.
    #[arg(long)]
    json: bool,
    /// Largest size (in bytes) that a compressed text chunk may inflate to.
    #[arg(long, default_value_t = TextDecodeOptions::DEFAULT_MAX_INFLATED_LEN)]
    max_inflate: usize,
  },
  /// Pull an LSB message out of raw RGBA8 pixels (as dumped by an image
  /// decoder).
  Lsb {
    #[arg(long)]
    raw: PathBuf,
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
    /// Channel letters to read, in any order (they're always read R, G, B, A).
    #[arg(long, default_value = "rgb")]
    channels: String,
    /// Also print each selected channel's raw bit string.
    #[arg(long)]
    bits: bool,
  },
}

#[derive(Serialize)]
#[serde(untagged)]
enum FileOutcome<'b> {
  Report(PngReport<'b>),
  Failed { file_name: String, error: String },
}

fn main() -> ExitCode {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

  let cli = Cli::parse();
  match cli.command {
    Command::Inspect { files, json, max_inflate } => {
      inspect(&files, json, &TextDecodeOptions { max_inflated_len: max_inflate })
    }
    Command::Lsb { raw, width, height, channels, bits } => lsb(&raw, width, height, &channels, bits),
  }
}

fn inspect(paths: &[PathBuf], json: bool, options: &TextDecodeOptions) -> ExitCode {
  let mut failed = false;
  let mut loaded: Vec<(String, Vec<u8>)> = Vec::with_capacity(paths.len());
  for path in paths {
    match std::fs::read(path) {
      Ok(bytes) => loaded.push((path.display().to_string(), bytes)),
      Err(e) => {
        eprintln!("{}: {e}", path.display());
        failed = true;
      }
    }
  }

  let batch: Vec<BatchFile<'_>> = loaded
    .iter()
    .map(|(name, bytes)| BatchFile {
      identity: FileIdentity::new(name.as_str(), hex::encode(Sha256::digest(bytes))),
      bytes,
    })
    .collect();
  let results = analyze_batch(&batch, options);
  failed |= results.iter().any(Result::is_err);

  if json {
    let outcomes: Vec<FileOutcome<'_>> = batch
      .iter()
      .zip(results)
      .map(|(file, result)| match result {
        Ok(report) => FileOutcome::Report(report),
        Err(e) => FileOutcome::Failed {
          file_name: file.identity.file_name.clone().unwrap_or_default(),
          error: e.to_string(),
        },
      })
      .collect();
    match serde_json::to_string_pretty(&outcomes) {
      Ok(s) => println!("{s}"),
      Err(e) => {
        eprintln!("JSON error: {e}");
        failed = true;
      }
    }
  } else {
    for (file, result) in batch.iter().zip(&results) {
      print_report(file, result);
    }
  }

  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

fn print_report(file: &BatchFile<'_>, result: &SleuthResult<PngReport<'_>>) {
  let name = file.identity.file_name.as_deref().unwrap_or("<unnamed>");
  let report = match result {
    Ok(report) => report,
    Err(e) => {
      println!("== {name}: {e}");
      println!();
      return;
    }
  };
  let m = &report.metadata;
  println!("== {name}");
  println!("SHA256:           {}", m.identity.sha256.as_deref().unwrap_or(""));
  println!("File Size:        {}", human_file_size(m.file_size));
  println!("Image Resolution: {} \u{d7} {}", m.width, m.height);
  println!("File Signature:   {}", m.signature_hex);
  println!("Color Type:       {}", m.color_type);
  println!("Bit Depth:        {} Bits", m.bit_depth);
  println!("Compression:      {}", m.compression_method);
  println!("Filter:           {}", m.filter_method);
  println!("Interlace Method: {}", m.interlace_description());
  println!("Ancillary Chunks: {}", m.ancillary_chunks_description());
  println!("Total Chunks:     {} Chunks", m.chunk_count);
  println!("Has Image Data:   {}", m.has_image_data);
  if m.truncated {
    println!("Warning:          chunk stream is truncated");
  }
  match &report.text {
    TextPayloads::NoneFound => println!("Text Chunks:      No stego chunks found."),
    TextPayloads::Found(entries) => {
      println!("Text Chunks:");
      for entry in entries {
        println!("  {}: {entry}", entry.kind);
      }
    }
  }
  match &report.trailing {
    None => println!("After IEND:       nothing"),
    Some(t) => println!("After IEND:       {} bytes at offset {}\n{}", t.bytes.len(), t.data_offset, t.text()),
  }
  println!();
}

fn lsb(raw: &Path, width: u32, height: u32, channels: &str, bits: bool) -> ExitCode {
  let Some(selection) = ChannelSelection::from_letters(channels) else {
    eprintln!("channels must only use the letters r, g, b, and a (got {channels:?})");
    return ExitCode::FAILURE;
  };
  let bytes = match std::fs::read(raw) {
    Ok(bytes) => bytes,
    Err(e) => {
      eprintln!("{}: {e}", raw.display());
      return ExitCode::FAILURE;
    }
  };
  let streams = match ChannelBitStreams::from_rgba_bytes(width, height, &bytes) {
    Ok(streams) => streams,
    Err(e) => {
      eprintln!("{}: {e} ({} bytes for {width}x{height})", raw.display(), bytes.len());
      return ExitCode::FAILURE;
    }
  };
  if bits {
    for c in Channel::ALL.into_iter().filter(|&c| selection.contains(c)) {
      println!("{}: {}", c.letter(), streams.bit_string(c));
    }
  }
  println!("{}", streams.extract_message(selection));
  ExitCode::SUCCESS
}
