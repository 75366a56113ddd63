// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use eventjson::{
    decode_document, ChunkReader, CursorConfig, DecodeError, Event, SliceCursor, StreamCursor,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Backend {
    /// Borrow the whole document
    Slice,
    /// Pull the document through a refill buffer
    Stream,
}

/// Decode an error-report event document and print it.
#[derive(Debug, Parser)]
#[command(name = "decode-event")]
struct Cli {
    /// JSON document to decode
    path: PathBuf,

    #[arg(long, value_enum, default_value_t = Backend::Slice)]
    backend: Backend,

    /// Bytes handed out per read by the stream backend
    #[arg(long, default_value_t = 4096)]
    chunk_size: usize,

    /// Decode the document this many times, reusing one cursor
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

fn run_slice(data: &[u8], repeat: usize) -> Result<Event, DecodeError> {
    let mut cursor = SliceCursor::new(data);
    let mut event: Event = decode_document(&mut cursor)?;
    for _ in 1..repeat {
        cursor.reset(data);
        event = decode_document(&mut cursor)?;
    }
    Ok(event)
}

fn run_stream(data: &[u8], chunk_size: usize, repeat: usize) -> Result<Event, DecodeError> {
    let config = CursorConfig::default().with_buffer_size(chunk_size);
    let mut cursor = StreamCursor::with_config(ChunkReader::new(data, chunk_size), config);
    let mut event: Event = decode_document(&mut cursor)?;
    for _ in 1..repeat {
        cursor.reset(ChunkReader::new(data, chunk_size));
        event = decode_document(&mut cursor)?;
    }
    Ok(event)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let data = match std::fs::read(&cli.path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Unable to read file '{}': {}", cli.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let repeat = cli.repeat.max(1);
    log::info!(
        "decoding {} ({} bytes) with {:?} backend, {} time(s)",
        cli.path.display(),
        data.len(),
        cli.backend,
        repeat
    );
    let result = match cli.backend {
        Backend::Slice => run_slice(&data, repeat),
        Backend::Stream => run_stream(&data, cli.chunk_size, repeat),
    };

    match result {
        Ok(event) => {
            println!("{event:#?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
