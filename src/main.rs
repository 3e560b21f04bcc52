//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::io::{self, Read, Write};

use huffzip::compression::compress::compress_file;
use huffzip::compression::decompress::{decompress_file, test_file};
use huffzip::tools::cli::{hzopts_init, HzOpts, Mode};
use huffzip::{pack, unpack, HuffError};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The CLI narrows this down.
    // Logs go to stderr so they never mix with data on stdout.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("huffzip: unable to start logging: {}", e);
    }

    let options = hzopts_init();

    if options.files.is_empty() {
        return filter_stdin(&options);
    }

    //----- Figure how what we need to do and go do it, one file at a time
    let mut first_error = None;
    for file in &options.files {
        let result = match options.op_mode {
            Mode::Zip => compress_file(file, &options),
            Mode::Unzip => decompress_file(file, &options),
            Mode::Test => test_file(file),
        };
        if let Err(e) = result {
            error!("{}: {}", file, e);
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    info!("Done.");
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// No files: read everything from stdin and write the result to stdout.
fn filter_stdin(options: &HzOpts) -> Result<(), HuffError> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    let output = match options.op_mode {
        Mode::Zip => pack(&input)?,
        Mode::Unzip => unpack(&input)?,
        Mode::Test => {
            let data = unpack(&input)?;
            info!("stdin: ok ({} bytes)", data.len());
            return Ok(());
        }
    };

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(&output)?;
    lock.flush()?;
    Ok(())
}
