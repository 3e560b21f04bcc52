use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map a count of -v flags onto a level. No flags means warnings.
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => Verbosity::Warnings,
            1 => Verbosity::Info,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct HzOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HzOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for HzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "huffzip",
    version,
    about = "Huffman coding file compressor",
    long_about = "
    Compresses each FILE into FILE.hz using a Huffman code built from the file's own byte
    frequencies. The frequency table travels in the .hz header, so decompression needs
    nothing but the compressed file.

    With no FILE, reads standard input and writes standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Force compression (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Force decompression
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Write output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Suppress log messages. A failure still ends with a one-line error and a non-zero exit
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,
}

impl Args {
    /// Put command line information from CLAP into our internal structure. Later flags win
    /// the same way they do in bzip2: test beats decompress beats compress.
    pub fn into_opts(self) -> HzOpts {
        let mut opts = HzOpts::new();
        opts.files = self.files;
        if self.compress {
            opts.op_mode = Mode::Zip
        };
        if self.decompress {
            opts.op_mode = Mode::Unzip
        };
        if self.test {
            opts.op_mode = Mode::Test
        };
        opts.keep_input_files = self.keep;
        opts.force_overwrite = self.force;
        if self.stdout {
            opts.output = Output::Stdout;
            // Nothing is written next to the input, so it is never removed.
            opts.keep_input_files = true;
        };
        opts.verbose = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };
        opts
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn hzopts_init() -> HzOpts {
    let opts = Args::parse().into_opts();

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    info!("---- huffzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.files.is_empty() {
        warn!("No files given, using stdin and stdout");
    } else {
        info!("Getting input from {} file(s)", opts.files.len());
    }
    info!("Sending output to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- huffzip Initialization End ----");
    opts
}
