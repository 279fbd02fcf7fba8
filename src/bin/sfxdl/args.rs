//! Command-line argument definitions for the `sfxdl` binary.
use clap::{ArgAction, Parser};
use sfxdl::download::DEFAULT_CHUNK_SIZE;
use sfxdl::{ManifestSource, WorkerPoolConfig};
use std::path::PathBuf;

/// Download every sound effect listed by a sound list server.
///
/// The sound list is fetched once, then the files are downloaded several at
/// a time. A file that fails is reported and skipped; the exit status is
/// non-zero only when the sound list itself cannot be retrieved.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// The output directory.
    #[arg(short, long, env = "SFXDL_OUTPUT", default_value = "./sfx")]
    pub output: PathBuf,

    /// The JSON sound list path (excluding the domain).
    #[arg(short, long, env = "SFXDL_SOUNDLIST", default_value = ManifestSource::DEFAULT_PATH)]
    pub soundlist: String,

    /// The server hosting the sound list and the files.
    #[arg(short, long, env = "SFXDL_DOMAIN", default_value = ManifestSource::DEFAULT_DOMAIN)]
    pub domain: String,

    /// Suffix appended to entries that only carry an identifier.
    #[arg(long, env = "SFXDL_SUFFIX", default_value = ManifestSource::DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Number of files downloaded at the same time.
    ///
    /// Defaults to the available parallelism divided by
    /// (1 - blocking coefficient).
    #[arg(short = 't', long, env = "SFXDL_THREADS", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Expected fraction of time a worker waits on I/O, used to size the
    /// pool when --threads is not given. Clamped to [0, 0.95].
    #[arg(long, env = "SFXDL_BLOCKING_COEFFICIENT", default_value_t = WorkerPoolConfig::DEFAULT_BLOCKING_COEFFICIENT)]
    pub blocking_coefficient: f64,

    /// Bytes written between two progress updates.
    #[arg(long, env = "SFXDL_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Proxy used for every request, e.g. socks5://127.0.0.1:1080.
    #[arg(long, env = "SFXDL_PROXY")]
    pub proxy: Option<String>,

    /// Hide the progress bars.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more (-v warnings, -vv info, -vvv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The worker pool requested on the command line.
    pub fn pool(&self) -> WorkerPoolConfig {
        match self.threads {
            Some(threads) => WorkerPoolConfig::fixed(threads as usize),
            None => WorkerPoolConfig::from_blocking_coefficient(self.blocking_coefficient),
        }
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sfxdl"]).unwrap();
        assert_eq!(args.output, PathBuf::from("./sfx"));
        assert_eq!(args.soundlist, "/server/soundlist");
        assert_eq!(args.domain, "https://gdcolon.com");
        assert_eq!(args.chunk_size, 1024);
        assert!(args.pool().concurrency() >= 1);
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn test_threads_override_pool() {
        let args = Args::try_parse_from(["sfxdl", "-t", "3", "-o", "out", "-vv"]).unwrap();
        assert_eq!(args.pool().concurrency(), 3);
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(Args::try_parse_from(["sfxdl", "--threads", "0"]).is_err());
    }
}
