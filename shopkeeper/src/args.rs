use clap::Parser;
use clap::builder::RangedU64ValueParser;

/// Usage line printed when the positional parameters are missing or malformed.
pub const USAGE: &str =
    "Invalid parameters. Format: shopkeeper <buffer_size> <num_consumers> <max_items>";

/// Positional parameters of a run.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "shopkeeper", version, about = "Bounded-buffer store front simulation")]
pub struct AppArgs {
    /// Number of slots on the shelf
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub buffer_size: usize,

    /// Number of consumer threads
    pub num_consumers: usize,

    /// Number of items the producer makes
    pub max_items: u64,
}

/// What the binary should do with its command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(AppArgs),
    /// Help or version output requested explicitly.
    Display(String),
    Usage,
}

/// Parses the command line. Never fails: anything unusable becomes [`Invocation::Usage`].
///
/// Only the program name and the first three parameters are looked at; anything after them is
/// ignored.
pub fn parse<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match AppArgs::try_parse_from(args.into_iter().take(4)) {
        Ok(args) => Invocation::Run(args),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                Invocation::Display(err.to_string())
            }
            _ => Invocation::Usage,
        },
    }
}
