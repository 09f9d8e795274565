// SPDX-License-Identifier: MPL-2.0
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vidgallery::app::{self, paths, Flags};

const HELP: &str = "\
VidGallery - browse and play your videos

USAGE:
  vidgallery [OPTIONS]

OPTIONS:
  --lang <ID>          Interface language (e.g. en-US, fr)
  --data-dir <DIR>     Directory for the state database
  --config-dir <DIR>   Directory for settings.toml
  --library <DIR>      Library root to scan (repeatable)
  --verbose            Debug logging
  -h, --help           Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let verbose = args.contains("--verbose");
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let flags = Flags {
        lang: optional_arg(&mut args, "--lang"),
        data_dir: optional_arg(&mut args, "--data-dir"),
        config_dir: optional_arg(&mut args, "--config-dir"),
        library_roots: args.values_from_str("--library").unwrap_or_else(|err| {
            tracing::warn!("ignoring --library: {}", err);
            Vec::new()
        }),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!("ignoring unknown arguments: {:?}", remaining);
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    tracing::info!("starting vidgallery {}", env!("CARGO_PKG_VERSION"));

    app::run(flags)
}

fn optional_arg(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        tracing::warn!("ignoring {}: {}", key, err);
        None
    })
}
