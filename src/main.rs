// SPDX-License-Identifier: MPL-2.0
use flipbook::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
flipbook - illustrated story viewer

USAGE:
  flipbook [OPTIONS] [STORY_FILE]

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --page <N>            Open the story at page N (1-based)
  --config-dir <DIR>    Directory holding settings.toml
  -h, --help            Print this help

ENVIRONMENT:
  FLIPBOOK_CONFIG_DIR   Config directory when --config-dir is absent
  RUST_LOG              Log filter (default: flipbook=info)
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flipbook=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("flipbook: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let lang = args.opt_value_from_str("--lang")?;
    let page = args.opt_value_from_str::<_, usize>("--page")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let story_path = args.clone()
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        lang,
        page,
        config_dir,
        story_path,
    })
}
