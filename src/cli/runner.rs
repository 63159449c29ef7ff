use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};
use owo_colors::OwoColorize;
use tracing::info;

use checkaccess::core::batch::Pipeline;
use checkaccess::{
    ChromeDriver, Host, PdfRenderer, RuleEngineScript, StdHost, TerminalPrompter, Translator,
};

use super::args::CliArgs;
use super::errors::AppError;

const LOCALES_DIR_ENV: &str = "CHECKACCESS_LOCALES_DIR";
const LOCALES_DIR_FLAG: &str = "--locales-dir";

/// The locales directory as the parsed command will see it: the flag on
/// this command line, then the environment, then `./locales`.
fn locales_dir_hint(argv: &[OsString]) -> PathBuf {
    let mut iter = argv.iter().skip(1);
    let mut from_flag = None;
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else { continue };
        if arg == "--" {
            break;
        }
        if arg == LOCALES_DIR_FLAG {
            from_flag = iter.next().map(PathBuf::from);
        } else if let Some(value) = arg
            .strip_prefix(LOCALES_DIR_FLAG)
            .and_then(|rest| rest.strip_prefix('='))
        {
            from_flag = Some(PathBuf::from(value));
        }
    }
    from_flag
        .or_else(|| std::env::var_os(LOCALES_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("locales"))
}

fn languages_help(dir: &Path) -> String {
    let langs = Translator::available_languages(dir);
    if langs.is_empty() {
        format!("Available languages: none found in {}", dir.display())
    } else {
        format!("Available languages: {}", langs.join(", "))
    }
}

/// Parse `argv`. `Err` carries the exit code when the run should stop here
/// (0 after help/version, 1 on any other parse failure).
fn parse_args<I, T, H>(argv: I, host: &mut H) -> Result<CliArgs, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    H: Host,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let command = CliArgs::command().after_help(languages_help(&locales_dir_hint(&argv)));
    let matches = match command.try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(e) => {
            return Err(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(host.output(), "{}", e.render());
                    0
                }
                _ => {
                    let _ = write!(host.error(), "{}", e.render());
                    1
                }
            });
        }
    };
    CliArgs::from_arg_matches(&matches).map_err(|e| {
        let _ = write!(host.error(), "{}", e.render());
        1
    })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();
}

fn execute<H: Host>(args: &CliArgs, host: &mut H) -> Result<u8, AppError> {
    let settings = args.settings();
    let translator = Translator::load(&settings.locales_dir, &settings.lang)?;
    let engine = RuleEngineScript::load(&settings.rule_engine_script)?;
    let driver = ChromeDriver::new(&settings);
    let mut prompter = TerminalPrompter::new();
    let renderer = PdfRenderer::new(&settings.fonts_dir);

    info!(
        "Starting audit, ci: {}, lang: {}",
        settings.ci,
        translator.lang()
    );
    info!("Reports directory: {:?}", settings.reports_dir);

    let mut pipeline = Pipeline {
        settings: &settings,
        translator: &translator,
        driver: &driver,
        engine: &engine,
        prompter: &mut prompter,
        renderer: &renderer,
    };
    Ok(pipeline.run(host, &args.inputs))
}

/// Run the CLI against `host` and return the process exit code.
pub fn run_with_host<I, T, H>(argv: I, host: &mut H) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    H: Host,
{
    let args = match parse_args(argv, host) {
        Ok(args) => args,
        Err(code) => return code,
    };

    if args.log {
        init_logging();
    }

    match execute(&args, host) {
        Ok(code) => code,
        Err(e) => {
            let line = e.to_string();
            let _ = writeln!(
                host.error(),
                "{}",
                if args.no_color {
                    line
                } else {
                    line.red().to_string()
                }
            );
            1
        }
    }
}

pub fn run<I, T>(argv: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with_host(argv, &mut StdHost)
}
