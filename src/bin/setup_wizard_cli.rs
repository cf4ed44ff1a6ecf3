use std::{env, path::PathBuf, process};

use setup_wizard::{
    cli::{
        output::{self, OutputPreferences},
        ScriptedInteraction, TerminalInteraction, WizardEngine, WizardInteraction, WizardRun,
    },
    config::ConfigManager,
    init_with_filter,
    services::FilePreviewRenderer,
    wizard::WizardController,
};

const EXIT_CANCELLED: i32 = 2;

struct Options {
    answers: Option<PathBuf>,
    preferences: OutputPreferences,
}

fn main() {
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };
    output::set_preferences(options.preferences);

    match run(options) {
        Ok(WizardRun::Finished { delivered: true, .. }) => {}
        Ok(WizardRun::Finished { delivered: false, .. }) => process::exit(1),
        Ok(WizardRun::Cancelled) => process::exit(EXIT_CANCELLED),
        Err(err) => {
            output::error(format!("Error: {err}"));
            process::exit(1);
        }
    }
}

fn run(options: Options) -> Result<WizardRun, Box<dyn std::error::Error>> {
    let config = ConfigManager::new()?.load()?;
    init_with_filter(config.log_filter.as_deref());

    let engine = WizardEngine::new(config.address_lookup()?, Box::new(FilePreviewRenderer))
        .with_address_country(config.address_country());
    let mut controller = WizardController::new(config.submission.submitter());

    let run = match options.answers {
        Some(path) => drive(&engine, &mut controller, ScriptedInteraction::from_path(&path)?)?,
        None => drive(&engine, &mut controller, TerminalInteraction::new())?,
    };
    Ok(run)
}

fn drive<I: WizardInteraction>(
    engine: &WizardEngine,
    controller: &mut WizardController,
    mut interaction: I,
) -> setup_wizard::errors::Result<WizardRun> {
    engine.run(controller, &mut interaction)
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        answers: None,
        preferences: OutputPreferences::default(),
    };
    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--answers" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--answers requires a file path".to_string())?;
                options.answers = Some(PathBuf::from(path));
            }
            "--plain" => options.preferences.plain_mode = true,
            "--quiet" => options.preferences.quiet_mode = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn print_usage() {
    eprintln!(
        "Usage:\n  setup_wizard_cli [--answers FILE] [--plain] [--quiet]\n\n\
         Without --answers the wizard prompts interactively.\n\
         Address suggestions come from the JSON file named by\n\
         \"address_catalogue\" in config.json; without it they are off.\n\
         Exit codes: 0 submitted, 1 error or submission failure, 2 cancelled."
    );
}
