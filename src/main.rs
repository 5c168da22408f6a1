use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, Level};

use formset::document::{self, Form};
use formset::engine::{self, GroupManager};
use formset::records::FormData;
use formset::report;
use formset::settings::Settings;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("formset")
        .version(VERSION)
        .propagate_version(true)
        .about("Add fields and choices to a rendered formset, keeping its names in order.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log each step taken to standard error."),
        )
        .arg(
            Arg::new("field-prefix")
                .long("field-prefix")
                .global(true)
                .help("Prefix of the top level group of fields."),
        )
        .arg(
            Arg::new("choices-base")
                .long("choices-base")
                .global(true)
                .help("Prefix of each field's choices, before the field's index."),
        )
        .arg(
            Arg::new("type-field")
                .long("type-field")
                .global(true)
                .help("Name of the control selecting a field's type."),
        )
        .arg(
            Arg::new("select-kind")
                .long("select-kind")
                .global(true)
                .help("The field type which keeps its choices."),
        )
        .subcommand(
            Command::new("check")
                .about("Load a page snapshot and summarize its groups")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The JSON file holding the page snapshot."),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply commands to a page snapshot and print the result")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .action(ArgAction::SetTrue)
                        .help("Print the form data that would be submitted instead of the page."),
                )
                .arg(
                    Arg::new("records")
                        .long("records")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("data")
                        .help("Print the submitted form data decoded back into records."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The JSON file holding the page snapshot."),
                )
                .arg(
                    Arg::new("commands")
                        .num_args(0..)
                        .help("Commands to apply in order: add-field, add-choice:<field>, type:<field>=<kind>."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings = settings_from(&matches);
    debug!(?settings);

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = filename_from(submatches);
            let form = load_form(filename);

            if form
                .fields
                .prefix
                .to_string()
                != settings.field_prefix
            {
                eprintln!(
                    "{}: fields are named '{}', expected '{}'",
                    "warning".bright_yellow(),
                    form.fields
                        .prefix,
                    settings.field_prefix
                );
            }

            match report::groups(&form) {
                Ok(text) => print!("{}", text),
                Err(error) => fail(&error.to_string()),
            }
        }
        Some(("apply", submatches)) => {
            let filename = filename_from(submatches);
            let form = load_form(filename);

            let mut commands = Vec::new();
            if let Some(values) = submatches.get_many::<String>("commands") {
                for text in values {
                    match text.parse::<engine::Command>() {
                        Ok(command) => commands.push(command),
                        Err(error) => {
                            eprintln!("{}", error.full_details());
                            std::process::exit(1);
                        }
                    }
                }
            }

            let mut manager = GroupManager::new(form, settings.clone());
            let mut outcomes = Vec::new();
            for command in &commands {
                match manager.apply(command) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(error) => {
                        eprintln!("{}", error.full_details());
                        std::process::exit(1);
                    }
                }
            }

            match report::outcomes(&outcomes) {
                Ok(text) => eprint!("{}", text),
                Err(error) => fail(&error.to_string()),
            }

            let form = manager.into_form();
            if submatches.get_flag("data") {
                for (name, value) in form.form_data() {
                    println!("{}={}", name, value);
                }
            } else if submatches.get_flag("records") {
                let data = FormData::new(form.form_data());
                match data.field_records(&settings) {
                    Ok(records) => match serde_json::to_string_pretty(&records) {
                        Ok(json) => println!("{}", json),
                        Err(error) => fail(&error.to_string()),
                    },
                    Err(error) => {
                        eprintln!("{}", error.full_details());
                        std::process::exit(1);
                    }
                }
            } else {
                match form
                    .to_page()
                    .to_json()
                {
                    Ok(json) => println!("{}", json),
                    Err(error) => fail(&error.to_string()),
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: formset [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn settings_from(matches: &ArgMatches) -> Settings {
    let mut settings = Settings::default();
    if let Some(value) = matches.get_one::<String>("field-prefix") {
        settings.field_prefix = value.clone();
    }
    if let Some(value) = matches.get_one::<String>("choices-base") {
        settings.choices_base = value.clone();
    }
    if let Some(value) = matches.get_one::<String>("type-field") {
        settings.type_field = value.clone();
    }
    if let Some(value) = matches.get_one::<String>("select-kind") {
        settings.select_kind = value.clone();
    }
    settings
}

fn filename_from(submatches: &ArgMatches) -> &Path {
    match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => fail("a filename is required"),
    }
}

fn load_form(filename: &Path) -> Form {
    let content = match document::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", error.full_details());
            std::process::exit(1);
        }
    };

    let page = match document::read(filename, &content) {
        Ok(page) => page,
        Err(error) => {
            eprintln!("{}", error.full_details());
            std::process::exit(1);
        }
    };

    match Form::from_page(&page) {
        Ok(form) => form,
        Err(error) => {
            eprintln!("{}", error.full_details());
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}: {}", "error".bright_red(), message);
    std::process::exit(1);
}
