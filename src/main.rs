use clap::Parser;
use std::path::PathBuf;

mod classify;
mod command;
mod config;
mod desktop_entry;
mod error;
mod form;
mod icon;
mod logs;
mod model;
mod platform;
mod ui;
mod writer;

use config::OpenerConfig;
use form::{FormController, FormHandler};
use model::LaunchSpec;
use writer::DescriptorWriter;

#[derive(Parser)]
#[command(
    name = "autodesktop",
    about = "Create a desktop launcher for a file, script or directory"
)]
struct Cli {
    /// File to create a desktop entry for
    #[arg(
        value_name = "FILE",
        required_unless_present_any = ["show_logs", "clear_logs"]
    )]
    file: Option<PathBuf>,

    /// Launcher name (defaults to the file name)
    #[arg(long)]
    name: Option<String>,

    /// Command line (defaults to a suggestion based on the file's type)
    #[arg(long)]
    exec: Option<String>,

    /// Icon image file
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Directory the launcher is written to
    #[arg(long, value_name = "DIR")]
    applications_dir: Option<PathBuf>,

    /// Program used to open directories
    #[arg(long, value_name = "PROGRAM")]
    directory_opener: Option<String>,

    /// Program used to open text files
    #[arg(long, value_name = "PROGRAM")]
    text_editor: Option<String>,

    /// Program used to open any other file
    #[arg(long, value_name = "PROGRAM")]
    fallback_viewer: Option<String>,

    /// Write the launcher without showing the form
    #[arg(long)]
    no_gui: bool,

    /// Print the launcher to stdout instead of writing it
    #[arg(long, conflicts_with = "no_gui")]
    print: bool,

    /// Show recent log entries and exit
    #[arg(long, value_name = "LINES", num_args = 0..=1, default_missing_value = "50")]
    show_logs: Option<usize>,

    /// Clear the log file and exit
    #[arg(long)]
    clear_logs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logs::init_logger()?;

    if cli.clear_logs {
        return logs::clear_logs();
    }
    if let Some(lines) = cli.show_logs {
        return logs::show_logs(lines);
    }

    let file = cli.file.ok_or("Please specify a file name to create a desktop entry for.")?;

    let openers = OpenerConfig::from_env().with_overrides(
        cli.directory_opener,
        cli.text_editor,
        cli.fallback_viewer,
    );
    let applications_dir = cli
        .applications_dir
        .or_else(config::default_applications_dir)
        .ok_or("could not determine home directory")?;
    let writer = DescriptorWriter::new(applications_dir);

    let mut spec = LaunchSpec::for_target(&file, &openers);
    if let Some(name) = cli.name {
        spec.name = name;
    }
    if let Some(exec) = cli.exec {
        spec.exec = exec;
    }

    if cli.print || cli.no_gui {
        if let Some(icon) = cli.icon {
            if let Err(e) = icon::load_icon(&icon) {
                fail(&e);
            }
            spec.icon = Some(icon);
        }

        if cli.print {
            match writer.render(&spec) {
                Ok(content) => print!("{}", content),
                Err(e) => fail(&e),
            }
        } else {
            match writer.write(&spec) {
                Ok(path) => println!("{}", path.display()),
                Err(e) => fail(&e),
            }
        }
        return Ok(());
    }

    let mut controller = FormController::new(spec, writer);
    if let Some(icon) = cli.icon {
        controller.on_icon_chosen(icon);
    }

    logs::log_info(&format!("Opening launcher form for {}", file.display()));
    ui::run_form(controller)
}

fn fail(err: &error::Error) -> ! {
    logs::log_error(&err.to_string());
    eprintln!("{}", err);
    std::process::exit(1);
}
