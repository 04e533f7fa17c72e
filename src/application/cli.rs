use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SourceRequest;
use crate::infrastructure::stores::FilesystemStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn load_source_request() -> Result<SourceRequest> {
    let request_file = Config::get(ConfigKey::RequestFile);
    if request_file.is_empty() {
        bail!("No request file provided. Pass one with --request-file.");
    }

    return SourceRequest::load(path::Path::new(&request_file)).await;
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Kushogen")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Kushogen with environment variable RUST_LOG=kushogen")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_store() -> Command {
    return Command::new("store")
        .about("Workspace store helpers.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("dir").about("Print the scoped workspace directory requests are stored in."),
        );
}

fn arg_request_file() -> Arg {
    return Arg::new(ConfigKey::RequestFile.to_string())
        .short('f')
        .long(ConfigKey::RequestFile.to_string())
        .env("KUSHOGEN_REQUEST_FILE")
        .num_args(1)
        .help("Path to a YAML file holding the stored request to generate tests for.");
}

fn subcommand_generate() -> Command {
    return Command::new("generate")
        .about("Generate test cases for a stored request.")
        .arg(arg_request_file());
}

pub fn build() -> Command {
    let hotkeys_text = r#"HOTKEYS:
  q        Close once generation is no longer running
  r        Regenerate test cases for the same request
  d        Dismiss errors and alerts
  Esc      Cancel an in flight generation
  Up/Down  Scroll through generated test cases
  Ctrl+C   Abort and exit"#;

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("kushogen")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_generate())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_store())
        .arg(arg_request_file())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("KUSHOGEN_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::DataDir.to_string())
                .long(ConfigKey::DataDir.to_string())
                .env("KUSHOGEN_DATA_DIR")
                .num_args(1)
                .help(format!(
                    "Directory where generated test folders and requests are stored. [default: {}]",
                    Config::default(ConfigKey::DataDir)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::KushoURL.to_string())
                .long(ConfigKey::KushoURL.to_string())
                .env("KUSHOGEN_KUSHO_URL")
                .num_args(1)
                .help(format!(
                    "Generation backend URL. Can be swapped to a compatible proxy. [default: {}]",
                    Config::default(ConfigKey::KushoURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::KushoHealthCheckTimeout.to_string())
                .long(ConfigKey::KushoHealthCheckTimeout.to_string())
                .env("KUSHOGEN_KUSHO_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a healthcheck for the generation backend. [default: {}]", Config::default(ConfigKey::KushoHealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::MachineID.to_string())
                .long(ConfigKey::MachineID.to_string())
                .env("KUSHOGEN_MACHINE_ID")
                .num_args(1)
                .help("Identifier sent with generation requests to attribute the machine. Defaults to a random identifier.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OrganizationID.to_string())
                .long(ConfigKey::OrganizationID.to_string())
                .env("KUSHOGEN_ORGANIZATION_ID")
                .num_args(1)
                .help(format!(
                    "Organization the workspace belongs to. [default: {}]",
                    Config::default(ConfigKey::OrganizationID)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ProjectID.to_string())
                .long(ConfigKey::ProjectID.to_string())
                .env("KUSHOGEN_PROJECT_ID")
                .num_args(1)
                .help(format!(
                    "Project the workspace belongs to. [default: {}]",
                    Config::default(ConfigKey::ProjectID)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::WorkspaceID.to_string())
                .long(ConfigKey::WorkspaceID.to_string())
                .env("KUSHOGEN_WORKSPACE_ID")
                .num_args(1)
                .help(format!(
                    "Workspace generated folders are created in. [default: {}]",
                    Config::default(ConfigKey::WorkspaceID)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<Option<SourceRequest>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("kushogen/debug.log");
                    println!("{}", log_path.to_str().unwrap());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("generate", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        Some(("store", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("dir", _)) => {
                Config::load(build(), vec![&matches]).await?;
                let dir = FilesystemStore::default()
                    .workspace_dir
                    .to_string_lossy()
                    .to_string();
                println!("{dir}");
                return Ok(None);
            }
            _ => {
                subcommand_store().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    if Config::get(ConfigKey::MachineID).is_empty() {
        Config::set(ConfigKey::MachineID, &Uuid::new_v4().to_string());
    }

    let request = load_source_request().await?;
    return Ok(Some(request));
}
