use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tpgkit::host::{prepare_settings, resolve, run_action};
use tpgkit::{init_logging, TpgRegistry, VERSION};

fn cli() -> Command {
    Command::new("tpgkit")
        .version(VERSION)
        .long_version(concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))
        .about("Discover, inspect and run tool path generators")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit log lines as JSON on stderr"),
        )
        .subcommand(Command::new("list").about("List registered generators"))
        .subcommand(
            Command::new("describe")
                .about("Show a generator's identity, actions and settings")
                .arg(
                    Arg::new("tpg")
                        .required(true)
                        .help("Generator id or name"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Run a generator action and print the toolpath")
                .arg(
                    Arg::new("tpg")
                        .required(true)
                        .help("Generator id or name"),
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .short('a')
                        .help("Action to run; defaults to the selected action in the settings"),
                )
                .arg(
                    Arg::new("settings")
                        .long("settings")
                        .short('s')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Settings values file (.json or .toml)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn list(registry: &TpgRegistry) {
    for descriptor in registry.descriptors() {
        println!("{}  {:<16} {}", descriptor.id, descriptor.name, descriptor.description);
    }
}

fn describe(registry: &TpgRegistry, matches: &ArgMatches) -> anyhow::Result<()> {
    let key = matches.get_one::<String>("tpg").map(String::as_str).unwrap_or_default();
    let tpg = resolve(registry, key)?;
    let descriptor = tpg.describe();
    let schema = tpg.describe_settings()?;

    if matches.get_flag("json") {
        let out = serde_json::json!({
            "descriptor": descriptor,
            "actions": tpg.list_actions()?,
            "settings": schema,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} ({})", descriptor.name, descriptor.id);
    println!("{}", descriptor.description);
    for group in schema.groups() {
        println!();
        println!("[{}]", group.action);
        for def in &group.definitions {
            println!(
                "  {:<12} {:<12} default={} {}  ({})",
                def.name, def.setting_type, def.default_value, def.units, def.help_text
            );
        }
    }
    Ok(())
}

fn run(registry: &TpgRegistry, matches: &ArgMatches) -> anyhow::Result<()> {
    let key = matches.get_one::<String>("tpg").map(String::as_str).unwrap_or_default();
    let tpg = resolve(registry, key)?;
    let settings_path = matches.get_one::<PathBuf>("settings");
    let settings = prepare_settings(tpg.as_ref(), settings_path.map(PathBuf::as_path))?;
    let action = matches.get_one::<String>("action").map(String::as_str);

    let toolpath = run_action(tpg.as_ref(), &settings, action)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&toolpath)?);
    } else {
        for line in toolpath.to_text_lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"))?;

    let registry = TpgRegistry::with_builtin()?;

    match matches.subcommand() {
        Some(("list", _)) => list(&registry),
        Some(("describe", sub)) => describe(&registry, sub)?,
        Some(("run", sub)) => run(&registry, sub)?,
        _ => cli().print_help()?,
    }

    Ok(())
}
