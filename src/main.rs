use starterkit::cli::{CliArgs, Commands, GenerateArgs, ListArgs, ListFormat};
use starterkit::descriptor::{parse_pom, BuildDescriptor};
use starterkit::fs::{FileSystem, RealFileSystem};
use starterkit::model::{MicroProfileVersion, MicroprofileSpec};
use starterkit::util::logging::{init_logging, parse_level, LoggingConfig};
use starterkit::{AddonRegistry, GenerationRequest, Generator, StarterConfig, NAME, VERSION};

use anyhow::Context;
use clap::Parser;
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet),
        Commands::List(list_args) => handle_list(list_args),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("STARTERKIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let use_json = env::var("STARTERKIT_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..LoggingConfig::default()
    });
}

fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    let defaults = StarterConfig::default();
    let config = StarterConfig {
        output_dir: args.output.clone().unwrap_or(defaults.output_dir),
        template_dir: args.templates.clone().or(defaults.template_dir),
        force: args.force || defaults.force,
        ..defaults
    };
    debug!("{}", config);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }

    let request = match GenerationRequest::load(&args.request) {
        Ok(request) => request,
        Err(e) => {
            error!("Invalid request: {}", e);
            return 1;
        }
    };

    if !config.force && is_non_empty_dir(&config.output_dir) {
        error!(
            "Output directory {} is not empty",
            config.output_dir.display()
        );
        eprintln!("\nUse --force or STARTERKIT_FORCE=true to generate into it anyway.");
        return 1;
    }

    let baseline = match &args.pom {
        Some(path) => match load_baseline(path) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                error!("{:#}", e);
                return 1;
            }
        },
        None => None,
    };

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let result = AddonRegistry::with_defaults(fs.clone(), config.template_dir.as_deref())
        .and_then(|registry| {
            let generator = Generator::new(registry, fs);
            let model = request.to_model(&config.output_dir)?;
            let outcome = generator.run(model, baseline.as_ref())?;
            generator.write_descriptors(&outcome)
        });

    match result {
        Ok(written) => {
            info!(projects = written.len(), "Generation complete");
            if !quiet {
                println!(
                    "Generated {} project(s) for {} in {}",
                    written.len(),
                    request.server,
                    config.output_dir.display()
                );
                for path in written {
                    println!("  {}", path.display());
                }
            }
            0
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("\n{}", e.help_message());
            1
        }
    }
}

fn handle_list(args: &ListArgs) -> i32 {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
    let registry = match AddonRegistry::with_defaults(fs, None) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load addons: {}", e);
            return 1;
        }
    };

    match args.format {
        ListFormat::Human => {
            println!("Servers:");
            for server in registry.servers() {
                println!("  {:<16} {}", server.code(), server);
            }
            println!("\nSpecifications:");
            for spec in MicroprofileSpec::all_variants() {
                println!("  {:<16} {}", spec.code(), spec);
            }
            println!("\nMicroProfile versions:");
            for version in MicroProfileVersion::all_variants() {
                println!("  {:<16} {}", version.code(), version);
            }
        }
        ListFormat::Json => {
            let listing = serde_json::json!({
                "servers": registry.servers(),
                "specs": MicroprofileSpec::all_variants(),
                "versions": MicroProfileVersion::all_variants(),
            });
            match serde_json::to_string_pretty(&listing) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize listing: {}", e);
                    return 1;
                }
            }
        }
    }

    0
}

fn load_baseline(path: &Path) -> anyhow::Result<BuildDescriptor> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read baseline {}", path.display()))?;
    parse_pom(&content).with_context(|| format!("Invalid baseline {}", path.display()))
}

fn is_non_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
