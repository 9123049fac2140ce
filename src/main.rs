use clap::{Parser, Subcommand};
use promoshot::client::{
    ApiClient, ChatMode, GenerateOptions, SessionContext, TextOptions, data_url_extension,
    sanitize_filename,
};
use promoshot::imaging::{FilterParams, PreviewConfig, Quality, RustBackend};
use promoshot::output::RemoteOutcome;
use promoshot::{config, output, process, scan};
use std::path::PathBuf;

/// Filter flags shared by preview and generate. Each ranges -100..=100;
/// 0 leaves the channel untouched.
#[derive(clap::Args, Clone)]
struct FilterArgs {
    /// Brightness adjustment (-100 to 100)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    brightness: i32,

    /// Contrast adjustment (-100 to 100)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    contrast: i32,

    /// Saturation adjustment (-100 to 100)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    saturation: i32,
}

impl FilterArgs {
    fn params(&self) -> FilterParams {
        FilterParams::new(self.brightness, self.contrast, self.saturation)
    }
}

#[derive(Parser)]
#[command(name = "promoshot")]
#[command(about = "Batch style previews and a terminal client for a marketing image generator")]
#[command(long_about = "\
Batch style previews and a terminal client for a marketing image generator

Point it at product photos, dial in brightness/contrast/saturation, and
either test the look locally or send the images to the generation service.

Typical flow:

  promoshot preview shots/ --brightness 20 --saturation 40
      Offline: writes shots/foo.jpg → previews/foo-preview.jpg for each
      image, with the filters applied. No network, no account needed.

  promoshot generate shots/ --style banner --description \"summer sale\"
      Uploads each image to the generation service and saves the returned
      marketing images.

  promoshot generate-text \"red sneakers on a beach at dawn\"
      Text-to-image, no source photo.

  promoshot history / promoshot chat-log
      Inspect past generations and the prompt transcript.

Authenticated endpoints read the bearer token from PROMOSHOT_TOKEN or
promoshot.toml. Run 'promoshot gen-config' for a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (default: promoshot.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for artifacts
    #[arg(long, default_value = "previews", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply filters locally and write preview JPEGs (no network)
    Preview {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Descend into subdirectories
        #[arg(long)]
        recursive: bool,

        /// JPEG quality for preview artifacts (1-100)
        #[arg(long)]
        quality: Option<u32>,
    },
    /// Upload images to the generation service and save the results
    Generate {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Generation model
        #[arg(long)]
        model: Option<String>,

        /// Marketing style
        #[arg(long)]
        style: Option<String>,

        /// Extra product description sent with every image
        #[arg(long)]
        description: Option<String>,

        /// Descend into subdirectories
        #[arg(long)]
        recursive: bool,
    },
    /// Generate a marketing image from a text prompt
    GenerateText {
        /// The prompt
        prompt: String,

        /// Prompt flavor: standard | creative | professional
        #[arg(long)]
        prompt_type: Option<String>,

        /// Output size, width*height
        #[arg(long)]
        image_size: Option<String>,
    },
    /// List past generations, newest first
    History {
        /// Maximum number of records
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Show the recent prompt/reply transcript
    ChatLog {
        /// Show the image-upload transcript instead of the text one
        #[arg(long)]
        image: bool,

        /// Maximum number of messages
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Print a stock promoshot.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Preview {
            inputs,
            filters,
            recursive,
            quality,
        } => {
            let sources = scan::collect_inputs(&inputs, recursive)?;
            init_thread_pool(&config.processing);

            let preview_config = PreviewConfig {
                filters: filters.params(),
                quality: Quality::new(quality.unwrap_or(config.preview.quality)),
                suffix: config.preview.suffix.clone(),
            };
            let report = process::preview_batch(
                &RustBackend::new(),
                &sources,
                &cli.output,
                &preview_config,
            )?;
            output::print_preview_report(&report);
        }
        Command::Generate {
            inputs,
            filters,
            model,
            style,
            description,
            recursive,
        } => {
            let sources = scan::collect_inputs(&inputs, recursive)?;
            let client = ApiClient::new(&config.api.base_url)?;
            let mut ctx = SessionContext::with_token(resolve_token(&config));
            let opts = GenerateOptions {
                model: model.unwrap_or_else(|| config.generate.model.clone()),
                style: style.unwrap_or_else(|| config.generate.style.clone()),
                filters: filters.params(),
                description,
            };

            std::fs::create_dir_all(&cli.output)?;
            let mut outcomes = Vec::with_capacity(sources.len());
            for source in &sources {
                let label = source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| source.display().to_string());
                let detail = client
                    .generate(&mut ctx, source, &opts)
                    .map_err(|e| e.to_string())
                    .and_then(|resp| {
                        if resp.fallback {
                            log::warn!("{}: server fell back to local processing", label);
                        }
                        let filename = resp
                            .filename
                            .as_deref()
                            .and_then(sanitize_filename)
                            .unwrap_or_else(|| {
                                let stem = source
                                    .file_stem()
                                    .map(|s| s.to_string_lossy().to_string())
                                    .unwrap_or_else(|| "image".to_string());
                                format!(
                                    "{}-generated.{}",
                                    stem,
                                    data_url_extension(&resp.image_url)
                                )
                            });
                        client
                            .save_artifact(&resp.image_url, &cli.output.join(&filename))
                            .map(|path| path.display().to_string())
                            .map_err(|e| e.to_string())
                    });
                outcomes.push(RemoteOutcome { label, detail });
            }
            output::print_generate_report(&outcomes);
        }
        Command::GenerateText {
            prompt,
            prompt_type,
            image_size,
        } => {
            let client = ApiClient::new(&config.api.base_url)?;
            let mut ctx = SessionContext::with_token(resolve_token(&config));
            let opts = TextOptions {
                prompt_type: prompt_type.unwrap_or_else(|| config.generate.prompt_type.clone()),
                image_size: image_size.unwrap_or_else(|| config.generate.image_size.clone()),
            };

            std::fs::create_dir_all(&cli.output)?;
            let detail = client
                .generate_from_text(&mut ctx, &prompt, &opts)
                .map_err(|e| e.to_string())
                .and_then(|resp| {
                    let filename = resp
                        .filename
                        .as_deref()
                        .and_then(sanitize_filename)
                        .unwrap_or_else(|| {
                            format!("generated.{}", data_url_extension(&resp.image_url))
                        });
                    client
                        .save_artifact(&resp.image_url, &cli.output.join(&filename))
                        .map(|path| path.display().to_string())
                        .map_err(|e| e.to_string())
                });
            output::print_generate_report(&[RemoteOutcome {
                label: prompt,
                detail,
            }]);
        }
        Command::History { limit } => {
            let client = ApiClient::new(&config.api.base_url)?;
            let ctx = SessionContext::with_token(resolve_token(&config));
            let records = client.generation_records(&ctx, limit)?;
            output::print_records(&records);
        }
        Command::ChatLog { image, limit } => {
            let client = ApiClient::new(&config.api.base_url)?;
            let ctx = SessionContext::with_token(resolve_token(&config));
            let mode = if image { ChatMode::Image } else { ChatMode::Text };
            let messages = client.recent_chat_messages(&ctx, mode, limit)?;
            output::print_chat_log(&messages);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Bearer token: PROMOSHOT_TOKEN in the environment wins over the config
/// file. Both absent means unauthenticated calls.
fn resolve_token(config: &config::AppConfig) -> Option<String> {
    std::env::var("PROMOSHOT_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| config.api.token.clone())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
