//! `wpub publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use wpub_config::{CliSettings, Config};
use wpub_wordpress::{
    ImageTensor, PublishRequest, Publisher, SamplingParams, Sampler, Scheduler, WordPressClient,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Image to publish (PNG, JPEG or WebP).
    #[arg(long)]
    image: PathBuf,

    /// Post title.
    #[arg(long, default_value = "Sample Post Title")]
    title: String,

    /// Post text.
    #[arg(long, default_value = "Post content text for WordPress")]
    content: String,

    /// Tags, separated by commas or newlines.
    #[arg(long, default_value = "comfyui,ai,sample")]
    tags: String,

    /// Category name, or a numeric category ID.
    #[arg(long, default_value = "")]
    category: String,

    /// Generation metadata shown under the text.
    #[arg(long, default_value = "")]
    meta_data: String,

    /// Positive prompt.
    #[arg(long, default_value = "")]
    positive_prompt: String,

    /// Negative prompt.
    #[arg(long, default_value = "")]
    negative_prompt: String,

    /// Sampler seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Sampling steps.
    #[arg(long, default_value_t = 0)]
    steps: u64,

    /// CFG scale (0-100).
    #[arg(long, default_value_t = 8.0, value_parser = parse_cfg)]
    cfg: f64,

    /// Sampler name.
    #[arg(long, default_value = "euler")]
    sampler: Sampler,

    /// Scheduler name.
    #[arg(long, default_value = "normal")]
    scheduler: Scheduler,

    /// Denoise strength (0-1).
    #[arg(long, default_value_t = 1.0, value_parser = parse_denoise)]
    denoise: f64,

    /// Do not append the image to the post body.
    #[arg(long)]
    no_image_in_post: bool,

    /// Path to wordpress_config.json (default: next to the executable).
    #[arg(short, long, env = "WPUB_CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the bitmap before upload (overrides config).
    #[arg(long)]
    image_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// Returns whether the post was published. Configuration and image
    /// shape problems are errors; remote failures are a `false` result.
    pub(crate) fn execute(self) -> Result<bool, CliError> {
        let output = Output::new();
        output.start();

        let cli_settings = CliSettings {
            image_file: self.image_file.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!("Loaded config from {}", path.display());
        }

        let source = image::open(&self.image)?.to_rgb8();
        output.note(&format!(
            "Loaded {} ({}x{})",
            self.image.display(),
            source.width(),
            source.height()
        ));
        let request = self.into_request(ImageTensor::from_rgb_image(&source));

        let client = WordPressClient::from_config(&config.site_url, &config.credentials);
        let publisher = Publisher::new(&client, &config.image_file);
        let outcome = publisher.publish(&request)?;

        output.outcome(&outcome);

        Ok(outcome.succeeded())
    }

    fn into_request(self, image: ImageTensor) -> PublishRequest {
        PublishRequest {
            title: self.title,
            content: self.content,
            tags: self.tags,
            category: self.category,
            metadata: self.meta_data,
            positive_prompt: self.positive_prompt,
            negative_prompt: self.negative_prompt,
            params: SamplingParams {
                seed: Some(self.seed),
                steps: Some(self.steps),
                cfg: Some(self.cfg),
                sampler: Some(self.sampler),
                scheduler: Some(self.scheduler),
                denoise: Some(self.denoise),
            },
            embed_image: !self.no_image_in_post,
            image,
        }
    }
}

fn parse_cfg(s: &str) -> Result<f64, String> {
    parse_in_range(s, 0.0, 100.0)
}

fn parse_denoise(s: &str) -> Result<f64, String> {
    parse_in_range(s, 0.0, 1.0)
}

fn parse_in_range(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(min..=max).contains(&value) {
        return Err(format!("{value} is outside {min}..={max}"));
    }
    Ok(value)
}
