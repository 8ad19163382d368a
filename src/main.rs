use anyhow::Result;
use clap::{Parser, ValueEnum};
use static_site_deploy::app::App;
use static_site_deploy::models::{DeploymentConfig, SiteMode};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Plain multi-page site.
    Basic,
    /// Single-page application with client-side routing fallback.
    Spa,
}

impl From<Mode> for SiteMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Basic => SiteMode::Basic,
            Mode::Spa => SiteMode::Spa,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "static-site-deploy")]
#[command(about = "Provision S3 + CloudFront hosting for a static website")]
struct CliArgs {
    /// S3 bucket name to create for the site assets.
    #[arg(long)]
    bucket: String,

    /// Local directory containing the built website files.
    #[arg(long, value_name = "DIR")]
    source_dir: String,

    /// AWS region to deploy into (e.g. us-east-1).
    #[arg(long)]
    region: String,

    /// Site mode.
    #[arg(long, value_enum, default_value = "basic")]
    mode: Mode,

    /// CloudFront distribution description. Defaults to one derived from
    /// the bucket name.
    #[arg(long)]
    description: Option<String>,

    /// AWS shared-config profile to use instead of the default credentials.
    #[arg(long)]
    profile: Option<String>,
}

impl CliArgs {
    fn into_config(self) -> DeploymentConfig {
        let description = self
            .description
            .unwrap_or_else(|| format!("CloudFront distribution for {}", self.bucket));

        DeploymentConfig {
            mode: self.mode.into(),
            bucket: self.bucket,
            source_dir: self.source_dir,
            description,
            region: self.region,
            profile: self.profile,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_site_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = args.into_config();

    match App::new(config).await {
        Ok(app) => match app.run().await {
            Ok(summary) => {
                info!(
                    "Site is live at https://{} (distribution {})",
                    summary.distribution_domain, summary.distribution_id
                );
                Ok(())
            }
            Err(e) => {
                error!("Deployment failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
