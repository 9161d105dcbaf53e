//! Command-line interface for checking widget packages.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{validate_platform_version, PlatformConfig, Profile, DEFAULT_PLATFORM_VERSION};
use crate::error::{Result, WidgetConfigError};
use crate::handlers::{
    ApplicationIconsInfo, ContentInfo, ServiceList, TizenApplicationInfo, WidgetInfo,
};
use crate::widget_config_parser::WidgetConfigParser;

/// Tizen widget manifest checker - Parse and validate config.xml files.
#[derive(Parser)]
#[command(name = "wgt-manifest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a widget config.xml and check it against its package.
    Check {
        /// Path to config.xml inside an unpacked widget
        config: PathBuf,

        /// Platform version to check against (e.g., 3.0)
        #[arg(long, default_value = DEFAULT_PLATFORM_VERSION)]
        platform_version: String,

        /// Device profile
        #[arg(long, value_enum, default_value_t = Profile::Mobile)]
        profile: Profile,
    },
}

/// Run the CLI.
///
/// # Errors
/// Returns the first parse or package check failure.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            config,
            platform_version,
            profile,
        } => check_command(&config, &platform_version, profile),
    }
}

/// Execute the check command.
fn check_command(config: &Path, platform_version: &str, profile: Profile) -> Result<()> {
    let platform = PlatformConfig::new(profile, validate_platform_version(platform_version)?);

    println!(
        "{} {} for {} {}",
        style("Checking").bold(),
        style(config.display()).cyan(),
        style(profile).green(),
        style(&platform.current_version).green()
    );
    println!();

    let mut parser = WidgetConfigParser::with_platform(&platform)?;
    parser.parse_manifest(config)?;

    if let Some(widget) = parser.get_manifest_data::<WidgetInfo>(WidgetInfo::KEY) {
        if !widget.id.is_empty() {
            println!("  Id: {}", style(&widget.id).green());
        }
        println!("  Version: {}", widget.version);
        for (lang, name) in &widget.names {
            let lang = if lang.is_empty() { "default" } else { lang };
            println!("  Name ({lang}): {}", style(name).green());
        }
    }
    if let Some(app) = parser.get_manifest_data::<TizenApplicationInfo>(TizenApplicationInfo::KEY)
    {
        println!("  Application: {}", style(&app.id).green());
        println!("  Required version: {}", app.required_version);
    }
    if let Some(content) = parser.get_manifest_data::<ContentInfo>(ContentInfo::KEY) {
        println!("  Start file: {} ({})", content.src, content.mime_type);
    }
    if let Some(icons) = parser.get_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
    {
        println!("  Icons: {}", icons.icons().len());
    }
    if let Some(services) = parser.get_manifest_data::<ServiceList>(ServiceList::KEY) {
        println!("  Services: {}", services.services.len());
    }

    if !parser.has_valid_start_file() {
        return Err(WidgetConfigError::NoValidStartFile);
    }
    if !parser.has_valid_services_start_files() {
        return Err(WidgetConfigError::PackageCheck(
            parser.error_message().unwrap_or_default().to_string(),
        ));
    }

    println!();
    println!("{}", style("Widget configuration is valid").green().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["wgt-manifest", "check", "widget/config.xml"]);

        let Commands::Check {
            config,
            platform_version,
            profile,
        } = cli.command;
        assert_eq!(config, PathBuf::from("widget/config.xml"));
        assert_eq!(platform_version, DEFAULT_PLATFORM_VERSION);
        assert_eq!(profile, Profile::Mobile);
    }

    #[test]
    fn test_cli_parse_check_with_platform() {
        let cli = Cli::parse_from([
            "wgt-manifest",
            "check",
            "config.xml",
            "--platform-version",
            "2.4",
            "--profile",
            "wearable",
        ]);

        let Commands::Check {
            platform_version,
            profile,
            ..
        } = cli.command;
        assert_eq!(platform_version, "2.4");
        assert_eq!(profile, Profile::Wearable);
    }

    #[test]
    fn test_cli_rejects_unknown_profile() {
        assert!(Cli::try_parse_from(["wgt-manifest", "check", "config.xml", "--profile", "car"])
            .is_err());
    }
}
