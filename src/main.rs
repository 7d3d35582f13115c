//! # qrstamp CLI
//!
//! Command-line interface for QR code generation.
//!
//! ## Usage
//!
//! ```bash
//! # Link with a caption
//! qrstamp generate --type link --value https://example.com --caption "Scan me"
//!
//! # Wi-Fi credentials, custom colors, plus a preview
//! qrstamp generate --type wifi --ssid Home --password hunter2 \
//!     --fg navy --bg "#fffbe6" --output wifi.png --preview wifi-preview.png
//!
//! # Map location
//! qrstamp generate --type location --lat 40.7128 --lon -74.0060
//!
//! # HTTP API
//! qrstamp serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use qrstamp::{
    Color, ContentSpec, Generator, QrStampError, StyleSpec, WifiSecurity,
    config::RenderConfig,
    logger, persist,
    preview::DEFAULT_PREVIEW_MAX_DIM,
    server::{self, ServerConfig},
};

/// qrstamp - captioned QR code generator
#[derive(Parser, Debug)]
#[command(name = "qrstamp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a QR code PNG
    Generate {
        /// Content type
        #[arg(long = "type", value_enum)]
        kind: ContentKind,

        /// Link, phone number, email address or free text
        #[arg(long)]
        value: Option<String>,

        /// Wi-Fi network name
        #[arg(long)]
        ssid: Option<String>,

        /// Wi-Fi password
        #[arg(long, default_value = "")]
        password: String,

        /// Wi-Fi security (WPA, WEP, nopass)
        #[arg(long, default_value = "WPA")]
        security: WifiSecurity,

        /// Latitude for location codes
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude for location codes
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,

        /// Foreground color (#rrggbb, #rgb or a color name)
        #[arg(long, default_value = "black")]
        fg: Color,

        /// Background color
        #[arg(long, default_value = "white")]
        bg: Color,

        /// Caption drawn beneath the code
        #[arg(long, default_value = "")]
        caption: String,

        /// Caption color (defaults to the foreground color)
        #[arg(long)]
        caption_color: Option<Color>,

        /// TrueType font for the caption, tried before the system defaults
        #[arg(long, value_name = "FILE")]
        font: Vec<PathBuf>,

        /// Output PNG path
        #[arg(long, short, default_value = "qrcode.png")]
        output: PathBuf,

        /// Also write a bounded-size preview PNG
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        /// Longest side of the preview in pixels
        #[arg(
            long,
            default_value_t = DEFAULT_PREVIEW_MAX_DIM,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        preview_size: u32,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// TrueType font for captions, tried before the system defaults
        #[arg(long, value_name = "FILE")]
        font: Vec<PathBuf>,

        /// Longest side of previews in pixels
        #[arg(
            long,
            default_value_t = DEFAULT_PREVIEW_MAX_DIM,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        preview_size: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ContentKind {
    Link,
    Phone,
    #[value(name = "whatsapp")]
    WhatsApp,
    Email,
    Text,
    #[value(name = "wifi")]
    WiFi,
    Location,
}

/// Raw content flags, before they are checked against the chosen kind.
#[derive(Debug, Default)]
struct ContentArgs {
    value: Option<String>,
    ssid: Option<String>,
    password: String,
    security: WifiSecurity,
    lat: Option<String>,
    lon: Option<String>,
}

impl ContentKind {
    fn to_spec(self, args: ContentArgs) -> ContentSpec {
        let value = args.value.unwrap_or_default();
        match self {
            ContentKind::Link => ContentSpec::Link { value },
            ContentKind::Phone => ContentSpec::Phone { value },
            ContentKind::WhatsApp => ContentSpec::WhatsApp { value },
            ContentKind::Email => ContentSpec::Email { value },
            ContentKind::Text => ContentSpec::FreeText { value },
            ContentKind::WiFi => ContentSpec::WiFi {
                ssid: args.ssid.unwrap_or_default(),
                password: args.password,
                security: args.security,
            },
            ContentKind::Location => ContentSpec::Location {
                latitude: args.lat.unwrap_or_default(),
                longitude: args.lon.unwrap_or_default(),
            },
        }
    }
}

fn main() {
    if let Err(e) = logger::try_init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QrStampError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            kind,
            value,
            ssid,
            password,
            security,
            lat,
            lon,
            fg,
            bg,
            caption,
            caption_color,
            font,
            output,
            preview,
            preview_size,
        } => {
            let content = kind.to_spec(ContentArgs {
                value,
                ssid,
                password,
                security,
                lat,
                lon,
            });
            let style = StyleSpec {
                caption_color,
                ..StyleSpec::default().colors(fg, bg).caption(caption)
            };

            let config = RenderConfig::default()
                .prepend_fonts(font)
                .preview_max_dim(preview_size);
            let generator = Generator::new(&config);

            let generated = generator.generate(&content, &style)?;
            let saved = persist::save_png(&generated.image, &output)?;
            println!(
                "Saved {}x{} QR code to {}",
                generated.image.width(),
                generated.image.height(),
                saved.display()
            );

            if let Some(preview_path) = preview {
                let thumb = generator.preview(&generated);
                let saved = persist::save_png(&thumb, &preview_path)?;
                println!(
                    "Saved {}x{} preview to {}",
                    thumb.width(),
                    thumb.height(),
                    saved.display()
                );
            }
        }

        Commands::Serve {
            listen,
            font,
            preview_size,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                render: RenderConfig::default()
                    .prepend_fonts(font)
                    .preview_max_dim(preview_size),
            };

            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            rt.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_wifi_flags() {
        let cli = Cli::try_parse_from([
            "qrstamp", "generate", "--type", "wifi", "--ssid", "Home", "--password", "pw",
            "--security", "wep",
        ])
        .unwrap();
        let Commands::Generate {
            kind,
            ssid,
            password,
            security,
            ..
        } = cli.command
        else {
            panic!("expected generate");
        };

        let spec = kind.to_spec(ContentArgs {
            ssid,
            password,
            security,
            ..Default::default()
        });
        assert_eq!(
            spec,
            ContentSpec::WiFi {
                ssid: "Home".to_string(),
                password: "pw".to_string(),
                security: WifiSecurity::Wep,
            }
        );
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "qrstamp", "generate", "--type", "location", "--lat", "-33.8688", "--lon",
            "151.2093",
        ])
        .unwrap();
        let Commands::Generate { kind, lat, lon, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(kind, ContentKind::Location);
        assert_eq!(lat.as_deref(), Some("-33.8688"));
        assert_eq!(lon.as_deref(), Some("151.2093"));
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["qrstamp", "generate", "--type", "text", "--value", "hi"])
            .unwrap();
        let Commands::Generate {
            output,
            fg,
            bg,
            preview_size,
            ..
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(output, PathBuf::from("qrcode.png"));
        assert_eq!(fg, Color::BLACK);
        assert_eq!(bg, Color::WHITE);
        assert_eq!(preview_size, 250);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "qrstamp", "generate", "--type", "text", "--value", "hi", "--fg", "#12345"
            ])
            .is_err()
        );
    }
}
