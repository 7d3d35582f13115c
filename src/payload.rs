//! # Payload Builder
//!
//! Maps a content type plus its raw field values to the text that gets
//! encoded in the QR symbol, using the conventions phone cameras and reader
//! apps understand.
//!
//! | Content | Payload |
//! |---------|---------|
//! | Link, free text | value as typed |
//! | Phone | `tel:<value>` |
//! | WhatsApp | `https://wa.me/<value>` |
//! | Email | `mailto:<value>` |
//! | Wi-Fi | `WIFI:T:<mode>;S:<ssid>;P:<password>;;` |
//! | Location | `geo:<lat>,<lon>` |
//!
//! ## Example
//!
//! ```
//! use qrstamp::payload::{ContentSpec, WifiSecurity, build_payload};
//!
//! let wifi = ContentSpec::WiFi {
//!     ssid: "Home".into(),
//!     password: "pw1".into(),
//!     security: WifiSecurity::Wpa,
//! };
//! assert_eq!(build_payload(&wifi).unwrap(), "WIFI:T:WPA;S:Home;P:pw1;;");
//! ```

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// What the QR code should carry, with the raw values the user typed.
///
/// Exactly one variant is active per generation request. The content type is
/// chosen by the caller, never inferred from the values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ContentSpec {
    #[serde(rename = "link")]
    Link { value: String },

    #[serde(rename = "phone")]
    Phone { value: String },

    /// Phone number in international format, passed through unescaped.
    #[serde(rename = "whatsapp")]
    WhatsApp { value: String },

    #[serde(rename = "email")]
    Email { value: String },

    #[serde(rename = "text")]
    FreeText { value: String },

    #[serde(rename = "wifi")]
    WiFi {
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        security: WifiSecurity,
    },

    /// Coordinates are kept as text and joined verbatim.
    #[serde(rename = "location")]
    Location {
        #[serde(deserialize_with = "coordinate")]
        latitude: String,
        #[serde(deserialize_with = "coordinate")]
        longitude: String,
    },
}

impl ContentSpec {
    /// Tag names accepted in JSON requests, in display order.
    pub const KINDS: &'static [&'static str] = &[
        "link", "phone", "whatsapp", "email", "text", "wifi", "location",
    ];

    /// The tag name of this variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentSpec::Link { .. } => "link",
            ContentSpec::Phone { .. } => "phone",
            ContentSpec::WhatsApp { .. } => "whatsapp",
            ContentSpec::Email { .. } => "email",
            ContentSpec::FreeText { .. } => "text",
            ContentSpec::WiFi { .. } => "wifi",
            ContentSpec::Location { .. } => "location",
        }
    }
}

/// Wi-Fi authentication mode as written in the `T:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    NoPass,
}

impl WifiSecurity {
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WifiSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wpa" => Ok(WifiSecurity::Wpa),
            "wep" => Ok(WifiSecurity::Wep),
            "nopass" | "none" => Ok(WifiSecurity::NoPass),
            other => Err(format!(
                "unknown Wi-Fi security '{}' (expected wpa, wep or nopass)",
                other
            )),
        }
    }
}

impl TryFrom<String> for WifiSecurity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Build the canonical payload string for `spec`.
///
/// Every field is trimmed before use. Fails with
/// [`ValidationError::MissingField`] naming the first required field that is
/// empty; nothing should be encoded in that case.
pub fn build_payload(spec: &ContentSpec) -> Result<String, ValidationError> {
    let payload = match spec {
        ContentSpec::Link { value } | ContentSpec::FreeText { value } => {
            required(value, "value")?.to_string()
        }
        ContentSpec::Phone { value } => format!("tel:{}", required(value, "value")?),
        ContentSpec::WhatsApp { value } => {
            format!("https://wa.me/{}", required(value, "value")?)
        }
        ContentSpec::Email { value } => format!("mailto:{}", required(value, "value")?),
        ContentSpec::WiFi {
            ssid,
            password,
            security,
        } => {
            let ssid = required(ssid, "ssid")?;
            format!(
                "WIFI:T:{};S:{};P:{};;",
                security,
                escape_wifi(ssid),
                escape_wifi(password.trim())
            )
        }
        ContentSpec::Location {
            latitude,
            longitude,
        } => {
            let lat = required(latitude, "latitude")?;
            let lon = required(longitude, "longitude")?;
            format!("geo:{},{}", lat, lon)
        }
    };

    Ok(payload)
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Backslash-escape the characters the `WIFI:` grammar reserves.
fn escape_wifi(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for ch in field.chars() {
        if matches!(ch, '\\' | ';' | ',' | '"' | ':') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Accept a coordinate as either a JSON string or a JSON number.
fn coordinate<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
