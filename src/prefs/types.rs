//! Preference value types

use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Independent panel instance, one per generation tab
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Txt2img,
    Img2img,
}

impl Tab {
    /// Key prefix and display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Txt2img => "txt2img",
            Self::Img2img => "img2img",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How selected styles reach the host
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    /// Merge selected styles into the prompt fields on Apply
    #[default]
    Prompt,
    /// Hand the selection to the host for application at generation time
    Silent,
    /// Merge each style as soon as it is selected, undo on deselect
    OnSelect,
}

/// Order of cards within a category
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Alphabetical by display name
    #[default]
    Name,
    /// As supplied by the sources
    Source,
}

macro_rules! labelled_enum {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Stored and displayed label
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($label => Ok(Self::$variant),)+
                    other => Err(format!("unknown value '{other}'")),
                }
            }
        }
    };
}

labelled_enum!(ApplyMode { Prompt => "prompt", Silent => "silent", OnSelect => "on-select" });
labelled_enum!(SortMode { Name => "name", Source => "source" });

/// A named, saved selection
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub styles: Vec<String>,
    /// Unix timestamp (seconds) of creation
    pub created_at: i64,
}

impl Preset {
    /// Create a preset stamped with the current time
    #[must_use]
    pub fn new(name: impl Into<String>, styles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            styles,
            created_at: Utc::now().timestamp(),
        }
    }

    /// Creation time, `None` for out-of-range timestamps
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}
