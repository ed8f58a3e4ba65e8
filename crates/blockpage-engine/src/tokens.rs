//! Small keyword enums shared by content normalization and the style cascade.
//!
//! Every keyword enum parses case-insensitively from a JSON value, falls back
//! to its default on anything it does not recognise, and serializes back to
//! the same keyword so canonical content survives a JSON round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident default $default:ident {
            $($variant:ident => $keyword:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $keyword)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)+
                }
            }

            /// Parse a keyword, ignoring surrounding whitespace and ASCII case
            pub fn parse(keyword: &str) -> Option<Self> {
                let keyword = keyword.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(keyword))
            }

            /// Parse a keyword stored as a JSON string; anything else is `None`
            pub fn from_value(value: Option<&Value>) -> Option<Self> {
                value.and_then(Value::as_str).and_then(Self::parse)
            }

            /// Like [`Self::from_value`] but total
            pub fn from_value_or(value: Option<&Value>, fallback: Self) -> Self {
                Self::from_value(value).unwrap_or(fallback)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Style tokens

keyword_enum! {
    /// Vertical breathing room around a block
    Padding default None {
        None => "none",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

keyword_enum! {
    /// Horizontal extent of a block
    Width default Full {
        Content => "content",
        Full => "full",
    }
}

keyword_enum! {
    Background default None {
        None => "none",
        Muted => "muted",
        Card => "card",
        Accent => "accent",
    }
}

keyword_enum! {
    Radius default Xxl {
        None => "none",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xxl => "2xl",
    }
}

keyword_enum! {
    Border default Subtle {
        None => "none",
        Subtle => "subtle",
        Strong => "strong",
    }
}

keyword_enum! {
    /// Horizontal alignment, used both as a style token and by content fields
    Align default Left {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

// Content keywords

keyword_enum! {
    TextSize default Md {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

keyword_enum! {
    TitleSize default Lg {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
    }
}

keyword_enum! {
    VerticalAlign default Center {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

keyword_enum! {
    ImageShape default Circle {
        Circle => "circle",
        Rounded => "rounded",
        Square => "square",
    }
}

keyword_enum! {
    HeroVariant default Default {
        Default => "default",
        Split => "split",
        Background => "background",
    }
}

keyword_enum! {
    Side default Right {
        Left => "left",
        Right => "right",
    }
}

keyword_enum! {
    ImageSize default Md {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

keyword_enum! {
    ImageRatio default Square {
        Square => "square",
        Portrait => "portrait",
        Landscape => "landscape",
    }
}

keyword_enum! {
    BackgroundHeight default Md {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Screen => "screen",
    }
}

keyword_enum! {
    ProductLayout default Grid {
        Grid => "grid",
        List => "list",
    }
}
