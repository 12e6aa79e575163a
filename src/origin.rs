use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The process role that created an action.
///
/// The controller (`main`) holds the authoritative state. The renderer is
/// untrusted and may only originate the unrestricted actions.
///
/// # Examples
///
/// ```
/// use dlqueue::Origin;
///
/// let origin: Origin = "renderer".parse().unwrap();
/// assert_eq!(origin, Origin::Renderer);
/// assert_eq!(origin.to_string(), "renderer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Main,
    Renderer,
}

impl Origin {
    /// The wire spelling of this origin.
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Main => "main",
            Origin::Renderer => "renderer",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "main" => Ok(Origin::Main),
            "renderer" => Ok(Origin::Renderer),
            other => Err(Error::Config(format!(
                "unknown process role {other:?} (expected \"main\" or \"renderer\")"
            ))),
        }
    }
}
