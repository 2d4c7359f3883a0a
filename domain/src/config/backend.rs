//! Generation backend value object

use serde::{Deserialize, Serialize};

/// Where prompts are sent for generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationBackend {
    /// Call the model provider directly with a locally held credential
    Direct,
    /// Go through a relay that holds the credential server-side
    Relay,
}

impl Default for GenerationBackend {
    fn default() -> Self {
        Self::Direct
    }
}

impl GenerationBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationBackend::Direct => "direct",
            GenerationBackend::Relay => "relay",
        }
    }
}

impl std::str::FromStr for GenerationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(GenerationBackend::Direct),
            "relay" => Ok(GenerationBackend::Relay),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_direct() {
        assert_eq!(GenerationBackend::default(), GenerationBackend::Direct);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&GenerationBackend::Relay).unwrap();
        assert_eq!(json, "\"relay\"");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Relay".parse::<GenerationBackend>(), Ok(GenerationBackend::Relay));
        assert!("carrier-pigeon".parse::<GenerationBackend>().is_err());
    }
}
