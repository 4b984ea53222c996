use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::errors::{PagerDutyError, Result};

/// Kind of a context attachment
///
/// PagerDuty renders `link` and `image` contexts. Any other tag is passed
/// through untouched since the API does not constrain the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextType {
    Link,
    Image,
    Other(String),
}

impl ContextType {
    pub fn as_str(&self) -> &str {
        match self {
            ContextType::Link => "link",
            ContextType::Image => "image",
            ContextType::Other(tag) => tag,
        }
    }
}

impl Display for ContextType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContextType {
    fn from(tag: &str) -> Self {
        match tag {
            "link" => ContextType::Link,
            "image" => ContextType::Image,
            other => ContextType::Other(other.to_string()),
        }
    }
}

impl Serialize for ContextType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContextType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ContextType::from(tag.as_str()))
    }
}

/// Omits both `None` and empty strings from the payload.
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Supplementary link or image shown alongside an incident
///
/// # Example
///
/// ```rust
/// use pagerduty_events::Context;
///
/// let link = Context::link("http://acme.pagerduty.com")
///     .with_text("View the incident on PagerDuty");
/// let chart = Context::image("https://chart.example.com/cpu.png")
///     .with_href("https://grafana.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "type")]
    pub context_type: ContextType,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub href: Option<String>,

    /// Image source, used by `image` contexts
    #[serde(default, skip_serializing_if = "is_blank")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub alt: Option<String>,

    /// Link text, used by `link` contexts
    #[serde(default, skip_serializing_if = "is_blank")]
    pub text: Option<String>,
}

impl Context {
    /// Create an empty context with the given type tag
    pub fn new(context_type: impl Into<ContextType>) -> Self {
        Self {
            context_type: context_type.into(),
            href: None,
            src: None,
            alt: None,
            text: None,
        }
    }

    /// Create a `link` context pointing at `href`
    pub fn link(href: &str) -> Self {
        Self::new(ContextType::Link).with_href(href)
    }

    /// Create an `image` context loading from `src`
    pub fn image(src: &str) -> Self {
        Self::new(ContextType::Image).with_src(src)
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn with_src(mut self, src: &str) -> Self {
        self.src = Some(src.to_string());
        self
    }

    pub fn with_alt(mut self, alt: &str) -> Self {
        self.alt = Some(alt.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

/// Trigger event payload
///
/// Repeating a trigger with the same incident key appends to the existing
/// incident instead of opening a new one. Nothing is validated locally;
/// PagerDuty decides whether the event is acceptable.
///
/// # Example
///
/// ```rust
/// use pagerduty_events::{Context, Trigger};
///
/// let trigger = Trigger::new("Something bad has happened")
///     .with_incident_key("srv01/HTTP")
///     .with_client("Sample Monitoring Service")
///     .with_client_url("https://monitoring.service.com")
///     .with_detail("ping time", "1500ms")
///     .with_detail("load avg", 0.75)
///     .with_context(Context::link("http://acme.pagerduty.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trigger {
    /// Short description shown as the incident summary
    pub description: String,

    /// Correlates repeated triggers into one incident
    #[serde(skip_serializing_if = "is_blank")]
    pub incident_key: Option<String>,

    /// Name of the monitoring client raising the event
    #[serde(skip_serializing_if = "is_blank")]
    pub client: Option<String>,

    /// URL of the monitoring client
    #[serde(skip_serializing_if = "is_blank")]
    pub client_url: Option<String>,

    /// Arbitrary JSON details attached to the incident
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, Value>,

    /// Contexts, rendered in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<Context>,
}

impl Trigger {
    /// Create a new trigger with the given description
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_incident_key(mut self, incident_key: &str) -> Self {
        self.incident_key = Some(incident_key.to_string());
        self
    }

    pub fn with_client(mut self, client: &str) -> Self {
        self.client = Some(client.to_string());
        self
    }

    pub fn with_client_url(mut self, client_url: &str) -> Self {
        self.client_url = Some(client_url.to_string());
        self
    }

    /// Add a detail entry
    ///
    /// Any value convertible into a JSON value is accepted, so strings,
    /// numbers and booleans keep their type on the wire.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Add a detail entry from any serializable value
    ///
    /// # Errors
    ///
    /// Returns [`PagerDutyError::Serialize`] if the value cannot be
    /// represented as JSON (for example a map with non-string keys).
    pub fn try_with_detail<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(PagerDutyError::Serialize)?;
        self.details.insert(key.to_string(), value);
        Ok(self)
    }

    /// Append a context; contexts keep insertion order
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }
}

/// Acknowledgment returned by PagerDuty for an accepted trigger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerResponse {
    /// Incident key assigned to (or echoed for) the event
    pub incident_key: String,
}
