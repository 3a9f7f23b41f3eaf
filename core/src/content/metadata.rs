use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_aux::prelude::*;

use super::ContentError;

pub const DEFAULT_DECIMALS: u8 = 9;
pub const MAX_DECIMALS: u8 = 18;

const NAME_LEN: (usize, usize) = (3, 50);
const SYMBOL_LEN: (usize, usize) = (2, 10);
const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Serialize, PartialEq, Eq, Deserialize, Debug, Clone)]
pub struct JettonMetaData {
    ///UTF8 string. The name of the token - e.g. "Example Coin".
    pub name: String,
    ///UTF8 string. The symbol of the token - e.g. "XMPL". Used in the form "You received 99 XMPL".
    pub symbol: String,
    ///The number of decimals the token uses - e.g. 8, means to divide the token amount by 100000000
    ///to get its user representation. Serialized as a string, as TEP-64 requires.
    #[serde(
        default = "default_decimals",
        deserialize_with = "deserialize_number_from_string",
        serialize_with = "serialize_decimals"
    )]
    pub decimals: u8,
    ///Optional. UTF8 string. Describes the token - e.g. "This is an example jetton for the TON network".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    ///Optional. ASCII string. A URI pointing to a jetton icon with mime type image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    ///Optional. Used by "Semi-chain content layout". ASCII string. A URI pointing to JSON document with metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Document served behind an off-chain metadata URI.
#[derive(Serialize)]
struct HostedMetaData<'a> {
    name: &'a str,
    symbol: String,
    description: &'a str,
    image: &'a str,
    decimals: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(crate) fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn serialize_decimals<S>(decimals: &u8, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(decimals)
}

impl JettonMetaData {
    pub fn new(name: &str, symbol: &str, decimals: u8) -> Self {
        JettonMetaData {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            description: None,
            image: None,
            uri: None,
        }
    }

    pub fn with_description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_image(&mut self, image: &str) -> &mut Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn with_uri(&mut self, uri: &str) -> &mut Self {
        self.uri = Some(uri.to_string());
        self
    }

    /// Rebuilds metadata from decoded content fields. `decimals` defaults to 9.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ContentError> {
        let required = |field: &'static str| {
            fields
                .get(field)
                .cloned()
                .ok_or(ContentError::MissingField(field))
        };
        let decimals = match fields.get("decimals") {
            Some(decimals) => decimals
                .parse::<u8>()
                .map_err(|_| ContentError::InvalidDecimals(decimals.clone()))?,
            None => DEFAULT_DECIMALS,
        };
        Ok(JettonMetaData {
            name: required("name")?,
            symbol: required("symbol")?,
            decimals,
            description: fields.get("description").cloned(),
            image: fields.get("image").cloned(),
            uri: fields.get("uri").cloned(),
        })
    }

    /// Checks the fields against the limits the minter frontend enforces.
    ///
    /// Returns every failure, an empty vector means the metadata is valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Token name is required"));
        } else if name_len < NAME_LEN.0 {
            errors.push(FieldError::new(
                "name",
                format!("Token name must be at least {} characters", NAME_LEN.0),
            ));
        } else if name_len > NAME_LEN.1 {
            errors.push(FieldError::new(
                "name",
                format!("Token name must not exceed {} characters", NAME_LEN.1),
            ));
        }

        let symbol_len = self.symbol.chars().count();
        if self.symbol.trim().is_empty() {
            errors.push(FieldError::new("symbol", "Token symbol is required"));
        } else if symbol_len < SYMBOL_LEN.0 {
            errors.push(FieldError::new(
                "symbol",
                format!("Token symbol must be at least {} characters", SYMBOL_LEN.0),
            ));
        } else if symbol_len > SYMBOL_LEN.1 {
            errors.push(FieldError::new(
                "symbol",
                format!("Token symbol must not exceed {} characters", SYMBOL_LEN.1),
            ));
        } else if !self.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(FieldError::new(
                "symbol",
                "Token symbol can only contain letters and numbers",
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                errors.push(FieldError::new(
                    "description",
                    format!(
                        "Description must not exceed {} characters",
                        DESCRIPTION_MAX_LEN
                    ),
                ));
            }
        }

        if let Some(image) = &self.image {
            let image = image.trim();
            if !image.is_empty() && !is_http_url(image) {
                errors.push(FieldError::new(
                    "image",
                    "Image URL must start with http:// or https://",
                ));
            }
        }

        if self.decimals > MAX_DECIMALS {
            errors.push(FieldError::new(
                "decimals",
                format!("Decimals must be between 0 and {}", MAX_DECIMALS),
            ));
        }

        errors
    }

    pub fn ensure_valid(&self) -> Result<(), ContentError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ContentError::InvalidMetaData(errors))
        }
    }

    /// Renders the JSON document to host behind an off-chain content URI.
    /// The symbol is upper-cased.
    pub fn to_json(&self) -> Result<String, ContentError> {
        let description = match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => self.name.as_str(),
        };
        let hosted = HostedMetaData {
            name: &self.name,
            symbol: self.symbol.to_uppercase(),
            description,
            image: self.image.as_deref().unwrap_or_default(),
            decimals: self.decimals.to_string(),
        };
        Ok(serde_json::to_string(&hosted)?)
    }
}

/// Metadata URIs of Jetton 2.0 minters must be fetchable by explorers.
pub fn validate_metadata_uri(uri: &str) -> Result<(), ContentError> {
    if is_http_url(uri) || has_non_empty_rest(uri, "ipfs://") {
        Ok(())
    } else {
        Err(ContentError::InvalidMetaDataUri(uri.to_string()))
    }
}

fn is_http_url(uri: &str) -> bool {
    has_non_empty_rest(uri, "https://") || has_non_empty_rest(uri, "http://")
}

fn has_non_empty_rest(uri: &str, scheme: &str) -> bool {
    uri.strip_prefix(scheme)
        .map(|rest| !rest.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_metadata() -> JettonMetaData {
        let mut metadata = JettonMetaData::new("My Jetton", "MJT", 9);
        metadata
            .with_description("My awesome token")
            .with_image("https://example.com/image.png");
        metadata
    }

    #[test]
    fn test_valid_metadata_has_no_errors() {
        assert!(valid_metadata().validate().is_empty());
        assert!(valid_metadata().ensure_valid().is_ok());
    }

    #[test]
    fn test_validation_collects_every_field() {
        let mut metadata = JettonMetaData::new("ab", "M-T", 19);
        metadata
            .with_description(&"d".repeat(501))
            .with_image("ftp://example.com/image.png");

        let fields: Vec<_> = metadata.validate().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["name", "symbol", "description", "image", "decimals"]
        );
    }

    #[test]
    fn test_name_and_symbol_limits() {
        let metadata = JettonMetaData::new(" ", "", 9);
        let errors = metadata.validate();
        assert_eq!(errors[0].message, "Token name is required");
        assert_eq!(errors[1].message, "Token symbol is required");

        let metadata = JettonMetaData::new(&"n".repeat(51), "ABCDEFGHIJK", 9);
        let errors = metadata.validate();
        assert_eq!(errors[0].message, "Token name must not exceed 50 characters");
        assert_eq!(
            errors[1].message,
            "Token symbol must not exceed 10 characters"
        );
    }

    #[test]
    fn test_ensure_valid_reports_fields() {
        let metadata = JettonMetaData::new("My Jetton", "M", 9);
        let err = metadata.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("symbol: Token symbol must be at least 2"));
    }

    #[test]
    fn test_decimals_accept_string_and_number() {
        let from_string: JettonMetaData =
            serde_json::from_str(r#"{"name":"My Jetton","symbol":"MJT","decimals":"6"}"#)
                .unwrap();
        let from_number: JettonMetaData =
            serde_json::from_str(r#"{"name":"My Jetton","symbol":"MJT","decimals":6}"#).unwrap();
        let defaulted: JettonMetaData =
            serde_json::from_str(r#"{"name":"My Jetton","symbol":"MJT"}"#).unwrap();

        assert_eq!(from_string.decimals, 6);
        assert_eq!(from_number, from_string);
        assert_eq!(defaulted.decimals, DEFAULT_DECIMALS);
    }

    #[test]
    fn test_serialized_decimals_are_strings() {
        let json = serde_json::to_value(JettonMetaData::new("My Jetton", "MJT", 9)).unwrap();
        assert_eq!(json["decimals"], "9");
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_hosted_document_defaults() {
        let metadata = JettonMetaData::new("My Jetton", "MJT", 9);
        assert_eq!(
            metadata.to_json().unwrap(),
            r#"{"name":"My Jetton","symbol":"MJT","description":"My Jetton","image":"","decimals":"9"}"#
        );
    }

    #[test]
    fn test_hosted_document_upper_cases_symbol() -> Result<(), ContentError> {
        let mut metadata = JettonMetaData::new("My Jetton", "mjt2", 6);
        metadata.with_description("My awesome token");
        let json: serde_json::Value = serde_json::from_str(&metadata.to_json()?)?;
        assert_eq!(json["symbol"], "MJT2");
        assert_eq!(json["description"], "My awesome token");
        assert_eq!(json["decimals"], "6");
        Ok(())
    }

    #[test]
    fn test_from_fields() -> Result<(), ContentError> {
        let mut fields = HashMap::from([
            ("name".to_string(), "My Jetton".to_string()),
            ("symbol".to_string(), "MJT".to_string()),
            ("image".to_string(), "https://example.com/jetton.png".to_string()),
        ]);
        let metadata = JettonMetaData::from_fields(&fields)?;
        assert_eq!(metadata.decimals, DEFAULT_DECIMALS);
        assert_eq!(metadata.image.as_deref(), Some("https://example.com/jetton.png"));
        assert_eq!(metadata.description, None);

        fields.insert("decimals".to_string(), "nine".to_string());
        assert!(matches!(
            JettonMetaData::from_fields(&fields),
            Err(ContentError::InvalidDecimals(_))
        ));
        fields.insert("decimals".to_string(), "9".to_string());
        fields.remove("symbol");
        assert!(matches!(
            JettonMetaData::from_fields(&fields),
            Err(ContentError::MissingField("symbol"))
        ));
        Ok(())
    }

    #[test]
    fn test_metadata_uri_schemes() {
        assert!(validate_metadata_uri("https://example.com/jetton.json").is_ok());
        assert!(validate_metadata_uri("http://example.com/jetton.json").is_ok());
        assert!(validate_metadata_uri("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi").is_ok());
        assert!(validate_metadata_uri("https://").is_err());
        assert!(validate_metadata_uri("data:application/json,{}").is_err());
    }
}
