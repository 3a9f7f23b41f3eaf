//! Token content cells as defined by TEP-64.
//!
//! ```raw
//! onchain#00 data:(HashmapE 256 ^ContentData) = FullContent;
//! offchain#01 uri:Text = FullContent;
//! ```
use std::collections::HashMap;

use lazy_static::lazy_static;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use strum::{Display, EnumString};
use tonlib_core::cell::dict::predefined_readers::{key_reader_uint, val_reader_ref_cell};
use tonlib_core::cell::{ArcCell, Cell, CellBuilder, TonCellError};

pub use error::*;
pub use metadata::*;
pub use snake::*;

mod error;
mod metadata;
mod snake;

pub const ONCHAIN_CONTENT_TAG: u8 = 0x00;
pub const OFFCHAIN_CONTENT_TAG: u8 = 0x01;
pub const SNAKE_DATA_PREFIX: u8 = 0x00;

const CONTENT_DICT_KEY_BITS: usize = 256;

/// Key scheme of the on-chain content dictionary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContentKeys {
    /// Fixed integer keys: name=0, description=1, image=2, symbol=3, decimals=4.
    /// Values are plain snake strings.
    #[default]
    Indexed,
    /// `sha256(field_name)` keys, values carry the `0x00` snake-data prefix.
    Sha256,
}

impl ContentKeys {
    fn value_prefix(&self) -> Option<u8> {
        match self {
            ContentKeys::Indexed => None,
            ContentKeys::Sha256 => Some(SNAKE_DATA_PREFIX),
        }
    }
}

struct MetaDataField {
    name: &'static str,
    index: Option<u8>,
    hashed_key: BigUint,
}

impl MetaDataField {
    fn new(name: &'static str, index: Option<u8>) -> MetaDataField {
        let hashed_key = BigUint::from_bytes_be(Sha256::digest(name.as_bytes()).as_slice());
        MetaDataField {
            name,
            index,
            hashed_key,
        }
    }

    fn key(&self, keys: ContentKeys) -> Option<BigUint> {
        match keys {
            ContentKeys::Indexed => self.index.map(BigUint::from),
            ContentKeys::Sha256 => Some(self.hashed_key.clone()),
        }
    }

    /// The scheme under which `key` addresses this field.
    fn scheme_of(&self, key: &BigUint) -> Option<ContentKeys> {
        if self.index.map(BigUint::from).as_ref() == Some(key) {
            Some(ContentKeys::Indexed)
        } else if &self.hashed_key == key {
            Some(ContentKeys::Sha256)
        } else {
            None
        }
    }
}

lazy_static! {
    static ref META_NAME: MetaDataField = MetaDataField::new("name", Some(0));
    static ref META_DESCRIPTION: MetaDataField = MetaDataField::new("description", Some(1));
    static ref META_IMAGE: MetaDataField = MetaDataField::new("image", Some(2));
    static ref META_SYMBOL: MetaDataField = MetaDataField::new("symbol", Some(3));
    static ref META_DECIMALS: MetaDataField = MetaDataField::new("decimals", Some(4));
    static ref META_URI: MetaDataField = MetaDataField::new("uri", None);
}

fn metadata_fields() -> [&'static MetaDataField; 6] {
    [
        &*META_NAME,
        &*META_DESCRIPTION,
        &*META_IMAGE,
        &*META_SYMBOL,
        &*META_DECIMALS,
        &*META_URI,
    ]
}

/// Returns the dictionary key a metadata field is stored under, if the scheme has one.
pub fn content_key(field: &str, keys: ContentKeys) -> Option<BigUint> {
    metadata_fields()
        .into_iter()
        .find(|f| f.name == field)
        .and_then(|f| f.key(keys))
}

/// Off-chain content: the `0x01` tag followed by the URI as a snake string.
pub fn build_offchain_content(uri: &str) -> Result<Cell, ContentError> {
    let mut builder = CellBuilder::new();
    builder.store_u8(8, OFFCHAIN_CONTENT_TAG)?;
    store_snake_bytes(&mut builder, uri.as_bytes())?;
    let cell = builder.build()?;
    log::trace!("Built off-chain content for {}", uri);
    Ok(cell)
}

/// On-chain content: the `0x00` tag followed by the metadata dictionary.
///
/// `name`, `symbol` and `decimals` are always stored, `description`, `image`
/// and `uri` only when set and non-empty.
pub fn build_onchain_content(
    metadata: &JettonMetaData,
    keys: ContentKeys,
) -> Result<Cell, ContentError> {
    let decimals = metadata.decimals.to_string();
    let fields: [(&MetaDataField, Option<&str>, bool); 6] = [
        (&*META_NAME, Some(metadata.name.as_str()), true),
        (&*META_DESCRIPTION, metadata.description.as_deref(), false),
        (&*META_IMAGE, metadata.image.as_deref(), false),
        (&*META_SYMBOL, Some(metadata.symbol.as_str()), true),
        (&*META_DECIMALS, Some(decimals.as_str()), true),
        (&*META_URI, metadata.uri.as_deref(), false),
    ];

    let mut dict: HashMap<BigUint, ArcCell> = HashMap::new();
    for (field, value, required) in fields {
        let value = match value {
            Some(v) if required || !v.is_empty() => v,
            _ => continue,
        };
        let Some(key) = field.key(keys) else {
            log::warn!("Field {} has no {} key, skipped", field.name, keys);
            continue;
        };
        let value_cell = snake_string_cell(keys.value_prefix(), value)?;
        dict.insert(key, value_cell.to_arc());
    }

    let mut builder = CellBuilder::new();
    builder.store_u8(8, ONCHAIN_CONTENT_TAG)?;
    builder.store_dict(CONTENT_DICT_KEY_BITS, write_content_ref, dict)?;
    let cell = builder.build()?;
    log::trace!(
        "Built on-chain content for {} ({}) with {} keys",
        metadata.name,
        metadata.symbol,
        keys
    );
    Ok(cell)
}

fn write_content_ref(builder: &mut CellBuilder, value: ArcCell) -> Result<(), TonCellError> {
    builder.store_reference(&value)?;
    Ok(())
}

/// Jetton 2.0 `metadata_uri`: an empty cell referencing the URI snake string.
pub fn build_metadata_uri_cell(uri: &str) -> Result<Cell, ContentError> {
    let mut builder = CellBuilder::new();
    builder.store_child(snake_string_cell(None, uri)?)?;
    Ok(builder.build()?)
}

pub fn parse_metadata_uri_cell(cell: &Cell) -> Result<String, ContentError> {
    let bytes = load_snake_bytes(cell.reference(0)?, 0)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn parse_offchain_content(cell: &Cell) -> Result<String, ContentError> {
    let tag = cell.parser().load_u8(8)?;
    if tag != OFFCHAIN_CONTENT_TAG {
        return Err(ContentError::UnsupportedLayout(tag));
    }
    let bytes = load_snake_bytes(cell, 8)?;
    Ok(String::from_utf8(bytes)?)
}

/// Reads the on-chain content dictionary back into `field name -> value`.
///
/// Both key schemes are recognized per entry. Keys that match no known field
/// are reported by their hex value, their values keep the snake-data prefix
/// stripped when present.
pub fn load_onchain_fields(cell: &Cell) -> Result<HashMap<String, String>, ContentError> {
    let mut parser = cell.parser();
    let tag = parser.load_u8(8)?;
    if tag != ONCHAIN_CONTENT_TAG {
        return Err(ContentError::UnsupportedLayout(tag));
    }
    let raw = parser.load_dict(CONTENT_DICT_KEY_BITS, key_reader_uint, val_reader_ref_cell)?;

    let mut fields = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let known = metadata_fields()
            .into_iter()
            .find_map(|f| f.scheme_of(&key).map(|scheme| (f.name, scheme)));
        let (name, skip_bits) = match known {
            Some((name, ContentKeys::Indexed)) => (name.to_string(), 0),
            Some((name, ContentKeys::Sha256)) => {
                let prefix = value.parser().load_u8(8)?;
                if prefix != SNAKE_DATA_PREFIX {
                    return Err(ContentError::UnsupportedLayout(prefix));
                }
                (name.to_string(), 8)
            }
            None => {
                let prefixed = value.bit_len() >= 8 && value.data()[0] == SNAKE_DATA_PREFIX;
                (key.to_str_radix(16), if prefixed { 8 } else { 0 })
            }
        };
        let text = String::from_utf8(load_snake_bytes(&value, skip_bits)?)?;
        fields.insert(name, text);
    }
    log::trace!("Loaded {} on-chain content fields", fields.len());
    Ok(fields)
}

/// Decodes on-chain content into [`JettonMetaData`].
pub fn parse_onchain_content(cell: &Cell) -> Result<JettonMetaData, ContentError> {
    JettonMetaData::from_fields(&load_onchain_fields(cell)?)
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum MetaDataContent {
    External { uri: String },
    Internal { dict: HashMap<String, String> },
}

impl MetaDataContent {
    pub fn parse(cell: &Cell) -> Result<MetaDataContent, ContentError> {
        let mut parser = cell.parser();
        let content_representation = parser.load_u8(8)?;
        match content_representation {
            ONCHAIN_CONTENT_TAG => Ok(MetaDataContent::Internal {
                dict: load_onchain_fields(cell)?,
            }),
            OFFCHAIN_CONTENT_TAG => Ok(MetaDataContent::External {
                uri: parse_offchain_content(cell)?,
            }),
            tag => Err(ContentError::UnsupportedLayout(tag)),
        }
    }
}
