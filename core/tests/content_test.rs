use jetton_minter_core::code::{cell_from_boc_b64, cell_to_boc_b64};
use jetton_minter_core::content::*;
use tokio_test::assert_ok;

mod common;

#[test]
fn test_offchain_content_long_uri() -> anyhow::Result<()> {
    common::init_logging();
    let uri = format!("https://example.com/{}.json", "a".repeat(300));
    let cell = build_offchain_content(&uri)?;

    assert_eq!(cell.data()[0], OFFCHAIN_CONTENT_TAG);
    assert_eq!(cell.bit_len(), 127 * 8);
    assert_eq!(cell.references().len(), 1);

    let restored = cell_from_boc_b64(&cell_to_boc_b64(&cell)?)?;
    assert_eq!(
        MetaDataContent::parse(&restored)?,
        MetaDataContent::External { uri }
    );
    Ok(())
}

#[test]
fn test_onchain_content_for_every_key_scheme() -> anyhow::Result<()> {
    common::init_logging();
    let metadata = common::sample_metadata();
    assert_ok!(metadata.ensure_valid());

    for keys in [ContentKeys::Indexed, ContentKeys::Sha256] {
        let cell = build_onchain_content(&metadata, keys)?;
        log::info!("{} content hash: {}", keys, cell.cell_hash().to_hex());
        match MetaDataContent::parse(&cell)? {
            MetaDataContent::Internal { dict } => {
                assert_eq!(dict["symbol"], "MJT");
                assert_eq!(dict["description"], "My awesome token");
            }
            other => panic!("unexpected content {:?}", other),
        }
        assert_eq!(parse_onchain_content(&cell)?, metadata);
    }
    Ok(())
}

#[test]
fn test_onchain_content_is_deterministic() -> anyhow::Result<()> {
    common::init_logging();
    let metadata = common::sample_metadata();
    let first = build_onchain_content(&metadata, ContentKeys::Sha256)?;
    let second = build_onchain_content(&metadata.clone(), ContentKeys::Sha256)?;
    assert_eq!(cell_to_boc_b64(&first)?, cell_to_boc_b64(&second)?);

    let mut renamed = metadata.clone();
    renamed.name = "Other Jetton".to_string();
    let third = build_onchain_content(&renamed, ContentKeys::Sha256)?;
    assert_ne!(first.cell_hash(), third.cell_hash());
    Ok(())
}

#[test]
fn test_semichain_uri_needs_sha256_keys() -> anyhow::Result<()> {
    common::init_logging();
    let mut with_uri = common::sample_metadata();
    with_uri.with_uri(common::METADATA_URL);
    let without_uri = common::sample_metadata();

    let indexed_with = build_onchain_content(&with_uri, ContentKeys::Indexed)?;
    let indexed_without = build_onchain_content(&without_uri, ContentKeys::Indexed)?;
    assert_eq!(indexed_with, indexed_without);

    let hashed_with = build_onchain_content(&with_uri, ContentKeys::Sha256)?;
    let hashed_without = build_onchain_content(&without_uri, ContentKeys::Sha256)?;
    assert_ne!(hashed_with.cell_hash(), hashed_without.cell_hash());
    Ok(())
}

#[test]
fn test_metadata_json_document() -> anyhow::Result<()> {
    common::init_logging();
    let metadata = common::sample_metadata();
    let json: serde_json::Value = serde_json::from_str(&metadata.to_json()?)?;
    assert_eq!(json["name"], "My Jetton");
    assert_eq!(json["symbol"], "MJT");
    assert_eq!(json["description"], "My awesome token");
    assert_eq!(json["image"], "https://example.com/jetton.png");
    assert_eq!(json["decimals"], "9");

    let config: JettonMetaData = serde_json::from_value(json)?;
    assert_eq!(config.decimals, 9);
    assert_eq!(config.name, metadata.name);
    Ok(())
}
