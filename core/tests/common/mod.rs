use std::str::FromStr;
use std::sync::Once;

use jetton_minter_core::content::JettonMetaData;
use jetton_minter_core::TonAddress;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::Config;

#[allow(dead_code)]
pub const ADMIN_ADDRESS: &str = "EQAd8QRKoA5sKcug9bwK6vMdmhSAoAxr8vvABvC1TCeTude5";
#[allow(dead_code)]
pub const RECIPIENT_ADDRESS: &str = "EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt";
#[allow(dead_code)]
pub const METADATA_URL: &str = "https://example.com/jetton-metadata.json";

#[allow(dead_code)]
static LOG: Once = Once::new();

#[allow(dead_code)]
pub fn init_logging() {
    LOG.call_once(|| {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(log4rs::encode::pattern::PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S%.6f)} {T:>15.15} {h({l:>5.5})} {t}:{L} - {m}{n}",
            )))
            .build();

        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Trace))
            .unwrap();

        log4rs::init_config(config).unwrap();
    })
}

#[allow(dead_code)]
pub fn admin() -> TonAddress {
    TonAddress::from_str(ADMIN_ADDRESS).unwrap()
}

#[allow(dead_code)]
pub fn recipient() -> TonAddress {
    TonAddress::from_str(RECIPIENT_ADDRESS).unwrap()
}

#[allow(dead_code)]
pub fn sample_metadata() -> JettonMetaData {
    let mut metadata = JettonMetaData::new("My Jetton", "MJT", 9);
    metadata
        .with_description("My awesome token")
        .with_image("https://example.com/jetton.png");
    metadata
}
