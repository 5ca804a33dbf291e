//! Process-wide default strictness
//!
//! Kept in its own test binary: the default can be set only once per process.

use metar_decoder::{DecodeTermination, DecoderConfig, Error, MetarDecoder, decode, set_default_strict};

#[test]
fn test_default_strictness_is_set_once() {
    let malformed = "KJFK 261651Z 180X10KT 10SM FEW250 24/18 A3000";

    assert_eq!(decode(malformed).termination, DecodeTermination::ChainExhausted);

    set_default_strict(true).unwrap();
    assert_eq!(decode(malformed).termination, DecodeTermination::StrictAbort);
    assert!(MetarDecoder::new().is_strict());

    let result = set_default_strict(false);
    assert!(matches!(
        result,
        Err(Error::DefaultStrictnessAlreadySet { current: true })
    ));

    // An explicit configuration still wins over the process default
    let lenient = MetarDecoder::from_config(&DecoderConfig::default().with_strict(false)).unwrap();
    assert_eq!(lenient.decode(malformed).termination, DecodeTermination::ChainExhausted);
}
