#![no_main]
use libfuzzer_sys::fuzz_target;
use term_query::{write_named, QueryRegistry};

fuzz_target!(|data: &[u8]| {
    let registry = QueryRegistry::default();
    if let Ok(query) = registry.read_named(&mut &data[..]) {
        // Anything that decodes must survive another trip through the encoder
        let mut buf = Vec::new();
        write_named(&mut buf, query.as_ref()).unwrap();
        let again = registry.read_named(&mut &buf[..]).unwrap();
        assert!(&again == &query);
        assert_eq!(again.boost().to_bits(), query.boost().to_bits());
        assert_eq!(again.query_name(), query.query_name());
    }
});
