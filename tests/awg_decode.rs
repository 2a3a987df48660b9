use awcodec::{
    awg,
    encoding::ser::Serializer,
    errors::DecodingError,
    prelude::*,
    tag,
};
use awcodec_strategy::*;
use proptest::prelude::*;

fn block(tag: u8, body: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.put_i32(body.len() as i32);
    out.put_slice(body);
    out
}

fn fixed_example() -> Vec<u8> {
    let mut file = Vec::new();
    file.put_i32(1);
    file.put_i32(3);
    file.put_i32(100);
    file.put_wstring("T");

    let mut coord = vec![1];
    coord.put_f32(10.5);
    coord.put_f32(20.25);

    let mut data = block(tag::FILE, &file);
    data.extend(block(tag::FEATURE, &block(tag::COORD, &coord)));
    data
}

#[test]
fn fixed_example_decodes() {
    let record = awg::decode(&fixed_example()).unwrap();

    assert_eq!(record.source_id, 1);
    assert_eq!(record.block_id, 3);
    assert_eq!(record.entity_id, 100);
    assert_eq!(record.title, "T");
    assert_eq!(record.features.len(), 1);

    let f = &record.features[0];
    assert_eq!(
        f.geometry,
        Some(Geometry {
            kind: GeometryKind::Point,
            coordinates: CoordTree::Point(Coord::new(10.5, 20.25)),
        })
    );
    assert_eq!(f.properties, None);
    assert!(f.marks.is_empty());
    assert!(f.source_node_refs.is_empty());
}

#[test]
fn truncated_mid_payload() {
    let data = fixed_example();
    // the FILE block alone is a complete stream
    let file_len = 5 + 12 + 3;
    for cut in (1..data.len()).filter(|c| *c != file_len) {
        match awg::decode(&data[..cut]) {
            Err(e) => assert!(e.is_truncation(), "cut at {} gave {:?}", cut, e),
            Ok(r) => panic!("cut at {} decoded to {:?}", cut, r),
        }
    }
}

#[test]
fn negative_lengths_in_nested_blocks() {
    let mut data = vec![tag::FEATURE];
    data.put_i32(5);
    data.extend(&[tag::COORD, 0xfe, 0xff, 0xff, 0xff]);
    assert_eq!(
        awg::decode(&data),
        Err(DecodingError::InvalidBlockLength {
            offset: 6,
            length: -2,
        })
    );
}

#[test]
fn negative_group_count() {
    let mut coord = vec![4];
    coord.put_i32(-3);
    let data = block(tag::FEATURE, &block(tag::COORD, &coord));
    match awg::decode(&data) {
        Err(DecodingError::SchemaMismatch { offset, .. }) => assert_eq!(offset, 11),
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn domain_record_tags_are_skipped() {
    let mut data = block(tag::LAYER, &[1, 2]);
    data.extend(block(tag::SYMBOL, &[]));
    data.extend(fixed_example());
    data.extend(block(tag::NODE_TYPE, &[0; 9]));
    assert_eq!(awg::decode(&data).unwrap(), awg::decode(&fixed_example()).unwrap());
}

#[test]
fn entity_refs_from_decoded_values() {
    let v = awcodec::awb::decode(&awcodec::awb::encode_full(&Value::Array(vec![
        Value::Object(
            vec![
                ("blockId".to_string(), Value::Int(2)),
                ("entityId".to_string(), Value::Int(5)),
            ]
            .into(),
        ),
    ]))
    .unwrap())
    .unwrap();
    let refs: Vec<EntityRef> = v
        .to_vec()
        .unwrap()
        .iter()
        .map(EntityRef::from_value)
        .collect::<Result<_, _>>()
        .unwrap();
    let enc = awcodec::encoding::ser::encode_entity_refs(&refs).unwrap();
    assert_eq!(enc, vec![1, 2, 0, 0, 0, 5, 0, 0, 0]);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 300, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(record in arb_feature_record()) {
        let enc = awg::encode_full(&record).unwrap();
        let dec = awg::decode(&enc);

        if dec.as_ref() != Ok(&record) {
            panic!("Tried encoding\n {:?}\n as \n{:x?}\n got \n{:?}\n", record, enc, dec)
        }
    }
}
