use awcodec::{prelude::*, vecmap::VecMap};
use proptest::prelude::*;

/// arbitrary finite float for use with proptest
///
/// NaN never compares equal to itself, so round trips leave it out.
pub fn arb_finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |f| f.is_finite())
}

/// arbitrary string that survives being written as an optional trailing field
pub fn arb_opt_wstring() -> impl Strategy<Value = Option<String>> {
    prop::option::of(".{1,12}")
}

/// arbitrary AWB value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<String>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        // integers
        any::<i32>().prop_map(Value::from),
        any::<i8>().prop_map(Value::from),
        any::<u16>().prop_map(Value::from),
        // floats
        arb_finite_f32().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        20, // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Array),
                prop::collection::vec((any::<String>(), inner), 0..10)
                    .prop_map(|pairs| Value::Object(VecMap::from(pairs)))
            ]
        },
    )
}

/// arbitrary finite coordinate for use with proptest
pub fn arb_coord() -> impl Strategy<Value = Coord> {
    (arb_finite_f32(), arb_finite_f32()).prop_map(|(x, y)| Coord::new(x, y))
}

fn arb_ring() -> impl Strategy<Value = Vec<Coord>> { prop::collection::vec(arb_coord(), 0..8) }

fn arb_rings() -> impl Strategy<Value = Vec<Vec<Coord>>> { prop::collection::vec(arb_ring(), 0..4) }

/// arbitrary coordinate tree for use with proptest
pub fn arb_coord_tree() -> impl Strategy<Value = CoordTree> {
    prop_oneof![
        arb_coord().prop_map(CoordTree::Point),
        arb_ring().prop_map(CoordTree::Ring),
        arb_rings().prop_map(CoordTree::Rings),
    ]
}

/// arbitrary geometry, limited to the kind/coordinate pairings the wire can express
pub fn arb_geometry() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        arb_coord().prop_map(|c| {
            Geometry {
                kind: GeometryKind::Point,
                coordinates: CoordTree::Point(c),
            }
        }),
        arb_rings().prop_map(|rs| {
            Geometry {
                kind: GeometryKind::Line,
                coordinates: CoordTree::Rings(rs),
            }
        }),
        arb_ring().prop_map(|r| {
            Geometry {
                kind: GeometryKind::Polygon,
                coordinates: CoordTree::Ring(r),
            }
        }),
        arb_rings().prop_map(|rs| {
            Geometry {
                kind: GeometryKind::Polygon,
                coordinates: CoordTree::Rings(rs),
            }
        }),
    ]
}

fn arb_node_ref() -> impl Strategy<Value = NodeRef> {
    any::<(i32, i32, i32)>().prop_map(|(block_id, entity_id, lineage_id)| {
        NodeRef {
            block_id,
            entity_id,
            lineage_id,
        }
    })
}

/// arbitrary properties for use with proptest
pub fn arb_properties() -> impl Strategy<Value = Properties> {
    let shared = any::<(i32, i32, i32, i32, i32)>().prop_map(
        |(class_id, layer_id, sublayer_id, node_type, state)| {
            SharedProperties {
                class_id,
                layer_id,
                sublayer_id,
                node_type,
                state,
            }
        },
    );
    let schema = prop_oneof![
        (any::<i32>(), any::<i32>(), arb_finite_f32(), arb_finite_f32()).prop_map(
            |(symbol_id, symbol_state, angle, scale)| {
                PropertySchema::Point {
                    symbol_id,
                    symbol_state,
                    angle,
                    scale,
                }
            }
        ),
        (arb_node_ref(), arb_node_ref()).prop_map(|(head, tail)| PropertySchema::Link { head, tail }),
    ];
    (shared, schema, arb_opt_wstring()).prop_map(|(shared, schema, color)| {
        Properties {
            shared,
            schema,
            color,
        }
    })
}

/// arbitrary mark for use with proptest
pub fn arb_mark() -> impl Strategy<Value = Mark> {
    (
        arb_finite_f32(),
        arb_finite_f32(),
        any::<String>(),
        prop::option::of(arb_coord_tree()),
        arb_opt_wstring(),
    )
        .prop_map(|(rotation, text_height, text, coordinates, color)| {
            Mark {
                rotation,
                text_height,
                text,
                coordinates,
                color,
            }
        })
}

/// arbitrary entity reference for use with proptest
pub fn arb_entity_ref() -> impl Strategy<Value = EntityRef> {
    any::<(i32, i32)>().prop_map(|(block_id, entity_id)| EntityRef { block_id, entity_id })
}

/// arbitrary feature for use with proptest
pub fn arb_feature() -> impl Strategy<Value = Feature> {
    (
        prop::option::of(arb_geometry()),
        prop::option::of(arb_properties()),
        prop::collection::vec(arb_mark(), 0..4),
        prop::collection::vec(arb_entity_ref(), 0..8),
    )
        .prop_map(|(geometry, properties, marks, source_node_refs)| {
            Feature {
                geometry,
                properties,
                marks,
                source_node_refs,
            }
        })
}

/// arbitrary AWG feature record for use with proptest
pub fn arb_feature_record() -> impl Strategy<Value = FeatureRecord> {
    (
        any::<(i32, i32, i32)>(),
        any::<String>(),
        prop::collection::vec(arb_feature(), 0..6),
    )
        .prop_map(|((source_id, block_id, entity_id), title, features)| {
            FeatureRecord {
                source_id,
                block_id,
                entity_id,
                title,
                features,
            }
        })
}
