//! File round trips: what is written is what comes back.

use bevy::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::feature::Feature;
use crate::record::{SaveRecord, generate_save};
use crate::resources::{DialogueValue, DialogueVariables};
use crate::save::{load_from_file, load_save, save_to_file};

#[test]
fn test_position_written_read_and_committed() {
    let saves = temp_saves();
    let mut world = test_world(Vec3::new(1.0, 2.0, 3.0), saves.path());

    let record = generate_save(None, &[Feature::SylviePosition], &mut world);
    assert_eq!(record.features, vec![Feature::SylviePosition]);
    assert_eq!(record.sylvie_position, [1.0, 2.0, 3.0]);

    save_to_file(&record, saves.path()).unwrap();
    set_sylvie_translation(&mut world, Vec3::new(50.0, -4.0, 0.5));

    let loaded = load_from_file(&record.path_name, saves.path());
    assert_eq!(loaded.as_ref(), Some(&record));

    load_save(&mut world, loaded);
    assert_eq!(sylvie_translation(&mut world), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_all_features_survive_the_file() {
    let saves = temp_saves();
    let mut world = test_world(Vec3::new(-3.5, 0.0, 12.25), saves.path());
    world.resource_mut::<VisitedAreas>().visit("lighthouse");
    {
        let mut vars = world.resource_mut::<DialogueVariables>();
        vars.set("met_keeper", DialogueValue::Bool(true));
        vars.set("shells", DialogueValue::Int(-2));
        vars.set("tide", DialogueValue::Float(0.75));
        vars.set("nickname", DialogueValue::Text("Syl".to_string()));
    }

    let record = generate_save(None, &Feature::ALL, &mut world);
    save_to_file(&record, saves.path()).unwrap();

    assert_eq!(load_from_file(&record.path_name, saves.path()), Some(record));
}

fn dialogue_value() -> impl Strategy<Value = DialogueValue> {
    prop_oneof![
        any::<bool>().prop_map(DialogueValue::Bool),
        any::<i32>().prop_map(DialogueValue::Int),
        (-1.0e6f32..1.0e6).prop_map(DialogueValue::Float),
        "[a-z ]{0,12}".prop_map(DialogueValue::Text),
    ]
}

fn feature_list() -> impl Strategy<Value = Vec<Feature>> {
    Just(Feature::ALL.to_vec())
        .prop_shuffle()
        .prop_flat_map(|all| (1..=all.len()).prop_map(move |n| all[..n].to_vec()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_record_round_trips_through_file(
        features in feature_list(),
        name in "[a-z_]{1,16}",
        position in prop::array::uniform3(-1.0e6f32..1.0e6),
        areas in prop::collection::btree_set("[a-z]{1,10}", 0..6),
        vars in prop::collection::btree_map("[a-z_]{1,10}", dialogue_value(), 0..6),
    ) {
        let saves = temp_saves();
        let record = SaveRecord {
            features,
            path_name: name,
            sylvie_position: position,
            visited_areas: areas,
            dialogue_variables: vars,
        };

        save_to_file(&record, saves.path()).unwrap();
        let loaded = load_from_file(&record.path_name, saves.path());
        prop_assert_eq!(loaded, Some(record));
    }
}

#[test]
fn test_empty_payloads_round_trip() {
    let saves = temp_saves();
    let record = SaveRecord {
        features: vec![Feature::VisitedAreas, Feature::DialogueVariables],
        path_name: "blank".to_string(),
        sylvie_position: [0.0; 3],
        visited_areas: BTreeSet::new(),
        dialogue_variables: BTreeMap::new(),
    };
    save_to_file(&record, saves.path()).unwrap();
    assert_eq!(load_from_file("blank", saves.path()), Some(record));
}
