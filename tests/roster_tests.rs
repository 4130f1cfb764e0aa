use std::collections::HashMap;
use std::fs;

use chrono::{NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use volunteer_roster::schedule::{
    normalize_slots, AvailabilityResponse, PeriodSnapshot, Slot, SlotKind, Volunteer,
};
use volunteer_roster::{
    generate, generate_roster, ConfigurationError, CsvStore, MemoryStore, RosterError,
};

fn slot(id: &str, kind: SlotKind, label: &str, date: &str, time: &str, functions: &[&str]) -> Slot {
    Slot {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        functions: functions.iter().map(|f| f.to_string()).collect(),
    }
}

fn volunteer(id: &str, functions: &[&str]) -> Volunteer {
    Volunteer {
        id: id.to_string(),
        name: format!("Volunteer {}", id),
        functions: functions.iter().map(|f| f.to_string()).collect(),
    }
}

fn counts(result: &volunteer_roster::GenerationResult) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for assignment in result.slots.iter().flat_map(|s| &s.assignments) {
        *counts.entry(assignment.volunteer_id.clone()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_single_sound_volunteer_covers_only_one_of_two_adjacent_slots() {
    let snapshot = PeriodSnapshot {
        slots: vec![
            slot("a", SlotKind::Service, "Culto Manhã", "2024-05-05", "09:00", &["Sound"]),
            slot("b", SlotKind::Service, "Culto Tarde", "2024-05-05", "11:00", &["Sound"]),
        ],
        volunteers: vec![volunteer("x", &["Sound"])],
        availability: vec![
            AvailabilityResponse {
                volunteer_id: "x".to_string(),
                slot_id: "a".to_string(),
                available: true,
            },
            AvailabilityResponse {
                volunteer_id: "x".to_string(),
                slot_id: "b".to_string(),
                available: true,
            },
        ],
        names: HashMap::new(),
    };

    for seed in 0..20 {
        let result = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(seed)).unwrap();

        let assigned: usize = result.slots.iter().map(|s| s.assignments.len()).sum();
        assert_eq!(assigned, 1);
        assert_eq!(result.slots[1].missing, vec!["Sound"]);
        assert_eq!(result.alerts, vec!["Culto Tarde (05/05): faltam \"Sound\""]);
    }
}

#[test]
fn test_three_usher_slots_spread_evenly_over_four_volunteers() {
    let snapshot = PeriodSnapshot {
        slots: vec![
            slot("s1", SlotKind::Service, "Culto 1", "2024-05-05", "08:00", &["Usher"]),
            slot("s2", SlotKind::Service, "Culto 2", "2024-05-05", "10:00", &["Usher"]),
            slot("s3", SlotKind::Service, "Culto 3", "2024-05-05", "19:00", &["Usher"]),
        ],
        volunteers: ["a", "b", "c", "d"].iter().map(|id| volunteer(id, &["Usher"])).collect(),
        ..PeriodSnapshot::default()
    };

    for seed in 0..50 {
        let result = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(seed)).unwrap();
        let counts = counts(&result);

        let all: Vec<usize> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| counts.get(*id).copied().unwrap_or(0))
            .collect();
        let max = all.iter().max().unwrap();
        let min = all.iter().min().unwrap();
        assert!(max - min <= 1, "uneven spread {:?} for seed {}", all, seed);
        assert!(result.alerts.is_empty());
    }
}

#[test]
fn test_arena_service_and_sub_event_collapse_to_one_sub_event() {
    let slots = vec![
        slot("svc", SlotKind::Service, "Arena Jovem", "2024-05-05", "19:00", &["Som"]),
        slot("sub", SlotKind::SubEvent, "Arena Jovem", "2024-05-05", "19:00", &["Som", "Mídia"]),
    ];

    let normalized = normalize_slots(&slots);

    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].kind, SlotKind::SubEvent);
}

#[test]
fn test_identical_special_events_are_both_kept() {
    let slots = vec![
        slot("e1", SlotKind::SpecialEvent, "Conferência", "2024-05-11", "19:00", &["Som"]),
        slot("e2", SlotKind::SpecialEvent, "Conferência", "2024-05-11", "19:00", &["Som"]),
    ];

    assert_eq!(normalize_slots(&slots).len(), 2);
}

#[test]
fn test_duplicate_slots_are_merged_before_assignment() {
    let snapshot = PeriodSnapshot {
        slots: vec![
            slot("svc", SlotKind::Service, "Culto", "2024-05-05", "19:00", &["Som"]),
            slot("dup", SlotKind::Service, "CULTO", "2024-05-05", "19:00", &["Som", "Mídia"]),
        ],
        volunteers: vec![volunteer("x", &["Som"]), volunteer("y", &["Mídia"])],
        ..PeriodSnapshot::default()
    };

    let result = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(result.slots.len(), 1);
    assert_eq!(result.slots[0].slot_id, "dup");
    assert_eq!(result.slots[0].assignments.len(), 2);
}

#[test]
fn test_regenerating_with_other_seeds_can_change_the_roster() {
    let snapshot = PeriodSnapshot {
        slots: vec![slot("s1", SlotKind::Service, "Culto", "2024-05-05", "10:00", &["Som"])],
        volunteers: (0..8).map(|i| volunteer(&format!("v{}", i), &["Som"])).collect(),
        ..PeriodSnapshot::default()
    };

    let picks: std::collections::HashSet<String> = (0..40)
        .map(|seed| {
            let result = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(seed)).unwrap();
            result.slots[0].assignments[0].volunteer_id.clone()
        })
        .collect();

    assert!(picks.len() > 1);
}

#[test]
fn test_same_seed_reproduces_the_roster() {
    let snapshot = PeriodSnapshot {
        slots: vec![
            slot("s1", SlotKind::Service, "Culto", "2024-05-05", "10:00", &["Som", "Recepção"]),
            slot("s2", SlotKind::Service, "Culto", "2024-05-05", "19:00", &["Som", "Recepção"]),
        ],
        volunteers: (0..6)
            .map(|i| volunteer(&format!("v{}", i), &["Som", "Recepção"]))
            .collect(),
        ..PeriodSnapshot::default()
    };

    let first = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(99)).unwrap();
    let second = generate("2024-05", &snapshot, &mut StdRng::seed_from_u64(99)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_memory_store_errors_surface_through_generate_roster() {
    let mut store = MemoryStore::new();
    store.insert(
        "empty",
        PeriodSnapshot {
            volunteers: vec![volunteer("x", &["Som"])],
            ..PeriodSnapshot::default()
        },
    );

    let err = generate_roster(&store, "empty", &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(
        err,
        RosterError::Configuration(ConfigurationError::NoSlots { .. })
    ));

    let err = generate_roster(&store, "missing", &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, RosterError::Store(_)));
}

#[test]
fn test_csv_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("slots.csv"),
        "period,id,kind,label,date,time,functions\n\
         2024-05,s1,service,Culto da Manhã,2024-05-05,10:00,Som;Recepção\n\
         2024-05,s2,service,Arena Jovem,2024-05-05,19:00,Som\n\
         2024-05,s3,sub_event,arena jovem,2024-05-05,19:00,Som;Mídia\n\
         2024-05,s4,special_event,Batismo,2024-05-11,15:00,Som\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("volunteers.csv"),
        "period,id,name,confirmed,functions\n\
         2024-05,p1,Ana,sim,Som;Recepção\n\
         2024-05,p2,Bia,sim,Som;Mídia\n\
         2024-05,p3,Caio,sim,Recepção\n\
         2024-05,p4,Davi,não,Som\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("availability.csv"),
        "volunteer_id,slot_id,available\np2,s4,não\n",
    )
    .unwrap();

    let store = CsvStore::new(dir.path());
    let result = generate_roster(&store, "2024-05", &mut StdRng::seed_from_u64(3)).unwrap();

    let ids: Vec<&str> = result.slots.iter().map(|s| s.slot_id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s3", "s4"]);

    for slot in &result.slots {
        assert_eq!(slot.assignments.len() + slot.missing.len(), slot.functions.len());
        for assignment in &slot.assignments {
            assert_ne!(assignment.volunteer_id, "p4");
        }
    }
    // Bia said no to the baptism
    assert!(!result.slots[2].is_assigned("p2"));
}

#[test]
fn test_blank_availability_keeps_the_volunteer_available() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("slots.csv"),
        "period,id,kind,label,date,time,functions\n\
         2024-05,s1,service,Culto,2024-05-05,10:00,Som;Som\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("volunteers.csv"),
        "period,id,name,confirmed,functions\n\
         2024-05,p1,Ana,sim,Som\n\
         2024-05,p2,Bia,sim,Som\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("availability.csv"),
        "volunteer_id,slot_id,available\np1,s1,\np2,s1,não\n",
    )
    .unwrap();

    let store = CsvStore::new(dir.path());
    let result = generate_roster(&store, "2024-05", &mut StdRng::seed_from_u64(8)).unwrap();

    let slot = &result.slots[0];
    assert_eq!(slot.functions, vec!["Som"]);
    assert_eq!(slot.assignments.len(), 1);
    assert_eq!(slot.assignments[0].volunteer_id, "p1");
    assert!(slot.missing.is_empty());
}
