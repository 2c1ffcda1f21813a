// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use bookdesk_app::{
    AddOn, BookingForm, CleaningService, FieldKey, PHONE_DIGITS, ResultsBody, ResultsView,
    ServiceKind, normalize_phone, partition, phone_incomplete, sub_districts_for,
};
use bookdesk_testkit::{BookingFaker, skill_mismatch};

#[test]
fn phone_normalization_holds_for_generated_input() {
    for seed in 0_u64..200_u64 {
        let mut faker = BookingFaker::new(seed);
        let raw = faker.phone_input();
        let mut form = BookingForm::fresh(ServiceKind::Pest);
        form.set_text(FieldKey::Phone, &raw);

        let stored = form.text(FieldKey::Phone).expect("phone is a text field");
        assert_eq!(stored, normalize_phone(&raw), "seed {seed}");
        assert!(stored.chars().all(|ch| ch.is_ascii_digit()), "seed {seed}");
        assert!(stored.len() <= PHONE_DIGITS, "seed {seed}");
        assert_eq!(
            form.field_error(FieldKey::Phone).is_some(),
            phone_incomplete(stored),
            "seed {seed}: {raw:?}"
        );
    }
}

#[test]
fn generated_forms_pass_the_gate() {
    for seed in 0_u64..100_u64 {
        let mut faker = BookingFaker::new(seed);
        for kind in ServiceKind::ALL {
            let form = faker.booking_form(kind);
            let draft = form.gate().expect("generated form should pass");
            assert_eq!(draft.service_kind(), kind, "seed {seed}");
        }
    }
}

#[test]
fn main_service_change_always_clears_add_ons() {
    for seed in 0_u64..100_u64 {
        let mut faker = BookingFaker::new(seed);
        let mut form = faker.booking_form(ServiceKind::Cleaning);
        let BookingForm::Cleaning(cleaning) = &mut form else {
            panic!("expected cleaning form");
        };
        let current = cleaning.booking.main_service;
        let next = CleaningService::ALL
            .into_iter()
            .find(|service| *service != current)
            .expect("more than one cleaning service");
        cleaning.select_main_service(next);
        assert!(cleaning.booking.add_services.is_empty(), "seed {seed}");
    }
}

#[test]
fn region_change_resets_to_first_sub_district() {
    for seed in 0_u64..60_u64 {
        let mut faker = BookingFaker::new(seed);
        let mut form = faker.booking_form(ServiceKind::Pest);
        let steps = faker.int_n(4) as isize + 1;
        form.cycle_choice(FieldKey::Region, steps);
        let contact = form.contact();
        assert_eq!(
            contact.sub_district,
            sub_districts_for(&contact.region)[0],
            "seed {seed}"
        );
    }
}

#[test]
fn toggling_an_add_on_twice_restores_selection() {
    for seed in 0_u64..60_u64 {
        let mut faker = BookingFaker::new(seed);
        let mut form = faker.booking_form(ServiceKind::Cleaning);
        let BookingForm::Cleaning(cleaning) = &mut form else {
            panic!("expected cleaning form");
        };
        let mut before = cleaning.booking.add_services.clone();
        for add_on in AddOn::ALL {
            cleaning.toggle_add_on(add_on);
            cleaning.toggle_add_on(add_on);
        }
        let mut after = cleaning.booking.add_services.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after, "seed {seed}");
    }
}

#[test]
fn partition_is_exact_split() {
    for seed in 0_u64..100_u64 {
        let mut faker = BookingFaker::new(seed);
        let count = faker.int_n(9);
        let recommendations = faker.recommendations(count);
        let split = partition(&recommendations);

        assert_eq!(
            split.valid.len() + split.skipped.len(),
            recommendations.len(),
            "seed {seed}"
        );
        assert!(split.valid.iter().all(|rec| !rec.skill_mismatch()));
        assert!(split.skipped.iter().all(|rec| rec.skill_mismatch()));

        let valid_in_order: Vec<_> = recommendations
            .iter()
            .filter(|rec| !rec.skill_mismatch())
            .collect();
        assert_eq!(split.valid, valid_in_order, "seed {seed}");
    }
}

#[test]
fn results_view_never_fails_on_generated_envelopes() {
    for seed in 0_u64..100_u64 {
        let mut faker = BookingFaker::new(seed);
        let kind = ServiceKind::ALL[faker.int_n(2)];
        let draft = faker.draft(kind);
        let mut data = faker.result_data(&draft);
        if seed % 7 == 0
            && let Some(first) = data.recommendations.first_mut()
        {
            first.date = Some("not-a-date".to_owned());
        }
        let view = ResultsView::build(draft.service_kind(), &data);
        assert!(view.disclaimer.is_some(), "seed {seed}");
        match &view.body {
            ResultsBody::Ranked { cards, .. } => assert!(!cards.is_empty()),
            ResultsBody::NoQualifiedStaff { staff, .. } => assert!(staff.len() <= 3),
            ResultsBody::Placeholder => assert!(data.recommendations.is_empty()),
        }
    }
}

#[test]
fn mismatch_only_lists_remainder() {
    let recommendations: Vec<_> = (1..=4)
        .map(|rank| skill_mismatch(rank, &format!("師傅{rank}")))
        .collect();
    let data = bookdesk_app::BookingResultData {
        recommendations,
        ..Default::default()
    };
    let view = ResultsView::build(ServiceKind::Pest, &data);
    assert_eq!(
        view.body,
        ResultsBody::NoQualifiedStaff {
            filtered_count: 4,
            staff: vec!["師傅1".to_owned(), "師傅2".to_owned(), "師傅3".to_owned()],
            remaining: 1,
        }
    );
}
