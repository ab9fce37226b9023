use crate::assessment::domain::{Motive, RawInputs, ScoreVector};
use crate::assessment::profile::{
    classify_profile, ClassifierConfig, ConflictTier, ProfileClassifier, ProfileKey,
    WellbeingTier,
};
use crate::assessment::scoring::compute_scores;

fn scores_with(update: impl FnOnce(&mut ScoreVector)) -> ScoreVector {
    let mut scores = ScoreVector::zeroed();
    update(&mut scores);
    scores
}

#[test]
fn neutral_vector_wanders() {
    let outcome = classify_profile(&ScoreVector::zeroed());

    assert_eq!(outcome.profile_key, ProfileKey::WanderingExplorer);
    assert_eq!(outcome.conflict_tier, ConflictTier::Low);
    assert_eq!(outcome.wellbeing_tier, WellbeingTier::Steady);
    assert_eq!(outcome.dominant_drive, Motive::Power);
}

#[test]
fn classifier_is_total_over_extreme_vectors() {
    let extremes = [-2.5, 0.0, 2.5];
    for psci in extremes {
        for discrepancy in extremes {
            for wellbeing in extremes {
                for depletion in extremes {
                    let scores = scores_with(|scores| {
                        scores.psci = psci;
                        scores.mdi_achievement = discrepancy.abs();
                        scores.mdi_affiliation = discrepancy.abs() / 2.0;
                        scores.implicit_power = discrepancy;
                        scores.implicit_affiliation = -discrepancy;
                        scores.wellbeing = wellbeing;
                        scores.depletion = depletion;
                    });

                    let outcome = classify_profile(&scores);
                    assert!(ProfileKey::all().contains(&outcome.profile_key));
                    assert_eq!(outcome.rankings.len(), 3);
                    assert_eq!(outcome.drive_rankings.len(), 3);
                }
            }
        }
    }
}

#[test]
fn empty_session_lands_on_the_dormant_ruler() {
    let outcome = classify_profile(&compute_scores(&RawInputs::default()));

    assert_eq!(outcome.wellbeing_tier, WellbeingTier::Strained);
    assert_eq!(outcome.conflict_tier, ConflictTier::High);
    assert_eq!(outcome.profile_key, ProfileKey::DormantRuler);
}

#[test]
fn suppressed_power_with_low_wellbeing_is_dormant_ruler() {
    let scores = scores_with(|scores| {
        scores.psci = 2.0;
        scores.implicit_power = 2.5;
        scores.explicit_power = -1.0;
        scores.mdi_power = 3.5;
        scores.mdi_achievement = 0.4;
        scores.wellbeing = -0.8;
    });

    let outcome = classify_profile(&scores);

    assert_eq!(outcome.profile_key, ProfileKey::DormantRuler);
    assert_eq!(outcome.dominant_conflict, Motive::Power);
    assert_eq!(outcome.rankings[0].score, 3.5);
    assert_eq!(outcome.rankings[1].dimension, Motive::Achievement);
}

#[test]
fn depletion_splits_heroes_from_caregivers() {
    let hero = scores_with(|scores| {
        scores.wellbeing = -1.0;
        scores.depletion = 1.0;
        scores.implicit_achievement = 1.5;
    });
    let caregiver = scores_with(|scores| {
        scores.wellbeing = -1.0;
        scores.depletion = 1.0;
        scores.implicit_affiliation = 1.5;
    });

    let hero = classify_profile(&hero);
    let caregiver = classify_profile(&caregiver);

    assert_eq!(hero.wellbeing_tier, WellbeingTier::Exhausted);
    assert_eq!(hero.profile_key, ProfileKey::ExhaustedHero);
    assert_eq!(caregiver.profile_key, ProfileKey::OverloadedCaregiver);
}

#[test]
fn integration_requires_small_discrepancies() {
    let integrated = scores_with(|scores| {
        scores.wellbeing = 1.0;
        scores.mdi_achievement = 0.5;
        scores.mdi_power = 0.5;
        scores.mdi_affiliation = 0.5;
        scores.implicit_achievement = 1.0;
    });
    assert_eq!(
        classify_profile(&integrated).profile_key,
        ProfileKey::IntegratedSage
    );

    let split = ScoreVector {
        mdi_achievement: 1.2,
        ..integrated
    };
    let outcome = classify_profile(&split);
    assert_eq!(outcome.wellbeing_tier, WellbeingTier::Steady);
    assert_eq!(outcome.conflict_tier, ConflictTier::Moderate);
    assert_eq!(outcome.profile_key, ProfileKey::SuppressedCreator);
}

#[test]
fn physiological_conflict_alone_raises_the_tier() {
    let scores = scores_with(|scores| {
        scores.psci = 0.6;
        scores.implicit_affiliation = 1.0;
    });

    let outcome = classify_profile(&scores);

    assert_eq!(outcome.conflict_tier, ConflictTier::Moderate);
    assert_eq!(outcome.profile_key, ProfileKey::ConflictedLover);
}

#[test]
fn tied_drives_prefer_power_then_achievement() {
    let scores = scores_with(|scores| {
        scores.implicit_achievement = 1.0;
        scores.implicit_power = 1.0;
        scores.implicit_affiliation = 1.0;
        scores.psci = 1.2;
    });

    let outcome = classify_profile(&scores);

    let order: Vec<Motive> = outcome
        .drive_rankings
        .iter()
        .map(|entry| entry.dimension)
        .collect();
    assert_eq!(
        order,
        vec![Motive::Power, Motive::Achievement, Motive::Affiliation]
    );
    assert_eq!(outcome.profile_key, ProfileKey::DormantRuler);
}

#[test]
fn nan_scores_never_dominate() {
    let scores = scores_with(|scores| {
        scores.implicit_power = f64::NAN;
        scores.implicit_affiliation = -0.5;
        scores.mdi_power = f64::NAN;
    });

    let outcome = classify_profile(&scores);

    assert_eq!(outcome.dominant_drive, Motive::Achievement);
    assert_ne!(outcome.dominant_conflict, Motive::Power);
}

#[test]
fn thresholds_come_from_configuration() {
    let scores = scores_with(|scores| {
        scores.wellbeing = 1.0;
        scores.implicit_achievement = 1.0;
    });
    assert_eq!(
        classify_profile(&scores).profile_key,
        ProfileKey::IntegratedSage
    );

    let strict = ProfileClassifier::new(ClassifierConfig {
        high_wellbeing: 1.5,
        ..ClassifierConfig::default()
    });
    let outcome = strict.classify(&scores);

    assert_eq!(outcome.wellbeing_tier, WellbeingTier::Steady);
    assert_eq!(outcome.profile_key, ProfileKey::WanderingExplorer);
    assert_eq!(strict.config().high_wellbeing, 1.5);
}

#[test]
fn classification_is_deterministic() {
    let scores = compute_scores(&super::common::complete_inputs());
    assert_eq!(classify_profile(&scores), classify_profile(&scores));
}
